//! Favorites reconciliation between the remote service and the local
//! store.
//!
//! The remote service is authoritative when reachable; the local store
//! is the offline fallback. Reads merge both sources into one
//! de-duplicated set of canonical ids. Toggles go remote-first and
//! mirror the result into the local list so the fallback stays in sync;
//! a remote failure degrades to a plain local toggle and is never
//! surfaced to the caller.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::client::{ApiClient, ToggleOutcome};
use crate::recipe_id::RecipeId;
use crate::store::{LocalStore, StoreError};

/// Normalizes raw favorite entries, dropping unresolvable ones.
pub fn normalize_ids(values: &[Value]) -> Vec<RecipeId> {
    values.iter().filter_map(RecipeId::from_value).collect()
}

/// Union of remote entries and local ids as canonical ids.
///
/// Duplicates across the two sources collapse by identity equality
/// after normalization; no precedence is needed.
pub fn merge_favorites(remote: &[Value], local: &[RecipeId]) -> BTreeSet<RecipeId> {
    let mut set: BTreeSet<RecipeId> = normalize_ids(remote).into_iter().collect();
    set.extend(local.iter().cloned());
    set
}

/// Two-tier favorites repository: remote-backed with a local cache.
#[derive(Debug)]
pub struct FavoritesService {
    client: Option<ApiClient>,
    store: LocalStore,
}

impl FavoritesService {
    /// Creates a service; without a client it operates offline-only.
    pub fn new(client: Option<ApiClient>, store: LocalStore) -> Self {
        Self { client, store }
    }

    /// Returns the merged favorite set for a user.
    ///
    /// A remote failure is logged and degrades to the local list alone.
    pub async fn fetch(&self, user_identifier: &str) -> BTreeSet<RecipeId> {
        let local = self.store.read_favorites();

        let remote = match &self.client {
            Some(client) => match client.get_favorites(user_identifier).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Failed to fetch remote favorites, using local list: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        merge_favorites(&remote, &local)
    }

    /// Toggles a favorite, returning the resulting membership state.
    ///
    /// Remote-first: a boolean reply is mirrored into the local list; a
    /// list reply replaces the local list and membership is derived
    /// from it. On remote failure (or with no remote configured) the
    /// toggle happens locally.
    pub async fn toggle(
        &self,
        recipe_id: &RecipeId,
        user_identifier: &str,
    ) -> Result<bool, StoreError> {
        if let Some(client) = &self.client {
            match client.toggle_favorite(recipe_id, user_identifier).await {
                Ok(ToggleOutcome::State(state)) => {
                    if let Err(e) = self.mirror_state(recipe_id, state) {
                        tracing::warn!("Failed to mirror favorite state locally: {}", e);
                    }
                    return Ok(state);
                }
                Ok(ToggleOutcome::List(entries)) => {
                    let ids = normalize_ids(&entries);
                    let state = ids.contains(recipe_id);
                    if let Err(e) = self.store.write_favorites(&ids) {
                        tracing::warn!("Failed to sync server favorites locally: {}", e);
                    }
                    return Ok(state);
                }
                Err(e) => {
                    tracing::warn!("Server toggle failed, falling back to local store: {}", e);
                }
            }
        }

        self.store.toggle_favorite(recipe_id)
    }

    /// Applies a known membership state to the local list.
    fn mirror_state(&self, recipe_id: &RecipeId, state: bool) -> Result<(), StoreError> {
        let mut ids = self.store.read_favorites();
        let present = ids.contains(recipe_id);
        if state && !present {
            ids.push(recipe_id.clone());
        } else if !state && present {
            ids.retain(|id| id != recipe_id);
        } else {
            return Ok(());
        }
        self.store.write_favorites(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn offline_service() -> (FavoritesService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().to_path_buf());
        (FavoritesService::new(None, store), temp_dir)
    }

    #[test]
    fn test_merge_unions_without_duplicates() {
        let remote = vec![json!(2), json!(3)];
        let local = vec![RecipeId::Num(1), RecipeId::Num(2)];

        let merged = merge_favorites(&remote, &local);
        assert_eq!(
            merged.into_iter().collect::<Vec<_>>(),
            vec![RecipeId::Num(1), RecipeId::Num(2), RecipeId::Num(3)]
        );
    }

    #[test]
    fn test_merge_collapses_heterogeneous_shapes() {
        let remote = vec![json!({"recipe_id": 1}), json!("2"), json!({"recipe": {"id": 3}})];
        let local = vec![RecipeId::Num(1), RecipeId::Num(3)];

        let merged = merge_favorites(&remote, &local);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_drops_unresolvable_entries() {
        let remote = vec![json!(null), json!(""), json!({"unknown": 1}), json!(5)];
        let merged = merge_favorites(&remote, &[]);
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![RecipeId::Num(5)]);
    }

    #[tokio::test]
    async fn test_offline_fetch_uses_local_list() {
        let (service, _temp) = offline_service();
        service
            .store
            .write_favorites(&[RecipeId::Num(4), RecipeId::Num(9)])
            .unwrap();

        let favorites = service.fetch("user-1").await;
        assert_eq!(
            favorites.into_iter().collect::<Vec<_>>(),
            vec![RecipeId::Num(4), RecipeId::Num(9)]
        );
    }

    #[tokio::test]
    async fn test_offline_toggle_roundtrip() {
        let (service, _temp) = offline_service();
        let id = RecipeId::Num(3);

        assert!(service.toggle(&id, "user-1").await.unwrap());
        assert!(service.fetch("user-1").await.contains(&id));

        assert!(!service.toggle(&id, "user-1").await.unwrap());
        assert!(!service.fetch("user-1").await.contains(&id));
    }

    #[test]
    fn test_mirror_state_adds_and_removes() {
        let (service, _temp) = offline_service();
        let id = RecipeId::Num(8);

        service.mirror_state(&id, true).unwrap();
        assert_eq!(service.store.read_favorites(), vec![id.clone()]);

        // Idempotent when already in the desired state.
        service.mirror_state(&id, true).unwrap();
        assert_eq!(service.store.read_favorites(), vec![id.clone()]);

        service.mirror_state(&id, false).unwrap();
        assert!(service.store.read_favorites().is_empty());
    }
}
