//! File-backed local state store.
//!
//! Persists the offline favorites list, the user profile and the
//! per-installation identifier under a single data directory:
//!
//! ```text
//! ~/.local/share/resep/
//! ├── favorites.json       # JSON array of recipe ids
//! ├── user_profile.json    # username, bio, avatar
//! └── user_identifier      # text file with the opaque token
//! ```
//!
//! The store is the offline source of truth when the remote service is
//! unavailable. Reads never fail: a missing or corrupt file falls back
//! to the empty/default value. Writes are plain read-modify-write with
//! no cross-process coordination; concurrent toggles from separate
//! processes may race (last write wins).

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::models::UserProfile;
use crate::recipe_id::RecipeId;

const FAVORITES_FILE: &str = "favorites.json";
const PROFILE_FILE: &str = "user_profile.json";
const IDENTIFIER_FILE: &str = "user_identifier";

/// Errors that can occur writing local state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Local state store scoped to an explicit data directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    /// Creates a store over the given data directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the store's data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(FAVORITES_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    fn identifier_path(&self) -> PathBuf {
        self.data_dir.join(IDENTIFIER_FILE)
    }

    // ==================== Favorites ====================

    /// Reads the persisted favorites list.
    ///
    /// A missing or corrupt file yields an empty list. Entries are
    /// normalized on the way in, so a hand-edited file holding object
    /// shapes still reads as canonical ids; unresolvable entries are
    /// dropped.
    pub fn read_favorites(&self) -> Vec<RecipeId> {
        let contents = match std::fs::read_to_string(self.favorites_path()) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(values) => values.iter().filter_map(RecipeId::from_value).collect(),
            Err(e) => {
                tracing::warn!("Corrupt favorites file, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Writes the full favorites list.
    pub fn write_favorites(&self, ids: &[RecipeId]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string(ids)?;
        std::fs::write(self.favorites_path(), json)?;
        Ok(())
    }

    /// Toggles an id in the favorites list.
    ///
    /// Removes and returns `false` if present; appends and returns
    /// `true` otherwise.
    pub fn toggle_favorite(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let mut ids = self.read_favorites();
        let state = match ids.iter().position(|existing| existing == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.clone());
                true
            }
        };
        self.write_favorites(&ids)?;
        Ok(state)
    }

    // ==================== Profile ====================

    /// Loads the stored profile, falling back to the default when the
    /// file is missing or corrupt.
    pub fn load_profile(&self) -> UserProfile {
        let contents = match std::fs::read_to_string(self.profile_path()) {
            Ok(contents) => contents,
            Err(_) => return UserProfile::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Corrupt profile file, using defaults: {}", e);
                UserProfile::default()
            }
        }
    }

    /// Saves the profile.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string(profile)?;
        std::fs::write(self.profile_path(), json)?;
        Ok(())
    }

    // ==================== Identifier ====================

    /// Loads the persisted user identifier, if any.
    pub fn load_identifier(&self) -> Option<String> {
        let contents = std::fs::read_to_string(self.identifier_path()).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persists the user identifier.
    pub fn save_identifier(&self, identifier: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::write(self.identifier_path(), identifier)?;
        Ok(())
    }

    /// Removes the persisted identifier so a new one is generated on
    /// the next use.
    pub fn clear_identifier(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.identifier_path())
    }

    // ==================== Reset ====================

    /// Removes favorites, profile and identifier.
    pub fn reset(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.favorites_path())?;
        remove_if_exists(&self.profile_path())?;
        remove_if_exists(&self.identifier_path())?;
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_read_favorites_missing_file() {
        let (store, _temp) = test_store();
        assert!(store.read_favorites().is_empty());
    }

    #[test]
    fn test_read_favorites_corrupt_file() {
        let (store, _temp) = test_store();
        std::fs::write(store.favorites_path(), "not json {{{").unwrap();
        assert!(store.read_favorites().is_empty());
    }

    #[test]
    fn test_write_and_read_favorites() {
        let (store, _temp) = test_store();
        let ids = vec![RecipeId::Num(1), RecipeId::Text("es-teh".to_string())];
        store.write_favorites(&ids).unwrap();
        assert_eq!(store.read_favorites(), ids);
    }

    #[test]
    fn test_read_normalizes_object_entries() {
        let (store, _temp) = test_store();
        std::fs::write(
            store.favorites_path(),
            r#"[1, "2", {"recipe_id": 3}, null, {"recipe": {"id": 4}}]"#,
        )
        .unwrap();
        assert_eq!(
            store.read_favorites(),
            vec![
                RecipeId::Num(1),
                RecipeId::Num(2),
                RecipeId::Num(3),
                RecipeId::Num(4)
            ]
        );
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (store, _temp) = test_store();
        let id = RecipeId::Num(7);

        assert!(store.toggle_favorite(&id).unwrap());
        assert_eq!(store.read_favorites(), vec![id.clone()]);

        assert!(!store.toggle_favorite(&id).unwrap());
        assert!(store.read_favorites().is_empty());
    }

    #[test]
    fn test_toggle_preserves_other_entries() {
        let (store, _temp) = test_store();
        store
            .write_favorites(&[RecipeId::Num(1), RecipeId::Num(2)])
            .unwrap();

        store.toggle_favorite(&RecipeId::Num(1)).unwrap();
        assert_eq!(store.read_favorites(), vec![RecipeId::Num(2)]);
    }

    #[test]
    fn test_profile_default_when_missing() {
        let (store, _temp) = test_store();
        assert_eq!(store.load_profile(), UserProfile::default());
    }

    #[test]
    fn test_profile_default_when_corrupt() {
        let (store, _temp) = test_store();
        std::fs::write(store.profile_path(), "][").unwrap();
        assert_eq!(store.load_profile(), UserProfile::default());
    }

    #[test]
    fn test_profile_roundtrip() {
        let (store, _temp) = test_store();
        let profile = UserProfile {
            username: "Budi".to_string(),
            bio: "Suka masak".to_string(),
            avatar: None,
        };
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile(), profile);
    }

    #[test]
    fn test_identifier_roundtrip() {
        let (store, _temp) = test_store();
        assert!(store.load_identifier().is_none());

        store.save_identifier("token-123").unwrap();
        assert_eq!(store.load_identifier().as_deref(), Some("token-123"));

        store.clear_identifier().unwrap();
        assert!(store.load_identifier().is_none());
    }

    #[test]
    fn test_reset_clears_all_state() {
        let (store, _temp) = test_store();
        store.write_favorites(&[RecipeId::Num(1)]).unwrap();
        store.save_profile(&UserProfile::default()).unwrap();
        store.save_identifier("token").unwrap();

        store.reset().unwrap();

        assert!(store.read_favorites().is_empty());
        assert_eq!(store.load_profile(), UserProfile::default());
        assert!(store.load_identifier().is_none());
    }

    #[test]
    fn test_reset_on_empty_store() {
        let (store, _temp) = test_store();
        store.reset().unwrap();
    }
}
