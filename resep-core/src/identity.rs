//! Per-installation user identity.
//!
//! The backend scopes favorites by an opaque identifier rather than an
//! account. The identifier is generated once, persisted in the local
//! store, and reused until explicitly reset. If the store cannot be
//! written the identifier degrades to a session-only value so requests
//! still carry a stable token for the lifetime of the process.

use uuid::Uuid;

use crate::store::{LocalStore, StoreError};

/// Supplies the stable per-installation user identifier.
#[derive(Debug)]
pub struct IdentityProvider {
    store: LocalStore,
    session: Option<String>,
}

impl IdentityProvider {
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Returns the user identifier, generating and persisting one on
    /// first use.
    ///
    /// Repeated calls return the same value. A persistence failure is
    /// logged and the generated value is kept in memory for the rest of
    /// the session.
    pub fn get_or_create(&mut self) -> String {
        if let Some(identifier) = &self.session {
            return identifier.clone();
        }

        let identifier = match self.store.load_identifier() {
            Some(identifier) => identifier,
            None => {
                let identifier = Uuid::new_v4().to_string();
                if let Err(e) = self.store.save_identifier(&identifier) {
                    tracing::warn!(
                        "Failed to persist user identifier, keeping it for this session only: {}",
                        e
                    );
                }
                identifier
            }
        };

        self.session = Some(identifier.clone());
        identifier
    }

    /// Clears the persisted identifier; the next call to
    /// [`get_or_create`](Self::get_or_create) generates a new one.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.session = None;
        self.store.clear_identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_provider() -> (IdentityProvider, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().to_path_buf());
        (IdentityProvider::new(store), temp_dir)
    }

    #[test]
    fn test_identifier_stable_within_session() {
        let (mut provider, _temp) = test_provider();
        let first = provider.get_or_create();
        let second = provider.get_or_create();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_identifier_persisted_across_providers() {
        let temp_dir = TempDir::new().unwrap();
        let first = {
            let store = LocalStore::new(temp_dir.path().to_path_buf());
            IdentityProvider::new(store).get_or_create()
        };
        let second = {
            let store = LocalStore::new(temp_dir.path().to_path_buf());
            IdentityProvider::new(store).get_or_create()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_generates_new_identifier() {
        let (mut provider, _temp) = test_provider();
        let original = provider.get_or_create();
        provider.reset().unwrap();
        let renewed = provider.get_or_create();
        assert_ne!(original, renewed);
    }

    #[test]
    fn test_unwritable_store_falls_back_to_session_value() {
        // Use a regular file as the data directory so writes fail.
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = LocalStore::new(PathBuf::from(&blocker));
        let mut provider = IdentityProvider::new(store);

        let first = provider.get_or_create();
        let second = provider.get_or_create();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
