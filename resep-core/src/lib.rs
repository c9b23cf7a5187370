//! Resep Core Library
//!
//! Shared types and logic for the Resep recipe catalog client:
//! canonical recipe ids, the local state store, the per-installation
//! identity, and the HTTP clients for the catalog, favorites and
//! upload endpoints.

pub mod client;
pub mod favorites;
pub mod identity;
pub mod models;
pub mod recipe_id;
pub mod store;
pub mod upload;

pub use client::{ApiClient, ApiError, ToggleOutcome, DEFAULT_TIMEOUT};
pub use favorites::{merge_favorites, FavoritesService};
pub use identity::IdentityProvider;
pub use models::{Category, Difficulty, Recipe, RecipeQuery, SortOrder, UserProfile};
pub use recipe_id::RecipeId;
pub use store::{LocalStore, StoreError};
pub use upload::{validate_image, UploadClient, UploadError, IMAGE_FIELD, MAX_IMAGE_BYTES, UPLOAD_TIMEOUT};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
