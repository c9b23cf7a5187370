mod profile;
mod recipe;

pub use profile::UserProfile;
pub use recipe::{Category, Difficulty, Recipe, RecipeQuery, SortOrder};
