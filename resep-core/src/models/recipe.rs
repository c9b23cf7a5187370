use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::recipe_id::RecipeId;

/// Recipe category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Makanan,
    Minuman,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Makanan => write!(f, "makanan"),
            Category::Minuman => write!(f, "minuman"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "makanan" => Ok(Category::Makanan),
            "minuman" => Ok(Category::Minuman),
            _ => Err(format!(
                "Invalid category '{}'. Use: makanan, minuman",
                s
            )),
        }
    }
}

/// Recipe difficulty level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Mudah,
    Sedang,
    Sulit,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Mudah => write!(f, "mudah"),
            Difficulty::Sedang => write!(f, "sedang"),
            Difficulty::Sulit => write!(f, "sulit"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mudah" => Ok(Difficulty::Mudah),
            "sedang" => Ok(Difficulty::Sedang),
            "sulit" => Ok(Difficulty::Sulit),
            _ => Err(format!(
                "Invalid difficulty '{}'. Use: mudah, sedang, sulit",
                s
            )),
        }
    }
}

/// Sort direction for catalog queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid order '{}'. Use: asc, desc", s)),
        }
    }
}

/// A recipe as reported by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for the catalog listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl RecipeQuery {
    /// Renders the set filters as query-string pairs.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            params.push(("difficulty", difficulty.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by", sort_by.clone()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.to_string()));
        }
        params
    }
}
