//! Canonical recipe identifiers.
//!
//! Favorite entries arrive in different shapes depending on the source:
//! a bare number, a numeric string, or an object wrapping the id under
//! one of several keys (`id`, `recipe_id`, `recipeId`, `recipe.id`).
//! `RecipeId` is the canonical form every shape reduces to before
//! favorites are compared or merged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object keys that may carry the id, in precedence order.
const ID_KEYS: [&str; 3] = ["id", "recipe_id", "recipeId"];

/// Canonical identifier of a recipe.
///
/// Numeric if the source value parses as an integer, otherwise the raw
/// string. Normalizing an already-canonical id yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecipeId {
    Num(i64),
    Text(String),
}

impl RecipeId {
    /// Normalizes an arbitrary JSON value to a canonical id.
    ///
    /// Returns `None` for values that do not resolve to an id: null,
    /// empty strings, booleans, arrays, and objects without any of the
    /// known id keys. Object values are unwrapped by the first key
    /// present; a present key whose value does not resolve discards the
    /// entry rather than falling through to the next key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(num) => Some(RecipeId::Num(num)),
                // Non-integer ids are kept verbatim rather than rounded.
                None => Some(RecipeId::Text(n.to_string())),
            },
            Value::String(s) => {
                if s.trim().is_empty() {
                    return None;
                }
                match s.trim().parse::<i64>() {
                    Ok(num) => Some(RecipeId::Num(num)),
                    Err(_) => Some(RecipeId::Text(s.clone())),
                }
            }
            Value::Object(map) => {
                for key in ID_KEYS {
                    if let Some(inner) = map.get(key) {
                        return Self::from_value(inner);
                    }
                }
                map.get("recipe")
                    .and_then(|r| r.get("id"))
                    .and_then(Self::from_value)
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Num(n) => write!(f, "{}", n),
            RecipeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for RecipeId {
    type Err = String;

    /// Parses a user-supplied id. Empty and whitespace-only input is
    /// rejected, matching what [`RecipeId::from_value`] resolves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Recipe id cannot be empty".to_string());
        }
        match trimmed.parse::<i64>() {
            Ok(num) => Ok(RecipeId::Num(num)),
            Err(_) => Ok(RecipeId::Text(s.to_string())),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(n: i64) -> Self {
        RecipeId::Num(n)
    }
}

impl Serialize for RecipeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RecipeId::Num(n) => serializer.serialize_i64(*n),
            RecipeId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unresolvable recipe id: {}", value)))
    }
}
