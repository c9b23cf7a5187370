//! HTTP client for the recipe catalog backend.
//!
//! Every endpoint answers with the envelope
//! `{ "success": bool, "data": ..., "message": ... }`. Errors are
//! split into network failures (no response at all) and HTTP failures
//! (error status, message pulled from the body when present) so callers
//! can treat the former as soft and fall back to local state.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Recipe, RecipeQuery};
use crate::recipe_id::RecipeId;

/// Default timeout for catalog and favorites requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No API URL configured. Set api_url in config or RESEP_API_URL.")]
    NotConfigured,

    /// No response at all (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Response with an error status.
    #[error("Server error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The server answered but the envelope reported failure.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Response envelope used by every backend endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

/// Result of a server-side favorite toggle.
///
/// The backend may answer with the new membership state or with the
/// full updated favorites list; both are represented explicitly rather
/// than guessed from truthiness.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Server reported the new membership state directly.
    State(bool),
    /// Server returned the updated favorites list (raw entries).
    List(Vec<Value>),
}

/// Client for the recipe catalog backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an absolute URL for an API path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetches the raw favorite entries for a user.
    ///
    /// Entries are returned un-normalized; the favorites service
    /// reduces them to canonical ids.
    pub async fn get_favorites(&self, user_identifier: &str) -> Result<Vec<Value>, ApiError> {
        let url = self.build_url("/api/v1/favorites");
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("user_identifier", user_identifier)])
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope = read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Failed to fetch favorites".to_string()),
            ));
        }

        match envelope.data {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ApiError::Decode(format!(
                "expected favorites array, got {}",
                other
            ))),
        }
    }

    /// Toggles a favorite server-side.
    pub async fn toggle_favorite(
        &self,
        recipe_id: &RecipeId,
        user_identifier: &str,
    ) -> Result<ToggleOutcome, ApiError> {
        let url = self.build_url("/api/v1/favorites/toggle");
        tracing::debug!("POST {}", url);

        let body = serde_json::json!({
            "recipe_id": recipe_id,
            "user_identifier": user_identifier,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope = read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Failed to toggle favorite".to_string()),
            ));
        }

        parse_toggle_data(envelope.data)
    }

    /// Lists recipes from the catalog endpoint.
    pub async fn list_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiError> {
        let url = self.build_url("/api/v1/recipes");
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&query.to_params())
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope = read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Failed to fetch recipes".to_string()),
            ));
        }

        serde_json::from_value(envelope.data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Maps an HTTP response to the envelope, extracting the body's
/// `message` field on error statuses when present.
async fn read_envelope(response: reqwest::Response) -> Result<Envelope, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| "An error occurred".to_string()),
            Err(_) => "An error occurred".to_string(),
        };
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<Envelope>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Interprets the `data` field of a toggle response.
fn parse_toggle_data(data: Value) -> Result<ToggleOutcome, ApiError> {
    match data {
        Value::Bool(state) => Ok(ToggleOutcome::State(state)),
        Value::Array(items) => Ok(ToggleOutcome::List(items)),
        other => Err(ApiError::Decode(format!(
            "expected boolean or favorites array, got {}",
            other
        ))),
    }
}
