//! # Travis API Endpoints
//!
//! Endpoint implementations for the Travis CI API: build history, build
//! detail, and the credential exchange.

pub mod auth;
pub mod builds;

use anyhow::Result;

/// Parse a JSON body, surfacing the provider's own error message when the
/// payload turns out to be an error envelope instead of the expected shape.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T> {
  match serde_json::from_str::<T>(body) {
    Ok(value) => Ok(value),
    Err(e) => {
      if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
          if let Some(message) = error_json.get(key).and_then(|m| m.as_str()) {
            return Err(anyhow::anyhow!("Failed to parse {}: API error: {}", what, message));
          }
        }
      }
      Err(anyhow::anyhow!("Failed to parse {}: {}", what, e))
    }
  }
}
