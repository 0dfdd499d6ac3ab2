//! # Repository Visibility
//!
//! Decides whether a repository is publicly visible via a GitHub `HEAD`
//! request. Visibility selects the Travis endpoint and whether the pipeline
//! authenticates before fetching builds.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::instrument;

use crate::consts::{GITHUB_API_BASE_URL, USER_AGENT};

/// Error cases for the visibility check.
#[derive(Debug, Error)]
pub enum VisibilityError {
  /// The GitHub API could not be reached.
  #[error("failed to reach the GitHub API: {0}")]
  Request(#[from] reqwest::Error),
  /// The API answered with a status that maps to neither public nor private.
  #[error("unknown repository visibility (HTTP {0})")]
  Unknown(StatusCode),
}

/// Check whether `owner/repo` is publicly visible on GitHub.
///
/// 200 means public, 404 means private (or nonexistent, which Travis treats
/// the same way); anything else is an unknown visibility.
#[instrument(level = "debug")]
pub async fn is_public(owner: &str, repo: &str) -> Result<bool, VisibilityError> {
  is_public_at(GITHUB_API_BASE_URL, owner, repo).await
}

async fn is_public_at(base_url: &str, owner: &str, repo: &str) -> Result<bool, VisibilityError> {
  let url = format!("{base_url}/repos/{owner}/{repo}");

  let response = Client::new().head(&url).header("User-Agent", USER_AGENT).send().await?;

  match response.status() {
    StatusCode::OK => Ok(true),
    StatusCode::NOT_FOUND => Ok(false),
    other => Err(VisibilityError::Unknown(other)),
  }
}
