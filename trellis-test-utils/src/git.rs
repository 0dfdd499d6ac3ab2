//! Git repository management for testing
//!
//! This module provides utilities for creating temporary git repositories
//! with configured remotes for testing origin resolution.

use std::path::Path;

use git2::Repository;
use tempfile::TempDir;

/// A test guard that creates a temporary git repository.
///
/// The repository lives inside a [`TempDir`] and is removed when the guard is
/// dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let repo = Repository::init(temp_path).expect("Failed to initialize git repository");

    // Set test user configuration
    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Trellis Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "trellis-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Add a remote named `origin` pointing at the given URL.
  pub fn add_origin(&self, url: &str) {
    self.repo.remote("origin", url).expect("Failed to add origin remote");
  }

  /// Add a remote with an arbitrary name pointing at the given URL.
  pub fn add_remote(&self, name: &str, url: &str) {
    self.repo.remote(name, url).expect("Failed to add remote");
  }

  /// Name of the branch HEAD points at, even when the branch is unborn.
  pub fn head_branch(&self) -> String {
    let head = self.repo.find_reference("HEAD").expect("Failed to read HEAD");
    head
      .symbolic_target()
      .expect("HEAD is not symbolic")
      .trim_start_matches("refs/heads/")
      .to_string()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}
