//! # Build Resolution
//!
//! Selects the build/commit pair to report for a requested branch out of the
//! provider's build history, substituting the most recent build overall when
//! the branch has none. A freshly pushed branch legitimately has no build
//! yet, so that substitution is a reported condition, not a failure.

use thiserror::Error;

use crate::models::{Build, Commit, HistoryResponse};

/// Error cases for build resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  /// The provider returned no builds at all for the repository.
  #[error("no builds found for this repository")]
  NoBuilds,
}

/// The build selected for reporting.
#[derive(Debug, Clone)]
pub struct ResolvedBuild {
  pub build: Build,
  /// The matched commit in the joined shape; flat-shape builds embed their
  /// commit metadata instead.
  pub commit: Option<Commit>,
  /// True when no build matched the requested branch and the most recent
  /// build overall was substituted.
  pub is_stale: bool,
}

impl ResolvedBuild {
  /// Advisory message shown when the fallback build was substituted.
  pub fn advisory(&self, branch: &str) -> Option<String> {
    self
      .is_stale
      .then(|| format!("no recent builds on {branch} showing latest"))
  }
}

/// Select the most relevant build for `branch` from the given history.
///
/// Ties resolve to the first match in original response order; the provider
/// lists builds newest first and the history is never re-sorted.
pub fn resolve_build(branch: &str, history: HistoryResponse) -> Result<ResolvedBuild, ResolveError> {
  match history {
    HistoryResponse::Flat(builds) => resolve_flat(branch, builds),
    HistoryResponse::Joined { builds, commits } => resolve_joined(branch, builds, commits),
  }
}

fn resolve_flat(branch: &str, builds: Vec<Build>) -> Result<ResolvedBuild, ResolveError> {
  let matched = builds.iter().find(|build| build.branch.as_deref() == Some(branch));

  match matched {
    Some(build) => Ok(ResolvedBuild {
      build: build.clone(),
      commit: None,
      is_stale: false,
    }),
    None => fall_back(builds, None),
  }
}

fn resolve_joined(branch: &str, builds: Vec<Build>, commits: Vec<Commit>) -> Result<ResolvedBuild, ResolveError> {
  let commit = commits.iter().find(|commit| commit.branch == branch);
  // The join is skipped entirely when no commit matched the branch.
  let matched = commit.and_then(|commit| builds.iter().find(|build| build.commit_id == Some(commit.id)));

  match matched {
    Some(build) => Ok(ResolvedBuild {
      build: build.clone(),
      commit: commit.cloned(),
      is_stale: false,
    }),
    None => {
      let latest_commit = commits.into_iter().next();
      fall_back(builds, latest_commit)
    }
  }
}

/// Substitute the most recent build overall and mark the result stale.
fn fall_back(builds: Vec<Build>, commit: Option<Commit>) -> Result<ResolvedBuild, ResolveError> {
  let build = builds.into_iter().next().ok_or(ResolveError::NoBuilds)?;

  Ok(ResolvedBuild {
    build,
    commit,
    is_stale: true,
  })
}
