//! # Origin Resolution
//!
//! Derives the `(owner, repo, branch)` identity of the working repository
//! from the textual output of the git collaborator: the first `origin` remote
//! line yields owner and repository name, the status text yields the branch.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::git::VcsReader;

/// Branch reported when the status text yields nothing usable.
pub const DEFAULT_BRANCH: &str = "master";

static BRANCH_PROSE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^#?\s*On branch\s*").expect("Failed to compile branch prose regex"));

/// Errors that can occur while resolving the origin remote.
#[derive(Debug, Error)]
pub enum OriginError {
  /// The `git` executable is not installed or not on the PATH.
  #[error("git executable not found on PATH")]
  ToolNotFound,
  /// A git invocation ran but did not succeed.
  #[error("git {command} failed: {detail}")]
  CommandFailed { command: String, detail: String },
  /// The repository has no remote named `origin`.
  #[error("no 'origin' remote configured for this repository")]
  NoOrigin,
  /// The origin URL could not be decomposed into owner and repository.
  #[error("failed to parse git remote '{0}'")]
  Parse(String),
}

/// Owner and repository name parsed from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrigin {
  pub owner: String,
  pub repo: String,
}

/// Fully resolved identity of the working repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
  pub owner: String,
  pub repo: String,
  pub branch: String,
}

/// Resolve owner, repository, and branch from the given collaborator.
pub fn resolve_origin(vcs: &impl VcsReader) -> Result<Origin, OriginError> {
  let remotes = vcs.list_remotes()?;
  let url = find_origin_url(&remotes).ok_or(OriginError::NoOrigin)?;
  let RemoteOrigin { owner, repo } = parse_remote_url(&url)?;

  let status = vcs.status_text()?;
  let branch = branch_from_status(&status);

  Ok(Origin { owner, repo, branch })
}

/// Select the URL of the first remote line whose name is `origin`.
///
/// Git prints one line per remote and direction; the first match in original
/// order wins, even when the output carries duplicates. Lines without a URL
/// field are skipped and the scan continues.
pub fn find_origin_url(lines: &[String]) -> Option<String> {
  for line in lines {
    let line = line.replace(" (fetch)", "").replace(" (push)", "");
    let mut fields = line.split_whitespace();
    if fields.next() == Some("origin")
      && let Some(url) = fields.next()
    {
      return Some(url.to_string());
    }
  }
  None
}

/// Parse a remote URL into owner and repository name.
///
/// Supports the SSH shorthand (`git@host:owner/repo.git`), git protocol
/// (`git://host/owner/repo.git`), and HTTPS (`https://host/owner/repo.git`)
/// forms. Fails when either path segment is empty.
pub fn parse_remote_url(url: &str) -> Result<RemoteOrigin, OriginError> {
  let path = if let Some(rest) = url.strip_prefix("git@") {
    rest.split_once(':').map(|(_host, path)| path)
  } else if let Some(rest) = url.strip_prefix("git://") {
    rest.split_once('/').map(|(_host, path)| path)
  } else if let Some(rest) = url.strip_prefix("https://") {
    rest.split_once('/').map(|(_host, path)| path)
  } else {
    None
  };

  let path = path.ok_or_else(|| OriginError::Parse(url.to_string()))?;
  let path = path.strip_suffix(".git").unwrap_or(path);

  let mut segments = path.split('/');
  let owner = segments.next().unwrap_or("").trim();
  let repo = segments.next().unwrap_or("").trim();

  if owner.is_empty() || repo.is_empty() {
    return Err(OriginError::Parse(url.to_string()));
  }

  Ok(RemoteOrigin {
    owner: owner.to_string(),
    repo: repo.to_string(),
  })
}

/// Extract the branch name from the first line of the status text.
///
/// The leading `# On branch ` / `On branch ` prose is stripped; an empty
/// result falls back to [`DEFAULT_BRANCH`].
pub fn branch_from_status(status: &str) -> String {
  let first_line = status.trim().lines().next().unwrap_or("");
  let branch = BRANCH_PROSE.replace(first_line, "");
  let branch = branch.trim();

  if branch.is_empty() {
    DEFAULT_BRANCH.to_string()
  } else {
    branch.to_string()
  }
}
