//! # Git Collaborator
//!
//! Read-only access to local git state: repository discovery via libgit2 and
//! the textual remote/status output of the `git` executable, behind a trait
//! seam so origin resolution can be tested without a git checkout.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, io};

use git2::Repository;
use tracing::debug;

use crate::consts::GIT_EXECUTABLE;
use crate::origin::OriginError;

/// Read-only view of the local version control state.
pub trait VcsReader {
  /// The configured remotes, one line per remote/direction pair, as git
  /// prints them (`<name>\t<url> (fetch|push)`).
  fn list_remotes(&self) -> Result<Vec<String>, OriginError>;

  /// The human-readable status text for the working tree.
  fn status_text(&self) -> Result<String, OriginError>;
}

/// [`VcsReader`] backed by the system `git` executable.
pub struct SystemGit {
  workdir: PathBuf,
}

impl SystemGit {
  /// Collaborator for the repository at `workdir`.
  pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
    Self {
      workdir: workdir.as_ref().to_path_buf(),
    }
  }

  /// Collaborator for the repository containing the current directory, if
  /// there is one.
  pub fn from_current_dir() -> Option<Self> {
    detect_repository().map(Self::new)
  }

  fn run(&self, args: &[&str]) -> Result<String, OriginError> {
    debug!("running {} {}", GIT_EXECUTABLE, args.join(" "));

    let output = Command::new(GIT_EXECUTABLE)
      .args(args)
      .current_dir(&self.workdir)
      .output()
      .map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => OriginError::ToolNotFound,
        _ => OriginError::CommandFailed {
          command: args.join(" "),
          detail: e.to_string(),
        },
      })?;

    if !output.status.success() {
      return Err(OriginError::CommandFailed {
        command: args.join(" "),
        detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}

impl VcsReader for SystemGit {
  fn list_remotes(&self) -> Result<Vec<String>, OriginError> {
    let stdout = self.run(&["remote", "-v"])?;
    Ok(stdout.lines().map(str::to_string).collect())
  }

  fn status_text(&self) -> Result<String, OriginError> {
    self.run(&["status"])
  }
}

/// Detect if the current directory or any parent directory is a Git
/// repository.
pub fn detect_repository() -> Option<PathBuf> {
  let current_dir = env::current_dir().ok()?;
  detect_repository_from_path(current_dir)
}

/// Detect if the given path or any parent directory is a Git repository.
pub fn detect_repository_from_path<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
  let repo = Repository::discover(path.as_ref()).ok()?;
  repo.workdir().map(Path::to_path_buf)
}

/// Check if we're currently in a git repository.
pub fn in_git_repository() -> bool {
  detect_repository().is_some()
}
