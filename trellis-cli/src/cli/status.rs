//! # Status Pipeline
//!
//! Wires the pipeline for each requested repository: visibility check,
//! endpoint and session selection, build history fetch, resolution, and the
//! printed report. Each stage is a single blocking request; nothing retries.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::warn;
use trellis_core::creds::CredentialSource;
use trellis_core::git::SystemGit;
use trellis_core::origin::{DEFAULT_BRANCH, Origin, resolve_origin};
use trellis_core::output::print_error;
use trellis_travis::client::{Session, TravisClient};
use trellis_travis::resolve::resolve_build;
use trellis_travis::visibility;

use crate::report;

/// One repository to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub owner: String,
  pub repo: String,
  pub branch: String,
}

/// Parse an `owner/repo` slug into a reporting target.
pub fn parse_slug(slug: &str, branch: Option<&str>) -> Result<Target> {
  let (owner, repo) = slug
    .split_once('/')
    .with_context(|| format!("Invalid repository slug '{slug}', expected owner/repo"))?;

  let owner = owner.trim();
  let repo = repo.trim();

  if owner.is_empty() || repo.is_empty() || repo.contains('/') {
    anyhow::bail!("Invalid repository slug '{slug}', expected owner/repo");
  }

  Ok(Target {
    owner: owner.to_string(),
    repo: repo.to_string(),
    branch: branch.unwrap_or(DEFAULT_BRANCH).to_string(),
  })
}

/// Resolve the targets for this invocation: explicit slugs, or the current
/// repository's origin when none were given.
pub fn resolve_targets(repos: &[String], branch: Option<&str>) -> Result<Vec<Target>> {
  if repos.is_empty() {
    let git = SystemGit::from_current_dir()
      .ok_or_else(|| anyhow::anyhow!("Not in a git repository and no owner/repo argument given"))?;

    let Origin {
      owner,
      repo,
      branch: detected,
    } = resolve_origin(&git)?;

    return Ok(vec![Target {
      owner,
      repo,
      branch: branch.map(str::to_string).unwrap_or(detected),
    }]);
  }

  repos.iter().map(|slug| parse_slug(slug, branch)).collect()
}

/// Report build status for every target, continuing past per-repository
/// failures. Errors only when every target failed.
pub fn run(targets: &[Target], source: &dyn CredentialSource) -> Result<()> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let stdout = std::io::stdout();

  let mut failures = 0usize;
  for target in targets {
    if let Err(e) = report_target(&rt, &mut stdout.lock(), target, source) {
      print_error(&format!("{}/{}: {e:#}", target.owner, target.repo));
      failures += 1;
    }
  }

  if !targets.is_empty() && failures == targets.len() {
    anyhow::bail!("no repository could be reported");
  }

  Ok(())
}

fn report_target(rt: &Runtime, out: &mut impl Write, target: &Target, source: &dyn CredentialSource) -> Result<()> {
  let Target { owner, repo, branch } = target;

  report::write_header(out, owner, repo, branch)?;

  let public = rt.block_on(visibility::is_public(owner, repo))?;
  let client = TravisClient::new(!public);

  let session = if public {
    Session::anonymous()
  } else {
    let credentials = source.credentials()?;
    rt.block_on(client.authenticate(&credentials))?
  };

  let history = rt.block_on(client.builds(&session, owner, repo))?;
  let resolved = resolve_build(branch, history)?;

  report::write_resolved(out, owner, repo, branch, &resolved)?;

  // A failed detail fetch is reported for this repository only; remaining
  // targets still run.
  match rt.block_on(client.build_detail(&session, owner, repo, resolved.build.id)) {
    Ok(raw) => report::write_detail(out, &raw.normalize())?,
    Err(e) => {
      warn!("detail fetch failed for {owner}/{repo}: {e:#}");
      report::write_detail_failure(out, owner, repo)?;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_slug_splits_owner_and_repo() {
    let target = parse_slug("octocat/hello-world", None).unwrap();

    assert_eq!(target.owner, "octocat");
    assert_eq!(target.repo, "hello-world");
    assert_eq!(target.branch, "master");
  }

  #[test]
  fn parse_slug_takes_the_branch_override() {
    let target = parse_slug("octocat/hello-world", Some("dev")).unwrap();
    assert_eq!(target.branch, "dev");
  }

  #[test]
  fn parse_slug_rejects_malformed_input() {
    assert!(parse_slug("octocat", None).is_err());
    assert!(parse_slug("octocat/", None).is_err());
    assert!(parse_slug("/hello-world", None).is_err());
    assert!(parse_slug("octocat/hello/world", None).is_err());
  }

  #[test]
  fn resolve_targets_maps_slugs() {
    let repos = vec!["octocat/hello-world".to_string(), "octocat/other".to_string()];

    let targets = resolve_targets(&repos, Some("dev")).unwrap();

    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].repo, "hello-world");
    assert_eq!(targets[1].repo, "other");
    assert!(targets.iter().all(|t| t.branch == "dev"));
  }
}
