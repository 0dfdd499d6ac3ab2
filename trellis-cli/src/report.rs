//! # Status Reporter
//!
//! Renders a resolved build into the terminal report: repository line,
//! commit summary, and one line per matrix job. All lines go through an
//! [`io::Write`](std::io::Write) sink so identical provider responses
//! produce byte-identical output.

use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;
use trellis_core::output::{Glyph, job_glyph, outcome_glyph, state_glyph};
use trellis_travis::models::BuildDetail;
use trellis_travis::resolve::ResolvedBuild;

/// Write the pipeline header for one repository.
pub fn write_header(out: &mut impl Write, owner: &str, repo: &str, branch: &str) -> Result<()> {
  writeln!(out, "Fetching build status for {owner}/{repo}:{branch}")?;
  Ok(())
}

/// Write the repository line with the resolved build's outcome glyph, after
/// the staleness advisory when the fallback build was substituted.
pub fn write_resolved(
  out: &mut impl Write,
  owner: &str,
  repo: &str,
  branch: &str,
  resolved: &ResolvedBuild,
) -> Result<()> {
  if let Some(advisory) = resolved.advisory(branch) {
    writeln!(out, "   {advisory}")?;
  }

  let glyph = outcome_glyph(resolved.build.result, resolved.build.status);
  writeln!(out, "    {glyph} {owner}/{repo}")?;

  Ok(())
}

/// Write the per-repository failure line for a detail fetch that failed.
pub fn write_detail_failure(out: &mut impl Write, owner: &str, repo: &str) -> Result<()> {
  writeln!(out, "    {} failed to fetch info for {owner}/{repo}", Glyph::Bad)?;
  Ok(())
}

/// Write the commit summary and one line per matrix job.
pub fn write_detail(out: &mut impl Write, detail: &BuildDetail) -> Result<()> {
  writeln!(out, "        Compare:  {}", detail.compare_url)?;
  writeln!(
    out,
    "        {} {} ({}) {} ({} <{}>) {}",
    state_glyph(Some(detail.state.as_str())),
    detail.sha,
    detail.branch,
    detail.message,
    detail.author_name,
    detail.author_email,
    format!("({})", detail.state).white(),
  )?;

  for job in &detail.jobs {
    writeln!(
      out,
      "            {} {} {} {} {}",
      job_glyph(&job.state, job.finished_at.is_some()),
      job.number,
      job.language,
      job.language_config_value,
      format!("({})", job.state).white(),
    )?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use trellis_travis::models::{Build, Job};
  use trellis_travis::resolve::ResolvedBuild;

  use super::*;

  fn sample_build() -> Build {
    Build {
      id: 42,
      commit_id: Some(1),
      branch: None,
      result: Some(0),
      status: Some(0),
      state: Some("passed".to_string()),
    }
  }

  fn sample_detail() -> BuildDetail {
    BuildDetail {
      message: "fix the widget".to_string(),
      sha: "abcdef1".to_string(),
      compare_url: "https://github.com/octocat/hello-world/compare/a...b".to_string(),
      branch: "main".to_string(),
      author_name: "Octo Cat".to_string(),
      author_email: "octocat@example.com".to_string(),
      state: "passed".to_string(),
      jobs: vec![
        Job {
          number: "42.1".to_string(),
          state: "passed".to_string(),
          finished_at: Some("2023-01-01T00:01:00Z".parse().unwrap()),
          language: "rust".to_string(),
          language_config_value: "1.70".to_string(),
        },
        Job {
          number: "42.2".to_string(),
          state: "started".to_string(),
          finished_at: None,
          language: "rust".to_string(),
          language_config_value: "stable".to_string(),
        },
      ],
    }
  }

  fn render(resolved: &ResolvedBuild, detail: &BuildDetail) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out, "octocat", "hello-world", "main").unwrap();
    write_resolved(&mut out, "octocat", "hello-world", "main", resolved).unwrap();
    write_detail(&mut out, detail).unwrap();
    out
  }

  #[test]
  fn report_contains_every_section() {
    let resolved = ResolvedBuild {
      build: sample_build(),
      commit: None,
      is_stale: false,
    };

    let out = render(&resolved, &sample_detail());
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Fetching build status for octocat/hello-world:main\n"));
    assert!(text.contains("octocat/hello-world"));
    assert!(text.contains("Compare:  https://github.com/octocat/hello-world/compare/a...b"));
    assert!(text.contains("abcdef1 (main) fix the widget (Octo Cat <octocat@example.com>)"));
    assert!(text.contains("42.1 rust 1.70"));
    assert!(text.contains("42.2 rust stable"));
    assert!(!text.contains("no recent builds"));
  }

  #[test]
  fn stale_report_carries_the_advisory() {
    let resolved = ResolvedBuild {
      build: sample_build(),
      commit: None,
      is_stale: true,
    };

    let mut out = Vec::new();
    write_resolved(&mut out, "octocat", "hello-world", "feature-x", &resolved).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("   no recent builds on feature-x showing latest\n"));
  }

  #[test]
  fn report_is_idempotent() {
    let resolved = ResolvedBuild {
      build: sample_build(),
      commit: None,
      is_stale: false,
    };
    let detail = sample_detail();

    let first = render(&resolved, &detail);
    let second = render(&resolved, &detail);

    assert_eq!(first, second);
  }

  #[test]
  fn detail_failure_line_names_the_repository() {
    let mut out = Vec::new();
    write_detail_failure(&mut out, "octocat", "hello-world").unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("failed to fetch info for octocat/hello-world"));
  }
}
