//! # Travis API Models
//!
//! Data structures for the two response shapes the Travis CI API returns for
//! build history and build detail, plus the normalized detail consumed by the
//! status reporter.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Represents one CI execution record.
///
/// Legacy (flat) responses embed the branch and commit metadata directly in
/// the build; current (joined) responses carry a `commit_id` into a separate
/// commit table instead. `result` and `status` are absent while the build is
/// still running.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
  pub id: u64,
  #[serde(default)]
  pub commit_id: Option<u64>,
  #[serde(default)]
  pub branch: Option<String>,
  #[serde(default)]
  pub result: Option<i64>,
  #[serde(default)]
  pub status: Option<i64>,
  #[serde(default)]
  pub state: Option<String>,
}

/// Represents an immutable commit snapshot from the joined response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
  pub id: u64,
  pub branch: String,
  pub sha: String,
  pub message: String,
  pub author_name: String,
  pub author_email: String,
  pub compare_url: String,
}

/// Build history as returned by the provider, in either of its two shapes.
///
/// The provider does not document which shape a given endpoint returns for a
/// given account, so deserialization is shape-agnostic: a bare array is the
/// legacy flat shape, an object with `builds` and `commits` is the current
/// joined shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
  Flat(Vec<Build>),
  Joined { builds: Vec<Build>, commits: Vec<Commit> },
}

/// Commit information in a detail response: the joined shape embeds a full
/// commit object, the flat shape carries a bare sha string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CommitField {
  Embedded(CommitSnapshot),
  Sha(String),
}

/// Commit fields of the joined detail shape; every field is optional so a
/// partial payload degrades instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct CommitSnapshot {
  #[serde(default)]
  pub sha: Option<String>,
  #[serde(default)]
  pub branch: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub compare_url: Option<String>,
  #[serde(default)]
  pub author_name: Option<String>,
  #[serde(default)]
  pub author_email: Option<String>,
}

/// Build state wrapper of the joined detail shape (`{"build": {"state": …}}`).
#[derive(Debug, Deserialize)]
pub struct BuildStateField {
  #[serde(default)]
  pub state: Option<String>,
}

/// One matrix entry of a build detail, as the provider sends it.
#[derive(Debug, Deserialize)]
pub struct RawJob {
  pub number: String,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub finished_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub config: serde_json::Map<String, Value>,
}

/// Raw detail for exactly one build, carrying both shapes' field names.
///
/// Exactly one of each alias pair is populated per shape; [`normalize`]
/// resolves them into a [`BuildDetail`].
///
/// [`normalize`]: RawBuildDetail::normalize
#[derive(Debug, Deserialize)]
pub struct RawBuildDetail {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub compare_url: Option<String>,
  #[serde(default)]
  pub branch: Option<String>,
  #[serde(default)]
  pub author_name: Option<String>,
  #[serde(default)]
  pub author_email: Option<String>,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub commit: Option<CommitField>,
  #[serde(default)]
  pub build: Option<BuildStateField>,
  #[serde(default)]
  pub matrix: Option<Vec<RawJob>>,
  #[serde(default)]
  pub jobs: Option<Vec<RawJob>>,
}

/// One matrix entry of a build's detail, normalized for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
  pub number: String,
  pub state: String,
  pub finished_at: Option<DateTime<Utc>>,
  /// The language this matrix entry was declared with.
  pub language: String,
  /// The job config value keyed by the language name, e.g. a version string.
  pub language_config_value: String,
}

/// Normalized detail for exactly one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDetail {
  pub message: String,
  pub sha: String,
  pub compare_url: String,
  pub branch: String,
  pub author_name: String,
  pub author_email: String,
  pub state: String,
  pub jobs: Vec<Job>,
}

impl RawBuildDetail {
  /// Resolve the flat/joined field aliases into a canonical detail.
  ///
  /// The alias table, applied once per fetch (preferred, then fallback):
  ///
  /// | canonical      | preferred      | fallback              |
  /// |----------------|----------------|-----------------------|
  /// | `message`      | `message`      | `commit.message`      |
  /// | `sha`          | `commit.sha`   | `commit` (bare sha)   |
  /// | `compare_url`  | `commit.compare_url` | `compare_url`   |
  /// | `branch`       | `branch`       | `commit.branch`       |
  /// | `author_name`  | `author_name`  | `commit.author_name`  |
  /// | `author_email` | `author_email` | `commit.author_email` |
  /// | `state`        | `state`        | `build.state`         |
  /// | `jobs`         | `matrix`       | `jobs`                |
  ///
  /// `message` keeps only its first line and `sha` its 7-character short
  /// form.
  pub fn normalize(self) -> BuildDetail {
    let RawBuildDetail {
      message,
      compare_url,
      branch,
      author_name,
      author_email,
      state,
      commit,
      build,
      matrix,
      jobs,
    } = self;

    let (snapshot, bare_sha) = match commit {
      Some(CommitField::Embedded(snapshot)) => (snapshot, None),
      Some(CommitField::Sha(sha)) => (CommitSnapshot::default(), Some(sha)),
      None => (CommitSnapshot::default(), None),
    };

    let message = message.or(snapshot.message).unwrap_or_default();
    let sha = snapshot.sha.or(bare_sha).unwrap_or_default();
    let jobs = matrix.or(jobs).unwrap_or_default();

    BuildDetail {
      message: first_line(&message).to_string(),
      sha: short_sha(&sha),
      compare_url: snapshot.compare_url.or(compare_url).unwrap_or_default(),
      branch: branch.or(snapshot.branch).unwrap_or_default(),
      author_name: author_name.or(snapshot.author_name).unwrap_or_default(),
      author_email: author_email.or(snapshot.author_email).unwrap_or_default(),
      state: state.or(build.and_then(|b| b.state)).unwrap_or_default(),
      jobs: jobs.into_iter().map(RawJob::normalize).collect(),
    }
  }
}

impl RawJob {
  /// Flatten the open-ended job config into the language and its configured
  /// value.
  fn normalize(self) -> Job {
    let language = self
      .config
      .get("language")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string();

    let language_config_value = self
      .config
      .get(language.as_str())
      .map(render_config_value)
      .unwrap_or_default();

    Job {
      number: self.number,
      state: self.state.unwrap_or_default(),
      finished_at: self.finished_at,
      language,
      language_config_value,
    }
  }
}

/// Render a job config value the way the report prints it: strings as-is,
/// version lists comma-joined.
fn render_config_value(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    Value::Array(items) => items
      .iter()
      .map(|item| match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
      })
      .collect::<Vec<_>>()
      .join(","),
    other => other.to_string(),
  }
}

fn first_line(text: &str) -> &str {
  text.lines().next().unwrap_or("")
}

fn short_sha(sha: &str) -> String {
  sha.chars().take(7).collect()
}
