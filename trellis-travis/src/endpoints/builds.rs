use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::instrument;

use crate::client::{Session, TravisClient};
use crate::endpoints::parse_json;
use crate::models::{HistoryResponse, RawBuildDetail};

impl TravisClient {
  /// Fetch the build history for a repository, in whichever shape the
  /// provider returns it.
  #[instrument(skip(self, session), level = "debug")]
  pub async fn builds(&self, session: &Session, owner: &str, repo: &str) -> Result<HistoryResponse> {
    let url = format!("{}/repos/{}/{}/builds", self.base_url, owner, repo);

    let response = self
      .decorate(self.client.get(&url), session)
      .send()
      .await
      .context("Failed to fetch builds")?;

    match response.status() {
      StatusCode::OK => {
        let body = response.text().await.context("Failed to read response body")?;
        parse_json(&body, "build history")
      }
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Repository {}/{} not found", owner, repo)),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Travis CI credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Fetch the raw detail for exactly one build.
  #[instrument(skip(self, session), level = "debug")]
  pub async fn build_detail(&self, session: &Session, owner: &str, repo: &str, build_id: u64) -> Result<RawBuildDetail> {
    let url = format!("{}/repos/{}/{}/builds/{}", self.base_url, owner, repo, build_id);

    let response = self
      .decorate(self.client.get(&url), session)
      .send()
      .await
      .context("Failed to fetch build detail")?;

    match response.status() {
      StatusCode::OK => {
        let body = response.text().await.context("Failed to read response body")?;
        parse_json(&body, "build detail")
      }
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Build {} not found for {}/{}", build_id, owner, repo)),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Travis CI credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::{Session, TravisClient};
  use crate::models::HistoryResponse;

  fn client_for(mock_server: &MockServer) -> TravisClient {
    let mut client = TravisClient::new(false);
    client.base_url = mock_server.uri();
    client
  }

  #[tokio::test]
  async fn test_builds_joined_shape() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/hello-world/builds"))
      .and(header("Accept", "application/vnd.travis-ci.2+json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "builds": [
              {"id": 10, "commit_id": 1, "state": "passed"},
              {"id": 9, "commit_id": 2, "state": "failed"}
          ],
          "commits": [
              {
                  "id": 1,
                  "branch": "main",
                  "sha": "abcdef1234567",
                  "message": "fix the widget",
                  "author_name": "Octo Cat",
                  "author_email": "octocat@example.com",
                  "compare_url": "https://github.com/octocat/hello-world/compare/a...b"
              }
          ]
      })))
      .mount(&mock_server)
      .await;

    let history = client.builds(&Session::anonymous(), "octocat", "hello-world").await?;

    match history {
      HistoryResponse::Joined { builds, commits } => {
        assert_eq!(builds.len(), 2);
        assert_eq!(commits.len(), 1);
        assert_eq!(builds[0].id, 10);
      }
      HistoryResponse::Flat(_) => panic!("expected the joined shape"),
    }

    Ok(())
  }

  #[tokio::test]
  async fn test_builds_flat_shape() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/hello-world/builds"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          {"id": 10, "branch": "main", "result": 0, "status": 0},
          {"id": 9, "branch": "dev", "result": 1, "status": 1}
      ])))
      .mount(&mock_server)
      .await;

    let history = client.builds(&Session::anonymous(), "octocat", "hello-world").await?;

    match history {
      HistoryResponse::Flat(builds) => {
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[1].branch.as_deref(), Some("dev"));
      }
      HistoryResponse::Joined { .. } => panic!("expected the flat shape"),
    }

    Ok(())
  }

  #[tokio::test]
  async fn test_builds_sends_session_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/private/builds"))
      .and(header("Authorization", "token travis-token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
      .mount(&mock_server)
      .await;

    let session = Session::with_token("travis-token".to_string());
    let history = client.builds(&session, "octocat", "private").await?;

    assert!(matches!(history, HistoryResponse::Flat(builds) if builds.is_empty()));

    Ok(())
  }

  #[tokio::test]
  async fn test_builds_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/missing/builds"))
      .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
          "file": "not found"
      })))
      .mount(&mock_server)
      .await;

    let result = client.builds(&Session::anonymous(), "octocat", "missing").await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_build_detail_flat_shape() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/hello-world/builds/42"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": 42,
          "state": "failed",
          "message": "break everything",
          "commit": "abcdef1234567",
          "compare_url": "https://github.com/octocat/hello-world/compare/a...b",
          "branch": "main",
          "author_name": "Octo Cat",
          "author_email": "octocat@example.com",
          "matrix": [{
              "number": "42.1",
              "state": "failed",
              "finished_at": "2023-01-01T00:01:00Z",
              "config": {"language": "node_js", "node_js": "0.10"}
          }]
      })))
      .mount(&mock_server)
      .await;

    let detail = client
      .build_detail(&Session::anonymous(), "octocat", "hello-world", 42)
      .await?
      .normalize();

    assert_eq!(detail.sha, "abcdef1");
    assert_eq!(detail.jobs.len(), 1);
    assert_eq!(detail.jobs[0].number, "42.1");

    Ok(())
  }

  #[tokio::test]
  async fn test_build_detail_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/repos/octocat/private/builds/42"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let result = client.build_detail(&Session::anonymous(), "octocat", "private", 42).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Authentication failed"));

    Ok(())
  }
}
