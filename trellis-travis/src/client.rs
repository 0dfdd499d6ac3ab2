//! # Travis HTTP Client
//!
//! HTTP client for the Travis CI API. The endpoint (public `travis-ci.org`
//! vs. pro `travis-ci.com`) is chosen once by repository visibility, and
//! every fetch receives an explicit [`Session`] value instead of relying on a
//! process-global authenticated handle.

use reqwest::{Client, RequestBuilder};

use crate::consts::{ACCEPT, COM_API_BASE_URL, GITHUB_API_BASE_URL, ORG_API_BASE_URL, USER_AGENT};

/// Represents a Travis CI API client
pub struct TravisClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) github_base_url: String,
}

impl TravisClient {
  /// Create a client for the public (`travis-ci.org`) or pro
  /// (`travis-ci.com`) endpoint.
  pub fn new(pro: bool) -> Self {
    let base_url = if pro { COM_API_BASE_URL } else { ORG_API_BASE_URL };

    Self {
      client: Client::new(),
      base_url: base_url.to_string(),
      github_base_url: GITHUB_API_BASE_URL.to_string(),
    }
  }

  /// Attach the standard headers and the session token to a request.
  pub(crate) fn decorate(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
    let request = request.header("Accept", ACCEPT).header("User-Agent", USER_AGENT);

    match session.token() {
      Some(token) => request.header("Authorization", format!("token {token}")),
      None => request,
    }
  }
}

/// An authenticated (or anonymous) Travis API session.
///
/// Produced by [`TravisClient::authenticate`](crate::endpoints::auth) and
/// passed into subsequent calls; public repositories need no token.
#[derive(Clone, Debug)]
pub struct Session {
  access_token: Option<String>,
}

impl Session {
  /// Session without credentials, for public repositories.
  pub fn anonymous() -> Self {
    Self { access_token: None }
  }

  pub(crate) fn with_token(access_token: String) -> Self {
    Self {
      access_token: Some(access_token),
    }
  }

  /// The Travis access token, when authenticated.
  pub fn token(&self) -> Option<&str> {
    self.access_token.as_deref()
  }
}
