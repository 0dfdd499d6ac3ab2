//! # Credential Sources
//!
//! Credentials for the Travis CI credential exchange and the capability that
//! produces them. The source is selected once at startup: the environment
//! token when present, the interactive prompt otherwise.

use std::env;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};

use crate::consts::ENV_GITHUB_ACCESS_TOKEN;
use crate::prompts::trellis_theme;

/// Credentials accepted by the Travis CI credential exchange.
#[derive(Clone)]
pub enum Credentials {
  /// A GitHub personal access token.
  GitHubToken(String),
  /// A GitHub username and password pair.
  Basic { username: String, password: String },
}

/// Capability that produces credentials on demand.
pub trait CredentialSource {
  fn credentials(&self) -> Result<Credentials>;
}

/// Credential source backed by the `GITHUB_ACCESS_TOKEN` environment
/// variable.
pub struct TokenSource {
  token: String,
}

impl TokenSource {
  /// Build from the environment; `None` when the variable is unset or empty.
  pub fn from_env() -> Option<Self> {
    env::var(ENV_GITHUB_ACCESS_TOKEN)
      .ok()
      .filter(|token| !token.is_empty())
      .map(|token| Self { token })
  }
}

impl CredentialSource for TokenSource {
  fn credentials(&self) -> Result<Credentials> {
    Ok(Credentials::GitHubToken(self.token.clone()))
  }
}

/// Credential source that prompts interactively for a username and a hidden
/// password.
pub struct PromptSource;

impl CredentialSource for PromptSource {
  fn credentials(&self) -> Result<Credentials> {
    let theme = trellis_theme();

    let username: String = Input::with_theme(&theme)
      .with_prompt("username")
      .interact_text()
      .context("Failed to read username")?;

    let password = Password::with_theme(&theme)
      .with_prompt("password")
      .interact()
      .context("Failed to read password")?;

    Ok(Credentials::Basic { username, password })
  }
}

/// Select the credential source for this invocation.
pub fn default_credential_source() -> Box<dyn CredentialSource> {
  match TokenSource::from_env() {
    Some(source) => Box::new(source),
    None => Box::new(PromptSource),
  }
}

#[cfg(test)]
mod tests {
  use trellis_test_utils::EnvVarGuard;

  use super::*;

  // One test touches the variable so parallel test threads don't race on it.
  #[test]
  fn token_source_reads_environment() {
    {
      let _guard = EnvVarGuard::set(ENV_GITHUB_ACCESS_TOKEN, "gh-token");

      let source = TokenSource::from_env().unwrap();
      match source.credentials().unwrap() {
        Credentials::GitHubToken(token) => assert_eq!(token, "gh-token"),
        Credentials::Basic { .. } => panic!("expected a token credential"),
      }
    }

    {
      let _guard = EnvVarGuard::set(ENV_GITHUB_ACCESS_TOKEN, "");
      assert!(TokenSource::from_env().is_none());
    }

    {
      let _guard = EnvVarGuard::unset(ENV_GITHUB_ACCESS_TOKEN);
      assert!(TokenSource::from_env().is_none());
    }
  }
}
