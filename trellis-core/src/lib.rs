//! # Trellis Core Library
//!
//! Shared building blocks for the trellis CLI: local git collaboration and
//! origin resolution, credential sources for the Travis CI API, and the
//! terminal output helpers used by the status reporter.

pub mod consts;
pub mod creds;
pub mod git;
pub mod origin;
pub mod output;
pub mod prompts;

// Re-export main types
pub use creds::{CredentialSource, Credentials, PromptSource, TokenSource, default_credential_source};
pub use git::{SystemGit, VcsReader, detect_repository, in_git_repository};
pub use origin::{Origin, OriginError, RemoteOrigin, resolve_origin};
pub use output::{ColorMode, Glyph, job_glyph, outcome_glyph, print_error, print_info, print_warning, state_glyph};
