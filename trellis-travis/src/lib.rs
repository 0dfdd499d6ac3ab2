//! # Travis CI API Client
//!
//! Provides Travis CI REST API integration for build history, build detail,
//! and authentication, plus the resolver that selects the build to report for
//! a branch and the GitHub-backed repository visibility check.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;
pub mod resolve;
pub mod visibility;

// Re-export the client and session
pub use client::{Session, TravisClient};
// Re-export models
pub use models::{Build, BuildDetail, Commit, HistoryResponse, Job, RawBuildDetail};
// Re-export the resolver
pub use resolve::{ResolveError, ResolvedBuild, resolve_build};
// Re-export the visibility check
pub use visibility::{VisibilityError, is_public};
