//! Core constants shared across trellis components.

/// Environment variable holding the GitHub access token used for the Travis
/// CI credential exchange.
pub const ENV_GITHUB_ACCESS_TOKEN: &str = "GITHUB_ACCESS_TOKEN";

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";
