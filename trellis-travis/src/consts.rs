//! Constants for the trellis Travis client

/// Base URL for the public Travis CI API
pub const ORG_API_BASE_URL: &str = "https://api.travis-ci.org";

/// Base URL for the pro (private repository) Travis CI API
pub const COM_API_BASE_URL: &str = "https://api.travis-ci.com";

/// Base URL for the GitHub API, used by the visibility check and by the
/// basic-credential token minting
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for outgoing API requests
pub const USER_AGENT: &str = concat!("trellis/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the Travis CI API
pub const ACCEPT: &str = "application/vnd.travis-ci.2+json";

/// Accept header value for the GitHub API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
