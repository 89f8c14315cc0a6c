//! Configuration types for the school API client.

use std::time::Duration;
use url::Url;

/// Default upstream origin.
pub const DEFAULT_BASE_URL: &str = "https://school-api-1i8w.onrender.com";

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the school API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream API. Always ends with `/`.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("school-api-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Endpoint paths are joined relative to the base, so a base with a path
/// prefix must end in `/` or `Url::join` drops its last segment.
pub(crate) fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
