// ── Runtime gateway configuration ──
//
// Describes *where* the remote API lives and how long to wait for it.
// The CLI builds a `GatewayConfig` from profiles and flags; core never
// reads config files.

use std::time::Duration;

use url::Url;

/// Default API root of a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Configuration for reaching the remote users API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API root, e.g. `http://localhost:3000/api`. Resource paths are
    /// appended (`{api_url}/users/...`).
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
