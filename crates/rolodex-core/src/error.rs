// ── Core error types ──
//
// Errors surfaced by the controllers. Consumers never see reqwest errors
// or JSON parse failures directly: the `From<rolodex_api::Error>` impl
// folds them into the gateway taxonomy (unavailable / rejected), and the
// detail controller adds `StaleSelection` for targets deleted remotely.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Gateway errors ───────────────────────────────────────────────
    /// Network-level failure: the request never produced a response.
    #[error("Gateway unavailable: {reason}")]
    GatewayUnavailable { reason: String },

    /// Non-2xx response, or a 2xx body that could not be decoded.
    #[error("Gateway rejected the request: {message}")]
    GatewayRejected {
        status: Option<u16>,
        message: String,
    },

    /// The selected user no longer exists remotely.
    #[error("Selected user {id} no longer exists")]
    StaleSelection { id: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for the three gateway failure kinds.
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            Self::GatewayUnavailable { .. }
                | Self::GatewayRejected { .. }
                | Self::StaleSelection { .. }
        )
    }

    /// `true` when the remote side answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GatewayRejected {
                status: Some(404),
                ..
            } | Self::StaleSelection { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rolodex_api::Error> for CoreError {
    fn from(err: rolodex_api::Error) -> Self {
        match err {
            rolodex_api::Error::Transport(e) => CoreError::GatewayUnavailable {
                reason: e.to_string(),
            },
            rolodex_api::Error::Timeout { timeout_secs } => CoreError::GatewayUnavailable {
                reason: format!("request timed out after {timeout_secs}s"),
            },
            rolodex_api::Error::ClientBuild(reason) => CoreError::GatewayUnavailable { reason },
            rolodex_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rolodex_api::Error::Http { status, message } => CoreError::GatewayRejected {
                status: Some(status),
                message: format!("HTTP {status}: {message}"),
            },
            rolodex_api::Error::Deserialization { message, body: _ } => {
                CoreError::GatewayRejected {
                    status: None,
                    message: format!("unreadable response: {message}"),
                }
            }
        }
    }
}
