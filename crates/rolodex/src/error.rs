//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rolodex_config::ConfigError;
use rolodex_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API: {reason}")]
    #[diagnostic(
        code(rolodex::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Override it with --api-url or set api_url in your profile."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out: {reason}")]
    #[diagnostic(
        code(rolodex::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API rejected the request: {message}")]
    #[diagnostic(code(rolodex::rejected))]
    Rejected { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(rolodex::not_found),
        help("Run: rolodex {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Missing required fields: {fields}")]
    #[diagnostic(
        code(rolodex::missing_fields),
        help("Every field must be non-empty, e.g. --first-name Ana --last-name Diaz --phone 555 --email a@x.com")
    )]
    MissingFields { fields: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rolodex::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(rolodex::invalid_state))]
    InvalidState { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(rolodex::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: rolodex config init --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(rolodex::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(rolodex::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(rolodex::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(rolodex::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::MissingFields { .. }
            | Self::Validation { .. }
            | Self::InvalidState { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::GatewayUnavailable { reason } => {
                if reason.contains("timed out") {
                    CliError::Timeout { reason }
                } else {
                    CliError::ConnectionFailed { reason }
                }
            }

            CoreError::GatewayRejected {
                status: Some(404),
                message,
            } => CliError::NotFound {
                resource_type: "Resource".into(),
                identifier: message,
                list_command: "users list".into(),
            },

            CoreError::GatewayRejected { message, .. } => CliError::Rejected { message },

            CoreError::StaleSelection { id } => CliError::NotFound {
                resource_type: "User".into(),
                identifier: id,
                list_command: "users list".into(),
            },

            CoreError::NotFound { entity, id } => CliError::NotFound {
                resource_type: entity,
                identifier: id,
                list_command: "users list".into(),
            },

            CoreError::Validation { missing } => CliError::MissingFields {
                fields: missing.join(", "),
            },

            CoreError::InvalidState { message } => CliError::InvalidState { message },

            CoreError::Config { message } => CliError::Validation {
                field: "api_url".into(),
                reason: message,
            },
        }
    }
}
