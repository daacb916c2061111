//! CLI configuration: thin wrapper around `rolodex_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--profile, --api-url, --timeout).

use rolodex_config::ConfigError;
use rolodex_core::GatewayConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use rolodex_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the active profile and apply flag overrides.
///
/// CLI flags (and their `ROLODEX_*` env vars) take priority over profile
/// values. Without a config file the built-in endpoint is used.
pub fn resolve_gateway_config(global: &GlobalOpts) -> Result<GatewayConfig, CliError> {
    let cfg = load_config()?;
    let (name, mut profile) = cfg.profile(global.profile.as_deref()).map_err(|e| match e {
        ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
            name,
            available: available_profiles(&cfg),
        },
        other => other.into(),
    })?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    tracing::debug!(profile = %name, api_url = %profile.api_url, "resolved gateway config");
    Ok(rolodex_config::profile_to_gateway_config(
        &profile,
        &cfg.defaults,
    )?)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
