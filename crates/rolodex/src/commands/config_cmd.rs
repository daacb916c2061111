//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use rolodex_core::DEFAULT_API_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for a value unless it was given, `--yes` was passed, or stdin is
/// not a terminal; in those cases fall back to `default`.
fn value_or_prompt(
    given: Option<String>,
    prompt: &str,
    default: &str,
    global: &GlobalOpts,
) -> Result<String, CliError> {
    if let Some(value) = given {
        return Ok(value);
    }
    if global.yes || !std::io::stdin().is_terminal() {
        return Ok(default.to_owned());
    }
    Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_err)
}

fn format_config(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: e.to_string(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { name } => {
            let mut cfg = config::load_config()?;
            if !global.quiet {
                eprintln!("Config path: {}", config::config_path().display());
            }

            let default_name = config::active_profile_name(global, &cfg);
            let name = value_or_prompt(name, "Profile name", &default_name, global)?;
            let api_url = value_or_prompt(
                global.api_url.clone(),
                "API URL",
                DEFAULT_API_URL,
                global,
            )?;
            let profile = Profile {
                api_url,
                timeout: global.timeout,
            };

            // Reject a bad URL before it is written.
            rolodex_config::profile_to_gateway_config(&profile, &cfg.defaults)?;

            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(name.clone());
            }
            cfg.profiles.insert(name.clone(), profile);
            let path = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Profile '{name}' saved to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format_config(c).unwrap_or_default(),
                |c| config::active_profile_name(global, c),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
