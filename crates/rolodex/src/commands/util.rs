//! Shared helpers for command handlers.

use std::io::IsTerminal;

use rolodex_core::{CoreError, EntityId};

use crate::error::CliError;

/// Parse a CLI identifier. All-digit text is numeric, anything else opaque.
pub fn parse_id(raw: &str) -> Result<EntityId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: "id".into(),
            reason: "identifier cannot be empty".into(),
        });
    }
    Ok(EntityId::from(trimmed))
}

/// Attach the requested target to a 404 so the message names what was missing.
pub fn not_found_as(err: CoreError, resource_type: &str, id: &EntityId, list_command: &str) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: id.to_string(),
            list_command: list_command.into(),
        }
    } else {
        err.into()
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
