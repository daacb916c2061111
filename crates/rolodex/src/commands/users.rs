//! User command handlers.

use std::fmt::Write;
use std::sync::Arc;

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use rolodex_core::{ApiGateway, Outcome, Session, User, UserField};

use crate::cli::{GlobalOpts, UserFields, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::social::{LinkRow, LinkView};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "First name")]
    first_name: String,
    #[tabled(rename = "Last name")]
    last_name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&Arc<User>> for UserRow {
    fn from(u: &Arc<User>) -> Self {
        Self {
            id: u.id.to_string(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            phone: u.phone.clone(),
            email: u.email.clone(),
        }
    }
}

/// A user together with their links, as printed by `users show`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDetail {
    #[serde(flatten)]
    user: Arc<User>,
    social_media: Vec<LinkView>,
}

// ── Formatting ──────────────────────────────────────────────────────

fn format_user(user: &User, color: bool) -> String {
    let mut out = String::new();
    let name = user.full_name();
    if color {
        let _ = writeln!(out, "{}  #{}", name.bold(), user.id.dimmed());
    } else {
        let _ = writeln!(out, "{name}  #{}", user.id);
    }
    let _ = writeln!(out, "  Phone: {}", user.phone);
    let _ = write!(out, "  Email: {}", user.email);
    out
}

fn format_detail(detail: &UserDetail, color: bool) -> String {
    let mut out = format_user(&detail.user, color);
    out.push_str("\n\n");
    let _ = writeln!(out, "Social media:");
    if detail.social_media.is_empty() {
        let _ = write!(out, "  (none registered)");
    } else {
        let rows: Vec<LinkRow> = detail.social_media.iter().map(LinkRow::from).collect();
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

fn field_values(fields: UserFields) -> [(UserField, Option<String>); 4] {
    [
        (UserField::FirstName, fields.first_name),
        (UserField::LastName, fields.last_name),
        (UserField::Phone, fields.phone),
        (UserField::Email, fields.email),
    ]
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<ApiGateway>,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let directory = session.directory();

    match args.command {
        UsersCommand::List => {
            directory.load().await?;
            let snap = directory.users();
            let out = output::render_list(
                &global.output,
                &snap,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Show { id } => {
            let id = util::parse_id(&id)?;
            let outcome = session
                .open_detail(id.clone())
                .await
                .map_err(|e| util::not_found_as(e, "User", &id, "users list"))?;
            let Outcome::Applied(user) = outcome else {
                return Ok(());
            };
            let links = session
                .detail()
                .map(|d| {
                    for warning in d.warnings() {
                        eprintln!("warning: {warning}");
                    }
                    d.links()
                })
                .unwrap_or_default();

            let detail = UserDetail {
                user,
                social_media: links.iter().map(LinkView::from).collect(),
            };
            let out = output::render_single(
                &global.output,
                &detail,
                |d| format_detail(d, color),
                |d| d.user.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create(fields) => {
            for (field, value) in field_values(fields) {
                if let Some(value) = value {
                    directory.set_field(field, value);
                }
            }
            let user = directory.create().await?;
            let out = output::render_single(
                &global.output,
                &user,
                |u| format_user(u, color),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Update { id, fields } => {
            let id = util::parse_id(&id)?;
            let changes: Vec<_> = field_values(fields)
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v)))
                .collect();
            if changes.is_empty() {
                return Err(CliError::Validation {
                    field: "fields".into(),
                    reason: "pass at least one of --first-name, --last-name, --phone, --email"
                        .into(),
                });
            }

            directory.load().await?;
            directory.begin_edit(&id)?;
            for (field, value) in changes {
                directory.set_field(field, value);
            }
            let user = directory
                .submit()
                .await
                .map_err(|e| util::not_found_as(e, "User", &id, "users list"))?;
            let out = output::render_single(
                &global.output,
                &user,
                |u| format_user(u, color),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Delete { id } => {
            let id = util::parse_id(&id)?;
            if !util::confirm(&format!("Delete user {id}?"), "users delete", global.yes)? {
                return Ok(());
            }
            directory
                .remove(&id)
                .await
                .map_err(|e| util::not_found_as(e, "User", &id, "users list"))?;
            if !global.quiet {
                eprintln!("User {id} deleted");
            }
            Ok(())
        }
    }
}
