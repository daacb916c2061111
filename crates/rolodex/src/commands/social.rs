//! Social media command handlers.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use rolodex_core::{
    ApiGateway, Outcome, Session, SocialIcon, SocialMediaField, SocialMediaLink,
};

use crate::cli::{GlobalOpts, SocialArgs, SocialCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct LinkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&LinkView> for LinkRow {
    fn from(v: &LinkView) -> Self {
        Self {
            id: v.link.id.to_string(),
            icon: format!("{} {}", v.icon.glyph(), v.icon),
            name: v.link.name.clone(),
            url: v.link.url.clone(),
        }
    }
}

/// A link with its resolved icon, as printed by the CLI.
#[derive(Serialize)]
pub(super) struct LinkView {
    #[serde(flatten)]
    link: Arc<SocialMediaLink>,
    icon: SocialIcon,
}

impl From<&Arc<SocialMediaLink>> for LinkView {
    fn from(link: &Arc<SocialMediaLink>) -> Self {
        Self {
            icon: link.icon(),
            link: Arc::clone(link),
        }
    }
}

#[derive(Serialize)]
struct IconView {
    name: String,
    icon: SocialIcon,
}

fn format_link(view: &LinkView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}  #{}", view.icon.glyph(), view.link.name, view.link.id);
    let _ = write!(out, "  {}", view.link.url);
    out
}

// ── Handlers ────────────────────────────────────────────────────────

/// `social icon` needs no API access.
pub fn icon(name: String, global: &GlobalOpts) -> Result<(), CliError> {
    let view = IconView {
        icon: SocialIcon::for_name(&name),
        name,
    };
    let out = output::render_single(
        &global.output,
        &view,
        |v| format!("{} -> {} ({})", v.name, v.icon, v.icon.glyph()),
        |v| v.icon.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    session: &Session<ApiGateway>,
    args: SocialArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SocialCommand::List { user_id } => {
            let user_id = util::parse_id(&user_id)?;
            let outcome = session
                .open_detail(user_id.clone())
                .await
                .map_err(|e| util::not_found_as(e, "User", &user_id, "users list"))?;
            if outcome.is_discarded() {
                return Ok(());
            }
            let Some(detail) = session.detail() else {
                return Ok(());
            };
            for warning in detail.warnings() {
                eprintln!("warning: {warning}");
            }

            let views: Vec<LinkView> = detail.links().iter().map(LinkView::from).collect();
            let out = output::render_list(
                &global.output,
                &views,
                |v| LinkRow::from(v),
                |v| v.link.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SocialCommand::Add { user_id, name, url } => {
            let user_id = util::parse_id(&user_id)?;
            let detail = session.select_for_detail(user_id.clone());
            detail.set_field(SocialMediaField::Name, name);
            detail.set_field(SocialMediaField::Url, url);

            let outcome = detail
                .add_social_media()
                .await
                .map_err(|e| util::not_found_as(e, "User", &user_id, "users list"))?;
            let Outcome::Applied(link) = outcome else {
                return Ok(());
            };
            let view = LinkView::from(&Arc::new(link));
            let out = output::render_single(
                &global.output,
                &view,
                format_link,
                |v| v.link.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SocialCommand::Remove { user_id, link_id } => {
            let user_id = util::parse_id(&user_id)?;
            let link_id = util::parse_id(&link_id)?;
            if !util::confirm(
                &format!("Remove social media link {link_id} from user {user_id}?"),
                "social remove",
                global.yes,
            )? {
                return Ok(());
            }

            let detail = session.select_for_detail(user_id.clone());
            let list_command = format!("social list {user_id}");
            let outcome = detail
                .remove_social_media(&link_id)
                .await
                .map_err(|e| util::not_found_as(e, "Social media link", &link_id, &list_command))?;
            if outcome.is_applied() && !global.quiet {
                eprintln!("Social media link {link_id} removed");
            }
            Ok(())
        }

        SocialCommand::Icon { name } => icon(name, global),
    }
}
