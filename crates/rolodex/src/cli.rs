//! Clap derive structures for the `rolodex` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rolodex -- manage a user directory and each user's social media links
#[derive(Debug, Parser)]
#[command(
    name = "rolodex",
    version,
    about = "Manage a user directory and social media links from the command line",
    long_about = "A CLI for a users REST API.\n\n\
        Lists, creates, edits and deletes users, and manages the social media\n\
        links nested under each user.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "ROLODEX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile), e.g. http://localhost:3000/api
    #[arg(long, short = 'u', env = "ROLODEX_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROLODEX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ROLODEX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, create, edit and delete users
    #[command(alias = "user")]
    Users(UsersArgs),

    /// Manage a user's social media links
    #[command(alias = "sm")]
    Social(SocialArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List every user
    #[command(alias = "ls")]
    List,

    /// Show one user with their social media links
    #[command(alias = "get")]
    Show {
        /// User ID
        id: String,
    },

    /// Create a user (every field is required)
    Create(UserFields),

    /// Edit a user; omitted fields keep their current value
    #[command(alias = "edit")]
    Update {
        /// User ID
        id: String,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        /// User ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct UserFields {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

// ── Social media ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SocialArgs {
    #[command(subcommand)]
    pub command: SocialCommand,
}

#[derive(Debug, Subcommand)]
pub enum SocialCommand {
    /// List a user's social media links
    #[command(alias = "ls")]
    List {
        /// Owning user ID
        user_id: String,
    },

    /// Add a social media link to a user
    Add {
        /// Owning user ID
        user_id: String,

        /// Provider label (e.g. Facebook, Twitter, Instagram)
        #[arg(long)]
        name: String,

        /// Profile URL
        #[arg(long)]
        url: String,
    },

    /// Remove a social media link from a user
    #[command(alias = "rm")]
    Remove {
        /// Owning user ID
        user_id: String,

        /// Link ID
        link_id: String,
    },

    /// Show which icon a provider label resolves to
    Icon {
        /// Provider label
        name: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a profile
    Init {
        /// Profile name (prompted when omitted, unless --yes)
        #[arg(long)]
        name: Option<String>,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
