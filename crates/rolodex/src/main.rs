mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rolodex_core::Session;

use crate::cli::{Cli, Command, SocialArgs, SocialCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Config commands don't need the API
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "rolodex", &mut std::io::stdout());
            Ok(())
        }

        // Icon lookup is a pure function
        Command::Social(SocialArgs {
            command: SocialCommand::Icon { name },
        }) => commands::social::icon(name, &global),

        // Everything else talks to the API through a session
        Command::Users(args) => {
            let session = connect(&global)?;
            let result = commands::users::handle(&session, args, &global).await;
            session.shutdown();
            result
        }

        Command::Social(args) => {
            let session = connect(&global)?;
            let result = commands::social::handle(&session, args, &global).await;
            session.shutdown();
            result
        }
    }
}

/// Build a session from the config file, profile, and CLI overrides.
fn connect(global: &cli::GlobalOpts) -> Result<Session<rolodex_core::ApiGateway>, CliError> {
    let gateway_config = config::resolve_gateway_config(global)?;
    tracing::debug!(api_url = %gateway_config.api_url, "connecting");
    Ok(Session::connect(&gateway_config)?)
}
