//! Tickline CLI - work a support-ticket queue from the terminal.

mod cli;
mod commands;
mod config_profiles;
mod error;
mod session_store;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tickline=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let global_profile = cli.profile.as_deref();

    match cli.command {
        Commands::Config { command } => commands::config::run_config(command, global_profile)?,
        Commands::Auth { command } => {
            commands::auth_cmd::run_auth(command, global_profile).await?;
        }
        Commands::Tickets { command } => {
            commands::tickets::run_tickets(command, global_profile).await?;
        }
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
