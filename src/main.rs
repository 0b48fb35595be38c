use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod supervisor;

pub mod api;
pub mod auth;
pub mod cli;

use cli::{Cli, Commands, SupervisorAction};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cotizador=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(&host, port).await,
        Commands::Supervisor { action } => match action {
            SupervisorAction::Generate { output } => {
                cli::commands::supervisor_generate(output).await
            }
            SupervisorAction::Show => cli::commands::supervisor_show().await,
        },
        Commands::HashPassword { password } => cli::commands::hash_password(&password).await,
        Commands::Check => cli::commands::check().await,
    }
}
