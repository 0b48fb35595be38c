//! CLI interface for Cotizador

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cotizador")]
#[command(version = "1.0.0")]
#[command(about = "Budgeting and quoting application server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new cotizador.toml configuration file
    Init,

    /// Start the HTTP server (bootstrap sequence + listen)
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,
    },

    /// Manage the process-manager configuration
    Supervisor {
        #[command(subcommand)]
        action: SupervisorAction,
    },

    /// Hash a password for use in [[auth.users]]
    HashPassword {
        /// Plain-text password to hash
        password: String,
    },

    /// Validate configuration and report common deployment mistakes
    Check,
}

#[derive(Subcommand)]
pub enum SupervisorAction {
    /// Generate the ecosystem JSON document
    Generate {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective restart policy
    Show,
}
