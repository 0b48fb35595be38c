//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::api;
use crate::cli::{error, info, print_supervisor_table, success, warn};
use crate::config::{self, schema::DEFAULT_SESSION_SECRET, Config};
use crate::supervisor::{self, ProcessConfig};

/// Initialize a new cotizador.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("cotizador.toml");

    if config_path.exists() {
        warn("cotizador.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created cotizador.toml");
    info("Add login accounts under [[auth.users]] and run 'cotizador serve'");

    Ok(())
}

/// Start the HTTP server: full bootstrap sequence, then listen.
///
/// This is the supervisor's entry point. A bootstrap failure propagates out
/// of main so the process exits non-zero instead of serving
/// partially-initialized; the process manager decides whether to retry.
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let config = load_config()?;

    if config.is_hardened() && config.auth.session_secret == DEFAULT_SESSION_SECRET {
        warn("session_secret is still the shipped default; set SESSION_SECRET");
    }

    match api::run_server(config, host, port).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error(&format!("Server failed to start: {}", e));
            Err(e.into())
        }
    }
}

/// Generate the process-manager ecosystem document
pub async fn supervisor_generate(output: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let document = supervisor::render_ecosystem(&config)?;

    match output {
        Some(path) => {
            fs::write(&path, &document)?;
            success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", document),
    }

    Ok(())
}

/// Show the effective restart policy
pub async fn supervisor_show() -> Result<()> {
    let config = load_config()?;
    let process = ProcessConfig::from_config(&config);
    print_supervisor_table(&process);
    Ok(())
}

/// Hash a password for [[auth.users]]
pub async fn hash_password(password: &str) -> Result<()> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    println!("{}", hash);
    Ok(())
}

/// Validate configuration and flag common deployment mistakes
pub async fn check() -> Result<()> {
    let config = load_config()?;
    let mut problems = 0;

    let process = ProcessConfig::from_config(&config);
    if let Err(e) = process.validate(config.server.environment) {
        error(&e.to_string());
        problems += 1;
    }

    if config.auth.session_secret == DEFAULT_SESSION_SECRET {
        warn("session_secret is the shipped default; override it via SESSION_SECRET");
        problems += 1;
    }

    if config.auth.users.is_empty() {
        warn("no [[auth.users]] configured; nobody can log in");
        problems += 1;
    }

    if !config.server.static_dir.join("index.html").exists() {
        warn(&format!(
            "no client shell at {}/index.html; SPA fallback will 404",
            config.server.static_dir.display()
        ));
        problems += 1;
    }

    if problems == 0 {
        success("Configuration OK");
    } else {
        info(&format!("{} problem(s) found", problems));
    }

    Ok(())
}

/// Load configuration with a consistent error message
fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| {
        error(&format!("Failed to load config: {}", e));
        e.into()
    })
}
