//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "cotizador.toml";

/// Load configuration from cotizador.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Cotizador Configuration

[server]
host = "0.0.0.0"
port = ${PORT:-5000}
static_dir = "./dist/public"
environment = "${APP_ENV:-development}"  # "production" suppresses error detail

[auth]
session_secret = "${SESSION_SECRET:-cotizador-dev-secret-change-in-production}"
session_ttl_minutes = 30

# Login accounts. Generate hashes with 'cotizador hash-password <password>'
# [[auth.users]]
# username = "admin"
# password_hash = "$2b$12$..."
# role = "admin"

# [[auth.users]]
# username = "ventas"
# password_hash = "$2b$12$..."
# role = "standard"

# Process manager restart policy ('cotizador supervisor generate')
[supervisor]
script = "cotizador"
instances = 1
autorestart = true
watch = false            # never enable in production
max_memory_restart = "300M"
restart_delay = 4000
max_restarts = 10
wait_ready = true
listen_timeout = 10000
kill_timeout = 5000

[supervisor.env]
DATABASE_URL = "${DATABASE_URL:-}"
"#
}
