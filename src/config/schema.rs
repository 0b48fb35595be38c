//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::auth::models::UserRole;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub supervisor: SupervisorConfig,
}

/// Deployment environment. Production is the hardened mode: internal error
/// detail is suppressed from responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Server configuration for the HTTP API and client bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled client bundle (index.html + assets)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./dist/public")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            environment: Environment::default(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session signing key. The shipped default must be overridden in real
    /// deployments, usually via `SESSION_SECRET`.
    #[serde(default = "default_session_secret")]
    pub session_secret: String,

    /// Idle minutes before a session expires
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,

    #[serde(default)]
    pub users: Vec<UserEntry>,
}

pub const DEFAULT_SESSION_SECRET: &str = "cotizador-dev-secret-change-in-production";

fn default_session_secret() -> String {
    DEFAULT_SESSION_SECRET.to_string()
}

fn default_session_ttl() -> i64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_ttl_minutes: default_session_ttl(),
            users: Vec::new(),
        }
    }
}

/// A login account. Passwords are stored as bcrypt hashes, generated with
/// `cotizador hash-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Declarative restart policy consumed by the external process manager.
/// Not executed by the application itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    #[serde(default = "default_script")]
    pub script: String,

    #[serde(default = "default_instances")]
    pub instances: u32,

    #[serde(default = "default_autorestart")]
    pub autorestart: bool,

    /// Restart on file changes. Must be disabled in production.
    #[serde(default)]
    pub watch: bool,

    /// Forced restart when resident memory exceeds this threshold, e.g. "300M"
    #[serde(default = "default_max_memory_restart")]
    pub max_memory_restart: Option<String>,

    /// Cooldown between restarts, milliseconds
    #[serde(default = "default_restart_delay")]
    pub restart_delay: u64,

    /// Restart ceiling before the manager gives up
    #[serde(default = "default_max_restarts")]
    pub max_restarts: u32,

    #[serde(default = "default_wait_ready")]
    pub wait_ready: bool,

    #[serde(default = "default_listen_timeout")]
    pub listen_timeout: u64,

    #[serde(default = "default_kill_timeout")]
    pub kill_timeout: u64,

    /// Extra environment passed to the managed process (DATABASE_URL, etc.)
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_script() -> String {
    "cotizador".to_string()
}

fn default_instances() -> u32 {
    1
}

fn default_autorestart() -> bool {
    true
}

fn default_max_memory_restart() -> Option<String> {
    Some("300M".to_string())
}

fn default_restart_delay() -> u64 {
    4000
}

fn default_max_restarts() -> u32 {
    10
}

fn default_wait_ready() -> bool {
    true
}

fn default_listen_timeout() -> u64 {
    10000
}

fn default_kill_timeout() -> u64 {
    5000
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            script: default_script(),
            instances: default_instances(),
            autorestart: default_autorestart(),
            watch: false,
            max_memory_restart: default_max_memory_restart(),
            restart_delay: default_restart_delay(),
            max_restarts: default_max_restarts(),
            wait_ready: default_wait_ready(),
            listen_timeout: default_listen_timeout(),
            kill_timeout: default_kill_timeout(),
            env: HashMap::new(),
        }
    }
}

impl Config {
    /// Whether the server runs in hardened mode (error detail suppressed)
    pub fn is_hardened(&self) -> bool {
        self.server.environment == Environment::Production
    }

    /// Look up a configured login account by username
    pub fn get_user(&self, username: &str) -> Option<&UserEntry> {
        self.auth.users.iter().find(|u| u.username == username)
    }
}
