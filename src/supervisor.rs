//! Process supervisor configuration
//!
//! Translates the `[supervisor]` config section into the declarative
//! ecosystem document an external process manager consumes. The application
//! never restarts itself; its half of the contract is the `serve` entry
//! point, which either exits non-zero on fatal initialization failure or
//! stays listening.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{Config, Environment};
use crate::error::{Error, Result};

/// One managed process entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub name: String,
    pub script: String,
    pub args: Vec<String>,
    pub instances: u32,
    pub autorestart: bool,
    pub watch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory_restart: Option<String>,
    pub restart_delay: u64,
    pub max_restarts: u32,
    pub wait_ready: bool,
    pub listen_timeout: u64,
    pub kill_timeout: u64,
    pub env: HashMap<String, String>,
}

/// Top-level ecosystem document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecosystem {
    pub apps: Vec<ProcessConfig>,
}

impl ProcessConfig {
    /// Build the process entry from application configuration
    pub fn from_config(config: &Config) -> Self {
        let sup = &config.supervisor;

        let mut env = sup.env.clone();
        env.insert("PORT".to_string(), config.server.port.to_string());
        env.insert(
            "APP_ENV".to_string(),
            match config.server.environment {
                Environment::Production => "production".to_string(),
                Environment::Development => "development".to_string(),
            },
        );

        Self {
            name: "cotizador".to_string(),
            script: sup.script.clone(),
            args: vec!["serve".to_string()],
            instances: sup.instances,
            autorestart: sup.autorestart,
            watch: sup.watch,
            max_memory_restart: sup.max_memory_restart.clone(),
            restart_delay: sup.restart_delay,
            max_restarts: sup.max_restarts,
            wait_ready: sup.wait_ready,
            listen_timeout: sup.listen_timeout,
            kill_timeout: sup.kill_timeout,
            env,
        }
    }

    /// Validate the restart policy.
    ///
    /// Watch-restarts are forbidden in production, the core runs exactly one
    /// instance, and the restart ceiling must leave at least one attempt.
    pub fn validate(&self, environment: Environment) -> Result<()> {
        if environment == Environment::Production && self.watch {
            return Err(Error::Config(
                "supervisor.watch must be disabled in production".to_string(),
            ));
        }
        if self.instances != 1 {
            return Err(Error::Config(format!(
                "supervisor.instances must be 1, got {}",
                self.instances
            )));
        }
        if self.autorestart && self.max_restarts == 0 {
            return Err(Error::Config(
                "supervisor.max_restarts must be at least 1 when autorestart is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Render the validated ecosystem JSON document
pub fn render_ecosystem(config: &Config) -> Result<String> {
    let process = ProcessConfig::from_config(config);
    process.validate(config.server.environment)?;

    let ecosystem = Ecosystem {
        apps: vec![process],
    };
    Ok(serde_json::to_string_pretty(&ecosystem)?)
}
