//! Process supervisor configuration tests

use cotizador::config::{Config, Environment};
use cotizador::supervisor::{render_ecosystem, ProcessConfig};

#[test]
fn test_ecosystem_document_shape() {
    let config = Config::default();
    let document = render_ecosystem(&config).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&document).unwrap();

    let apps = parsed["apps"].as_array().unwrap();
    assert_eq!(apps.len(), 1);

    let app = &apps[0];
    assert_eq!(app["name"], "cotizador");
    assert_eq!(app["script"], "cotizador");
    assert_eq!(app["args"][0], "serve");
    assert_eq!(app["instances"], 1);
    assert_eq!(app["autorestart"], true);
    assert_eq!(app["watch"], false);
    assert_eq!(app["max_memory_restart"], "300M");
    assert_eq!(app["restart_delay"], 4000);
    assert_eq!(app["max_restarts"], 10);
    assert_eq!(app["wait_ready"], true);
    assert_eq!(app["env"]["PORT"], "5000");
}

#[test]
fn test_watch_in_production_fails_validation() {
    let mut config = Config::default();
    config.server.environment = Environment::Production;
    config.supervisor.watch = true;

    assert!(render_ecosystem(&config).is_err());
}

#[test]
fn test_multiple_instances_rejected() {
    let mut config = Config::default();
    config.supervisor.instances = 4;

    let process = ProcessConfig::from_config(&config);
    assert!(process.validate(Environment::Development).is_err());
}

#[test]
fn test_zero_restart_ceiling_rejected_with_autorestart() {
    let mut config = Config::default();
    config.supervisor.max_restarts = 0;

    let process = ProcessConfig::from_config(&config);
    assert!(process.validate(Environment::Development).is_err());
}

#[test]
fn test_extra_env_is_passed_through() {
    let mut config = Config::default();
    config
        .supervisor
        .env
        .insert("DATABASE_URL".to_string(), "postgres://db".to_string());

    let process = ProcessConfig::from_config(&config);
    assert_eq!(
        process.env.get("DATABASE_URL").map(String::as_str),
        Some("postgres://db")
    );
    // Derived values are still present
    assert!(process.env.contains_key("PORT"));
    assert!(process.env.contains_key("APP_ENV"));
}
