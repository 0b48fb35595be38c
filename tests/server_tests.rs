//! HTTP server integration tests
//! Full bootstrap + listener round-trips
//!
//! Run with: cargo test --test server_tests -- --ignored --test-threads=1
//! (Use single thread to avoid port conflicts)

use cotizador::api::run_server;
use cotizador::auth::UserRole;
use cotizador::config::{Config, UserEntry};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

const SHELL: &str = "<!DOCTYPE html><html><body id=\"cotizador-shell\"></body></html>";

/// Config with a temp client bundle and one admin account
fn test_config(static_dir: &TempDir) -> Config {
    std::fs::write(static_dir.path().join("index.html"), SHELL).unwrap();
    std::fs::write(static_dir.path().join("app.js"), "console.log('ok')").unwrap();

    let mut config = Config::default();
    config.server.static_dir = static_dir.path().to_path_buf();
    config.auth.users.push(UserEntry {
        username: "admin".to_string(),
        password_hash: bcrypt::hash("secreto", 4).unwrap(),
        role: UserRole::Admin,
    });
    config
}

/// Helper to start the server in background with a given port
async fn start_test_server(config: Config, port: u16) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let _ = run_server(config, "127.0.0.1", port).await;
    })
}

/// Helper to wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = reqwest::Client::new();
    for attempt in 0..max_attempts {
        match client
            .get(format!("http://127.0.0.1:{}/api/health", port))
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => return true,
            _ => {
                if attempt < max_attempts - 1 {
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
    false
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_spa_fallback_serves_shell_for_deep_links() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4101u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();

    // Deep link with no matching asset -> shell document, 200
    let response = client
        .get(format!("http://127.0.0.1:{}/presupuestos/42", port))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("cotizador-shell"));

    // Real asset still served as-is
    let response = client
        .get(format!("http://127.0.0.1:{}/app.js", port))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("console.log"));

    server.abort();
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_ping_rejects_unauthenticated() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4102u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/ping", port))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No autorizado");

    server.abort();
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_login_then_ping_returns_user_context() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4103u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://127.0.0.1:{}/api/auth/login", port))
        .json(&serde_json::json!({"username": "admin", "password": "secreto"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let login: serde_json::Value = response.json().await.unwrap();
    let token = login["token"].as_str().unwrap().to_string();
    assert_eq!(login["user"]["role"], "admin");

    let response = client
        .get(format!("http://127.0.0.1:{}/api/ping", port))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let ping: serde_json::Value = response.json().await.unwrap();
    assert_eq!(ping["data"]["username"], "admin");

    server.abort();
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_wrong_password_rejected() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4104u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://127.0.0.1:{}/api/auth/login", port))
        .json(&serde_json::json!({"username": "admin", "password": "nope"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Credenciales inválidas");

    server.abort();
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_me_reports_null_user_without_session() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4105u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/auth/me", port))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["user"].is_null());

    server.abort();
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_logout_invalidates_session() {
    let static_dir = TempDir::new().unwrap();
    let config = test_config(&static_dir);
    let port = 4106u16;

    let server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();

    let login: serde_json::Value = client
        .post(format!("http://127.0.0.1:{}/api/auth/login", port))
        .json(&serde_json::json!({"username": "admin", "password": "secreto"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_string();

    let response = client
        .post(format!("http://127.0.0.1:{}/api/auth/logout", port))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Token still validates cryptographically but the session is gone
    let response = client
        .get(format!("http://127.0.0.1:{}/api/ping", port))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    server.abort();
}
