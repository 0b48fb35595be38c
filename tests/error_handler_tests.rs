//! Global error handler contract tests

use axum::Json;
use cotizador::api::{ErrorBody, ErrorHandler};
use cotizador::Error;

#[test]
fn test_hardened_mode_suppresses_message() {
    let handler = ErrorHandler::new(true);
    let (status, Json(body)) = handler.respond(&Error::Other("DB timeout".to_string()));

    assert_eq!(status, 500);
    assert_eq!(body.error, "Error interno del servidor");
    assert_eq!(body.message, None);
}

#[test]
fn test_unhardened_mode_exposes_message() {
    let handler = ErrorHandler::new(false);
    let (status, Json(body)) = handler.respond(&Error::Other("DB timeout".to_string()));

    assert_eq!(status, 500);
    assert_eq!(body.error, "Error interno del servidor");
    assert_eq!(body.message.as_deref(), Some("DB timeout"));
}

#[test]
fn test_body_serializes_null_message() {
    let body = ErrorBody {
        error: "Error interno del servidor".to_string(),
        message: None,
    };
    let json = serde_json::to_string(&body).unwrap();
    assert_eq!(
        json,
        r#"{"error":"Error interno del servidor","message":null}"#
    );
}

#[test]
fn test_generic_text_never_carries_internals() {
    let handler = ErrorHandler::new(true);
    let (_, Json(body)) = handler.respond(&Error::Config("secret path /etc/shadow".to_string()));

    assert!(!body.error.contains("shadow"));
    assert_eq!(body.message, None);
}
