//! Global error handler
//!
//! Last-resort conversion of any unhandled failure into the uniform JSON
//! error shape. Whether the underlying error text is exposed is decided once,
//! at construction, from the deployment environment; handling itself never
//! reads ambient state.

use crate::error::Error;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

/// Generic user-facing error text; never carries internals
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Uniform error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Underlying error text; suppressed (null) in hardened mode
    pub message: Option<String>,
}

/// Converts unhandled failures into 500 + [`ErrorBody`] responses
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    hardened: bool,
}

impl ErrorHandler {
    pub fn new(hardened: bool) -> Self {
        Self { hardened }
    }

    /// Build the uniform 500 response for an error.
    ///
    /// The full error is logged unconditionally; only the response body is
    /// mode-dependent.
    pub fn respond(&self, err: &Error) -> (StatusCode, Json<ErrorBody>) {
        tracing::error!("Unhandled request error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                message: (!self.hardened).then(|| err.to_string()),
            }),
        )
    }

    /// Outermost layer catching panics from any downstream handler.
    ///
    /// Panics are converted to the same JSON shape so a request-time failure
    /// never crashes the process or leaks a stack trace.
    pub fn panic_layer(&self) -> CatchPanicLayer<PanicResponder> {
        CatchPanicLayer::custom(PanicResponder {
            hardened: self.hardened,
        })
    }
}

/// [`ResponseForPanic`] implementation producing the uniform error body
#[derive(Debug, Clone)]
pub struct PanicResponder {
    hardened: bool,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn std::any::Any + Send + 'static>,
    ) -> Response<Self::ResponseBody> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            "unknown panic payload".to_string()
        };

        tracing::error!("Request handler panicked: {}", detail);

        let body = ErrorBody {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            message: (!self.hardened).then_some(detail),
        };
        let json = serde_json::to_string(&body)
            .unwrap_or_else(|_| format!(r#"{{"error":"{}","message":null}}"#, INTERNAL_ERROR_MESSAGE));

        // Static parts, cannot fail to assemble
        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .expect("valid response parts")
    }
}
