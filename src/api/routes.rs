//! API route handlers
//!
//! The business endpoints (budgets, quotes) live behind this registrar in
//! their own modules; the routes here are the authentication surface the
//! client guard depends on, plus health. Registration returns a
//! [`RouteRegistration`] so the bootstrap sequencer knows it still owns the
//! listener.

use axum::{
    extract::State,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::auth::middleware::{AuthContext, CurrentSession, CurrentUser, SESSION_COOKIE};
use crate::auth::models::{LoginRequest, LoginResponse, UserInfo};
use crate::auth::{create_session_token, User};
use crate::error::Error;

use super::bootstrap::{RouteRegistration, SharedState};
use super::errors::ErrorBody;

/// Register the API routes. Does not bind a listener.
pub fn register(state: SharedState) -> RouteRegistration {
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/ping", get(ping))
        // Auth routes
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        // Middleware
        .layer(CorsLayer::permissive())
        .with_state(state);

    RouteRegistration {
        router,
        owns_listener: false,
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Auth-state query response; the client guard polls this
#[derive(Debug, Serialize)]
pub struct AuthStateResponse {
    pub user: Option<UserInfo>,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

/// Authenticated-user context probe
pub async fn ping(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(ApiResponse::ok(UserInfo::from(user)))
}

// Auth routes

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            error: "Credenciales inválidas".to_string(),
            message: None,
        }),
    )
        .into_response()
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let Some(entry) = state.config.get_user(&req.username) else {
        return invalid_credentials();
    };

    match bcrypt::verify(&req.password, &entry.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => {
            let err = Error::Other(format!("Password verification failed: {}", e));
            return state.errors.respond(&err).into_response();
        }
    }

    let user = User::new(entry.username.clone(), entry.role);
    let session_id = state.sessions.create_session(user.clone()).await;

    let token = match create_session_token(
        &session_id,
        &state.config.auth.session_secret,
        state.config.auth.session_ttl_minutes,
    ) {
        Ok(token) => token,
        Err(e) => return state.errors.respond(&e).into_response(),
    };

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            token,
            user: user.into(),
        }),
    )
        .into_response()
}

pub async fn logout(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
) -> impl IntoResponse {
    state.sessions.delete_session(&session.id).await;

    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok("session closed")),
    )
}

/// Current auth state. Never rejects: an unauthenticated caller gets
/// `user: null`, which the client resolves to its `Unauthenticated` state.
pub async fn me(parts: Parts) -> impl IntoResponse {
    let user = match parts.extensions.get::<AuthContext>() {
        Some(AuthContext::Session(session)) => Some(UserInfo::from(session.user.clone())),
        _ => None,
    };
    Json(AuthStateResponse { user })
}
