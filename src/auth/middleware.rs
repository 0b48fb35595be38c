//! Authentication middleware and extractors
//!
//! The middleware never rejects a request on its own: it resolves the session
//! and tags the request with an [`AuthContext`], leaving the decision to the
//! route. Missing or invalid credentials are the explicit `Unauthenticated`
//! state, not an error.

use crate::api::bootstrap::SharedState;
use crate::api::errors::ErrorBody;
use crate::auth::session::{Session, SessionManager};
use crate::auth::token::validate_session_token;
use crate::auth::User;
use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "cotizador_session";

/// Resolved authentication state of a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// A valid, unexpired session
    Session(Session),
    /// No token, or a token that failed validation or session lookup
    Unauthenticated,
}

/// Extract the raw session token from Authorization header or cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                if let Some(token) = cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Resolve request headers to an authentication context
pub async fn authenticate(
    headers: &HeaderMap,
    sessions: &SessionManager,
    secret: &str,
) -> AuthContext {
    let Some(token) = extract_token(headers) else {
        return AuthContext::Unauthenticated;
    };

    let claims = match validate_session_token(&token, secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            return AuthContext::Unauthenticated;
        }
    };

    match sessions.get_session(&claims.sub).await {
        Some(session) => AuthContext::Session(session),
        None => AuthContext::Unauthenticated,
    }
}

/// Middleware attaching the [`AuthContext`] to every request.
///
/// Installed by the bootstrap sequencer before any API route is registered;
/// routes registered earlier would see no context at all.
pub async fn attach_auth(
    axum::extract::State(state): axum::extract::State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = authenticate(
        req.headers(),
        &state.sessions,
        &state.config.auth.session_secret,
    )
    .await;
    req.extensions_mut().insert(context);
    next.run(req).await
}

fn unauthorized() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            error: "No autorizado".to_string(),
            message: None,
        }),
    )
}

/// Extractor for routes that require a valid session
pub struct CurrentSession(pub Session);

impl FromRequestParts<SharedState> for CurrentSession {
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::Session(session)) => Ok(CurrentSession(session.clone())),
            _ => Err(unauthorized()),
        }
    }
}

/// Extractor for routes that require an authenticated, active user
pub struct CurrentUser(pub User);

impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        if !session.user.active {
            return Err(unauthorized());
        }
        Ok(CurrentUser(session.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;

    #[tokio::test]
    async fn test_authenticate_no_token() {
        let sessions = SessionManager::default();
        let headers = HeaderMap::new();

        let context = authenticate(&headers, &sessions, "secret").await;
        assert!(matches!(context, AuthContext::Unauthenticated));
    }

    #[tokio::test]
    async fn test_authenticate_cookie_token() {
        let sessions = SessionManager::default();
        let user = User::new("admin".to_string(), UserRole::Admin);
        let session_id = sessions.create_session(user).await;
        let token = crate::auth::create_session_token(&session_id, "secret", 30).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            format!("{}={}", SESSION_COOKIE, token).parse().unwrap(),
        );

        let context = authenticate(&headers, &sessions, "secret").await;
        match context {
            AuthContext::Session(session) => assert_eq!(session.user.username, "admin"),
            AuthContext::Unauthenticated => panic!("expected a session"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_token_without_session() {
        let sessions = SessionManager::default();
        let token = crate::auth::create_session_token("gone", "secret", 30).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", token).parse().unwrap(),
        );

        let context = authenticate(&headers, &sessions, "secret").await;
        assert!(matches!(context, AuthContext::Unauthenticated));
    }
}
