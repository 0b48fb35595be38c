//! Client-side route guard
//!
//! Models the access gate the browser client wraps around protected views.
//! The guard consults the client-local [`AuthState`] and decides, per render
//! pass, whether the wrapped content may render at all. Content side effects
//! (data fetches, mutations) must never run unless the decision is
//! `Authorized`, so [`guard`] short-circuits: the render closure is only
//! invoked for that outcome.

use crate::auth::models::{User, UserRole};
use serde::{Deserialize, Serialize};

/// Login entry point; unauthenticated visitors are redirected here
pub const LOGIN_ROUTE: &str = "/auth";
/// Application home; forbidden visitors are navigated here
pub const HOME_ROUTE: &str = "/";
/// Denial message rendered alongside the forbidden navigation
pub const ACCESS_DENIED_MESSAGE: &str = "No tienes permisos para acceder a esta página";

/// Client-local authentication state.
///
/// Starts as `is_loading = true` on every fresh mount and resolves exactly
/// once, to either a user or `None`. It never reverts to loading except on a
/// full reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthState {
    /// Unresolved state: the auth query is still in flight
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// Resolved state
    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }
}

/// Per-view guard configuration, attached at composition time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    pub admin_only: bool,
}

/// Guard states, resolved once per render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Auth state not yet resolved; render a neutral progress indicator
    Loading,
    /// No user; redirect to the login route
    Unauthenticated,
    /// Valid user but insufficient role
    Forbidden,
    /// Render the wrapped content unchanged
    Authorized,
}

/// Evaluate the guard state machine for the current auth state
pub fn evaluate(auth: &AuthState, config: &GuardConfig) -> GuardState {
    if auth.is_loading {
        return GuardState::Loading;
    }

    match &auth.user {
        None => GuardState::Unauthenticated,
        Some(user) if config.admin_only && user.role != UserRole::Admin => GuardState::Forbidden,
        Some(_) => GuardState::Authorized,
    }
}

/// Outcome of a guarded render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// Neutral progress indicator; no side effects
    Loading,
    /// Client-side redirect; content never rendered
    RedirectToLogin { target: &'static str },
    /// Insufficient role. Both effects fire in the same pass: an imperative
    /// navigation home AND a denial message for the current frame. The
    /// message covers the gap until navigation completes.
    Denied {
        navigate_to: &'static str,
        message: &'static str,
    },
    /// The wrapped content
    Content(T),
}

impl<T> Guarded<T> {
    pub fn is_content(&self) -> bool {
        matches!(self, Guarded::Content(_))
    }
}

/// Run a guarded render pass.
///
/// `render` is the wrapped view; it is invoked only when the guard resolves
/// to `Authorized`, so its side effects cannot fire while loading,
/// unauthenticated or forbidden.
pub fn guard<T>(
    auth: &AuthState,
    config: &GuardConfig,
    render: impl FnOnce() -> T,
) -> Guarded<T> {
    match evaluate(auth, config) {
        GuardState::Loading => Guarded::Loading,
        GuardState::Unauthenticated => Guarded::RedirectToLogin {
            target: LOGIN_ROUTE,
        },
        GuardState::Forbidden => Guarded::Denied {
            navigate_to: HOME_ROUTE,
            message: ACCESS_DENIED_MESSAGE,
        },
        GuardState::Authorized => Guarded::Content(render()),
    }
}
