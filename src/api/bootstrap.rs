//! Bootstrap sequencer
//!
//! Brings the server from cold start to accepting traffic in a fixed,
//! auditable order. Each step is a hard precondition for the next; the
//! sequence is recorded so tests can assert it instead of relying on timing.
//! Middleware installed earlier executes earlier for every request, with no
//! exceptions.

use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::fmt;
use std::sync::Arc;

use crate::auth::middleware::attach_auth;
use crate::auth::SessionManager;
use crate::config::Config;
use crate::error::{Error, Result};

use super::assets;
use super::errors::ErrorHandler;
use super::routes;
use super::timing;

/// Generous body ceiling for JSON and form payloads (bulk imports)
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub sessions: SessionManager,
    pub errors: ErrorHandler,
}

pub type SharedState = Arc<AppState>;

/// Installation steps, in their only valid order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BodyParsers,
    RequestTiming,
    AuthMiddleware,
    ApiRoutes,
    StaticAssets,
    SpaFallback,
    ErrorHandler,
}

impl Step {
    /// The complete, in-order bootstrap sequence
    pub const SEQUENCE: [Step; 7] = [
        Step::BodyParsers,
        Step::RequestTiming,
        Step::AuthMiddleware,
        Step::ApiRoutes,
        Step::StaticAssets,
        Step::SpaFallback,
        Step::ErrorHandler,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::BodyParsers => "body parsers",
            Step::RequestTiming => "request timing",
            Step::AuthMiddleware => "auth middleware",
            Step::ApiRoutes => "api routes",
            Step::StaticAssets => "static assets",
            Step::SpaFallback => "spa fallback",
            Step::ErrorHandler => "error handler",
        };
        write!(f, "{}", name)
    }
}

/// Result of API route registration.
///
/// `owns_listener` is the explicit contract replacing runtime detection: a
/// registrar that started its own listener tags the result, and the
/// sequencer will not bind the port a second time.
pub struct RouteRegistration {
    pub router: Router,
    pub owns_listener: bool,
}

/// The assembled application, ready to serve
pub struct App {
    pub router: Router,
    pub owns_listener: bool,
    /// Completed bootstrap steps, in installation order
    pub steps: Vec<Step>,
}

/// Step-by-step server assembly with order enforcement
pub struct Bootstrap {
    state: SharedState,
    steps: Vec<Step>,
    api: Option<Router>,
    owns_listener: bool,
}

impl Bootstrap {
    pub fn new(config: Config) -> Self {
        let sessions = SessionManager::new(config.auth.session_ttl_minutes);
        let errors = ErrorHandler::new(config.is_hardened());
        Self {
            state: Arc::new(AppState {
                config,
                sessions,
                errors,
            }),
            steps: Vec::new(),
            api: None,
            owns_listener: false,
        }
    }

    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    fn completed(&self, step: Step) -> bool {
        self.steps.contains(&step)
    }

    fn require(&self, prerequisite: Step, step: Step) -> Result<()> {
        if !self.completed(prerequisite) {
            return Err(Error::Bootstrap(format!(
                "{} must be installed before {}",
                prerequisite, step
            )));
        }
        Ok(())
    }

    fn record(&mut self, step: Step) {
        tracing::info!("Bootstrap step: {}", step);
        self.steps.push(step);
    }

    /// Step 1: request body parsers with a generous size ceiling
    pub fn install_body_parsers(&mut self) -> Result<&mut Self> {
        self.record(Step::BodyParsers);
        Ok(self)
    }

    /// Step 2: per-request timing observer (API paths only)
    pub fn install_request_timing(&mut self) -> Result<&mut Self> {
        self.require(Step::BodyParsers, Step::RequestTiming)?;
        self.record(Step::RequestTiming);
        Ok(self)
    }

    /// Step 3: authentication middleware.
    ///
    /// Must complete before route registration; a route registered earlier
    /// would be unauthenticated regardless of intent.
    pub fn install_auth_middleware(&mut self) -> Result<&mut Self> {
        self.require(Step::RequestTiming, Step::AuthMiddleware)?;
        self.record(Step::AuthMiddleware);
        Ok(self)
    }

    /// Step 4: API route registration via an external registrar
    pub fn register_api_routes<F>(&mut self, registrar: F) -> Result<&mut Self>
    where
        F: FnOnce(SharedState) -> RouteRegistration,
    {
        self.require(Step::AuthMiddleware, Step::ApiRoutes)?;

        let registration = registrar(self.state.clone());
        self.owns_listener = registration.owns_listener;

        // Every registered route sees the auth context
        let api = registration.router.layer(middleware::from_fn_with_state(
            self.state.clone(),
            attach_auth,
        ));
        self.api = Some(api);

        self.record(Step::ApiRoutes);
        Ok(self)
    }

    /// Step 5: static asset mount. Idempotent: a repeat call is a no-op.
    pub fn mount_static_assets(&mut self) -> Result<&mut Self> {
        self.require(Step::ApiRoutes, Step::StaticAssets)?;
        if self.completed(Step::StaticAssets) {
            tracing::warn!("Static assets already mounted, skipping");
            return Ok(self);
        }
        self.record(Step::StaticAssets);
        Ok(self)
    }

    /// Step 6: SPA fallback mount. Idempotent: a repeat call is a no-op.
    pub fn mount_spa_fallback(&mut self) -> Result<&mut Self> {
        self.require(Step::StaticAssets, Step::SpaFallback)?;
        if self.completed(Step::SpaFallback) {
            tracing::warn!("SPA fallback already mounted, skipping");
            return Ok(self);
        }
        self.record(Step::SpaFallback);
        Ok(self)
    }

    /// Step 7: install the global error handler last and assemble the router.
    ///
    /// The error layer is outermost so it catches failures from every prior
    /// stage; the timing observer sits just inside it, then the body ceiling,
    /// then auth (scoped to API routes), then the routes themselves.
    pub fn finish(mut self) -> Result<App> {
        self.require(Step::SpaFallback, Step::ErrorHandler)?;
        self.record(Step::ErrorHandler);

        let api = self
            .api
            .take()
            .ok_or_else(|| Error::Bootstrap("no API routes registered".to_string()))?;

        let static_dir = self.state.config.server.static_dir.clone();
        let router = api
            .fallback_service(assets::spa_service(&static_dir))
            .layer(middleware::from_fn(timing::request_timing))
            .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
            .layer(self.state.errors.panic_layer());

        Ok(App {
            router,
            owns_listener: self.owns_listener,
            steps: self.steps,
        })
    }
}

/// Run the full bootstrap sequence against the standard API registrar
pub fn build_app(config: Config) -> Result<App> {
    let mut boot = Bootstrap::new(config);
    boot.install_body_parsers()?;
    boot.install_request_timing()?;
    boot.install_auth_middleware()?;
    boot.register_api_routes(routes::register)?;
    boot.mount_static_assets()?;
    boot.mount_spa_fallback()?;
    boot.finish()
}

/// Bootstrap and serve.
///
/// Any failure before the listener is up is fatal and propagates to the
/// caller; the process must exit non-zero rather than serve
/// partially-initialized. Failures after this point are request-scoped and
/// handled by the error layer.
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let app = build_app(config)?;

    if app.owns_listener {
        tracing::info!("Route registration owns the listener, skipping bind");
        return Ok(());
    }

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.router).await?;

    Ok(())
}
