//! HTTP server: bootstrap sequencer, API routes and request middleware

pub mod assets;
pub mod bootstrap;
pub mod errors;
pub mod routes;
pub mod timing;

pub use bootstrap::{build_app, run_server, Bootstrap, RouteRegistration, SharedState, Step};
pub use errors::{ErrorBody, ErrorHandler};
