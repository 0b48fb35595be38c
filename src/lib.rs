//! Cotizador - budgeting and quoting application server
//!
//! This is the library interface for Cotizador: the session-gated access
//! control path, the server bootstrap sequencer and the process supervisor
//! configuration, exposed for programmatic use and testing.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod supervisor;

pub use config::Config;
pub use error::Error;
