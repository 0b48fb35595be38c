//! Authentication and session management

pub mod middleware;
pub mod models;
pub mod session;
pub mod token;

pub use middleware::{authenticate, AuthContext, CurrentSession, CurrentUser};
pub use models::{User, UserRole};
pub use session::{Session, SessionManager};
pub use token::{create_session_token, validate_session_token, Claims};
