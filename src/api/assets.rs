//! Static asset serving and SPA fallback

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Client shell document served for unmatched routes
pub const SHELL_DOCUMENT: &str = "index.html";

/// Serve the client bundle with SPA fallback: any path without a matching
/// asset returns the shell document with status 200, so deep links are
/// handled by client-side routing.
pub fn spa_service(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(SHELL_DOCUMENT)))
}
