//! CORS middleware configuration
//!
//! The original deployment serves a browser frontend from a different origin,
//! so cross-origin requests are allowed.

use tower_http::cors::CorsLayer;

/// Create CORS layer for development (allows any origin)
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
