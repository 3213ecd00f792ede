//! Route definitions for the `/products` validation resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// POST   /validate          -> validate_create  (dry-run)
/// PUT    /{id}/validate     -> validate_update  (dry-run)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(product::validate_create))
        .route("/{id}/validate", put(product::validate_update))
}
