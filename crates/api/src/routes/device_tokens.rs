//! Route definitions for the `/device-tokens` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::device_tokens;
use crate::state::AppState;

/// Routes mounted at `/device-tokens`.
///
/// ```text
/// GET    /                          -> list_device_tokens
/// POST   /register                  -> register_device_token
/// DELETE /{device_id}               -> delete_device_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(device_tokens::list_device_tokens))
        .route("/register", post(device_tokens::register_device_token))
        .route("/{device_id}", delete(device_tokens::delete_device_token))
}
