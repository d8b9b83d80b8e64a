//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /profile                   -> get_profile
/// POST   /profile                   -> save_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(users::get_profile).post(users::save_profile),
    )
}
