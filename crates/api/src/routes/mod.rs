pub mod alerts;
pub mod device_tokens;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /alerts                        report a scored call (POST)
///
/// /device-tokens                 list caller's registrations (GET)
/// /device-tokens/register        register or refresh a token (POST)
/// /device-tokens/{device_id}     remove a registration (DELETE)
///
/// /users/profile                 caller's profile (GET, POST)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/alerts", alerts::router())
        .nest("/device-tokens", device_tokens::router())
        .nest("/users", users::router())
}
