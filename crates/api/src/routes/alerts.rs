//! Route definitions for the `/alerts` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// POST   /                          -> report_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(alerts::report_alert))
}
