//! Service health endpoint mounted at the root, outside `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    /// `ok`, or `degraded` when Postgres cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthStatus {
    fn from_db(db_healthy: bool) -> (StatusCode, Self) {
        let (code, status) = if db_healthy {
            (StatusCode::OK, "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };
        let body = Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        };
        (code, body)
    }
}

/// GET /health
///
/// Alerts cannot be stored without the database, so a failed ping is
/// reported as 503 for load balancers to act on.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let db_healthy = match callguard_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let (code, body) = HealthStatus::from_db(db_healthy);
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
