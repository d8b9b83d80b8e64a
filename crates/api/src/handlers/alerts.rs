//! Handlers for the `/alerts` resource.

use axum::extract::State;
use axum::Json;
use callguard_core::alert::ScamEvent;
use callguard_core::outcome::AlertResponse;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/alerts
///
/// Report a call scored by the detection model on the caller's device.
/// Replays of an already-processed `eventId` return the original `callId`
/// without notifying anyone again.
pub async fn report_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(event): Json<ScamEvent>,
) -> AppResult<Json<DataResponse<AlertResponse>>> {
    event.validate()?;

    tracing::debug!(
        user_id = %auth.user_id,
        event_id = %event.event_id,
        risk_level = %event.risk_level,
        model_score = event.model_score,
        "Scam alert reported"
    );

    let response = state.orchestrator.handle(&auth.user_id, &event).await?;

    Ok(Json(DataResponse { data: response }))
}
