//! Handlers for the `/device-tokens` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! the caller's own registrations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use callguard_core::device::DeviceRegistration;
use callguard_core::error::CoreError;
use callguard_db::models::device_token::DeviceToken;
use callguard_db::repositories::DeviceTokenRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/device-tokens
pub async fn list_device_tokens(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DeviceToken>>>> {
    let tokens = DeviceTokenRepo::list_for_user(&state.pool, &auth.user_id).await?;
    Ok(Json(DataResponse { data: tokens }))
}

/// POST /api/v1/device-tokens/register
///
/// Register or refresh the push token of one of the caller's devices.
/// Returns 204 No Content.
pub async fn register_device_token(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeviceRegistration>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let row = DeviceTokenRepo::register(&state.pool, &auth.user_id, &input, now_ms).await?;

    tracing::info!(
        user_id = %auth.user_id,
        device_id = %row.device_id,
        platform = %row.platform,
        "Device token registered"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/device-tokens/{device_id}
///
/// Returns 204 No Content, or 404 if the caller has no registration for
/// that device.
pub async fn delete_device_token(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted =
        DeviceTokenRepo::delete_for_device(&state.pool, &auth.user_id, &device_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DeviceToken",
            id: device_id,
        }));
    }

    tracing::info!(user_id = %auth.user_id, device_id = %device_id, "Device token removed");
    Ok(StatusCode::NO_CONTENT)
}
