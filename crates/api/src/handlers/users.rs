//! Handlers for the caller's own profile.
//!
//! The display name stored here is what trusted contacts see in alert
//! notifications.

use axum::extract::State;
use axum::Json;
use callguard_core::error::CoreError;
use callguard_core::profile::ProfileUpdate;
use callguard_db::models::user::User;
use callguard_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_uid(&state.pool, &auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/users/profile
///
/// Create the caller's profile or replace its name and phone number.
/// A phone number already claimed by another user is rejected with 409.
pub async fn save_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileUpdate>,
) -> AppResult<Json<DataResponse<User>>> {
    input.validate()?;

    let user = UserRepo::upsert_profile(
        &state.pool,
        &auth.user_id,
        Some(input.display_name()),
        input.phone_number.as_deref(),
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, "User profile saved");
    Ok(Json(DataResponse { data: user }))
}
