use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use callguard_core::error::{AlertError, CoreError, GatewayError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the alert pipeline's
/// [`AlertError`]. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `callguard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure inside the alert pipeline.
    #[error(transparent)]
    Alert(#[from] AlertError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine code, and client-facing message for an error.
type Classified = (StatusCode, &'static str, String);

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn conflict(constraint: &str) -> Classified {
    (
        StatusCode::CONFLICT,
        "CONFLICT",
        format!("Duplicate value violates unique constraint: {constraint}"),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Alert pipeline errors ---
            AppError::Alert(err) => classify_alert_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an alert pipeline failure.
///
/// - Push provider failures map to 502.
/// - A message the gateway refused before sending maps to 400.
/// - Store failures, including a duplicate the store could not resolve, map
///   to 500 with a sanitized message.
fn classify_alert_error(err: &AlertError) -> Classified {
    match err {
        AlertError::Gateway(GatewayError::InvalidInput(msg)) => {
            (StatusCode::BAD_REQUEST, "INVALID_NOTIFICATION", msg.clone())
        }
        AlertError::Gateway(gateway_err) => {
            tracing::error!(error = %gateway_err, "Push provider error");
            (
                StatusCode::BAD_GATEWAY,
                "PUSH_PROVIDER_ERROR",
                "The push provider could not deliver the alert".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Alert pipeline error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return conflict(constraint);
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use callguard_core::error::StoreError;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::Core(CoreError::Validation("modelScore out of range".into()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn gateway_failures_are_bad_gateway() {
        let rejected = AppError::Alert(AlertError::Gateway(GatewayError::Rejected { status: 401 }));
        assert_eq!(status_of(rejected), StatusCode::BAD_GATEWAY);

        let transport = AppError::Alert(AlertError::Gateway(GatewayError::Transport(
            "connection reset".into(),
        )));
        assert_eq!(status_of(transport), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_notification_is_bad_request() {
        let err = AppError::Alert(AlertError::Gateway(GatewayError::InvalidInput(
            "no target tokens".into(),
        )));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_backend_failure_is_internal() {
        let err = AppError::Alert(AlertError::Store(StoreError::Backend("pool timed out".into())));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unresolved_duplicate_is_internal() {
        let err = AppError::Alert(AlertError::UnresolvedDuplicate {
            event_id: "evt-1".into(),
        });
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_unique_violation_is_internal() {
        let err = AppError::Alert(AlertError::Store(StoreError::UniqueViolation {
            constraint: "uq_alert_records_user_event".into(),
        }));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
