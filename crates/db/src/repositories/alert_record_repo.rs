//! Repository for the `alert_records` table.

use callguard_core::alert::NewAlertRecord;
use callguard_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert_record::AlertRecordRow;

/// Column list for `alert_records` queries.
const COLUMNS: &str = "id, user_id, event_id, caller_number, risk_level, model_score, \
    transcript, model_analysis, duration_seconds, occurred_at, delivery_ref, \
    created_at, updated_at, deleted_at";

/// Idempotent storage of reported scam-call alerts.
pub struct AlertRecordRepo;

impl AlertRecordRepo {
    /// Find the record for `(user_id, event_id)`.
    ///
    /// Soft-deleted rows are included: the unique constraint still covers
    /// them, so a replayed event must resolve to the deleted row rather than
    /// attempt a second insert.
    pub async fn find_by_user_and_event(
        pool: &PgPool,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<AlertRecordRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alert_records WHERE user_id = $1 AND event_id = $2"
        );
        sqlx::query_as::<_, AlertRecordRow>(&query)
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AlertRecordRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alert_records WHERE id = $1");
        sqlx::query_as::<_, AlertRecordRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new record.
    ///
    /// A second insert for the same `(user_id, event_id)` fails on
    /// `uq_alert_records_user_event`.
    pub async fn create(
        pool: &PgPool,
        input: &NewAlertRecord,
    ) -> Result<AlertRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO alert_records \
                (user_id, event_id, caller_number, risk_level, model_score, \
                 transcript, model_analysis, duration_seconds, occurred_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertRecordRow>(&query)
            .bind(&input.user_id)
            .bind(&input.event_id)
            .bind(&input.caller_number)
            .bind(input.risk_level.as_str())
            .bind(input.model_score)
            .bind(&input.transcript)
            .bind(&input.model_analysis)
            .bind(input.duration_seconds)
            .bind(input.occurred_at)
            .fetch_one(pool)
            .await
    }

    /// Record the provider reference of a completed send.
    ///
    /// Returns `true` if the record exists and was updated.
    pub async fn attach_delivery_ref(
        pool: &PgPool,
        id: DbId,
        delivery_ref: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alert_records SET delivery_ref = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(delivery_ref)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a record deleted. Returns `false` if it was already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alert_records SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
