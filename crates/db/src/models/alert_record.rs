//! Alert record rows.

use callguard_core::alert::AlertRecord;
use callguard_core::error::CoreError;
use callguard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `alert_records` table.
///
/// `risk_level` is kept as the stored text; convert with `AlertRecord::try_from`.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRecordRow {
    pub id: DbId,
    pub user_id: String,
    pub event_id: String,
    pub caller_number: String,
    pub risk_level: String,
    pub model_score: f64,
    pub transcript: Option<String>,
    pub model_analysis: Option<String>,
    pub duration_seconds: i32,
    pub occurred_at: Timestamp,
    pub delivery_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl TryFrom<AlertRecordRow> for AlertRecord {
    type Error = CoreError;

    fn try_from(row: AlertRecordRow) -> Result<Self, Self::Error> {
        Ok(AlertRecord {
            risk_level: row.risk_level.parse()?,
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            caller_number: row.caller_number,
            model_score: row.model_score,
            transcript: row.transcript,
            model_analysis: row.model_analysis,
            duration_seconds: row.duration_seconds,
            occurred_at: row.occurred_at,
            delivery_ref: row.delivery_ref,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}
