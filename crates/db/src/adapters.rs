//! Postgres implementations of the orchestrator ports.

use async_trait::async_trait;
use callguard_core::alert::{AlertRecord, NewAlertRecord};
use callguard_core::error::StoreError;
use callguard_core::ports::{AlertRecordStore, ContactResolver, TokenJanitor};
use callguard_core::types::DbId;

use crate::models::alert_record::AlertRecordRow;
use crate::repositories::{AlertRecordRepo, DeviceTokenRepo, TrustedContactRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error onto the port error type.
///
/// Unique violations keep their constraint name so callers can tell an
/// idempotency collision from any other failure.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    StoreError::Backend(Box::new(err))
}

fn into_record(row: AlertRecordRow) -> Result<AlertRecord, StoreError> {
    AlertRecord::try_from(row).map_err(|e| StoreError::Backend(Box::new(e)))
}

// ---------------------------------------------------------------------------
// Alert records
// ---------------------------------------------------------------------------

/// [`AlertRecordStore`] backed by `alert_records`.
#[derive(Clone)]
pub struct PgAlertStore {
    pool: DbPool,
}

impl PgAlertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertRecordStore for PgAlertStore {
    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<AlertRecord>, StoreError> {
        AlertRecordRepo::find_by_user_and_event(&self.pool, user_id, event_id)
            .await
            .map_err(store_error)?
            .map(into_record)
            .transpose()
    }

    async fn save(&self, record: NewAlertRecord) -> Result<AlertRecord, StoreError> {
        let row = AlertRecordRepo::create(&self.pool, &record)
            .await
            .map_err(store_error)?;
        into_record(row)
    }

    async fn attach_delivery_ref(&self, id: DbId, delivery_ref: &str) -> Result<(), StoreError> {
        let updated = AlertRecordRepo::attach_delivery_ref(&self.pool, id, delivery_ref)
            .await
            .map_err(store_error)?;
        if !updated {
            tracing::warn!(alert_id = id, "Delivery ref not attached, alert record missing");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Contacts and device tokens
// ---------------------------------------------------------------------------

/// [`ContactResolver`] and [`TokenJanitor`] over `trusted_contacts`,
/// `device_tokens` and `users`.
#[derive(Clone)]
pub struct PgContactDirectory {
    pool: DbPool,
}

impl PgContactDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactResolver for PgContactDirectory {
    async fn tokens_for_trusted_contacts(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        TrustedContactRepo::tokens_for_trusted_contacts(&self.pool, user_id)
            .await
            .map_err(store_error)
    }

    async fn display_name(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        UserRepo::find_display_name(&self.pool, user_id)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl TokenJanitor for PgContactDirectory {
    async fn delete_token(&self, token: &str) -> Result<(), StoreError> {
        let removed = DeviceTokenRepo::delete_by_token(&self.pool, token)
            .await
            .map_err(store_error)?;
        tracing::debug!(removed, "Deleted invalid device token");
        Ok(())
    }
}
