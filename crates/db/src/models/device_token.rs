//! Device token rows.

use callguard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `device_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    pub id: DbId,
    pub user_id: String,
    pub device_id: String,
    pub token: String,
    pub platform: String,
    pub app_version: Option<String>,
    /// Epoch milliseconds of the last registration.
    pub last_updated: i64,
    pub created_at: Timestamp,
}
