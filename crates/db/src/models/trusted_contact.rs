//! Trust link rows.

use callguard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `trusted_contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrustedContact {
    pub id: DbId,
    pub owner_uid: String,
    pub contact_uid: String,
    pub relationship: Option<String>,
    pub created_at: Timestamp,
}
