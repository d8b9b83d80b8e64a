//! Collaborator traits consumed by the [`AlertOrchestrator`](crate::orchestrator::AlertOrchestrator).
//!
//! Implementations live outside the core: Postgres adapters in
//! `callguard-db`, the FCM gateway in `callguard-push`, and in-memory fakes
//! in tests.

use async_trait::async_trait;

use crate::alert::{AlertRecord, NewAlertRecord};
use crate::delivery::{DeliveryResult, NotificationMessage};
use crate::error::{GatewayError, StoreError};
use crate::types::DbId;

/// Idempotent persistence of alert records.
#[async_trait]
pub trait AlertRecordStore: Send + Sync {
    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<AlertRecord>, StoreError>;

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when a record for the same
    /// `(user_id, event_id)` already exists.
    async fn save(&self, record: NewAlertRecord) -> Result<AlertRecord, StoreError>;

    async fn attach_delivery_ref(&self, id: DbId, delivery_ref: &str) -> Result<(), StoreError>;
}

/// Maps a user to the push targets of their trusted contacts.
#[async_trait]
pub trait ContactResolver: Send + Sync {
    /// One entry per registered device of every trusted contact.
    async fn tokens_for_trusted_contacts(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// Name to show contacts for the protected user, if one is known.
    async fn display_name(&self, _user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
}

/// Sends a composed message to its targets.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<DeliveryResult, GatewayError>;
}

/// Removes device registrations the provider reported as dead.
#[async_trait]
pub trait TokenJanitor: Send + Sync {
    /// Deleting a token that does not exist is not an error.
    async fn delete_token(&self, token: &str) -> Result<(), StoreError>;
}
