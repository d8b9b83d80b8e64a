/// Boxed error used where a port implementation wraps a backend failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Failures reported by storage-backed ports.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert collided with a unique constraint.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// The backing store is unreachable or returned an unexpected error.
    #[error("Store backend error: {0}")]
    Backend(#[source] BoxError),
}

/// Failures reported by a [`NotificationGateway`](crate::ports::NotificationGateway).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The message failed precondition checks; nothing was sent.
    #[error("Invalid notification: {0}")]
    InvalidInput(String),

    /// The provider could not be reached.
    #[error("Push transport failed: {0}")]
    Transport(#[source] BoxError),

    /// The provider rejected the whole request.
    #[error("Push provider rejected the request with HTTP {status}")]
    Rejected { status: u16 },

    /// The provider answered with a body we could not interpret.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Fatal errors surfaced by [`AlertOrchestrator::handle`](crate::orchestrator::AlertOrchestrator::handle).
///
/// Domain outcomes (below threshold, no contacts, partial or failed
/// delivery) are never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A duplicate insert was rejected but the winning row could not be re-read.
    #[error("Alert for event {event_id} collided on insert but no existing record was found")]
    UnresolvedDuplicate { event_id: String },
}
