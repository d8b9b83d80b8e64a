//! Outbound push message and per-target delivery results.
//!
//! [`NotificationMessage`] is what a gateway sends; [`DeliveryResult`] is
//! what it reports back, one [`TargetDelivery`] per token. Gateways build
//! the result with [`DeliveryResult::from_deliveries`] so the aggregate
//! counts and the dead-token list are always derived the same way.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::GatewayError;

/// Provider error codes meaning the registration itself is gone.
///
/// Covers both the HTTP v1 status names and the legacy API spellings.
/// Any other code is treated as transient.
pub const DEAD_REGISTRATION_CODES: &[&str] = &[
    "UNREGISTERED",
    "INVALID_ARGUMENT",
    "NotRegistered",
    "InvalidRegistration",
];

/// Whether a provider error code marks the token for deletion.
pub fn is_dead_registration(error_code: &str) -> bool {
    DEAD_REGISTRATION_CODES.contains(&error_code)
}

// ---------------------------------------------------------------------------
// NotificationMessage
// ---------------------------------------------------------------------------

/// A composed push notification addressed to one or more device tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    /// Flat machine-readable payload for client deep-linking.
    pub data: BTreeMap<String, String>,
    /// Target tokens, in resolution order, without duplicates.
    pub targets: Vec<String>,
}

impl NotificationMessage {
    /// Preconditions every gateway checks before touching the network.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.targets.is_empty() {
            return Err(GatewayError::InvalidInput("no target tokens".into()));
        }
        if self.title.trim().is_empty() {
            return Err(GatewayError::InvalidInput("title is missing".into()));
        }
        if self.body.trim().is_empty() {
            return Err(GatewayError::InvalidInput("body is missing".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Delivery results
// ---------------------------------------------------------------------------

/// Outcome of sending to a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDelivery {
    pub token: String,
    pub success: bool,
    pub message_id: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl TargetDelivery {
    pub fn delivered(token: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            success: true,
            message_id: Some(message_id.into()),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failed(
        token: impl Into<String>,
        error_code: impl Into<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            token: token.into(),
            success: false,
            message_id: None,
            error_code: Some(error_code.into()),
            error_message,
        }
    }

    /// Failed with a code meaning the registration is dead.
    pub fn is_invalid(&self) -> bool {
        !self.success && self.error_code.as_deref().is_some_and(is_dead_registration)
    }
}

/// Aggregate outcome of one send call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    pub per_target: Vec<TargetDelivery>,
    /// Tokens the provider reported as permanently undeliverable.
    pub invalid_tokens: Vec<String>,
}

impl DeliveryResult {
    pub fn from_deliveries(per_target: Vec<TargetDelivery>) -> Self {
        let total = per_target.len();
        let success = per_target.iter().filter(|d| d.success).count();
        let invalid_tokens = per_target
            .iter()
            .filter(|d| d.is_invalid())
            .map(|d| d.token.clone())
            .collect();

        Self {
            total,
            success,
            failure: total - success,
            per_target,
            invalid_tokens,
        }
    }

    /// Traceable reference stored on the alert record.
    ///
    /// The real provider id for a successful single-target send, otherwise
    /// `batch:<success>/<total>`.
    pub fn delivery_ref(&self) -> String {
        if let [only] = self.per_target.as_slice() {
            if let (true, Some(id)) = (only.success, only.message_id.as_ref()) {
                return id.clone();
            }
        }
        format!("batch:{}/{}", self.success, self.total)
    }
}
