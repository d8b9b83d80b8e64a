//! Alert handling outcomes returned to the caller.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Why an alert did or did not result in notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertReason {
    Ok,
    BelowThreshold,
    NoContacts,
    DeliveryFailed,
    PartialDelivery,
}

/// Summary of one `handle` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    /// Id of the alert record, as a string.
    pub call_id: String,
    pub notified: bool,
    pub reason: AlertReason,
    pub recipients: usize,
    pub notified_count: usize,
    pub invalid_token_count: usize,
}

impl AlertResponse {
    /// Short-circuit for an event that was already processed.
    pub fn replay(call_id: DbId, notified: bool) -> Self {
        Self {
            call_id: call_id.to_string(),
            notified,
            reason: AlertReason::Ok,
            recipients: 0,
            notified_count: 0,
            invalid_token_count: 0,
        }
    }

    pub fn below_threshold(call_id: DbId) -> Self {
        Self::not_sent(call_id, AlertReason::BelowThreshold)
    }

    pub fn no_contacts(call_id: DbId) -> Self {
        Self::not_sent(call_id, AlertReason::NoContacts)
    }

    fn not_sent(call_id: DbId, reason: AlertReason) -> Self {
        Self {
            call_id: call_id.to_string(),
            notified: false,
            reason,
            recipients: 0,
            notified_count: 0,
            invalid_token_count: 0,
        }
    }
}

/// Classify a completed send.
///
/// | condition                                | reason           | notified |
/// |------------------------------------------|------------------|----------|
/// | `delivered == 0 && invalid > 0`          | DELIVERY_FAILED  | false    |
/// | `invalid > 0 \|\| delivered < recipients` | PARTIAL_DELIVERY | true     |
/// | otherwise                                | OK               | true     |
pub fn classify(call_id: DbId, recipients: usize, delivered: usize, invalid: usize) -> AlertResponse {
    let (reason, notified) = if delivered == 0 && invalid > 0 {
        (AlertReason::DeliveryFailed, false)
    } else if invalid > 0 || delivered < recipients {
        (AlertReason::PartialDelivery, true)
    } else {
        (AlertReason::Ok, true)
    };

    AlertResponse {
        call_id: call_id.to_string(),
        notified,
        reason,
        recipients,
        notified_count: delivered,
        invalid_token_count: invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_delivered_is_ok() {
        let r = classify(1, 3, 3, 0);
        assert_eq!(r.reason, AlertReason::Ok);
        assert!(r.notified);
        assert_eq!(r.notified_count, 3);
    }

    #[test]
    fn all_invalid_is_delivery_failed() {
        let r = classify(1, 3, 0, 3);
        assert_eq!(r.reason, AlertReason::DeliveryFailed);
        assert!(!r.notified);
        assert_eq!(r.invalid_token_count, 3);
    }

    #[test]
    fn some_invalid_is_partial() {
        let r = classify(1, 3, 2, 1);
        assert_eq!(r.reason, AlertReason::PartialDelivery);
        assert!(r.notified);
    }

    #[test]
    fn transient_failures_only_is_partial() {
        // Nothing delivered but nothing invalid either: not DELIVERY_FAILED.
        let r = classify(1, 2, 0, 0);
        assert_eq!(r.reason, AlertReason::PartialDelivery);
        assert!(r.notified);
    }

    #[test]
    fn response_serializes_camel_case() {
        let json = serde_json::to_value(classify(9, 2, 1, 1)).unwrap();
        assert_eq!(json["callId"], "9");
        assert_eq!(json["reason"], "PARTIAL_DELIVERY");
        assert_eq!(json["notifiedCount"], 1);
        assert_eq!(json["invalidTokenCount"], 1);
    }

    #[test]
    fn not_sent_constructors_have_zero_counts() {
        let r = AlertResponse::no_contacts(4);
        assert_eq!(r.reason, AlertReason::NoContacts);
        assert!(!r.notified);
        assert_eq!((r.recipients, r.notified_count, r.invalid_token_count), (0, 0, 0));
        assert_eq!(AlertResponse::below_threshold(4).reason, AlertReason::BelowThreshold);
    }
}
