//! Scam-call alert types: the inbound event and the persisted record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold::ensure_score;
use crate::types::{DbId, Timestamp};

/// Risk classification assigned to a call by the detection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    /// Canonical upper-case name, as stored in `alert_records.risk_level`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "GREEN",
            RiskLevel::Yellow => "YELLOW",
            RiskLevel::Red => "RED",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GREEN" => Ok(RiskLevel::Green),
            "YELLOW" => Ok(RiskLevel::Yellow),
            "RED" => Ok(RiskLevel::Red),
            other => Err(CoreError::Validation(format!("Unknown risk level: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound event
// ---------------------------------------------------------------------------

/// One call reported by the client after the detection model scored it.
///
/// `event_id` is generated by the client and acts as the idempotency key
/// together with the reporting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamEvent {
    pub event_id: String,
    /// Caller's number, E.164.
    pub caller_number: String,
    pub risk_level: RiskLevel,
    pub model_score: f64,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub model_analysis: Option<String>,
    pub occurred_at: Timestamp,
    #[serde(default)]
    pub duration_seconds: i32,
}

impl ScamEvent {
    /// Check the event's fields before it enters the orchestrator.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.event_id.trim().is_empty() {
            return Err(CoreError::Validation("eventId must not be empty".into()));
        }
        if self.caller_number.trim().is_empty() {
            return Err(CoreError::Validation(
                "callerNumber must not be empty".into(),
            ));
        }
        ensure_score(self.model_score, "modelScore")?;
        if self.duration_seconds < 0 {
            return Err(CoreError::Validation(format!(
                "durationSeconds must be non-negative, got {}",
                self.duration_seconds
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// Insert payload for an alert record; the store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlertRecord {
    pub user_id: String,
    pub event_id: String,
    pub caller_number: String,
    pub risk_level: RiskLevel,
    pub model_score: f64,
    pub transcript: Option<String>,
    pub model_analysis: Option<String>,
    pub duration_seconds: i32,
    pub occurred_at: Timestamp,
}

impl NewAlertRecord {
    pub fn from_event(user_id: &str, event: &ScamEvent) -> Self {
        Self {
            user_id: user_id.to_string(),
            event_id: event.event_id.clone(),
            caller_number: event.caller_number.clone(),
            risk_level: event.risk_level,
            model_score: event.model_score,
            transcript: event.transcript.clone(),
            model_analysis: event.model_analysis.clone(),
            duration_seconds: event.duration_seconds,
            occurred_at: event.occurred_at,
        }
    }
}

/// One stored alert, unique per `(user_id, event_id)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub id: DbId,
    pub user_id: String,
    pub event_id: String,
    pub caller_number: String,
    pub risk_level: RiskLevel,
    pub model_score: f64,
    pub transcript: Option<String>,
    pub model_analysis: Option<String>,
    pub duration_seconds: i32,
    pub occurred_at: Timestamp,
    /// Provider message id, or `batch:<success>/<total>`; set after a send.
    pub delivery_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
