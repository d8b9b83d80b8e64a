//! Callguard domain core.
//!
//! Everything needed to turn a reported scam-call event into push
//! notifications for the caller's trusted contacts, independent of any
//! storage engine or push provider:
//!
//! - [`threshold::ThresholdGate`]: decides whether an event is worth propagating.
//! - [`composer`]: builds the notification title, body, and data payload.
//! - [`delivery`]: outbound message and per-target delivery result types.
//! - [`ports`]: traits the orchestrator consumes (store, contacts, gateway, janitor).
//! - [`orchestrator::AlertOrchestrator`]: the end-to-end flow.
//! - [`outcome`]: response reasons and the final outcome classification.

pub mod alert;
pub mod composer;
pub mod delivery;
pub mod device;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod ports;
pub mod profile;
pub mod threshold;
pub mod types;
