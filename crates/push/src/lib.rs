//! Push delivery through Firebase Cloud Messaging.
//!
//! [`FcmGateway`] implements the core
//! [`NotificationGateway`](callguard_core::ports::NotificationGateway) port
//! over the FCM HTTP API. [`FcmConfig`] loads its settings from the
//! environment.

pub mod config;
pub mod fcm;

pub use config::FcmConfig;
pub use fcm::FcmGateway;
