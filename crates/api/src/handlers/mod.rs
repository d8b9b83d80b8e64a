//! Request handlers.
//!
//! Handlers validate input, delegate to the orchestrator or a repository in
//! `callguard_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod alerts;
pub mod device_tokens;
pub mod users;
