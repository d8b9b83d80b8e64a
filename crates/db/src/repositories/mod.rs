//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod alert_record_repo;
pub mod device_token_repo;
pub mod trusted_contact_repo;
pub mod user_repo;

pub use alert_record_repo::AlertRecordRepo;
pub use device_token_repo::DeviceTokenRepo;
pub use trusted_contact_repo::TrustedContactRepo;
pub use user_repo::UserRepo;
