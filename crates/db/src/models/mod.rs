//! Row structs for the callguard tables.
//!
//! Each submodule holds a `FromRow` entity matching the table and, where the
//! core crate owns the domain type, the conversion into it.

pub mod alert_record;
pub mod device_token;
pub mod trusted_contact;
pub mod user;
