//! Credential storage system
//!
//! Durable, append-only repository of account records. Owns uniqueness
//! enforcement and lookup.

pub mod flat_file;
pub mod record;
pub mod repository;

pub use flat_file::FlatFileStore;
pub use record::{UserRecord, UserView};
pub use repository::CredentialStore;
