//! Credential store interface
//!
//! Repository seam for account records so the backing engine (flat file,
//! embedded KV, SQL) is swappable without touching workflow logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::store::record::UserRecord;

/// Durable repository of account records. Implementations own uniqueness
/// enforcement and must serialize all mutations.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// True if any stored record matches either given value, case-insensitively.
    async fn exists(&self, username: Option<&str>, email: Option<&str>) -> bool;

    /// Durably persists a new record.
    ///
    /// The uniqueness check and the append run under one exclusive critical
    /// section; two concurrent registrations with the same identity cannot
    /// both succeed. Returns `StorageError::DuplicateIdentity` on conflict.
    async fn append_unique(&self, record: UserRecord) -> Result<(), StorageError>;

    /// First record whose username or email matches case-insensitively.
    async fn find_by_identifier(&self, identifier: &str) -> Option<UserRecord>;

    /// Updates the in-memory last-login timestamp of the named account.
    async fn update_last_login(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}
