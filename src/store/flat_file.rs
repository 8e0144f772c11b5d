//! Flat-file credential store
//!
//! Append-only `users.txt` backend with an in-memory mirror. Lookups are
//! linear scans over the mirror; indexing is an accepted non-goal at this
//! scale. One `RwLock` guards both the mirror and the file handle, so the
//! uniqueness check and the append of a new record happen under a single
//! write guard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::record::UserRecord;
use crate::store::repository::CredentialStore;

struct StoreInner {
    records: Vec<UserRecord>,
    file: File,
}

/// `CredentialStore` backed by one `|`-delimited line per account.
pub struct FlatFileStore {
    inner: RwLock<StoreInner>,
    path: PathBuf,
}

impl FlatFileStore {
    /// Opens (or creates) the record file and loads the mirror. Lines with
    /// fewer than 8 fields or an unreadable timestamp are skipped with a
    /// warning, matching the tolerance of the record format.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(&file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match UserRecord::parse_line(&line) {
                Some(record) => records.push(record),
                None => warn!(
                    "Skipping malformed record at {}:{}",
                    path.display(),
                    index + 1
                ),
            }
        }

        info!("Loaded {} account(s) from {}", records.len(), path.display());

        Ok(Self {
            inner: RwLock::new(StoreInner { records, file }),
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conflict(records: &[UserRecord], record: &UserRecord) -> bool {
        records
            .iter()
            .any(|r| r.matches_username(&record.username) || r.matches_email(&record.email))
    }
}

#[async_trait]
impl CredentialStore for FlatFileStore {
    async fn exists(&self, username: Option<&str>, email: Option<&str>) -> bool {
        let inner = self.inner.read().await;
        inner.records.iter().any(|r| {
            username.is_some_and(|u| r.matches_username(u))
                || email.is_some_and(|e| r.matches_email(e))
        })
    }

    async fn append_unique(&self, record: UserRecord) -> Result<(), StorageError> {
        if let Some(field) = record.unencodable_field() {
            return Err(StorageError::UnencodableField(field.to_string()));
        }

        // Exclusive guard spans the existence check and the append; this is
        // the critical section that keeps duplicate registrations out.
        let mut inner = self.inner.write().await;

        if Self::conflict(&inner.records, &record) {
            return Err(StorageError::DuplicateIdentity(record.username.clone()));
        }

        // The line is formatted up front and written in one call, so a failed
        // write leaves neither a partial line nor a stale mirror entry.
        let line = format!("{}\n", record.to_line());
        inner.file.write_all(line.as_bytes())?;
        inner.file.flush()?;

        inner.records.push(record);
        Ok(())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Option<UserRecord> {
        let inner = self.inner.read().await;
        inner
            .records
            .iter()
            .find(|r| r.matches_identifier(identifier))
            .cloned()
    }

    async fn update_last_login(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        match inner
            .records
            .iter_mut()
            .find(|r| r.matches_username(username))
        {
            Some(record) => {
                record.last_login = at;
                Ok(())
            }
            None => Err(StorageError::RecordNotFound(username.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;

    fn record(username: &str, email: &str) -> UserRecord {
        let ts = NaiveDateTime::parse_from_str("2026-03-04 10:00:00", TIMESTAMP_FORMAT)
            .unwrap()
            .and_utc();
        UserRecord {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "$2b$04$hashhashhashhashhashha".to_string(),
            gender: "other".to_string(),
            hobbies: vec!["reading".to_string()],
            country: "Norway".to_string(),
            join_date: ts,
            last_login: ts,
        }
    }

    #[tokio::test]
    async fn test_append_then_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();

        store
            .append_unique(record("alice", "alice@x.com"))
            .await
            .unwrap();

        let found = store.find_by_identifier("ALICE").await.unwrap();
        assert_eq!(found.email, "alice@x.com");
        let by_email = store.find_by_identifier("Alice@X.COM").await.unwrap();
        assert_eq!(by_email.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();

        store
            .append_unique(record("alice", "alice@x.com"))
            .await
            .unwrap();
        let err = store
            .append_unique(record("Alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateIdentity(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();

        store
            .append_unique(record("alice", "alice@x.com"))
            .await
            .unwrap();
        let err = store
            .append_unique(record("alice2", "ALICE@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateIdentity(_)));
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");

        {
            let store = FlatFileStore::open(&path).unwrap();
            store
                .append_unique(record("bob", "bob@x.com"))
                .await
                .unwrap();
        }

        let reopened = FlatFileStore::open(&path).unwrap();
        assert!(reopened.exists(Some("bob"), None).await);
        assert!(!reopened.exists(Some("carol"), None).await);
    }

    #[tokio::test]
    async fn test_malformed_lines_skipped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(
            &path,
            "garbage line\nA B|a@x.com|abe|hash|male|chess|US|2026-01-01 00:00:00\n",
        )
        .unwrap();

        let store = FlatFileStore::open(&path).unwrap();
        assert!(store.exists(Some("abe"), None).await);
        assert!(store.find_by_identifier("garbage").await.is_none());
    }

    #[tokio::test]
    async fn test_delimiter_field_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();

        let mut bad = record("eve", "eve@x.com");
        bad.full_name = "Eve|Adams".to_string();
        let err = store.append_unique(bad).await.unwrap_err();
        assert!(matches!(err, StorageError::UnencodableField(_)));
        assert!(!store.exists(Some("eve"), None).await);
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();
        store
            .append_unique(record("dora", "dora@x.com"))
            .await
            .unwrap();

        let at = Utc::now();
        store.update_last_login("DORA", at).await.unwrap();
        let found = store.find_by_identifier("dora").await.unwrap();
        assert_eq!(found.last_login, at);

        let err = store.update_last_login("nobody", at).await.unwrap_err();
        assert!(matches!(err, StorageError::RecordNotFound(_)));
    }
}
