//! Login audit log
//!
//! Append-only record of successful authentications, one line per event:
//! `YYYY-MM-DD HH:MM:SS - User '<username>' logged in`

use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::store::record::TIMESTAMP_FORMAT;

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Appends one login event. The line is written in a single call.
    pub fn record_login(&self, username: &str, at: DateTime<Utc>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let line = format!(
            "{} - User '{}' logged in\n",
            at.format(TIMESTAMP_FORMAT),
            username
        );
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
