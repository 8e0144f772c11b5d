//! Configuration management for the authentication core
//!
//! Loads settings from config.toml with AUTH_* environment overrides and
//! validates them before the core starts. Falls back to built-in defaults
//! when no config file is present (tests, demo runs).

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete configuration for the credential store, hashing, and sessions.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Directory holding the record file and the audit log
    pub data_dir: String,

    /// Append-only account record file, one `|`-delimited line per account
    pub users_file: String,

    /// Append-only login audit log
    pub audit_log_file: String,

    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,

    /// Remember-token validity window in days
    pub remember_token_ttl_days: i64,

    /// Minimum accepted password length
    pub min_password_len: usize,

    /// Minimum accepted username length
    pub min_username_len: usize,

    /// Upper bound on any single submitted field
    pub max_field_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            users_file: "users.txt".to_string(),
            audit_log_file: "login_logs.txt".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            remember_token_ttl_days: 30,
            min_password_len: 6,
            min_username_len: 3,
            max_field_len: 512,
        }
    }
}

impl AuthConfig {
    /// Load configuration from config.toml with environment overrides.
    /// Missing file falls back to defaults; a present-but-invalid file is an error.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("AUTH"))
            .build()?;

        let config: AuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Full path to the account record file.
    pub fn users_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.users_file)
    }

    /// Full path to the login audit log.
    pub fn audit_log_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.audit_log_file)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(config::ConfigError::Message(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }

        if self.remember_token_ttl_days <= 0 {
            return Err(config::ConfigError::Message(
                "remember_token_ttl_days must be positive".to_string(),
            ));
        }

        if self.min_password_len == 0 || self.min_username_len == 0 {
            return Err(config::ConfigError::Message(
                "minimum field lengths must be non-zero".to_string(),
            ));
        }

        if self.max_field_len < self.min_password_len {
            return Err(config::ConfigError::Message(
                "max_field_len must not be smaller than min_password_len".to_string(),
            ));
        }

        Ok(())
    }
}
