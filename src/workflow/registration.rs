//! Registration workflow
//!
//! Orchestrates validation, hashing, the uniqueness+append critical section,
//! and session start into one terminal outcome. This is the only composition
//! point for those concerns on the registration path.

use chrono::Utc;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::auth::password::hash_secret;
use crate::config::AuthConfig;
use crate::error::handlers::{handle_error, storage_failure_message};
use crate::error::{AuthCoreError, StorageError};
use crate::session::SessionManager;
use crate::store::{CredentialStore, UserRecord};
use crate::validation::{ValidationContext, ValidationEngine};
use crate::workflow::outcome::{MessageKind, Outcome};

/// One registration form submission.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: String,
    pub hobbies: Vec<String>,
    pub country: String,
}

pub struct RegistrationWorkflow {
    engine: ValidationEngine,
    store: Arc<dyn CredentialStore>,
    sessions: Arc<SessionManager>,
    bcrypt_cost: u32,
}

impl RegistrationWorkflow {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        sessions: Arc<SessionManager>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            engine: ValidationEngine::new(config),
            store,
            sessions,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub async fn run(&self, input: RegistrationInput) -> Outcome {
        // Authoritative validation pass, uniqueness checks included.
        let hobbies_raw = input.hobbies.join(",");
        let fields: [(&str, &str); 8] = [
            ("fullName", &input.full_name),
            ("email", &input.email),
            ("username", &input.username),
            ("password", &input.password),
            ("confirmPassword", &input.confirm_password),
            ("gender", &input.gender),
            ("hobbies", &hobbies_raw),
            ("country", &input.country),
        ];
        let ctx = ValidationContext {
            store: Some(self.store.as_ref()),
            password: Some(&input.password),
        };
        let report = self.engine.validate_form(&fields, &ctx).await;
        if !report.valid() {
            return Outcome::ValidationFailed {
                field_errors: report.into_field_errors(),
            };
        }

        let password_hash = match hash_secret(&input.password, self.bcrypt_cost) {
            Ok(hash) => hash,
            Err(e) => {
                handle_error(&AuthCoreError::Auth(e));
                return Outcome::StorageFailed {
                    message: storage_failure_message().to_string(),
                };
            }
        };

        let now = Utc::now();
        let record = UserRecord {
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_string(),
            username: input.username.trim().to_string(),
            password_hash,
            gender: input.gender.trim().to_string(),
            hobbies: input.hobbies,
            country: input.country.trim().to_string(),
            join_date: now,
            last_login: now,
        };
        let username = record.username.clone();

        // The store holds one exclusive guard across the re-check and the
        // append, so a concurrent duplicate loses here even after the
        // validation pass above saw no conflict.
        match self.store.append_unique(record).await {
            Ok(()) => {}
            Err(StorageError::DuplicateIdentity(_)) => {
                let mut field_errors = BTreeMap::new();
                field_errors.insert(
                    "form".to_string(),
                    "Username or email already exists.".to_string(),
                );
                return Outcome::ValidationFailed { field_errors };
            }
            Err(e) => {
                handle_error(&AuthCoreError::Storage(e));
                return Outcome::StorageFailed {
                    message: storage_failure_message().to_string(),
                };
            }
        }

        info!("Registered new account '{}'", username);

        let stored = match self.store.find_by_identifier(&username).await {
            Some(record) => record,
            None => {
                // Appended a moment ago; absence means the store is broken.
                handle_error(&AuthCoreError::Storage(StorageError::RecordNotFound(
                    username,
                )));
                return Outcome::StorageFailed {
                    message: storage_failure_message().to_string(),
                };
            }
        };
        let session = self.sessions.start(&stored).await;

        Outcome::Success {
            redirect_target: "login".to_string(),
            message: "Account created".to_string(),
            kind: MessageKind::Success,
            session,
            remember_token: None,
        }
    }
}
