//! Authentication service
//!
//! Verifies an identifier+secret pair against the credential store. Every
//! failure collapses to the same generic error so the login path never
//! reveals whether an account exists.

use log::info;
use std::sync::Arc;

use crate::auth::password::verify_secret;
use crate::error::AuthError;
use crate::store::{CredentialStore, UserRecord};

pub struct AuthenticationService {
    store: Arc<dyn CredentialStore>,
}

impl AuthenticationService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Looks up the identifier (username or email, case-insensitive) and
    /// verifies the secret against the stored hash. Identifier not found and
    /// hash mismatch return the identical `InvalidCredentials` error.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<UserRecord, AuthError> {
        let record = self
            .store
            .find_by_identifier(identifier)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if verify_secret(secret, &record.password_hash) {
            info!("Authentication succeeded for '{}'", record.username);
            Ok(record)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
