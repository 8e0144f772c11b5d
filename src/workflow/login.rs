//! Login workflow
//!
//! Orchestrates required-field checks, authentication, and session start.
//! Also owns the remember-token resume path for requests arriving with no
//! active session.

use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::auth::AuthenticationService;
use crate::error::AuthError;
use crate::session::{RememberToken, Session, SessionManager};
use crate::validation::ValidationEngine;
use crate::workflow::outcome::{MessageKind, Outcome};

/// One login form submission.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Username or email.
    pub identifier: String,
    pub password: String,
    /// Asked to stay signed in across sessions.
    pub remember: bool,
}

pub struct LoginWorkflow {
    auth: AuthenticationService,
    sessions: Arc<SessionManager>,
}

impl LoginWorkflow {
    pub fn new(auth: AuthenticationService, sessions: Arc<SessionManager>) -> Self {
        Self { auth, sessions }
    }

    pub async fn run(&self, input: LoginInput) -> Outcome {
        // Required fields only; no uniqueness or format rules on this path.
        let mut field_errors = BTreeMap::new();
        for (field, value) in [
            ("username", input.identifier.as_str()),
            ("password", input.password.as_str()),
        ] {
            let verdict = ValidationEngine::validate_required(field, value);
            if let Some(message) = verdict.message {
                field_errors.insert(field.to_string(), message);
            }
        }
        if !field_errors.is_empty() {
            return Outcome::ValidationFailed { field_errors };
        }

        let user = match self
            .auth
            .authenticate(input.identifier.trim(), &input.password)
            .await
        {
            Ok(user) => user,
            Err(_) => {
                return Outcome::AuthenticationFailed {
                    message: AuthError::GENERIC_MESSAGE.to_string(),
                };
            }
        };

        let session = self.sessions.start(&user).await;
        let remember_token = input
            .remember
            .then(|| self.sessions.issue_remember_token(&user.username));

        Outcome::Success {
            redirect_target: "welcome".to_string(),
            message: format!("Welcome back, {}!", user.full_name),
            kind: MessageKind::Success,
            session,
            remember_token,
        }
    }

    /// Re-establishes a session from a client-held remember-token without
    /// re-prompting for a secret. Expired, malformed, or unknown tokens leave
    /// the caller Anonymous.
    pub async fn resume(&self, token: &RememberToken) -> Option<Session> {
        let user = self.sessions.resolve_remember_token(token).await?;
        info!("Resuming session for '{}' via remember-token", user.username);
        Some(self.sessions.start(&user).await)
    }
}
