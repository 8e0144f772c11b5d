//! Workflow outcome types
//!
//! The typed contract consumed by the presentation layer. Every workflow run
//! terminates in exactly one of these.

use std::collections::BTreeMap;

use crate::session::{RememberToken, Session};

/// Message taxonomy for rendered feedback. Success and Info auto-dismiss
/// after a fixed interval; Error persists until the user acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl MessageKind {
    pub fn auto_dismiss(&self) -> bool {
        matches!(self, MessageKind::Success | MessageKind::Info)
    }
}

/// Terminal result of one workflow execution.
#[derive(Debug)]
pub enum Outcome {
    Success {
        redirect_target: String,
        message: String,
        kind: MessageKind,
        session: Session,
        /// Present when the login asked to be remembered.
        remember_token: Option<RememberToken>,
    },
    /// Field-scoped failures; registration is refused entirely.
    ValidationFailed {
        field_errors: BTreeMap<String, String>,
    },
    /// Generic, identifier-agnostic login refusal.
    AuthenticationFailed { message: String },
    /// Store read/write failure; retryable by resubmission.
    StorageFailed { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Session for successful outcomes, None otherwise.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Outcome::Success { session, .. } => Some(session),
            _ => None,
        }
    }
}
