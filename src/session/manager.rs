//! Session management
//!
//! Issues, inspects, and revokes the two kinds of authentication state:
//! the ephemeral in-process session and the optional long-lived
//! remember-token. The session context is an explicit value threaded through
//! workflow calls; there is no ambient global.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::{AuthCoreError, handlers::handle_error};
use crate::session::audit::AuditLog;
use crate::session::token::RememberToken;
use crate::store::{CredentialStore, UserRecord, UserView};

/// Authentication state exposed to the presentation layer.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserView,
    pub login_time: DateTime<Utc>,
}

/// Explicit session context for one browsing context.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn logged_in(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }
}

pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    audit: AuditLog,
    token_ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            audit: AuditLog::new(&config.audit_log_path()),
            token_ttl: Duration::days(config.remember_token_ttl_days),
        }
    }

    /// Materializes a session for an authenticated user. Records the login
    /// event in the audit log and updates `lastLogin` on the record; neither
    /// side effect can fail the login itself, their causes go to diagnostics.
    pub async fn start(&self, user: &UserRecord) -> Session {
        let now = Utc::now();

        if let Err(e) = self.audit.record_login(&user.username, now) {
            handle_error(&AuthCoreError::Storage(e));
        }
        if let Err(e) = self.store.update_last_login(&user.username, now).await {
            handle_error(&AuthCoreError::Storage(e));
        }

        info!("Session started for '{}'", user.username);

        let mut view = user.view();
        view.last_login = now;
        Session {
            user: view,
            login_time: now,
        }
    }

    /// Destroys session state and returns the already-expired token value the
    /// presentation layer must overwrite the client-held token with.
    pub fn destroy(&self, state: &mut SessionState) -> RememberToken {
        if let SessionState::Authenticated(session) = state {
            info!("Session destroyed for '{}'", session.user.username);
        }
        *state = SessionState::Anonymous;
        self.expired_token()
    }

    /// Issues a remember-token for the given username, valid for the
    /// configured window from now.
    pub fn issue_remember_token(&self, username: &str) -> RememberToken {
        RememberToken::issue(username, Utc::now())
    }

    /// A token that is already past the validity window, used to invalidate
    /// the client-held value at logout.
    pub fn expired_token(&self) -> RememberToken {
        RememberToken::issue("", Utc::now() - self.token_ttl - Duration::hours(1))
    }

    /// Interprets a client-held remember-token. Expired or malformed tokens
    /// are treated as absent: the caller stays Anonymous and the cause is
    /// logged server-side only.
    pub async fn resolve_remember_token(&self, token: &RememberToken) -> Option<UserRecord> {
        let username = match token.validate(Utc::now(), self.token_ttl) {
            Ok(username) => username,
            Err(e) => {
                warn!("Remember-token rejected: {}", e);
                return None;
            }
        };

        match self.store.find_by_identifier(&username).await {
            Some(record) if record.matches_username(&username) => Some(record),
            _ => {
                warn!("Remember-token names unknown user '{}'", username);
                None
            }
        }
    }
}
