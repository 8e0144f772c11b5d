//! Session system
//!
//! Ephemeral session state, remember-token continuity, and the login audit
//! log.

pub mod audit;
pub mod manager;
pub mod token;

pub use manager::{Session, SessionManager, SessionState};
pub use token::RememberToken;
