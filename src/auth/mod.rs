//! Authentication system
//!
//! One-way password hashing and identifier+secret verification against the
//! credential store.

pub mod password;
pub mod service;

pub use service::AuthenticationService;
