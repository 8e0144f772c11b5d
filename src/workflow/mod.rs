//! Workflow system
//!
//! Registration and login orchestration. These workflows are the only place
//! where validation, storage, authentication, and session concerns compose;
//! nothing else may bypass their ordering.

pub mod login;
pub mod outcome;
pub mod registration;

pub use login::{LoginInput, LoginWorkflow};
pub use outcome::{MessageKind, Outcome};
pub use registration::{RegistrationInput, RegistrationWorkflow};
