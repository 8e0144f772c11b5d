pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod validation;
pub mod workflow;

pub use config::AuthConfig;
pub use session::{SessionManager, SessionState};
pub use store::FlatFileStore;
pub use workflow::{LoginWorkflow, RegistrationWorkflow};
