//! Error handlers
//!
//! Server-side diagnostic sink for errors whose user-facing surface is a
//! generic message.

use crate::error::types::AuthCoreError;
use log::error;

/// Record an error in the server diagnostics. The original cause stays here;
/// callers surface only the generic user-facing message.
pub fn handle_error(err: &AuthCoreError) {
    error!("Auth core error: {}", err);
}

/// Message shown for any storage failure. Resubmission is the only retry path.
pub fn storage_failure_message() -> &'static str {
    "Failed to save user data. Please try again."
}
