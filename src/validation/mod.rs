//! Validation system
//!
//! Field-level and form-level rule evaluation, run identically at the
//! boundary and authoritatively before any mutation.

pub mod results;
pub mod rules;

pub use results::{FieldVerdict, FormReport};
pub use rules::{ValidationContext, ValidationEngine};
