//! Error types
//!
//! Defines domain-specific error types for each module of the authentication core.

use std::fmt;
use std::io;

/// Validation module errors, always scoped to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Credential store errors
#[derive(Debug)]
pub enum StorageError {
    /// A record with the same username or email already exists.
    DuplicateIdentity(String),
    /// A field contains the record delimiter and cannot be written safely.
    UnencodableField(String),
    /// The record targeted by an update does not exist.
    RecordNotFound(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DuplicateIdentity(id) => {
                write!(f, "Duplicate username or email: {}", id)
            }
            StorageError::UnencodableField(field) => {
                write!(f, "Field contains record delimiter: {}", field)
            }
            StorageError::RecordNotFound(id) => write!(f, "Record not found: {}", id),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Authentication service errors
#[derive(Debug)]
pub enum AuthError {
    /// Identifier unknown or secret mismatch. Deliberately carries no detail
    /// about which half of the pair was wrong.
    InvalidCredentials,
    /// The hashing primitive itself failed (bad cost, malformed input).
    HashingFailed(String),
}

impl AuthError {
    /// The one message shown for any failed login attempt.
    pub const GENERIC_MESSAGE: &'static str = "Invalid username/email or password";
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "{}", AuthError::GENERIC_MESSAGE),
            AuthError::HashingFailed(msg) => write!(f, "Password hashing failed: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Remember-token errors. Both variants are treated as "no token present"
/// at the session layer; they exist for server-side diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Malformed(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Remember-token expired"),
            TokenError::Malformed(msg) => write!(f, "Malformed remember-token: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// General error that encompasses all module error types
#[derive(Debug)]
pub enum AuthCoreError {
    Validation(ValidationError),
    Storage(StorageError),
    Auth(AuthError),
    Token(TokenError),
    IoError(io::Error),
    ConfigError(String),
}

impl fmt::Display for AuthCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthCoreError::Validation(e) => write!(f, "Validation error: {}", e),
            AuthCoreError::Storage(e) => write!(f, "Storage error: {}", e),
            AuthCoreError::Auth(e) => write!(f, "Authentication error: {}", e),
            AuthCoreError::Token(e) => write!(f, "Token error: {}", e),
            AuthCoreError::IoError(e) => write!(f, "I/O error: {}", e),
            AuthCoreError::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AuthCoreError {}

impl From<ValidationError> for AuthCoreError {
    fn from(error: ValidationError) -> Self {
        AuthCoreError::Validation(error)
    }
}

impl From<StorageError> for AuthCoreError {
    fn from(error: StorageError) -> Self {
        AuthCoreError::Storage(error)
    }
}

impl From<AuthError> for AuthCoreError {
    fn from(error: AuthError) -> Self {
        AuthCoreError::Auth(error)
    }
}

impl From<TokenError> for AuthCoreError {
    fn from(error: TokenError) -> Self {
        AuthCoreError::Token(error)
    }
}

impl From<io::Error> for AuthCoreError {
    fn from(error: io::Error) -> Self {
        AuthCoreError::IoError(error)
    }
}
