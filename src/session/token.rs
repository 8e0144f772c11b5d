//! Remember-token encoding
//!
//! Client-held credential continuity artifact: base64 over
//! `username:issuedAtEpochSeconds`. The encoding is opaque but carries no
//! cryptographic proof of authenticity; a forged token with a real username
//! passes decoding. Known gap, kept to preserve the documented token format.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::TokenError;

/// Encoded remember-token as handed to and received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberToken(String);

impl RememberToken {
    /// Issues a fresh token for a username at the given instant.
    pub fn issue(username: &str, issued_at: DateTime<Utc>) -> Self {
        let raw = format!("{}:{}", username, issued_at.timestamp());
        Self(STANDARD.encode(raw))
    }

    /// Wraps an encoded value received from the client.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded value the presentation layer persists client-side.
    pub fn encoded(&self) -> &str {
        &self.0
    }

    /// Decodes into `(username, issued_at)` without judging validity.
    pub fn decode(&self) -> Result<(String, DateTime<Utc>), TokenError> {
        let bytes = STANDARD
            .decode(&self.0)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let raw =
            String::from_utf8(bytes).map_err(|e| TokenError::Malformed(e.to_string()))?;

        let (username, epoch) = raw
            .split_once(':')
            .ok_or_else(|| TokenError::Malformed("missing separator".to_string()))?;
        if username.is_empty() {
            return Err(TokenError::Malformed("empty username".to_string()));
        }

        let epoch: i64 = epoch
            .parse()
            .map_err(|_| TokenError::Malformed("bad timestamp".to_string()))?;
        let issued_at = Utc
            .timestamp_opt(epoch, 0)
            .single()
            .ok_or_else(|| TokenError::Malformed("timestamp out of range".to_string()))?;

        Ok((username.to_string(), issued_at))
    }

    /// Decodes and enforces the validity window: valid while
    /// `now - issued_at < ttl`. Expired tokens must be rejected and cleared.
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let (username, issued_at) = self.decode()?;
        if now.signed_duration_since(issued_at) < ttl {
            Ok(username)
        } else {
            Err(TokenError::Expired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode() {
        let issued = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let token = RememberToken::issue("alice", issued);
        let (username, at) = token.decode().unwrap();
        assert_eq!(username, "alice");
        assert_eq!(at, issued);
    }

    #[test]
    fn test_fresh_token_validates() {
        let now = Utc::now();
        let token = RememberToken::issue("alice", now - Duration::days(29));
        assert_eq!(token.validate(now, Duration::days(30)).unwrap(), "alice");
    }

    #[test]
    fn test_token_past_window_is_expired() {
        let now = Utc::now();
        let token = RememberToken::issue("alice", now - Duration::days(31));
        assert_eq!(
            token.validate(now, Duration::days(30)).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_exact_boundary_is_expired() {
        let now = Utc::now();
        let token = RememberToken::issue("alice", now - Duration::days(30));
        assert_eq!(
            token.validate(now, Duration::days(30)).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        for bad in ["%%%not-base64%%%", "", "bm9zZXBhcmF0b3I=", "OjEyMzQ1"] {
            let token = RememberToken::from_encoded(bad);
            assert!(matches!(
                token.decode().unwrap_err(),
                TokenError::Malformed(_)
            ));
        }
    }
}
