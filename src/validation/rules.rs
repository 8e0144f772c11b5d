//! Validation engine
//!
//! Pure rule evaluation for field-level and form-level constraints. The same
//! rules run at the boundary for fast feedback and authoritatively before any
//! mutation; the engine holds no mutable state, so re-validating identical
//! input always yields an identical verdict.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::AuthConfig;
use crate::store::CredentialStore;
use crate::validation::results::{FieldVerdict, FormReport};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern"));

/// Inputs a field rule may consult beyond its own raw value.
#[derive(Default)]
pub struct ValidationContext<'a> {
    /// Present in the registration context; enables uniqueness checks.
    pub store: Option<&'a dyn CredentialStore>,
    /// Sibling password value, consulted by `confirmPassword`.
    pub password: Option<&'a str>,
}

/// Field-level and form-level rule evaluation.
pub struct ValidationEngine {
    min_username_len: usize,
    min_password_len: usize,
    max_field_len: usize,
}

impl ValidationEngine {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_username_len: config.min_username_len,
            min_password_len: config.min_password_len,
            max_field_len: config.max_field_len,
        }
    }

    /// Human-readable label for a field name, used in required-field messages.
    pub fn label(field: &str) -> &'static str {
        match field {
            "fullName" => "Full Name",
            "email" => "Email",
            "username" => "Username",
            "password" => "Password",
            "confirmPassword" => "Confirm Password",
            "gender" => "Gender",
            "hobbies" => "Hobbies",
            "country" => "Country",
            _ => "Field",
        }
    }

    /// Required-field check alone, used by the login path where no semantic
    /// rules apply to the identifier.
    pub fn validate_required(field: &str, raw: &str) -> FieldVerdict {
        if raw.trim().is_empty() {
            FieldVerdict::fail(format!("{} is required.", Self::label(field)))
        } else {
            FieldVerdict::pass()
        }
    }

    /// Evaluates the rules for one field, first failure wins:
    /// required-field check, then the per-field semantic rule (which for
    /// email and username includes a store-backed uniqueness check when the
    /// context carries a store).
    pub async fn validate_field(
        &self,
        field: &str,
        raw: &str,
        ctx: &ValidationContext<'_>,
    ) -> FieldVerdict {
        // Passwords keep their exact bytes; everything else is trimmed first.
        let is_secret = field == "password" || field == "confirmPassword";
        let value = if is_secret { raw } else { raw.trim() };

        // Hobbies are a checkbox group, not a required input; its own rule
        // carries the message for an empty selection.
        if field != "hobbies" && value.is_empty() {
            return FieldVerdict::fail(format!("{} is required.", Self::label(field)));
        }

        if value.len() > self.max_field_len {
            return FieldVerdict::fail(format!("{} is too long.", Self::label(field)));
        }

        if !is_secret && value.contains(['\r', '\n', '\0']) {
            return FieldVerdict::fail(format!(
                "{} contains invalid characters.",
                Self::label(field)
            ));
        }

        match field {
            "fullName" => {
                if value.chars().count() < 2 {
                    return FieldVerdict::fail("Full name must be at least 2 characters long.");
                }
            }
            "email" => {
                if !EMAIL_RE.is_match(value) {
                    return FieldVerdict::fail("Please enter a valid email address.");
                }
                if let Some(store) = ctx.store {
                    if store.exists(None, Some(value)).await {
                        return FieldVerdict::fail("This email is already registered.");
                    }
                }
            }
            "username" => {
                if value.chars().count() < self.min_username_len {
                    return FieldVerdict::fail(format!(
                        "Username must be at least {} characters long.",
                        self.min_username_len
                    ));
                }
                if !USERNAME_RE.is_match(value) {
                    return FieldVerdict::fail(
                        "Username can only contain letters, numbers, and underscores.",
                    );
                }
                if let Some(store) = ctx.store {
                    if store.exists(Some(value), None).await {
                        return FieldVerdict::fail("This username is already taken.");
                    }
                }
            }
            "password" => {
                if value.chars().count() < self.min_password_len {
                    return FieldVerdict::fail(format!(
                        "Password must be at least {} characters long.",
                        self.min_password_len
                    ));
                }
            }
            "confirmPassword" => {
                if ctx.password != Some(value) {
                    return FieldVerdict::fail("Passwords do not match.");
                }
            }
            "hobbies" => {
                if value.split(',').all(|h| h.trim().is_empty()) {
                    return FieldVerdict::fail("Please select at least one hobby.");
                }
            }
            // gender, country: presence is the whole rule
            _ => {}
        }

        FieldVerdict::pass()
    }

    /// Runs every field rule and aggregates failures. This pass is the
    /// authoritative one; it must hold even if boundary checks were bypassed
    /// or tampered with.
    pub async fn validate_form(
        &self,
        fields: &[(&str, &str)],
        ctx: &ValidationContext<'_>,
    ) -> FormReport {
        let mut report = FormReport::default();
        for &(field, raw) in fields {
            let verdict = self.validate_field(field, raw, ctx).await;
            report.record(field, verdict);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FlatFileStore;
    use crate::store::record::TIMESTAMP_FORMAT;
    use crate::store::{CredentialStore as _, UserRecord};
    use chrono::NaiveDateTime;

    fn engine() -> ValidationEngine {
        ValidationEngine::new(&AuthConfig::default())
    }

    #[tokio::test]
    async fn test_required_check_comes_first() {
        let ctx = ValidationContext::default();
        let verdict = engine().validate_field("email", "   ", &ctx).await;
        assert_eq!(verdict.message.as_deref(), Some("Email is required."));
    }

    #[tokio::test]
    async fn test_email_format() {
        let ctx = ValidationContext::default();
        let bad = engine().validate_field("email", "not-an-email", &ctx).await;
        assert_eq!(
            bad.message.as_deref(),
            Some("Please enter a valid email address.")
        );

        let good = engine().validate_field("email", "a@b.co", &ctx).await;
        assert!(good.valid);
    }

    #[tokio::test]
    async fn test_username_rules_in_order() {
        let ctx = ValidationContext::default();
        let eng = engine();

        let short = eng.validate_field("username", "ab", &ctx).await;
        assert_eq!(
            short.message.as_deref(),
            Some("Username must be at least 3 characters long.")
        );

        let bad_chars = eng.validate_field("username", "ab!c", &ctx).await;
        assert_eq!(
            bad_chars.message.as_deref(),
            Some("Username can only contain letters, numbers, and underscores.")
        );

        assert!(eng.validate_field("username", "ab_c9", &ctx).await.valid);
    }

    #[tokio::test]
    async fn test_password_rules() {
        let ctx = ValidationContext {
            store: None,
            password: Some("secret1"),
        };
        let eng = engine();

        let short = eng.validate_field("password", "abc", &ctx).await;
        assert_eq!(
            short.message.as_deref(),
            Some("Password must be at least 6 characters long.")
        );

        let mismatch = eng.validate_field("confirmPassword", "secret2", &ctx).await;
        assert_eq!(mismatch.message.as_deref(), Some("Passwords do not match."));

        assert!(
            eng.validate_field("confirmPassword", "secret1", &ctx)
                .await
                .valid
        );
    }

    #[tokio::test]
    async fn test_password_is_not_trimmed() {
        let ctx = ValidationContext {
            store: None,
            password: Some(" secret "),
        };
        assert!(
            engine()
                .validate_field("confirmPassword", " secret ", &ctx)
                .await
                .valid
        );
    }

    #[tokio::test]
    async fn test_hobbies_need_one_selection() {
        let ctx = ValidationContext::default();
        let eng = engine();

        let none = eng.validate_field("hobbies", "", &ctx).await;
        assert_eq!(
            none.message.as_deref(),
            Some("Please select at least one hobby.")
        );

        assert!(eng.validate_field("hobbies", "reading", &ctx).await.valid);
    }

    #[tokio::test]
    async fn test_idempotence() {
        let ctx = ValidationContext::default();
        let eng = engine();
        let first = eng.validate_field("fullName", "A", &ctx).await;
        let second = eng.validate_field("fullName", "A", &ctx).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_uniqueness_consults_store_in_registration_context() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::open(&dir.path().join("users.txt")).unwrap();
        let ts = NaiveDateTime::parse_from_str("2026-01-01 00:00:00", TIMESTAMP_FORMAT)
            .unwrap()
            .and_utc();
        store
            .append_unique(UserRecord {
                full_name: "Alice Smith".to_string(),
                email: "alice@x.com".to_string(),
                username: "alice".to_string(),
                password_hash: "hash".to_string(),
                gender: "female".to_string(),
                hobbies: vec!["chess".to_string()],
                country: "Canada".to_string(),
                join_date: ts,
                last_login: ts,
            })
            .await
            .unwrap();

        let ctx = ValidationContext {
            store: Some(&store),
            password: None,
        };
        let eng = engine();

        let email = eng.validate_field("email", "ALICE@X.COM", &ctx).await;
        assert_eq!(
            email.message.as_deref(),
            Some("This email is already registered.")
        );

        let username = eng.validate_field("username", "Alice", &ctx).await;
        assert_eq!(
            username.message.as_deref(),
            Some("This username is already taken.")
        );

        // Without a store in context (login path) the same values pass.
        let anon = ValidationContext::default();
        assert!(eng.validate_field("email", "alice@x.com", &anon).await.valid);
    }

    #[tokio::test]
    async fn test_form_aggregates_first_failure_per_field() {
        let ctx = ValidationContext {
            store: None,
            password: Some("short"),
        };
        let report = engine()
            .validate_form(
                &[
                    ("fullName", "A"),
                    ("email", "bad"),
                    ("username", "ok_name"),
                    ("password", "short"),
                    ("confirmPassword", "short"),
                    ("gender", ""),
                    ("hobbies", "chess"),
                    ("country", "Canada"),
                ],
                &ctx,
            )
            .await;

        assert!(!report.valid());
        let errors = report.into_field_errors();
        assert_eq!(
            errors.get("fullName").map(String::as_str),
            Some("Full name must be at least 2 characters long.")
        );
        assert_eq!(
            errors.get("gender").map(String::as_str),
            Some("Gender is required.")
        );
        assert!(!errors.contains_key("country"));
        assert!(!errors.contains_key("confirmPassword"));
    }
}
