//! Account record types
//!
//! Defines the `UserRecord` stored in the flat file and the `UserView`
//! exposed to the presentation layer (no password hash).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Field delimiter of the record file. No stored field may contain it.
pub const FIELD_DELIMITER: char = '|';

/// Timestamp format used in the record file and the audit log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One registered account.
///
/// Line format, fields in fixed order:
/// `fullName|email|username|passwordHash|gender|hobby1,hobby2,...|country|registrationDate`
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub gender: String,
    pub hobbies: Vec<String>,
    pub country: String,
    pub join_date: DateTime<Utc>,
    /// Not persisted in the record line; the audit log is the durable trail.
    pub last_login: DateTime<Utc>,
}

impl UserRecord {
    /// Case-insensitive username match.
    pub fn matches_username(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }

    /// Case-insensitive email match.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }

    /// Case-insensitive match on either username or email.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.matches_username(identifier) || self.matches_email(identifier)
    }

    /// Serializes the record to its flat-file line (without trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            self.full_name,
            self.email,
            self.username,
            self.password_hash,
            self.gender,
            self.hobbies.join(","),
            self.country,
            self.join_date.format(TIMESTAMP_FORMAT),
        )
    }

    /// Parses a flat-file line. Returns `None` for lines with fewer than
    /// 8 fields or an unreadable timestamp; callers skip those with a warning.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() < 8 {
            return None;
        }

        let join_date = NaiveDateTime::parse_from_str(fields[7], TIMESTAMP_FORMAT)
            .ok()?
            .and_utc();

        let hobbies = fields[5]
            .split(',')
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            full_name: fields[0].to_string(),
            email: fields[1].to_string(),
            username: fields[2].to_string(),
            password_hash: fields[3].to_string(),
            gender: fields[4].to_string(),
            hobbies,
            country: fields[6].to_string(),
            join_date,
            last_login: join_date,
        })
    }

    /// Returns the name of the first field containing the delimiter, if any.
    /// Such a record cannot be written without corrupting the file.
    pub fn unencodable_field(&self) -> Option<&'static str> {
        let checks: [(&'static str, &str); 6] = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("username", &self.username),
            ("passwordHash", &self.password_hash),
            ("gender", &self.gender),
            ("country", &self.country),
        ];
        for (name, value) in checks {
            if value.contains(FIELD_DELIMITER) {
                return Some(name);
            }
        }
        if self.hobbies.iter().any(|h| h.contains(FIELD_DELIMITER)) {
            return Some("hobbies");
        }
        None
    }

    /// Public view of the record for sessions and rendering.
    pub fn view(&self) -> UserView {
        UserView {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            gender: self.gender.clone(),
            hobbies: self.hobbies.clone(),
            country: self.country.clone(),
            join_date: self.join_date,
            last_login: self.last_login,
        }
    }
}

/// Public fields of an account, safe to hand to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub gender: String,
    pub hobbies: Vec<String>,
    pub country: String,
    pub join_date: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserRecord {
        UserRecord {
            full_name: "Alice Smith".to_string(),
            email: "alice@x.com".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            gender: "female".to_string(),
            hobbies: vec!["reading".to_string(), "chess".to_string()],
            country: "Canada".to_string(),
            join_date: NaiveDateTime::parse_from_str("2026-01-02 03:04:05", TIMESTAMP_FORMAT)
                .unwrap()
                .and_utc(),
            last_login: Utc::now(),
        }
    }

    #[test]
    fn test_line_round_trip() {
        let record = sample();
        let line = record.to_line();
        assert_eq!(
            line,
            "Alice Smith|alice@x.com|alice|$2b$12$abcdefghijklmnopqrstuv|female|reading,chess|Canada|2026-01-02 03:04:05"
        );

        let parsed = UserRecord::parse_line(&line).unwrap();
        assert_eq!(parsed.username, "alice");
        assert_eq!(parsed.hobbies, vec!["reading", "chess"]);
        assert_eq!(parsed.join_date, record.join_date);
    }

    #[test]
    fn test_short_line_is_rejected() {
        assert!(UserRecord::parse_line("just|three|fields").is_none());
        assert!(UserRecord::parse_line("").is_none());
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let line = "A B|a@x.com|a|hash|male||US|not-a-date";
        assert!(UserRecord::parse_line(line).is_none());
    }

    #[test]
    fn test_identifier_matching_ignores_case() {
        let record = sample();
        assert!(record.matches_identifier("ALICE"));
        assert!(record.matches_identifier("Alice@X.Com"));
        assert!(!record.matches_identifier("bob"));
    }

    #[test]
    fn test_unencodable_field_detected() {
        let mut record = sample();
        record.country = "Ca|nada".to_string();
        assert_eq!(record.unencodable_field(), Some("country"));
    }

    #[test]
    fn test_view_copies_public_fields() {
        let view = sample().view();
        assert_eq!(view.username, "alice");
        assert_eq!(view.full_name, "Alice Smith");
        assert_eq!(view.hobbies.len(), 2);
    }

    #[test]
    fn test_view_serializes_with_timestamps() {
        let json = serde_json::to_string(&sample().view()).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("2026-01-02T03:04:05Z"));
        assert!(!json.contains("password"));
    }
}
