//! Format-constrained string primitives
//!
//! Leaf fields across the catalog are strings with a wire format: UUIDs,
//! emails, URLs, ISO-8601 date-times and the identity-provider actor id.
//! A format check rejects values that are string-typed but malformed, and
//! names the violated format so error trees stay actionable.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Actor ids are issued by the identity provider: `auth0|` followed by
/// exactly 24 lowercase hex characters.
const ACTOR_ID_PATTERN: &str = r"^auth0\|[a-f0-9]{24}$";

/// Pragmatic email shape: one `@`, no whitespace, a dotted domain.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// http/https URLs with a non-empty host part.
const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";

fn actor_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ACTOR_ID_PATTERN).unwrap())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).unwrap())
}

/// A wire format constraint on a string field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RFC 4122 UUID string
    Uuid,
    /// Email address
    Email,
    /// http/https URL
    Url,
    /// ISO-8601 date-time; a UTC offset is accepted but not required
    DateTime,
    /// RFC 3339 date-time with a mandatory explicit UTC offset
    DateTimeOffset,
    /// Identity-provider user id (`auth0|` + 24 lowercase hex chars)
    ActorId,
}

impl Format {
    /// Check a candidate string against this format
    pub fn check(&self, value: &str) -> bool {
        match self {
            Format::Uuid => Uuid::parse_str(value).is_ok(),
            Format::Email => email_regex().is_match(value),
            Format::Url => url_regex().is_match(value),
            Format::DateTime => {
                DateTime::parse_from_rfc3339(value).is_ok()
                    || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            }
            Format::DateTimeOffset => DateTime::parse_from_rfc3339(value).is_ok(),
            Format::ActorId => actor_id_regex().is_match(value),
        }
    }

    /// Human-readable name used in violation messages
    pub fn label(&self) -> &'static str {
        match self {
            Format::Uuid => "uuid",
            Format::Email => "email",
            Format::Url => "url",
            Format::DateTime => "date-time",
            Format::DateTimeOffset => "date-time with UTC offset",
            Format::ActorId => "actor id",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
