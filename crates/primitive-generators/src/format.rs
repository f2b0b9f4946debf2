//! Named string formats.

use crate::error::PrimitiveError;
use crate::PrimitiveGenerator;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use uuid::Uuid;

/// 2000-01-01T00:00:00Z
const TIMESTAMP_START: i64 = 946_684_800;
/// 2030-01-01T00:00:00Z
const TIMESTAMP_END: i64 = 1_893_456_000;

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
];
const TLDS: &[&str] = &["com", "net", "org", "io", "dev"];

/// String formats with a dedicated generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    DateTime,
    Date,
    Time,
    Email,
    Uuid,
    Uri,
    Hostname,
    Ipv4,
    Ipv6,
}

impl FromStr for Format {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-time" => Ok(Format::DateTime),
            "date" => Ok(Format::Date),
            "time" => Ok(Format::Time),
            "email" => Ok(Format::Email),
            "uuid" => Ok(Format::Uuid),
            "uri" => Ok(Format::Uri),
            "hostname" => Ok(Format::Hostname),
            "ipv4" => Ok(Format::Ipv4),
            "ipv6" => Ok(Format::Ipv6),
            other => Err(PrimitiveError::UnknownFormat(other.to_string())),
        }
    }
}

/// Generator for one named format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatGenerator {
    format: Format,
}

impl FormatGenerator {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl PrimitiveGenerator for FormatGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let text = match self.format {
            Format::DateTime => random_timestamp(rng).to_rfc3339_opts(SecondsFormat::Secs, true),
            Format::Date => random_timestamp(rng).format("%Y-%m-%d").to_string(),
            Format::Time => random_timestamp(rng).format("%H:%M:%S").to_string(),
            Format::Email => format!("{}.{}@{}", word(rng), rng.gen_range(1..10_000), hostname(rng)),
            Format::Uuid => random_uuid(rng).to_string(),
            Format::Uri => format!("https://{}/{}", hostname(rng), word(rng)),
            Format::Hostname => hostname(rng),
            Format::Ipv4 => Ipv4Addr::from(rng.gen::<u32>()).to_string(),
            Format::Ipv6 => Ipv6Addr::from(rng.gen::<u128>()).to_string(),
        };
        Value::String(text)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        let Some(s) = value.as_str() else {
            return Some(false);
        };
        let valid = match self.format {
            Format::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
            Format::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            Format::Time => NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok(),
            Format::Email => s
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && is_hostname(domain)),
            Format::Uuid => Uuid::parse_str(s).is_ok(),
            Format::Uri => s.split_once("://").is_some_and(|(scheme, rest)| {
                !rest.is_empty()
                    && scheme
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
            }),
            Format::Hostname => is_hostname(s),
            Format::Ipv4 => s.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => s.parse::<Ipv6Addr>().is_ok(),
        };
        Some(valid)
    }
}

fn random_timestamp(rng: &mut dyn RngCore) -> DateTime<chrono::Utc> {
    let secs = rng.gen_range(TIMESTAMP_START..TIMESTAMP_END);
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Random UUID v4 built from the provided RNG, so seeded runs repeat.
fn random_uuid(rng: &mut dyn RngCore) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

fn word(rng: &mut dyn RngCore) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("fixture")
}

fn hostname(rng: &mut dyn RngCore) -> String {
    let tld = TLDS.choose(rng).copied().unwrap_or("com");
    format!("{}.{}", word(rng), tld)
}

fn is_hostname(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 253
        && s.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
