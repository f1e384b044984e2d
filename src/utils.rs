//! Crate-wide error type, identifier generation, and timestamp helpers.

use std::io;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use thiserror::Error;

/// Store error with standard prefix on every message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("[Storefront DB] error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[Storefront DB] error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[Storefront DB] error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[Storefront DB] error serializing database: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("[Storefront DB] {0}")]
    Document(String),

    #[error("[Storefront DB] auth error: {0}")]
    Auth(String),
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a record id: millisecond timestamp plus a 9-char base36 suffix.
pub fn generate_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), random_base36(9))
}

/// Generate an order number: `DDF` prefix, last 8 digits of the millisecond
/// timestamp, 4 uppercase base36 chars.
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("DDF{}{}", tail, random_base36(4).to_uppercase())
}

/// Current time as an RFC3339 string with millisecond precision (the format
/// the storefront has always persisted).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_order_number_shape() {
        let num = generate_order_number();
        assert!(num.starts_with("DDF"));
        assert_eq!(num.len(), 3 + 8 + 4);
        let suffix = &num[11..];
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_now_iso_round_trips() {
        let ts = now_iso();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_error_message_prefix() {
        let err = StoreError::Document("database document is not a JSON object".to_string());
        assert_eq!(
            err.to_string(),
            "[Storefront DB] database document is not a JSON object"
        );
    }

    #[test]
    fn test_read_error_includes_path() {
        let err = StoreError::read(
            "src/lib/db.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("src/lib/db.json"));
        assert!(msg.starts_with("[Storefront DB] error reading"));
    }
}
