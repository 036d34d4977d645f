//! Database repository handle.
//!
//! The operations themselves live in one file per area (`identity`, `camps`,
//! `reservations`, `reputation`, `blogs`), each adding an `impl Repository` block.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(super) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Fixed-width RFC 3339 timestamp so stored values sort chronologically as text.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time as a stored timestamp.
pub fn now_timestamp() -> String {
    timestamp(Utc::now())
}

/// Parse a stored timestamp back into a `DateTime`.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(super) fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_is_fixed_width() {
        let a = timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        let b = timestamp(Utc::now());
        assert_eq!(a.len(), b.len());
        assert_eq!(a, "2024-05-01T10:00:00.000000Z");
    }

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let parsed = parse_timestamp(&timestamp(now)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }
}
