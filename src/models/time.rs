//! Timestamp handling for Spark history server responses.
//!
//! The history server emits timestamps like `2015-02-10T10:28:01.250GMT`,
//! which is almost-but-not-quite RFC 3339. `SparkTime` keeps the raw string
//! around so a value we fail to parse still renders as the server sent it.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as reported by the Spark history server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparkTime(pub String);

impl SparkTime {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the server timestamp into a UTC datetime.
    ///
    /// Handles the `GMT` suffix the history server appends as well as plain
    /// RFC 3339 strings. Returns `None` for anything else.
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        if self.0.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }

        // "2015-02-10T10:28:01.250GMT" - strip the suffix, treat as UTC
        let trimmed = self.0.strip_suffix("GMT").unwrap_or(&self.0);
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.3f")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Human-readable local time, falling back to the raw server string.
    #[must_use]
    pub fn display(&self) -> String {
        match self.as_datetime() {
            Some(dt) => dt
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => self.0.clone(),
        }
    }
}

impl std::fmt::Display for SparkTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_gmt_suffix() {
        let t = SparkTime::new("2015-02-10T10:28:01.250GMT");
        let dt = t.as_datetime().expect("should parse GMT-suffixed time");
        assert_eq!(dt.year(), 2015);
        assert_eq!(dt.month(), 2);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 28);
    }

    #[test]
    fn test_parse_without_millis() {
        let t = SparkTime::new("2015-02-10T10:28:01GMT");
        assert!(t.as_datetime().is_some());
    }

    #[test]
    fn test_parse_rfc3339() {
        let t = SparkTime::new("2015-02-10T10:28:01+00:00");
        assert!(t.as_datetime().is_some());
    }

    #[test]
    fn test_unparseable_falls_back_to_raw() {
        let t = SparkTime::new("not a time");
        assert!(t.as_datetime().is_none());
        assert_eq!(t.display(), "not a time");
    }

    #[test]
    fn test_empty() {
        let t = SparkTime::default();
        assert!(t.is_empty());
        assert!(t.as_datetime().is_none());
    }
}
