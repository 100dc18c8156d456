#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::AnalyticsConfig;

use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::DATE_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};

/// Parses an evaluation instant. A bare date means midnight UTC.
pub fn parse_as_of(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| AnalyticsError::InvalidConfigValueError {
            field: "now".to_string(),
            value: value.to_string(),
            reason: "Expected RFC 3339 timestamp or YYYY-MM-DD".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_as_of() {
        assert_eq!(
            parse_as_of("2025-10-15").unwrap(),
            Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_as_of("2025-10-15T14:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 10, 15, 12, 30, 0).unwrap()
        );
        assert!(parse_as_of("yesterday").is_err());
    }
}
