pub mod errors;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses the service's date strings, e.g. `2019-05-26T17:04:38.823`.
///
/// The services omit the zone designator on most fields; such values are UTC.
/// Strings that already carry an offset (`...Z`, `...+00:00`) are accepted too.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(errors::CurseMetaError::from)
        .with_context(|| format!("Failed to parse date '{}'", value))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_without_zone() {
        let date = parse_timestamp("2019-05-26T17:04:38.823").unwrap();
        assert_eq!(date.year(), 2019);
        assert_eq!(date.month(), 5);
        assert_eq!(date.day(), 26);
        assert_eq!(date.hour(), 17);
        assert_eq!(date.timestamp_subsec_millis(), 823);
    }

    #[test]
    fn test_parse_timestamp_with_zone() {
        let date = parse_timestamp("2019-05-26T17:04:38.823Z").unwrap();
        assert_eq!(date, parse_timestamp("2019-05-26T17:04:38.823").unwrap());
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        let date = parse_timestamp("2020-01-02T03:04:05").unwrap();
        assert_eq!(date.second(), 5);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
