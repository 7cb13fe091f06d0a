/// Error kinds raised by the Telisaran reckoning.
use thiserror::Error;

/// One variant per violated calendar constraint.
///
/// Construction is strict: a date component outside its legal range is
/// rejected immediately, so no partially built `DateTime` ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReckoningError {
    #[error("invalid era: {era} (must be 1..={max})")]
    InvalidEra { era: i64, max: u8 },
    #[error("invalid year: {year} (the {era} spans years 1..={last})")]
    InvalidYear {
        year: i64,
        era: &'static str,
        last: u64,
    },
    #[error("invalid season: {season} (must be 1..={max})")]
    InvalidSeason { season: i64, max: u8 },
    #[error("invalid span: {span} (must be 1..={max})")]
    InvalidSpan { span: i64, max: u8 },
    #[error("invalid day: {day} for the {season} (must be 1..={max})")]
    InvalidDay {
        day: i64,
        season: &'static str,
        max: u8,
    },
    #[error("invalid hour: {hour} (must be 0..=23)")]
    InvalidHour { hour: i64 },
    #[error("invalid minute: {minute} (must be 0..=59)")]
    InvalidMinute { minute: i64 },
    #[error("invalid second: {second} (must be 0..=59)")]
    InvalidSecond { second: i64 },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("year {year} has no season {season}")]
    MissingSeason { season: i64, year: u64 },
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_field_value_and_range() {
        let err = ReckoningError::InvalidDay {
            day: 46,
            season: "Fox",
            max: 45,
        };
        assert_eq!(err.to_string(), "invalid day: 46 for the Fox (must be 1..=45)");

        let err = ReckoningError::InvalidYear {
            year: 20001,
            era: "Ancient Era",
            last: 20000,
        };
        assert_eq!(
            err.to_string(),
            "invalid year: 20001 (the Ancient Era spans years 1..=20000)"
        );

        let err = ReckoningError::InvalidHour { hour: 24 };
        assert_eq!(err.to_string(), "invalid hour: 24 (must be 0..=23)");
    }

    #[test]
    fn parse_error_carries_input() {
        let err = ReckoningError::Parse("could not parse 'whenever'".to_string());
        assert!(err.to_string().contains("whenever"));
    }
}
