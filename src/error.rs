//! Error types for scrobble-analytics

use chrono::NaiveDate;
use thiserror::Error;

use crate::date_range::DateRange;
use crate::types::Dimension;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("Listening history is empty")]
    EmptyHistory,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Why a single line of listening history could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown month abbreviation '{0}'")]
    UnknownMonth(String),

    #[error("time must be HH:MM, got '{0}'")]
    InvalidTime(String),

    #[error("{day} {month} {year}, {hour:02}:{minute:02} is not a real date/time")]
    InvalidDateTime {
        day: u32,
        month: u32,
        year: i32,
        hour: u32,
        minute: u32,
    },
}

/// Recoverable outcomes of a catalog query.
///
/// None of these abort the program; callers render them as answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{name} was not found within your listening history ({dimension})")]
    ItemNotFound { name: String, dimension: Dimension },

    #[error("{month}/{day}/{year} is not a valid date")]
    InvalidDate { month: u32, day: u32, year: i32 },

    #[error("{} is not within the range of your listening history: {range}", .requested.format("%-m/%-d/%Y"))]
    DateOutOfRange {
        requested: NaiveDate,
        range: DateRange,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_mentions_line() {
        let err = Error::MalformedRecord {
            line: 7,
            source: ParseError::UnknownMonth("Foo".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record on line 7: unknown month abbreviation 'Foo'"
        );
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 10).unwrap(),
        );
        let err = QueryError::DateOutOfRange {
            requested: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            range,
        };
        assert_eq!(
            err.to_string(),
            "3/1/2023 is not within the range of your listening history: 1/5/2023 - 2/10/2023"
        );
    }

    #[test]
    fn test_item_not_found_names_dimension() {
        let err = QueryError::ItemNotFound {
            name: "Cellophane".to_string(),
            dimension: Dimension::Song,
        };
        assert_eq!(
            err.to_string(),
            "Cellophane was not found within your listening history (song)"
        );
    }
}
