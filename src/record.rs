//! Listening events parsed from exported scrobble history.
//!
//! One line of history looks like
//!
//! ```text
//! 31 Jan 2023, 18:04	Phoebe Bridgers	Punisher	Kyoto
//! ```
//!
//! i.e. `<day> <Mon> <year>, <HH:MM>` followed by tab-separated artist,
//! album and song.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::ParseError;
use crate::track::{month_from_abbreviation, Track};

/// One play of one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListeningEvent {
    track: Track,
    timestamp: NaiveDateTime,
}

impl ListeningEvent {
    #[must_use]
    pub const fn new(track: Track, timestamp: NaiveDateTime) -> Self {
        Self { track, timestamp }
    }

    /// Parse one raw line of history.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the date, time, or any of the three
    /// names cannot be read. Month abbreviations must match exactly.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);

        let (day, rest) = next_token(line).ok_or(ParseError::MissingField("day"))?;
        let (month, rest) = next_token(rest).ok_or(ParseError::MissingField("month"))?;
        let (year, rest) = next_token(rest).ok_or(ParseError::MissingField("year"))?;
        let (time, rest) = next_token(rest).ok_or(ParseError::MissingField("time"))?;

        let day: u32 = parse_number("day", day)?;
        let month = month_from_abbreviation(month)
            .ok_or_else(|| ParseError::UnknownMonth(month.to_string()))?;
        // "2023," -> 2023
        let year: i32 = parse_number("year", year.get(..4).unwrap_or(year))?;
        let (hour, minute) = parse_time(time)?;

        let timestamp = NaiveDate::from_ymd_opt(year, month, day)
            .zip(NaiveTime::from_hms_opt(hour, minute, 0))
            .map(|(date, time)| date.and_time(time))
            .ok_or(ParseError::InvalidDateTime {
                day,
                month,
                year,
                hour,
                minute,
            })?;

        let mut fields = rest.trim_start().split('\t');
        let artist = clean_name(fields.next()).ok_or(ParseError::MissingField("artist"))?;
        let album = clean_name(fields.next()).ok_or(ParseError::MissingField("album"))?;
        let song = clean_name(fields.next()).ok_or(ParseError::MissingField("song"))?;

        Ok(Self::new(Track::new(artist, album, song), timestamp))
    }

    #[must_use]
    pub const fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar date of the play.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time of day of the play.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}

impl FromStr for ListeningEvent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ListeningEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}",
            self.timestamp.format("%-d %b %Y, %-I:%M %p"),
            self.track
        )
    }
}

/// Split off the next whitespace-delimited token.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Read `HH:MM` (24-hour). Anything after the minutes is ignored.
fn parse_time(token: &str) -> Result<(u32, u32), ParseError> {
    let invalid = || ParseError::InvalidTime(token.to_string());
    if token.get(2..3) != Some(":") {
        return Err(invalid());
    }
    let hour = token.get(..2).ok_or_else(invalid)?;
    let minute = token.get(3..5).ok_or_else(invalid)?;
    Ok((parse_number("hour", hour)?, parse_number("minute", minute)?))
}

/// Strip literal quotes; empty names count as missing.
fn clean_name(field: Option<&str>) -> Option<String> {
    let name: String = field?.chars().filter(|c| *c != '"').collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_full_line() {
        let event = ListeningEvent::parse("31 Jan 2023, 18:04\tPhoebe Bridgers\tPunisher\tKyoto\n")
            .unwrap();
        assert_eq!(event.track().artist(), "Phoebe Bridgers");
        assert_eq!(event.track().album(), "Punisher");
        assert_eq!(event.track().song(), "Kyoto");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_eq!(event.time().hour(), 18);
        assert_eq!(event.time().minute(), 4);
    }

    #[test]
    fn test_parse_space_separated_header() {
        let event =
            ListeningEvent::parse("5 Mar 2022, 09:30    Lorde\tMelodrama\tGreen Light").unwrap();
        assert_eq!(event.track().artist(), "Lorde");
        assert_eq!(event.date().month(), 3);
    }

    #[test]
    fn test_strips_quotes() {
        let event =
            ListeningEvent::parse("1 Feb 2023, 00:00\t\"Weird Al\" Yankovic\tAlbum\t\"Song\"")
                .unwrap();
        assert_eq!(event.track().artist(), "Weird Al Yankovic");
        assert_eq!(event.track().song(), "Song");
    }

    #[test]
    fn test_applies_title_correction() {
        let event = ListeningEvent::parse("1 Feb 2023, 00:00\tBeyonce\t4\t11-Jul").unwrap();
        assert_eq!(event.track().song(), "7/11");
    }

    #[test]
    fn test_unknown_month_is_an_error() {
        let err = ListeningEvent::parse("1 Foo 2023, 00:00\tA\tB\tC").unwrap_err();
        assert_eq!(err, ParseError::UnknownMonth("Foo".to_string()));

        let err = ListeningEvent::parse("1 jan 2023, 00:00\tA\tB\tC").unwrap_err();
        assert_eq!(err, ParseError::UnknownMonth("jan".to_string()));
    }

    #[test]
    fn test_impossible_date_is_an_error() {
        let err = ListeningEvent::parse("30 Feb 2023, 12:00\tA\tB\tC").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDateTime { day: 30, month: 2, .. }));
    }

    #[test]
    fn test_bad_time_is_an_error() {
        assert!(matches!(
            ListeningEvent::parse("1 Jan 2023, 9:30\tA\tB\tC"),
            Err(ParseError::InvalidTime(_))
        ));
        assert!(matches!(
            ListeningEvent::parse("1 Jan 2023, 25:00\tA\tB\tC"),
            Err(ParseError::InvalidDateTime { hour: 25, .. })
        ));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            ListeningEvent::parse("").unwrap_err(),
            ParseError::MissingField("day")
        );
        assert_eq!(
            ListeningEvent::parse("1 Jan 2023, 10:00\tA\tB").unwrap_err(),
            ParseError::MissingField("song")
        );
        assert_eq!(
            ListeningEvent::parse("1 Jan 2023, 10:00\tA\t\tC").unwrap_err(),
            ParseError::MissingField("album")
        );
    }

    #[test]
    fn test_non_numeric_day() {
        assert!(matches!(
            ListeningEvent::parse("x Jan 2023, 10:00\tA\tB\tC"),
            Err(ParseError::InvalidNumber { field: "day", .. })
        ));
    }

    #[test]
    fn test_display_uses_twelve_hour_clock() {
        let event: ListeningEvent = "7 Jul 2021, 18:05\tA\tB\tC".parse().unwrap();
        assert_eq!(event.to_string(), "7 Jul 2021, 6:05 PM\tA    B    C");
    }
}
