//! Track identity (artist, album, song)

use std::fmt;

use serde::Serialize;

/// Month abbreviations as they appear in exported history, January first.
pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Look up a month by its exact, case-sensitive three-letter abbreviation.
///
/// Returns the month number (1-12).
#[must_use]
pub(crate) fn month_from_abbreviation(abbr: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbr)
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Immutable (artist, album, song) identity of a play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Track {
    artist: String,
    album: String,
    song: String,
}

impl Track {
    /// Build a track, repairing song titles mangled by spreadsheet exports.
    ///
    /// Titles such as `7/11` get exported as the date `11-Jul`; those are
    /// turned back into `7/11`. See [`restore_slash_title`].
    #[must_use]
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        song: impl Into<String>,
    ) -> Self {
        let song = song.into();
        let song = restore_slash_title(&song).unwrap_or(song);
        Self {
            artist: artist.into(),
            album: album.into(),
            song,
        }
    }

    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn album(&self) -> &str {
        &self.album
    }

    #[must_use]
    pub fn song(&self) -> &str {
        &self.song
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    {}    {}", self.artist, self.album, self.song)
    }
}

/// Turn `<number>-<Mon>` back into `<month>/<number>`.
///
/// Returns `None` when the title does not look like a mangled date: it has
/// spaces, the left side is not all digits, or the right side is not one of
/// the twelve month abbreviations.
fn restore_slash_title(song: &str) -> Option<String> {
    if song.contains(' ') {
        return None;
    }
    let (number, month) = song.split_once('-')?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month = month_from_abbreviation(month)?;
    Some(format!("{month}/{number}"))
}
