//! In-memory catalog of a listening history
//!
//! The catalog owns the canonical event sequence (input order, newest
//! first) and builds every index from it exactly once. After construction
//! nothing is mutated, so a `&Catalog` can be shared freely.

mod index;
mod queries;

pub use queries::Bucket;

use std::str::FromStr;

use tracing::info;

use crate::date_range::DateRange;
use crate::error::{Error, Result};
use crate::record::ListeningEvent;
use crate::types::{Dimension, PlayCount};

use index::{AlphaIndex, DateIndex, InstantIndex};

/// A parsed listening history plus its derived indices.
#[derive(Debug)]
pub struct Catalog {
    /// Events in input order (newest first)
    events: Vec<ListeningEvent>,
    by_instant: InstantIndex,
    by_date: DateIndex,
    by_song: AlphaIndex,
    by_artist: AlphaIndex,
    by_album: AlphaIndex,
    range: DateRange,
}

impl Catalog {
    /// Parse raw history lines (newest first) and build the catalog.
    ///
    /// Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedRecord`] on the first line that cannot be
    /// parsed, or [`Error::EmptyHistory`] if no line holds a record. No
    /// partial catalog is ever returned.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut events = Vec::new();
        for (number, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let event = ListeningEvent::parse(line).map_err(|source| Error::MalformedRecord {
                line: number + 1,
                source,
            })?;
            events.push(event);
        }
        Self::from_events(events)
    }

    /// Build the catalog from already-parsed events (newest first).
    ///
    /// The date range comes from the dates themselves, so it is correct
    /// even if the input strays from newest-first order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyHistory`] if `events` is empty.
    pub fn from_events(events: Vec<ListeningEvent>) -> Result<Self> {
        let by_date = index::build_date_index(&events);
        let (Some(&oldest), Some(&newest)) = (by_date.keys().next(), by_date.keys().next_back())
        else {
            return Err(Error::EmptyHistory);
        };
        let range = DateRange::new(oldest, newest);

        let by_instant = index::build_instant_index(&events);
        let by_song = AlphaIndex::build(&events, Dimension::Song);
        let by_artist = AlphaIndex::build(&events, Dimension::Artist);
        let by_album = AlphaIndex::build(&events, Dimension::Album);

        let catalog = Self {
            events,
            by_instant,
            by_date,
            by_song,
            by_artist,
            by_album,
            range,
        };

        info!(
            "Loaded {} listens over {} days ({})",
            catalog.total_listens(),
            catalog.total_distinct_days(),
            catalog.range
        );

        Ok(catalog)
    }

    /// Events in input order (newest first).
    #[must_use]
    pub fn events(&self) -> &[ListeningEvent] {
        &self.events
    }

    /// Total number of listens.
    #[must_use]
    pub fn total_listens(&self) -> PlayCount {
        PlayCount::new(self.events.len())
    }

    /// Number of distinct calendar dates with at least one listen.
    #[must_use]
    pub fn total_distinct_days(&self) -> PlayCount {
        PlayCount::new(self.by_date.len())
    }

    /// Average listens per listening day, rounded half up.
    #[must_use]
    pub fn average_listens_per_day(&self) -> PlayCount {
        self.total_listens().per(self.total_distinct_days())
    }

    /// Number of distinct names along `dimension`.
    #[must_use]
    pub fn distinct_count(&self, dimension: Dimension) -> PlayCount {
        PlayCount::new(self.alpha_index(dimension).len())
    }

    /// Inclusive span from the oldest to the newest listen date.
    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        self.range
    }

    fn alpha_index(&self, dimension: Dimension) -> &AlphaIndex {
        match dimension {
            Dimension::Song => &self.by_song,
            Dimension::Artist => &self.by_artist,
            Dimension::Album => &self.by_album,
        }
    }

    fn resolve<'a>(&'a self, positions: &'a [usize]) -> impl Iterator<Item = &'a ListeningEvent> {
        positions.iter().map(|&pos| &self.events[pos])
    }
}

impl FromStr for Catalog {
    type Err = Error;

    /// Parse a whole history file's contents.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_lines(s.lines())
    }
}
