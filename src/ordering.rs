//! Case-insensitive alphabetical ordering of listening events.
//!
//! These comparators only decide the *order* in which names appear in the
//! alphabetical indices. Looking a name up in those indices is an exact,
//! case-sensitive match and lives in the catalog, not here.

use std::cmp::Ordering;

use crate::record::ListeningEvent;
use crate::types::Dimension;

/// Comparator over two events.
pub type EventOrdering = fn(&ListeningEvent, &ListeningEvent) -> Ordering;

/// Compare two strings ignoring case, char by char.
#[must_use]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Order events by song title.
#[must_use]
pub fn by_song(a: &ListeningEvent, b: &ListeningEvent) -> Ordering {
    compare_ignore_case(a.track().song(), b.track().song())
}

/// Order events by artist name.
#[must_use]
pub fn by_artist(a: &ListeningEvent, b: &ListeningEvent) -> Ordering {
    compare_ignore_case(a.track().artist(), b.track().artist())
}

/// Order events by album title.
#[must_use]
pub fn by_album(a: &ListeningEvent, b: &ListeningEvent) -> Ordering {
    compare_ignore_case(a.track().album(), b.track().album())
}

impl Dimension {
    /// The alphabetical ordering used to build this dimension's index.
    #[must_use]
    pub fn ordering(self) -> EventOrdering {
        match self {
            Self::Song => by_song,
            Self::Artist => by_artist,
            Self::Album => by_album,
        }
    }
}
