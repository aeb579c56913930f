//! Domain-specific newtypes for type safety.
//!
//! This module provides strongly-typed wrappers for common domain concepts
//! to prevent mixing up values at compile time. Uses `derive_more` to
//! eliminate conversion boilerplate while maintaining zero-cost abstractions.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::track::Track;

// ============================================================================
// PlayCount
// ============================================================================

/// A play count value.
///
/// Represents the number of times a song, album, or artist has been played,
/// the length of a consecutive run, or a number of days.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PlayCount(pub usize);

impl PlayCount {
    /// Create a new instance.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Get the inner value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Check if the value is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Integer average of `self` over `days`, rounding halves up.
    ///
    /// Returns zero when `days` is zero.
    #[must_use]
    pub const fn per(self, days: Self) -> Self {
        if days.0 == 0 {
            return Self(0);
        }
        Self((2 * self.0 + days.0) / (2 * days.0))
    }
}

// ============================================================================
// Dimension
// ============================================================================

/// Which facet of a track a query groups or ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Song,
    Artist,
    Album,
}

impl Dimension {
    /// Get all dimensions, in listing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Song, Self::Artist, Self::Album]
    }

    /// Lowercase keyword for this dimension.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Artist => "artist",
            Self::Album => "album",
        }
    }

    /// The name of `track` along this dimension.
    #[must_use]
    pub fn key(self, track: &Track) -> &str {
        match self {
            Self::Song => track.song(),
            Self::Artist => track.artist(),
            Self::Album => track.album(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Dimension {
    type Err = String;

    /// Accepts "song", "Artist", " al bum " and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword: String = s
            .chars()
            .filter(|c| *c != ' ')
            .collect::<String>()
            .to_lowercase();
        match keyword.as_str() {
            "song" => Ok(Self::Song),
            "artist" => Ok(Self::Artist),
            "album" => Ok(Self::Album),
            _ => Err(format!("'{s}' is not one of song, artist, album")),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
