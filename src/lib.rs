//! # Scrobble Analytics
//!
//! Personal music listening analytics over an exported scrobble history.
//!
//! This crate provides:
//! - A parser for tab-separated history exports (newest listen first)
//! - An in-memory [`Catalog`] indexed by instant, date, song, artist, and album
//! - Rankings: most listened, longest back-to-back streak, peak days
//! - Text rendering helpers for the command-line front end
//!
//! ```
//! use scrobble_analytics::{Catalog, Dimension};
//!
//! let catalog: Catalog = "2 Jan 2023, 10:00\tLorde\tMelodrama\tGreen Light\n\
//!                         1 Jan 2023, 09:00\tLorde\tMelodrama\tGreen Light"
//!     .parse()?;
//! assert_eq!(catalog.count_for("Green Light", Dimension::Song)?.get(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod date_range;
pub mod display;
pub mod error;
pub mod ordering;
pub mod record;
pub mod track;
pub mod types;

pub use analytics::{DateRanking, Ranking};
pub use catalog::Catalog;
pub use config::Config;
pub use date_range::DateRange;
pub use error::{Error, QueryError, Result};
pub use record::ListeningEvent;
pub use track::Track;
pub use types::{Dimension, PlayCount};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "scrobble-analytics";
