//! Display utilities for formatting listening history output.
//!
//! Every `render_*` function returns the finished text rather than printing
//! it, so the command-line front end decides where it goes.
//!
//! # Functions
//!
//! - [`truncate`] - Truncate strings to a maximum length with ellipsis
//! - [`format_count`] - Group digits with thousands separators
//! - [`times`] / [`listens`] - Pluralize counts
//! - [`print_section_simple`] - Print a section header
//! - [`render_listens`] / [`render_ranking`] / etc. - Format query results

use crate::analytics::{DateRanking, Ranking};
use crate::catalog::Catalog;
use crate::config::DisplayConfig;
use crate::record::ListeningEvent;
use crate::types::{Dimension, PlayCount};

/// Truncate a string to a maximum length, adding "..." if truncated.
///
/// Handles Unicode characters correctly by counting chars rather than bytes.
/// For `max_len < 3`, truncates without ellipsis since there's no room for "...".
///
/// # Examples
///
/// ```
/// use scrobble_analytics::display::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 2), "he");
/// ```
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len < 3 {
        // No room for ellipsis, just truncate
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// Format a count, optionally grouping digits in threes with commas.
///
/// ```
/// use scrobble_analytics::{display::format_count, PlayCount};
///
/// assert_eq!(format_count(PlayCount::new(1_234_567), true), "1,234,567");
/// assert_eq!(format_count(PlayCount::new(1_234_567), false), "1234567");
/// ```
#[must_use]
pub fn format_count(count: PlayCount, separator: bool) -> String {
    let digits = count.get().to_string();
    if !separator {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "time" for exactly one, "times" otherwise.
#[must_use]
pub const fn times(count: PlayCount) -> &'static str {
    if count.get() == 1 {
        "time"
    } else {
        "times"
    }
}

/// "listen" for exactly one, "listens" otherwise.
#[must_use]
pub const fn listens(count: PlayCount) -> &'static str {
    if count.get() == 1 {
        "listen"
    } else {
        "listens"
    }
}

/// Print a simple section header with dashes.
pub fn print_section_simple(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(30));
}

/// One listen as `time  song by artist (album)`.
fn listen_line(event: &ListeningEvent, opts: &DisplayConfig, with_date: bool) -> String {
    let track = event.track();
    let when = if with_date {
        event.timestamp().format("%-m/%-d/%Y %-I:%M %p").to_string()
    } else {
        event.timestamp().format("%-I:%M %p").to_string()
    };
    format!(
        "{when:>8}  {} by {} ({})",
        truncate(track.song(), opts.name_width),
        truncate(track.artist(), opts.name_width),
        truncate(track.album(), opts.name_width),
    )
}

/// Listens on a single date, one per line.
#[must_use]
pub fn render_listens(events: &[&ListeningEvent], opts: &DisplayConfig) -> String {
    if events.is_empty() {
        return "No listens on this date.".to_string();
    }

    let total = PlayCount::new(events.len());
    let mut lines: Vec<String> = events
        .iter()
        .map(|event| format!("  {}", listen_line(event, opts, false)))
        .collect();
    lines.push(format!(
        "  {} {}",
        format_count(total, opts.thousands_separator),
        listens(total)
    ));
    lines.join("\n")
}

/// Names tied for first place, followed by how often.
#[must_use]
pub fn render_ranking(ranking: &Ranking, opts: &DisplayConfig) -> String {
    if ranking.is_empty() {
        return "Nothing to rank.".to_string();
    }

    let names: Vec<String> = ranking
        .names
        .iter()
        .map(|name| truncate(name, opts.name_width))
        .collect();
    format!(
        "{} ({} {})",
        names.join(", "),
        format_count(ranking.count, opts.thousands_separator),
        times(ranking.count)
    )
}

/// Dates tied for first place, followed by how many listens.
#[must_use]
pub fn render_date_ranking(ranking: &DateRanking, opts: &DisplayConfig) -> String {
    if ranking.dates.is_empty() {
        return "Nothing to rank.".to_string();
    }

    let dates: Vec<String> = ranking
        .dates
        .iter()
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .collect();
    format!(
        "{} ({} {})",
        dates.join(", "),
        format_count(ranking.count, opts.thousands_separator),
        listens(ranking.count)
    )
}

/// The `n` most listened names, numbered, with their counts.
///
/// Names and counts are each aligned to the widest entry in the list.
#[must_use]
pub fn render_top(entries: &[(String, PlayCount)], opts: &DisplayConfig) -> String {
    if entries.is_empty() {
        return "Nothing to rank.".to_string();
    }

    let sep = opts.thousands_separator;
    let names: Vec<String> = entries
        .iter()
        .map(|(name, _)| truncate(name, opts.name_width))
        .collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let count_width = entries
        .iter()
        .map(|(_, count)| format_count(*count, sep).len())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = names
        .iter()
        .zip(entries)
        .enumerate()
        .map(|(i, (name, (_, count)))| {
            format!(
                "{:2}. {name:<name_width$}  {:>count_width$} {}",
                i + 1,
                format_count(*count, sep),
                times(*count)
            )
        })
        .collect();
    lines.join("\n")
}

/// Totals and averages for the whole history.
#[must_use]
pub fn render_summary(catalog: &Catalog, opts: &DisplayConfig) -> String {
    let sep = opts.thousands_separator;
    let range = catalog.date_range();
    let rows = [
        ("Total listens:", catalog.total_listens()),
        ("Listening days:", catalog.total_distinct_days()),
        ("Average per day:", catalog.average_listens_per_day()),
        ("Distinct songs:", catalog.distinct_count(Dimension::Song)),
        ("Distinct artists:", catalog.distinct_count(Dimension::Artist)),
        ("Distinct albums:", catalog.distinct_count(Dimension::Album)),
    ];

    let mut lines: Vec<String> = rows
        .iter()
        .map(|(label, count)| format!("  {label:<18}{:>10}", format_count(*count, sep)))
        .collect();
    lines.push(format!(
        "  {:<18}{range} ({} days)",
        "History:",
        range.span_days()
    ));
    lines.join("\n")
}

/// Every listen, oldest first.
#[must_use]
pub fn render_chronological(catalog: &Catalog, opts: &DisplayConfig) -> String {
    let lines: Vec<String> = catalog
        .chronological()
        .map(|event| listen_line(event, opts, true))
        .collect();
    lines.join("\n")
}

/// Every distinct name along `dimension`, alphabetically, with its count.
///
/// Counts are right-justified to the widest count in the listing. Songs and
/// albums also name the artist of their first listen.
#[must_use]
pub fn render_alphabetical(catalog: &Catalog, dimension: Dimension, opts: &DisplayConfig) -> String {
    let sep = opts.thousands_separator;
    let width = catalog
        .alphabetical(dimension)
        .map(|bucket| format_count(bucket.count(), sep).len())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = catalog
        .alphabetical(dimension)
        .map(|bucket| {
            let count = format_count(bucket.count(), sep);
            let name = truncate(bucket.name(), opts.name_width);
            match (dimension, bucket.first_artist()) {
                (Dimension::Song | Dimension::Album, Some(artist)) => {
                    format!("{count:>width$}  {name} [{artist}]")
                }
                _ => format!("{count:>width$}  {name}"),
            }
        })
        .collect();
    lines.join("\n")
}
