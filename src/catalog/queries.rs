//! Catalog query implementations
//!
//! Point lookups, rankings, and listing traversals. Every query is a pure
//! read of the indices; results carry their counts with them.

use std::cmp::Reverse;

use chrono::NaiveDate;
use tracing::debug;

use crate::analytics::{self, DateRanking, Ranking};
use crate::date_range::validate_date;
use crate::error::QueryError;
use crate::record::ListeningEvent;
use crate::types::{Dimension, PlayCount};

use super::Catalog;

/// One name's entry in an alphabetical listing.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'a> {
    name: &'a str,
    positions: &'a [usize],
    catalog: &'a Catalog,
}

impl<'a> Bucket<'a> {
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Number of listens for this name.
    #[must_use]
    pub const fn count(&self) -> PlayCount {
        PlayCount::new(self.positions.len())
    }

    /// The listens, in alphabetical-index order.
    pub fn events(&self) -> impl Iterator<Item = &'a ListeningEvent> + 'a {
        let catalog = self.catalog;
        self.positions.iter().map(move |&pos| &catalog.events[pos])
    }

    /// Artist of the first listen in this bucket.
    #[must_use]
    pub fn first_artist(&self) -> Option<&'a str> {
        self.events().next().map(|event| event.track().artist())
    }
}

impl Catalog {
    /// Validate a date and check it lies within the history's span.
    fn checked_date(&self, month: u32, day: u32, year: i32) -> Result<NaiveDate, QueryError> {
        let date = validate_date(month, day, year).inspect_err(|e| debug!("{e}"))?;
        if !self.range.contains(date) {
            debug!("{date} outside {}", self.range);
            return Err(QueryError::DateOutOfRange {
                requested: date,
                range: self.range,
            });
        }
        Ok(date)
    }

    fn positions_on(&self, date: NaiveDate) -> &[usize] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    fn item_positions(&self, name: &str, dimension: Dimension) -> Result<&[usize], QueryError> {
        self.alpha_index(dimension).get(name).ok_or_else(|| {
            debug!("No {dimension} named {name:?}");
            QueryError::ItemNotFound {
                name: name.to_string(),
                dimension,
            }
        })
    }

    /// All listens on a date, oldest first.
    ///
    /// A valid date inside the history's span with no listens yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidDate`] for a date the calendar does not have,
    /// [`QueryError::DateOutOfRange`] for one outside the history.
    pub fn listens_on_date(
        &self,
        month: u32,
        day: u32,
        year: i32,
    ) -> Result<Vec<&ListeningEvent>, QueryError> {
        let date = self.checked_date(month, day, year)?;
        Ok(self.resolve(self.positions_on(date)).collect())
    }

    /// Total listens of an exact name. Matching is case-sensitive.
    ///
    /// # Errors
    ///
    /// [`QueryError::ItemNotFound`] if no listen carries that exact name.
    pub fn count_for(&self, name: &str, dimension: Dimension) -> Result<PlayCount, QueryError> {
        self.item_positions(name, dimension)
            .map(|positions| PlayCount::new(positions.len()))
    }

    /// Listens of an exact name on one date.
    ///
    /// # Errors
    ///
    /// [`QueryError::ItemNotFound`] for an unknown name, otherwise the same
    /// date errors as [`Catalog::listens_on_date`].
    pub fn count_on_date(
        &self,
        name: &str,
        dimension: Dimension,
        month: u32,
        day: u32,
        year: i32,
    ) -> Result<PlayCount, QueryError> {
        self.item_positions(name, dimension)?;
        let date = self.checked_date(month, day, year)?;
        let count = self
            .resolve(self.positions_on(date))
            .filter(|event| dimension.key(event.track()) == name)
            .count();
        Ok(PlayCount::new(count))
    }

    /// Most listened name(s) of all time, ties included in alphabetical
    /// index order.
    #[must_use]
    pub fn most_frequent(&self, dimension: Dimension) -> Ranking {
        let (names, count) = analytics::ties_for_max(
            self.alpha_index(dimension)
                .iter()
                .map(|(name, positions)| (name, positions.len())),
        );
        Ranking {
            names: names.into_iter().map(str::to_string).collect(),
            count,
        }
    }

    /// Most listened name(s) on one date, ties in first-listened order.
    ///
    /// A date with no listens gives an empty ranking with count zero.
    ///
    /// # Errors
    ///
    /// Same date errors as [`Catalog::listens_on_date`].
    pub fn most_frequent_on_date(
        &self,
        dimension: Dimension,
        month: u32,
        day: u32,
        year: i32,
    ) -> Result<Ranking, QueryError> {
        let date = self.checked_date(month, day, year)?;
        Ok(analytics::most_frequent(
            self.resolve(self.positions_on(date))
                .map(|event| dimension.key(event.track())),
        ))
    }

    /// The `n` most listened names with their counts, most listens first.
    ///
    /// Equal counts keep alphabetical index order, so a tie at the cutoff
    /// keeps the alphabetically earlier names. Fewer than `n` entries come
    /// back when there are fewer distinct names.
    #[must_use]
    pub fn top(&self, dimension: Dimension, n: usize) -> Vec<(String, PlayCount)> {
        let mut ranked: Vec<(&str, usize)> = self
            .alpha_index(dimension)
            .iter()
            .map(|(name, positions)| (name, positions.len()))
            .collect();
        ranked.sort_by_key(|&(_, count)| Reverse(count));
        ranked
            .into_iter()
            .take(n)
            .map(|(name, count)| (name.to_string(), PlayCount::new(count)))
            .collect()
    }

    /// Name(s) with the longest run of back-to-back listens.
    ///
    /// Adjacency is judged in input order (newest first), not in
    /// chronological order.
    #[must_use]
    pub fn longest_consecutive(&self, dimension: Dimension) -> Ranking {
        let names: Vec<&str> = self
            .events
            .iter()
            .map(|event| dimension.key(event.track()))
            .collect();
        analytics::longest_run(&names)
    }

    /// Date(s) on which an exact name was listened to the most, oldest first.
    ///
    /// # Errors
    ///
    /// [`QueryError::ItemNotFound`] if no listen carries that exact name.
    pub fn peak_days_for(&self, name: &str, dimension: Dimension) -> Result<DateRanking, QueryError> {
        self.item_positions(name, dimension)?;
        let per_day = self.by_date.iter().map(|(&date, positions)| {
            let count = self
                .resolve(positions)
                .filter(|event| dimension.key(event.track()) == name)
                .count();
            (date, count)
        });
        let (dates, count) = analytics::ties_for_max(per_day);
        Ok(DateRanking { dates, count })
    }

    /// Date(s) with the most listens overall, oldest first.
    #[must_use]
    pub fn busiest_days(&self) -> DateRanking {
        let (dates, count) = analytics::ties_for_max(
            self.by_date
                .iter()
                .map(|(&date, positions)| (date, positions.len())),
        );
        DateRanking { dates, count }
    }

    /// Every listen, oldest first.
    pub fn chronological(&self) -> impl Iterator<Item = &ListeningEvent> {
        self.by_instant
            .values()
            .flat_map(|positions| self.resolve(positions))
    }

    /// Every distinct name along `dimension`, alphabetically.
    pub fn alphabetical(&self, dimension: Dimension) -> impl Iterator<Item = Bucket<'_>> {
        self.alpha_index(dimension)
            .iter()
            .map(move |(name, positions)| Bucket {
                name,
                positions,
                catalog: self,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{sample, sample_lines};

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.names.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_listens_on_date_in_order() {
        let catalog = sample();
        let listens = catalog.listens_on_date(1, 2, 2023).unwrap();
        assert_eq!(listens.len(), 3);
        let times: Vec<_> = listens.iter().map(|e| e.time().to_string()).collect();
        assert_eq!(times, vec!["12:00:00", "12:05:00", "12:10:00"]);
    }

    #[test]
    fn test_listens_on_date_out_of_range() {
        let catalog = sample();
        let err = catalog.listens_on_date(1, 4, 2023).unwrap_err();
        assert!(matches!(err, QueryError::DateOutOfRange { .. }));
        assert!(matches!(
            catalog.listens_on_date(12, 31, 2022),
            Err(QueryError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_listens_on_invalid_date() {
        let catalog = sample();
        assert_eq!(
            catalog.listens_on_date(2, 30, 2023).unwrap_err(),
            QueryError::InvalidDate {
                month: 2,
                day: 30,
                year: 2023
            }
        );
    }

    #[test]
    fn test_gap_day_inside_range_is_empty() {
        let catalog = Catalog::from_lines([
            "3 Jan 2023, 10:00\ta\tb\tc",
            "1 Jan 2023, 10:00\ta\tb\tc",
        ])
        .unwrap();
        assert!(catalog.listens_on_date(1, 2, 2023).unwrap().is_empty());
        let ranked = catalog
            .most_frequent_on_date(Dimension::Song, 1, 2, 2023)
            .unwrap();
        assert!(ranked.is_empty());
        assert!(ranked.count.is_zero());
    }

    #[test]
    fn test_count_for_is_case_sensitive() {
        let catalog = sample();
        assert_eq!(
            catalog.count_for("Green Light", Dimension::Song),
            Ok(PlayCount::new(3))
        );
        assert_eq!(
            catalog.count_for("Taylor Swift", Dimension::Artist),
            Ok(PlayCount::new(3))
        );
        assert_eq!(
            catalog.count_for("green light", Dimension::Song),
            Err(QueryError::ItemNotFound {
                name: "green light".to_string(),
                dimension: Dimension::Song
            })
        );
    }

    #[test]
    fn test_count_on_date() {
        let catalog = sample();
        assert_eq!(
            catalog.count_on_date("Taylor Swift", Dimension::Artist, 1, 3, 2023),
            Ok(PlayCount::new(2))
        );
        assert_eq!(
            catalog.count_on_date("Taylor Swift", Dimension::Artist, 1, 2, 2023),
            Ok(PlayCount::new(0))
        );
        assert!(matches!(
            catalog.count_on_date("Nobody", Dimension::Artist, 1, 2, 2023),
            Err(QueryError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_most_frequent_single() {
        let ranked = sample().most_frequent(Dimension::Song);
        assert_eq!(names(&ranked), vec!["Green Light"]);
        assert_eq!(ranked.count, PlayCount::new(3));
    }

    #[test]
    fn test_most_frequent_ties_in_alphabetical_order() {
        let ranked = sample().most_frequent(Dimension::Artist);
        assert_eq!(names(&ranked), vec!["Lorde", "Taylor Swift"]);
        assert_eq!(ranked.count, PlayCount::new(3));
    }

    #[test]
    fn test_most_frequent_two_songs_tied() {
        let catalog = Catalog::from_lines([
            "2 Jan 2023, 10:03\ta\tx\tSong B",
            "2 Jan 2023, 10:02\ta\tx\tSong A",
            "2 Jan 2023, 10:01\ta\tx\tSong B",
            "1 Jan 2023, 10:00\ta\tx\tSong A",
            "1 Jan 2023, 09:00\ta\tx\tSong C",
        ])
        .unwrap();
        let ranked = catalog.most_frequent(Dimension::Song);
        assert_eq!(names(&ranked), vec!["Song A", "Song B"]);
        assert_eq!(ranked.count, PlayCount::new(2));
    }

    #[test]
    fn test_most_frequent_on_date_end_to_end() {
        let catalog = Catalog::from_lines([
            "2 Jan 2023, 10:02\ta\tx\tHit",
            "2 Jan 2023, 10:01\ta\tx\tHit",
            "2 Jan 2023, 10:00\ta\tx\tHit",
            "1 Jan 2023, 10:01\ta\tx\tHit",
            "1 Jan 2023, 10:00\ta\tx\tHit",
        ])
        .unwrap();
        assert_eq!(catalog.listens_on_date(1, 2, 2023).unwrap().len(), 3);

        let ranked = catalog
            .most_frequent_on_date(Dimension::Song, 1, 2, 2023)
            .unwrap();
        assert_eq!(names(&ranked), vec!["Hit"]);
        assert_eq!(ranked.count, PlayCount::new(3));
    }

    #[test]
    fn test_most_frequent_on_date_first_listened_order() {
        let catalog = Catalog::from_lines([
            "1 Jan 2023, 10:03\ta\tx\tLate",
            "1 Jan 2023, 10:02\ta\tx\tEarly",
            "1 Jan 2023, 10:01\ta\tx\tLate",
            "1 Jan 2023, 10:00\ta\tx\tEarly",
        ])
        .unwrap();
        let ranked = catalog
            .most_frequent_on_date(Dimension::Song, 1, 1, 2023)
            .unwrap();
        assert_eq!(names(&ranked), vec!["Early", "Late"]);
    }

    fn top_names(top: &[(String, PlayCount)]) -> Vec<(&str, usize)> {
        top.iter()
            .map(|(name, count)| (name.as_str(), count.get()))
            .collect()
    }

    #[test]
    fn test_top_orders_by_count() {
        let top = sample().top(Dimension::Song, 2);
        assert_eq!(top_names(&top), vec![("Green Light", 3), ("Anti-Hero", 2)]);
    }

    #[test]
    fn test_top_larger_than_distinct_names() {
        let top = sample().top(Dimension::Song, 10);
        assert_eq!(
            top_names(&top),
            vec![("Green Light", 3), ("Anti-Hero", 2), ("cardigan", 1)]
        );
    }

    #[test]
    fn test_top_zero_is_empty() {
        assert!(sample().top(Dimension::Artist, 0).is_empty());
    }

    #[test]
    fn test_top_tie_at_cutoff_keeps_alphabetical_order() {
        let top = sample().top(Dimension::Artist, 1);
        assert_eq!(top_names(&top), vec![("Lorde", 3)]);

        let catalog = Catalog::from_lines([
            "1 Jan 2023, 10:04\ta\tx\tbravo",
            "1 Jan 2023, 10:03\ta\tx\tCharlie",
            "1 Jan 2023, 10:02\ta\tx\talpha",
            "1 Jan 2023, 10:01\ta\tx\tdelta",
            "1 Jan 2023, 10:00\ta\tx\tdelta",
        ])
        .unwrap();
        let top = catalog.top(Dimension::Song, 3);
        assert_eq!(
            top_names(&top),
            vec![("delta", 2), ("alpha", 1), ("bravo", 1)]
        );
    }

    #[test]
    fn test_longest_consecutive_uses_input_order() {
        let catalog = Catalog::from_lines([
            "1 Jan 2023, 10:05\tx\ty\tA",
            "1 Jan 2023, 10:04\tx\ty\tA",
            "1 Jan 2023, 10:03\tx\ty\tB",
            "1 Jan 2023, 10:02\tx\ty\tB",
            "1 Jan 2023, 10:01\tx\ty\tB",
            "1 Jan 2023, 10:00\tx\ty\tA",
        ])
        .unwrap();
        let ranked = catalog.longest_consecutive(Dimension::Song);
        assert_eq!(names(&ranked), vec!["B"]);
        assert_eq!(ranked.count, PlayCount::new(3));
    }

    #[test]
    fn test_longest_consecutive_by_artist() {
        let ranked = sample().longest_consecutive(Dimension::Artist);
        assert_eq!(names(&ranked), vec!["Lorde"]);
        assert_eq!(ranked.count, PlayCount::new(3));
    }

    #[test]
    fn test_peak_days_for() {
        let catalog = sample();
        let peak = catalog
            .peak_days_for("Taylor Swift", Dimension::Artist)
            .unwrap();
        assert_eq!(peak.dates, vec![NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()]);
        assert_eq!(peak.count, PlayCount::new(2));

        assert!(catalog.peak_days_for("taylor swift", Dimension::Artist).is_err());
    }

    #[test]
    fn test_busiest_days() {
        let busiest = sample().busiest_days();
        assert_eq!(busiest.dates, vec![NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()]);
        assert_eq!(busiest.count, PlayCount::new(3));
    }

    #[test]
    fn test_chronological_is_reverse_input() {
        let catalog = sample();
        let chrono: Vec<_> = catalog.chronological().collect();
        let reversed: Vec<_> = catalog.events().iter().rev().collect();
        assert_eq!(chrono, reversed);
        assert_eq!(chrono.len(), sample_lines().len());
    }

    #[test]
    fn test_alphabetical_listing() {
        let catalog = sample();
        let buckets: Vec<_> = catalog
            .alphabetical(Dimension::Song)
            .map(|b| (b.name(), b.count().get(), b.first_artist()))
            .collect();
        assert_eq!(
            buckets,
            vec![
                ("Anti-Hero", 2, Some("Taylor Swift")),
                ("cardigan", 1, Some("Taylor Swift")),
                ("Green Light", 3, Some("Lorde")),
            ]
        );
    }
}
