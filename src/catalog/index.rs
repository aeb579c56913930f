//! Derived indices over the canonical event sequence.
//!
//! Every index stores positions into the catalog's canonical `Vec`, never
//! copies of events, so all of them stay projections of one sequence.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::record::ListeningEvent;
use crate::types::Dimension;

/// Positions grouped by exact timestamp, oldest first.
///
/// Two plays logged in the same minute share a key; within a key they are
/// in chronological (reversed input) order.
pub(crate) type InstantIndex = BTreeMap<NaiveDateTime, Vec<usize>>;

/// Positions grouped by calendar date, oldest date first, each bucket in
/// chronological order.
pub(crate) type DateIndex = BTreeMap<NaiveDate, Vec<usize>>;

/// Build the by-instant index. Input is newest first, so walk it backwards.
pub(crate) fn build_instant_index(events: &[ListeningEvent]) -> InstantIndex {
    let mut index = InstantIndex::new();
    for (pos, event) in events.iter().enumerate().rev() {
        index.entry(event.timestamp()).or_default().push(pos);
    }
    debug!("Built instant index with {} keys", index.len());
    index
}

/// Build the by-date index. Input is newest first, so walk it backwards.
pub(crate) fn build_date_index(events: &[ListeningEvent]) -> DateIndex {
    let mut index = DateIndex::new();
    for (pos, event) in events.iter().enumerate().rev() {
        index.entry(event.date()).or_default().push(pos);
    }
    debug!("Built date index with {} days", index.len());
    index
}

/// Events grouped by name along one dimension, in case-insensitive
/// alphabetical order.
///
/// Ordering and lookup are separate: `buckets` is ordered by
/// [`Dimension::ordering`], while `lookup` matches names exactly,
/// case included. `"Cruel Summer"` and `"cruel summer"` are two buckets
/// that sit next to each other.
#[derive(Debug, Default)]
pub(crate) struct AlphaIndex {
    buckets: Vec<(String, Vec<usize>)>,
    lookup: HashMap<String, usize>,
}

impl AlphaIndex {
    /// Stable-sort all positions by the dimension's ordering, then group by
    /// exact name in that order.
    pub(crate) fn build(events: &[ListeningEvent], dimension: Dimension) -> Self {
        let ordering = dimension.ordering();
        let mut positions: Vec<usize> = (0..events.len()).collect();
        positions.sort_by(|&a, &b| ordering(&events[a], &events[b]));

        let mut index = Self::default();
        for pos in positions {
            let name = dimension.key(events[pos].track());
            let slot = match index.lookup.get(name) {
                Some(&slot) => slot,
                None => {
                    index.buckets.push((name.to_string(), Vec::new()));
                    let slot = index.buckets.len() - 1;
                    index.lookup.insert(name.to_string(), slot);
                    slot
                }
            };
            index.buckets[slot].1.push(pos);
        }

        debug!(
            "Built {} index with {} distinct names",
            dimension,
            index.len()
        );
        index
    }

    /// Positions of events with exactly this name.
    pub(crate) fn get(&self, name: &str) -> Option<&[usize]> {
        self.lookup
            .get(name)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    /// Buckets in alphabetical order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.buckets
            .iter()
            .map(|(name, positions)| (name.as_str(), positions.as_slice()))
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(lines: &[&str]) -> Vec<ListeningEvent> {
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_alpha_index_orders_case_insensitively() {
        let events = events(&[
            "2 Jan 2023, 10:00\tb\tx\tzebra",
            "2 Jan 2023, 09:00\tb\tx\tApple",
            "1 Jan 2023, 10:00\tb\tx\tmango",
        ]);
        let index = AlphaIndex::build(&events, Dimension::Song);
        let names: Vec<_> = index.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn test_alpha_index_lookup_is_exact() {
        let events = events(&[
            "2 Jan 2023, 10:00\tb\tx\tHello",
            "2 Jan 2023, 09:00\tb\tx\thello",
            "1 Jan 2023, 10:00\tb\tx\tHello",
        ]);
        let index = AlphaIndex::build(&events, Dimension::Song);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Hello"), Some(&[0, 2][..]));
        assert_eq!(index.get("hello"), Some(&[1][..]));
        assert!(index.get("HELLO").is_none());

        // Same name under the ordering: first-seen exact spelling comes first.
        let names: Vec<_> = index.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Hello", "hello"]);
    }

    #[test]
    fn test_date_index_is_chronological() {
        let events = events(&[
            "2 Jan 2023, 10:00\ta\tx\tthird",
            "1 Jan 2023, 23:00\ta\tx\tsecond",
            "1 Jan 2023, 08:00\ta\tx\tfirst",
        ]);
        let index = build_date_index(&events);
        let days: Vec<_> = index.keys().map(ToString::to_string).collect();
        assert_eq!(days, vec!["2023-01-01", "2023-01-02"]);
        assert_eq!(index.values().next().unwrap(), &vec![2, 1]);
    }

    #[test]
    fn test_instant_index_keeps_same_minute_plays() {
        let events = events(&[
            "1 Jan 2023, 10:00\ta\tx\tb",
            "1 Jan 2023, 10:00\ta\tx\ta",
            "1 Jan 2023, 09:59\ta\tx\tz",
        ]);
        let index = build_instant_index(&events);
        assert_eq!(index.len(), 2);
        assert_eq!(index.values().map(Vec::len).sum::<usize>(), 3);
        assert_eq!(index.values().next().unwrap(), &vec![2]);
        assert_eq!(index.values().nth(1).unwrap(), &vec![1, 0]);
    }
}
