//! Analytics and statistics module
//!
//! Pure ranking algorithms over sequences of names or dates. The catalog
//! feeds them slices of its indices; nothing here knows about events.
//!
//! Both rankings keep every item tied for first place, in the order the
//! items were first encountered, and return the winning value alongside
//! the list instead of stashing it anywhere.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::PlayCount;

/// Names tied for the best count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub names: Vec<String>,
    pub count: PlayCount,
}

impl Ranking {
    /// True when nothing was ranked (empty scope).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Dates tied for the best count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRanking {
    pub dates: Vec<NaiveDate>,
    pub count: PlayCount,
}

/// Keep every key tied for the largest count, in scan order.
///
/// A strictly larger count resets the winners; an equal count joins them.
/// An empty scan yields no winners and a count of zero.
pub fn ties_for_max<K>(counts: impl IntoIterator<Item = (K, usize)>) -> (Vec<K>, PlayCount) {
    let mut winners = Vec::new();
    let mut max_so_far = 0;

    for (key, count) in counts {
        if count > max_so_far {
            max_so_far = count;
            winners.clear();
            winners.push(key);
        } else if count == max_so_far && count > 0 {
            winners.push(key);
        }
    }

    (winners, PlayCount::new(max_so_far))
}

/// Count occurrences of each name, keeping first-encountered order.
pub fn tally<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for name in names {
        let slot = *slots.entry(name).or_insert_with(|| {
            counts.push((name, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    counts
}

/// Most frequent name(s) in `names`.
pub fn most_frequent<'a>(names: impl IntoIterator<Item = &'a str>) -> Ranking {
    let (names, count) = ties_for_max(tally(names));
    Ranking {
        names: names.into_iter().map(str::to_string).collect(),
        count,
    }
}

/// Name(s) with the longest run of adjacent repeats in `names`.
///
/// Tracks a leading run and a runner-up run. When the runner-up catches up
/// to the leader's length it joins the winners and becomes the run compared
/// against from then on; when the leading run grows past the runner-up the
/// winners collapse back to the leader alone.
///
/// Every step re-checks the trailing window with [`continues_run`], so this
/// is O(n * L) for a longest run of length L. A plain streak counter gives
/// different tie results and must not replace it.
pub fn longest_run(names: &[&str]) -> Ranking {
    let Some(&first) = names.first() else {
        return Ranking::default();
    };

    let mut leader = first;
    let mut leader_len = 1;
    let mut runner_up: Option<&str> = None;
    let mut runner_up_len = 0;
    let mut winners = vec![first];

    for (i, &name) in names.iter().enumerate().skip(1) {
        if continues_run(names, i, leader_len, leader) {
            leader_len += 1;
            if leader_len > runner_up_len {
                runner_up = None;
                runner_up_len = 0;
                winners.clear();
                winners.push(leader);
            }
        } else if let Some(second) =
            runner_up.filter(|second| continues_run(names, i, runner_up_len, second))
        {
            runner_up_len += 1;
            if runner_up_len == leader_len {
                leader = second;
                if !winners.contains(&second) {
                    winners.push(second);
                }
            }
        } else {
            runner_up = Some(name);
            runner_up_len = 1;
        }
    }

    Ranking {
        names: winners.into_iter().map(str::to_string).collect(),
        count: PlayCount::new(leader_len),
    }
}

/// Does position `i` extend a run of `len` copies of `name` ending at `i - 1`?
///
/// `names[i]` and each of the `len` positions before it must equal `name`.
fn continues_run(names: &[&str], i: usize, len: usize, name: &str) -> bool {
    if names.get(i) != Some(&name) {
        return false;
    }
    i.checked_sub(len)
        .and_then(|start| names.get(start..i))
        .is_some_and(|window| window.iter().all(|n| *n == name))
}
