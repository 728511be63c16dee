//! Aggregations and metrics over the cleaned export.
//!
//! Every entry point takes typed records and returns a plain result struct
//! or an [`AnalysisError`](crate::error::AnalysisError) explaining why the
//! analysis cannot run. Extremes always resolve to the first bucket that
//! reaches them, in chronological or first-seen order.

pub mod activity;
pub mod career;
pub mod intervals;
pub mod jobs;
pub mod network;
pub mod rhythm;

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::data::dates::YearMonth;

/// Number of dates per calendar month, ascending, present months only.
pub(crate) fn count_by_month<D, I>(dates: I) -> Vec<(YearMonth, usize)>
where
    D: Datelike,
    I: IntoIterator<Item = D>,
{
    let mut map: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for d in dates {
        *map.entry(YearMonth::of(&d)).or_default() += 1;
    }
    map.into_iter().collect()
}

/// First `(key, value)` with the largest value.
pub(crate) fn first_max<K, V, I>(items: I) -> Option<(K, V)>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd + Copy,
{
    items.into_iter().fold(None, |best, (k, v)| match best {
        Some((_, bv)) if v <= bv => best,
        _ => Some((k, v)),
    })
}

/// First `(key, value)` with the smallest value.
pub(crate) fn first_min<K, V, I>(items: I) -> Option<(K, V)>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd + Copy,
{
    items.into_iter().fold(None, |best, (k, v)| match best {
        Some((_, bv)) if v >= bv => best,
        _ => Some((k, v)),
    })
}

/// Frequency of each non-empty value, most frequent first.
/// Ties keep first-appearance order.
pub(crate) fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for v in values {
        let v = v.trim();
        if v.is_empty() {
            continue;
        }
        match index.get(v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(v, counts.len());
                counts.push((v.to_string(), 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
