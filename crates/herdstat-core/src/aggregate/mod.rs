pub mod reducers;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use reducers::{percentage, reduce_ai, reduce_milk, saturating_sum, AiOutcome, MilkTotal};

/// One time window of records reduced to a value.
///
/// `start` is the first day of the window; series are ordered by it, never by `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket<R> {
    pub label: String,
    pub start: NaiveDate,
    #[serde(flatten)]
    pub value: R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season for a 0-indexed month: 2-4 Spring, 5-7 Summer, 8-10 Autumn, else Winter.
    pub fn from_month0(month0: u32) -> Season {
        match month0 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    fn start_month(&self) -> u32 {
        match self {
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Autumn => 9,
            Season::Winter => 12,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
        }
    }
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Display label for a month bucket, e.g. "Dec 2021".
pub fn month_label(start: NaiveDate) -> String {
    start.format("%b %Y").to_string()
}

/// Start date and label of the season containing `date`.
///
/// Winter belongs to the year of its December: 2024-01-10 is in "Winter 2023-24",
/// which starts on 2023-12-01.
pub fn season_window(date: NaiveDate) -> (NaiveDate, String) {
    let season = Season::from_month0(date.month0());
    let season_year = if season == Season::Winter && date.month() <= 2 {
        date.year() - 1
    } else {
        date.year()
    };
    let start = NaiveDate::from_ymd_opt(season_year, season.start_month(), 1).unwrap_or(date);
    let label = match season {
        Season::Winter => format!("Winter {}-{:02}", season_year, (season_year + 1).rem_euclid(100)),
        _ => format!("{} {}", season, season_year),
    };
    (start, label)
}

fn bucket_by<T, R>(
    records: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    window_of: impl Fn(NaiveDate) -> (NaiveDate, String),
    reduce: impl Fn(&[&T]) -> R,
) -> Vec<Bucket<R>> {
    let mut groups: BTreeMap<NaiveDate, (String, Vec<&T>)> = BTreeMap::new();
    let mut undated = 0usize;

    for record in records {
        let Some(date) = date_of(record) else {
            undated += 1;
            continue;
        };
        let (start, label) = window_of(date);
        groups
            .entry(start)
            .or_insert_with(|| (label, Vec::new()))
            .1
            .push(record);
    }

    if undated > 0 {
        tracing::warn!(undated, "records without a date excluded from buckets");
    }

    groups
        .into_iter()
        .map(|(start, (label, members))| Bucket {
            label,
            start,
            value: reduce(&members),
        })
        .collect()
}

/// Group records by calendar month and reduce each group.
///
/// Records without a date are excluded. Output is ascending by month start.
pub fn bucket_by_month<T, R>(
    records: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    reduce: impl Fn(&[&T]) -> R,
) -> Vec<Bucket<R>> {
    bucket_by(
        records,
        date_of,
        |date| {
            let start = month_start(date);
            (start, month_label(start))
        },
        reduce,
    )
}

/// Group records by season and reduce each group. Empty seasons are omitted.
pub fn bucket_by_season<T, R>(
    records: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    reduce: impl Fn(&[&T]) -> R,
) -> Vec<Bucket<R>> {
    bucket_by(records, date_of, season_window, reduce)
}
