//! Client-side ordering and text filtering
//!
//! Listings are computed from an already-fetched collection with
//! `sort(filter(items, query), field, direction)`. The functions here hold no
//! state beyond their arguments; column-header behaviour lives in
//! [`SortState::toggle`].

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Comparable value extracted from an entry for one sort field
///
/// A given field must always produce the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Lower-cased text, compared lexicographically
    Text(String),
    Day(NaiveDate),
    Instant(DateTime<Utc>),
    Count(u64),
}

impl SortKey {
    /// Builds a case-insensitive text key
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

/// An entry that can appear in a sorted, filtered list
pub trait Listable {
    /// Selectable sort columns
    type Field: Copy + PartialEq;

    /// Key for the given column
    fn sort_key(&self, field: Self::Field) -> SortKey;

    /// Fields searched by the text filter
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match against any search field
    ///
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    /// Sorting by `field`, newest/largest first
    pub fn new(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    pub fn with_direction(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: the active field flips direction, a new field starts descending
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self::new(field)
        }
    }
}

/// Keeps the entries matching `query`, in their original order
///
/// A blank query keeps everything.
pub fn filter_entries<T: Listable + Clone>(entries: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| entry.matches(&needle))
        .cloned()
        .collect()
}

/// Stable sort by one field
pub fn sort_entries<T: Listable>(entries: Vec<T>, field: T::Field, direction: SortDirection) -> Vec<T> {
    let mut keyed: Vec<(SortKey, T)> = entries
        .into_iter()
        .map(|entry| (entry.sort_key(field), entry))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// `sort(filter(entries, query), field, direction)`
pub fn apply_listing<T: Listable + Clone>(
    entries: &[T],
    query: &str,
    sort: SortState<T::Field>,
) -> Vec<T> {
    sort_entries(filter_entries(entries, query), sort.field, sort.direction)
}
