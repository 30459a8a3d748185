//! Date-ordered record store.
//!
//! Holds the records of one payload kind for a single run. The store is
//! constructed fresh per invocation and owned by that run — never a shared
//! global — so there is no cross-run contamination. Append-only: records are
//! inserted during ingestion and only read afterward.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::record::Record;

/// A collection of [`Record`]s kept sorted by date.
///
/// Backed by a `BTreeMap` keyed on the calendar day: insertion and range
/// bound lookup are O(log n), and same-day records keep their insertion
/// order (a stable tie-break).
#[derive(Debug, Default)]
pub struct RecordStore {
    by_date: BTreeMap<NaiveDate, Vec<Record>>,
    len: usize,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, maintaining date order.
    pub fn insert(&mut self, record: Record) {
        self.by_date.entry(record.date()).or_default().push(record);
        self.len += 1;
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Oldest and newest record dates, or `None` when the store is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let oldest = *self.by_date.keys().next()?;
        let newest = *self.by_date.keys().next_back()?;
        Some((oldest, newest))
    }

    /// Records with `start <= date <= end`, in date order (inclusive on
    /// both ends).
    #[must_use]
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Record> {
        self.by_date
            .range(start..=end)
            .flat_map(|(_, records)| records.iter())
            .collect()
    }

    /// Iterate all records in date order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.by_date.values().flat_map(|records| records.iter())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SearchEntry, SearchHistory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn search_on(day: NaiveDate, title: &str) -> Record {
        Record::SearchHistory(SearchHistory {
            date: day,
            entries: vec![SearchEntry {
                hour: "12".into(),
                title: title.into(),
            }],
        })
    }

    #[test]
    fn empty_store_has_no_bounds() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.bounds(), None);
    }

    #[test]
    fn bounds_track_oldest_and_newest() {
        let mut store = RecordStore::new();
        store.insert(search_on(date(2024, 3, 10), "b"));
        store.insert(search_on(date(2024, 1, 2), "a"));
        store.insert(search_on(date(2024, 2, 20), "c"));
        assert_eq!(store.bounds(), Some((date(2024, 1, 2), date(2024, 3, 10))));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let mut store = RecordStore::new();
        store.insert(search_on(date(2024, 1, 1), "start"));
        store.insert(search_on(date(2024, 1, 15), "middle"));
        store.insert(search_on(date(2024, 1, 31), "end"));
        store.insert(search_on(date(2024, 2, 1), "outside"));

        let hits = store.range(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].date(), date(2024, 1, 1));
        assert_eq!(hits[2].date(), date(2024, 1, 31));
    }

    #[test]
    fn range_returns_records_in_date_order() {
        let mut store = RecordStore::new();
        store.insert(search_on(date(2024, 1, 20), "later"));
        store.insert(search_on(date(2024, 1, 5), "earlier"));

        let dates: Vec<NaiveDate> = store
            .range(date(2024, 1, 1), date(2024, 1, 31))
            .iter()
            .map(|r| r.date())
            .collect();
        assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 1, 20)]);
    }

    #[test]
    fn same_day_records_keep_insertion_order() {
        let mut store = RecordStore::new();
        let day = date(2024, 1, 5);
        store.insert(search_on(day, "first"));
        store.insert(search_on(day, "second"));

        let hits = store.range(day, day);
        let titles: Vec<&str> = hits
            .iter()
            .map(|r| match r {
                Record::SearchHistory(s) => s.entries[0].title.as_str(),
                Record::Conversation(_) => unreachable!(),
            })
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let mut store = RecordStore::new();
        store.insert(search_on(date(2024, 6, 1), "a"));
        assert!(store.range(date(2024, 1, 1), date(2024, 1, 31)).is_empty());
    }

    #[test]
    fn len_counts_all_inserts() {
        let mut store = RecordStore::new();
        let day = date(2024, 1, 5);
        store.insert(search_on(day, "a"));
        store.insert(search_on(day, "b"));
        store.insert(search_on(date(2024, 1, 6), "c"));
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().count(), 3);
    }
}
