//! Record listing
//!
//! Turns a one-time snapshot of the records collection into the list the
//! record screen displays: every child that parses becomes a
//! [`ContactRecord`], the rest are counted and dropped, and the result is
//! ordered newest first.

use std::cmp::Ordering;

use serde_json::Value;

use crate::shared::contact::ContactRecord;

/// Outcome of materializing a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRecords {
    /// Parsed records, newest first
    pub records: Vec<ContactRecord>,
    /// Children that could not be parsed
    pub skipped: usize,
}

impl LoadedRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse and order a snapshot of the records collection.
///
/// The store renders an empty collection as `null` and a collection whose
/// keys all look like small integers as an array (with `null` holes); both
/// are accepted alongside the usual object form. Any other top-level value
/// counts as one skipped child.
pub fn materialize(snapshot: Value) -> LoadedRecords {
    let children: Vec<(String, Value)> = match snapshot {
        Value::Null => Vec::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        _ => {
            return LoadedRecords {
                records: Vec::new(),
                skipped: 1,
            }
        }
    };

    let mut loaded = LoadedRecords::default();
    for (key, value) in children {
        match ContactRecord::from_stored(key, value) {
            Ok(record) => loaded.records.push(record),
            Err(_) => loaded.skipped += 1,
        }
    }

    sort_newest_first(&mut loaded.records);
    loaded
}

/// Order by creation time, newest first; equal times fall back to the key,
/// highest first.
pub fn sort_newest_first(records: &mut [ContactRecord]) {
    records.sort_by(newest_first);
}

fn newest_first(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
