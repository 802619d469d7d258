//! Derived lookup views over the record store.
//!
//! [`BandIndex`] is built once after load: distinct value sets per attribute
//! (for populating selection controls) and a natural-key index for the
//! resolver. [`filter`] is the exact-match scan used by lookups.

use std::collections::{BTreeSet, HashMap};

use encadrement_core::{Field, FieldValue, FilterQuery, NaturalKey, RegulationRecord};

/// Records matching every constrained field of `query`, in input order.
///
/// Works over any sequence of records, so results can be filtered again.
pub fn filter<'a, I>(records: I, query: &FilterQuery) -> Vec<&'a RegulationRecord>
where
    I: IntoIterator<Item = &'a RegulationRecord>,
{
    records.into_iter().filter(|r| query.matches(r)).collect()
}

/// Precomputed views over an immutable record slice.
#[derive(Debug, Default)]
pub struct BandIndex {
    /// Natural key → row of its first occurrence.
    positions: HashMap<NaturalKey, usize>,
    years: BTreeSet<u16>,
    districts: BTreeSet<String>,
    furnishings: BTreeSet<bool>,
    room_counts: BTreeSet<u8>,
    eras: BTreeSet<String>,
}

impl BandIndex {
    pub fn build(records: &[RegulationRecord]) -> Self {
        let mut index = Self::default();
        for (row, record) in records.iter().enumerate() {
            index.positions.entry(record.key()).or_insert(row);
            index.years.insert(record.year);
            index.furnishings.insert(record.furnished);
            index.room_counts.insert(record.room_count);
            if !index.districts.contains(&record.district) {
                index.districts.insert(record.district.clone());
            }
            if !index.eras.contains(&record.era) {
                index.eras.insert(record.era.clone());
            }
        }
        index
    }

    /// Row of the first record with `key`, if any.
    pub fn position(&self, key: &NaturalKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Number of distinct natural keys.
    pub fn key_count(&self) -> usize {
        self.positions.len()
    }

    /// Distinct values of `field`, sorted.
    pub fn unique_values(&self, field: Field) -> Vec<FieldValue> {
        match field {
            Field::Year => self.years.iter().map(|&y| FieldValue::Year(y)).collect(),
            Field::District => self
                .districts
                .iter()
                .map(|d| FieldValue::Text(d.clone()))
                .collect(),
            Field::Furnished => self
                .furnishings
                .iter()
                .map(|&f| FieldValue::Furnished(f))
                .collect(),
            Field::RoomCount => self
                .room_counts
                .iter()
                .map(|&n| FieldValue::RoomCount(n))
                .collect(),
            Field::Era => self.eras.iter().map(|e| FieldValue::Text(e.clone())).collect(),
        }
    }

    /// Most recent regulation year.
    pub fn latest_year(&self) -> Option<u16> {
        self.years.last().copied()
    }
}
