//! Load-time integrity checks.
//!
//! The resolver assumes each natural key occurs once, and the tier ladder
//! assumes `min <= ref <= max`. Both are checked over the whole dataset and
//! every violation is reported, not just the first.

use std::collections::HashMap;

use encadrement_core::{NaturalKey, RegulationRecord};

use crate::error::IntegrityIssue;

/// All integrity findings, duplicate keys first (in order of first
/// occurrence) then unordered bands (in row order).
pub fn check_integrity(records: &[RegulationRecord]) -> Vec<IntegrityIssue> {
    let mut issues = duplicate_keys(records);
    issues.extend(unordered_bands(records));
    issues
}

fn duplicate_keys(records: &[RegulationRecord]) -> Vec<IntegrityIssue> {
    let mut rows_by_key: HashMap<NaturalKey, Vec<usize>> = HashMap::new();
    let mut first_seen: Vec<NaturalKey> = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let rows = rows_by_key.entry(record.key()).or_default();
        if rows.is_empty() {
            first_seen.push(record.key());
        }
        rows.push(row);
    }

    first_seen
        .into_iter()
        .filter_map(|key| {
            let rows = rows_by_key.remove(&key)?;
            (rows.len() > 1).then_some(IntegrityIssue::DuplicateKey { key, rows })
        })
        .collect()
}

fn unordered_bands(records: &[RegulationRecord]) -> Vec<IntegrityIssue> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.band().is_ordered())
        .map(|(row, record)| IntegrityIssue::UnorderedBand {
            row,
            key: record.key(),
            min: record.min_rate,
            reference: record.ref_rate,
            max: record.max_rate,
        })
        .collect()
}
