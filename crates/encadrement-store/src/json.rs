//! JSON dataset loader.
//!
//! The dataset is a single JSON array of row objects, as bundled with the
//! lookup application. Rows are decoded one at a time so an error can name
//! the offending row.

use std::io::Read;
use std::path::Path;

use encadrement_core::RegulationRecord;
use tracing::debug;

use crate::StoreError;
use crate::raw::RawRecord;

/// Read and normalise every record of a JSON dataset file.
pub fn read_json(path: &Path) -> Result<Vec<RegulationRecord>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let records = parse_json_reader(std::io::BufReader::new(file))?;
    debug!(path = %path.display(), rows = records.len(), "parsed json dataset");
    Ok(records)
}

/// Normalise every record of a JSON dataset read from `reader`.
pub fn parse_json_reader<R: Read>(reader: R) -> Result<Vec<RegulationRecord>, StoreError> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    rows_to_records(rows)
}

/// Normalise every record of a JSON dataset held in memory.
pub fn parse_json_str(text: &str) -> Result<Vec<RegulationRecord>, StoreError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(text)?;
    rows_to_records(rows)
}

fn rows_to_records(rows: Vec<serde_json::Value>) -> Result<Vec<RegulationRecord>, StoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, value)| {
            let raw: RawRecord =
                serde_json::from_value(value).map_err(|e| StoreError::MalformedRecord {
                    row,
                    reason: e.to_string(),
                })?;
            raw.into_record(row)
        })
        .collect()
}
