//! Immutable in-memory record store.

use std::path::Path;

use encadrement_core::RegulationRecord;
use tracing::{info, warn};

use crate::StoreError;
use crate::integrity::check_integrity;

/// How integrity findings are handled at load time.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Reject datasets with duplicate keys or unordered bands. When false,
    /// findings are logged and loading proceeds; duplicate keys then resolve
    /// to their first occurrence.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Regulation records in source order. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<RegulationRecord>,
}

impl RecordStore {
    /// Load a dataset file, dispatching on its extension (`.json`, `.parquet`).
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let records = match extension.as_deref() {
            Some("json") => crate::json::read_json(path)?,
            #[cfg(feature = "parquet")]
            Some("parquet") => crate::columnar::read_parquet_records(path)?,
            #[cfg(not(feature = "parquet"))]
            Some("parquet") => return Err(StoreError::ParquetDisabled(path.to_path_buf())),
            _ => return Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        };
        info!(path = %path.display(), "read regulation dataset");
        Self::from_records(records, options)
    }

    /// Build a store from a JSON dataset held in memory.
    pub fn from_json_str(text: &str, options: &LoadOptions) -> Result<Self, StoreError> {
        Self::from_records(crate::json::parse_json_str(text)?, options)
    }

    /// Build a store from already-normalised records, running integrity checks.
    pub fn from_records(
        records: Vec<RegulationRecord>,
        options: &LoadOptions,
    ) -> Result<Self, StoreError> {
        let issues = check_integrity(&records);
        if !issues.is_empty() {
            if options.strict {
                return Err(StoreError::Integrity(issues));
            }
            for issue in &issues {
                warn!(%issue, "integrity check failed, continuing in lenient mode");
            }
        }
        if records.is_empty() {
            warn!("regulation dataset is empty");
        }

        info!(count = records.len(), "loaded regulation records");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RegulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&RegulationRecord> {
        self.records.get(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
    }

    const DUPLICATED: &str = r#"[
        {"annee":"2023","nom_quartier":"Opéra","meuble_txt":"meublé","piece":2,
         "epoque":"1946-1970","min":18.0,"ref":22.0,"max":26.0},
        {"annee":"2023","nom_quartier":"Opéra","meuble_txt":"meublé","piece":2,
         "epoque":"1946-1970","min":19.0,"ref":23.0,"max":27.0},
        {"annee":"2023","nom_quartier":"Opéra","meuble_txt":"non meublé","piece":2,
         "epoque":"1946-1970","min":26.0,"ref":22.0,"max":18.0}
    ]"#;

    #[test]
    fn load_bundled_sample() {
        let store = RecordStore::load(
            &data_dir().join("encadrement-sample.json"),
            &LoadOptions::default(),
        )
        .unwrap();
        assert!(store.len() > 10, "expected a non-trivial sample, got {}", store.len());
        assert!(store.records().iter().any(|r| r.furnished));
        assert!(store.records().iter().any(|r| !r.furnished));
    }

    #[test]
    fn strict_load_reports_all_issues() {
        match RecordStore::from_json_str(DUPLICATED, &LoadOptions::default()) {
            Err(StoreError::Integrity(issues)) => {
                assert_eq!(issues.len(), 2);
                let message = StoreError::Integrity(issues).to_string();
                assert!(message.contains("duplicate key"));
                assert!(message.contains("band not ordered"));
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn lenient_load_keeps_source_order() {
        let store = RecordStore::from_json_str(DUPLICATED, &LoadOptions::lenient()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().min_rate, 18.0);
        assert_eq!(store.get(1).unwrap().min_rate, 19.0);
        assert!(store.get(3).is_none());
    }

    #[test]
    fn unsupported_extension() {
        let result = RecordStore::load(Path::new("bands.csv"), &LoadOptions::default());
        assert!(matches!(result, Err(StoreError::UnsupportedFormat(_))));
    }

    #[cfg(not(feature = "parquet"))]
    #[test]
    fn parquet_without_feature_names_the_feature() {
        let err = RecordStore::load(Path::new("bands.parquet"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::ParquetDisabled(_)));
        assert!(err.to_string().contains("`parquet` feature"));
    }

    #[test]
    fn empty_dataset_loads() {
        let store = RecordStore::from_json_str("[]", &LoadOptions::default()).unwrap();
        assert!(store.is_empty());
    }
}
