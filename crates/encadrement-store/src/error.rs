use std::fmt;

use encadrement_core::NaturalKey;
use thiserror::Error;

/// Failure to load the regulation dataset. Fatal at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("unsupported dataset format: {0} (expected .json or .parquet)")]
    UnsupportedFormat(std::path::PathBuf),

    #[error("cannot read {0}: built without the `parquet` feature")]
    ParquetDisabled(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("dataset failed integrity checks ({} issues):\n{}", .0.len(), format_issues(.0))]
    Integrity(Vec<IntegrityIssue>),

    #[cfg(feature = "parquet")]
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// A load-time finding that breaks an assumption of the resolver or the
/// classification ladder.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    /// The same natural key appears on more than one row.
    DuplicateKey { key: NaturalKey, rows: Vec<usize> },
    /// `min <= ref <= max` does not hold.
    UnorderedBand {
        row: usize,
        key: NaturalKey,
        min: f64,
        reference: f64,
        max: f64,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key, rows } => {
                let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
                write!(f, "duplicate key [{key}] on rows {}", rows.join(", "))
            }
            Self::UnorderedBand {
                row,
                key,
                min,
                reference,
                max,
            } => write!(
                f,
                "row {row} [{key}]: band not ordered (min {min}, ref {reference}, max {max})"
            ),
        }
    }
}

fn format_issues(issues: &[IntegrityIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}
