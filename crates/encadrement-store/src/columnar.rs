//! Parquet dataset loader.
//!
//! Reads Arrow record batches from a Parquet export, casts each required
//! column to the normalised type from [`dataset::regulation_schema`], then
//! builds records row by row.

use std::path::Path;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::compute::cast;
use arrow::record_batch::RecordBatch;
use encadrement_core::{RegulationRecord, dataset};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

use crate::StoreError;
use crate::raw::RawRecord;

/// Read all record batches from a Parquet file.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Read and normalise every record of a Parquet dataset file.
pub fn read_parquet_records(path: &Path) -> Result<Vec<RegulationRecord>, StoreError> {
    let batches = read_parquet(path)?;
    let records = batches_to_records(&batches)?;
    debug!(path = %path.display(), rows = records.len(), "parsed parquet dataset");
    Ok(records)
}

/// Convert regulation batches into records, numbering rows across batches.
pub fn batches_to_records(batches: &[RecordBatch]) -> Result<Vec<RegulationRecord>, StoreError> {
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    let mut records = Vec::with_capacity(total);

    for batch in batches {
        let columns = NormalisedColumns::from_batch(batch)?;
        for i in 0..batch.num_rows() {
            let row = records.len();
            let raw = columns.raw_record(i, row)?;
            records.push(raw.into_record(row)?);
        }
    }

    Ok(records)
}

// ── Column normalisation ──

struct NormalisedColumns {
    year: ArrayRef,
    district: ArrayRef,
    furnishing: ArrayRef,
    room_count: ArrayRef,
    era: ArrayRef,
    min: ArrayRef,
    reference: ArrayRef,
    max: ArrayRef,
}

impl NormalisedColumns {
    fn from_batch(batch: &RecordBatch) -> Result<Self, StoreError> {
        let schema = dataset::regulation_schema();
        let column = |name: &'static str| -> Result<ArrayRef, StoreError> {
            let source = batch
                .column_by_name(name)
                .ok_or(StoreError::MissingColumn(name))?;
            let target = schema.field_with_name(name)?.data_type();
            Ok(cast(source.as_ref(), target)?)
        };

        Ok(Self {
            year: column(dataset::YEAR)?,
            district: column(dataset::DISTRICT)?,
            furnishing: column(dataset::FURNISHING)?,
            room_count: column(dataset::ROOM_COUNT)?,
            era: column(dataset::ERA)?,
            min: column(dataset::MIN_RATE)?,
            reference: column(dataset::REF_RATE)?,
            max: column(dataset::MAX_RATE)?,
        })
    }

    fn raw_record(&self, i: usize, row: usize) -> Result<RawRecord, StoreError> {
        let year = get_i32(&self.year, i, dataset::YEAR, row)?;
        let room_count = get_i32(&self.room_count, i, dataset::ROOM_COUNT, row)?;

        Ok(RawRecord {
            year: u16::try_from(year).map_err(|_| out_of_range(dataset::YEAR, year, row))?,
            district: get_string(&self.district, i, dataset::DISTRICT, row)?,
            furnishing: get_string(&self.furnishing, i, dataset::FURNISHING, row)?,
            room_count: u8::try_from(room_count)
                .map_err(|_| out_of_range(dataset::ROOM_COUNT, room_count, row))?,
            era: get_string(&self.era, i, dataset::ERA, row)?,
            min: get_f64(&self.min, i, dataset::MIN_RATE, row)?,
            reference: get_f64(&self.reference, i, dataset::REF_RATE, row)?,
            max: get_f64(&self.max, i, dataset::MAX_RATE, row)?,
        })
    }
}

// ── Arrow extraction helpers ──

fn null_value(column: &str, row: usize) -> StoreError {
    StoreError::MalformedRecord {
        row,
        reason: format!("null or unparseable value in column {column}"),
    }
}

fn out_of_range(column: &str, value: i32, row: usize) -> StoreError {
    StoreError::MalformedRecord {
        row,
        reason: format!("{value} is out of range for column {column}"),
    }
}

fn get_string(col: &ArrayRef, i: usize, name: &str, row: usize) -> Result<String, StoreError> {
    if col.is_null(i) {
        return Err(null_value(name, row));
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(i).to_string())
        .ok_or_else(|| null_value(name, row))
}

fn get_i32(col: &ArrayRef, i: usize, name: &str, row: usize) -> Result<i32, StoreError> {
    if col.is_null(i) {
        return Err(null_value(name, row));
    }
    col.as_any()
        .downcast_ref::<Int32Array>()
        .map(|arr| arr.value(i))
        .ok_or_else(|| null_value(name, row))
}

fn get_f64(col: &ArrayRef, i: usize, name: &str, row: usize) -> Result<f64, StoreError> {
    if col.is_null(i) {
        return Err(null_value(name, row));
    }
    col.as_any()
        .downcast_ref::<Float64Array>()
        .map(|arr| arr.value(i))
        .ok_or_else(|| null_value(name, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{Int64Array, LargeStringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::ArrowWriter;

    /// A batch shaped like the published export: string year, i64 rooms,
    /// large strings for the district.
    fn export_batch(years: Vec<Option<&str>>) -> RecordBatch {
        let n = years.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new("annee", DataType::Utf8, true),
            Field::new("nom_quartier", DataType::LargeUtf8, false),
            Field::new("meuble_txt", DataType::Utf8, false),
            Field::new("piece", DataType::Int64, false),
            Field::new("epoque", DataType::Utf8, false),
            Field::new("min", DataType::Float64, false),
            Field::new("ref", DataType::Float64, false),
            Field::new("max", DataType::Float64, false),
            Field::new("id_quartier", DataType::Int64, false),
        ]));
        let furnishing: Vec<&str> = (0..n)
            .map(|i| if i % 2 == 0 { "meublé" } else { "non meublé" })
            .collect();
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(years)) as ArrayRef,
                Arc::new(LargeStringArray::from(vec!["Opéra"; n])) as ArrayRef,
                Arc::new(StringArray::from(furnishing)) as ArrayRef,
                Arc::new(Int64Array::from((1..=n as i64).collect::<Vec<_>>())) as ArrayRef,
                Arc::new(StringArray::from(vec!["1946-1970"; n])) as ArrayRef,
                Arc::new(Float64Array::from(vec![18.0; n])) as ArrayRef,
                Arc::new(Float64Array::from(vec![22.0; n])) as ArrayRef,
                Arc::new(Float64Array::from(vec![26.0; n])) as ArrayRef,
                Arc::new(Int64Array::from(vec![36; n])) as ArrayRef,
            ],
        )
        .unwrap()
    }

    fn write_parquet(path: &Path, batch: &RecordBatch) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn converts_export_types() {
        let batch = export_batch(vec![Some("2023"), Some("2023"), Some("2022")]);
        let records = batches_to_records(&[batch]).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].year, 2023);
        assert_eq!(records[2].year, 2022);
        assert_eq!(records[1].room_count, 2);
        assert!(records[0].furnished);
        assert!(!records[1].furnished);
        assert_eq!(records[2].district, "Opéra");
        assert_eq!(records[2].max_rate, 26.0);
    }

    #[test]
    fn rows_numbered_across_batches() {
        let first = export_batch(vec![Some("2023"), Some("2023")]);
        let second = export_batch(vec![Some("2023"), None]);
        match batches_to_records(&[first, second]) {
            Err(StoreError::MalformedRecord { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_year_rejected() {
        let batch = export_batch(vec![Some("deux mille")]);
        assert!(matches!(
            batches_to_records(&[batch]),
            Err(StoreError::MalformedRecord { row: 0, .. })
        ));
    }

    #[test]
    fn missing_column_named() {
        let schema = Arc::new(Schema::new(vec![Field::new("annee", DataType::Utf8, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(vec!["2023"])) as ArrayRef]).unwrap();
        assert!(matches!(
            batches_to_records(&[batch]),
            Err(StoreError::MissingColumn("nom_quartier"))
        ));
    }

    #[test]
    fn parquet_file_round_trip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bands.parquet");
        write_parquet(&path, &export_batch(vec![Some("2023"), Some("2023")]));

        let records = read_parquet_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key().to_string(), "2023 / Opéra / meublé / 1 pièce / 1946-1970");
    }

    #[test]
    fn load_missing_file_errors() {
        let result = read_parquet(Path::new("/nonexistent/file.parquet"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
