//! Query façade over the record store and its index.
//!
//! `RentControl` owns an immutable [`RecordStore`] and the [`BandIndex`]
//! derived from it. Every method is a pure function of its arguments and the
//! loaded data, so a single instance can be shared across threads.

use std::path::Path;

use encadrement_core::{
    Field, FieldValue, FilterQuery, NaturalKey, RegulationRecord, ValidationError, Verdict,
    VerifyQuery, evaluate,
};
use tracing::debug;

use crate::index::{BandIndex, filter};
use crate::store::{LoadOptions, RecordStore};
use crate::StoreError;

/// Entry point for lookups (`search`) and rent checks (`verify`).
#[derive(Debug)]
pub struct RentControl {
    store: RecordStore,
    index: BandIndex,
}

impl RentControl {
    /// Load a dataset file and build the index.
    pub fn open(path: &Path, options: &LoadOptions) -> Result<Self, StoreError> {
        Ok(Self::new(RecordStore::load(path, options)?))
    }

    /// Build from already-normalised records.
    pub fn from_records(
        records: Vec<RegulationRecord>,
        options: &LoadOptions,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(RecordStore::from_records(records, options)?))
    }

    pub fn new(store: RecordStore) -> Self {
        let index = BandIndex::build(store.records());
        Self { store, index }
    }

    pub fn records(&self) -> &[RegulationRecord] {
        self.store.records()
    }

    /// Every record matching `query`, in dataset order. An unconstrained
    /// query returns the whole dataset.
    pub fn search(&self, query: &FilterQuery) -> Vec<&RegulationRecord> {
        filter(self.store.records(), query)
    }

    /// The record with exactly this key. With duplicate keys (lenient
    /// load), the first in dataset order.
    pub fn resolve(&self, key: &NaturalKey) -> Option<&RegulationRecord> {
        let record = self.index.position(key).and_then(|row| self.store.get(row));
        if record.is_none() {
            debug!(%key, "no regulation band for key");
        }
        record
    }

    /// Check an asking rent against its regulation band.
    ///
    /// Input figures are validated before the lookup; an unknown key yields
    /// [`Verdict::NotFound`] without evaluating anything.
    pub fn verify(&self, query: &VerifyQuery) -> Result<Verdict, ValidationError> {
        query.validate()?;
        match self.resolve(&query.key) {
            Some(record) => Ok(Verdict::Evaluated(evaluate(
                record,
                query.surface_area,
                query.monthly_rent,
            )?)),
            None => Ok(Verdict::NotFound {
                key: query.key.clone(),
            }),
        }
    }

    /// Distinct values of `field` across the dataset, sorted.
    pub fn unique_values(&self, field: Field) -> Vec<FieldValue> {
        self.index.unique_values(field)
    }

    /// Most recent regulation year in the dataset.
    pub fn latest_year(&self) -> Option<u16> {
        self.index.latest_year()
    }
}
