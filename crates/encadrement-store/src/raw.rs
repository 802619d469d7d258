//! Dataset rows as published, before normalisation.

use std::fmt::Display;
use std::str::FromStr;

use encadrement_core::{RegulationRecord, is_furnished};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::StoreError;

/// One dataset row, field names as in the Ville de Paris export.
///
/// Columns not listed here (`id_zone`, `id_quartier`, `ville`,
/// `geo_shape`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "annee", deserialize_with = "number_or_string")]
    pub year: u16,
    #[serde(rename = "nom_quartier")]
    pub district: String,
    #[serde(rename = "meuble_txt")]
    pub furnishing: String,
    #[serde(rename = "piece", deserialize_with = "number_or_string")]
    pub room_count: u8,
    #[serde(rename = "epoque")]
    pub era: String,
    pub min: f64,
    #[serde(rename = "ref")]
    pub reference: f64,
    pub max: f64,
}

impl RawRecord {
    /// Normalise into a record, deriving the furnished flag from its label.
    ///
    /// `row` is the zero-based position in the source, used in errors.
    pub fn into_record(self, row: usize) -> Result<RegulationRecord, StoreError> {
        let malformed = |reason: String| StoreError::MalformedRecord { row, reason };

        if self.district.trim().is_empty() {
            return Err(malformed("empty district".into()));
        }
        if self.era.trim().is_empty() {
            return Err(malformed("empty era".into()));
        }
        if self.room_count == 0 {
            return Err(malformed("room count must be at least 1".into()));
        }
        for (name, rate) in [("min", self.min), ("ref", self.reference), ("max", self.max)] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(malformed(format!("{name} rate must be a non-negative number, got {rate}")));
            }
        }

        Ok(RegulationRecord {
            year: self.year,
            district: self.district,
            furnished: is_furnished(&self.furnishing),
            room_count: self.room_count,
            era: self.era,
            min_rate: self.min,
            ref_rate: self.reference,
            max_rate: self.max,
        })
    }
}

/// Accept an integer given either as a JSON number or a numeric string.
///
/// The published export carries `annee` as `"2023"`.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => {
            T::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
        }
        Repr::Text(s) => s
            .trim()
            .parse::<T>()
            .map_err(|e| D::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}
