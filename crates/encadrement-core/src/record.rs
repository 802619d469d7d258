//! Regulation records and their natural key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::furnishing::furnishing_label;

/// One row of the rent regulation dataset.
///
/// Rates are euros per m² per month. Well-formed records satisfy
/// `min_rate <= ref_rate <= max_rate`; the store checks this at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationRecord {
    pub year: u16,
    pub district: String,
    pub furnished: bool,
    pub room_count: u8,
    pub era: String,
    pub min_rate: f64,
    pub ref_rate: f64,
    pub max_rate: f64,
}

impl RegulationRecord {
    /// The `(year, district, furnished, room_count, era)` tuple identifying this record.
    pub fn key(&self) -> NaturalKey {
        NaturalKey {
            year: self.year,
            district: self.district.clone(),
            furnished: self.furnished,
            room_count: self.room_count,
            era: self.era.clone(),
        }
    }

    /// Whether this record has exactly the given key.
    pub fn has_key(&self, key: &NaturalKey) -> bool {
        self.year == key.year
            && self.furnished == key.furnished
            && self.room_count == key.room_count
            && self.district == key.district
            && self.era == key.era
    }

    /// The per-m² rate triple.
    pub fn band(&self) -> RentBand {
        RentBand {
            min: self.min_rate,
            reference: self.ref_rate,
            max: self.max_rate,
        }
    }
}

/// Attribute tuple that identifies a single regulation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NaturalKey {
    pub year: u16,
    pub district: String,
    pub furnished: bool,
    pub room_count: u8,
    pub era: String,
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {} pièce{} / {}",
            self.year,
            self.district,
            furnishing_label(self.furnished),
            self.room_count,
            if self.room_count > 1 { "s" } else { "" },
            self.era,
        )
    }
}

/// A (min, reference, max) triple, either per m² or scaled to a whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentBand {
    pub min: f64,
    pub reference: f64,
    pub max: f64,
}

impl RentBand {
    /// `min <= reference <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.reference && self.reference <= self.max
    }

    /// Multiply every bound by `factor` (a surface area, for monthly figures).
    pub fn scaled(&self, factor: f64) -> RentBand {
        RentBand {
            min: self.min * factor,
            reference: self.reference * factor,
            max: self.max * factor,
        }
    }
}
