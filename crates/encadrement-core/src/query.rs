//! Query shapes accepted by the lookup and verify entry points.
//!
//! A [`FilterQuery`] constrains any subset of the five key attributes; unset
//! fields are wildcards. A [`VerifyQuery`] pins all five (as a
//! [`NaturalKey`]) and adds the unit's surface area and monthly rent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::furnishing::furnishing_label;
use crate::record::{NaturalKey, RegulationRecord};
use crate::schema::dataset;

/// A filterable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    District,
    Furnished,
    RoomCount,
    Era,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Year,
        Field::District,
        Field::Furnished,
        Field::RoomCount,
        Field::Era,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::District => "district",
            Self::Furnished => "furnished",
            Self::RoomCount => "room_count",
            Self::Era => "era",
        }
    }

    /// Column name in the published dataset.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Year => dataset::YEAR,
            Self::District => dataset::DISTRICT,
            Self::Furnished => dataset::FURNISHING,
            Self::RoomCount => dataset::ROOM_COUNT,
            Self::Era => dataset::ERA,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the English names, the dataset column names, and `rooms`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "annee" => Ok(Self::Year),
            "district" | "nom_quartier" | "quartier" => Ok(Self::District),
            "furnished" | "meuble_txt" | "meuble" => Ok(Self::Furnished),
            "room_count" | "rooms" | "piece" => Ok(Self::RoomCount),
            "era" | "epoque" => Ok(Self::Era),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// A distinct attribute value, as returned by unique-value listings.
///
/// Values of one field always share a variant, so the derived ordering is
/// numeric for years and room counts, lexicographic for text, and
/// `false < true` for furnishing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Year(u16),
    Text(String),
    Furnished(bool),
    RoomCount(u8),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::Text(s) => f.write_str(s),
            Self::Furnished(b) => f.write_str(furnishing_label(*b)),
            Self::RoomCount(n) => write!(f, "{n}"),
        }
    }
}

/// Exact-match constraints over any subset of the key attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub year: Option<u16>,
    pub district: Option<String>,
    pub furnished: Option<bool>,
    pub room_count: Option<u8>,
    pub era: Option<String>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn furnished(mut self, furnished: bool) -> Self {
        self.furnished = Some(furnished);
        self
    }

    pub fn room_count(mut self, room_count: u8) -> Self {
        self.room_count = Some(room_count);
        self
    }

    pub fn era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }

    /// Fields carrying a constraint, in [`Field::ALL`] order.
    pub fn constrained_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Year => self.year.is_some(),
                Field::District => self.district.is_some(),
                Field::Furnished => self.furnished.is_some(),
                Field::RoomCount => self.room_count.is_some(),
                Field::Era => self.era.is_some(),
            })
            .collect()
    }

    /// True when every field is a wildcard.
    pub fn is_unconstrained(&self) -> bool {
        self.constrained_fields().is_empty()
    }

    /// Whether `record` satisfies every constrained field.
    ///
    /// Strings compare exactly: no case folding or trimming.
    pub fn matches(&self, record: &RegulationRecord) -> bool {
        self.year.is_none_or(|y| record.year == y)
            && self.furnished.is_none_or(|f| record.furnished == f)
            && self.room_count.is_none_or(|n| record.room_count == n)
            && self
                .district
                .as_deref()
                .is_none_or(|d| record.district == d)
            && self.era.as_deref().is_none_or(|e| record.era == e)
    }

    /// Union of both constraint sets. Fields set in `other` take precedence.
    pub fn merge(&self, other: &FilterQuery) -> FilterQuery {
        FilterQuery {
            year: other.year.or(self.year),
            district: other.district.clone().or_else(|| self.district.clone()),
            furnished: other.furnished.or(self.furnished),
            room_count: other.room_count.or(self.room_count),
            era: other.era.clone().or_else(|| self.era.clone()),
        }
    }

    /// The full key, if every field is constrained.
    pub fn to_key(&self) -> Result<NaturalKey, ValidationError> {
        Ok(NaturalKey {
            year: self.year.ok_or(ValidationError::MissingField(Field::Year))?,
            district: self
                .district
                .clone()
                .ok_or(ValidationError::MissingField(Field::District))?,
            furnished: self
                .furnished
                .ok_or(ValidationError::MissingField(Field::Furnished))?,
            room_count: self
                .room_count
                .ok_or(ValidationError::MissingField(Field::RoomCount))?,
            era: self
                .era
                .clone()
                .ok_or(ValidationError::MissingField(Field::Era))?,
        })
    }
}

impl From<&NaturalKey> for FilterQuery {
    fn from(key: &NaturalKey) -> Self {
        FilterQuery {
            year: Some(key.year),
            district: Some(key.district.clone()),
            furnished: Some(key.furnished),
            room_count: Some(key.room_count),
            era: Some(key.era.clone()),
        }
    }
}

/// A fully-specified unit to check against its regulation band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyQuery {
    pub key: NaturalKey,
    /// Living area in m².
    pub surface_area: f64,
    /// Rent excluding charges, € per month.
    pub monthly_rent: f64,
}

impl VerifyQuery {
    pub fn new(key: NaturalKey, surface_area: f64, monthly_rent: f64) -> Self {
        Self {
            key,
            surface_area,
            monthly_rent,
        }
    }

    /// Promote a filter into a verify query.
    ///
    /// Fails with [`ValidationError::MissingField`] naming the first
    /// wildcard field.
    pub fn from_filter(
        filter: &FilterQuery,
        surface_area: f64,
        monthly_rent: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(filter.to_key()?, surface_area, monthly_rent))
    }

    /// Reject non-positive or non-finite surface area and rent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::evaluate::validate_unit(self.surface_area, self.monthly_rent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u16, district: &str, furnished: bool, rooms: u8, era: &str) -> RegulationRecord {
        RegulationRecord {
            year,
            district: district.into(),
            furnished,
            room_count: rooms,
            era: era.into(),
            min_rate: 20.0,
            ref_rate: 25.0,
            max_rate: 30.0,
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = FilterQuery::new();
        assert!(q.is_unconstrained());
        assert!(q.matches(&record(2023, "Opéra", true, 2, "1946-1970")));
        assert!(q.matches(&record(2019, "Belleville", false, 4, "Avant 1946")));
    }

    #[test]
    fn every_constrained_field_must_match() {
        let r = record(2023, "Opéra", true, 2, "1946-1970");
        assert!(FilterQuery::new().year(2023).district("Opéra").matches(&r));
        assert!(!FilterQuery::new().year(2023).district("Belleville").matches(&r));
        assert!(!FilterQuery::new().furnished(false).matches(&r));
        assert!(!FilterQuery::new().room_count(3).matches(&r));
        assert!(FilterQuery::new().era("1946-1970").matches(&r));
    }

    #[test]
    fn strings_compare_exactly() {
        let r = record(2023, "Opéra", true, 2, "1946-1970");
        assert!(!FilterQuery::new().district("opéra").matches(&r));
        assert!(!FilterQuery::new().district("Opéra ").matches(&r));
    }

    #[test]
    fn constrained_fields_in_canonical_order() {
        let q = FilterQuery::new().era("Avant 1946").year(2023);
        assert_eq!(q.constrained_fields(), vec![Field::Year, Field::Era]);
    }

    #[test]
    fn merge_takes_union() {
        let a = FilterQuery::new().year(2023).district("Opéra");
        let b = FilterQuery::new().room_count(2).district("Belleville");
        let merged = a.merge(&b);
        assert_eq!(merged.year, Some(2023));
        assert_eq!(merged.room_count, Some(2));
        assert_eq!(merged.district.as_deref(), Some("Belleville"));
    }

    #[test]
    fn verify_from_complete_filter() {
        let filter = FilterQuery::new()
            .year(2023)
            .district("Opéra")
            .furnished(true)
            .room_count(2)
            .era("1946-1970");
        let q = VerifyQuery::from_filter(&filter, 40.0, 1000.0).unwrap();
        assert_eq!(q.key, record(2023, "Opéra", true, 2, "1946-1970").key());
        assert_eq!(FilterQuery::from(&q.key), filter);
    }

    #[test]
    fn verify_from_partial_filter_names_missing_field() {
        let filter = FilterQuery::new().year(2023).district("Opéra").era("1946-1970");
        let err = VerifyQuery::from_filter(&filter, 40.0, 1000.0).unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Furnished));
    }

    #[test]
    fn field_parsing_accepts_dataset_columns() {
        assert_eq!("annee".parse::<Field>().unwrap(), Field::Year);
        assert_eq!("rooms".parse::<Field>().unwrap(), Field::RoomCount);
        assert_eq!("epoque".parse::<Field>().unwrap(), Field::Era);
        for field in Field::ALL {
            assert_eq!(field.column().parse::<Field>().unwrap(), field);
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("surface".parse::<Field>().is_err());
    }

    #[test]
    fn field_columns_match_dataset_schema() {
        let schema = dataset::regulation_schema();
        for field in Field::ALL {
            assert!(schema.field_with_name(field.column()).is_ok(), "{field}");
        }
        assert_eq!(Field::RoomCount.column(), dataset::ROOM_COUNT);
    }

    #[test]
    fn field_values_order_within_a_field() {
        let mut rooms = vec![FieldValue::RoomCount(10), FieldValue::RoomCount(2)];
        rooms.sort();
        assert_eq!(rooms, vec![FieldValue::RoomCount(2), FieldValue::RoomCount(10)]);
        assert!(FieldValue::Furnished(false) < FieldValue::Furnished(true));
        assert_eq!(FieldValue::Furnished(true).to_string(), "meublé");
    }
}
