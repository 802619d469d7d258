//! Rent evaluation against a regulation band.
//!
//! The asking rent is reduced to a per-m² figure and placed on a ladder of
//! inclusive upper bounds, checked top-down:
//!
//! | per-m² rent            | tier           |
//! |------------------------|----------------|
//! | `<= min`               | `EXCELLENT`    |
//! | `<= reference`         | `GOOD`         |
//! | `<= max`               | `ACCEPTABLE`   |
//! | `> max`                | `OVER_CEILING` |
//!
//! Nothing is rounded here. Two-decimal rounding is left to presentation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::{NaturalKey, RegulationRecord, RentBand};

/// Compliance tier of an asking rent relative to its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// At or below the floor rate.
    Excellent,
    /// Above the floor, at or below the reference rate.
    Good,
    /// Above the reference, at or below the ceiling. Room to negotiate.
    Acceptable,
    /// Above the legal ceiling.
    OverCeiling,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Acceptable => "ACCEPTABLE",
            Self::OverCeiling => "OVER_CEILING",
        }
    }

    /// Every tier except [`Tier::OverCeiling`] is within the legal ceiling.
    pub fn is_compliant(&self) -> bool {
        !matches!(self, Self::OverCeiling)
    }

    /// Place a per-m² rent on the ladder of `band`.
    pub fn classify(rent_per_m2: f64, band: &RentBand) -> Tier {
        if rent_per_m2 <= band.min {
            Self::Excellent
        } else if rent_per_m2 <= band.reference {
            Self::Good
        } else if rent_per_m2 <= band.max {
            Self::Acceptable
        } else {
            Self::OverCeiling
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one unit against its matched regulation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub key: NaturalKey,
    pub tier: Tier,
    /// Asking rent divided by surface area, € per m² per month.
    pub rent_per_m2: f64,
    pub surface_area: f64,
    pub monthly_rent: f64,
    /// The matched record's per-m² rates.
    pub rates: RentBand,
    /// Rates multiplied by the surface area, € per month.
    pub monthly: RentBand,
}

/// Outcome of a verify query.
///
/// A missing band is an expected answer (a district renamed between years,
/// an era absent for some room count), not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Evaluated(Evaluation),
    NotFound { key: NaturalKey },
}

impl Verdict {
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Self::Evaluated(evaluation) => Some(evaluation),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Reject unit figures that cannot be evaluated.
///
/// Surface area and rent must both be finite and strictly positive.
pub fn validate_unit(surface_area: f64, monthly_rent: f64) -> Result<(), ValidationError> {
    if !(surface_area.is_finite() && surface_area > 0.0) {
        return Err(ValidationError::NonPositiveSurface(surface_area));
    }
    if !(monthly_rent.is_finite() && monthly_rent > 0.0) {
        return Err(ValidationError::NonPositiveRent(monthly_rent));
    }
    Ok(())
}

/// Evaluate an asking rent against `record`.
///
/// Validation runs before any arithmetic, so a zero surface never reaches
/// the division.
pub fn evaluate(
    record: &RegulationRecord,
    surface_area: f64,
    monthly_rent: f64,
) -> Result<Evaluation, ValidationError> {
    validate_unit(surface_area, monthly_rent)?;

    let rates = record.band();
    let rent_per_m2 = monthly_rent / surface_area;

    Ok(Evaluation {
        key: record.key(),
        tier: Tier::classify(rent_per_m2, &rates),
        rent_per_m2,
        surface_area,
        monthly_rent,
        rates,
        monthly: rates.scaled(surface_area),
    })
}
