use thiserror::Error;

use crate::query::Field;

/// Invalid query input. Recoverable: reported to the caller as a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("surface area must be a positive number of m² (got {0})")]
    NonPositiveSurface(f64),

    #[error("monthly rent must be a positive amount (got {0})")]
    NonPositiveRent(f64),

    #[error("missing required field: {0}")]
    MissingField(Field),
}
