pub mod error;
pub mod evaluate;
pub mod furnishing;
pub mod query;
pub mod record;
pub mod schema;

pub use error::ValidationError;
pub use evaluate::{Evaluation, Tier, Verdict, evaluate};
pub use furnishing::{furnishing_label, is_furnished, parse_furnishing};
pub use query::{Field, FieldValue, FilterQuery, VerifyQuery};
pub use record::{NaturalKey, RegulationRecord, RentBand};
pub use schema::dataset;
