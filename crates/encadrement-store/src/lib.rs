//! Storage layer: dataset loaders, integrity checks, band index and query façade.

mod error;
pub use error::{IntegrityIssue, StoreError};

mod raw;

pub mod facade;
pub mod index;
pub mod integrity;
pub mod json;
pub mod store;

pub use facade::RentControl;
pub use index::{BandIndex, filter};
pub use store::{LoadOptions, RecordStore};

#[cfg(feature = "parquet")]
pub mod columnar;
#[cfg(feature = "parquet")]
pub use columnar::read_parquet;
