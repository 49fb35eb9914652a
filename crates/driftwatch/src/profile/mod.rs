//! Profile types for representing per-column and per-dataset statistics.

mod column;
mod dataset;
mod types;

pub use column::ColumnProfile;
pub use dataset::DatasetProfile;
pub use types::DataType;
