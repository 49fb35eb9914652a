//! Driftwatch: statistical profiling and drift detection for tabular datasets.
//!
//! Driftwatch scans a dataset of uniform records, computes per-column
//! statistical summaries, flags outliers, and compares two profiles over time
//! to detect distributional drift.
//!
//! # Core Principles
//!
//! - **Total over well-formed input**: empty columns, all-null columns, and
//!   zero-variance columns produce defaults, never errors
//! - **Value objects**: profiles are immutable once returned and round-trip
//!   through JSON for baseline persistence
//! - **Explicit configuration**: thresholds and methods are passed in, with
//!   no global mutable state
//!
//! # Example
//!
//! ```no_run
//! use driftwatch::{DatasetProfiler, Loader};
//!
//! let loader = Loader::new();
//! let (records, _source) = loader.load_file("orders.csv").unwrap();
//!
//! let profiler = DatasetProfiler::new();
//! let profile = profiler.profile_dataset(&records, "orders").unwrap();
//!
//! println!("Columns: {}", profile.total_columns);
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod profile;
pub mod report;
pub mod value;

mod profiler;

pub use analysis::{
    AnomalyDetector, AnomalyMethod, AnomalyRecord, ColumnAnalyzer, DriftComparator, DriftConfig,
    DriftResult,
};
pub use error::{DriftwatchError, Result};
pub use input::{Loader, LoaderConfig, SourceMetadata};
pub use profile::{ColumnProfile, DataType, DatasetProfile};
pub use profiler::{DatasetProfiler, ProfilerConfig};
pub use report::ReportGenerator;
pub use value::{column_order, column_values, Record, Value};
