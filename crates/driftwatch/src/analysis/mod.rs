//! Analysis engines: column statistics, outlier detection, drift comparison.

mod anomaly;
mod drift;
mod statistics;

pub use anomaly::{AnomalyDetector, AnomalyMethod, AnomalyRecord};
pub use drift::{DriftComparator, DriftConfig, DriftResult};
pub use statistics::ColumnAnalyzer;
