//! Column profile definition.

use serde::{Deserialize, Serialize};

use super::types::DataType;

/// Statistical summary for a single column in one profiling run.
///
/// The numeric fields (`min`..`std_dev`) are present only when the inferred
/// type is numeric and at least one value coerces; the length fields only for
/// string columns. Absent means absent, not zero. `std_dev` uses the sample
/// formula and is 0 with fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name, unique within a dataset profile.
    pub column_name: String,
    /// Inferred data type.
    pub data_type: DataType,
    /// Total number of values (including nulls).
    pub total_count: u64,
    /// Number of null values.
    pub null_count: u64,
    /// Percentage of nulls (0-100), 0 when the column is empty.
    pub null_percentage: f64,
    /// Number of distinct non-null values.
    pub distinct_count: u64,
    /// Percentage of distinct values (0-100), 0 when the column is empty.
    pub distinct_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    /// Minimum character length of non-null values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum character length of non-null values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Mean character length of non-null values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_length: Option<f64>,
    /// Most frequent values as (value, frequency) pairs, capped, descending
    /// frequency with ties in first-seen order.
    #[serde(default)]
    pub top_values: Vec<(String, u64)>,
    /// Human-readable anomaly descriptions.
    #[serde(default)]
    pub anomalies: Vec<String>,
}

impl ColumnProfile {
    /// Create a profile with counts filled in and all statistics absent.
    pub fn empty(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: DataType::Null,
            total_count: 0,
            null_count: 0,
            null_percentage: 0.0,
            distinct_count: 0,
            distinct_percentage: 0.0,
            min: None,
            max: None,
            mean: None,
            median: None,
            std_dev: None,
            min_length: None,
            max_length: None,
            mean_length: None,
            top_values: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    /// Number of non-null values.
    pub fn non_null_count(&self) -> u64 {
        self.total_count - self.null_count
    }
}
