//! Dataset profiler: orchestrates per-column analysis and metric extraction.

use chrono::Utc;
use indexmap::IndexMap;

use crate::analysis::{
    AnomalyDetector, AnomalyMethod, ColumnAnalyzer, DriftComparator, DriftConfig, DriftResult,
};
use crate::error::{DriftwatchError, Result};
use crate::profile::DatasetProfile;
use crate::value::{column_order, column_values, Record};

/// Maximum length of a flattened metric name.
const MAX_METRIC_NAME_LENGTH: usize = 200;

/// Configuration for dataset profiling.
///
/// Passed explicitly so instantiation stays deterministic and test-isolated;
/// there are no module-level defaults to mutate.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Method used for per-column anomaly detection on numeric columns.
    pub anomaly_method: AnomalyMethod,
    /// Maximum entries kept in each column's `top_values`.
    pub top_values_cap: usize,
    /// Drift comparison configuration.
    pub drift: DriftConfig,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            anomaly_method: AnomalyMethod::Iqr,
            top_values_cap: 10,
            drift: DriftConfig::default(),
        }
    }
}

/// Profiles datasets and pairs profiles with baselines for drift detection.
pub struct DatasetProfiler {
    config: ProfilerConfig,
    analyzer: ColumnAnalyzer,
    detector: AnomalyDetector,
}

impl DatasetProfiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        let analyzer = ColumnAnalyzer::with_cap(config.top_values_cap);
        Self {
            config,
            analyzer,
            detector: AnomalyDetector::new(),
        }
    }

    /// Profile a dataset of records.
    ///
    /// Columns are discovered as the union of keys across all records in
    /// first-seen order; a record missing a key contributes a null for that
    /// column. Numeric columns additionally run anomaly detection with the
    /// configured method, and each finding's reason is appended to the
    /// column's `anomalies`.
    pub fn profile_dataset(&self, data: &[Record], dataset_name: &str) -> Result<DatasetProfile> {
        if data.is_empty() {
            return Err(DriftwatchError::EmptyDataset(format!(
                "cannot profile '{}' with zero records",
                dataset_name
            )));
        }

        let columns = column_order(data);
        let mut column_profiles = IndexMap::new();

        for column in &columns {
            let values = column_values(data, column);
            let mut profile = self.analyzer.profile_column(&values, column);

            if profile.data_type.is_numeric() {
                for anomaly in self
                    .detector
                    .find_anomalies(&values, self.config.anomaly_method)
                {
                    profile.anomalies.push(anomaly.reason);
                }
            }

            column_profiles.insert(column.clone(), profile);
        }

        Ok(DatasetProfile {
            dataset_name: dataset_name.to_string(),
            total_records: data.len() as u64,
            total_columns: columns.len() as u64,
            profile_timestamp: Utc::now(),
            column_profiles,
        })
    }

    /// Compare current data against a stored baseline profile.
    pub fn detect_drift(
        &self,
        baseline: &DatasetProfile,
        current: &[Record],
    ) -> Result<IndexMap<String, DriftResult>> {
        DriftComparator::with_config(self.config.drift.clone())
            .with_analyzer(self.analyzer.clone())
            .detect_drift(&baseline.column_profiles, current)
    }

    /// Flatten a profile into monitoring metrics.
    ///
    /// Keys are `{dataset}_{column}_{metric}` for null_percentage,
    /// distinct_count, and anomaly_count per column, plus
    /// `{dataset}_total_records` and `{dataset}_total_columns`. Names are
    /// sanitized to alphanumerics, underscores, and dashes; non-finite values
    /// are skipped.
    pub fn extract_metrics(profile: &DatasetProfile) -> IndexMap<String, f64> {
        let dataset = sanitize_metric_name(&profile.dataset_name);
        let mut metrics = IndexMap::new();

        record_metric(
            &mut metrics,
            format!("{}_total_records", dataset),
            profile.total_records as f64,
        );
        record_metric(
            &mut metrics,
            format!("{}_total_columns", dataset),
            profile.total_columns as f64,
        );

        for (column, col_profile) in &profile.column_profiles {
            let column = sanitize_metric_name(column);
            record_metric(
                &mut metrics,
                format!("{}_{}_null_percentage", dataset, column),
                col_profile.null_percentage,
            );
            record_metric(
                &mut metrics,
                format!("{}_{}_distinct_count", dataset, column),
                col_profile.distinct_count as f64,
            );
            record_metric(
                &mut metrics,
                format!("{}_{}_anomaly_count", dataset, column),
                col_profile.anomalies.len() as f64,
            );
        }

        metrics
    }
}

impl Default for DatasetProfiler {
    fn default() -> Self {
        Self::new()
    }
}

fn record_metric(metrics: &mut IndexMap<String, f64>, name: String, value: f64) {
    if value.is_finite() {
        metrics.insert(name, value);
    }
}

/// Keep alphanumerics, underscores, and dashes; truncate to a safe length.
fn sanitize_metric_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_METRIC_NAME_LENGTH)
        .collect()
}
