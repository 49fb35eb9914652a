//! Drift detection between a baseline profile and current data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DriftwatchError, Result};
use crate::profile::ColumnProfile;
use crate::value::{column_order, column_values, Record};

use super::statistics::ColumnAnalyzer;

/// Configuration for drift comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Per-dimension drift threshold, in (0, 1].
    pub threshold: f64,
    /// Stabilizer for the mean delta when the baseline mean is zero.
    pub epsilon: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            epsilon: 1e-9,
        }
    }
}

/// Drift verdict for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftResult {
    pub column_name: String,
    pub has_drift: bool,
    /// Maximum of the applicable component deltas; 1.0 for schema changes.
    pub drift_score: f64,
    /// One entry per dimension that exceeded the threshold.
    pub drift_details: Vec<String>,
}

/// Compares column profiles over time to surface distributional drift.
#[derive(Debug, Clone)]
pub struct DriftComparator {
    config: DriftConfig,
    analyzer: ColumnAnalyzer,
}

impl DriftComparator {
    pub fn new() -> Self {
        Self::with_config(DriftConfig::default())
    }

    pub fn with_config(config: DriftConfig) -> Self {
        Self {
            config,
            analyzer: ColumnAnalyzer::new(),
        }
    }

    /// Use a custom column analyzer (e.g. a different top-values cap) when
    /// re-profiling the current dataset.
    pub fn with_analyzer(mut self, analyzer: ColumnAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Compare current data against baseline column profiles.
    ///
    /// Every baseline column is re-profiled from `current`; columns present
    /// on only one side are reported as structural drift with score 1.0.
    /// Fails only for a wholesale structural mismatch (an empty baseline).
    pub fn detect_drift(
        &self,
        baseline: &IndexMap<String, ColumnProfile>,
        current: &[Record],
    ) -> Result<IndexMap<String, DriftResult>> {
        if baseline.is_empty() {
            return Err(DriftwatchError::IncompatibleBaseline(
                "baseline contains no column profiles".to_string(),
            ));
        }

        let current_columns = column_order(current);
        let mut current_profiles: IndexMap<String, ColumnProfile> = IndexMap::new();
        for column in &current_columns {
            let values = column_values(current, column);
            current_profiles.insert(column.clone(), self.analyzer.profile_column(&values, column));
        }

        let mut report = IndexMap::new();

        for (column, base) in baseline {
            let result = match current_profiles.get(column) {
                Some(cur) => self.compare_column(base, cur),
                None => DriftResult {
                    column_name: column.clone(),
                    has_drift: true,
                    drift_score: 1.0,
                    drift_details: vec![format!(
                        "Column '{}' missing from current dataset",
                        column
                    )],
                },
            };
            report.insert(column.clone(), result);
        }

        for column in &current_columns {
            if !baseline.contains_key(column) {
                report.insert(
                    column.clone(),
                    DriftResult {
                        column_name: column.clone(),
                        has_drift: true,
                        drift_score: 1.0,
                        drift_details: vec![format!(
                            "New column '{}' appeared in current dataset",
                            column
                        )],
                    },
                );
            }
        }

        Ok(report)
    }

    /// Compare two profiles of the same column across four dimensions.
    pub fn compare_column(&self, base: &ColumnProfile, cur: &ColumnProfile) -> DriftResult {
        let threshold = self.config.threshold;
        let mut drift_score: f64 = 0.0;
        let mut drift_details = Vec::new();

        let null_delta = (cur.null_percentage - base.null_percentage).abs() / 100.0;
        drift_score = drift_score.max(null_delta);
        if null_delta > threshold {
            drift_details.push(format!(
                "Null percentage changed from {:.1}% to {:.1}%",
                base.null_percentage, cur.null_percentage
            ));
        }

        let distinct_delta =
            (cur.distinct_percentage - base.distinct_percentage).abs() / 100.0;
        drift_score = drift_score.max(distinct_delta);
        if distinct_delta > threshold {
            drift_details.push(format!(
                "Distinct percentage changed from {:.1}% to {:.1}%",
                base.distinct_percentage, cur.distinct_percentage
            ));
        }

        // Mean delta needs numeric statistics on both sides; a baseline
        // without them skips the component rather than failing the comparison.
        if let (Some(base_mean), Some(cur_mean)) = (base.mean, cur.mean) {
            let mean_delta =
                (cur_mean - base_mean).abs() / (base_mean.abs() + self.config.epsilon);
            drift_score = drift_score.max(mean_delta);
            if mean_delta > threshold {
                drift_details.push(format!(
                    "Mean changed from {:.2} to {:.2}",
                    base_mean, cur_mean
                ));
            }
        }

        if let Some(distribution_delta) = distribution_delta(base, cur) {
            drift_score = drift_score.max(distribution_delta);
            if distribution_delta > threshold {
                drift_details.push(format!(
                    "Value distribution changed (overlap coefficient {:.2})",
                    1.0 - distribution_delta
                ));
            }
        }

        DriftResult {
            column_name: base.column_name.clone(),
            has_drift: drift_score > threshold,
            drift_score,
            drift_details,
        }
    }
}

impl Default for DriftComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Distribution delta: 1 minus the overlap coefficient of the normalized
/// `top_values` frequencies.
///
/// Skipped (None) when either side's `top_values` is empty or truncated
/// (distinct count above the cap), since the table no longer represents the
/// distribution.
fn distribution_delta(base: &ColumnProfile, cur: &ColumnProfile) -> Option<f64> {
    if base.top_values.is_empty() || cur.top_values.is_empty() {
        return None;
    }
    if base.distinct_count > base.top_values.len() as u64
        || cur.distinct_count > cur.top_values.len() as u64
    {
        return None;
    }

    let base_total: u64 = base.top_values.iter().map(|(_, c)| c).sum();
    let cur_total: u64 = cur.top_values.iter().map(|(_, c)| c).sum();
    if base_total == 0 || cur_total == 0 {
        return None;
    }

    // Keys only on one side contribute zero overlap, so iterating the
    // baseline entries covers the whole union. Integer arithmetic over the
    // common denominator keeps identical distributions at exactly zero delta.
    let numerator: u128 = base
        .top_values
        .iter()
        .map(|(key, base_count)| {
            let cur_count = cur
                .top_values
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, c)| *c)
                .unwrap_or(0);
            (*base_count as u128 * cur_total as u128)
                .min(cur_count as u128 * base_total as u128)
        })
        .sum();
    let denominator = base_total as u128 * cur_total as u128;

    Some(1.0 - numerator as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn records_with_status(statuses: &[&str]) -> Vec<Record> {
        statuses
            .iter()
            .map(|s| {
                let mut record = Record::new();
                record.insert("status".to_string(), Value::from(*s));
                record
            })
            .collect()
    }

    fn profile_of(records: &[Record], column: &str) -> ColumnProfile {
        let values = column_values(records, column);
        ColumnAnalyzer::new().profile_column(&values, column)
    }

    #[test]
    fn test_no_drift_against_identical_data() {
        let records = records_with_status(&["ACTIVE", "ACTIVE", "INACTIVE", "ACTIVE"]);
        let mut baseline = IndexMap::new();
        baseline.insert("status".to_string(), profile_of(&records, "status"));

        let comparator = DriftComparator::new();
        let report = comparator.detect_drift(&baseline, &records).unwrap();

        let result = &report["status"];
        assert!(!result.has_drift);
        assert_eq!(result.drift_score, 0.0);
        assert!(result.drift_details.is_empty());
    }

    #[test]
    fn test_distribution_shift_detected() {
        let baseline_records = records_with_status(&["ACTIVE"; 10]);
        let mut baseline = IndexMap::new();
        baseline.insert("status".to_string(), profile_of(&baseline_records, "status"));

        let current: Vec<Record> = records_with_status(&[
            "ACTIVE", "ACTIVE", "ACTIVE", "ACTIVE", "ACTIVE", "INACTIVE", "INACTIVE",
            "INACTIVE", "INACTIVE", "INACTIVE",
        ]);

        let comparator = DriftComparator::with_config(DriftConfig {
            threshold: 0.3,
            ..DriftConfig::default()
        });
        let report = comparator.detect_drift(&baseline, &current).unwrap();

        let result = &report["status"];
        assert!(result.has_drift);
        assert!((result.drift_score - 0.5).abs() < 1e-9);
        assert!(result
            .drift_details
            .iter()
            .any(|d| d.contains("distribution")));
    }

    #[test]
    fn test_schema_addition_and_removal() {
        let baseline_records = records_with_status(&["ACTIVE", "INACTIVE"]);
        let mut baseline = IndexMap::new();
        baseline.insert("status".to_string(), profile_of(&baseline_records, "status"));
        baseline.insert(
            "retired".to_string(),
            profile_of(&records_with_status(&["x"]), "status"),
        );

        let current: Vec<Record> = ["ACTIVE", "INACTIVE"]
            .iter()
            .map(|s| {
                let mut record = Record::new();
                record.insert("status".to_string(), Value::from(*s));
                record.insert("new_field".to_string(), Value::Integer(1));
                record
            })
            .collect();

        let comparator = DriftComparator::new();
        let report = comparator.detect_drift(&baseline, &current).unwrap();

        let added = &report["new_field"];
        assert!(added.has_drift);
        assert_eq!(added.drift_score, 1.0);
        assert!(added.drift_details[0].contains("appeared"));

        let removed = &report["retired"];
        assert!(removed.has_drift);
        assert_eq!(removed.drift_score, 1.0);
        assert!(removed.drift_details[0].contains("missing"));
    }

    #[test]
    fn test_mean_shift_detected() {
        let make = |values: &[i64]| -> Vec<Record> {
            values
                .iter()
                .map(|v| {
                    let mut record = Record::new();
                    record.insert("amount".to_string(), Value::Integer(*v));
                    record
                })
                .collect()
        };

        let baseline_records = make(&[10, 11, 9, 10]);
        let mut baseline = IndexMap::new();
        baseline.insert("amount".to_string(), profile_of(&baseline_records, "amount"));

        let current = make(&[20, 21, 19, 20]);

        let comparator = DriftComparator::new();
        let report = comparator.detect_drift(&baseline, &current).unwrap();

        let result = &report["amount"];
        assert!(result.has_drift);
        assert!(result.drift_details.iter().any(|d| d.contains("Mean")));
    }

    #[test]
    fn test_missing_numeric_summary_skips_mean_component() {
        let records = records_with_status(&["1", "2", "3", "4"]);
        let mut base = profile_of(&records, "status");
        base.mean = None;
        let mut baseline = IndexMap::new();
        baseline.insert("status".to_string(), base);

        let comparator = DriftComparator::new();
        let report = comparator.detect_drift(&baseline, &records).unwrap();

        // Same data, mean component skipped: no drift rather than an error.
        assert!(!report["status"].has_drift);
    }

    #[test]
    fn test_empty_baseline_is_incompatible() {
        let comparator = DriftComparator::new();
        let baseline = IndexMap::new();
        let current = records_with_status(&["A"]);

        assert!(matches!(
            comparator.detect_drift(&baseline, &current),
            Err(DriftwatchError::IncompatibleBaseline(_))
        ));
    }

    #[test]
    fn test_high_cardinality_skips_distribution_component() {
        let baseline_values: Vec<String> = (0..50).map(|i| format!("id-{}", i)).collect();
        let current_values: Vec<String> = (50..100).map(|i| format!("id-{}", i)).collect();

        let to_records = |values: &[String]| -> Vec<Record> {
            values
                .iter()
                .map(|v| {
                    let mut record = Record::new();
                    record.insert("id".to_string(), Value::from(v.as_str()));
                    record
                })
                .collect()
        };

        let baseline_records = to_records(&baseline_values);
        let mut baseline = IndexMap::new();
        baseline.insert("id".to_string(), profile_of(&baseline_records, "id"));

        let comparator = DriftComparator::new();
        let report = comparator
            .detect_drift(&baseline, &to_records(&current_values))
            .unwrap();

        // Completely disjoint values, but cardinality is above the cap on
        // both sides, so the distribution component is skipped and the
        // remaining deltas are zero.
        assert!(!report["id"].has_drift);
    }
}
