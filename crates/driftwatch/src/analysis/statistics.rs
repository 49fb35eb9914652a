//! Column statistics engine: type inference and per-column summaries.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::{ColumnProfile, DataType};
use crate::value::Value;

// Date/datetime patterns compiled once on first use.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?([Zz]|[+-]\d{2}:?\d{2})?$")
        .unwrap()
});

/// Per-value classification used to resolve a column's data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Boolean,
    Integer,
    Float,
    DateTime,
    Text,
    Opaque,
}

/// Computes per-column type inference, counts, and summary statistics.
#[derive(Debug, Clone)]
pub struct ColumnAnalyzer {
    /// Maximum entries kept in `top_values`.
    top_values_cap: usize,
}

impl ColumnAnalyzer {
    /// Create an analyzer with the default top-values cap of 10.
    pub fn new() -> Self {
        Self { top_values_cap: 10 }
    }

    /// Create an analyzer with a custom top-values cap.
    pub fn with_cap(top_values_cap: usize) -> Self {
        Self { top_values_cap }
    }

    /// Profile a single column of raw values.
    ///
    /// Never fails: empty and all-null columns produce a fully populated
    /// profile with zeros and empty collections.
    pub fn profile_column(&self, values: &[Value], column_name: &str) -> ColumnProfile {
        let total_count = values.len() as u64;
        let non_null: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
        let null_count = total_count - non_null.len() as u64;

        let null_percentage = percentage(null_count, total_count);

        // Exact-match grouping by canonical rendering, first-seen order.
        let mut value_counts: IndexMap<String, u64> = IndexMap::new();
        for v in &non_null {
            *value_counts.entry(v.render()).or_insert(0) += 1;
        }
        let distinct_count = value_counts.len() as u64;
        let distinct_percentage = percentage(distinct_count, total_count);

        let data_type = infer_type(&non_null);

        let mut profile = ColumnProfile::empty(column_name);
        profile.data_type = data_type;
        profile.total_count = total_count;
        profile.null_count = null_count;
        profile.null_percentage = null_percentage;
        profile.distinct_count = distinct_count;
        profile.distinct_percentage = distinct_percentage;
        profile.top_values = top_values(value_counts, self.top_values_cap);

        if data_type.is_numeric() {
            let nums: Vec<f64> = non_null.iter().filter_map(|v| v.as_f64()).collect();
            if !nums.is_empty() {
                let mut sorted = nums.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                let mean = nums.iter().sum::<f64>() / nums.len() as f64;
                let std_dev = sample_std_dev(&nums, mean);

                profile.min = Some(sorted[0]);
                profile.max = Some(sorted[sorted.len() - 1]);
                profile.mean = Some(mean);
                profile.median = Some(median_of_sorted(&sorted));
                profile.std_dev = Some(std_dev);

                profile
                    .anomalies
                    .extend(numeric_quality_checks(&nums, mean, std_dev));
            }
        }

        if data_type == DataType::String && !non_null.is_empty() {
            let lengths: Vec<u64> = non_null
                .iter()
                .map(|v| v.render().chars().count() as u64)
                .collect();
            profile.min_length = lengths.iter().min().copied();
            profile.max_length = lengths.iter().max().copied();
            profile.mean_length =
                Some(lengths.iter().sum::<u64>() as f64 / lengths.len() as f64);
        }

        if null_percentage > 50.0 {
            profile
                .anomalies
                .push(format!("High null percentage: {:.1}%", null_percentage));
        }
        if distinct_count == total_count && total_count > 10 {
            profile
                .anomalies
                .push("All values are unique (possible unique identifier)".to_string());
        }
        if distinct_count == 1 && total_count > 1 {
            profile
                .anomalies
                .push("All values are identical (constant column)".to_string());
        }

        profile
    }
}

impl Default for ColumnAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Classify a single non-null value.
fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Boolean(_) => ValueKind::Boolean,
        Value::Integer(_) => ValueKind::Integer,
        // Whole-valued floats count as integers for inference purposes.
        Value::Float(f) if f.fract() == 0.0 && f.is_finite() => ValueKind::Integer,
        Value::Float(_) => ValueKind::Float,
        Value::String(s) => classify_text(s),
        Value::Array(_) => ValueKind::Opaque,
        Value::Null => ValueKind::Opaque,
    }
}

fn classify_text(s: &str) -> ValueKind {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return ValueKind::Boolean;
    }
    if trimmed.parse::<i64>().is_ok() {
        return ValueKind::Integer;
    }
    if trimmed.parse::<f64>().is_ok() {
        return ValueKind::Float;
    }
    if DATE_PATTERN.is_match(trimmed) || DATETIME_PATTERN.is_match(trimmed) {
        return ValueKind::DateTime;
    }
    ValueKind::Text
}

/// Resolve a column's data type from its non-null values.
///
/// Precedence: boolean > integer > float > datetime > string. Falls back to
/// `String` when all underlying values are text, and to `Mixed` when the raw
/// variants disagree irreconcilably.
fn infer_type(non_null: &[&Value]) -> DataType {
    if non_null.is_empty() {
        return DataType::Null;
    }

    let kinds: Vec<ValueKind> = non_null.iter().map(|v| classify(v)).collect();

    if kinds.iter().all(|k| *k == ValueKind::Boolean) {
        return DataType::Boolean;
    }
    if kinds.iter().all(|k| *k == ValueKind::Integer) {
        return DataType::Integer;
    }
    if kinds
        .iter()
        .all(|k| matches!(k, ValueKind::Integer | ValueKind::Float))
    {
        return DataType::Float;
    }
    if kinds.iter().all(|k| *k == ValueKind::DateTime) {
        return DataType::DateTime;
    }
    // All text-backed values coerce to string, whatever they parse as.
    if non_null.iter().all(|v| matches!(v, Value::String(_))) {
        return DataType::String;
    }

    DataType::Mixed
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Sample standard deviation; 0 with fewer than two values.
pub(crate) fn sample_std_dev(nums: &[f64], mean: f64) -> f64 {
    if nums.len() < 2 {
        return 0.0;
    }
    let variance =
        nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (nums.len() - 1) as f64;
    variance.sqrt()
}

/// Truncate a frequency table to the cap, descending frequency with ties in
/// first-seen order (stable sort over the insertion-ordered map).
fn top_values(value_counts: IndexMap<String, u64>, cap: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = value_counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(cap);
    entries
}

/// Data quality checks over numeric columns.
fn numeric_quality_checks(nums: &[f64], mean: f64, std_dev: f64) -> Vec<String> {
    let mut anomalies = Vec::new();

    if std_dev > 0.0 {
        let outliers = nums
            .iter()
            .filter(|v| (*v - mean).abs() > 3.0 * std_dev)
            .count();
        if outliers > 0 {
            anomalies.push(format!("Found {} outliers (>3 std dev from mean)", outliers));
        }
    }

    let round_count = nums.iter().filter(|v| v.fract() == 0.0).count();
    if nums.len() > 10 && round_count as f64 / nums.len() as f64 > 0.9 {
        anomalies
            .push("High proportion of round numbers (possible data quality issue)".to_string());
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn test_infer_integer_type() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["1", "2", "3", "100"]), "count");

        assert_eq!(profile.data_type, DataType::Integer);
    }

    #[test]
    fn test_infer_float_type() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["1.5", "2.7", "3.14"]), "value");

        assert_eq!(profile.data_type, DataType::Float);
    }

    #[test]
    fn test_integers_promote_to_float() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["1", "2", "2.5"]), "value");

        assert_eq!(profile.data_type, DataType::Float);
    }

    #[test]
    fn test_infer_boolean_type() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::Boolean(true), Value::from("false"), Value::Null];
        let profile = analyzer.profile_column(&values, "active");

        assert_eq!(profile.data_type, DataType::Boolean);
    }

    #[test]
    fn test_infer_datetime_type() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(
            &strings(&["2024-01-15", "2024-02-20T10:30:00", "2024-03-25 08:00"]),
            "collected",
        );

        assert_eq!(profile.data_type, DataType::DateTime);
    }

    #[test]
    fn test_infer_mixed_type() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::Integer(1), Value::from("hello")];
        let profile = analyzer.profile_column(&values, "odd");

        assert_eq!(profile.data_type, DataType::Mixed);
        assert!(profile.mean.is_none());
    }

    #[test]
    fn test_unparseable_text_stays_string() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["42", "not a number"]), "notes");

        assert_eq!(profile.data_type, DataType::String);
    }

    #[test]
    fn test_empty_column_is_null_type() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&[], "empty");

        assert_eq!(profile.data_type, DataType::Null);
        assert_eq!(profile.total_count, 0);
        assert_eq!(profile.null_percentage, 0.0);
        assert!(profile.top_values.is_empty());
    }

    #[test]
    fn test_all_null_column() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::Null, Value::Null];
        let profile = analyzer.profile_column(&values, "blank");

        assert_eq!(profile.data_type, DataType::Null);
        assert_eq!(profile.null_count, 2);
        assert_eq!(profile.null_percentage, 100.0);
        assert_eq!(profile.distinct_count, 0);
        assert!(profile.min.is_none());
    }

    #[test]
    fn test_null_marker_distinct_from_empty_string() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::Null, Value::from("")];
        let profile = analyzer.profile_column(&values, "col");

        assert_eq!(profile.null_count, 1);
        assert_eq!(profile.distinct_count, 1);
    }

    #[test]
    fn test_numeric_summary() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["1", "2", "3", "4"]), "n");

        assert_eq!(profile.min, Some(1.0));
        assert_eq!(profile.max, Some(4.0));
        assert_eq!(profile.mean, Some(2.5));
        assert_eq!(profile.median, Some(2.5));
        // Sample std dev of 1..4
        assert!((profile.std_dev.unwrap() - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_zero_for_single_value() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["5"]), "n");

        assert_eq!(profile.std_dev, Some(0.0));
    }

    #[test]
    fn test_string_lengths() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["a", "abc", "hello!"]), "s");

        assert_eq!(profile.min_length, Some(1));
        assert_eq!(profile.max_length, Some(6));
        assert!((profile.mean_length.unwrap() - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_values_order_and_cap() {
        let analyzer = ColumnAnalyzer::with_cap(2);
        let profile =
            analyzer.profile_column(&strings(&["b", "a", "b", "c", "a", "b"]), "cat");

        assert_eq!(
            profile.top_values,
            vec![("b".to_string(), 3), ("a".to_string(), 2)]
        );
    }

    #[test]
    fn test_top_values_ties_keep_first_seen_order() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["x", "y", "z"]), "cat");

        assert_eq!(
            profile.top_values,
            vec![
                ("x".to_string(), 1),
                ("y".to_string(), 1),
                ("z".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_constant_column_flagged() {
        let analyzer = ColumnAnalyzer::new();
        let profile = analyzer.profile_column(&strings(&["A", "A", "A"]), "flag");

        assert!(profile
            .anomalies
            .iter()
            .any(|a| a.contains("identical")));
    }

    #[test]
    fn test_high_null_percentage_flagged() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::Null, Value::Null, Value::Null, Value::from("x")];
        let profile = analyzer.profile_column(&values, "sparse");

        assert!(profile
            .anomalies
            .iter()
            .any(|a| a.contains("High null percentage")));
    }

    #[test]
    fn test_counts_invariant() {
        let analyzer = ColumnAnalyzer::new();
        let values = vec![Value::from("a"), Value::Null, Value::from("a")];
        let profile = analyzer.profile_column(&values, "c");

        assert_eq!(profile.null_count + profile.non_null_count(), profile.total_count);
        assert!(profile.distinct_count <= profile.total_count);
    }
}
