//! Statistical outlier detection over numeric columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DriftwatchError;
use crate::value::Value;

use super::statistics::sample_std_dev;

/// Outlier detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyMethod {
    /// Interquartile range bounds (Q1 - 1.5*IQR, Q3 + 1.5*IQR).
    Iqr,
    /// Absolute z-score above 3.
    Zscore,
}

impl AnomalyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyMethod::Iqr => "iqr",
            AnomalyMethod::Zscore => "zscore",
        }
    }
}

impl fmt::Display for AnomalyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnomalyMethod {
    type Err = DriftwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iqr" => Ok(AnomalyMethod::Iqr),
            "zscore" => Ok(AnomalyMethod::Zscore),
            other => Err(DriftwatchError::InvalidMethod(other.to_string())),
        }
    }
}

/// A single detected outlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Position in the input sequence.
    pub record_index: usize,
    /// The offending value.
    pub anomaly_value: f64,
    /// Magnitude of deviation (method-dependent).
    pub anomaly_score: f64,
    /// Explanation naming the method and computed score.
    pub reason: String,
}

/// Flags individual numeric values as outliers.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    /// IQR bound multiplier.
    iqr_multiplier: f64,
    /// Z-score threshold.
    z_threshold: f64,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self {
            iqr_multiplier: 1.5,
            z_threshold: 3.0,
        }
    }

    /// Find outliers in a column of values.
    ///
    /// Non-numeric entries are skipped, not errors. Degenerate inputs (fewer
    /// than 4 numeric values for IQR, fewer than 2 for z-score) and
    /// zero-spread columns (IQR or std dev of 0) report no anomalies.
    /// Results are ordered by `record_index` ascending.
    pub fn find_anomalies(&self, values: &[Value], method: AnomalyMethod) -> Vec<AnomalyRecord> {
        let numeric: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_f64().map(|n| (i, n)))
            .collect();

        match method {
            AnomalyMethod::Iqr => self.find_iqr(&numeric),
            AnomalyMethod::Zscore => self.find_zscore(&numeric),
        }
    }

    fn find_iqr(&self, numeric: &[(usize, f64)]) -> Vec<AnomalyRecord> {
        if numeric.len() < 4 {
            return Vec::new();
        }

        let mut sorted: Vec<f64> = numeric.iter().map(|(_, n)| *n).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        if iqr <= 0.0 {
            return Vec::new();
        }

        let lower = q1 - self.iqr_multiplier * iqr;
        let upper = q3 + self.iqr_multiplier * iqr;

        numeric
            .iter()
            .filter(|(_, v)| *v < lower || *v > upper)
            .map(|(idx, v)| {
                let distance = if *v < lower { lower - v } else { v - upper };
                let score = distance / iqr;
                AnomalyRecord {
                    record_index: *idx,
                    anomaly_value: *v,
                    anomaly_score: score,
                    reason: format!(
                        "Value {} outside IQR bounds [{:.2}, {:.2}] (score {:.2})",
                        v, lower, upper, score
                    ),
                }
            })
            .collect()
    }

    fn find_zscore(&self, numeric: &[(usize, f64)]) -> Vec<AnomalyRecord> {
        if numeric.len() < 2 {
            return Vec::new();
        }

        let nums: Vec<f64> = numeric.iter().map(|(_, n)| *n).collect();
        let mean = nums.iter().sum::<f64>() / nums.len() as f64;
        let std_dev = sample_std_dev(&nums, mean);
        if std_dev == 0.0 {
            return Vec::new();
        }

        numeric
            .iter()
            .filter_map(|(idx, v)| {
                let z = ((v - mean) / std_dev).abs();
                if z > self.z_threshold {
                    Some(AnomalyRecord {
                        record_index: *idx,
                        anomaly_value: *v,
                        anomaly_score: z,
                        reason: format!(
                            "Value {} has z-score {:.2} exceeding threshold {:.1}",
                            v, z, self.z_threshold
                        ),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentile by linear interpolation on a sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
