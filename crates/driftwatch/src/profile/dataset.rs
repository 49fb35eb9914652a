//! Dataset-level profile assembly and baseline persistence.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DriftwatchError, Result};

use super::column::ColumnProfile;

/// Complete profile for one dataset, produced by one profiling run.
///
/// Value object: immutable once returned, safe to serialize as a baseline and
/// deserialize later for drift comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Name supplied by the caller.
    pub dataset_name: String,
    /// Number of records profiled.
    pub total_records: u64,
    /// Number of discovered columns.
    pub total_columns: u64,
    /// When the profile was computed (ISO-8601).
    pub profile_timestamp: DateTime<Utc>,
    /// Per-column profiles, in first-seen column order.
    pub column_profiles: IndexMap<String, ColumnProfile>,
}

impl DatasetProfile {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save as a baseline file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| DriftwatchError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a previously saved baseline.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| DriftwatchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }
}
