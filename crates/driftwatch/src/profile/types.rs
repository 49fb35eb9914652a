//! Core type definitions for column profiles.

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
///
/// Inference examines all non-null values with precedence
/// boolean > integer > float > datetime > string. A column with no non-null
/// values is `Null`; a column whose underlying variants disagree
/// irreconcilably (numbers mixed with non-numeric text, booleans mixed with
/// numbers) is `Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    String,
    /// Boolean values (true/false).
    Boolean,
    /// ISO-8601-like date or date-time strings.
    DateTime,
    /// No non-null values to infer from.
    Null,
    /// Irreconcilable mixture of types.
    Mixed,
}

impl DataType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Null
    }
}
