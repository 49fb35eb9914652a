//! Field value representation and record handling.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single field value from a record.
///
/// Every profiling operation pattern-matches over this tagged variant rather
/// than inspecting dynamic types. `Null` is an explicit marker, distinct from
/// an empty string or zero. Arrays are carried through but treated as opaque
/// by the statistics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Text value.
    String(String),
    /// Array of values (opaque for statistics).
    Array(Vec<Value>),
}

impl Value {
    /// Returns true if this is the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to a finite float for numeric statistics.
    ///
    /// Integers, floats, and strings that parse as numbers coerce; booleans,
    /// arrays, and non-finite floats do not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Canonical string rendering used for exact-match grouping.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match item {
                        Value::String(s) => write!(f, "\"{}\"", s)?,
                        Value::Null => write!(f, "null")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            // Nested objects are outside the record contract; keep their text.
            other @ serde_json::Value::Object(_) => Value::String(other.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// A single record: field name to value, in field order.
pub type Record = IndexMap<String, Value>;

/// Discover column names across records in first-seen order.
pub fn column_order(records: &[Record]) -> Vec<String> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for record in records {
        for key in record.keys() {
            seen.entry(key.as_str()).or_insert(());
        }
    }
    seen.keys().map(|k| k.to_string()).collect()
}

/// Extract a column's values in record order.
///
/// Records missing the key contribute a null for that column.
pub fn column_values(records: &[Record], column: &str) -> Vec<Value> {
    records
        .iter()
        .map(|record| record.get(column).cloned().unwrap_or(Value::Null))
        .collect()
}
