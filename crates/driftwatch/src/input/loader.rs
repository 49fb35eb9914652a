//! CSV/TSV/JSON loader with delimiter detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{DriftwatchError, Result};
use crate::value::{Record, Value};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell contents mapped to the null marker at the loading boundary.
///
/// The profiling core only treats the explicit null marker as missing; NA-like
/// spellings are a file-format concern and get normalized here.
const NULL_TOKENS: &[&str] = &["na", "n/a", "null", "none", "nil", ".", "-"];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use for delimited files (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether delimited files have a header row.
    pub has_header: bool,
    /// Maximum records to load (None = all).
    pub max_records: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_records: None,
        }
    }
}

/// Loads tabular data files into records.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return its records and source metadata.
    ///
    /// Dispatches on extension: `.json` expects a top-level array of objects;
    /// everything else is parsed as delimited text.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Record>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| DriftwatchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| DriftwatchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        let (records, format) = match extension.as_str() {
            "json" => (self.parse_json(&contents)?, "json".to_string()),
            "csv" | "tsv" | "txt" | "" => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents),
                };
                let format = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                }
                .to_string();
                (self.parse_delimited(&contents, delimiter)?, format)
            }
            other => return Err(DriftwatchError::UnsupportedFormat(other.to_string())),
        };

        let column_count = records.first().map(|r| r.len()).unwrap_or(0);
        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            records.len(),
            column_count,
        );

        Ok((records, metadata))
    }

    /// Parse a JSON array of objects.
    ///
    /// Field order within each object is preserved; nested objects degrade to
    /// their JSON text.
    fn parse_json(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let parsed: Vec<indexmap::IndexMap<String, serde_json::Value>> =
            serde_json::from_slice(bytes)?;

        let mut records: Vec<Record> = parsed
            .into_iter()
            .map(|object| {
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect()
            })
            .collect();

        if let Some(max) = self.config.max_records {
            records.truncate(max);
        }
        Ok(records)
    }

    /// Parse delimited text into records, normalizing NA-like cells to null.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => Vec::new(),
            }
        };

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let mut record = Record::new();
            for (i, header) in headers.iter().enumerate() {
                let cell = row.get(i).unwrap_or("");
                record.insert(header.clone(), cell_to_value(cell));
            }
            records.push(record);

            if let Some(max) = self.config.max_records {
                if records.len() >= max {
                    break;
                }
            }
        }

        Ok(records)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a delimited cell to a value.
fn cell_to_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty()
        || NULL_TOKENS
            .iter()
            .any(|t| trimmed.eq_ignore_ascii_case(t))
    {
        Value::Null
    } else {
        Value::String(cell.to_string())
    }
}

/// Pick the delimiter occurring most often in the first line.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);

    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|d| first_line.iter().filter(|b| *b == d).count())
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_file("id,name\n1,Alice\n2,Bob\n", ".csv");

        let loader = Loader::new();
        let (records, metadata) = loader.load_file(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(metadata.format, "csv");
        assert_eq!(metadata.column_count, 2);
        assert_eq!(records[0]["name"], Value::from("Alice"));
        assert!(metadata.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_load_tsv_auto_detect() {
        let file = create_test_file("id\tname\n1\tAlice\n", ".tsv");

        let loader = Loader::new();
        let (records, metadata) = loader.load_file(file.path()).unwrap();

        assert_eq!(metadata.format, "tsv");
        assert_eq!(records[0]["id"], Value::from("1"));
    }

    #[test]
    fn test_na_cells_become_null() {
        let file = create_test_file("a,b,c\nNA,,x\n", ".csv");

        let loader = Loader::new();
        let (records, _) = loader.load_file(file.path()).unwrap();

        assert_eq!(records[0]["a"], Value::Null);
        assert_eq!(records[0]["b"], Value::Null);
        assert_eq!(records[0]["c"], Value::from("x"));
    }

    #[test]
    fn test_load_json_records() {
        let file = create_test_file(
            r#"[{"id": 1, "score": 2.5}, {"id": 2, "score": null}]"#,
            ".json",
        );

        let loader = Loader::new();
        let (records, metadata) = loader.load_file(file.path()).unwrap();

        assert_eq!(metadata.format, "json");
        assert_eq!(records[0]["id"], Value::Integer(1));
        assert_eq!(records[0]["score"], Value::Float(2.5));
        assert_eq!(records[1]["score"], Value::Null);
    }

    #[test]
    fn test_nested_json_object_degrades_to_text() {
        let file = create_test_file(r#"[{"meta": {"k": 1}}]"#, ".json");

        let loader = Loader::new();
        let (records, _) = loader.load_file(file.path()).unwrap();

        assert_eq!(records[0]["meta"], Value::from(r#"{"k":1}"#));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = create_test_file("data", ".parquet");

        let loader = Loader::new();
        assert!(matches!(
            loader.load_file(file.path()),
            Err(DriftwatchError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_max_records() {
        let file = create_test_file("a\n1\n2\n3\n4\n", ".csv");

        let loader = Loader::with_config(LoaderConfig {
            max_records: Some(2),
            ..LoaderConfig::default()
        });
        let (records, _) = loader.load_file(file.path()).unwrap();

        assert_eq!(records.len(), 2);
    }
}
