//! Corpus supplier for the command-line front end.
//!
//! Reads tabular record files and extracts one column as text rows.
//! `.csv` is a header row followed by records, `.json` holds a top-level
//! array of objects, `.jsonl` / `.ndjson` one object per line.

use std::{io::Read, path::Path};

use indexmap::IndexSet;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV on line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("dataset must be an array of objects (or one object per line)")]
    NotTabular,

    #[error("column '{column}' not found in dataset; available columns: {}", .available.join(", "))]
    UnknownColumn { column: String, available: Vec<String> },
}

/// Rows of a dataset, each a JSON object.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Map<String, Value>>,
}

impl Dataset {
    /// Load from a file, picking the format by extension: `.csv`,
    /// `.jsonl` / `.ndjson`, anything else is parsed as a JSON array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Self::from_csv_reader(std::fs::File::open(path)?),
            Some("jsonl") | Some("ndjson") => Self::from_json_lines(&std::fs::read_to_string(path)?),
            _ => Self::from_json_array(&std::fs::read_to_string(path)?),
        }
    }

    /// Header row names the columns. Empty and missing fields become `""`.
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
        let headers = reader
            .headers()
            .map_err(|source| LoadError::Csv { line: 1, source })?
            .clone();

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|source| LoadError::Csv {
                line: source.position().map_or(i as u64 + 2, |p| p.line()),
                source,
            })?;
            let map: Map<String, Value> = headers
                .iter()
                .enumerate()
                .map(|(col, name)| {
                    let field = record.get(col).unwrap_or_default();
                    (name.to_string(), Value::String(field.to_string()))
                })
                .collect();
            records.push(map);
        }
        Ok(Self { records })
    }

    pub fn from_csv_str(src: &str) -> Result<Self, LoadError> {
        Self::from_csv_reader(src.as_bytes())
    }

    pub fn from_json_array(src: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(src).map_err(|source| LoadError::Json {
            line: 1,
            source,
        })?;
        let Value::Array(items) = value else {
            return Err(LoadError::NotTabular);
        };
        let records = items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                _ => Err(LoadError::NotTabular),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub fn from_json_lines(src: &str) -> Result<Self, LoadError> {
        let mut records = Vec::new();
        for (i, line) in src.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line).map_err(|source| LoadError::Json {
                line: i + 1,
                source,
            })?;
            match value {
                Value::Object(map) => records.push(map),
                _ => return Err(LoadError::NotTabular),
            }
        }
        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in first-seen order
    pub fn columns(&self) -> Vec<String> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for record in &self.records {
            seen.extend(record.keys().map(String::as_str));
        }
        seen.into_iter().map(str::to_string).collect()
    }

    /// Values of `column` coerced to text; missing and null become `""`.
    pub fn column_text(&self, column: &str) -> Result<Vec<String>, LoadError> {
        if !self.records.iter().any(|r| r.contains_key(column)) {
            return Err(LoadError::UnknownColumn {
                column: column.to_string(),
                available: self.columns(),
            });
        }
        Ok(self
            .records
            .iter()
            .map(|r| r.get(column).map(value_to_text).unwrap_or_default())
            .collect())
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_rows_are_coerced_to_text() {
        let data = Dataset::from_json_array(
            r#"[{"name": "Red apple", "qty": 3},
                {"name": null, "qty": 1.5},
                {"qty": true},
                {"name": ["a", "b"]}]"#,
        )
        .unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.columns(), vec!["name", "qty"]);
        assert_eq!(
            data.column_text("name").unwrap(),
            vec!["Red apple", "", "", r#"["a","b"]"#]
        );
        assert_eq!(data.column_text("qty").unwrap(), vec!["3", "1.5", "true", ""]);
    }

    #[test]
    fn csv_header_names_the_columns() {
        let data = Dataset::from_csv_str(
            "name,price\nRed apple,3\n\"Green apple, large\",\n,5\nBlue car\n",
        )
        .unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.columns(), vec!["name", "price"]);
        assert_eq!(
            data.column_text("name").unwrap(),
            vec!["Red apple", "Green apple, large", "", "Blue car"]
        );
        assert_eq!(data.column_text("price").unwrap(), vec!["3", "", "5", ""]);
        assert!(matches!(
            data.column_text("color").unwrap_err(),
            LoadError::UnknownColumn { .. }
        ));
    }

    #[test]
    fn csv_file_is_chosen_by_extension() {
        let path = std::env::temp_dir().join(format!("tf_idf_dedup_{}.csv", std::process::id()));
        std::fs::write(&path, "name,price\nRed apple,3\nBlue car,7\n").unwrap();
        let data = Dataset::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data.unwrap().column_text("name").unwrap(), vec!["Red apple", "Blue car"]);
    }

    #[test]
    fn json_lines_skip_blank_lines() {
        let data = Dataset::from_json_lines("{\"t\": \"a\"}\n\n{\"t\": \"b\"}\n").unwrap();
        assert_eq!(data.column_text("t").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn json_lines_report_bad_line() {
        let err = Dataset::from_json_lines("{\"t\": 1}\n{oops\n").unwrap_err();
        assert!(matches!(err, LoadError::Json { line: 2, .. }));
    }

    #[test]
    fn unknown_column_lists_available() {
        let data = Dataset::from_json_array(r#"[{"a": 1, "b": 2}]"#).unwrap();
        match data.column_text("c").unwrap_err() {
            LoadError::UnknownColumn { column, available } => {
                assert_eq!(column, "c");
                assert_eq!(available, vec!["a", "b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_rows_are_rejected() {
        assert!(matches!(
            Dataset::from_json_array("[1, 2]").unwrap_err(),
            LoadError::NotTabular
        ));
        assert!(matches!(
            Dataset::from_json_array("{\"a\": 1}").unwrap_err(),
            LoadError::NotTabular
        ));
    }
}
