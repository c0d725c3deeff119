//! Loads the input CSV into memory as ordered column-name → value records.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("input file unreadable: {0}")]
    Io(String),
    #[error("input parse failed: {0}")]
    Parse(String),
}

impl From<csv::Error> for RecordError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            RecordError::Io(format!("{err}"))
        } else {
            RecordError::Parse(format!("{err}"))
        }
    }
}

/// One input row. Fields keep the column order of the file; serializing a
/// record yields a JSON object in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`. A column that is already present keeps its
    /// position and takes the new value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON text in column order, the form handed to the ciphers.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Reads every row of a headed CSV file. Short rows keep only the columns
/// they have; cells past the header width are keyed `_<index>`.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, RecordError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = row
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let column = headers
                    .get(index)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("_{index}"));
                (column, value)
            })
            .collect();
        records.push(record);
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
