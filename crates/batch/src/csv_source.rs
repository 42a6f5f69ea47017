//! CSV record source
//!
//! The header row names the fields. Every later row becomes one JSON object
//! of verbatim strings; a row shorter than the header simply lacks the
//! trailing keys. Columns that name no LC field are passed through and
//! ignored by the renderer, so they are reported once when the file opens.

use crate::error::Result;
use csv::{Reader, ReaderBuilder, StringRecord};
use lc_template::LcField;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Default CSV input path
pub const DEFAULT_INPUT_CSV: &str = "lc_draft_input.csv";

/// Iterator over the rows of a CSV file as JSON objects
pub struct CsvRecords<R> {
    reader: Reader<R>,
    headers: StringRecord,
    row: StringRecord,
}

impl CsvRecords<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_builder(ReaderBuilder::new().flexible(true).from_path(path)?)
    }
}

impl<R: Read> CsvRecords<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::with_builder(ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    fn with_builder(mut reader: Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let records = Self {
            reader,
            headers,
            row: StringRecord::new(),
        };

        let unknown = records.unknown_columns();
        if !unknown.is_empty() {
            warn!(columns = ?unknown, "CSV columns do not match any LC field");
        }
        Ok(records)
    }

    /// Header columns that are not LC field names
    pub fn unknown_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|name| LcField::from_name(name).is_none())
            .collect()
    }

    fn row_to_object(&self) -> Value {
        let object: Map<String, Value> = self
            .headers
            .iter()
            .zip(self.row.iter())
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        Value::Object(object)
    }
}

impl<R: Read> Iterator for CsvRecords<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(Ok(self.row_to_object())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
