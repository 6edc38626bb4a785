use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// On-disk encodings accepted for record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum RecordImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for RecordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordImportError::Io(err) => write!(f, "failed to read record file: {}", err),
            RecordImportError::Json(err) => write!(f, "invalid record JSON: {}", err),
            RecordImportError::Csv(err) => write!(f, "invalid record CSV: {}", err),
            RecordImportError::UnsupportedFormat(path) => write!(
                f,
                "unsupported record file '{}' (expected .json or .csv)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for RecordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordImportError::Io(err) => Some(err),
            RecordImportError::Json(err) => Some(err),
            RecordImportError::Csv(err) => Some(err),
            RecordImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for RecordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for RecordImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for RecordImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Load a record collection, picking the decoder from the file extension.
pub fn load_records<R, P>(path: P) -> Result<Vec<R>, RecordImportError>
where
    R: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = RecordFormat::from_path(path)
        .ok_or_else(|| RecordImportError::UnsupportedFormat(path.to_path_buf()))?;
    let file = File::open(path)?;
    read_records(BufReader::new(file), format)
}

/// JSON input is either a bare array or an object wrapping the array under `data`.
pub fn read_records<R, T>(reader: T, format: RecordFormat) -> Result<Vec<R>, RecordImportError>
where
    R: DeserializeOwned,
    T: Read,
{
    match format {
        RecordFormat::Json => {
            let value: serde_json::Value = serde_json::from_reader(reader)?;
            let items = match value {
                serde_json::Value::Object(mut object) => object
                    .remove("data")
                    .unwrap_or(serde_json::Value::Object(object)),
                other => other,
            };
            Ok(serde_json::from_value(items)?)
        }
        RecordFormat::Csv => {
            let mut csv_reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader);
            let mut records = Vec::new();
            for row in csv_reader.deserialize::<R>() {
                records.push(row?);
            }
            Ok(records)
        }
    }
}
