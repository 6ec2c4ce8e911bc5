use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::AnalysisError;

/// A review table as read from disk, before any validation.
/// Fields that are absent or empty in the source are `None`.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    #[cfg(test)]
    pub fn new(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| non_empty(cell)).collect())
                .collect(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| AnalysisError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, AnalysisError> {
        let headers = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, header)| {
                // utf-8-sig exports carry a BOM on the first header
                let header = if index == 0 {
                    header.trim_start_matches('\u{feff}')
                } else {
                    header
                };
                header.to_string()
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(non_empty).collect());
        }

        tracing::info!(rows = rows.len(), "read review table");
        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Metadata about the file a table was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub file_name: String,
    pub path: String,
    pub size_kb: f64,
    pub modified: Option<DateTime<Local>>,
}

impl SourceInfo {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            file_name,
            path: path.display().to_string(),
            size_kb: metadata.len() as f64 / 1024.0,
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        })
    }

    pub fn modified_label(&self) -> String {
        self.modified
            .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
