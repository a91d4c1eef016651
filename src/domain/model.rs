use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Column name to cell value, in header order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// One data row of the input table, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Row,
}

impl From<Row> for Record {
    fn from(data: Row) -> Self {
        Self { data }
    }
}

/// A [`Record`] with null and empty-string entries removed.
///
/// Only [`crate::core::cleaner::clean_record`] builds these, so the loader
/// never sees an unfiltered row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub(crate) data: Row,
}

impl CleanedRecord {
    pub fn data(&self) -> &Row {
        &self.data
    }

    pub fn into_record(self) -> Record {
        Record { data: self.data }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Non-empty header names, in column order.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Per-row failure from the remote table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// The service answered with a status other than 200/201.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// One entry of the diagnostic file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRow {
    pub row: usize,
    pub error: String,
    pub data: Row,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<FailedRow>,
    pub error_file: Option<PathBuf>,
}

impl ImportSummary {
    pub fn counts(&self) -> (usize, usize) {
        (self.succeeded, self.failed)
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFailure {
    pub row: usize,
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<UpdateFailure>,
}
