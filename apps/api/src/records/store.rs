//! CSV Record Store — append-only submission log.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::records::record::{Record, RecordSchema};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path} has a different column set ({found} columns, expected {expected})")]
    SchemaMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
}

/// Appends records to a CSV file, writing the header on first use.
///
/// An existing file must start with this store's header; otherwise nothing is
/// appended and `SchemaMismatch` is returned.
///
/// Opens, appends and closes the file on every call. Not safe for concurrent
/// writers on its own; `RecordWriter` is the only caller in the service.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
    schema: RecordSchema,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>, schema: RecordSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &Record) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;
        if !is_new {
            self.check_header()?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(self.schema.columns())?;
            info!("Created record store at {}", self.path.display());
        }
        writer.write_record(record.to_row(&self.schema))?;
        writer.flush()?;

        Ok(())
    }

    fn check_header(&self) -> Result<(), RecordError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut header = csv::StringRecord::new();
        reader.read_record(&mut header)?;

        let expected = self.schema.columns();
        if !header.iter().eq(expected.iter().copied()) {
            return Err(RecordError::SchemaMismatch {
                path: self.path.display().to_string(),
                expected: expected.len(),
                found: header.len(),
            });
        }
        Ok(())
    }
}
