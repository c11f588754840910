//! CSV transaction reader
//!
//! Provides a streaming iterator over transaction records from a CSV export
//! and the `csv` reader component built on top of it.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - A file that cannot be opened is an `Io` error from `read_all`
//! - Individual rows that fail to parse or convert are yielded as `Parse`
//!   errors carrying their line number; `read_all` logs and skips them

use crate::core::traits::{Component, Reader};
use crate::io::csv_format::{convert_csv_record, CsvRecord, DateFormat};
use crate::types::options::get_str;
use crate::types::{Options, PipelineError, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File read when no `path` option is given
pub const DEFAULT_CSV_PATH: &str = "transactions.csv";

/// Streaming iterator over CSV rows
///
/// Reads one row at a time. Memory usage is O(1) per record, not
/// O(file_size).
#[derive(Debug)]
pub struct CsvRecords<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    date_format: DateFormat,
    record: StringRecord,
}

impl<R: Read> CsvRecords<R> {
    /// Wrap a byte source and read its header row
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts
    /// - Use an 8KB buffer
    ///
    /// # Errors
    ///
    /// Returns a Parse error if the header row is malformed.
    pub fn from_reader(source: R, date_format: DateFormat) -> Result<Self, PipelineError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            date_format,
            record: StringRecord::new(),
        })
    }

    fn convert_current(&self) -> Result<Transaction, PipelineError> {
        let line = self.record.position().map(|pos| pos.line());
        self.record
            .deserialize::<CsvRecord>(Some(&self.headers))
            .map_err(PipelineError::from)
            .and_then(|csv_record| convert_csv_record(csv_record, self.date_format))
            .map_err(|e| match e {
                PipelineError::Parse { message, .. } => PipelineError::Parse { line, message },
                other => other,
            })
    }
}

impl<R: Read> Iterator for CsvRecords<R> {
    type Item = Result<Transaction, PipelineError>;

    /// Get the next transaction from the CSV source
    ///
    /// Returns `None` at end of input, otherwise the converted row or a
    /// Parse error tagged with the row's line number.
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(self.convert_current()),
            Ok(false) => None,
            Err(e) => Some(Err(PipelineError::from(e))),
        }
    }
}

/// Reader component for CSV exports (`csv`)
///
/// Options:
/// - `path`: file to read, default `transactions.csv`
/// - `date_format`: `ISO_OFFSET_DATE_TIME` (default) or `ISO_LOCAL_DATE_TIME`
#[derive(Debug, Clone)]
pub struct CsvReader {
    path: PathBuf,
    date_format: DateFormat,
}

impl Default for CsvReader {
    fn default() -> Self {
        CsvReader {
            path: PathBuf::from(DEFAULT_CSV_PATH),
            date_format: DateFormat::default(),
        }
    }
}

impl CsvReader {
    pub fn new(path: impl Into<PathBuf>, date_format: DateFormat) -> Self {
        CsvReader {
            path: path.into(),
            date_format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }
}

impl Component for CsvReader {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        if let Some(path) = get_str(options, "path")?.filter(|p| !p.trim().is_empty()) {
            self.path = PathBuf::from(path.trim());
        }
        if let Some(format) = get_str(options, "date_format")? {
            self.date_format = DateFormat::parse(&format)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "CsvReader"
    }
}

impl Reader for CsvReader {
    fn read_all(&mut self) -> Result<Vec<Transaction>, PipelineError> {
        let file = File::open(&self.path).map_err(|e| PipelineError::Io {
            message: format!("Failed to open file '{}': {}", self.path.display(), e),
        })?;

        let mut transactions = Vec::new();
        let mut skipped = 0usize;
        for result in CsvRecords::from_reader(file, self.date_format)? {
            match result {
                Ok(tx) => transactions.push(tx),
                Err(e) => {
                    skipped += 1;
                    let line = match &e {
                        PipelineError::Parse { line, .. } => *line,
                        _ => None,
                    };
                    warn!(path = %self.path.display(), line, error = %e, "Skipping CSV row");
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "Rows skipped while reading CSV");
        }
        info!(
            path = %self.path.display(),
            count = transactions.len(),
            skipped,
            "Loaded transactions from CSV"
        );
        Ok(transactions)
    }
}
