//! JSON transaction reader
//!
//! Loads a file containing a JSON array of transactions.

use crate::core::traits::{Component, Reader};
use crate::types::options::get_str;
use crate::types::{Options, PipelineError, Transaction};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reader component for JSON arrays (`json`)
///
/// The `path` option is required. A missing file is not an error: it is
/// logged and read as an empty set.
#[derive(Debug, Clone, Default)]
pub struct JsonReader {
    path: Option<PathBuf>,
}

impl JsonReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonReader {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Component for JsonReader {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        let path = get_str(options, "path")?
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PipelineError::invalid_option("path", "is required"))?;
        self.path = Some(PathBuf::from(path));
        Ok(())
    }

    fn name(&self) -> &str {
        "JsonReader"
    }
}

impl Reader for JsonReader {
    fn read_all(&mut self) -> Result<Vec<Transaction>, PipelineError> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| PipelineError::invalid_option("path", "is required"))?;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "JSON source not found, reading no transactions");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PipelineError::Io {
                    message: format!("Failed to open file '{}': {}", path.display(), e),
                })
            }
        };

        let transactions: Vec<Transaction> = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), count = transactions.len(), "Loaded transactions from JSON");
        Ok(transactions)
    }
}
