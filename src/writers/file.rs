//! NDJSON file writer
//!
//! Appends one compact JSON line per payload to a local file.

use crate::core::traits::{Component, Writer};
use crate::types::options::{get_bool, get_str};
use crate::types::{Options, PipelineError, ResultPayload};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File written when no `path` option is given
pub const DEFAULT_OUTPUT_PATH: &str = "results.json";

/// Appends each payload as one compact JSON line (`file`)
///
/// Options:
/// - `path`: output file, default `results.json`; missing parent
///   directories are created at init
/// - `truncate`: empty the file at init instead of appending to it
///   (default false)
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
    truncate: bool,
}

impl Default for FileWriter {
    fn default() -> Self {
        FileWriter {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            truncate: false,
        }
    }
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileWriter {
            path: path.into(),
            truncate: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Component for FileWriter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        if let Some(path) = get_str(options, "path")?.filter(|p| !p.trim().is_empty()) {
            self.path = PathBuf::from(path.trim());
        }
        if let Some(truncate) = get_bool(options, "truncate")? {
            self.truncate = truncate;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if self.truncate {
            File::create(&self.path)?;
            debug!(path = %self.path.display(), "Truncated output file");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "FileWriter"
    }
}

impl Writer for FileWriter {
    fn write(&mut self, payload: &ResultPayload) -> Result<(), PipelineError> {
        let mut line = serde_json::to_string(payload)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalyticsResult;
    use serde_json::json;

    fn payload(module: &str) -> ResultPayload {
        let mut result = AnalyticsResult::new();
        result.insert("total".to_string(), json!("12.50"));
        ResultPayload::success(module, result)
    }

    fn init_writer(options: serde_json::Value) -> FileWriter {
        let mut writer = FileWriter::default();
        writer
            .init(&serde_json::from_value(options).unwrap())
            .unwrap();
        writer
    }

    #[test]
    fn test_creates_parent_dirs_and_appends_lines() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested/deeper/results.json");

        let mut writer = init_writer(json!({"path": path}));
        assert!(path.parent().unwrap().is_dir());

        writer.write(&payload("A")).unwrap();
        writer.write(&ResultPayload::failure("B", "boom")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"module":"A","result":{"total":"12.50"}}"#,
                r#"{"module":"B","error":"boom"}"#,
            ]
        );
    }

    #[test]
    fn test_appends_across_runs_by_default() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("results.json");

        let mut first = init_writer(json!({"path": path}));
        first.write(&payload("A")).unwrap();
        let mut second = init_writer(json!({"path": path}));
        second.write(&payload("B")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_truncate_empties_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("results.json");
        fs::write(&path, "stale\n").unwrap();

        let mut writer = init_writer(json!({"path": path, "truncate": true}));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        writer.write(&payload("A")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_unwritable_parent_fails_init() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let path = blocker.join("results.json");
        let options = serde_json::from_value(json!({"path": path})).unwrap();
        let result = FileWriter::default().init(&options);
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(FileWriter::default().path(), Path::new(DEFAULT_OUTPUT_PATH));
    }
}
