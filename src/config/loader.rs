//! Configuration document loading
//!
//! Supports YAML and JSON documents, with the format detected from the file
//! extension. Every failure is reported as a fatal
//! [`PipelineError::Configuration`].

use super::RunConfig;
use crate::types::PipelineError;
use std::path::Path;
use tracing::info;

/// Supported configuration document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml)
    #[default]
    Yaml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    ///
    /// Returns `None` if the extension is not recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Self::Yaml),
                "json" => Some(Self::Json),
                _ => None,
            })
    }
}

/// Load and parse a run configuration from a file
///
/// # Errors
///
/// Returns a Configuration error if:
/// - The file extension is not recognized
/// - The file cannot be read
/// - The content cannot be parsed into a [`RunConfig`]
pub fn load_config(path: &Path) -> Result<RunConfig, PipelineError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| {
        PipelineError::configuration(format!(
            "Unrecognized file extension for '{}'. Supported: .yaml, .yml, .json",
            path.display()
        ))
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::configuration(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&content, format)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse a run configuration from a string in the given format
///
/// # Errors
///
/// Returns a Configuration error if the content is not a valid document or
/// names no data source type.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<RunConfig, PipelineError> {
    let config: RunConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| PipelineError::configuration(format!("YAML parse error: {}", e)))?,
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| PipelineError::configuration(format!("JSON parse error: {}", e)))?,
    };

    if config.data_source.component_type.trim().is_empty() {
        return Err(PipelineError::configuration(
            "data_source.type must not be empty",
        ));
    }

    Ok(config)
}
