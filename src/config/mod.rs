//! Run configuration
//!
//! The configuration document describes one pipeline run:
//!
//! ```yaml
//! data_source:
//!   type: csv
//!   options:
//!     path: data/transactions.csv
//! filters:
//!   - type: status_filter
//!     options:
//!       allowed_statuses: [COMPLETED]
//! analytics:
//!   - type: top_merchants
//!     options: { top_n: 5, by: value }
//! output:
//!   type: console
//! ```
//!
//! Options are passed through untouched; each component validates its own.

mod loader;

pub use loader::{load_config, parse_config, ConfigFormat};

use crate::types::Options;
use serde::{Deserialize, Deserializer, Serialize};

/// A `{type, options}` pair configuring one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Registered type name (case-insensitive)
    #[serde(rename = "type")]
    pub component_type: String,

    /// Component options (`parameters` is accepted as an alias)
    #[serde(default, alias = "parameters", deserialize_with = "null_as_empty")]
    pub options: Options,
}

// `options:` with no value parses as null in YAML
fn null_as_empty<'de, D>(deserializer: D) -> Result<Options, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Option::<Options>::deserialize(deserializer)?;
    Ok(options.unwrap_or_default())
}

impl ComponentConfig {
    pub fn new(component_type: impl Into<String>, options: Options) -> Self {
        ComponentConfig {
            component_type: component_type.into(),
            options,
        }
    }
}

/// Complete description of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Where transactions come from
    pub data_source: ComponentConfig,

    /// Filters applied in array order
    #[serde(default)]
    pub filters: Vec<ComponentConfig>,

    /// Analytics modules, each producing one payload
    #[serde(default)]
    pub analytics: Vec<ComponentConfig>,

    /// Where payloads are written
    #[serde(default)]
    pub output: Option<ComponentConfig>,
}
