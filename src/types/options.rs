//! Component option mappings
//!
//! Options arrive from the configuration document as loosely typed values.
//! Components read them through these helpers, which accept the forms a
//! hand-written YAML file tends to contain (quoted numbers, bare numbers,
//! single strings where a list is expected).

use crate::types::PipelineError;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Option mapping handed to `Component::init`
pub type Options = BTreeMap<String, Value>;

/// Read an option as a string
///
/// Numbers and booleans are stringified. Null is treated as absent.
/// Arrays and objects are rejected.
pub fn get_str(options: &Options, key: &str) -> Result<Option<String>, PipelineError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(PipelineError::invalid_option(
            key,
            format!("expected a scalar, got {}", other),
        )),
    }
}

/// Read an option as a decimal
pub fn get_decimal(options: &Options, key: &str) -> Result<Option<Decimal>, PipelineError> {
    let Some(raw) = get_str(options, key)? else {
        return Ok(None);
    };
    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map(Some)
        .map_err(|_| PipelineError::invalid_option(key, format!("'{}' is not a decimal", raw)))
}

/// Read an option as a signed integer
pub fn get_i64(options: &Options, key: &str) -> Result<Option<i64>, PipelineError> {
    let Some(raw) = get_str(options, key)? else {
        return Ok(None);
    };
    raw.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| PipelineError::invalid_option(key, format!("'{}' is not an integer", raw)))
}

/// Read an option as a boolean
pub fn get_bool(options: &Options, key: &str) -> Result<Option<bool>, PipelineError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Ok(Some(true)),
            "false" | "no" => Ok(Some(false)),
            _ => Err(PipelineError::invalid_option(
                key,
                format!("'{}' is not a boolean", s),
            )),
        },
        Some(other) => Err(PipelineError::invalid_option(
            key,
            format!("expected a boolean, got {}", other),
        )),
    }
}

/// Read an option as a list of strings
///
/// A single scalar is accepted as a one-element list.
pub fn get_string_list(options: &Options, key: &str) -> Result<Option<Vec<String>>, PipelineError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(PipelineError::invalid_option(
                    key,
                    format!("list entries must be scalars, got {}", other),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => get_str(options, key).map(|s| s.map(|s| vec![s])),
    }
}
