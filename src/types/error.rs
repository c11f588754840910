//! Error types for the payments analytics pipeline
//!
//! This module defines every error that can occur while loading configuration,
//! resolving components and running pipeline stages.
//!
//! # Error Categories
//!
//! - **Configuration Errors**: missing or invalid configuration document (fatal)
//! - **Component Errors**: unknown type names or bad component options (recoverable)
//! - **Stage Errors**: a filter, analytics module or writer failing while running
//! - **Supporting Errors**: I/O, parsing, serialization, HTTP and arithmetic failures
//!   raised inside components and surfaced through the categories above

use std::fmt;
use thiserror::Error;

/// Capability kinds a component can be registered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Reader,
    Filter,
    Analytics,
    Writer,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComponentKind::Reader => "reader",
            ComponentKind::Filter => "filter",
            ComponentKind::Analytics => "analytics",
            ComponentKind::Writer => "writer",
        };
        f.write_str(label)
    }
}

/// Main error type for the analytics pipeline
///
/// Every variant carries owned strings rather than source errors so the enum
/// stays `Clone + PartialEq` and can be recorded in a run report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Missing or invalid top-level configuration
    ///
    /// This is a fatal error that prevents any stage from running.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem
        message: String,
    },

    /// Type name is not registered for the requested capability
    ///
    /// This is a recoverable error - the component is treated as absent.
    #[error("Unknown {kind} type '{type_name}'")]
    ComponentResolution {
        /// Capability that was requested
        kind: ComponentKind,
        /// Type name as written in the configuration
        type_name: String,
    },

    /// Component was resolved but rejected its options
    ///
    /// This is a recoverable error - the component is treated as absent.
    #[error("Failed to initialize {kind} '{type_name}': {cause}")]
    ComponentInit {
        /// Capability of the component
        kind: ComponentKind,
        /// Type name as written in the configuration
        type_name: String,
        /// Underlying reason reported by the component
        cause: String,
    },

    /// A component failed while executing its stage
    ///
    /// This is a recoverable error - the stage contributes no output and the
    /// pipeline continues with the prior data.
    #[error("{kind} '{component}' failed: {message}")]
    StageExecution {
        /// Capability of the failing component
        kind: ComponentKind,
        /// Component name
        component: String,
        /// Description of the failure
        message: String,
    },

    /// Option value has the wrong shape or is out of range
    #[error("Invalid option '{option}': {message}")]
    InvalidOption {
        /// Option key
        option: String,
        /// Description of the problem
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Input data could not be parsed
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A payload could not be serialized for output
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// HTTP delivery failed
    #[error("HTTP error: {message}")]
    Http {
        /// Description of the HTTP failure
        message: String,
    },

    /// Decimal or timestamp arithmetic would overflow
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

// Conversion from io::Error to PipelineError
impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to PipelineError
impl From<csv::Error> for PipelineError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        PipelineError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to PipelineError
impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return PipelineError::Io {
                message: error.to_string(),
            };
        }
        if error.is_data() || error.is_syntax() || error.is_eof() {
            return PipelineError::Parse {
                line: Some(error.line() as u64),
                message: error.to_string(),
            };
        }
        PipelineError::Serialization {
            message: error.to_string(),
        }
    }
}

// Conversion from reqwest::Error to PipelineError
impl From<reqwest::Error> for PipelineError {
    fn from(error: reqwest::Error) -> Self {
        PipelineError::Http {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl PipelineError {
    /// Create a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        PipelineError::Configuration {
            message: message.into(),
        }
    }

    /// Create a ComponentResolution error
    pub fn component_resolution(kind: ComponentKind, type_name: &str) -> Self {
        PipelineError::ComponentResolution {
            kind,
            type_name: type_name.to_string(),
        }
    }

    /// Create a ComponentInit error wrapping the component's own failure
    pub fn component_init(kind: ComponentKind, type_name: &str, cause: &PipelineError) -> Self {
        PipelineError::ComponentInit {
            kind,
            type_name: type_name.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Create a StageExecution error wrapping the component's own failure
    pub fn stage_execution(kind: ComponentKind, component: &str, cause: &PipelineError) -> Self {
        PipelineError::StageExecution {
            kind,
            component: component.to_string(),
            message: cause.to_string(),
        }
    }

    /// Create an InvalidOption error
    pub fn invalid_option(option: &str, message: impl Into<String>) -> Self {
        PipelineError::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }

    /// Create a Parse error without line information
    pub fn parse(message: impl Into<String>) -> Self {
        PipelineError::Parse {
            line: None,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        PipelineError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Whether this error should abort the run before any stage executes
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Configuration { .. })
    }
}
