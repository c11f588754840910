//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the immutable payment record
//! - `payload`: result envelopes handed to writers
//! - `options`: loosely typed component options and their accessors
//! - `error`: error types for the pipeline

pub mod error;
pub mod options;
pub mod payload;
pub mod transaction;

pub use error::{ComponentKind, PipelineError};
pub use options::Options;
pub use payload::{AnalyticsResult, PayloadOutcome, ResultPayload};
pub use transaction::{Transaction, UNKNOWN};
