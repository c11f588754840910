//! Payments Analytics Library
//! # Overview
//!
//! This library runs configurable batch analytics over payment transactions:
//! a reader loads the batch, an ordered chain of filters narrows it, each
//! analytics module produces one result payload and a writer delivers the
//! payloads.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, ResultPayload, PipelineError, option helpers)
//! - [`config`] - Run configuration documents (YAML or JSON)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Orchestration:
//!   - [`core::registry`] - Type name -> constructor table
//!   - [`core::factory`] - Component resolution and initialization
//!   - [`core::engine`] - Stage sequencing with per-stage failure isolation
//! - [`io`] - CSV and JSON readers
//! - [`filters`] - Status, amount and date range filters
//! - [`analytics`] - Top merchants, channel performance and fraud detection
//! - [`writers`] - Console, NDJSON file and HTTP writers
//!
//! # Failure Model
//!
//! Only an unloadable configuration stops a run. Every later problem (an
//! unknown component type, bad options, a failing reader, filter, module or
//! writer) is logged, recorded in the [`RunReport`] and worked around.

// Module declarations
pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod filters;
pub mod io;
pub mod types;
pub mod writers;

pub use config::{load_config, ComponentConfig, RunConfig};
pub use core::{ComponentFactory, CoreEngine, PluginRegistry, RunReport, RunStage};
pub use types::{
    AnalyticsResult, ComponentKind, Options, PipelineError, ResultPayload, Transaction,
};
