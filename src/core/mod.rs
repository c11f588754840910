//! Core orchestration module
//!
//! This module contains the pipeline's orchestration components:
//! - `traits` - Capability traits implemented by readers, filters, analytics and writers
//! - `registry` - Case-insensitive type name -> constructor table
//! - `factory` - Resolution and initialization of configured components
//! - `engine` - Stage sequencing for a full run

pub mod engine;
pub mod factory;
pub mod registry;
pub mod traits;

pub use engine::{CoreEngine, RunReport, RunStage, StageFailure};
pub use factory::ComponentFactory;
pub use registry::{ComponentConstructor, PluginRegistry};
pub use traits::{Analytics, Component, Filter, Reader, Writer};
