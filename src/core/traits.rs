//! Capability traits for pipeline components
//!
//! Every pluggable component is created with a default constructor and then
//! configured through [`Component::init`]. The engine only ever sees these
//! traits, never the concrete types behind them.

use crate::types::{AnalyticsResult, Options, PipelineError, ResultPayload, Transaction};

/// Behaviour shared by every pluggable component
pub trait Component {
    /// Configure the component from its option mapping
    ///
    /// Implementations validate their own options here. Returning an error
    /// marks the component as unavailable for the run.
    fn init(&mut self, options: &Options) -> Result<(), PipelineError>;

    /// Human-readable component name used in logs and payloads
    fn name(&self) -> &str;
}

/// Source of the transaction batch
pub trait Reader: Component {
    /// Read the whole batch in source order
    fn read_all(&mut self) -> Result<Vec<Transaction>, PipelineError>;
}

/// Narrows the transaction set
pub trait Filter: Component {
    /// Return the order-preserving subset of `input` this filter keeps
    fn apply(&self, input: &[Transaction]) -> Result<Vec<Transaction>, PipelineError>;
}

/// Aggregation or detection over the filtered transaction set
pub trait Analytics: Component {
    /// Analyze the transactions, producing a serializable result mapping
    ///
    /// Implementations must be pure: calling this twice on the same input
    /// yields identical output.
    fn analyze(&self, transactions: &[Transaction]) -> Result<AnalyticsResult, PipelineError>;
}

/// Destination for result payloads
pub trait Writer: Component {
    /// Deliver one payload
    ///
    /// The engine calls this sequentially, so implementations need not be
    /// safe for concurrent use.
    fn write(&mut self, payload: &ResultPayload) -> Result<(), PipelineError>;
}
