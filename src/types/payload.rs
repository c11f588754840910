//! Result payloads handed from analytics modules to output writers

use serde::Serialize;
use serde_json::{Map, Value};

/// Result mapping produced by an analytics module
pub type AnalyticsResult = Map<String, Value>;

/// Outcome carried by a payload
///
/// Serialized as a single `result` or `error` key next to `module`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadOutcome {
    /// Module ran to completion
    Result(AnalyticsResult),
    /// Module failed while analyzing
    Error(String),
}

/// Envelope created once per analytics module per run
///
/// ```json
/// {"module": "ChannelPerformance", "result": {"counts": {}, "values": {}}}
/// {"module": "TopMerchants", "error": "Arithmetic overflow in merchant total"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPayload {
    pub module: String,
    #[serde(flatten)]
    pub outcome: PayloadOutcome,
}

impl ResultPayload {
    /// Payload for a module that produced a result
    pub fn success(module: impl Into<String>, result: AnalyticsResult) -> Self {
        ResultPayload {
            module: module.into(),
            outcome: PayloadOutcome::Result(result),
        }
    }

    /// Payload for a module whose analysis failed
    pub fn failure(module: impl Into<String>, message: impl Into<String>) -> Self {
        ResultPayload {
            module: module.into(),
            outcome: PayloadOutcome::Error(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, PayloadOutcome::Error(_))
    }

    /// Result mapping, if the module succeeded
    pub fn result(&self) -> Option<&AnalyticsResult> {
        match &self.outcome {
            PayloadOutcome::Result(result) => Some(result),
            PayloadOutcome::Error(_) => None,
        }
    }
}
