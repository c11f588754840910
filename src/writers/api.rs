//! HTTP API writer
//!
//! Delivers each payload as a JSON POST request using a blocking client.

use crate::core::traits::{Component, Writer};
use crate::types::options::{get_i64, get_str};
use crate::types::{Options, PipelineError, ResultPayload};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Request timeout used when `timeout_secs` is absent
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// POSTs each payload as JSON to an HTTP endpoint (`api`)
///
/// Options:
/// - `endpoint`: target URL (required)
/// - `timeout_secs`: per-request timeout, default 10
#[derive(Debug, Clone, Default)]
pub struct ApiWriter {
    endpoint: Option<String>,
    client: Option<Client>,
}

impl ApiWriter {
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl Component for ApiWriter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        let endpoint = get_str(options, "endpoint")?
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| PipelineError::invalid_option("endpoint", "is required"))?;

        let timeout_secs = match get_i64(options, "timeout_secs")? {
            Some(secs) if secs > 0 => secs.unsigned_abs(),
            Some(secs) => {
                return Err(PipelineError::invalid_option(
                    "timeout_secs",
                    format!("must be positive, got {}", secs),
                ))
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        self.endpoint = Some(endpoint);
        self.client = Some(client);
        Ok(())
    }

    fn name(&self) -> &str {
        "ApiWriter"
    }
}

impl Writer for ApiWriter {
    fn write(&mut self, payload: &ResultPayload) -> Result<(), PipelineError> {
        let (Some(endpoint), Some(client)) = (self.endpoint.as_deref(), self.client.as_ref()) else {
            return Err(PipelineError::invalid_option("endpoint", "is required"));
        };

        let response = client.post(endpoint).json(payload).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Http {
                message: format!("{} responded with {}", endpoint, status),
            });
        }

        debug!(endpoint, module = %payload.module, %status, "Delivered payload");
        Ok(())
    }
}
