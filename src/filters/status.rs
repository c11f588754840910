//! Status filter
//!
//! Keeps transactions whose status is in a configured allowed set.

use crate::core::traits::{Component, Filter};
use crate::types::options::get_string_list;
use crate::types::{Options, PipelineError, Transaction};
use std::collections::HashSet;

/// Status kept when no list is configured
pub const DEFAULT_STATUS: &str = "COMPLETED";

/// Keeps transactions whose status is in the allowed set (`status_filter`)
///
/// The list is read from `parameters` when given as a list, otherwise from
/// `allowed_statuses`. Matching is exact and case-sensitive. An empty allowed
/// set keeps every transaction.
#[derive(Debug, Clone)]
pub struct StatusFilter {
    allowed: HashSet<String>,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::new([DEFAULT_STATUS])
    }
}

impl StatusFilter {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StatusFilter {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, status: &str) -> bool {
        self.allowed.contains(status)
    }
}

impl Component for StatusFilter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        let configured = if options.get("parameters").is_some_and(|v| v.is_array()) {
            get_string_list(options, "parameters")?
        } else {
            get_string_list(options, "allowed_statuses")?
        };
        if let Some(list) = configured {
            self.allowed = list.into_iter().collect();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "StatusFilter"
    }
}

impl Filter for StatusFilter {
    fn apply(&self, input: &[Transaction]) -> Result<Vec<Transaction>, PipelineError> {
        if self.allowed.is_empty() {
            return Ok(input.to_vec());
        }
        Ok(input
            .iter()
            .filter(|tx| tx.status.as_deref().is_some_and(|s| self.allows(s)))
            .cloned()
            .collect())
    }
}
