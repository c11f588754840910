//! Date range filter
//!
//! Keeps transactions timestamped inside an optional inclusive window.

use crate::core::traits::{Component, Filter};
use crate::types::options::get_str;
use crate::types::{Options, PipelineError, Transaction};
use chrono::{DateTime, FixedOffset};

/// Keeps transactions with `from <= timestamp <= to` (`date_range_filter`)
///
/// Bounds are RFC 3339 instants, both optional and inclusive. Comparison is
/// by instant, so differing offsets compare correctly.
#[derive(Debug, Clone, Default)]
pub struct DateRangeFilter {
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
}

impl DateRangeFilter {
    pub fn new(from: Option<DateTime<FixedOffset>>, to: Option<DateTime<FixedOffset>>) -> Self {
        DateRangeFilter { from, to }
    }

    fn keeps(&self, timestamp: DateTime<FixedOffset>) -> bool {
        self.from.map_or(true, |from| timestamp >= from)
            && self.to.map_or(true, |to| timestamp <= to)
    }
}

fn get_instant(
    options: &Options,
    key: &str,
) -> Result<Option<DateTime<FixedOffset>>, PipelineError> {
    let Some(raw) = get_str(options, key)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw.trim())
        .map(Some)
        .map_err(|e| {
            PipelineError::invalid_option(
                key,
                format!("'{}' is not an RFC 3339 timestamp: {}", raw, e),
            )
        })
}

impl Component for DateRangeFilter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        self.from = get_instant(options, "from")?;
        self.to = get_instant(options, "to")?;
        Ok(())
    }

    fn name(&self) -> &str {
        "DateRangeFilter"
    }
}

impl Filter for DateRangeFilter {
    fn apply(&self, input: &[Transaction]) -> Result<Vec<Transaction>, PipelineError> {
        Ok(input
            .iter()
            .filter(|tx| tx.timestamp.is_some_and(|ts| self.keeps(ts)))
            .cloned()
            .collect())
    }
}
