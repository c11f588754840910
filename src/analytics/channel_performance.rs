//! Channel performance analytics
//!
//! Aggregates transaction counts and totals per payment channel.

use crate::core::traits::{Analytics, Component};
use crate::types::{AnalyticsResult, Options, PipelineError, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Count and total amount per payment channel
///
/// Produces two independent mappings keyed by channel: `counts` and `values`.
/// Transactions without a channel are grouped under `UNKNOWN` and missing
/// amounts count as zero. Channels are emitted in lexicographic order, so the
/// output does not depend on input order.
#[derive(Debug, Clone, Default)]
pub struct ChannelPerformanceAnalytics;

impl ChannelPerformanceAnalytics {
    /// Per-channel transaction counts
    pub fn counts(&self, transactions: &[Transaction]) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for tx in transactions {
            *counts.entry(tx.channel().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Per-channel amount totals
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a channel total exceeds the decimal range.
    pub fn values(
        &self,
        transactions: &[Transaction],
    ) -> Result<BTreeMap<String, Decimal>, PipelineError> {
        let mut values: BTreeMap<String, Decimal> = BTreeMap::new();
        for tx in transactions {
            let total = values
                .entry(tx.channel().to_string())
                .or_insert(Decimal::ZERO);
            *total = total
                .checked_add(tx.amount_or_zero())
                .ok_or_else(|| PipelineError::arithmetic_overflow("channel total"))?;
        }
        Ok(values)
    }
}

impl Component for ChannelPerformanceAnalytics {
    fn init(&mut self, _options: &Options) -> Result<(), PipelineError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "ChannelPerformance"
    }
}

impl Analytics for ChannelPerformanceAnalytics {
    fn analyze(&self, transactions: &[Transaction]) -> Result<AnalyticsResult, PipelineError> {
        let counts = self.counts(transactions);
        let values = self.values(transactions)?;

        let mut result = AnalyticsResult::new();
        result.insert("counts".to_string(), serde_json::to_value(counts)?);
        result.insert("values".to_string(), serde_json::to_value(values)?);
        Ok(result)
    }
}
