//! Amount filter
//!
//! Keeps transactions whose amount lies inside optional inclusive bounds.

use crate::core::traits::{Component, Filter};
use crate::types::options::get_decimal;
use crate::types::{Options, PipelineError, Transaction};
use rust_decimal::Decimal;

/// Keeps transactions with `min_amount <= amount <= max_amount` (`amount_filter`)
///
/// Both bounds are optional and inclusive.
#[derive(Debug, Clone, Default)]
pub struct AmountFilter {
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl AmountFilter {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        AmountFilter { min, max }
    }

    fn keeps(&self, amount: Decimal) -> bool {
        self.min.map_or(true, |min| amount >= min) && self.max.map_or(true, |max| amount <= max)
    }
}

impl Component for AmountFilter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        self.min = get_decimal(options, "min_amount")?;
        self.max = get_decimal(options, "max_amount")?;
        Ok(())
    }

    fn name(&self) -> &str {
        "AmountFilter"
    }
}

impl Filter for AmountFilter {
    fn apply(&self, input: &[Transaction]) -> Result<Vec<Transaction>, PipelineError> {
        Ok(input
            .iter()
            .filter(|tx| tx.amount.is_some_and(|amount| self.keeps(amount)))
            .cloned()
            .collect())
    }
}
