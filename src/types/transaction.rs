//! Transaction record for the payments analytics pipeline
//!
//! A `Transaction` is created once by a reader and never mutated afterwards.
//! Filters select subsets of transactions and analytics modules consume them
//! read-only.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder used when a grouping key (channel, category) is absent
pub const UNKNOWN: &str = "UNKNOWN";

/// Single payment event ingested for analysis
///
/// Every field except the identifier is optional because source data is not
/// schema-validated. Analytics apply their own defaults for missing values
/// (zero for amounts, [`UNKNOWN`] for channels and categories).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier (`transactionId` in CSV exports)
    #[serde(alias = "transactionId", default)]
    pub id: Option<String>,

    #[serde(default)]
    pub merchant_id: Option<String>,

    #[serde(default)]
    pub merchant_name: Option<String>,

    #[serde(default)]
    pub merchant_category: Option<String>,

    /// Transaction amount with arbitrary decimal precision
    #[serde(default)]
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub currency: Option<String>,

    /// Settlement status such as COMPLETED, FAILED or PENDING
    #[serde(default)]
    pub status: Option<String>,

    /// Timezone-aware instant at which the payment happened
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// Payment channel (UPI, CARD, NETBANKING, WALLET, ...)
    #[serde(default)]
    pub payment_type: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,
}

impl Transaction {
    /// Amount with a missing value treated as zero
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }

    /// Payment channel, or [`UNKNOWN`] when absent
    pub fn channel(&self) -> &str {
        self.payment_type.as_deref().unwrap_or(UNKNOWN)
    }

    /// Merchant category, or [`UNKNOWN`] when absent
    pub fn category(&self) -> &str {
        self.merchant_category.as_deref().unwrap_or(UNKNOWN)
    }
}
