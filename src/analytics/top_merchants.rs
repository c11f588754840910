//! Top merchants analytics
//!
//! Ranks merchants either by transaction volume (count) or by transaction
//! value (sum of amounts) and keeps the top `top_n`.

use crate::core::traits::{Analytics, Component};
use crate::types::options::{get_i64, get_str};
use crate::types::{AnalyticsResult, Options, PipelineError, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Number of merchants reported when `top_n` is absent or non-positive
pub const DEFAULT_TOP_N: usize = 5;

/// Ranking criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    /// Rank by summed transaction amount
    #[default]
    Value,
    /// Rank by transaction count
    Volume,
}

impl RankBy {
    fn parse(raw: &str) -> Result<Self, PipelineError> {
        match raw.trim().to_lowercase().as_str() {
            "value" => Ok(RankBy::Value),
            "volume" => Ok(RankBy::Volume),
            _ => Err(PipelineError::invalid_option(
                "by",
                format!("expected 'value' or 'volume', got '{}'", raw),
            )),
        }
    }

    /// Result key for this ranking
    pub fn result_key(&self) -> &'static str {
        match self {
            RankBy::Value => "top_by_value",
            RankBy::Volume => "top_by_volume",
        }
    }
}

/// Merchant ranked by transaction count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEntry {
    pub merchant_id: String,
    pub merchant_name: Option<String>,
    pub count: u64,
}

/// Merchant ranked by summed amount
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    pub merchant_id: String,
    pub merchant_name: Option<String>,
    pub total: Decimal,
}

/// Running aggregate for one merchant
#[derive(Debug, Default)]
struct MerchantTally<'a> {
    name: Option<&'a str>,
    count: u64,
    total: Decimal,
}

/// Top merchants by value or volume
///
/// Options:
/// - `top_n`: number of merchants to report (default 5, non-positive resets to default)
/// - `by`: `value` (default) or `volume`, case-insensitive
///
/// Transactions without a merchant id are ignored. Ties are broken by
/// merchant id in ascending order so the ranking is deterministic.
#[derive(Debug, Clone)]
pub struct TopMerchantsAnalytics {
    top_n: usize,
    by: RankBy,
}

impl Default for TopMerchantsAnalytics {
    fn default() -> Self {
        TopMerchantsAnalytics {
            top_n: DEFAULT_TOP_N,
            by: RankBy::Value,
        }
    }
}

impl TopMerchantsAnalytics {
    pub fn new(top_n: i64, by: RankBy) -> Self {
        TopMerchantsAnalytics {
            top_n: normalize_top_n(top_n),
            by,
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn by(&self) -> RankBy {
        self.by
    }

    /// Group by merchantId. Amounts are only summed when ranking by value.
    fn tally<'a>(
        transactions: &'a [Transaction],
        by: RankBy,
    ) -> Result<HashMap<&'a str, MerchantTally<'a>>, PipelineError> {
        let mut tallies: HashMap<&str, MerchantTally> = HashMap::new();

        for tx in transactions {
            let Some(merchant_id) = tx.merchant_id.as_deref() else {
                continue;
            };
            let tally = tallies.entry(merchant_id).or_default();
            tally.count += 1;
            if by == RankBy::Value {
                tally.total = tally
                    .total
                    .checked_add(tx.amount_or_zero())
                    .ok_or_else(|| PipelineError::arithmetic_overflow("merchant total"))?;
            }
            if tally.name.is_none() {
                tally.name = tx.merchant_name.as_deref().filter(|n| !n.is_empty());
            }
        }

        Ok(tallies)
    }

    /// Merchants ranked by transaction count, descending
    pub fn rank_by_volume(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<VolumeEntry>, PipelineError> {
        let mut ranked: Vec<_> = Self::tally(transactions, RankBy::Volume)?
            .into_iter()
            .collect();
        ranked.sort_by(|(id_a, a), (id_b, b)| {
            b.count.cmp(&a.count).then_with(|| id_a.cmp(id_b))
        });
        ranked.truncate(self.top_n);

        Ok(ranked
            .into_iter()
            .map(|(merchant_id, tally)| VolumeEntry {
                merchant_id: merchant_id.to_string(),
                merchant_name: tally.name.map(str::to_string),
                count: tally.count,
            })
            .collect())
    }

    /// Merchants ranked by summed amount, descending
    pub fn rank_by_value(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<ValueEntry>, PipelineError> {
        let mut ranked: Vec<_> = Self::tally(transactions, RankBy::Value)?
            .into_iter()
            .collect();
        ranked.sort_by(|(id_a, a), (id_b, b)| match b.total.cmp(&a.total) {
            Ordering::Equal => id_a.cmp(id_b),
            other => other,
        });
        ranked.truncate(self.top_n);

        Ok(ranked
            .into_iter()
            .map(|(merchant_id, tally)| ValueEntry {
                merchant_id: merchant_id.to_string(),
                merchant_name: tally.name.map(str::to_string),
                total: tally.total,
            })
            .collect())
    }
}

fn normalize_top_n(top_n: i64) -> usize {
    if top_n <= 0 {
        DEFAULT_TOP_N
    } else {
        usize::try_from(top_n).unwrap_or(usize::MAX)
    }
}

impl Component for TopMerchantsAnalytics {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        if let Some(top_n) = get_i64(options, "top_n")? {
            if top_n <= 0 {
                debug!(
                    top_n,
                    default = DEFAULT_TOP_N,
                    "Non-positive top_n, using default"
                );
            }
            self.top_n = normalize_top_n(top_n);
        }
        if let Some(by) = get_str(options, "by")? {
            self.by = RankBy::parse(&by)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "TopMerchants"
    }
}

impl Analytics for TopMerchantsAnalytics {
    fn analyze(&self, transactions: &[Transaction]) -> Result<AnalyticsResult, PipelineError> {
        let ranking = match self.by {
            RankBy::Volume => serde_json::to_value(self.rank_by_volume(transactions)?)?,
            RankBy::Value => serde_json::to_value(self.rank_by_value(transactions)?)?,
        };

        let mut result = AnalyticsResult::new();
        result.insert(self.by.result_key().to_string(), ranking);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn tx(merchant: Option<&str>, amount: Option<Decimal>) -> Transaction {
        Transaction {
            merchant_id: merchant.map(str::to_string),
            merchant_name: merchant.map(|m| format!("{} Store", m)),
            amount,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(Some("M3"), Some(dec!(10))),
            tx(Some("M1"), Some(dec!(500))),
            tx(Some("M2"), Some(dec!(300))),
            tx(Some("M3"), Some(dec!(10))),
            tx(Some("M2"), None),
            tx(None, Some(dec!(99999))),
            tx(Some("M3"), Some(dec!(10))),
            tx(Some("M4"), Some(dec!(300))),
        ]
    }

    fn options(value: serde_json::Value) -> Options {
        serde_json::from_value(value).unwrap()
    }

    fn configured(value: serde_json::Value) -> TopMerchantsAnalytics {
        let mut analytics = TopMerchantsAnalytics::default();
        analytics.init(&options(value)).unwrap();
        analytics
    }

    #[test]
    fn test_rank_by_volume() {
        let analytics = configured(json!({"by": "volume"}));
        let ranked = analytics.rank_by_volume(&sample()).unwrap();

        let ids: Vec<_> = ranked
            .iter()
            .map(|e| (e.merchant_id.as_str(), e.count))
            .collect();
        assert_eq!(ids, vec![("M3", 3), ("M2", 2), ("M1", 1), ("M4", 1)]);
        assert_eq!(ranked[0].merchant_name.as_deref(), Some("M3 Store"));
    }

    #[test]
    fn test_volume_ignores_amounts_that_would_overflow() {
        let batch = vec![
            tx(Some("M1"), Some(Decimal::MAX)),
            tx(Some("M1"), Some(Decimal::MAX)),
        ];
        let analytics = TopMerchantsAnalytics::new(5, RankBy::Volume);

        let result = analytics.analyze(&batch).unwrap();

        assert_eq!(
            result["top_by_volume"],
            json!([{"merchantId": "M1", "merchantName": "M1 Store", "count": 2}])
        );
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        let batch = vec![
            tx(Some("M1"), Some(Decimal::MAX)),
            tx(Some("M1"), Some(Decimal::MAX)),
        ];
        let analytics = TopMerchantsAnalytics::new(5, RankBy::Value);

        let result = analytics.analyze(&batch);

        assert!(matches!(
            result,
            Err(PipelineError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_rank_by_value_with_tie_break() {
        let analytics = configured(json!({}));
        let ranked = analytics.rank_by_value(&sample()).unwrap();

        let ids: Vec<_> = ranked
            .iter()
            .map(|e| (e.merchant_id.as_str(), e.total))
            .collect();
        // M2 and M4 tie on 300; M2 sorts first
        assert_eq!(
            ids,
            vec![
                ("M1", dec!(500)),
                ("M2", dec!(300)),
                ("M4", dec!(300)),
                ("M3", dec!(30)),
            ]
        );
    }

    #[test]
    fn test_analyze_uses_mode_specific_key() {
        let volume = configured(json!({"by": "VOLUME", "top_n": 1}))
            .analyze(&sample())
            .unwrap();
        assert_eq!(
            serde_json::Value::Object(volume),
            json!({"top_by_volume": [{"merchantId": "M3", "merchantName": "M3 Store", "count": 3}]})
        );

        let value = configured(json!({"by": "Value", "top_n": "2"}))
            .analyze(&sample())
            .unwrap();
        assert_eq!(
            serde_json::Value::Object(value),
            json!({"top_by_value": [
                {"merchantId": "M1", "merchantName": "M1 Store", "total": "500"},
                {"merchantId": "M2", "merchantName": "M2 Store", "total": "300"}
            ]})
        );
    }

    #[rstest]
    #[case::top_one(1)]
    #[case::top_two(2)]
    #[case::more_than_merchants(10)]
    fn test_volume_counts_are_exact_and_bounded(#[case] top_n: i64) {
        let transactions = sample();
        let analytics = TopMerchantsAnalytics::new(top_n, RankBy::Volume);
        let ranked = analytics.rank_by_volume(&transactions).unwrap();

        assert!(ranked.len() <= top_n as usize);
        for pair in ranked.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        for entry in &ranked {
            let actual = transactions
                .iter()
                .filter(|t| t.merchant_id.as_deref() == Some(entry.merchant_id.as_str()))
                .count() as u64;
            assert_eq!(entry.count, actual);
        }
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-3)]
    fn test_non_positive_top_n_behaves_like_default(#[case] top_n: i64) {
        let many: Vec<Transaction> = (0..8)
            .map(|i| tx(Some(&format!("M{}", i)), Some(Decimal::from(i))))
            .collect();

        let reset = configured(json!({"top_n": top_n}));
        let default = configured(json!({"top_n": 5}));

        assert_eq!(reset.top_n(), DEFAULT_TOP_N);
        assert_eq!(
            reset.analyze(&many).unwrap(),
            default.analyze(&many).unwrap()
        );
    }

    #[rstest]
    #[case::bad_mode(json!({"by": "weight"}))]
    #[case::bad_top_n(json!({"top_n": "many"}))]
    #[case::fractional_top_n(json!({"top_n": 2.5}))]
    fn test_invalid_options_fail_init(#[case] value: serde_json::Value) {
        let mut analytics = TopMerchantsAnalytics::default();
        let result = analytics.init(&options(value));
        assert!(matches!(result, Err(PipelineError::InvalidOption { .. })));
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        let result = TopMerchantsAnalytics::default().analyze(&[]).unwrap();
        assert_eq!(result["top_by_value"], json!([]));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analytics = configured(json!({"by": "volume"}));
        let transactions = sample();
        assert_eq!(
            analytics.analyze(&transactions).unwrap(),
            analytics.analyze(&transactions).unwrap()
        );
    }
}
