//! Rule-based fraud detection
//!
//! Two independent detections run over the transaction set:
//! - **Amount anomalies**: transactions strictly above `amount_threshold`
//! - **Velocity alerts**: customers with at least `velocity_threshold`
//!   transactions inside a sliding `velocity_window`
//!
//! A runtime failure in one detection empties that detection's result
//! without affecting the other.

use crate::core::traits::{Analytics, Component};
use crate::types::options::{get_decimal, get_i64, get_str};
use crate::types::{AnalyticsResult, Options, PipelineError, Transaction};
use chrono::{DateTime, Duration, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Default number of transactions that triggers a velocity alert
pub const DEFAULT_VELOCITY_THRESHOLD: usize = 10;

/// Default amount above which a transaction is anomalous
pub const DEFAULT_AMOUNT_THRESHOLD: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Default velocity window (one hour)
pub fn default_velocity_window() -> Duration {
    Duration::hours(1)
}

/// Velocity alert for a single customer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityAlert {
    pub customer_id: String,
    /// Timestamp of the first transaction in the qualifying window
    pub window_start: DateTime<FixedOffset>,
    /// Transactions inside the window
    pub count: usize,
}

/// Velocity and amount based fraud detector
///
/// Options:
/// - `velocity_window`: ISO-8601 duration (`PT1H`, `PT30M`, `P1DT2H`) or
///   whole hours with an `h` suffix (`2h`); malformed values keep the default
/// - `velocity_threshold`: positive integer, default 10
/// - `amount_threshold`: decimal, default 10000
#[derive(Debug, Clone)]
pub struct FraudDetectorAnalytics {
    velocity_window: Duration,
    velocity_threshold: usize,
    amount_threshold: Decimal,
}

impl Default for FraudDetectorAnalytics {
    fn default() -> Self {
        FraudDetectorAnalytics {
            velocity_window: default_velocity_window(),
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            amount_threshold: DEFAULT_AMOUNT_THRESHOLD,
        }
    }
}

impl FraudDetectorAnalytics {
    pub fn velocity_window(&self) -> Duration {
        self.velocity_window
    }

    pub fn velocity_threshold(&self) -> usize {
        self.velocity_threshold
    }

    pub fn amount_threshold(&self) -> Decimal {
        self.amount_threshold
    }

    /// Transactions whose amount is strictly above the threshold, in input order
    ///
    /// Transactions without an amount are never anomalous.
    pub fn amount_anomalies(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| tx.amount.is_some_and(|a| a > self.amount_threshold))
            .cloned()
            .collect()
    }

    /// Earliest qualifying velocity window per customer
    ///
    /// Transactions missing a customer id or timestamp are skipped. Alerts are
    /// ordered by customer id.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a window end cannot be represented.
    pub fn velocity_alerts(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<VelocityAlert>, PipelineError> {
        let mut by_customer: BTreeMap<&str, Vec<DateTime<FixedOffset>>> = BTreeMap::new();
        for tx in transactions {
            if let (Some(customer_id), Some(timestamp)) = (tx.customer_id.as_deref(), tx.timestamp)
            {
                by_customer.entry(customer_id).or_default().push(timestamp);
            }
        }

        let mut alerts = Vec::new();
        for (customer_id, mut timestamps) in by_customer {
            timestamps.sort();
            if let Some((window_start, count)) = self.first_burst(&timestamps)? {
                alerts.push(VelocityAlert {
                    customer_id: customer_id.to_string(),
                    window_start,
                    count,
                });
            }
        }

        Ok(alerts)
    }

    /// Scan sorted timestamps for the first window reaching the threshold
    fn first_burst(
        &self,
        timestamps: &[DateTime<FixedOffset>],
    ) -> Result<Option<(DateTime<FixedOffset>, usize)>, PipelineError> {
        for (i, start) in timestamps.iter().enumerate() {
            let window_end = start
                .checked_add_signed(self.velocity_window)
                .ok_or_else(|| PipelineError::arithmetic_overflow("velocity window end"))?;

            let count = timestamps[i..]
                .iter()
                .take_while(|ts| **ts <= window_end)
                .count();

            if count >= self.velocity_threshold {
                return Ok(Some((*start, count)));
            }
        }
        Ok(None)
    }
}

/// Parse a velocity window option
///
/// Accepts an ISO-8601 duration or whole hours with an `h` suffix.
pub fn parse_velocity_window(raw: &str) -> Option<Duration> {
    let trimmed = raw.trim();
    if trimmed.starts_with(['P', 'p']) {
        return parse_iso8601_duration(trimmed);
    }
    let hours = trimmed.strip_suffix(['h', 'H'])?;
    let hours = hours.trim().parse::<i64>().ok().filter(|h| *h >= 0)?;
    Duration::try_hours(hours)
}

/// Parse an ISO-8601 duration of the form `P[nD][T[nH][nM][n[.f]S]]`
fn parse_iso8601_duration(raw: &str) -> Option<Duration> {
    let upper = raw.to_ascii_uppercase();
    let body = upper.strip_prefix('P')?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };
    if date_part.is_empty() && time_part.map_or(true, str::is_empty) {
        return None;
    }

    let mut total = Duration::zero();
    if !date_part.is_empty() {
        let days = date_part.strip_suffix('D')?.parse::<i64>().ok()?;
        total = total.checked_add(&Duration::try_days(days)?)?;
    }

    if let Some(time_part) = time_part {
        let mut number = String::new();
        for c in time_part.chars() {
            let component = match c {
                '0'..='9' | '.' => {
                    number.push(c);
                    continue;
                }
                'H' => Duration::try_hours(number.parse().ok()?)?,
                'M' => Duration::try_minutes(number.parse().ok()?)?,
                'S' => {
                    let seconds: f64 = number.parse().ok()?;
                    Duration::try_milliseconds((seconds * 1000.0).round() as i64)?
                }
                _ => return None,
            };
            total = total.checked_add(&component)?;
            number.clear();
        }
        // Digits without a unit designator
        if !number.is_empty() {
            return None;
        }
    }

    Some(total)
}

impl Component for FraudDetectorAnalytics {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        if let Some(raw) = get_str(options, "velocity_window").unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring velocity_window");
            None
        }) {
            match parse_velocity_window(&raw) {
                Some(window) => self.velocity_window = window,
                None => warn!(
                    velocity_window = %raw,
                    default = %self.velocity_window,
                    "Malformed velocity_window, keeping current value"
                ),
            }
        }

        if let Some(threshold) = get_i64(options, "velocity_threshold")? {
            if threshold <= 0 {
                return Err(PipelineError::invalid_option(
                    "velocity_threshold",
                    format!("must be a positive integer, got {}", threshold),
                ));
            }
            self.velocity_threshold = usize::try_from(threshold).unwrap_or(usize::MAX);
        }

        if let Some(threshold) = get_decimal(options, "amount_threshold")? {
            self.amount_threshold = threshold;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "FraudDetector"
    }
}

impl Analytics for FraudDetectorAnalytics {
    fn analyze(&self, transactions: &[Transaction]) -> Result<AnalyticsResult, PipelineError> {
        let anomalies = self.amount_anomalies(transactions);

        let alerts = self.velocity_alerts(transactions).unwrap_or_else(|e| {
            warn!(error = %e, "Velocity detection failed; reporting no velocity alerts");
            Vec::new()
        });

        let mut result = AnalyticsResult::new();
        result.insert(
            "amount_anomalies".to_string(),
            serde_json::to_value(anomalies)?,
        );
        result.insert("velocity_alerts".to_string(), serde_json::to_value(alerts)?);
        Ok(result)
    }
}
