//! Benchmark suite for the analytics modules and filter chain
//!
//! Uses the divan benchmarking framework over synthetic batches.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Batches
//!
//! Each batch is generated deterministically with a mix of:
//! - Five payment channels (one left blank)
//! - 50 merchants and 200 customers
//! - Completed, failed and pending statuses
//! - Occasional high-value transactions

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use payments_analytics::analytics::{
    ChannelPerformanceAnalytics, FraudDetectorAnalytics, RankBy, TopMerchantsAnalytics,
};
use payments_analytics::core::{Analytics, Filter};
use payments_analytics::filters::{AmountFilter, StatusFilter};
use payments_analytics::Transaction;
use rust_decimal::Decimal;

const SIZES: [usize; 3] = [100, 1_000, 100_000];

fn main() {
    divan::main();
}

fn start() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(5 * 3600 + 1800)
        .and_then(|tz| tz.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single())
        .expect("valid start time")
}

fn synthetic_batch(size: usize) -> Vec<Transaction> {
    let channels = ["UPI", "CARD", "NETBANKING", "WALLET", ""];
    let statuses = ["COMPLETED", "COMPLETED", "COMPLETED", "FAILED", "PENDING"];
    let t0 = start();

    (0..size)
        .map(|i| {
            let channel = channels[i % channels.len()];
            let amount = if i % 97 == 0 {
                Decimal::new(1_500_000, 2)
            } else {
                Decimal::new((i % 5_000) as i64 * 100 + 99, 2)
            };
            Transaction {
                id: Some(format!("T{}", i)),
                merchant_id: Some(format!("M{}", i % 50)),
                merchant_name: Some(format!("Merchant {}", i % 50)),
                amount: Some(amount),
                currency: Some("INR".to_string()),
                status: Some(statuses[i % statuses.len()].to_string()),
                timestamp: Some(t0 + Duration::seconds(i as i64 * 7)),
                payment_type: (!channel.is_empty()).then(|| channel.to_string()),
                customer_id: Some(format!("C{}", i % 200)),
                ..Default::default()
            }
        })
        .collect()
}

#[divan::bench(args = SIZES)]
fn channel_performance(bencher: divan::Bencher, size: usize) {
    let batch = synthetic_batch(size);
    let analytics = ChannelPerformanceAnalytics;
    bencher.bench(|| analytics.analyze(divan::black_box(&batch)));
}

#[divan::bench(args = SIZES)]
fn top_merchants_by_value(bencher: divan::Bencher, size: usize) {
    let batch = synthetic_batch(size);
    let analytics = TopMerchantsAnalytics::new(10, RankBy::Value);
    bencher.bench(|| analytics.analyze(divan::black_box(&batch)));
}

#[divan::bench(args = SIZES)]
fn top_merchants_by_volume(bencher: divan::Bencher, size: usize) {
    let batch = synthetic_batch(size);
    let analytics = TopMerchantsAnalytics::new(10, RankBy::Volume);
    bencher.bench(|| analytics.analyze(divan::black_box(&batch)));
}

#[divan::bench(args = SIZES)]
fn fraud_detection(bencher: divan::Bencher, size: usize) {
    let batch = synthetic_batch(size);
    let analytics = FraudDetectorAnalytics::default();
    bencher.bench(|| analytics.analyze(divan::black_box(&batch)));
}

#[divan::bench(args = SIZES)]
fn status_then_amount_filter(bencher: divan::Bencher, size: usize) {
    let batch = synthetic_batch(size);
    let status = StatusFilter::default();
    let amount = AmountFilter::new(Some(Decimal::new(10_000, 2)), None);
    bencher.bench(|| {
        status
            .apply(divan::black_box(&batch))
            .and_then(|kept| amount.apply(&kept))
    });
}
