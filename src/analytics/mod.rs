//! Analytics modules
//!
//! Each module consumes the filtered transaction set and produces one
//! [`AnalyticsResult`](crate::types::AnalyticsResult).
//!
//! - `top_merchants` - merchant ranking by value or volume
//! - `channel_performance` - count and total per payment channel
//! - `fraud_detector` - amount anomalies and velocity alerts

pub mod channel_performance;
pub mod fraud_detector;
pub mod top_merchants;

pub use channel_performance::ChannelPerformanceAnalytics;
pub use fraud_detector::{FraudDetectorAnalytics, VelocityAlert};
pub use top_merchants::{RankBy, TopMerchantsAnalytics, ValueEntry, VolumeEntry};
