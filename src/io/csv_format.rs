//! CSV format handling for transaction exports
//!
//! This module centralizes the CSV row format:
//! - `CsvRecord` mirrors one row of the export
//! - `DateFormat` selects how the timestamp column is read
//! - `convert_csv_record` turns a row into a [`Transaction`]
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{PipelineError, Transaction};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Currency assumed when the column is absent or blank
pub const DEFAULT_CURRENCY: &str = "INR";

/// CSV record structure for deserialization
///
/// Columns are matched by header name. Every column is optional, so exports
/// that omit one still load.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CsvRecord {
    #[serde(alias = "id", default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub merchant_category: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Preferred layout of the timestamp column
///
/// The other layout is tried when the preferred one does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `2024-03-01T09:00:00+05:30`
    #[default]
    OffsetDateTime,
    /// `2024-03-01T09:00:00`, resolved in the system time zone
    LocalDateTime,
}

impl DateFormat {
    /// Parse a `date_format` option value
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        match raw.trim().to_uppercase().as_str() {
            "ISO_OFFSET_DATE_TIME" => Ok(DateFormat::OffsetDateTime),
            "ISO_LOCAL_DATE_TIME" => Ok(DateFormat::LocalDateTime),
            _ => Err(PipelineError::invalid_option(
                "date_format",
                format!(
                    "expected ISO_OFFSET_DATE_TIME or ISO_LOCAL_DATE_TIME, got '{}'",
                    raw
                ),
            )),
        }
    }

    /// Parse a timestamp, trying this layout first and then the other
    pub fn parse_timestamp(self, raw: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            DateFormat::OffsetDateTime => parse_offset(raw).or_else(|| parse_local(raw)),
            DateFormat::LocalDateTime => parse_local(raw).or_else(|| parse_offset(raw)),
        }
    }
}

fn parse_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z"))
        .ok()
}

fn parse_local(raw: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()?;
    // Earliest instant for times repeated by a DST change; None inside a gap
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convert a CsvRecord to a Transaction
///
/// This function:
/// - Drops blank cells
/// - Parses the amount into a Decimal
/// - Parses the timestamp with the given preferred layout
/// - Defaults the currency to [`DEFAULT_CURRENCY`]
///
/// # Errors
///
/// Returns a Parse error (without line information) if the amount or
/// timestamp cannot be parsed.
pub fn convert_csv_record(
    csv_record: CsvRecord,
    date_format: DateFormat,
) -> Result<Transaction, PipelineError> {
    let id = non_blank(csv_record.transaction_id);
    let label = id.as_deref().unwrap_or("<no id>").to_string();

    let amount = match non_blank(csv_record.amount) {
        Some(raw) => Some(
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|_| {
                    PipelineError::parse(format!(
                        "Invalid amount '{}' for transaction {}",
                        raw, label
                    ))
                })?,
        ),
        None => None,
    };

    let timestamp = match non_blank(csv_record.timestamp) {
        Some(raw) => Some(date_format.parse_timestamp(&raw).ok_or_else(|| {
            PipelineError::parse(format!(
                "Invalid timestamp '{}' for transaction {}",
                raw, label
            ))
        })?),
        None => None,
    };

    Ok(Transaction {
        id,
        merchant_id: non_blank(csv_record.merchant_id),
        merchant_name: non_blank(csv_record.merchant_name),
        merchant_category: non_blank(csv_record.merchant_category),
        amount,
        currency: Some(
            non_blank(csv_record.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        ),
        status: non_blank(csv_record.status),
        timestamp,
        payment_type: non_blank(csv_record.payment_type),
        location: non_blank(csv_record.location),
        customer_id: non_blank(csv_record.customer_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn record(amount: Option<&str>, timestamp: Option<&str>) -> CsvRecord {
        CsvRecord {
            transaction_id: Some("T1".to_string()),
            amount: amount.map(str::to_string),
            timestamp: timestamp.map(str::to_string),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::plain("100.50", dec!(100.50))]
    #[case::padded("  100.0  ", dec!(100.0))]
    #[case::four_places("100.1234", dec!(100.1234))]
    #[case::scientific("1e3", dec!(1000))]
    fn test_convert_amount(#[case] raw: &str, #[case] expected: Decimal) {
        let tx = convert_csv_record(record(Some(raw), None), DateFormat::default()).unwrap();
        assert_eq!(tx.amount, Some(expected));
    }

    #[rstest]
    #[case::empty(Some(""))]
    #[case::whitespace(Some("   "))]
    #[case::missing(None)]
    fn test_blank_amount_is_absent(#[case] raw: Option<&str>) {
        let tx = convert_csv_record(record(raw, None), DateFormat::default()).unwrap();
        assert_eq!(tx.amount, None);
    }

    #[rstest]
    #[case::bad_amount(record(Some("ten"), None), "Invalid amount 'ten' for transaction T1")]
    #[case::bad_timestamp(record(None, Some("yesterday")), "Invalid timestamp 'yesterday'")]
    fn test_convert_errors(#[case] input: CsvRecord, #[case] expected: &str) {
        let error = convert_csv_record(input, DateFormat::default()).unwrap_err();
        assert!(matches!(error, PipelineError::Parse { line: None, .. }));
        assert!(error.to_string().contains(expected), "{}", error);
    }

    #[test]
    fn test_offset_timestamp_keeps_offset() {
        let tx = convert_csv_record(
            record(None, Some("2024-03-01T09:15:00+05:30")),
            DateFormat::OffsetDateTime,
        )
        .unwrap();

        let timestamp = tx.timestamp.unwrap();
        assert_eq!(timestamp.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(timestamp.hour(), 9);
        assert_eq!(timestamp.minute(), 15);
    }

    #[rstest]
    #[case::preferred_local(DateFormat::LocalDateTime, "2024-03-01T09:15:00")]
    #[case::fallback_to_local(DateFormat::OffsetDateTime, "2024-03-01T09:15:00")]
    #[case::fractional_seconds(DateFormat::LocalDateTime, "2024-03-01T09:15:00.250")]
    #[case::no_seconds(DateFormat::LocalDateTime, "2024-03-01T09:15")]
    fn test_local_timestamp_uses_system_zone(#[case] format: DateFormat, #[case] raw: &str) {
        let tx = convert_csv_record(record(None, Some(raw)), format).unwrap();
        let local = tx.timestamp.unwrap().with_timezone(&Local);
        assert_eq!(local.hour(), 9);
        assert_eq!(local.minute(), 15);
    }

    #[test]
    fn test_local_preference_falls_back_to_offset() {
        let tx = convert_csv_record(
            record(None, Some("2024-03-01T09:15:00Z")),
            DateFormat::LocalDateTime,
        )
        .unwrap();
        assert_eq!(tx.timestamp.unwrap().offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_fields_are_trimmed_and_currency_defaults() {
        let input = CsvRecord {
            transaction_id: Some(" T9 ".to_string()),
            merchant_id: Some("M1".to_string()),
            merchant_name: Some("  ".to_string()),
            payment_type: Some("UPI ".to_string()),
            status: Some("COMPLETED".to_string()),
            ..Default::default()
        };

        let tx = convert_csv_record(input, DateFormat::default()).unwrap();

        assert_eq!(tx.id.as_deref(), Some("T9"));
        assert_eq!(tx.merchant_name, None);
        assert_eq!(tx.payment_type.as_deref(), Some("UPI"));
        assert_eq!(tx.currency.as_deref(), Some(DEFAULT_CURRENCY));
    }

    #[test]
    fn test_explicit_currency_is_kept() {
        let input = CsvRecord {
            currency: Some("USD".to_string()),
            ..Default::default()
        };
        let tx = convert_csv_record(input, DateFormat::default()).unwrap();
        assert_eq!(tx.currency.as_deref(), Some("USD"));
    }

    #[rstest]
    #[case::offset("ISO_OFFSET_DATE_TIME", DateFormat::OffsetDateTime)]
    #[case::local("iso_local_date_time", DateFormat::LocalDateTime)]
    fn test_date_format_parse(#[case] raw: &str, #[case] expected: DateFormat) {
        assert_eq!(DateFormat::parse(raw).unwrap(), expected);
    }

    #[test]
    fn test_date_format_parse_rejects_unknown() {
        let result = DateFormat::parse("dd/MM/yyyy");
        assert!(matches!(result, Err(PipelineError::InvalidOption { .. })));
    }
}
