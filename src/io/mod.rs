//! I/O module
//!
//! Handles loading transactions from data sources.
//!
//! # Components
//!
//! - `csv_format` - CSV row format handling (record conversion, timestamp layouts)
//! - `csv_reader` - Streaming CSV iterator and the `csv` reader component
//! - `json_reader` - The `json` reader component

pub mod csv_format;
pub mod csv_reader;
pub mod json_reader;

pub use csv_format::{convert_csv_record, CsvRecord, DateFormat};
pub use csv_reader::{CsvReader, CsvRecords};
pub use json_reader::JsonReader;
