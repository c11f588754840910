//! Transaction filters
//!
//! Each filter returns the order-preserving subset of its input that it
//! keeps. Transactions missing the field a filter inspects are dropped,
//! except by a status filter with an empty allowed set, which keeps all.

pub mod amount;
pub mod date_range;
pub mod status;

pub use amount::AmountFilter;
pub use date_range::DateRangeFilter;
pub use status::StatusFilter;
