//! Record storage layer.
//! - `records` holds the `Record` type, the `RecordStore` trait and the
//!   case-insensitive helpers handlers use on a loaded set.
//! - `storage` holds the CSV file-backed implementation.

pub mod errors;
pub mod records;
pub mod storage;
