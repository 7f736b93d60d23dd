//! Storage backends for the record set.
//!
//! Every backend follows the same contract: read the whole set, or replace
//! the whole set. Nothing is cached between calls.

pub mod csv_record_store;
