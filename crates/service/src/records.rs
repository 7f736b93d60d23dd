use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// A single name/value entry. Names are matched case-insensitively but
/// stored exactly as entered; nothing enforces uniqueness.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub value: String,
}

impl Record {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Whole-set persistence for records.
///
/// Implementations must not cache: each `load_all` reflects the medium at
/// call time and each `save_all` overwrites it wholesale.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the medium with just its header if it does not exist yet.
    async fn ensure_initialized(&self) -> Result<(), StoreError>;
    /// Every stored record, sorted by name (case-insensitive, ascending).
    async fn load_all(&self) -> Result<Vec<Record>, StoreError>;
    /// Replace the stored set with exactly `records`, in the given order.
    async fn save_all(&self, records: &[Record]) -> Result<(), StoreError>;
}

pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Stable sort by lowercased name; ties keep their existing order.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by_cached_key(|r| r.name.to_lowercase());
}

/// First record whose name matches `name`, ignoring case.
pub fn find<'a>(records: &'a [Record], name: &str) -> Option<&'a Record> {
    records.iter().find(|r| names_match(&r.name, name))
}

pub fn find_mut<'a>(records: &'a mut [Record], name: &str) -> Option<&'a mut Record> {
    records.iter_mut().find(|r| names_match(&r.name, name))
}

/// Drop every record matching `name` ignoring case; returns how many went.
pub fn remove_all(records: &mut Vec<Record>, name: &str) -> usize {
    let before = records.len();
    records.retain(|r| !names_match(&r.name, name));
    before - records.len()
}
