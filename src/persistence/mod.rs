//! Saved sequences.
//!
//! The sequencer only talks to a [`SequenceStore`], and only when the user
//! saves, opens or deletes. Two backends ship with the crate:
//!
//! - [`MemoryStore`]: a map, for tests and throwaway sessions
//! - [`JsonDirStore`]: one pretty-printed `<id>.json` per sequence in a
//!   directory
//!
//! A failed call leaves both the store and the caller's state as they were.

mod json_dir;
mod memory;

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::snapshot::SequenceSnapshot;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

/// Listing entry for a saved sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSummary {
    pub id: String,
    pub name: String,
    pub bpm: u32,
    pub steps: usize,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    pub updated_at: u64,
}

pub trait SequenceStore: Send {
    /// Every saved sequence, most recently updated first.
    fn list(&self) -> Result<Vec<SequenceSummary>, StoreError>;

    /// The stored snapshot, with its `id` filled in.
    fn get(&self, id: &str) -> Result<SequenceSnapshot, StoreError>;

    /// Save under a fresh id and return it. Any id in `snapshot` is ignored.
    fn create(&mut self, snapshot: &SequenceSnapshot) -> Result<String, StoreError>;

    /// Overwrite an existing sequence.
    fn update(&mut self, id: &str, snapshot: &SequenceSnapshot) -> Result<(), StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Errors returned by a [`SequenceStore`].
#[derive(Debug)]
pub enum StoreError {
    /// No sequence with this id
    NotFound(String),
    /// The id cannot name a stored sequence (empty, or not `[A-Za-z0-9_-]`)
    InvalidId(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "sequence {id} not found"),
            StoreError::InvalidId(id) => write!(f, "invalid sequence id {id:?}"),
            StoreError::Io(err) => write!(f, "storage I/O failed: {err}"),
            StoreError::Serde(err) => write!(f, "stored sequence is malformed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serde(err) => Some(err),
            StoreError::NotFound(_) | StoreError::InvalidId(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}

/// A stored snapshot plus bookkeeping. This is the on-disk layout of one
/// `JsonDirStore` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSequence {
    created_at: u64,
    updated_at: u64,
    sequence: SequenceSnapshot,
}

impl StoredSequence {
    fn new(id: &str, snapshot: &SequenceSnapshot, created_at: u64) -> Self {
        let mut sequence = snapshot.clone();
        sequence.id = Some(id.to_string());
        Self {
            created_at,
            updated_at: now_millis(),
            sequence,
        }
    }

    fn summary(&self, id: &str) -> SequenceSummary {
        SequenceSummary {
            id: id.to_string(),
            name: self.sequence.name.clone(),
            bpm: self.sequence.bpm,
            steps: self.sequence.steps,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Time-ordered, process-unique id.
fn new_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{nanos:016x}-{:04x}", count & 0xffff)
}

/// Ids double as file names, so only a safe alphabet is accepted.
fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

fn sort_summaries(summaries: &mut [SequenceSummary]) {
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_valid() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(validate_id(&a).is_ok());
    }

    #[test]
    fn rejects_unsafe_ids() {
        for id in ["", "a/b", "..", "x y", "é"] {
            assert!(validate_id(id).is_err(), "{id:?}");
        }
    }

    #[test]
    fn errors_display() {
        assert_eq!(StoreError::NotFound("abc".into()).to_string(), "sequence abc not found");
    }
}
