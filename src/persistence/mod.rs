//! Best score persistence
//!
//! Features:
//! - Storage-agnostic [`BestScoreStore`] capability injected into the score tracker
//! - Versioned JSON record for file-backed stores
//! - In-memory store for tests and headless runs
//!
//! Platform backends live in [`crate::platform::storage`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by best score stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage could not be reached (no `localStorage`, quota, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Filesystem failure
    #[error("storage i/o failed")]
    Io(#[from] std::io::Error),
    /// Stored value could not be parsed
    #[error("stored best score is malformed: {0}")]
    Malformed(String),
}

/// Durable best score scalar
pub trait BestScoreStore {
    /// Stored best score, `0` when nothing has been stored yet
    fn get_best(&self) -> Result<u32, StoreError>;

    /// Overwrite the stored best score
    fn set_best(&mut self, best: u32) -> Result<(), StoreError>;
}

/// Current record layout version
pub const RECORD_VERSION: u32 = 1;

/// On-disk envelope for the best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub version: u32,
    pub best: u32,
}

impl BestScoreRecord {
    pub fn new(best: u32) -> Self {
        Self {
            version: RECORD_VERSION,
            best,
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Parse a record, rejecting versions from the future
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let record: Self =
            serde_json::from_str(json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        if record.version > RECORD_VERSION {
            return Err(StoreError::Malformed(format!(
                "unsupported record version {}",
                record.version
            )));
        }
        Ok(record)
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best: u32) -> Self {
        Self {
            best: Some(best),
            writes: 0,
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn get_best(&self) -> Result<u32, StoreError> {
        Ok(self.best.unwrap_or(0))
    }

    fn set_best(&mut self, best: u32) -> Result<(), StoreError> {
        self.best = Some(best);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_best().unwrap(), 0);
        store.set_best(12).unwrap();
        assert_eq!(store.get_best().unwrap(), 12);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_record_json() {
        let json = BestScoreRecord::new(42).to_json().unwrap();
        let record = BestScoreRecord::from_json(&json).unwrap();
        assert_eq!(record, BestScoreRecord { version: 1, best: 42 });
    }

    #[test]
    fn test_record_rejects_garbage() {
        assert!(matches!(
            BestScoreRecord::from_json("not json"),
            Err(StoreError::Malformed(_))
        ));
        assert!(matches!(
            BestScoreRecord::from_json(r#"{ "version": 99, "best": 3 }"#),
            Err(StoreError::Malformed(_))
        ));
    }
}
