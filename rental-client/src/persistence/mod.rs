//! Local draft persistence.
//!
//! A small key-value port holding the current lead id across sessions.
//! The controller reads it once at mount and writes it only from state
//! machine actions.

mod file;
mod memory;

pub use file::FilePersistence;
pub use memory::{MemoryPersistence, PersistenceOp};

use async_trait::async_trait;
use thiserror::Error;

/// Key under which the current lead id is stored.
pub const LEAD_KEY: &str = "formID";

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON string map.
    #[error("corrupt persistence file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Forced failure (test doubles).
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store for draft state.
#[async_trait]
pub trait DraftPersistence: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;

    /// Remove every value.
    async fn clear(&self) -> Result<(), PersistenceError>;
}
