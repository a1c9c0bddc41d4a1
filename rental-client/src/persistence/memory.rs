//! In-memory persistence with an operation log.

use super::{DraftPersistence, PersistenceError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A persistence operation, as recorded by [`MemoryPersistence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceOp {
    /// `get(key)`.
    Get(String),
    /// `set(key, value)`.
    Set(String, String),
    /// `remove(key)`.
    Remove(String),
    /// `clear()`.
    Clear,
}

/// Shared in-memory key-value store.
///
/// Clones share state, so a test can keep a handle while the controller
/// owns another.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    ops: Vec<PersistenceOp>,
    fail_writes: Option<String>,
}

impl MemoryPersistence {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .unwrap()
            .values
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Current value for a key, without logging an operation.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().values.get(key).cloned()
    }

    /// Every operation performed so far.
    pub fn ops(&self) -> Vec<PersistenceOp> {
        self.inner.lock().unwrap().ops.clone()
    }

    /// Number of `remove(key)` calls.
    pub fn remove_count(&self, key: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| matches!(op, PersistenceOp::Remove(k) if k == key))
            .count()
    }

    /// Make every `set`/`remove`/`clear` fail until cleared with `None`.
    pub fn fail_writes(&self, error: Option<&str>) {
        self.inner.lock().unwrap().fail_writes = error.map(str::to_string);
    }

    fn write_guard(inner: &MemoryInner) -> Result<(), PersistenceError> {
        match &inner.fail_writes {
            Some(error) => Err(PersistenceError::Unavailable(error.clone())),
            None => Ok(()),
        }
    }
}

impl Clone for MemoryPersistence {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl DraftPersistence for MemoryPersistence {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.push(PersistenceOp::Get(key.to_string()));
        Ok(inner.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .ops
            .push(PersistenceOp::Set(key.to_string(), value.to_string()));
        Self::write_guard(&inner)?;
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.push(PersistenceOp::Remove(key.to_string()));
        Self::write_guard(&inner)?;
        inner.values.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.push(PersistenceOp::Clear);
        Self::write_guard(&inner)?;
        inner.values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryPersistence::new();
        assert_eq!(store.get("formID").await.unwrap(), None);

        store.set("formID", "L1").await.unwrap();
        assert_eq!(store.get("formID").await.unwrap().as_deref(), Some("L1"));

        store.remove("formID").await.unwrap();
        store.remove("formID").await.unwrap();
        assert_eq!(store.peek("formID"), None);
        assert_eq!(store.remove_count("formID"), 2);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = MemoryPersistence::with_value("a", "1");
        store.set("b", "2").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.peek("a"), None);
        assert_eq!(store.peek("b"), None);
        assert_eq!(store.ops().last(), Some(&PersistenceOp::Clear));
    }

    #[tokio::test]
    async fn forced_write_failure_keeps_old_value() {
        let store = MemoryPersistence::with_value("formID", "L1");
        store.fail_writes(Some("disk full"));

        assert!(store.set("formID", "L2").await.is_err());
        assert_eq!(store.peek("formID").as_deref(), Some("L1"));

        store.fail_writes(None);
        store.set("formID", "L2").await.unwrap();
        assert_eq!(store.peek("formID").as_deref(), Some("L2"));
    }
}
