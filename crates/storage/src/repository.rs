use async_trait::async_trait;
use doomsday_core::model::HistoryEntry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Logical key under which the whole quiz history document is stored.
pub const HISTORY_KEY: &str = "history";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Whether retrying the same call later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Connection(_))
    }
}

/// Durable string key-value store. Writes replace the whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Repository contract for the quiz history.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Load every recorded entry, oldest first. A store with no history yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored document is malformed, or
    /// other storage errors if it cannot be read.
    async fn load_history(&self) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Replace the stored history with `entries`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be encoded or written.
    async fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StorageError>;
}

/// Encode a history as the stored JSON array.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_history(entries: &[HistoryEntry]) -> Result<String, StorageError> {
    serde_json::to_string(entries).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decode a stored JSON array of history entries.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the document is not a valid history.
pub fn decode_history(raw: &str) -> Result<Vec<HistoryEntry>, StorageError> {
    serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// History kept as a single JSON document under [`HISTORY_KEY`] in any key-value store.
#[derive(Clone)]
pub struct KeyValueHistory {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueHistory {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HistoryRepository for KeyValueHistory {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.store.get(HISTORY_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => decode_history(&raw),
            _ => Ok(Vec::new()),
        }
    }

    async fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let raw = encode_history(entries)?;
        self.store.put(HISTORY_KEY, &raw).await
    }
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates the raw store and the history repository behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn from_store(kv: Arc<dyn KeyValueStore>) -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(KeyValueHistory::new(Arc::clone(&kv)));
        Self { kv, history }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryRepository::new()))
    }
}
