#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    HISTORY_KEY, HistoryRepository, InMemoryRepository, KeyValueHistory, KeyValueStore, Storage,
    StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
