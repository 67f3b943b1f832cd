pub mod file;
#[cfg(test)]
pub mod memory;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

pub const SEARCH_KEY: &str = "bookshelf-search";
pub const CATEGORY_KEY: &str = "bookshelf-category";
pub const FAVORITES_KEY: &str = "bookshelf-favorites";

/// Durable string values keyed by fixed identifiers.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
