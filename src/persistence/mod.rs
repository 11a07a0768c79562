//! String-keyed storage slots
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one file per key in a data directory (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

use std::collections::HashMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Errors from a storage backend
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure
    Io(std::io::Error),
    /// Backend not reachable (no window, storage disabled, quota...)
    Unavailable(String),
    /// Key cannot be mapped onto the backend
    InvalidKey(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Unavailable(why) => write!(f, "storage unavailable: {}", why),
            StoreError::InvalidKey(key) => write!(f, "invalid storage key: {:?}", key),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// A named-slot key/value store holding plain text
pub trait ScoreStore {
    /// Read a slot, `Ok(None)` when it was never written
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one slot
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}
