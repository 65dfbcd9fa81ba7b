//! Persistent key-value storage seam.
//!
//! The browser build backs this with `window.localStorage`; tests and the
//! tester use [`crate::headless::MemoryStorage`].

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

pub trait KeyValueStorage {
    /// Read a value; `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the write is refused (quota, private mode).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
