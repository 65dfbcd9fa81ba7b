use crate::dom;
use bissa_core::storage::{KeyValueStorage, StorageError};
use web_sys::Storage;

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

fn handle() -> Result<Storage, StorageError> {
    dom::local_storage().ok_or_else(|| StorageError::Unavailable("localStorage is blocked".into()))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        handle()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        handle()?
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected(dom::js_error_message(&err)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        handle()?
            .remove_item(key)
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
    }
}
