//! `StateStore` over `window.localStorage`

use coherence_core::{CoreError, Result, StateStore};
use web_sys::Storage;

use super::js_message;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the origin's local storage
    ///
    /// Fails when storage is disabled (private mode, blocked cookies).
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| CoreError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| CoreError::storage(js_message(&e)))?
            .ok_or_else(|| CoreError::storage("local storage unavailable"))?;

        Ok(Self { storage })
    }
}

impl StateStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| CoreError::storage(js_message(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CoreError::storage(js_message(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| CoreError::storage(js_message(&e)))
    }
}
