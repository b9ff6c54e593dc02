//! One-slot key-value persistence.
//!
//! In the browser the slot is a `localStorage` key. Native builds and tests
//! use an in-memory map with the same semantics.

use std::collections::HashMap;

use crate::error::StorageError;

/// A string key-value store holding serialized progress.
pub trait SlotStorage {
    /// Read a slot. `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slot storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    slots: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a slot, e.g. with a value saved by an earlier session.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStorage for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserSlot;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;

    use super::SlotStorage;
    use crate::error::StorageError;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = localStorage, js_name = getItem)]
        fn local_storage_get(key: &str) -> Result<Option<String>, JsValue>;

        #[wasm_bindgen(catch, js_namespace = localStorage, js_name = setItem)]
        fn local_storage_set(key: &str, value: &str) -> Result<(), JsValue>;
    }

    /// `window.localStorage` slot storage. Only usable where `localStorage`
    /// exists (the main thread, not a Web Worker).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserSlot;

    impl SlotStorage for BrowserSlot {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            local_storage_get(key).map_err(|_| StorageError::Unavailable)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            // setItem throws QuotaExceededError when a large photo does not fit.
            local_storage_set(key, value).map_err(|e| StorageError::Write(format!("{:?}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slot_starts_empty() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("tigerTrails").unwrap(), None);
    }

    #[test]
    fn memory_slot_overwrites() {
        let mut slot = MemorySlot::with_value("k", "old");
        slot.write("k", "new").unwrap();
        assert_eq!(slot.get("k"), Some("new"));
        assert_eq!(slot.read("other").unwrap(), None);
    }
}
