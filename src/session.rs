//! The per-instance progress store.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The store lives for the lifetime of the module instance and is
//! backed by `localStorage` in the browser and by memory elsewhere.

use std::cell::RefCell;

use log::info;

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::trail::ProgressStore;

#[cfg(target_arch = "wasm32")]
pub type SessionSlot = crate::trail::BrowserSlot;

#[cfg(not(target_arch = "wasm32"))]
pub type SessionSlot = crate::trail::MemorySlot;

pub type SessionStore = ProgressStore<SessionSlot>;

thread_local! {
    static STORE: RefCell<SessionStore> = RefCell::new(open_store(StoreConfig::default()));
}

fn open_store(config: StoreConfig) -> SessionStore {
    ProgressStore::open(Catalog::princeton(), config, SessionSlot::default())
}

/// Re-open the session store with `config`, restoring saved progress.
pub fn init_session(config: StoreConfig) {
    info!("session init with storage key '{}'", config.storage_key);
    let store = open_store(config);
    STORE.with(|s| {
        *s.borrow_mut() = store;
    });
}

/// Execute a closure with read access to the session store.
pub fn with_store<F, R>(f: F) -> R
where
    F: FnOnce(&SessionStore) -> R,
{
    STORE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session store.
pub fn with_store_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut SessionStore) -> R,
{
    STORE.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the session with an empty in-memory store.
#[cfg(test)]
pub fn reset_session() {
    STORE.with(|s| {
        *s.borrow_mut() = open_store(StoreConfig::default());
    });
}
