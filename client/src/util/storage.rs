//! `localStorage`-backed preference store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session controller only sees the [`KvStore`] trait. This adapter
//! looks the storage object up on every call so the controller can live in
//! a thread-safe Leptos signal without holding a JS handle.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::KvStore;

/// [`KvStore`] over `window.localStorage`. Reads return `None` and writes
/// are dropped outside the browser or when storage is blocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }
}
