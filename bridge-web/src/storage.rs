//! `localStorage`-backed session storage.
//!
//! Entries are stored under their bare keys (`profile`, `token`) so existing
//! sessions written by earlier shells of the application keep working.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::SessionStore,
};

use crate::error::js_error;

fn local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".into()))?;
    window
        .local_storage()
        .map_err(|err| js_error("localStorage", err))?
        .ok_or_else(|| BridgeError::NotAvailable("localStorage".into()))
}

/// Browser `localStorage` implementation of [`SessionStore`].
#[derive(Clone)]
pub struct LocalSessionStore {
    storage: web_sys::Storage,
}

impl LocalSessionStore {
    /// Construct a store over the window's `localStorage`.
    ///
    /// Fails when no window is available or storage access is blocked
    /// (e.g. sandboxed iframes).
    pub fn new() -> Result<Self> {
        Ok(Self {
            storage: local_storage()?,
        })
    }
}

#[async_trait(?Send)]
impl SessionStore for LocalSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| js_error("get_item", err))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| js_error("set_item", err))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| js_error("remove_item", err))
    }
}
