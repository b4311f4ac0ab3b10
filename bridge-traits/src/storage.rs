//! Session Storage Abstraction
//!
//! Provides a platform-agnostic trait for the string key-value store that
//! holds the persisted session (profile and token entries).

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Key-value session storage trait
///
/// Abstracts the storage backend that persists session entries between
/// application runs:
/// - Web: `localStorage`
/// - Desktop: JSON file in the app data directory, or in-memory for tests
///
/// The bridge stores plain strings; callers own any serialization. Keys are
/// short fixed identifiers (`profile`, `token`), never user-controlled.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::SessionStore;
///
/// async fn remember_token(store: &dyn SessionStore, token: &str) -> Result<()> {
///     store.set("token", token).await?;
///     Ok(())
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait SessionStore: PlatformSendSync {
    /// Retrieve a stored value
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous value under the same key
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a stored value
    ///
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a key exists without retrieving it
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
