//! Session Storage Implementations
//!
//! Two [`SessionStore`] backends for native hosts: an in-memory store for
//! tests and short-lived shells, and a JSON-file-backed store for hosts
//! that persist the session between runs.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::SessionStore,
};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory session store.
///
/// Entries live as long as the store; nothing is persisted. Primarily a
/// test double, also useful for hosts that deliberately forget the session
/// on exit.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// JSON-file-backed session store.
///
/// All entries live in a single JSON object on disk; every mutation
/// rewrites the file. The session payload is two short strings, so the
/// rewrite cost is negligible.
pub struct JsonFileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileSessionStore {
    /// Open a store at the given path, creating parent directories as
    /// needed. A missing file yields an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                BridgeError::OperationFailed(format!("Corrupt session file: {}", e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(BridgeError::Io(e)),
        };

        debug!(path = ?path, "Opened session store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| BridgeError::OperationFailed(format!("Serialize session: {}", e)))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(BridgeError::Io)
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        self.flush(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();

        assert_eq!(store.get("profile").await.unwrap(), None);
        store.set("profile", "{}").await.unwrap();
        assert_eq!(store.get("profile").await.unwrap(), Some("{}".to_string()));
        assert!(store.contains("profile").await.unwrap());

        store.remove("profile").await.unwrap();
        assert_eq!(store.get("profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_remove_missing_key_is_ok() {
        let store = MemorySessionStore::new();
        store.remove("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_persists_across_opens() {
        let path = std::env::temp_dir().join("auth-bridge-test-session.json");
        let _ = tokio::fs::remove_file(&path).await;

        {
            let store = JsonFileSessionStore::open(&path).await.unwrap();
            store.set("token", "tok-1").await.unwrap();
        }

        let store = JsonFileSessionStore::open(&path).await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("tok-1".to_string()));

        store.remove("token").await.unwrap();
        let store = JsonFileSessionStore::open(&path).await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let path = std::env::temp_dir().join("auth-bridge-test-nonexistent.json");
        let _ = tokio::fs::remove_file(&path).await;

        let store = JsonFileSessionStore::open(&path).await.unwrap();
        assert_eq!(store.get("profile").await.unwrap(), None);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
