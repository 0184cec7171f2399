use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::sync::Arc;

use super::{KeyValueStore, MemoryStore};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Users,
    Session,
    Watchlist,
    SearchHistory,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Users => write!(f, "moodwatch_users"),
            StorageKey::Session => write!(f, "moodwatch_user"),
            StorageKey::Watchlist => write!(f, "watchlist"),
            StorageKey::SearchHistory => write!(f, "moodwatch_search_history"),
        }
    }
}

/// JSON view over a [`KeyValueStore`]
///
/// A stored value that fails to parse is logged and read back as absent.
/// Corruption never propagates to callers.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), "")
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    fn key(&self, key: StorageKey) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Reads and decodes a value, `None` when missing or corrupt
    pub async fn read<T: DeserializeOwned>(&self, key: StorageKey) -> AppResult<Option<T>> {
        let Some(raw) = self.store.get(&self.key(key)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(
                    key = %key,
                    error = %e,
                    backend = self.store.name(),
                    "Failed to parse stored value, treating as empty"
                );
                Ok(None)
            }
        }
    }

    pub async fn read_or_default<T: DeserializeOwned + Default>(
        &self,
        key: StorageKey,
    ) -> AppResult<T> {
        Ok(self.read(key).await?.unwrap_or_default())
    }

    pub async fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Storage serialization error: {}", e)))?;
        self.store.set(&self.key(key), json).await
    }

    pub async fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.store.remove(&self.key(key)).await
    }

    /// Writes a raw, unvalidated string. Lets tests plant corrupt values
    pub async fn write_raw(&self, key: StorageKey, raw: &str) -> AppResult<()> {
        self.store.set(&self.key(key), raw.to_string()).await
    }
}
