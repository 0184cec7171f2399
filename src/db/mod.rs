pub mod memory;
pub mod redis_store;
pub mod storage;

pub use memory::MemoryStore;
pub use redis_store::{create_redis_client, RedisStore};
pub use storage::{Storage, StorageKey};

use crate::error::AppResult;

/// String key-value persistence, one value per key
///
/// Backends only move opaque strings. JSON encoding and the treatment of
/// corrupt values live in [`Storage`].
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
