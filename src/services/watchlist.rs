use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    db::{Storage, StorageKey},
    error::AppResult,
    models::RecommendationItem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Added,
    AlreadyPresent,
}

/// Saved recommendation items, unique by item id
pub struct Watchlist {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl Watchlist {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<RecommendationItem>> {
        self.storage.read_or_default(StorageKey::Watchlist).await
    }

    /// Saves an item unless its id is already listed. Also returns the list length after the save
    pub async fn save(&self, item: RecommendationItem) -> AppResult<(SaveOutcome, usize)> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.list().await?;

        if items.iter().any(|saved| saved.id == item.id) {
            tracing::debug!(item_id = item.id, title = %item.title, "Already in watchlist");
            return Ok((SaveOutcome::AlreadyPresent, items.len()));
        }

        tracing::info!(item_id = item.id, title = %item.title, "Saved to watchlist");
        items.push(item);
        self.storage.write(StorageKey::Watchlist, &items).await?;
        Ok((SaveOutcome::Added, items.len()))
    }
}
