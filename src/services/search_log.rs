use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    db::{Storage, StorageKey},
    error::AppResult,
    models::{SearchLog, SearchLogEntry},
};

/// Records request terms for the admin dashboard
#[derive(Clone)]
pub struct SearchLogger {
    storage: Storage,
    write_lock: Arc<Mutex<()>>,
}

impl SearchLogger {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Appends a term. Blank terms are ignored
    pub async fn record(&self, term: &str) -> AppResult<()> {
        if term.trim().is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut log = self.history().await?;
        log.push(SearchLogEntry::now(term));
        self.storage.write(StorageKey::SearchHistory, &log).await?;

        tracing::debug!(term = %term, entries = log.len(), "Search term recorded");
        Ok(())
    }

    /// Like [`record`](Self::record), but failures only reach the log
    pub async fn record_quietly(&self, term: &str) {
        if let Err(e) = self.record(term).await {
            tracing::error!(error = %e, term = %term, "Failed to log search term");
        }
    }

    pub async fn history(&self) -> AppResult<SearchLog> {
        self.storage.read_or_default(StorageKey::SearchHistory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SEARCH_LOG_CAPACITY;

    #[tokio::test]
    async fn test_record_appends() {
        let logger = SearchLogger::new(Storage::in_memory());
        logger.record("chill Anime").await.unwrap();
        logger.record("happy Movie").await.unwrap();

        let history = logger.history().await.unwrap();
        let terms: Vec<&str> = history.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["chill Anime", "happy Movie"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_overlapping_records_are_all_kept() {
        let logger = SearchLogger::new(Storage::in_memory());

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let logger = logger.clone();
                tokio::spawn(async move { logger.record(&format!("happy Movie {}", i)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(logger.history().await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_blank_term_ignored() {
        let logger = SearchLogger::new(Storage::in_memory());
        logger.record("   ").await.unwrap();
        assert!(logger.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_log_never_exceeds_capacity() {
        let logger = SearchLogger::new(Storage::in_memory());
        for i in 0..=SEARCH_LOG_CAPACITY {
            logger.record(&format!("search {}", i)).await.unwrap();
        }

        let history = logger.history().await.unwrap();
        assert_eq!(history.len(), SEARCH_LOG_CAPACITY);
        assert_eq!(history.iter().next().unwrap().term, "search 1");
    }

    #[tokio::test]
    async fn test_corrupt_history_starts_over() {
        let storage = Storage::in_memory();
        storage
            .write_raw(StorageKey::SearchHistory, "[{\"term\": 5}]")
            .await
            .unwrap();

        let logger = SearchLogger::new(storage);
        logger.record_quietly("sad Book").await;
        assert_eq!(logger.history().await.unwrap().len(), 1);
    }
}
