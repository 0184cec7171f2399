use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of search entries kept
pub const SEARCH_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchLogEntry {
    pub term: String,
    pub timestamp: DateTime<Utc>,
}

impl SearchLogEntry {
    pub fn now(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only search history holding the most recent entries
///
/// Serializes as a plain JSON array, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchLog {
    entries: VecDeque<SearchLogEntry>,
}

impl SearchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, evicting the oldest ones past capacity
    pub fn push(&mut self, entry: SearchLogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > SEARCH_LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchLogEntry> {
        self.entries.iter()
    }
}
