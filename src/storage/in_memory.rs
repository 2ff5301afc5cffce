//! In-memory implementation of EntryStore for testing and development

use crate::core::entry::{EntryDraft, JournalEntry};
use crate::core::store::EntryStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Inner {
    entries: BTreeMap<i64, JournalEntry>,
    next_id: i64,
}

/// In-memory entry store
///
/// Uses RwLock for thread-safe access. Identifiers come from a monotone
/// counter that only ever moves forward, so a freshly inserted entry's id is
/// greater than every id the store has handed out before.
#[derive(Clone)]
pub struct InMemoryEntryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEntryStore {
    /// Create an empty store; the first insert gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a store pre-populated with existing entries.
    ///
    /// The id counter continues past the largest seeded identifier.
    pub fn seeded(entries: Vec<JournalEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: entries.into_iter().map(|e| (e.id, e)).collect(),
                next_id,
            })),
        }
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn insert(&self, draft: EntryDraft, date: String) -> Result<JournalEntry> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = inner.next_id;
        inner.next_id += 1;

        let entry = JournalEntry {
            id,
            title: draft.title,
            date,
            body: draft.body,
        };
        inner.entries.insert(id, entry.clone());

        tracing::debug!(id, "inserted journal entry");
        Ok(entry)
    }

    async fn get(&self, id: i64) -> Result<Option<JournalEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.entries.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<JournalEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.entries.values().cloned().collect())
    }

    async fn update(
        &self,
        id: i64,
        draft: EntryDraft,
        date: String,
    ) -> Result<Option<JournalEntry>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match inner.entries.get_mut(&id) {
            Some(entry) => {
                entry.title = draft.title;
                entry.date = date;
                entry.body = draft.body;
                tracing::debug!(id, "updated journal entry");
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, body: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryEntryStore::new();

        let first = store
            .insert(draft("First", "body"), "April 05, 2024".to_string())
            .await
            .unwrap();
        let second = store
            .insert(draft("Second", "body"), "April 06, 2024".to_string())
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_returns_inserted_entry() {
        let store = InMemoryEntryStore::new();
        let inserted = store
            .insert(draft("Hello", "world"), "April 05, 2024".to_string())
            .await
            .unwrap();

        let fetched = store.get(inserted.id).await.unwrap();
        assert_eq!(fetched, Some(inserted));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryEntryStore::new();
        assert_eq!(store.get(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_overwrites_and_preserves_id() {
        let store = InMemoryEntryStore::new();
        let inserted = store
            .insert(draft("Old title", "old body"), "April 05, 2024".to_string())
            .await
            .unwrap();

        let updated = store
            .update(
                inserted.id,
                draft("New title", "new body"),
                "April 06, 2024".to_string(),
            )
            .await
            .unwrap()
            .expect("entry exists");

        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.body, "new body");
        assert_eq!(updated.date, "April 06, 2024");
        assert_eq!(store.get(inserted.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_mutates_nothing() {
        let store = InMemoryEntryStore::new();
        store
            .insert(draft("Keep me", "intact"), "April 05, 2024".to_string())
            .await
            .unwrap();

        let result = store
            .update(42, draft("ghost", "ghost"), "April 06, 2024".to_string())
            .await
            .unwrap();

        assert_eq!(result, None);
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Keep me");
    }

    #[tokio::test]
    async fn test_seeded_continues_past_largest_id() {
        let store = InMemoryEntryStore::seeded(vec![
            JournalEntry {
                id: 1,
                title: "one".to_string(),
                date: "April 05, 2024".to_string(),
                body: "b".to_string(),
            },
            JournalEntry {
                id: 7,
                title: "seven".to_string(),
                date: "April 05, 2024".to_string(),
                body: "b".to_string(),
            },
        ]);

        let inserted = store
            .insert(draft("eight", "b"), "April 06, 2024".to_string())
            .await
            .unwrap();
        assert_eq!(inserted.id, 8);
        assert_eq!(store.list().await.unwrap().len(), 3);
    }
}
