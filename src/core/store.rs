//! Storage trait for journal entries

use crate::core::entry::{EntryDraft, JournalEntry};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for the journal entry collection
///
/// Implementations own the entries; handlers receive owned clones scoped to
/// a single request. The trait is agnostic to the underlying storage
/// mechanism — the only invariant implementations must uphold is that
/// identifiers are assigned on insert, strictly increasing, and immutable.
///
/// Entries are never deleted: no operation here removes one.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert a new entry, assigning the next identifier.
    ///
    /// `date` is the pre-formatted display date stamped by the caller.
    async fn insert(&self, draft: EntryDraft, date: String) -> Result<JournalEntry>;

    /// Get an entry by identifier.
    async fn get(&self, id: i64) -> Result<Option<JournalEntry>>;

    /// List all entries, in no particular order.
    async fn list(&self) -> Result<Vec<JournalEntry>>;

    /// Overwrite title, date and body of an existing entry.
    ///
    /// Returns the updated entry, or `None` when the identifier is unknown —
    /// in which case nothing was mutated.
    async fn update(
        &self,
        id: i64,
        draft: EntryDraft,
        date: String,
    ) -> Result<Option<JournalEntry>>;
}
