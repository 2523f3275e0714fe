use crate::config::KEY_DIARY_TEXT;
use crate::diary_entry::DiaryEntry;
use crate::preferences::{KeyValueStore, StorageError};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiaryError {
    #[error("Empty or blank input cannot be saved")]
    BlankEntry,
}

/// Newest-first list of entries, written through to the store on every change.
pub struct DiaryState {
    entries: Vec<DiaryEntry>,
    store: Box<dyn KeyValueStore>,
}

impl DiaryState {
    /// Reads the stored diary. Missing data and unreadable data both start
    /// an empty diary; the latter is only logged.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = match load_entries(store.as_ref()) {
            Ok(entries) => {
                info!(count = entries.len(), "diary loaded");
                entries
            }
            Err(e) => {
                warn!(error = %e, "stored diary unreadable, starting empty");
                Vec::new()
            }
        };
        DiaryState { entries, store }
    }

    pub fn append(&mut self, text: &str) -> Result<&DiaryEntry, DiaryError> {
        if text.trim().is_empty() {
            return Err(DiaryError::BlankEntry);
        }
        self.add_entry(DiaryEntry::new(text.to_string()));
        Ok(&self.entries[0])
    }

    fn add_entry(&mut self, entry: DiaryEntry) {
        self.entries.insert(0, entry);
        self.persist_best_effort();
    }

    pub fn remove_most_recent(&mut self) -> Option<DiaryEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let removed = self.entries.remove(0);
        self.persist_best_effort();
        Some(removed)
    }

    pub fn get_entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(DiaryEntry::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn persist(&mut self) -> Result<(), StorageError> {
        save_entries(self.store.as_mut(), &self.entries)
    }

    fn persist_best_effort(&mut self) {
        if let Err(e) = self.persist() {
            error!(error = %e, count = self.entries.len(), "failed to persist diary");
        }
    }
}

pub fn save_entries(
    store: &mut dyn KeyValueStore,
    entries: &[DiaryEntry],
) -> Result<(), StorageError> {
    let serialized = serde_json::to_string(entries).map_err(|source| StorageError::Serialize {
        key: KEY_DIARY_TEXT.to_string(),
        source,
    })?;
    store.put_string(KEY_DIARY_TEXT, &serialized)
}

/// An absent key is an empty diary; a stored `null` is too.
pub fn load_entries(store: &dyn KeyValueStore) -> Result<Vec<DiaryEntry>, StorageError> {
    let Some(serialized) = store.get_string(KEY_DIARY_TEXT)? else {
        return Ok(Vec::new());
    };
    let entries: Option<Vec<DiaryEntry>> =
        serde_json::from_str(&serialized).map_err(|source| StorageError::Corrupt {
            key: KEY_DIARY_TEXT.to_string(),
            source,
        })?;
    Ok(entries.unwrap_or_default())
}
