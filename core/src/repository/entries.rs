use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::entry::Entry;
use crate::repository::traits::{EntryRepository, StorageBackend};

/// Storage key the entry list lives under.
pub const DEFAULT_STORAGE_KEY: &str = "oaVolunteerHoursEntries";

/// Persists the entry list as a JSON array under one storage key.
#[derive(Clone, Debug)]
pub struct StorageEntryRepository<S: StorageBackend> {
    storage: S,
    key: String,
}

impl<S: StorageBackend> StorageEntryRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: StorageBackend> EntryRepository for StorageEntryRepository<S> {
    fn load(&self) -> Vec<Entry> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored entries; starting empty");
                return Vec::new();
            }
        };

        let candidates = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!(key = %self.key, kind = value_kind(&other), "stored entries are not a list; ignoring them");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored entries are not valid JSON; ignoring them");
                return Vec::new();
            }
        };

        let total = candidates.len();
        let entries: Vec<Entry> = candidates
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Entry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "dropping malformed stored entry");
                    None
                }
            })
            .collect();

        debug!(key = %self.key, loaded = entries.len(), dropped = total - entries.len(), "loaded entries");
        entries
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.storage.set_item(&self.key, &json)?;
        debug!(key = %self.key, count = entries.len(), "saved entries");
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
