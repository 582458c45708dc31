use anyhow::Result;

use crate::model::entry::Entry;

/// A string key-value store, the durable slot entries live in.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads and saves the whole entry list.
pub trait EntryRepository {
    /// Never fails: unreadable or malformed data loads as nothing.
    fn load(&self) -> Vec<Entry>;
    /// Overwrites the stored list with `entries`.
    fn save(&self, entries: &[Entry]) -> Result<()>;
}
