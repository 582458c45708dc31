pub mod entries;
pub mod file;
pub mod memory;
pub mod traits;

pub use entries::{StorageEntryRepository, DEFAULT_STORAGE_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::{EntryRepository, StorageBackend};
