pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod model;
pub mod render;
pub mod repository;
pub mod service;
pub mod widget;

pub use config::TrackerConfig;
pub use error::ValidationError;
pub use input::FormInput;
pub use model::entry::Entry;
pub use model::summary::Summary;
pub use repository::{
    EntryRepository, FileStorage, MemoryStorage, StorageBackend, StorageEntryRepository, DEFAULT_STORAGE_KEY,
};
pub use service::dto::{Message, MessageKind, SummaryLine, TableRow, TrackerView};
pub use service::tracker::{ClearOutcome, SubmitOutcome, VolunteerHoursTracker};
pub use widget::Document;
