use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::repository::EntryRepository;
use crate::service::tracker::VolunteerHoursTracker;

/// A set of named containers a tracker can be mounted into.
///
/// Containers are independent; trackers only interact through whatever
/// storage their repositories share.
pub struct Document<R: EntryRepository> {
    containers: BTreeMap<String, Option<VolunteerHoursTracker<R>>>,
}

impl<R: EntryRepository> Default for Document<R> {
    fn default() -> Self {
        Self {
            containers: BTreeMap::new(),
        }
    }
}

impl<R: EntryRepository> Document<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Self::new();
        for id in ids {
            document.add_container(id);
        }
        document
    }

    /// Adds an empty container. An existing container with the same id is
    /// left as it is.
    pub fn add_container(&mut self, id: impl Into<String>) {
        self.containers.entry(id.into()).or_insert(None);
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Builds a tracker into the container `container_id`.
    ///
    /// Returns `None` and does nothing when there is no such container.
    /// Initializing a container that already holds a tracker replaces it.
    pub fn init_volunteer_hours_tracker(
        &mut self,
        container_id: &str,
        repo: R,
    ) -> Option<&mut VolunteerHoursTracker<R>> {
        let slot = match self.containers.get_mut(container_id) {
            Some(slot) => slot,
            None => {
                debug!(container_id, "container not found; tracker not initialized");
                return None;
            }
        };

        if slot.is_some() {
            warn!(container_id, "container already holds a tracker; replacing it");
        }
        Some(slot.insert(VolunteerHoursTracker::new(repo)))
    }

    pub fn tracker(&self, container_id: &str) -> Option<&VolunteerHoursTracker<R>> {
        self.containers.get(container_id)?.as_ref()
    }

    pub fn tracker_mut(&mut self, container_id: &str) -> Option<&mut VolunteerHoursTracker<R>> {
        self.containers.get_mut(container_id)?.as_mut()
    }

    /// Markup currently inside the container; empty until a tracker is
    /// mounted, `None` for an unknown container.
    pub fn container_markup(&self, container_id: &str) -> Option<String> {
        let slot = self.containers.get(container_id)?;
        Some(slot.as_ref().map(|tracker| tracker.markup()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FormInput;
    use crate::repository::{MemoryStorage, StorageBackend, StorageEntryRepository, DEFAULT_STORAGE_KEY};

    type Repo = StorageEntryRepository<MemoryStorage>;

    #[test]
    fn test_unknown_container_is_noop() {
        let mut document: Document<Repo> = Document::with_containers(["tracker"]);
        let storage = MemoryStorage::new();

        assert!(document
            .init_volunteer_hours_tracker("missing", StorageEntryRepository::new(storage.clone()))
            .is_none());
        assert!(!document.has_container("missing"));
        assert!(document.tracker("tracker").is_none());
        assert_eq!(document.container_markup("tracker").as_deref(), Some(""));
        assert!(document.container_markup("missing").is_none());
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_init_renders_into_container() {
        let mut document: Document<Repo> = Document::with_containers(["tracker"]);
        document
            .init_volunteer_hours_tracker("tracker", StorageEntryRepository::new(MemoryStorage::new()))
            .unwrap();

        let markup = document.container_markup("tracker").unwrap();
        assert!(markup.contains(r#"<form id="hours-form">"#));
        assert!(markup.contains("No entries yet."));
    }

    #[test]
    fn test_double_init_replaces_tracker() {
        let storage = MemoryStorage::new();
        let mut document: Document<Repo> = Document::with_containers(["tracker"]);

        let first = document
            .init_volunteer_hours_tracker("tracker", StorageEntryRepository::new(storage.clone()))
            .unwrap();
        first.submit_input(FormInput::new("Cleanup", "2024-03-05", "2", "1"));
        first.form_mut().activity = "half typed".to_string();

        let second = document
            .init_volunteer_hours_tracker("tracker", StorageEntryRepository::new(storage))
            .unwrap();

        assert!(second.form().is_blank());
        assert_eq!(second.entries().len(), 1);
        assert!(second.message().is_none());
    }

    #[test]
    fn test_containers_sharing_storage_last_write_wins() {
        let storage = MemoryStorage::new();
        let mut document: Document<Repo> = Document::with_containers(["left", "right"]);
        document.init_volunteer_hours_tracker("left", StorageEntryRepository::new(storage.clone()));
        document.init_volunteer_hours_tracker("right", StorageEntryRepository::new(storage.clone()));

        document
            .tracker_mut("left")
            .unwrap()
            .submit_input(FormInput::new("Left", "2024-03-05", "1", "1"));
        document
            .tracker_mut("right")
            .unwrap()
            .submit_input(FormInput::new("Right", "2024-03-06", "1", "1"));

        // In-memory lists are isolated.
        assert_eq!(document.tracker("left").unwrap().entries().len(), 1);
        assert_eq!(document.tracker("right").unwrap().entries().len(), 1);

        // The later save replaced the earlier one.
        let stored = StorageEntryRepository::new(storage).load();
        let names: Vec<&str> = stored.iter().map(|e| e.activity()).collect();
        assert_eq!(names, vec!["Right"]);
    }
}
