//! Group collection state: mutations, the filtered view, and write-through
//! persistence.

use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::models::{
    default_groups, CategoryCount, CategoryFilter, GroupForm, GroupRecord,
};
use crate::storage::{KeyValueStore, StorageError, GROUPS_KEY};

/// Owns the canonical group list and keeps the store in sync with it
pub struct GroupStore {
    groups: Vec<GroupRecord>,
    next_id: i64,
    store: Rc<dyn KeyValueStore>,
    write_failed: bool,
}

/// Read the persisted collection, falling back to the default seed when it is
/// missing, empty, unreadable or not a JSON array. Individual records that
/// can't be read are skipped; the rest are kept as saved.
pub fn load_groups(store: &dyn KeyValueStore) -> Vec<GroupRecord> {
    let raw = match store.get(GROUPS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("No saved groups, using defaults");
            return default_groups();
        }
        Err(e) => {
            warn!("Failed to read saved groups, using defaults: {}", e);
            return default_groups();
        }
    };

    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Saved groups are corrupt, using defaults: {}", StorageError::from(e));
            return default_groups();
        }
    };

    if entries.is_empty() {
        info!("Saved group list is empty, using defaults");
        return default_groups();
    }

    let total = entries.len();
    let groups: Vec<GroupRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(group) => Some(group),
            Err(e) => {
                warn!("Skipping unreadable saved group at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if groups.is_empty() {
        warn!("None of the {} saved groups could be read, using defaults", total);
        return default_groups();
    }

    info!("Loaded {} of {} saved groups", groups.len(), total);
    groups
}

impl GroupStore {
    /// Load the collection from `store`
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let groups = load_groups(store.as_ref());
        Self::with_groups(store, groups)
    }

    /// Build a store around an explicit collection without touching storage
    pub fn with_groups(store: Rc<dyn KeyValueStore>, groups: Vec<GroupRecord>) -> Self {
        let next_id = groups
            .iter()
            .map(|g| g.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        Self {
            groups,
            next_id,
            store,
            write_failed: false,
        }
    }

    /// All groups in insertion order
    pub fn groups(&self) -> &[GroupRecord] {
        &self.groups
    }

    pub fn get(&self, id: i64) -> Option<&GroupRecord> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether the last write reached durable storage
    pub fn is_persisting(&self) -> bool {
        self.store.is_durable() && !self.write_failed
    }

    /// Append a new unpinned group with a fresh id
    pub fn create(&mut self, fields: GroupForm) -> GroupRecord {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        let record = GroupRecord::new(id, fields);
        self.groups.push(record.clone());
        info!("Created group: {} ({})", record.name, record.id);

        self.persist();
        record
    }

    /// Replace every field except `id` and `pinned`. Returns `None` without
    /// writing when no group has that id.
    pub fn update(&mut self, id: i64, fields: GroupForm) -> Option<GroupRecord> {
        let record = self.groups.iter_mut().find(|g| g.id == id)?;
        record.apply(fields);
        let updated = record.clone();
        info!("Updated group: {} ({})", updated.name, updated.id);

        self.persist();
        Some(updated)
    }

    /// Remove the group with `id`; returns whether one was removed
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        if self.groups.len() == before {
            debug!("Delete of unknown group {} ignored", id);
            return false;
        }

        info!("Deleted group {}", id);
        self.persist();
        true
    }

    /// Flip the pinned flag; returns the new value
    pub fn toggle_pin(&mut self, id: i64) -> Option<bool> {
        let record = self.groups.iter_mut().find(|g| g.id == id)?;
        record.pinned = !record.pinned;
        let pinned = record.pinned;
        info!("Group {} pinned: {}", id, pinned);

        self.persist();
        Some(pinned)
    }

    /// Groups matching `filter` and `search`, pinned first. Order within the
    /// pinned and unpinned runs follows the collection.
    pub fn view(&self, filter: &CategoryFilter, search: &str) -> Vec<GroupRecord> {
        let needle = search.to_lowercase();

        let mut visible: Vec<GroupRecord> = self
            .groups
            .iter()
            .filter(|g| filter.matches(g) && g.matches_search(&needle))
            .cloned()
            .collect();

        // sort_by_key is stable
        visible.sort_by_key(|g| !g.pinned);
        visible
    }

    /// Number of groups under each sidebar filter, ignoring search
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        CategoryFilter::ALL_FILTERS
            .iter()
            .map(|filter| CategoryCount {
                id: filter.as_str().to_string(),
                label: filter.label().to_string(),
                count: self.groups.iter().filter(|g| filter.matches(g)).count(),
            })
            .collect()
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.groups)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(GROUPS_KEY, &json));

        match result {
            Ok(()) => {
                if self.write_failed {
                    info!("Group storage writable again");
                }
                self.write_failed = false;
            }
            Err(e) => {
                warn!("Failed to save groups, continuing in memory: {}", e);
                self.write_failed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Color};
    use crate::storage::{MemoryStore, SqliteStore};
    use std::collections::HashSet;
    use tempfile::tempdir;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk full".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".to_string()))
        }
    }

    fn record(id: i64, name: &str, pinned: bool) -> GroupRecord {
        let mut r = GroupRecord::new(id, GroupForm::new(name, Category::Classes));
        r.pinned = pinned;
        r
    }

    fn store_with(groups: Vec<GroupRecord>) -> (Rc<MemoryStore>, GroupStore) {
        let backing = Rc::new(MemoryStore::new());
        let store = GroupStore::with_groups(backing.clone(), groups);
        (backing, store)
    }

    fn saved(backing: &MemoryStore) -> Vec<GroupRecord> {
        let raw = backing.get(GROUPS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn names(groups: &[GroupRecord]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_load_absent_uses_defaults() {
        let store = GroupStore::load(Rc::new(MemoryStore::new()));
        assert!(!store.is_empty());
        assert_eq!(store.groups(), default_groups().as_slice());
    }

    #[test]
    fn test_load_empty_list_uses_defaults() {
        let backing = MemoryStore::new().with_entry(GROUPS_KEY, "[]");
        let store = GroupStore::load(Rc::new(backing));
        assert_eq!(store.len(), default_groups().len());
    }

    #[test]
    fn test_load_corrupt_uses_defaults() {
        for raw in ["", "not json", "null", "{\"id\":1}", "[{\"name\":\"no id\"}]"] {
            let backing = MemoryStore::new().with_entry(GROUPS_KEY, raw);
            let store = GroupStore::load(Rc::new(backing));
            assert_eq!(store.len(), default_groups().len(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_load_single_record_verbatim() {
        let json = r#"[{"id":42,"name":"Chess Club","category":"Social","link":"","notes":"","color":"rose","pinned":true}]"#;
        let backing = MemoryStore::new().with_entry(GROUPS_KEY, json);
        let store = GroupStore::load(Rc::new(backing));

        assert_eq!(store.len(), 1);
        let only = &store.groups()[0];
        assert_eq!(only.id, 42);
        assert_eq!(only.name, "Chess Club");
        assert_eq!(only.category, Category::Social);
        assert!(only.pinned);
    }

    #[test]
    fn test_load_keeps_records_with_null_fields() {
        let json = r#"[
            {"id":1700000000000,"name":"My Real Group","category":"Classes","link":"","notes":null,"color":"blue","pinned":false},
            {"id":1700000000001,"name":"Another","category":"Social","link":null,"notes":"","color":"rose","pinned":true}
        ]"#;
        let backing = Rc::new(MemoryStore::new().with_entry(GROUPS_KEY, json));
        let mut store = GroupStore::load(backing.clone());

        assert_eq!(names(store.groups()), vec!["My Real Group", "Another"]);
        assert_eq!(store.groups()[0].notes, "");

        store.create(GroupForm::new("New", Category::Projects));
        assert_eq!(
            names(&saved(&backing)),
            vec!["My Real Group", "Another", "New"]
        );
    }

    #[test]
    fn test_load_skips_only_unreadable_records() {
        let json = r#"[
            {"id":1,"name":"Kept","category":"Classes"},
            {"name":"No id","category":"Classes"},
            {"id":3,"category":"Projects"}
        ]"#;
        let backing = MemoryStore::new().with_entry(GROUPS_KEY, json);
        let store = GroupStore::load(Rc::new(backing));

        assert_eq!(store.len(), 2);
        assert_eq!(store.groups()[0].name, "Kept");
        assert_eq!(store.groups()[1].id, 3);
        assert_eq!(store.groups()[1].name, "");
    }

    #[test]
    fn test_load_unreadable_store_uses_defaults() {
        let store = GroupStore::load(Rc::new(BrokenStore));
        assert_eq!(store.len(), default_groups().len());
    }

    #[test]
    fn test_load_does_not_write() {
        let backing = Rc::new(MemoryStore::new());
        let _store = GroupStore::load(backing.clone());
        assert_eq!(backing.get(GROUPS_KEY).unwrap(), None);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let (_, mut store) = store_with(default_groups());
        let mut ids: HashSet<i64> = store.groups().iter().map(|g| g.id).collect();

        for i in 0..50 {
            let created = store.create(GroupForm::new(format!("Group {}", i), Category::Projects));
            assert!(!created.pinned);
            assert!(ids.insert(created.id), "duplicate id {}", created.id);
        }
        assert_eq!(store.len(), default_groups().len() + 50);
    }

    #[test]
    fn test_create_after_reload_keeps_ids_unique() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("studyhub.sqlite");

        let first_id = {
            let sqlite: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
            let mut store = GroupStore::with_groups(sqlite, Vec::new());
            store.create(GroupForm::new("First", Category::Classes)).id
        };

        let sqlite: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
        let mut store = GroupStore::load(sqlite);
        assert_eq!(store.len(), 1);
        let second = store.create(GroupForm::new("Second", Category::Classes));
        assert_ne!(second.id, first_id);
    }

    #[test]
    fn test_create_persists_and_appends() {
        let (backing, mut store) = store_with(vec![record(1, "A", false)]);
        let created = store.create(
            GroupForm::new("B", Category::Social)
                .with_link("https://t.me/b")
                .with_color(Color::Amber),
        );

        assert_eq!(names(store.groups()), vec!["A", "B"]);
        let persisted = saved(&backing);
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[1], created);
    }

    #[test]
    fn test_update_preserves_identity() {
        let (backing, mut store) = store_with(vec![record(1, "A", true), record(2, "B", false)]);
        let fields = GroupForm::new("A renamed", Category::Projects)
            .with_link("https://chat.example/x")
            .with_notes("new notes")
            .with_color(Color::Purple);

        let updated = store.update(1, fields.clone()).unwrap();
        assert_eq!(updated.id, 1);
        assert!(updated.pinned);
        assert_eq!(GroupForm::from_record(&updated), fields);
        assert_eq!(store.get(1), Some(&updated));
        assert_eq!(saved(&backing)[0], updated);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (backing, mut store) = store_with(vec![record(1, "A", false)]);
        assert!(store.update(99, GroupForm::new("X", Category::Classes)).is_none());
        assert_eq!(names(store.groups()), vec!["A"]);
        assert_eq!(backing.get(GROUPS_KEY).unwrap(), None);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (backing, mut store) = store_with(vec![
            record(1, "A", false),
            record(2, "B", false),
            record(3, "C", false),
        ]);

        assert!(store.delete(2));
        assert_eq!(store.len(), 2);
        assert!(store.get(2).is_none());
        assert_eq!(names(&saved(&backing)), vec!["A", "C"]);

        assert!(!store.delete(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_toggle_pin_twice_restores() {
        let (_, mut store) = store_with(vec![record(1, "A", false)]);
        assert_eq!(store.toggle_pin(1), Some(true));
        assert_eq!(store.toggle_pin(1), Some(false));
        assert!(!store.get(1).unwrap().pinned);
        assert_eq!(store.toggle_pin(5), None);
    }

    #[test]
    fn test_view_pinned_first_stable() {
        let (_, store) = store_with(vec![
            record(1, "A", false),
            record(2, "B", true),
            record(3, "C", false),
            record(4, "D", true),
        ]);

        let view = store.view(&CategoryFilter::All, "");
        assert_eq!(names(&view), vec!["B", "D", "A", "C"]);
        // underlying order untouched
        assert_eq!(names(store.groups()), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_view_filter_conjunction() {
        let (_, store) = store_with(vec![
            GroupRecord::new(1, GroupForm::new("Yoga Class", Category::Classes)),
            GroupRecord::new(2, GroupForm::new("Yoga Project", Category::Projects)),
        ]);

        let classes = store.view(&CategoryFilter::Only(Category::Classes), "yoga");
        assert_eq!(names(&classes), vec!["Yoga Class"]);
        assert!(store.view(&CategoryFilter::All, "zzz").is_empty());
        assert_eq!(store.view(&CategoryFilter::All, "YOGA").len(), 2);
    }

    #[test]
    fn test_view_searches_notes() {
        let (_, store) = store_with(default_groups());
        let view = store.view(&CategoryFilter::All, "calculator");
        assert_eq!(names(&view), vec!["Statistics"]);
    }

    #[test]
    fn test_view_does_not_persist() {
        let (backing, store) = store_with(vec![record(1, "A", true)]);
        let _ = store.view(&CategoryFilter::All, "a");
        assert_eq!(backing.get(GROUPS_KEY).unwrap(), None);
    }

    #[test]
    fn test_category_counts() {
        let (_, store) = store_with(default_groups());
        let counts = store.category_counts();
        let by_id: Vec<(&str, usize)> = counts.iter().map(|c| (c.id.as_str(), c.count)).collect();
        assert_eq!(
            by_id,
            vec![("all", 17), ("Classes", 8), ("Projects", 8), ("Social", 1)]
        );
        assert_eq!(counts[2].label, "Project Teams");
    }

    #[test]
    fn test_write_failure_keeps_state_in_memory() {
        let mut store = GroupStore::with_groups(Rc::new(BrokenStore), Vec::new());
        let created = store.create(GroupForm::new("Offline", Category::Classes));

        assert!(!store.is_persisting());
        assert_eq!(store.get(created.id), Some(&created));
        assert_eq!(store.toggle_pin(created.id), Some(true));
        assert!(store.delete(created.id));
        assert!(store.is_empty());
    }
}
