//! Selection Store
//!
//! Capacity-bounded ordered set of selected seat ids, persisted across
//! sessions as JSON under the `seat-selection` storage key. Mutations write
//! through synchronously so a render pass never observes unpersisted state;
//! write failures degrade to warnings, never errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hard upper bound on simultaneous seat selection
pub const MAX_SELECTION: usize = 8;

/// Storage key; doubles as the snapshot file stem
const STORAGE_KEY: &str = "seat-selection";

/// On-disk snapshot of the selection
#[derive(Debug, Serialize, Deserialize)]
struct SelectionSnapshot {
    selected: Vec<String>,
    saved_at: DateTime<Utc>,
}

/// Ordered, capacity-bounded seat selection
#[derive(Debug, Default)]
pub struct SelectionStore {
    /// Selected seat ids, oldest first
    selected: Vec<String>,

    /// Snapshot path; `None` keeps the store in memory (tests)
    path: Option<PathBuf>,
}

impl SelectionStore {
    /// Open the store backed by the default config location, rehydrating any
    /// previous session's selection. A missing or unreadable snapshot starts
    /// empty.
    pub fn open() -> SelectionStore {
        let path = default_snapshot_path();
        match path {
            Some(path) => Self::open_at(path),
            None => {
                log::warn!("No config directory available; selection will not persist");
                SelectionStore::default()
            }
        }
    }

    /// Open the store backed by an explicit snapshot path
    pub fn open_at(path: impl Into<PathBuf>) -> SelectionStore {
        let path = path.into();
        let selected = load_snapshot(&path).unwrap_or_default();
        SelectionStore {
            selected,
            path: Some(path),
        }
    }

    /// Unpersisted store for tests
    pub fn in_memory() -> SelectionStore {
        SelectionStore::default()
    }

    /// Selected seat ids in insertion order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// How many more seats can be selected
    pub fn remaining(&self) -> usize {
        MAX_SELECTION.saturating_sub(self.selected.len())
    }

    /// Toggle one seat. Removal always succeeds; adding is a silent no-op
    /// when the selection is full.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else if self.selected.len() < MAX_SELECTION {
            self.selected.push(id.to_string());
        } else {
            return; // full, nothing changed, nothing to flush
        }
        self.flush();
    }

    /// Append up to `remaining()` not-yet-selected ids, in the given order.
    /// Never exceeds capacity; a full selection is a silent no-op.
    pub fn add_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let remaining = self.remaining();
        if remaining == 0 {
            return;
        }
        let mut added = 0;
        for id in ids {
            if added == remaining {
                break;
            }
            let id = id.into();
            if !self.contains(&id) {
                self.selected.push(id);
                added += 1;
            }
        }
        if added > 0 {
            self.flush();
        }
    }

    /// Empty the selection unconditionally
    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.flush();
    }

    /// Write the snapshot to disk. Synchronous by design: the event handler
    /// completes the write before the next render reads the store.
    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let snapshot = SelectionSnapshot {
            selected: self.selected.clone(),
            saved_at: Utc::now(),
        };
        if let Err(e) = write_snapshot(path, &snapshot) {
            log::warn!("Failed to persist selection to {:?}: {}", path, e);
        }
    }
}

/// Default snapshot location: `<config_dir>/seatmap-studio/seat-selection.json`
fn default_snapshot_path() -> Option<PathBuf> {
    Some(
        dirs::config_dir()?
            .join("seatmap-studio")
            .join(format!("{}.json", STORAGE_KEY)),
    )
}

fn load_snapshot(path: &Path) -> Option<Vec<String>> {
    if !path.exists() {
        return None;
    }
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SelectionSnapshot>(&content) {
        Ok(snapshot) => {
            let mut selected = snapshot.selected;
            selected.truncate(MAX_SELECTION);
            log::info!("Rehydrated {} selected seats from {:?}", selected.len(), path);
            Some(selected)
        }
        Err(e) => {
            log::warn!("Ignoring corrupt selection snapshot {:?}: {}", path, e);
            None
        }
    }
}

fn write_snapshot(path: &Path, snapshot: &SelectionSnapshot) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_store() -> SelectionStore {
        let mut store = SelectionStore::in_memory();
        store.add_many((1..=8).map(|i| format!("s{}", i)));
        store
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut store = SelectionStore::in_memory();
        store.toggle("a");
        assert_eq!(store.selected(), ["a"]);
        store.toggle("a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut store = SelectionStore::in_memory();
        store.add_many(["a", "b", "c"]);
        let before = store.selected().to_vec();
        store.toggle("d");
        store.toggle("d");
        assert_eq!(store.selected(), before.as_slice());
    }

    #[test]
    fn test_toggle_ignored_when_full() {
        let mut store = full_store();
        store.toggle("s9");
        assert_eq!(store.len(), 8);
        assert!(!store.contains("s9"));
        // Removal is never capacity-limited.
        store.toggle("s3");
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_add_many_respects_remaining_capacity() {
        let mut store = SelectionStore::in_memory();
        store.add_many(["a", "b", "c", "d", "e", "f"]);
        assert_eq!(store.len(), 6);
        // 2 remaining; later entries are dropped in input order.
        store.add_many(["g", "h", "i", "j"]);
        assert_eq!(store.selected(), ["a", "b", "c", "d", "e", "f", "g", "h"]);
        // Full: no-op.
        store.add_many(["k"]);
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_add_many_skips_already_selected() {
        let mut store = SelectionStore::in_memory();
        store.add_many(["a", "b"]);
        store.add_many(["b", "c", "a", "d"]);
        assert_eq!(store.selected(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_no_duplicates_under_mixed_operations() {
        let mut store = SelectionStore::in_memory();
        store.toggle("a");
        store.add_many(["a", "b", "a"]);
        assert_eq!(store.selected(), ["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut store = full_store();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.remaining(), MAX_SELECTION);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seat-selection.json");

        let mut store = SelectionStore::open_at(&path);
        assert!(store.is_empty());
        store.add_many(["a", "b", "c"]);
        store.toggle("b");

        let reopened = SelectionStore::open_at(&path);
        assert_eq!(reopened.selected(), ["a", "c"]);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seat-selection.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SelectionStore::open_at(&path);
        assert!(store.is_empty());
    }
}
