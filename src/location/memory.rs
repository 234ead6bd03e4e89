//! In-memory navigation history.
use std::sync::{Arc, Mutex, MutexGuard};

use crate::location::{FlatKv, HistoryMode, LocationReader, LocationWriter, parse_query_string};

#[derive(Debug)]
struct History {
    entries: Vec<FlatKv>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec![Vec::new()],
            cursor: 0,
        }
    }
}

/// Browser-like history of location queries. Clones share the same history,
/// so a host can keep one handle for navigation while the controller owns
/// another.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocation {
    history: Arc<Mutex<History>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a single entry parsed from `raw`.
    pub fn from_query_string(raw: &str) -> Self {
        let location = Self::new();
        location.lock().entries[0] = parse_query_string(raw);
        location
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Host navigation to a new entry; forward entries are discarded.
    pub fn navigate(&self, query: FlatKv) {
        let mut history = self.lock();
        let cursor = history.cursor;
        history.entries.truncate(cursor + 1);
        history.entries.push(query);
        history.cursor += 1;
    }

    /// Moves one entry back. Returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        let mut history = self.lock();
        if history.cursor == 0 {
            return false;
        }
        history.cursor -= 1;
        true
    }

    /// Moves one entry forward. Returns `false` at the newest entry.
    pub fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.cursor + 1 >= history.entries.len() {
            return false;
        }
        history.cursor += 1;
        true
    }

    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }
}

impl LocationReader for MemoryLocation {
    fn current_query(&self) -> FlatKv {
        let history = self.lock();
        history.entries[history.cursor].clone()
    }
}

impl LocationWriter for MemoryLocation {
    fn set_current_query(&self, query: &FlatKv, mode: HistoryMode) {
        match mode {
            HistoryMode::Replace => {
                let mut history = self.lock();
                let cursor = history.cursor;
                history.entries[cursor] = query.clone();
            }
            HistoryMode::Push => self.navigate(query.clone()),
        }
    }
}
