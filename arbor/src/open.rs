//! Open/closed state per node id.

use std::collections::HashMap;

/// Explicit open/closed entries with a tree-wide default.
///
/// A missing entry means "use the default". Every effective change bumps a
/// version counter that the row index uses as its memo key.
#[derive(Debug, Clone, Default)]
pub struct OpenState {
    entries: HashMap<String, bool>,
    open_by_default: bool,
    version: u64,
}

impl OpenState {
    /// Create an open state seeded with explicit entries.
    pub fn with_entries(open_by_default: bool, entries: HashMap<String, bool>) -> Self {
        Self {
            entries,
            open_by_default,
            version: 0,
        }
    }

    /// Check if a node is open.
    pub fn is_open(&self, id: &str) -> bool {
        self.entries
            .get(id)
            .copied()
            .unwrap_or(self.open_by_default)
    }

    /// Open a node. Returns true if the effective state changed.
    pub fn open(&mut self, id: &str) -> bool {
        self.set(id, true)
    }

    /// Close a node. Returns true if the effective state changed.
    pub fn close(&mut self, id: &str) -> bool {
        self.set(id, false)
    }

    fn set(&mut self, id: &str, value: bool) -> bool {
        let changed = self.is_open(id) != value;
        self.entries.insert(id.to_string(), value);
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Monotonic change counter.
    pub fn version(&self) -> u64 {
        self.version
    }
}
