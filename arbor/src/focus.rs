//! Focus state.
//!
//! Row focus is independent of selection: the focused row is where keyboard
//! navigation happens, the selection is what actions apply to. Whether the
//! tree widget as a whole owns keyboard focus is tracked separately.

/// Focus state for a tree.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    /// Currently focused row id
    current: Option<String>,
    /// Whether the tree widget owns keyboard focus
    within_tree: bool,
}

impl FocusState {
    /// Create a new focus state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the focused row id
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Check if a row is focused (regardless of widget focus)
    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id)
    }

    /// Set the focused row. Returns true if it changed.
    pub fn set(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.current.as_deref() == Some(id.as_str()) {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Clear row focus
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Whether the tree widget owns keyboard focus
    pub fn within_tree(&self) -> bool {
        self.within_tree
    }

    /// Record whether the tree widget owns keyboard focus
    pub fn set_within_tree(&mut self, within: bool) {
        self.within_tree = within;
    }
}
