//! Inline rename state.

/// At most one node is in rename mode at a time.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    editing: Option<String>,
}

/// How an inline edit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// The edit was abandoned.
    Cancelled,
    /// The edit was committed with a new name.
    Submitted(String),
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id currently being edited.
    pub fn current(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Whether any row is in rename mode.
    pub fn is_active(&self) -> bool {
        self.editing.is_some()
    }

    /// Enter rename mode, replacing any previous edit.
    pub fn begin(&mut self, id: impl Into<String>) {
        self.editing = Some(id.into());
    }

    /// Leave rename mode. Returns the id that was being edited.
    pub fn finish(&mut self) -> Option<String> {
        self.editing.take()
    }
}
