//! Drag-and-drop state.
//!
//! The hover target is a (parent, index) pair. A `None` parent is the
//! invisible root (top level). A `None` index means "drop onto the parent
//! itself / append as its last child"; `Some(i)` means "insert before the
//! child currently at position `i`".

/// Visual drop indicator for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropCursor {
    /// Insertion line between rows.
    Line {
        /// Visible row index the line is drawn above.
        index: usize,
        /// Depth the line is indented to.
        level: u16,
    },
    /// Highlight a container that will receive the drop.
    Highlight {
        /// Id of the highlighted container.
        id: String,
    },
}

/// In-progress drag state.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Id of the row the drag started on
    source: Option<String>,
    /// Ids being dragged, in visible order
    items: Vec<String>,
    /// Hover target parent (`None` = top level)
    target_parent: Option<String>,
    /// Hover target index (`None` = onto the parent)
    target_index: Option<usize>,
    /// Drop indicator
    cursor: Option<DropCursor>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. Any previous hover target is discarded.
    pub fn start(&mut self, source: impl Into<String>, items: Vec<String>) {
        self.source = Some(source.into());
        self.items = items;
        self.target_parent = None;
        self.target_index = None;
        self.cursor = None;
    }

    /// Update the hover target.
    pub fn hover(&mut self, parent: Option<String>, index: Option<usize>) {
        self.target_parent = parent;
        self.target_index = index;
    }

    /// Reset everything, cursor included.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn target_parent(&self) -> Option<&str> {
        self.target_parent.as_deref()
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    /// Whether `id` is the hovered container itself (not a gap between its
    /// children).
    pub fn will_receive_drop(&self, id: &str) -> bool {
        self.target_parent.as_deref() == Some(id) && self.target_index.is_none()
    }

    pub fn cursor(&self) -> Option<&DropCursor> {
        self.cursor.as_ref()
    }

    pub fn set_cursor(&mut self, cursor: Option<DropCursor>) {
        self.cursor = cursor;
    }

    /// Drop ids the predicate rejects. A drag whose source disappears is
    /// cancelled outright.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        if self.source.as_deref().is_some_and(|id| !keep(id)) {
            self.clear();
            return;
        }
        self.items.retain(|id| keep(id));
        if self.target_parent.as_deref().is_some_and(|id| !keep(id)) {
            self.target_parent = None;
            self.target_index = None;
            self.cursor = None;
        }
    }
}
