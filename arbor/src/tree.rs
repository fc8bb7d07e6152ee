//! Tree controller.
//!
//! `Tree<T>` composes the row index with the open, selection, focus, edit
//! and drag states, and forwards structural intents to host handlers. It
//! never mutates the node forest itself: the host applies requests and
//! pushes the result back with [`Tree::set_nodes`], after which every state
//! is pruned of ids that no longer exist.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace};

use crate::config::{DropCheck, Layout, TreeConfig};
use crate::dnd::{DragState, DropCursor};
use crate::edit::{EditResult, EditState};
use crate::focus::FocusState;
use crate::handlers::{Completion, Handlers, MoveArgs, RenameArgs, RenderedRange, ScrollRequest};
use crate::node::TreeNode;
use crate::open::OpenState;
use crate::rows::{NodeIndex, Row, RowIndex};
use crate::selection::Selection;
use crate::typeahead::TypeAhead;

/// Unique identifier for a Tree instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_{}", self.0)
    }
}

/// An interactive tree controller.
///
/// `Tree<T>` manages hierarchical data with:
/// - A flattened, memoized list of visible rows
/// - Open/closed state per node with a tree-wide default
/// - Selection (single, toggle, contiguous range) by node id
/// - Row focus, independent of selection
/// - Inline rename and drag-and-drop state
/// - Keyboard dispatch (see [`Tree::handle_key`])
///
/// # Example
///
/// ```ignore
/// let mut tree = Tree::with_config(roots, TreeConfig::new().open_by_default(true))
///     .with_handlers(Handlers::new().on_delete(|args| {
///         store.remove(&args.ids);
///         Completion::done()
///     }));
///
/// tree.on_focus_gained();
/// tree.handle_key(&KeyCombo::key(Key::Down));
/// ```
pub struct Tree<T: TreeNode> {
    /// Unique identifier.
    id: TreeId,
    /// Host forest.
    pub(crate) nodes: Vec<T>,
    /// Bumped on every `set_nodes`.
    nodes_version: u64,
    /// Forest-wide id lookup.
    pub(crate) node_index: NodeIndex,
    /// Visible rows.
    pub(crate) rows: RowIndex<T>,
    pub(crate) open: OpenState,
    pub(crate) selection: Selection,
    pub(crate) focus: FocusState,
    pub(crate) edit: EditState,
    pub(crate) drag: DragState,
    pub(crate) typeahead: TypeAhead,
    pub(crate) config: TreeConfig<T>,
    pub(crate) handlers: Handlers<T>,
    /// Index range last reported by the renderer.
    rendered_range: Option<RenderedRange>,
    /// Dirty flag for re-render.
    dirty: bool,
    /// Whether the missing create handler has been reported.
    pub(crate) warned_missing_create: bool,
}

impl<T: TreeNode> Tree<T> {
    /// Create a tree with default configuration.
    pub fn new(nodes: Vec<T>) -> Self {
        Self::with_config(nodes, TreeConfig::default())
    }

    /// Create a tree with the given configuration.
    pub fn with_config(nodes: Vec<T>, config: TreeConfig<T>) -> Self {
        let open = OpenState::with_entries(config.open_by_default, config.initial_open.clone());
        let node_index = NodeIndex::build(&nodes);
        let mut tree = Self {
            id: TreeId::new(),
            nodes,
            nodes_version: 0,
            node_index,
            rows: RowIndex::default(),
            open,
            selection: Selection::new(),
            focus: FocusState::new(),
            edit: EditState::new(),
            drag: DragState::new(),
            typeahead: TypeAhead::new(),
            config,
            handlers: Handlers::new(),
            rendered_range: None,
            dirty: true,
            warned_missing_create: false,
        };
        tree.refresh_rows();
        tree
    }

    /// Register host handlers.
    pub fn with_handlers(mut self, handlers: Handlers<T>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Replace host handlers.
    pub fn set_handlers(&mut self, handlers: Handlers<T>) {
        self.handlers = handlers;
        self.warned_missing_create = false;
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn config(&self) -> &TreeConfig<T> {
        &self.config
    }

    /// Rebuild rows if the forest or open state changed since the last build.
    fn refresh_rows(&mut self) {
        let stamp = (self.nodes_version, self.open.version());
        if !self.rows.is_built_from(stamp) {
            self.rows = RowIndex::build_stamped(&self.nodes, &self.open, stamp);
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Forest
    // -------------------------------------------------------------------------

    /// The host forest.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Accept an externally confirmed forest.
    ///
    /// Rebuilds every index and prunes ids that no longer exist from
    /// selection, focus, edit and drag state.
    pub fn set_nodes(&mut self, nodes: Vec<T>) {
        self.nodes = nodes;
        self.nodes_version += 1;
        self.node_index = NodeIndex::build(&self.nodes);
        self.refresh_rows();

        let index = &self.node_index;
        let removed = self.selection.retain(|id| index.contains(id));
        if let Some(focused) = self.focus.current()
            && !index.contains(focused)
        {
            debug!("[{}] Focused node {} removed", self.id, focused);
            self.focus.clear();
        }
        if let Some(editing) = self.edit.current()
            && !index.contains(editing)
        {
            self.edit.finish();
        }
        self.drag.retain(|id| index.contains(id));

        if !removed.is_empty() {
            debug!("[{}] Pruned {} stale selected ids", self.id, removed.len());
            self.fire_select();
        }
    }

    /// Find a node anywhere in the forest, hidden nodes included.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.node_index.node(&self.nodes, id)
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Visible rows in order.
    pub fn rows(&self) -> &[Row<T>] {
        self.rows.rows()
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.rows.len()
    }

    /// Visible row for an id.
    pub fn row(&self, id: &str) -> Option<&Row<T>> {
        self.rows.get(id)
    }

    /// Visible row at an index.
    pub fn row_at(&self, index: usize) -> Option<&Row<T>> {
        self.rows.at(index)
    }

    /// Index of a visible id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.rows.index_of(id)
    }

    pub fn first_row(&self) -> Option<&Row<T>> {
        self.rows.first()
    }

    pub fn last_row(&self) -> Option<&Row<T>> {
        self.rows.last()
    }

    /// Row preceding a visible id.
    pub fn row_before(&self, id: &str) -> Option<&Row<T>> {
        self.rows.index_of(id).and_then(|i| self.rows.before(i))
    }

    /// Row following a visible id.
    pub fn row_after(&self, id: &str) -> Option<&Row<T>> {
        self.rows.index_of(id).and_then(|i| self.rows.after(i))
    }

    /// Parent row of a visible id. `None` at top level.
    pub fn parent_row(&self, id: &str) -> Option<&Row<T>> {
        self.rows.index_of(id).and_then(|i| self.rows.parent(i))
    }

    /// Contiguous visible rows between two ids, inclusive.
    pub fn nodes_between(&self, start_id: &str, end_id: &str) -> &[Row<T>] {
        self.rows.nodes_between(start_id, end_id)
    }

    /// First visible row matching a predicate.
    pub fn find_row(&self, predicate: impl FnMut(&Row<T>) -> bool) -> Option<&Row<T>> {
        self.rows.find(predicate)
    }

    // -------------------------------------------------------------------------
    // Open/Closed
    // -------------------------------------------------------------------------

    /// Check if a node is open.
    pub fn is_open(&self, id: &str) -> bool {
        self.find(id).is_some_and(TreeNode::is_internal) && self.open.is_open(id)
    }

    /// Open a node.
    pub fn open(&mut self, id: &str) {
        self.set_open(&[id.to_string()], true);
    }

    /// Close a node.
    pub fn close(&mut self, id: &str) {
        self.set_open(&[id.to_string()], false);
    }

    /// Toggle a node.
    pub fn toggle(&mut self, id: &str) {
        let next = !self.open.is_open(id);
        self.set_open(&[id.to_string()], next);
    }

    /// Open every internal sibling of a node (the node included).
    pub fn open_siblings(&mut self, id: &str) {
        let Some(siblings) = self.node_index.siblings(&self.nodes, id) else {
            debug!("[{}] open_siblings: unknown node {}", self.id, id);
            return;
        };
        let ids: Vec<String> = siblings
            .iter()
            .filter(|n| n.is_internal())
            .map(|n| n.id().to_string())
            .collect();
        self.set_open(&ids, true);
    }

    /// Open every internal node.
    pub fn open_all(&mut self) {
        let ids = self.internal_ids();
        self.set_open(&ids, true);
    }

    /// Close every internal node.
    pub fn close_all(&mut self) {
        let ids = self.internal_ids();
        self.set_open(&ids, false);
    }

    /// Open every ancestor of a node so it becomes visible.
    pub fn open_parents(&mut self, id: &str) {
        let ids = self.node_index.ancestors(id);
        self.set_open(&ids, true);
    }

    fn internal_ids(&self) -> Vec<String> {
        fn collect<T: TreeNode>(items: &[T], out: &mut Vec<String>) {
            for item in items {
                if let Some(children) = item.children() {
                    out.push(item.id().to_string());
                    collect(children, out);
                }
            }
        }
        let mut ids = Vec::new();
        collect(&self.nodes, &mut ids);
        ids
    }

    fn set_open(&mut self, ids: &[String], open: bool) {
        let mut changed = Vec::new();
        for id in ids {
            let Some(node) = self.find(id) else {
                debug!("[{}] Ignoring open state for unknown node {}", self.id, id);
                continue;
            };
            if node.is_leaf() {
                trace!("[{}] Ignoring open state for leaf {}", self.id, id);
                continue;
            }
            let did_change = if open {
                self.open.open(id)
            } else {
                self.open.close(id)
            };
            if did_change {
                changed.push(id.as_str());
            }
        }
        if changed.is_empty() {
            return;
        }
        self.refresh_rows();
        if let Some(f) = self.handlers.toggle.as_mut() {
            for id in changed {
                f(id);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Whether multi-selection is enabled.
    pub fn multi_selection(&self) -> bool {
        !self.config.disable_multi_selection
    }

    /// Check if a node is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected ids: visible ones in row order, then hidden ones sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .rows
            .rows()
            .iter()
            .filter(|row| self.selection.is_selected(row.id()))
            .map(|row| row.id().to_string())
            .collect();
        ids.extend(
            self.selection
                .selected()
                .into_iter()
                .filter(|id| !self.rows.contains(id)),
        );
        ids
    }

    /// Selected nodes, in the same order as [`Tree::selected_ids`].
    pub fn selected_nodes(&self) -> Vec<T> {
        self.selected_ids()
            .iter()
            .filter_map(|id| self.find(id))
            .cloned()
            .collect()
    }

    /// Number of selected nodes.
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.selection.most_recent()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.selection.anchor()
    }

    /// Select only `id`.
    pub fn select(&mut self, id: &str) {
        if !self.rows.contains(id) {
            debug!("[{}] select: {} is not visible", self.id, id);
            return;
        }
        let (added, removed) = self.selection.select(id);
        self.after_selection_change(added, removed);
    }

    /// Toggle `id` without touching the rest of the selection.
    pub fn select_multi(&mut self, id: &str) {
        if !self.multi_selection() {
            return self.select(id);
        }
        if !self.rows.contains(id) {
            debug!("[{}] select_multi: {} is not visible", self.id, id);
            return;
        }
        let (added, removed) = self.selection.toggle(id);
        self.after_selection_change(added, removed);
    }

    /// Replace the selection with the visible range from the anchor to `id`.
    pub fn select_contiguous(&mut self, id: &str) {
        if !self.multi_selection() {
            return self.select(id);
        }
        if !self.rows.contains(id) {
            debug!("[{}] select_contiguous: {} is not visible", self.id, id);
            return;
        }
        let ordered = self.rows.ids();
        let (added, removed) = self.selection.range_select(id, &ordered);
        self.after_selection_change(added, removed);
    }

    /// Select every visible row.
    pub fn select_all(&mut self) {
        if !self.multi_selection() {
            return;
        }
        let ordered = self.rows.ids();
        let (added, removed) = self.selection.select_all(&ordered);
        self.after_selection_change(added, removed);
    }

    /// Remove one id from the selection.
    pub fn deselect(&mut self, id: &str) {
        if self.selection.deselect(id) {
            self.after_selection_change(vec![], vec![id.to_string()]);
        }
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        let removed = self.selection.clear();
        self.after_selection_change(vec![], removed);
    }

    fn after_selection_change(&mut self, added: Vec<String>, removed: Vec<String>) {
        // Markers may move even when membership does not
        self.dirty = true;
        if !added.is_empty() || !removed.is_empty() {
            debug!(
                "[{}] Selection changed: +{} -{}",
                self.id,
                added.len(),
                removed.len()
            );
            self.fire_select();
        }
    }

    fn fire_select(&mut self) {
        if self.handlers.select.is_none() {
            return;
        }
        let nodes = self.selected_nodes();
        if let Some(f) = self.handlers.select.as_mut() {
            f(&nodes);
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// The focused row id.
    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current()
    }

    /// The focused row, if it is visible.
    pub fn focused_row(&self) -> Option<&Row<T>> {
        self.focus.current().and_then(|id| self.rows.get(id))
    }

    /// Whether the tree owns keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.focus.within_tree()
    }

    /// Whether `id` is focused and the tree owns keyboard focus.
    pub fn is_focused(&self, id: &str) -> bool {
        self.has_focus() && self.focus.is_current(id)
    }

    /// Move row focus to a visible id and ask for it to be scrolled into view.
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(index) = self.rows.index_of(id) else {
            debug!("[{}] focus: {} is not visible", self.id, id);
            return false;
        };
        if !self.focus.set(id) {
            return false;
        }
        self.dirty = true;
        if let Some(f) = self.handlers.focus.as_mut()
            && let Some(row) = self.rows.at(index)
        {
            f(&row.node);
        }
        self.request_scroll(index);
        true
    }

    /// The tree widget gained keyboard focus.
    ///
    /// A hidden focused row re-anchors to its nearest visible ancestor. With
    /// nothing focused, focus goes to the most recent selection if visible,
    /// else the first row.
    pub fn on_focus_gained(&mut self) {
        self.focus.set_within_tree(true);
        if self.reanchor_focus().is_some() {
            return;
        }
        let target = self
            .selection
            .most_recent()
            .filter(|id| self.rows.contains(id))
            .or_else(|| self.rows.first().map(Row::id))
            .map(str::to_string);
        if let Some(id) = target {
            self.focus(&id);
        }
    }

    /// The tree widget lost keyboard focus.
    pub fn on_focus_lost(&mut self) {
        self.focus.set_within_tree(false);
        self.typeahead.clear();
        self.dirty = true;
    }

    /// Move focus off a hidden row to its nearest visible ancestor.
    ///
    /// A focused row hidden by a collapse keeps its focus until keyboard
    /// navigation needs a visible starting point; then this runs. Focus is
    /// cleared when no ancestor is visible.
    pub fn reanchor_focus(&mut self) -> Option<usize> {
        let focused = self.focus.current()?.to_string();
        if let Some(index) = self.rows.index_of(&focused) {
            return Some(index);
        }
        let target = self
            .node_index
            .ancestors(&focused)
            .into_iter()
            .find(|id| self.rows.contains(id));
        match target {
            Some(id) => {
                debug!("[{}] Re-anchoring focus {} -> {}", self.id, focused, id);
                self.focus(&id);
                self.rows.index_of(&id)
            }
            None => {
                debug!("[{}] Focused node {} has no visible ancestor", self.id, focused);
                self.focus.clear();
                self.dirty = true;
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Edit
    // -------------------------------------------------------------------------

    /// Whether a node may enter rename mode.
    pub fn is_editable(&self, id: &str) -> bool {
        self.find(id)
            .is_some_and(|node| !self.config.disable_edit.applies(node))
    }

    /// Enter rename mode. Refused for hidden or non-editable nodes.
    pub fn edit(&mut self, id: &str) -> bool {
        if !self.rows.contains(id) {
            debug!("[{}] edit: {} is not visible", self.id, id);
            return false;
        }
        if !self.is_editable(id) {
            debug!("[{}] edit: {} is not editable", self.id, id);
            return false;
        }
        self.edit.begin(id);
        self.dirty = true;
        true
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_active()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.edit.current()
    }

    /// Commit the edit, requesting a rename from the host.
    pub fn submit_edit(&mut self, name: impl Into<String>) -> Option<Completion<()>> {
        let id = self.edit.finish()?;
        self.dirty = true;
        let node = self.find(&id)?.clone();
        let f = self.handlers.rename.as_mut()?;
        Some(f(RenameArgs {
            id,
            name: name.into(),
            node,
        }))
    }

    /// Abandon the edit. Returns the id that was being edited.
    pub fn cancel_edit(&mut self) -> Option<String> {
        let id = self.edit.finish();
        if id.is_some() {
            self.dirty = true;
        }
        id
    }

    /// Apply the outcome reported by the inline editor.
    pub fn end_edit(&mut self, result: EditResult) -> Option<Completion<()>> {
        match result {
            EditResult::Submitted(name) => self.submit_edit(name),
            EditResult::Cancelled => {
                self.cancel_edit();
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    /// Whether a node may be dragged.
    pub fn is_draggable(&self, id: &str) -> bool {
        self.find(id)
            .is_some_and(|node| !self.config.disable_drag.applies(node))
    }

    /// Whether `id` is the drag source.
    pub fn is_dragging(&self, id: &str) -> bool {
        self.drag.source() == Some(id)
    }

    /// The drag source id.
    pub fn drag_source(&self) -> Option<&str> {
        self.drag.source()
    }

    /// Ids being dragged.
    pub fn drag_items(&self) -> &[String] {
        self.drag.items()
    }

    /// Current hover target (parent, index).
    pub fn drop_target(&self) -> (Option<&str>, Option<usize>) {
        (self.drag.target_parent(), self.drag.target_index())
    }

    /// Begin dragging a visible row.
    ///
    /// Drags the whole selection when the row is selected, else only the row.
    pub fn drag_start(&mut self, id: &str) -> bool {
        if !self.rows.contains(id) || !self.is_draggable(id) {
            debug!("[{}] drag_start: {} cannot be dragged", self.id, id);
            return false;
        }
        let items = if self.selection.is_selected(id) {
            self.selected_ids()
        } else {
            vec![id.to_string()]
        };
        debug!("[{}] Drag start on {} ({} items)", self.id, id, items.len());
        self.drag.start(id, items);
        self.dirty = true;
        true
    }

    /// Update the hover target while the pointer moves.
    pub fn dragging_over(&mut self, parent_id: Option<&str>, index: Option<usize>) {
        if !self.drag.is_active() {
            return;
        }
        if let Some(parent) = parent_id
            && !self.node_index.contains(parent)
        {
            debug!("[{}] dragging_over: unknown parent {}", self.id, parent);
            return;
        }
        self.drag.hover(parent_id.map(str::to_string), index);
        let cursor = self.cursor_for(parent_id, index);
        self.drag.set_cursor(cursor);
        self.dirty = true;
    }

    /// Whether `id` is the container itself under the pointer.
    pub fn will_receive_drop(&self, id: &str) -> bool {
        self.drag.will_receive_drop(id)
    }

    /// Work out the drop indicator for a hover target.
    fn cursor_for(&self, parent_id: Option<&str>, index: Option<usize>) -> Option<DropCursor> {
        let (siblings, level, parent_row) = match parent_id {
            Some(parent) => {
                let row = self.rows.get(parent);
                let children = self.find(parent)?.children()?;
                let level = row.map_or(0, |r| r.depth + 1);
                (children, level, row)
            }
            None => (self.nodes.as_slice(), 0, None),
        };

        let Some(index) = index else {
            return parent_id.map(|id| DropCursor::Highlight { id: id.to_string() });
        };

        if let Some(row) = siblings
            .get(index)
            .and_then(|sibling| self.rows.get(sibling.id()))
        {
            return Some(DropCursor::Line {
                index: row.index,
                level,
            });
        }

        // Past the last child: just after the parent's last visible descendant
        let line = match parent_row {
            Some(parent) if parent.is_open => self.rows.rows()[parent.index + 1..]
                .iter()
                .find(|row| row.depth <= parent.depth)
                .map_or(self.rows.len(), |row| row.index),
            Some(_) => return None,
            None if parent_id.is_none() => self.rows.len(),
            None => return None,
        };
        Some(DropCursor::Line { index: line, level })
    }

    /// Current drop indicator.
    pub fn drop_cursor(&self) -> Option<&DropCursor> {
        self.drag.cursor()
    }

    /// Show a drop indicator explicitly.
    pub fn show_cursor(&mut self, cursor: DropCursor) {
        self.drag.set_cursor(Some(cursor));
        self.dirty = true;
    }

    /// Hide the drop indicator.
    pub fn hide_cursor(&mut self) {
        self.drag.set_cursor(None);
        self.dirty = true;
    }

    /// Whether the current hover target accepts the dragged nodes.
    pub fn can_drop(&self) -> bool {
        if !self.drag.is_active() || self.drag.items().is_empty() {
            return false;
        }
        let parent_node = match self.drag.target_parent() {
            Some(parent) => {
                let Some(node) = self.find(parent) else {
                    return false;
                };
                if node.is_leaf() {
                    return false;
                }
                let items = self.drag.items();
                // No dropping a node into itself or its own subtree
                if items.iter().any(|id| id == parent)
                    || self
                        .node_index
                        .ancestors(parent)
                        .iter()
                        .any(|a| items.contains(a))
                {
                    return false;
                }
                Some(node)
            }
            None => None,
        };
        let drag_nodes: Vec<T> = self
            .drag
            .items()
            .iter()
            .filter_map(|id| self.find(id))
            .cloned()
            .collect();
        let check = DropCheck {
            parent_node,
            drag_nodes: &drag_nodes,
            index: self.drag.target_index().unwrap_or(0),
        };
        !self.config.disable_drop.applies(&check)
    }

    /// Finish the drag over the current target, requesting a move.
    ///
    /// Drag state is cleared whether or not the drop was accepted.
    pub fn drop(&mut self) -> Option<Completion<()>> {
        if !self.can_drop() {
            debug!("[{}] Drop rejected", self.id);
            self.drag_end();
            return None;
        }
        let drag_ids = self.drag.items().to_vec();
        let drag_nodes: Vec<T> = drag_ids
            .iter()
            .filter_map(|id| self.find(id))
            .cloned()
            .collect();
        let parent_id = self.drag.target_parent().map(str::to_string);
        let parent_node = parent_id.as_deref().and_then(|id| self.find(id)).cloned();
        let index = self.drag.target_index().unwrap_or(0);
        self.drag_end();

        debug!(
            "[{}] Drop {} items into {:?} at {}",
            self.id,
            drag_ids.len(),
            parent_id,
            index
        );
        let f = self.handlers.move_.as_mut()?;
        Some(f(MoveArgs {
            drag_ids,
            drag_nodes,
            parent_id,
            parent_node,
            index,
        }))
    }

    /// Clear all drag state and the drop indicator.
    pub fn drag_end(&mut self) {
        if !self.drag.is_active() {
            return;
        }
        self.drag.clear();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Layout pass-through
    // -------------------------------------------------------------------------

    /// Row geometry shared with the renderer.
    pub fn layout(&self) -> &Layout {
        &self.config.layout
    }

    /// Height of all visible rows.
    pub fn list_height(&self) -> u64 {
        self.config.layout.list_height(self.rows.len())
    }

    /// Vertical offset of a visible row.
    pub fn row_offset(&self, index: usize) -> u64 {
        self.config.layout.row_offset(index)
    }

    /// Called by the renderer with the index range now on screen.
    pub fn items_rendered(&mut self, range: RenderedRange) {
        self.rendered_range = Some(range);
    }

    /// Range last reported by the renderer.
    pub fn rendered_range(&self) -> Option<&RenderedRange> {
        self.rendered_range.as_ref()
    }

    /// Reveal a node (opening its ancestors) and ask for it to be scrolled
    /// into view.
    pub fn scroll_to(&mut self, id: &str) {
        self.open_parents(id);
        if let Some(index) = self.rows.index_of(id) {
            self.request_scroll(index);
        }
    }

    fn request_scroll(&mut self, index: usize) {
        let already_shown = self
            .rendered_range
            .as_ref()
            .is_some_and(|range| range.contains(&index));
        if already_shown {
            return;
        }
        let request = ScrollRequest {
            index,
            offset: self.config.layout.row_offset(index),
        };
        if let Some(f) = self.handlers.scroll.as_mut() {
            f(request);
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Whether the tree changed since the last `take_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and reset the re-render flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Release transient state when the widget goes away: the type-ahead
    /// deadline and any in-flight drag.
    pub fn teardown(&mut self) {
        self.typeahead.clear();
        self.drag.clear();
        self.focus.set_within_tree(false);
    }
}
