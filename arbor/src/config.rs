//! Tree configuration types.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::keybinds::Keymap;
use crate::node::TreeNode;

/// A per-node yes/no switch: blanket or computed.
///
/// Used for `disable_edit` and `disable_drag`, where `true` means
/// "disabled for this node".
pub enum NodePredicate<T> {
    /// Never applies.
    Never,
    /// Always applies.
    Always,
    /// Applies when the function returns true.
    When(Arc<dyn Fn(&T) -> bool>),
}

impl<T> NodePredicate<T> {
    /// Build a computed predicate.
    pub fn when(f: impl Fn(&T) -> bool + 'static) -> Self {
        Self::When(Arc::new(f))
    }

    /// Evaluate for a node.
    pub fn applies(&self, node: &T) -> bool {
        match self {
            NodePredicate::Never => false,
            NodePredicate::Always => true,
            NodePredicate::When(f) => f(node),
        }
    }
}

impl<T> Default for NodePredicate<T> {
    fn default() -> Self {
        Self::Never
    }
}

impl<T> Clone for NodePredicate<T> {
    fn clone(&self) -> Self {
        match self {
            NodePredicate::Never => NodePredicate::Never,
            NodePredicate::Always => NodePredicate::Always,
            NodePredicate::When(f) => NodePredicate::When(Arc::clone(f)),
        }
    }
}

impl<T> From<bool> for NodePredicate<T> {
    fn from(value: bool) -> Self {
        if value { Self::Always } else { Self::Never }
    }
}

impl<T> fmt::Debug for NodePredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodePredicate::Never => write!(f, "Never"),
            NodePredicate::Always => write!(f, "Always"),
            NodePredicate::When(_) => write!(f, "When(<fn>)"),
        }
    }
}

/// What a drop-rejection predicate gets to look at.
#[derive(Debug)]
pub struct DropCheck<'a, T> {
    /// Container receiving the drop. `None` is the top level.
    pub parent_node: Option<&'a T>,
    /// Nodes being dragged.
    pub drag_nodes: &'a [T],
    /// Insertion index within the parent.
    pub index: usize,
}

/// Rejects drop targets. `true` means "drop disabled here".
pub enum DropPredicate<T> {
    Never,
    Always,
    When(Arc<dyn Fn(&DropCheck<'_, T>) -> bool>),
}

impl<T> DropPredicate<T> {
    /// Build a computed predicate.
    pub fn when(f: impl Fn(&DropCheck<'_, T>) -> bool + 'static) -> Self {
        Self::When(Arc::new(f))
    }

    /// Evaluate for a prospective drop.
    pub fn applies(&self, check: &DropCheck<'_, T>) -> bool {
        match self {
            DropPredicate::Never => false,
            DropPredicate::Always => true,
            DropPredicate::When(f) => f(check),
        }
    }
}

impl<T> Default for DropPredicate<T> {
    fn default() -> Self {
        Self::Never
    }
}

impl<T> Clone for DropPredicate<T> {
    fn clone(&self) -> Self {
        match self {
            DropPredicate::Never => DropPredicate::Never,
            DropPredicate::Always => DropPredicate::Always,
            DropPredicate::When(f) => DropPredicate::When(Arc::clone(f)),
        }
    }
}

impl<T> From<bool> for DropPredicate<T> {
    fn from(value: bool) -> Self {
        if value { Self::Always } else { Self::Never }
    }
}

impl<T> fmt::Debug for DropPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropPredicate::Never => write!(f, "Never"),
            DropPredicate::Always => write!(f, "Always"),
            DropPredicate::When(_) => write!(f, "When(<fn>)"),
        }
    }
}

/// Sizing parameters handed through to the rendering surface.
///
/// The controller never lays anything out itself; these values exist so the
/// renderer and the controller agree on row geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Height of every row.
    pub row_height: u32,
    /// Indentation per depth level.
    pub indent: u32,
    /// Rows rendered beyond the viewport on each side.
    pub overscan_count: usize,
    /// Viewport width.
    pub width: u32,
    /// Viewport height.
    pub height: u32,
    /// Shorthand for both paddings; wins over the individual values.
    pub padding: Option<u32>,
    pub padding_top: u32,
    pub padding_bottom: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            row_height: 24,
            indent: 24,
            overscan_count: 1,
            width: 300,
            height: 500,
            padding: None,
            padding_top: 0,
            padding_bottom: 0,
        }
    }
}

impl Layout {
    /// Effective top padding.
    pub fn top(&self) -> u32 {
        self.padding.unwrap_or(self.padding_top)
    }

    /// Effective bottom padding.
    pub fn bottom(&self) -> u32 {
        self.padding.unwrap_or(self.padding_bottom)
    }

    /// Total height of `rows` rows, paddings excluded.
    pub fn list_height(&self, rows: usize) -> u64 {
        rows as u64 * u64::from(self.row_height)
    }

    /// Vertical offset of the row at `index`, top padding included.
    pub fn row_offset(&self, index: usize) -> u64 {
        u64::from(self.top()) + self.list_height(index)
    }

    /// Horizontal indentation for a depth.
    pub fn indent_for(&self, depth: u16) -> u32 {
        u32::from(depth) * self.indent
    }
}

/// Per-tree configuration.
#[derive(Debug, Clone)]
pub struct TreeConfig<T: TreeNode> {
    /// Whether nodes without an explicit entry start open.
    pub open_by_default: bool,
    /// Restrict selection to a single row.
    pub disable_multi_selection: bool,
    /// Row geometry.
    pub layout: Layout,
    /// Nodes that cannot be renamed.
    pub disable_edit: NodePredicate<T>,
    /// Nodes that cannot be dragged.
    pub disable_drag: NodePredicate<T>,
    /// Targets that cannot receive a drop.
    pub disable_drop: DropPredicate<T>,
    /// Shortcut bindings.
    pub keymap: Keymap,
    /// Explicit open/closed entries applied at construction.
    pub initial_open: HashMap<String, bool>,
}

impl<T: TreeNode> Default for TreeConfig<T> {
    fn default() -> Self {
        Self {
            open_by_default: false,
            disable_multi_selection: false,
            layout: Layout::default(),
            disable_edit: NodePredicate::Never,
            disable_drag: NodePredicate::Never,
            disable_drop: DropPredicate::Never,
            keymap: Keymap::default(),
            initial_open: HashMap::new(),
        }
    }
}

impl<T: TreeNode> TreeConfig<T> {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open nodes by default.
    pub fn open_by_default(mut self, open: bool) -> Self {
        self.open_by_default = open;
        self
    }

    /// Restrict selection to a single row.
    pub fn disable_multi_selection(mut self, disable: bool) -> Self {
        self.disable_multi_selection = disable;
        self
    }

    /// Set row geometry.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn disable_edit(mut self, predicate: impl Into<NodePredicate<T>>) -> Self {
        self.disable_edit = predicate.into();
        self
    }

    pub fn disable_drag(mut self, predicate: impl Into<NodePredicate<T>>) -> Self {
        self.disable_drag = predicate.into();
        self
    }

    pub fn disable_drop(mut self, predicate: impl Into<DropPredicate<T>>) -> Self {
        self.disable_drop = predicate.into();
        self
    }

    /// Replace the keymap.
    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Seed an explicit open/closed entry.
    pub fn initially_open(mut self, id: impl Into<String>, open: bool) -> Self {
        self.initial_open.insert(id.into(), open);
        self
    }
}
