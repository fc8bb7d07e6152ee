//! Row index model.
//!
//! `RowIndex` is the visible, pre-order flattening of the forest under the
//! current open state. Rows link to each other by index only (parent, prev,
//! next), so a rebuild can never leave a dangling reference behind.
//!
//! `NodeIndex` covers the whole forest, hidden nodes included. It backs
//! lookups that must work for collapsed subtrees: `find`, ancestor walks and
//! pruning of stale ids after the host replaces its data.

use std::collections::HashMap;

use log::trace;

use crate::node::TreeNode;
use crate::open::OpenState;

/// A visible node in the flattened row sequence.
#[derive(Debug, Clone)]
pub struct Row<T: TreeNode> {
    /// The host record.
    pub node: T,
    /// Depth in the forest (0 = top level).
    pub depth: u16,
    /// Position in the visible sequence.
    pub index: usize,
    /// Index of the parent row. `None` when the parent is the invisible root.
    pub parent: Option<usize>,
    /// Whether this node can have children.
    pub is_internal: bool,
    /// Whether this node is currently open.
    pub is_open: bool,
}

impl<T: TreeNode> Row<T> {
    /// Id of the underlying node.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// Whether this row is a leaf.
    pub fn is_leaf(&self) -> bool {
        !self.is_internal
    }
}

/// Memo key for a row build: (forest version, open-state version).
pub(crate) type BuildStamp = (u64, u64);

/// The visible rows plus an id -> index map.
#[derive(Debug, Clone)]
pub struct RowIndex<T: TreeNode> {
    rows: Vec<Row<T>>,
    by_id: HashMap<String, usize>,
    stamp: Option<BuildStamp>,
}

impl<T: TreeNode> Default for RowIndex<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            by_id: HashMap::new(),
            stamp: None,
        }
    }
}

impl<T: TreeNode> RowIndex<T> {
    /// Flatten `roots` under `open`.
    pub fn build(roots: &[T], open: &OpenState) -> Self {
        let mut rows = Vec::new();
        Self::collect_visible(roots, open, 0, None, &mut rows);

        let mut by_id = HashMap::with_capacity(rows.len());
        for row in &rows {
            by_id.entry(row.id().to_string()).or_insert(row.index);
        }

        trace!("Built {} visible rows", rows.len());
        Self {
            rows,
            by_id,
            stamp: None,
        }
    }

    /// Build and remember which input versions produced this index.
    pub(crate) fn build_stamped(roots: &[T], open: &OpenState, stamp: BuildStamp) -> Self {
        let mut index = Self::build(roots, open);
        index.stamp = Some(stamp);
        index
    }

    /// Whether this index was built from the given input versions.
    pub(crate) fn is_built_from(&self, stamp: BuildStamp) -> bool {
        self.stamp == Some(stamp)
    }

    fn collect_visible(
        items: &[T],
        open: &OpenState,
        depth: u16,
        parent: Option<usize>,
        out: &mut Vec<Row<T>>,
    ) {
        for item in items {
            let index = out.len();
            let children = item.children();
            let is_open = children.is_some() && open.is_open(item.id());

            out.push(Row {
                node: item.clone(),
                depth,
                index,
                parent,
                is_internal: children.is_some(),
                is_open,
            });

            if is_open && let Some(children) = children {
                Self::collect_visible(children, open, depth + 1, Some(index), out);
            }
        }
    }

    /// All visible rows in order.
    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row is visible.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a visible id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Row at a visible index.
    pub fn at(&self, index: usize) -> Option<&Row<T>> {
        self.rows.get(index)
    }

    /// Row for a visible id.
    pub fn get(&self, id: &str) -> Option<&Row<T>> {
        self.index_of(id).and_then(|i| self.rows.get(i))
    }

    /// Whether an id is visible.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn first(&self) -> Option<&Row<T>> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Row<T>> {
        self.rows.last()
    }

    /// Row preceding `index`.
    pub fn before(&self, index: usize) -> Option<&Row<T>> {
        index.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// Row following `index`.
    pub fn after(&self, index: usize) -> Option<&Row<T>> {
        self.rows.get(index + 1)
    }

    /// Parent row of the row at `index`.
    pub fn parent(&self, index: usize) -> Option<&Row<T>> {
        self.rows
            .get(index)
            .and_then(|row| row.parent)
            .and_then(|p| self.rows.get(p))
    }

    /// Contiguous rows between two ids, inclusive, in forward order.
    ///
    /// A missing start id is treated as the first row. A missing end id
    /// yields an empty slice.
    pub fn nodes_between(&self, start_id: &str, end_id: &str) -> &[Row<T>] {
        let Some(end) = self.index_of(end_id) else {
            return &[];
        };
        let start = self.index_of(start_id).unwrap_or(0);
        let (lo, hi) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        &self.rows[lo..=hi]
    }

    /// First visible row matching a predicate.
    pub fn find(&self, mut predicate: impl FnMut(&Row<T>) -> bool) -> Option<&Row<T>> {
        self.rows.iter().find(|row| predicate(row))
    }

    /// All visible ids in order.
    pub fn ids(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.id().to_string()).collect()
    }
}

/// Where a node lives in the forest.
#[derive(Debug, Clone)]
struct NodeEntry {
    /// Child positions from the top level down to the node.
    path: Vec<usize>,
    /// Id of the parent node, `None` at top level.
    parent: Option<String>,
}

/// Forest-wide id -> location map, hidden nodes included.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    entries: HashMap<String, NodeEntry>,
}

impl NodeIndex {
    /// Index every node of the forest.
    pub fn build<T: TreeNode>(roots: &[T]) -> Self {
        let mut index = Self::default();
        let mut path = Vec::new();
        index.collect(roots, None, &mut path);
        index
    }

    fn collect<T: TreeNode>(&mut self, items: &[T], parent: Option<&str>, path: &mut Vec<usize>) {
        for (position, item) in items.iter().enumerate() {
            path.push(position);
            self.entries
                .entry(item.id().to_string())
                .or_insert_with(|| NodeEntry {
                    path: path.clone(),
                    parent: parent.map(str::to_string),
                });
            if let Some(children) = item.children() {
                self.collect(children, Some(item.id()), path);
            }
            path.pop();
        }
    }

    /// Whether the forest contains an id.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Parent id of a node. `None` for top-level or unknown nodes.
    pub fn parent_id(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|e| e.parent.as_deref())
    }

    /// Ancestor ids, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = self.parent_id(id);
        while let Some(parent) = current {
            out.push(parent.to_string());
            current = self.parent_id(parent);
        }
        out
    }

    /// Resolve an id to its node.
    pub fn node<'a, T: TreeNode>(&self, roots: &'a [T], id: &str) -> Option<&'a T> {
        let entry = self.entries.get(id)?;
        let (first, rest) = entry.path.split_first()?;
        let mut node = roots.get(*first)?;
        for position in rest {
            node = node.children()?.get(*position)?;
        }
        Some(node)
    }

    /// Nodes sharing the parent of `id` (the node itself included).
    pub fn siblings<'a, T: TreeNode>(&self, roots: &'a [T], id: &str) -> Option<&'a [T]> {
        let entry = self.entries.get(id)?;
        match &entry.parent {
            Some(parent) => self.node(roots, parent)?.children(),
            None => Some(roots),
        }
    }
}
