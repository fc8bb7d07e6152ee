//! TreeNode trait for host records displayed in a Tree.

/// Trait for host records that can be displayed in a Tree.
///
/// Implement this trait to expose hierarchical data to the controller.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Debug)]
/// struct FileNode {
///     path: String,
///     name: String,
///     children: Option<Vec<FileNode>>,
/// }
///
/// impl TreeNode for FileNode {
///     fn id(&self) -> &str {
///         &self.path
///     }
///
///     fn children(&self) -> Option<&[Self]> {
///         self.children.as_deref()
///     }
///
///     fn name(&self) -> Option<&str> {
///         Some(&self.name)
///     }
/// }
/// ```
pub trait TreeNode: Clone + 'static {
    /// Unique, stable identifier for this node.
    ///
    /// This ID must be unique across the entire forest and stable across
    /// updates to keep open, selection and focus state attached.
    fn id(&self) -> &str;

    /// Child records.
    ///
    /// `None` marks a leaf. `Some` marks an internal node, even when the
    /// slice is empty (an empty folder can still be opened and dropped into).
    fn children(&self) -> Option<&[Self]>;

    /// Display name, used for type-ahead search.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Whether this node can have children.
    fn is_internal(&self) -> bool {
        self.children().is_some()
    }

    /// Whether this node is a leaf.
    fn is_leaf(&self) -> bool {
        !self.is_internal()
    }
}

/// The kind of node a create request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A node that can have children.
    Internal,
    /// A node without children.
    Leaf,
}
