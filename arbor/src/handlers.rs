//! Host handlers.
//!
//! The controller never changes the node forest. Structural intents (create,
//! move, rename, delete) are forwarded to the host as requests; the host
//! applies them however it likes and pushes the new forest back with
//! `Tree::set_nodes`.
//!
//! Structural handlers return a [`Completion`], which is either already
//! resolved or resolved later by the host through a [`Completer`]. The
//! controller never waits on it. It hands the completion back to the caller,
//! who may await it or drop it.

use std::fmt;
use std::future::Future;
use std::ops::Range;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::node::NodeKind;

// =============================================================================
// Completion
// =============================================================================

enum CompletionInner<R> {
    Ready(Option<R>),
    Pending(oneshot::Receiver<R>),
}

/// Result of a host request that may resolve later.
///
/// Awaiting yields `None` when the host dropped its [`Completer`] without
/// resolving it.
pub struct Completion<R> {
    inner: CompletionInner<R>,
}

/// Resolves a pending [`Completion`].
pub struct Completer<R> {
    tx: oneshot::Sender<R>,
}

impl<R> Completion<R> {
    /// An already-resolved completion.
    pub fn ready(value: R) -> Self {
        Self {
            inner: CompletionInner::Ready(Some(value)),
        }
    }

    /// A completion the host resolves later.
    pub fn pending() -> (Completer<R>, Self) {
        let (tx, rx) = oneshot::channel();
        (
            Completer { tx },
            Self {
                inner: CompletionInner::Pending(rx),
            },
        )
    }

    /// Take the value if it is available now, without waiting.
    pub fn try_take(&mut self) -> Option<R> {
        match &mut self.inner {
            CompletionInner::Ready(value) => value.take(),
            CompletionInner::Pending(rx) => rx.try_recv().ok().flatten(),
        }
    }
}

impl Completion<()> {
    /// A completion for fire-and-forget handlers.
    pub fn done() -> Self {
        Self::ready(())
    }
}

// The value is only ever moved out, never pinned.
impl<R> Unpin for Completion<R> {}

impl<R> Future for Completion<R> {
    type Output = Option<R>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            CompletionInner::Ready(value) => Poll::Ready(value.take()),
            CompletionInner::Pending(rx) => Pin::new(rx).poll(cx).map(Result::ok),
        }
    }
}

impl<R> fmt::Debug for Completion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CompletionInner::Ready(_) => write!(f, "Completion::Ready"),
            CompletionInner::Pending(_) => write!(f, "Completion::Pending"),
        }
    }
}

impl<R> Completer<R> {
    /// Resolve the completion. A dropped receiver is not an error.
    pub fn complete(self, value: R) {
        let _ = self.tx.send(value);
    }
}

// =============================================================================
// Handler arguments
// =============================================================================

/// Request for a new node.
#[derive(Debug, Clone)]
pub struct CreateArgs<T> {
    /// Parent id, `None` for the top level.
    pub parent_id: Option<String>,
    /// Parent node, `None` for the top level.
    pub parent_node: Option<T>,
    /// Insertion index within the parent.
    pub index: usize,
    /// Kind of node to create.
    pub kind: NodeKind,
}

/// Request to reparent/reorder nodes after a drop.
#[derive(Debug, Clone)]
pub struct MoveArgs<T> {
    pub drag_ids: Vec<String>,
    pub drag_nodes: Vec<T>,
    /// Target parent id, `None` for the top level.
    pub parent_id: Option<String>,
    pub parent_node: Option<T>,
    /// Insertion index within the target parent.
    pub index: usize,
}

/// Request to rename a node.
#[derive(Debug, Clone)]
pub struct RenameArgs<T> {
    pub id: String,
    pub name: String,
    pub node: T,
}

/// Request to delete nodes.
#[derive(Debug, Clone)]
pub struct DeleteArgs<T> {
    /// Ids to delete, in visible order.
    pub ids: Vec<String>,
    pub nodes: Vec<T>,
    /// Row the host should focus once the deletion lands.
    pub node_to_focus_after: Option<T>,
}

/// Request to copy node data.
#[derive(Debug, Clone)]
pub struct CopyArgs<T> {
    pub nodes: Vec<T>,
}

/// Request to paste into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteArgs {
    pub parent_id: String,
}

/// Request to bring a row into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Visible row index.
    pub index: usize,
    /// Vertical offset of that row.
    pub offset: u64,
}

/// Range of visible row indices the renderer reports as on screen.
pub type RenderedRange = Range<usize>;

// =============================================================================
// Handler registry
// =============================================================================

type CreateFn<T> = Box<dyn FnMut(CreateArgs<T>) -> Completion<Option<String>>>;
type MoveFn<T> = Box<dyn FnMut(MoveArgs<T>) -> Completion<()>>;
type RenameFn<T> = Box<dyn FnMut(RenameArgs<T>) -> Completion<()>>;
type DeleteFn<T> = Box<dyn FnMut(DeleteArgs<T>) -> Completion<()>>;
type CopyFn<T> = Box<dyn FnMut(CopyArgs<T>) -> bool>;
type PasteFn = Box<dyn FnMut(PasteArgs) -> bool>;
type NodeFn<T> = Box<dyn FnMut(&T)>;
type SelectFn<T> = Box<dyn FnMut(&[T])>;
type ToggleFn = Box<dyn FnMut(&str)>;
type ScrollFn = Box<dyn FnMut(ScrollRequest)>;

/// Optional host callbacks, registered builder-style.
///
/// ```ignore
/// let handlers = Handlers::new()
///     .on_create(|args| {
///         let id = store.insert(args.parent_id, args.index, args.kind);
///         Completion::ready(Some(id))
///     })
///     .on_select(|nodes| log::info!("{} selected", nodes.len()));
/// ```
pub struct Handlers<T> {
    pub(crate) create: Option<CreateFn<T>>,
    pub(crate) move_: Option<MoveFn<T>>,
    pub(crate) rename: Option<RenameFn<T>>,
    pub(crate) delete: Option<DeleteFn<T>>,
    pub(crate) copy: Option<CopyFn<T>>,
    pub(crate) paste: Option<PasteFn>,
    pub(crate) enter: Option<NodeFn<T>>,
    pub(crate) activate: Option<NodeFn<T>>,
    pub(crate) select: Option<SelectFn<T>>,
    pub(crate) toggle: Option<ToggleFn>,
    pub(crate) focus: Option<NodeFn<T>>,
    pub(crate) scroll: Option<ScrollFn>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            create: None,
            move_: None,
            rename: None,
            delete: None,
            copy: None,
            paste: None,
            enter: None,
            activate: None,
            select: None,
            toggle: None,
            focus: None,
            scroll: None,
        }
    }
}

impl<T> fmt::Debug for Handlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("create", &self.create.is_some())
            .field("move", &self.move_.is_some())
            .field("rename", &self.rename.is_some())
            .field("delete", &self.delete.is_some())
            .field("copy", &self.copy.is_some())
            .field("paste", &self.paste.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> Handlers<T> {
    /// No handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(
        mut self,
        f: impl FnMut(CreateArgs<T>) -> Completion<Option<String>> + 'static,
    ) -> Self {
        self.create = Some(Box::new(f));
        self
    }

    pub fn on_move(mut self, f: impl FnMut(MoveArgs<T>) -> Completion<()> + 'static) -> Self {
        self.move_ = Some(Box::new(f));
        self
    }

    pub fn on_rename(mut self, f: impl FnMut(RenameArgs<T>) -> Completion<()> + 'static) -> Self {
        self.rename = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(DeleteArgs<T>) -> Completion<()> + 'static) -> Self {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_copy(mut self, f: impl FnMut(CopyArgs<T>) -> bool + 'static) -> Self {
        self.copy = Some(Box::new(f));
        self
    }

    pub fn on_paste(mut self, f: impl FnMut(PasteArgs) -> bool + 'static) -> Self {
        self.paste = Some(Box::new(f));
        self
    }

    /// Called when Enter commits the focused row.
    pub fn on_enter(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Called when a row is activated in place.
    pub fn on_activate(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.activate = Some(Box::new(f));
        self
    }

    /// Called with the selected nodes (visible order) after every change.
    pub fn on_select(mut self, f: impl FnMut(&[T]) + 'static) -> Self {
        self.select = Some(Box::new(f));
        self
    }

    /// Called with the id of every node whose open state changed.
    pub fn on_toggle(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.toggle = Some(Box::new(f));
        self
    }

    /// Called when row focus moves.
    pub fn on_focus(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.focus = Some(Box::new(f));
        self
    }

    /// Called when a row should be scrolled into view.
    pub fn on_scroll(mut self, f: impl FnMut(ScrollRequest) + 'static) -> Self {
        self.scroll = Some(Box::new(f));
        self
    }

    /// Whether a create handler is registered.
    pub fn has_create(&self) -> bool {
        self.create.is_some()
    }

    /// Whether a rename handler is registered.
    pub fn has_rename(&self) -> bool {
        self.rename.is_some()
    }
}
