pub mod config;
pub mod dispatch;
pub mod dnd;
pub mod edit;
pub mod focus;
pub mod handlers;
pub mod input;
pub mod keybinds;
pub mod node;
pub mod open;
pub mod rows;
pub mod selection;
pub mod tree;
pub mod typeahead;

pub use dispatch::{EventResult, Pending};
pub use tree::{Tree, TreeId};

pub mod prelude {
    pub use crate::config::{DropCheck, DropPredicate, Layout, NodePredicate, TreeConfig};
    pub use crate::dispatch::{EventResult, Pending};
    pub use crate::dnd::DropCursor;
    pub use crate::edit::EditResult;
    pub use crate::handlers::{
        Completer, Completion, CopyArgs, CreateArgs, DeleteArgs, Handlers, MoveArgs, PasteArgs,
        RenameArgs, RenderedRange, ScrollRequest,
    };
    pub use crate::input::{convert_event, convert_key_event};
    pub use crate::keybinds::{Key, KeyAction, KeyCombo, KeybindError, Keymap, Modifiers};
    pub use crate::node::{NodeKind, TreeNode};
    pub use crate::rows::Row;
    pub use crate::tree::{Tree, TreeId};
}
