//! Keyboard dispatch for the Tree controller.

use std::time::Instant;

use log::{debug, trace, warn};

use crate::handlers::{Completion, CopyArgs, CreateArgs, DeleteArgs, PasteArgs};
use crate::keybinds::{Key, KeyAction, KeyCombo};
use crate::node::{NodeKind, TreeNode};
use crate::tree::Tree;
use crate::typeahead::matches_prefix;

/// A host request started by a key press that may resolve later.
#[derive(Debug)]
pub enum Pending {
    /// Resolves to the id of the created node, if the host reports one.
    Create(Completion<Option<String>>),
    Delete(Completion<()>),
}

/// Result of handling a key.
#[derive(Debug)]
pub enum EventResult {
    /// The key was not handled.
    Ignored,
    /// The key was handled.
    Consumed,
    /// The key was handled and started a host request.
    Pending(Pending),
}

impl EventResult {
    /// Whether the key was handled.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

impl<T: TreeNode> Tree<T> {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: &KeyCombo) -> EventResult {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle a key press that happened at `now`.
    ///
    /// `now` drives the type-ahead deadline.
    pub fn handle_key_at(&mut self, key: &KeyCombo, now: Instant) -> EventResult {
        trace!("[{}] Key {}", self.id(), key);

        // The inline editor owns input
        if self.edit.is_active() {
            trace!("[{}] Editing, ignoring key", self.id());
            return EventResult::Ignored;
        }

        if key.key == Key::Escape && self.drag.is_active() {
            debug!("[{}] Drag cancelled", self.id());
            self.drag_end();
            return EventResult::Consumed;
        }

        if !self.handlers.has_create() && !self.warned_missing_create {
            warn!(
                "[{}] No on_create handler registered, create shortcuts are disabled",
                self.id()
            );
            self.warned_missing_create = true;
        }

        let action = self.config.keymap.action_for(key);

        // Global binds
        match action {
            Some(KeyAction::CreateLeaf) => return self.request_create(NodeKind::Leaf),
            Some(KeyAction::CreateInternal) => return self.request_create(NodeKind::Internal),
            Some(KeyAction::Rename) => return self.rename_focused(),
            _ => {}
        }

        if !self.has_focus() {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Home => {
                if let Some(id) = self.first_row().map(|r| r.id().to_string()) {
                    self.focus(&id);
                }
                return EventResult::Consumed;
            }
            Key::End => {
                if let Some(id) = self.last_row().map(|r| r.id().to_string()) {
                    self.focus(&id);
                }
                return EventResult::Consumed;
            }
            _ => {}
        }

        let Some(index) = self.reanchor_focus() else {
            trace!("[{}] No focused row", self.id());
            return EventResult::Ignored;
        };
        let Some(row) = self.rows.at(index) else {
            return EventResult::Ignored;
        };
        let focused = row.id().to_string();
        let is_internal = row.is_internal;
        let is_open = row.is_open;
        let parent = row.parent;

        if key.key == Key::Enter {
            self.select(&focused);
            if let Some(f) = self.handlers.enter.as_mut()
                && let Some(row) = self.rows.at(index)
            {
                f(&row.node);
            }
            return EventResult::Consumed;
        }

        match action {
            Some(KeyAction::Paste) => {
                if let Some(f) = self.handlers.paste.as_mut() {
                    let ok = f(PasteArgs {
                        parent_id: focused.clone(),
                    });
                    debug!("[{}] Paste into {}: {}", self.id(), focused, ok);
                }
                return EventResult::Consumed;
            }
            Some(KeyAction::Copy) => {
                let nodes = self.selected_nodes();
                if !nodes.is_empty()
                    && let Some(f) = self.handlers.copy.as_mut()
                {
                    let ok = f(CopyArgs { nodes });
                    debug!("[{}] Copy: {}", self.id(), ok);
                }
                return EventResult::Consumed;
            }
            Some(KeyAction::Delete) => return self.request_delete(index),
            _ => {}
        }

        match key.key {
            Key::Down if key.modifiers.command() => {
                self.select(&focused);
                if let Some(f) = self.handlers.activate.as_mut()
                    && let Some(row) = self.rows.at(index)
                {
                    f(&row.node);
                }
                return EventResult::Consumed;
            }
            Key::Down => {
                let next = self.rows.after(index).map(|r| r.id().to_string());
                self.step_focus(&focused, next, key.modifiers.shift);
                return EventResult::Consumed;
            }
            Key::Up => {
                let prev = self.rows.before(index).map(|r| r.id().to_string());
                self.step_focus(&focused, prev, key.modifiers.shift);
                return EventResult::Consumed;
            }
            Key::Right => {
                if is_internal && is_open {
                    if let Some(next) = self.rows.after(index).map(|r| r.id().to_string()) {
                        self.focus(&next);
                    }
                } else if is_internal {
                    self.open(&focused);
                }
                return EventResult::Consumed;
            }
            Key::Left => {
                if is_internal && is_open {
                    self.close(&focused);
                } else if let Some(parent_id) = parent
                    .and_then(|p| self.rows.at(p))
                    .map(|r| r.id().to_string())
                {
                    self.focus(&parent_id);
                }
                return EventResult::Consumed;
            }
            _ => {}
        }

        if action == Some(KeyAction::SelectAll) && self.multi_selection() {
            self.select_all();
            return EventResult::Consumed;
        }

        match key.key {
            Key::Space => {
                if is_internal {
                    self.toggle(&focused);
                }
                return EventResult::Consumed;
            }
            Key::Char('*') => {
                self.open_siblings(&focused);
                return EventResult::Consumed;
            }
            _ => {}
        }

        self.type_ahead(key, now)
    }

    /// Move focus one row, extending the selection with Shift.
    fn step_focus(&mut self, focused: &str, target: Option<String>, extend: bool) {
        let Some(target) = target else {
            return;
        };
        if extend && self.multi_selection() {
            if self.is_selected(focused) {
                self.select_contiguous(&target);
            } else {
                self.select_multi(&target);
            }
        }
        self.focus(&target);
    }

    /// Parent for a new node: the focused node if it is a container, else
    /// its parent, else the top level.
    fn create_parent(&self) -> Option<String> {
        let focused = self.focused_id()?;
        let node = self.find(focused)?;
        if node.is_internal() {
            return Some(focused.to_string());
        }
        let parent = self.node_index.parent_id(focused)?;
        self.find(parent)
            .filter(|p| p.is_internal())
            .map(|_| parent.to_string())
    }

    fn request_create(&mut self, kind: NodeKind) -> EventResult {
        if !self.handlers.has_create() {
            return EventResult::Ignored;
        }
        let parent_id = self.create_parent();
        let parent_node = parent_id.as_deref().and_then(|id| self.find(id)).cloned();
        debug!("[{}] Create {:?} under {:?}", self.id(), kind, parent_id);
        let Some(f) = self.handlers.create.as_mut() else {
            return EventResult::Ignored;
        };
        let completion = f(CreateArgs {
            parent_id,
            parent_node,
            index: 0,
            kind,
        });
        EventResult::Pending(Pending::Create(completion))
    }

    fn rename_focused(&mut self) -> EventResult {
        if self.reanchor_focus().is_none() {
            return EventResult::Ignored;
        }
        let Some(focused) = self.focused_id().map(str::to_string) else {
            return EventResult::Ignored;
        };
        if self.selection_len() > 1 {
            self.deselect_all();
        }
        if self.handlers.has_rename() && self.edit(&focused) {
            debug!("[{}] Renaming {}", self.id(), focused);
        }
        EventResult::Consumed
    }

    fn request_delete(&mut self, index: usize) -> EventResult {
        let Some(row) = self.rows.at(index) else {
            return EventResult::Ignored;
        };
        let focused = row.id().to_string();

        let (ids, node_to_focus_after) = if self.is_selected(&focused) {
            (self.selected_ids(), None)
        } else {
            let after = self
                .rows
                .before(index)
                .or_else(|| self.rows.after(index))
                .map(|r| r.node.clone());
            (vec![focused], after)
        };
        let nodes: Vec<T> = ids.iter().filter_map(|id| self.find(id)).cloned().collect();

        debug!("[{}] Delete {} nodes", self.id(), ids.len());
        let Some(f) = self.handlers.delete.as_mut() else {
            return EventResult::Consumed;
        };
        let completion = f(DeleteArgs {
            ids,
            nodes,
            node_to_focus_after,
        });
        EventResult::Pending(Pending::Delete(completion))
    }

    fn type_ahead(&mut self, key: &KeyCombo, now: Instant) -> EventResult {
        if key.modifiers.command() || key.modifiers.alt {
            return EventResult::Ignored;
        }
        let Some(c) = key.key.printable() else {
            return EventResult::Ignored;
        };

        let tree_id = self.id();
        let term = self.typeahead.push(c, now);
        let found = self
            .rows
            .find(|row| row.node.name().is_some_and(|name| matches_prefix(name, term)))
            .map(|row| row.id().to_string());
        trace!("[{}] Type-ahead {:?} -> {:?}", tree_id, term, found);

        if let Some(id) = found {
            self.focus(&id);
        }
        self.mark_dirty();
        EventResult::Consumed
    }
}
