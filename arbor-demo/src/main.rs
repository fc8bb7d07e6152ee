mod store;
mod terminal;

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::rc::Rc;

use arbor::prelude::*;
use crossterm::event::{self, Event as CrosstermEvent};
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use store::{Entry, Store};
use terminal::{Line, TerminalGuard};

const HELP: &str = "arrows/home/end move  space toggle  ctrl+n new  ctrl+shift+n folder  \
                    ctrl+r rename  del delete  ctrl+c/v copy/paste  f2 drag  f3 drop  ctrl+q quit";

type SharedScroll = Rc<RefCell<Option<ScrollRequest>>>;

/// Wire the tree's requests to the store.
fn handlers(store: &Rc<RefCell<Store>>, scroll: &SharedScroll) -> Handlers<Entry> {
    let creates = Rc::clone(store);
    let renames = Rc::clone(store);
    let deletes = Rc::clone(store);
    let moves = Rc::clone(store);
    let copies = Rc::clone(store);
    let pastes = Rc::clone(store);
    let scroll = Rc::clone(scroll);

    Handlers::<Entry>::new()
        .on_create(move |args| {
            let name = match args.kind {
                NodeKind::Internal => "new folder",
                NodeKind::Leaf => "new file",
            };
            let id = creates
                .borrow_mut()
                .insert(args.parent_id.as_deref(), args.index, args.kind, name);
            Completion::ready(Some(id))
        })
        .on_rename(move |args| {
            renames.borrow_mut().rename(&args.id, &args.name);
            Completion::done()
        })
        .on_delete(move |args| {
            let mut store = deletes.borrow_mut();
            store.remove(&args.ids);
            store.focus_after = args.node_to_focus_after.map(|node| node.id);
            Completion::done()
        })
        .on_move(move |args| {
            moves
                .borrow_mut()
                .move_to(&args.drag_ids, args.parent_id.as_deref(), args.index);
            Completion::done()
        })
        .on_copy(move |args| {
            copies.borrow_mut().copy(&args.nodes);
            true
        })
        .on_paste(move |args| pastes.borrow_mut().paste(&args.parent_id))
        .on_scroll(move |request| *scroll.borrow_mut() = Some(request))
        .on_enter(|node| info!("Opened {}", node.name))
        .on_activate(|node| info!("Activated {}", node.name))
        .on_toggle(|id| debug!("Toggled {}", id))
        .on_focus(|node| debug!("Focused {}", node.name))
}

struct Demo {
    tree: Tree<Entry>,
    store: Rc<RefCell<Store>>,
    scroll: SharedScroll,
    /// First visible row on screen.
    top: usize,
    edit_buffer: String,
    status: String,
    redraw: bool,
}

impl Demo {
    fn new() -> Self {
        let store = Rc::new(RefCell::new(Store::new()));
        let scroll = SharedScroll::default();
        let layout = Layout {
            row_height: 1,
            indent: 2,
            ..Layout::default()
        };
        let roots = store.borrow().roots().to_vec();
        let mut tree = Tree::with_config(roots, TreeConfig::new().layout(layout))
            .with_handlers(handlers(&store, &scroll));
        if let Some(first) = tree.first_row().map(|row| row.id().to_string()) {
            tree.open(&first);
        }
        tree.on_focus_gained();

        Self {
            tree,
            store,
            scroll,
            top: 0,
            edit_buffer: String::new(),
            status: String::new(),
            redraw: true,
        }
    }

    /// Push store changes back into the tree.
    fn sync(&mut self) {
        let (roots, focus_after) = {
            let mut store = self.store.borrow_mut();
            if !store.take_changed() {
                return;
            }
            (store.roots().to_vec(), store.focus_after.take())
        };
        self.tree.set_nodes(roots);
        if let Some(id) = focus_after {
            self.tree.focus(&id);
        }
    }

    /// Handle one key. Returns false to quit.
    fn handle(&mut self, key: KeyCombo) -> bool {
        if key.key == Key::Char('q') && key.modifiers.command() {
            return false;
        }

        if self.tree.is_editing() {
            self.edit_key(&key);
            self.sync();
            return true;
        }

        match key.key {
            Key::F(2) => self.start_drag(),
            Key::F(3) => self.drop_on_focused(),
            _ => self.dispatch(&key),
        }
        self.sync();
        true
    }

    fn dispatch(&mut self, key: &KeyCombo) {
        match self.tree.handle_key(key) {
            EventResult::Pending(Pending::Create(mut completion)) => {
                let Some(Some(id)) = completion.try_take() else {
                    return;
                };
                self.sync();
                self.tree.scroll_to(&id);
                self.tree.focus(&id);
                self.begin_edit(&id);
            }
            EventResult::Pending(Pending::Delete(_)) => {
                self.status = "Deleted".to_string();
                self.redraw = true;
            }
            EventResult::Consumed => {
                if let Some(id) = self.tree.editing_id().map(str::to_string) {
                    self.begin_edit(&id);
                }
            }
            EventResult::Ignored => {}
        }
    }

    fn begin_edit(&mut self, id: &str) {
        if !self.tree.is_editing() && !self.tree.edit(id) {
            return;
        }
        self.edit_buffer = self
            .tree
            .find(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_default();
        self.redraw = true;
    }

    fn edit_key(&mut self, key: &KeyCombo) {
        match key.key {
            Key::Enter => {
                let name = std::mem::take(&mut self.edit_buffer);
                self.tree.end_edit(EditResult::Submitted(name));
            }
            Key::Escape => {
                self.tree.end_edit(EditResult::Cancelled);
            }
            Key::Backspace => {
                self.edit_buffer.pop();
            }
            _ => {
                if let Some(c) = key.key.printable() {
                    self.edit_buffer.push(c);
                }
            }
        }
        self.redraw = true;
    }

    fn start_drag(&mut self) {
        let Some(id) = self.tree.focused_id().map(str::to_string) else {
            return;
        };
        self.status = if self.tree.drag_start(&id) {
            format!("Dragging {} item(s), f3 drops on the focused folder", self.tree.drag_items().len())
        } else {
            "Cannot drag here".to_string()
        };
        self.redraw = true;
    }

    fn drop_on_focused(&mut self) {
        let Some(row) = self.tree.focused_row() else {
            return;
        };
        let target = if row.is_internal {
            Some(row.id().to_string())
        } else {
            self.tree.parent_row(row.id()).map(|parent| parent.id().to_string())
        };
        self.tree.dragging_over(target.as_deref(), None);
        self.status = match self.tree.drop() {
            Some(_) => "Moved".to_string(),
            None => "Drop rejected".to_string(),
        };
        self.redraw = true;
    }

    fn render(&mut self, guard: &mut TerminalGuard) -> io::Result<()> {
        let (width, height) = guard.size()?;
        let view = usize::from(height.saturating_sub(2)).max(1);

        if let Some(request) = self.scroll.borrow_mut().take() {
            if request.index < self.top {
                self.top = request.index;
            } else if request.index >= self.top + view {
                self.top = request.index + 1 - view;
            }
        }
        self.top = self.top.min(self.tree.visible_len().saturating_sub(1));
        let end = (self.top + view).min(self.tree.visible_len());
        self.tree.items_rendered(self.top..end);

        let clip = |text: String| text.chars().take(usize::from(width)).collect::<String>();
        let mut lines = vec![Line {
            text: clip(HELP.to_string()),
            bold: true,
            ..Line::default()
        }];

        let layout = *self.tree.layout();
        for row in &self.tree.rows()[self.top..end] {
            let id = row.id();
            let indent = " ".repeat(layout.indent_for(row.depth) as usize);
            let marker = match (row.is_internal, row.is_open) {
                (true, true) => "v ",
                (true, false) => "> ",
                (false, _) => "  ",
            };
            let name = if self.tree.editing_id() == Some(id) {
                format!("[{}_]", self.edit_buffer)
            } else {
                row.node.name.clone()
            };
            let mut text = format!("{}{}{}", indent, marker, name);
            if self.tree.is_dragging(id) {
                text.push_str("  (dragging)");
            }
            lines.push(Line {
                text: clip(text),
                reverse: self.tree.is_focused(id),
                bold: self.tree.is_selected(id),
            });
        }

        while lines.len() < view + 1 {
            lines.push(Line::default());
        }
        lines.push(Line::plain(clip(self.status.clone())));
        guard.draw(&lines)
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("arbor-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut guard = TerminalGuard::new()?;
    let mut demo = Demo::new();

    loop {
        if demo.tree.take_dirty() || std::mem::take(&mut demo.redraw) {
            demo.render(&mut guard)?;
        }

        let event = event::read()?;
        if let CrosstermEvent::Resize(..) = event {
            demo.redraw = true;
            continue;
        }
        let Some(key) = convert_event(&event) else {
            continue;
        };
        if !demo.handle(key) {
            break;
        }
    }

    demo.tree.teardown();
    info!("Bye");
    Ok(())
}
