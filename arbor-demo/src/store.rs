//! In-memory forest the demo edits in response to tree requests.

use arbor::prelude::*;

#[derive(Debug, Clone)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub children: Option<Vec<Entry>>,
}

impl TreeNode for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// The host side of the tree: owns the data, applies requests.
#[derive(Debug, Default)]
pub struct Store {
    roots: Vec<Entry>,
    next_id: usize,
    changed: bool,
    clipboard: Vec<Entry>,
    /// Row to focus once the next change lands.
    pub focus_after: Option<String>,
}

impl Store {
    pub fn new() -> Self {
        let mut store = Self::default();
        let src = store.insert(None, 0, NodeKind::Internal, "src");
        store.insert(Some(&src), 0, NodeKind::Leaf, "main.rs");
        store.insert(Some(&src), 1, NodeKind::Leaf, "lib.rs");
        let widgets = store.insert(Some(&src), 2, NodeKind::Internal, "widgets");
        store.insert(Some(&widgets), 0, NodeKind::Leaf, "tree.rs");
        store.insert(Some(&widgets), 1, NodeKind::Leaf, "list.rs");
        let docs = store.insert(None, 1, NodeKind::Internal, "docs");
        store.insert(Some(&docs), 0, NodeKind::Leaf, "guide.md");
        store.insert(None, 2, NodeKind::Leaf, "Cargo.toml");
        store.insert(None, 3, NodeKind::Leaf, "README.md");
        store.changed = false;
        store
    }

    pub fn roots(&self) -> &[Entry] {
        &self.roots
    }

    /// Read and reset the change flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("n{}", self.next_id)
    }

    fn children_mut(&mut self, parent: Option<&str>) -> Option<&mut Vec<Entry>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => find_mut(&mut self.roots, id)?.children.as_mut(),
        }
    }

    /// Insert a new node and return its id.
    pub fn insert(&mut self, parent: Option<&str>, index: usize, kind: NodeKind, name: &str) -> String {
        let id = self.fresh_id();
        let entry = Entry {
            id: id.clone(),
            name: name.to_string(),
            children: match kind {
                NodeKind::Internal => Some(Vec::new()),
                NodeKind::Leaf => None,
            },
        };
        if let Some(siblings) = self.children_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, entry);
            self.changed = true;
        }
        id
    }

    pub fn rename(&mut self, id: &str, name: &str) {
        if let Some(entry) = find_mut(&mut self.roots, id) {
            entry.name = name.to_string();
            self.changed = true;
        }
    }

    pub fn remove(&mut self, ids: &[String]) {
        let mut removed = Vec::new();
        take(&mut self.roots, ids, &mut removed);
        self.changed |= !removed.is_empty();
    }

    /// Move nodes under `parent` at `index`.
    pub fn move_to(&mut self, ids: &[String], parent: Option<&str>, index: usize) {
        // Removing earlier siblings shifts the insertion point
        let shift = self
            .children_mut(parent)
            .map(|siblings| siblings.iter().take(index).filter(|e| ids.contains(&e.id)).count())
            .unwrap_or(0);

        let mut moved = Vec::new();
        take(&mut self.roots, ids, &mut moved);
        match self.children_mut(parent) {
            Some(siblings) => {
                let at = index.saturating_sub(shift).min(siblings.len());
                siblings.splice(at..at, moved);
                self.changed = true;
            }
            // Target vanished with the moved nodes: put them back at the top
            None => self.roots.extend(moved),
        }
    }

    pub fn copy(&mut self, nodes: &[Entry]) {
        self.clipboard = nodes.to_vec();
    }

    /// Insert copies of the clipboard into `parent`.
    pub fn paste(&mut self, parent: &str) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        let mut copies = self.clipboard.clone();
        for copy in &mut copies {
            self.relabel(copy);
        }
        match self.children_mut(Some(parent)) {
            Some(siblings) => {
                siblings.extend(copies);
                self.changed = true;
                true
            }
            None => false,
        }
    }

    fn relabel(&mut self, entry: &mut Entry) {
        entry.id = self.fresh_id();
        if let Some(children) = entry.children.as_mut() {
            for child in children {
                self.relabel(child);
            }
        }
    }
}

fn find_mut<'a>(items: &'a mut [Entry], id: &str) -> Option<&'a mut Entry> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(children) = item.children.as_mut()
            && let Some(found) = find_mut(children, id)
        {
            return Some(found);
        }
    }
    None
}

fn take(items: &mut Vec<Entry>, ids: &[String], out: &mut Vec<Entry>) {
    let mut i = 0;
    while i < items.len() {
        if ids.contains(&items[i].id) {
            out.push(items.remove(i));
            continue;
        }
        if let Some(children) = items[i].children.as_mut() {
            take(children, ids, out);
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_move_within_parent() {
        let mut store = Store::new();
        let cargo = store.roots()[2].id.clone();
        store.move_to(&[cargo], None, 0);
        assert_eq!(names(store.roots()), vec!["Cargo.toml", "src", "docs", "README.md"]);
    }

    #[test]
    fn test_paste_assigns_fresh_ids() {
        let mut store = Store::new();
        let docs = store.roots()[1].clone();
        store.copy(std::slice::from_ref(&docs));
        assert!(store.paste(&docs.id));

        let pasted = &store.roots()[1].children.as_ref().unwrap()[1];
        assert_eq!(pasted.name, "docs");
        assert_ne!(pasted.id, docs.id);
    }
}
