//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use arbor::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TestNode {
    pub id: String,
    pub name: String,
    pub children: Option<Vec<TestNode>>,
}

impl TreeNode for TestNode {
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

pub fn leaf(id: &str) -> TestNode {
    TestNode {
        id: id.to_string(),
        name: id.to_string(),
        children: None,
    }
}

pub fn named(id: &str, name: &str) -> TestNode {
    TestNode {
        id: id.to_string(),
        name: name.to_string(),
        children: None,
    }
}

pub fn folder(id: &str, children: Vec<TestNode>) -> TestNode {
    TestNode {
        id: id.to_string(),
        name: id.to_string(),
        children: Some(children),
    }
}

/// ```text
/// A
/// ├── A1
/// └── A2
///     └── A2a
/// B
/// C
/// └── C1
/// ```
pub fn sample() -> Vec<TestNode> {
    vec![
        folder("A", vec![leaf("A1"), folder("A2", vec![leaf("A2a")])]),
        leaf("B"),
        folder("C", vec![leaf("C1")]),
    ]
}

/// Top-level leaves only.
pub fn flat(ids: &[&str]) -> Vec<TestNode> {
    ids.iter().map(|id| leaf(id)).collect()
}

pub fn visible_ids(tree: &Tree<TestNode>) -> Vec<String> {
    tree.rows().iter().map(|row| row.id().to_string()).collect()
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn key(key: Key) -> KeyCombo {
    KeyCombo::key(key)
}

pub fn ch(c: char) -> KeyCombo {
    KeyCombo::key(Key::Char(c))
}

/// Shared record of handler calls.
pub type Calls<A> = Rc<RefCell<Vec<A>>>;

pub fn calls<A>() -> Calls<A> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A tree that owns keyboard focus with the first row focused.
pub fn focused_tree(nodes: Vec<TestNode>) -> Tree<TestNode> {
    let mut tree = Tree::new(nodes);
    tree.on_focus_gained();
    tree
}
