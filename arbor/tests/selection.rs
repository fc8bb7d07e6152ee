mod common;

use arbor::prelude::*;
use common::*;

fn counting_tree(nodes: Vec<TestNode>) -> (Tree<TestNode>, Calls<Vec<String>>) {
    let events = calls::<Vec<String>>();
    let log = events.clone();
    let tree = Tree::new(nodes).with_handlers(Handlers::new().on_select(move |nodes: &[TestNode]| {
        log.borrow_mut()
            .push(nodes.iter().map(|n| n.id.clone()).collect());
    }));
    (tree, events)
}

// =============================================================================
// Single and toggle selection
// =============================================================================

#[test]
fn test_select_replaces_selection() {
    let mut tree = Tree::new(flat(&["a", "b", "c"]));
    tree.select("a");
    tree.select("b");

    assert_eq!(tree.selected_ids(), strings(&["b"]));
    assert_eq!(tree.most_recent(), Some("b"));
    assert_eq!(tree.anchor(), None);
}

#[test]
fn test_select_hidden_row_is_noop() {
    let (mut tree, events) = counting_tree(sample());
    tree.select("A1");
    assert!(tree.selected_ids().is_empty());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_select_multi_toggles_membership() {
    let mut tree = Tree::new(flat(&["a", "b", "c"]));
    tree.select("a");
    tree.select_multi("c");
    assert_eq!(tree.selected_ids(), strings(&["a", "c"]));

    tree.select_multi("a");
    assert_eq!(tree.selected_ids(), strings(&["c"]));
    assert_eq!(tree.most_recent(), Some("a"));
}

#[test]
fn test_selected_ids_follow_visible_order() {
    let (mut tree, events) = counting_tree(flat(&["a", "b", "c"]));
    tree.select_multi("c");
    tree.select_multi("a");

    assert_eq!(tree.selected_ids(), strings(&["a", "c"]));
    assert_eq!(events.borrow().last(), Some(&strings(&["a", "c"])));
}

#[test]
fn test_hidden_selection_survives_collapse() {
    let mut tree = Tree::new(sample());
    tree.open("A");
    tree.select("A1");
    tree.close("A");

    assert!(tree.is_selected("A1"));
    assert_eq!(tree.selected_ids(), strings(&["A1"]));
    assert_eq!(tree.selected_nodes()[0].id, "A1");
}

// =============================================================================
// Contiguous selection
// =============================================================================

#[test]
fn test_select_contiguous_from_anchor() {
    let mut tree = Tree::new(sample());
    tree.open_all();
    tree.select("A1");
    tree.select_contiguous("B");

    assert_eq!(tree.selected_ids(), strings(&["A1", "A2", "A2a", "B"]));
    assert_eq!(tree.anchor(), Some("A1"));
    assert_eq!(tree.most_recent(), Some("B"));

    // Moving the far end replaces the range
    tree.select_contiguous("A2");
    assert_eq!(tree.selected_ids(), strings(&["A1", "A2"]));
}

#[test]
fn test_select_contiguous_is_idempotent() {
    let (mut tree, events) = counting_tree(flat(&["a", "b", "c", "d"]));
    tree.select("b");
    tree.select_contiguous("d");
    let first = tree.selected_ids();
    tree.select_contiguous("d");

    assert_eq!(tree.selected_ids(), first);
    assert_eq!(first, strings(&["b", "c", "d"]));
    // select + one effective range change
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_select_contiguous_backwards() {
    let mut tree = Tree::new(flat(&["a", "b", "c", "d"]));
    tree.select("c");
    tree.select_contiguous("a");
    assert_eq!(tree.selected_ids(), strings(&["a", "b", "c"]));
    assert_eq!(tree.anchor(), Some("c"));
}

// =============================================================================
// Select all / deselect
// =============================================================================

#[test]
fn test_select_all_visible() {
    let mut tree = Tree::new(sample());
    tree.open("C");
    tree.select_all();

    assert_eq!(tree.selected_ids(), strings(&["A", "B", "C", "C1"]));
    assert_eq!(tree.anchor(), Some("A"));
    assert_eq!(tree.most_recent(), Some("C1"));
}

#[test]
fn test_deselect_most_recent_moves_marker() {
    let mut tree = Tree::new(flat(&["a", "b", "c"]));
    tree.select_multi("c");
    tree.select_multi("b");
    tree.deselect("b");

    assert_eq!(tree.selected_ids(), strings(&["c"]));
    assert_eq!(tree.most_recent(), Some("c"));
}

#[test]
fn test_deselect_all_clears_markers() {
    let (mut tree, events) = counting_tree(flat(&["a", "b"]));
    tree.select_all();
    tree.deselect_all();

    assert!(tree.selected_ids().is_empty());
    assert_eq!(tree.anchor(), None);
    assert_eq!(tree.most_recent(), None);
    assert_eq!(events.borrow().last(), Some(&Vec::new()));

    // Nothing left to clear: no event
    tree.deselect_all();
    assert_eq!(events.borrow().len(), 2);
}

// =============================================================================
// Single-selection mode
// =============================================================================

#[test]
fn test_multi_selection_disabled() {
    let config = TreeConfig::new().disable_multi_selection(true);
    let mut tree = Tree::with_config(flat(&["a", "b", "c"]), config);

    tree.select("a");
    tree.select_multi("c");
    assert_eq!(tree.selected_ids(), strings(&["c"]));

    tree.select_contiguous("a");
    assert_eq!(tree.selected_ids(), strings(&["a"]));

    tree.select_all();
    assert_eq!(tree.selected_ids(), strings(&["a"]));
}
