mod common;

use arbor::prelude::*;
use common::*;
use futures::executor::block_on;

fn moving_tree(config: TreeConfig<TestNode>) -> (Tree<TestNode>, Calls<MoveArgs<TestNode>>) {
    let moves = calls::<MoveArgs<TestNode>>();
    let log = moves.clone();
    let mut tree = Tree::with_config(sample(), config).with_handlers(Handlers::new().on_move(
        move |args| {
            log.borrow_mut().push(args);
            Completion::done()
        },
    ));
    tree.open("A");
    (tree, moves)
}

// =============================================================================
// Drag start
// =============================================================================

#[test]
fn test_drag_start_takes_selection_when_source_selected() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    tree.select_multi("B");
    tree.select_multi("A1");

    assert!(tree.drag_start("B"));
    assert!(tree.is_dragging("B"));
    assert!(!tree.is_dragging("A1"));
    assert_eq!(tree.drag_items(), strings(&["A1", "B"]).as_slice());

    tree.drag_end();
    assert!(tree.drag_start("C"));
    assert_eq!(tree.drag_items(), strings(&["C"]).as_slice());
}

#[test]
fn test_drag_start_refused() {
    let config = TreeConfig::new().disable_drag(NodePredicate::when(|n: &TestNode| n.id == "B"));
    let (mut tree, _) = moving_tree(config);

    assert!(!tree.drag_start("B"));
    assert!(!tree.drag_start("C1"));
    assert!(!tree.drag_start("missing"));
    assert!(tree.drag_source().is_none());

    let (mut locked, _) = moving_tree(TreeConfig::new().disable_drag(true));
    assert!(!locked.drag_start("A"));
}

// =============================================================================
// Hover target
// =============================================================================

#[test]
fn test_will_receive_drop_only_for_container_itself() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    tree.drag_start("B");

    tree.dragging_over(Some("A"), None);
    assert!(tree.will_receive_drop("A"));
    assert!(!tree.will_receive_drop("C"));
    assert_eq!(
        tree.drop_cursor(),
        Some(&DropCursor::Highlight {
            id: "A".to_string()
        })
    );

    tree.dragging_over(Some("A"), Some(0));
    assert!(!tree.will_receive_drop("A"));
    assert_eq!(tree.drop_target(), (Some("A"), Some(0)));
}

#[test]
fn test_hover_without_drag_is_ignored() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    tree.dragging_over(Some("A"), None);
    assert!(!tree.will_receive_drop("A"));
    assert!(tree.drop_cursor().is_none());
}

#[test]
fn test_line_cursor_positions() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    // Rows: A A1 A2 B C
    tree.drag_start("B");

    tree.dragging_over(Some("A"), Some(0));
    assert_eq!(tree.drop_cursor(), Some(&DropCursor::Line { index: 1, level: 1 }));

    // After the last child of A
    tree.dragging_over(Some("A"), Some(2));
    assert_eq!(tree.drop_cursor(), Some(&DropCursor::Line { index: 3, level: 1 }));

    tree.dragging_over(None, Some(1));
    assert_eq!(tree.drop_cursor(), Some(&DropCursor::Line { index: 3, level: 0 }));

    tree.dragging_over(None, Some(3));
    assert_eq!(tree.drop_cursor(), Some(&DropCursor::Line { index: 5, level: 0 }));

    // Children of a closed container have no line
    tree.dragging_over(Some("C"), Some(0));
    assert!(tree.drop_cursor().is_none());
}

#[test]
fn test_explicit_cursor_control() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    tree.show_cursor(DropCursor::Line { index: 2, level: 0 });
    assert!(tree.drop_cursor().is_some());
    tree.hide_cursor();
    assert!(tree.drop_cursor().is_none());
}

// =============================================================================
// Drop validation
// =============================================================================

#[test]
fn test_can_drop_rules() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    assert!(!tree.can_drop());

    tree.drag_start("B");
    tree.dragging_over(Some("C"), None);
    assert!(tree.can_drop());

    tree.dragging_over(None, Some(0));
    assert!(tree.can_drop());

    // Leaves cannot receive children
    tree.dragging_over(Some("A1"), None);
    assert!(!tree.can_drop());

    tree.drag_end();
    tree.drag_start("A");

    tree.dragging_over(Some("A"), Some(0));
    assert!(!tree.can_drop());

    // Nor can a node move into its own subtree
    tree.dragging_over(Some("A2"), None);
    assert!(!tree.can_drop());
}

#[test]
fn test_disable_drop_predicate() {
    let config = TreeConfig::new().disable_drop(DropPredicate::<TestNode>::when(|check| {
        check.parent_node.is_some_and(|p| p.id == "C")
    }));
    let (mut tree, _) = moving_tree(config);
    tree.drag_start("B");

    tree.dragging_over(Some("C"), None);
    assert!(!tree.can_drop());
    tree.dragging_over(Some("A"), None);
    assert!(tree.can_drop());
}

// =============================================================================
// Drop
// =============================================================================

#[test]
fn test_drop_requests_move_and_clears() {
    let (mut tree, moves) = moving_tree(TreeConfig::new());
    tree.drag_start("B");
    tree.dragging_over(Some("C"), None);

    let completion = tree.drop();
    assert_eq!(completion.map(block_on), Some(Some(())));

    let moves = moves.borrow();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].drag_ids, strings(&["B"]));
    assert_eq!(moves[0].drag_nodes[0].id, "B");
    assert_eq!(moves[0].parent_id.as_deref(), Some("C"));
    assert_eq!(moves[0].parent_node.as_ref().map(|n| n.id.as_str()), Some("C"));
    assert_eq!(moves[0].index, 0);

    assert!(tree.drag_source().is_none());
    assert!(tree.drag_items().is_empty());
    assert!(tree.drop_cursor().is_none());
}

#[test]
fn test_drop_at_index() {
    let (mut tree, moves) = moving_tree(TreeConfig::new());
    tree.drag_start("C");
    tree.dragging_over(Some("A"), Some(1));
    tree.drop();

    assert_eq!(moves.borrow()[0].index, 1);
}

#[test]
fn test_rejected_drop_still_clears() {
    let (mut tree, moves) = moving_tree(TreeConfig::new());
    tree.drag_start("B");
    tree.dragging_over(Some("A1"), None);

    assert!(tree.drop().is_none());
    assert!(moves.borrow().is_empty());
    assert!(tree.drag_source().is_none());
    assert_eq!(tree.drop_target(), (None, None));
}

#[test]
fn test_drag_end_clears_everything() {
    let (mut tree, _) = moving_tree(TreeConfig::new());
    tree.drag_start("B");
    tree.dragging_over(Some("A"), None);

    tree.drag_end();
    assert!(tree.drag_source().is_none());
    assert!(tree.drag_items().is_empty());
    assert_eq!(tree.drop_target(), (None, None));
    assert!(tree.drop_cursor().is_none());
    assert!(!tree.will_receive_drop("A"));
}

#[test]
fn test_drag_end_without_drag_is_noop() {
    let (mut tree, moves) = moving_tree(TreeConfig::new());
    tree.take_dirty();

    tree.drag_end();
    assert!(tree.drag_source().is_none());
    assert!(tree.drop_cursor().is_none());
    assert!(!tree.is_dirty());

    tree.drag_start("B");
    tree.drag_end();
    tree.drag_end();
    assert!(tree.drag_source().is_none());
    assert!(tree.drop_cursor().is_none());
    assert!(moves.borrow().is_empty());
}
