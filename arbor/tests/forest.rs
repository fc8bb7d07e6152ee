mod common;

use arbor::prelude::*;
use common::*;
use futures::executor::block_on;

// =============================================================================
// Replacing the forest
// =============================================================================

#[test]
fn test_set_nodes_prunes_stale_ids() {
    let selections = calls::<Vec<String>>();
    let log = selections.clone();
    let mut tree = Tree::new(flat(&["a", "b", "c"])).with_handlers(Handlers::new().on_select(
        move |nodes: &[TestNode]| log.borrow_mut().push(nodes.iter().map(|n| n.id.clone()).collect()),
    ));
    tree.on_focus_gained();
    tree.select_multi("a");
    tree.select_multi("b");
    tree.focus("b");

    tree.set_nodes(flat(&["a", "c"]));

    assert_eq!(visible_ids(&tree), strings(&["a", "c"]));
    assert_eq!(tree.selected_ids(), strings(&["a"]));
    assert_eq!(tree.most_recent(), Some("a"));
    assert_eq!(tree.focused_id(), None);
    assert_eq!(selections.borrow().last(), Some(&strings(&["a"])));
}

#[test]
fn test_set_nodes_keeps_open_state() {
    let mut tree = Tree::new(sample());
    tree.open("C");

    let mut nodes = sample();
    nodes.remove(0);
    tree.set_nodes(nodes);

    assert_eq!(visible_ids(&tree), strings(&["B", "C", "C1"]));
    assert!(tree.find("A").is_none());
}

#[test]
fn test_set_nodes_cancels_edit_and_drag_of_removed_nodes() {
    let mut tree = Tree::new(flat(&["a", "b"]));
    tree.edit("b");
    tree.set_nodes(flat(&["a"]));
    assert!(!tree.is_editing());

    let mut tree = Tree::new(flat(&["a", "b"]));
    tree.drag_start("b");
    tree.set_nodes(flat(&["a"]));
    assert!(tree.drag_source().is_none());
}

#[test]
fn test_host_applies_create_then_confirms() {
    let mut tree = Tree::new(vec![folder("root", vec![])])
        .with_handlers(Handlers::new().on_create(|_| Completion::ready(Some("child".to_string()))));
    tree.on_focus_gained();
    tree.open("root");

    let EventResult::Pending(Pending::Create(completion)) = tree.handle_key(&ch('n').ctrl())
    else {
        panic!("expected a pending create");
    };
    let new_id = block_on(completion).flatten().unwrap();

    tree.set_nodes(vec![folder("root", vec![leaf(&new_id)])]);
    tree.focus(&new_id);
    assert_eq!(tree.focused_row().map(|r| r.depth), Some(1));
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn test_pending_completion_resolves_later() {
    let (completer, mut completion) = Completion::<u32>::pending();
    assert_eq!(completion.try_take(), None);

    completer.complete(7);
    assert_eq!(block_on(completion), Some(7));
}

#[test]
fn test_dropped_completer_yields_none() {
    let (completer, completion) = Completion::<()>::pending();
    drop(completer);
    assert_eq!(block_on(completion), None);
}

#[test]
fn test_ready_completion_take_once() {
    let mut completion = Completion::ready("x");
    assert_eq!(completion.try_take(), Some("x"));
    assert_eq!(completion.try_take(), None);
}

#[test]
fn test_rename_resolved_by_host_later() {
    let completers = calls::<Completer<()>>();
    let log = completers.clone();
    let mut tree = Tree::new(flat(&["a"])).with_handlers(Handlers::new().on_rename(
        move |_: RenameArgs<TestNode>| {
            let (completer, completion) = Completion::pending();
            log.borrow_mut().push(completer);
            completion
        },
    ));

    assert!(tree.edit("a"));
    let mut completion = tree.submit_edit("alpha").unwrap();
    assert_eq!(completion.try_take(), None);

    let completer = completers.borrow_mut().pop().unwrap();
    completer.complete(());
    assert_eq!(block_on(completion), Some(()));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_dirty_flag() {
    let mut tree = Tree::new(flat(&["a", "b"]));
    assert!(tree.take_dirty());
    assert!(!tree.is_dirty());

    tree.select("a");
    assert!(tree.take_dirty());

    tree.open("missing");
    assert!(!tree.is_dirty());
}

#[test]
fn test_focus_skips_scroll_for_rendered_rows() {
    let scrolls = calls::<ScrollRequest>();
    let log = scrolls.clone();
    let nodes = (0..20).map(|i| leaf(&format!("n{}", i))).collect();
    let mut tree = Tree::new(nodes)
        .with_handlers(Handlers::new().on_scroll(move |req| log.borrow_mut().push(req)));

    tree.items_rendered(0..10);
    assert_eq!(tree.rendered_range(), Some(&(0..10)));

    tree.focus("n3");
    assert!(scrolls.borrow().is_empty());

    tree.focus("n15");
    assert_eq!(scrolls.borrow()[0].index, 15);
    assert_eq!(scrolls.borrow()[0].offset, 360);
}

#[test]
fn test_teardown_releases_transient_state() {
    let mut tree = Tree::new(flat(&["apple", "banana"]));
    tree.on_focus_gained();
    tree.handle_key(&ch('b'));
    tree.drag_start("apple");

    tree.teardown();
    assert!(!tree.has_focus());
    assert!(tree.drag_source().is_none());

    // Buffer was dropped: "a" is a fresh search
    tree.on_focus_gained();
    tree.handle_key(&ch('a'));
    assert_eq!(tree.focused_id(), Some("apple"));
}
