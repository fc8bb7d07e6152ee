use arbor::prelude::*;

// =============================================================================
// Key string parsing
// =============================================================================

#[test]
fn test_parse_modifiers() {
    let combo: KeyCombo = "ctrl+shift+n".parse().unwrap();
    assert_eq!(combo.key, Key::Char('n'));
    assert!(combo.modifiers.ctrl);
    assert!(combo.modifiers.shift);
    assert!(!combo.modifiers.meta);

    let combo: KeyCombo = "Cmd+Backspace".parse().unwrap();
    assert_eq!(combo.key, Key::Backspace);
    assert!(combo.modifiers.meta);
}

#[test]
fn test_parse_named_keys() {
    assert_eq!("delete".parse::<KeyCombo>().unwrap().key, Key::Delete);
    assert_eq!("f5".parse::<KeyCombo>().unwrap().key, Key::F(5));
    assert_eq!("space".parse::<KeyCombo>().unwrap().key, Key::Space);
    assert_eq!("*".parse::<KeyCombo>().unwrap().key, Key::Char('*'));
}

#[test]
fn test_parse_plus_key() {
    let combo: KeyCombo = "ctrl++".parse().unwrap();
    assert_eq!(combo.key, Key::Char('+'));
    assert!(combo.modifiers.ctrl);
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<KeyCombo>(), Err(KeybindError::Empty));
    assert_eq!(
        "hyper+x".parse::<KeyCombo>(),
        Err(KeybindError::UnknownModifier("hyper".to_string()))
    );
    assert_eq!(
        "ctrl+banana".parse::<KeyCombo>(),
        Err(KeybindError::UnknownKey("banana".to_string()))
    );
}

#[test]
fn test_display_parses_back() {
    for s in ["ctrl+shift+n", "meta+backspace", "delete", "ctrl++", "f12"] {
        let combo: KeyCombo = s.parse().unwrap();
        assert_eq!(combo.to_string().parse::<KeyCombo>(), Ok(combo));
    }
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_ctrl_and_meta_are_interchangeable() {
    let binding: KeyCombo = "ctrl+n".parse().unwrap();
    assert!(binding.matches(&KeyCombo::key(Key::Char('n')).meta()));
    assert!(binding.matches(&KeyCombo::key(Key::Char('n')).ctrl()));
    assert!(!binding.matches(&KeyCombo::key(Key::Char('n'))));
    assert!(!binding.matches(&KeyCombo::key(Key::Char('n')).ctrl().shift()));
}

#[test]
fn test_shifted_letters_match_lowercase_binding() {
    let binding: KeyCombo = "ctrl+shift+n".parse().unwrap();
    assert!(binding.matches(&KeyCombo::key(Key::Char('N')).ctrl().shift()));
}

#[test]
fn test_default_keymap_actions() {
    let keymap = Keymap::default();
    let action = |s: &str| keymap.action_for(&s.parse().unwrap());

    assert_eq!(action("ctrl+n"), Some(KeyAction::CreateLeaf));
    assert_eq!(action("meta+shift+n"), Some(KeyAction::CreateInternal));
    assert_eq!(action("ctrl+r"), Some(KeyAction::Rename));
    assert_eq!(action("ctrl+c"), Some(KeyAction::Copy));
    assert_eq!(action("ctrl+v"), Some(KeyAction::Paste));
    assert_eq!(action("ctrl+backspace"), Some(KeyAction::Delete));
    assert_eq!(action("delete"), Some(KeyAction::Delete));
    assert_eq!(action("ctrl+a"), Some(KeyAction::SelectAll));
    assert_eq!(action("a"), None);
}

#[test]
fn test_rebind() {
    let mut keymap = Keymap::default();
    keymap.rebind(KeyAction::Rename, &["f2"]).unwrap();

    assert_eq!(keymap.action_for(&KeyCombo::key(Key::F(2))), Some(KeyAction::Rename));
    assert_eq!(keymap.action_for(&"ctrl+r".parse().unwrap()), None);

    let err = keymap.rebind(KeyAction::Copy, &["ctrl+c", "nope+c"]);
    assert_eq!(err, Err(KeybindError::UnknownModifier("nope".to_string())));
    // A failed rebind leaves the old bindings alone
    assert_eq!(keymap.action_for(&"ctrl+c".parse().unwrap()), Some(KeyAction::Copy));
}

#[test]
fn test_rebound_key_drives_dispatch() {
    #[derive(Debug, Clone)]
    struct Item(&'static str);

    impl TreeNode for Item {
        fn id(&self) -> &str {
            self.0
        }

        fn children(&self) -> Option<&[Self]> {
            None
        }
    }

    let mut keymap = Keymap::empty();
    keymap.bind(KeyAction::SelectAll, KeyCombo::key(Key::Char('!')));
    let mut tree = Tree::with_config(vec![Item("x"), Item("y")], TreeConfig::new().keymap(keymap));
    tree.on_focus_gained();

    tree.handle_key(&KeyCombo::key(Key::Char('a')).ctrl());
    assert_eq!(tree.selection_len(), 0);

    tree.handle_key(&KeyCombo::key(Key::Char('!')));
    assert_eq!(tree.selection_len(), 2);
}

// =============================================================================
// Configuration files
// =============================================================================

#[test]
fn test_keymap_from_json() {
    let keymap: Keymap = serde_json::from_str(
        r#"{ "rename": ["f2"], "delete": ["delete", "ctrl+d"] }"#,
    )
    .unwrap();

    assert_eq!(keymap.action_for(&KeyCombo::key(Key::F(2))), Some(KeyAction::Rename));
    assert_eq!(
        keymap.action_for(&KeyCombo::key(Key::Char('d')).meta()),
        Some(KeyAction::Delete)
    );
    // Missing actions keep their defaults
    assert_eq!(keymap.create_leaf, Keymap::default().create_leaf);
}

#[test]
fn test_keymap_rejects_bad_key_string() {
    let result: Result<Keymap, _> = serde_json::from_str(r#"{ "copy": ["hyper+c"] }"#);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Unknown modifier 'hyper'"), "{}", err);
}

#[test]
fn test_keymap_serializes_to_strings() {
    let json = serde_json::to_value(Keymap::default()).unwrap();
    assert_eq!(json["create_internal"][0], "ctrl+shift+n");
    assert_eq!(json["delete"][1], "delete");
}

#[test]
fn test_layout_from_json() {
    let layout: Layout =
        serde_json::from_str(r#"{ "row_height": 1, "indent": 2, "padding": 3 }"#).unwrap();
    assert_eq!(layout.row_height, 1);
    assert_eq!(layout.indent, 2);
    assert_eq!(layout.top(), 3);
    assert_eq!(layout.width, 300);
    assert_eq!(layout.overscan_count, 1);
}
