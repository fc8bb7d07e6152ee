//! Keys, key combinations and the configurable tree keymap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
    /// Meta/Super/Command key held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl or Meta. Shortcuts treat the two as the same "command" key.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    /// Function keys F1-F12
    F(u8),
    /// Enter/Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Space
    Space,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Insert
    Insert,
    /// Delete
    Delete,
}

impl Key {
    /// The character this key types, if any.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            Key::Space => Some(' '),
            _ => None,
        }
    }

    fn same_as(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }

    fn name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::F(n) => format!("f{}", n),
            Key::Enter => "enter".into(),
            Key::Escape => "esc".into(),
            Key::Backspace => "backspace".into(),
            Key::Tab => "tab".into(),
            Key::Space => "space".into(),
            Key::Up => "up".into(),
            Key::Down => "down".into(),
            Key::Left => "left".into(),
            Key::Right => "right".into(),
            Key::Home => "home".into(),
            Key::End => "end".into(),
            Key::PageUp => "pageup".into(),
            Key::PageDown => "pagedown".into(),
            Key::Insert => "insert".into(),
            Key::Delete => "delete".into(),
        }
    }
}

/// Errors produced while parsing key strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindError {
    /// The key string was empty.
    #[error("Empty key string")]
    Empty,
    /// A modifier prefix was not recognized.
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),
    /// The key part was not recognized.
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Add alt modifier
    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    /// Add meta modifier
    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Whether a pressed key satisfies this binding.
    ///
    /// Ctrl and Meta are interchangeable and letters match regardless of
    /// case (terminals report `ctrl+shift+n` as an uppercase `N`).
    pub fn matches(&self, pressed: &KeyCombo) -> bool {
        self.key.same_as(&pressed.key)
            && self.modifiers.command() == pressed.modifiers.command()
            && self.modifiers.shift == pressed.modifiers.shift
            && self.modifiers.alt == pressed.modifiers.alt
    }
}

/// Parse a single key name like "enter", "f5" or "n".
fn parse_single_key(s: &str) -> Result<Key, KeybindError> {
    let lower = s.to_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => Key::Enter,
        "escape" | "esc" => Key::Escape,
        "backspace" => Key::Backspace,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "insert" | "ins" => Key::Insert,
        "delete" | "del" => Key::Delete,
        _ => {
            if let Some(n) = lower.strip_prefix('f')
                && let Ok(n) = n.parse::<u8>()
                && (1..=12).contains(&n)
            {
                return Ok(Key::F(n));
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                _ => return Err(KeybindError::UnknownKey(s.to_string())),
            }
        }
    };
    Ok(key)
}

impl FromStr for KeyCombo {
    type Err = KeybindError;

    /// Parse a key string like "ctrl+shift+n" or "delete".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeybindError::Empty);
        }

        // A trailing '+' is the plus key itself ("ctrl++")
        let (prefix, key_part) = match s.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if s == "+" => (None, "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, s),
            },
        };

        let mut modifiers = Modifiers::NONE;
        if let Some(prefix) = prefix {
            for part in prefix.split('+') {
                match part.trim().to_lowercase().as_str() {
                    "ctrl" | "control" => modifiers.ctrl = true,
                    "shift" => modifiers.shift = true,
                    "alt" | "option" => modifiers.alt = true,
                    "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                    other => return Err(KeybindError::UnknownModifier(other.to_string())),
                }
            }
        }

        let key = parse_single_key(key_part.trim())?;
        Ok(Self::new(key, modifiers))
    }
}

impl TryFrom<String> for KeyCombo {
    type Error = KeybindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        for (held, name) in [
            (m.ctrl, "ctrl"),
            (m.meta, "meta"),
            (m.alt, "alt"),
            (m.shift, "shift"),
        ] {
            if held {
                write!(f, "{}+", name)?;
            }
        }
        write!(f, "{}", self.key.name())
    }
}

impl From<KeyCombo> for String {
    fn from(combo: KeyCombo) -> Self {
        combo.to_string()
    }
}

/// Shortcut actions that can be rebound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Request a new leaf node.
    CreateLeaf,
    /// Request a new internal node.
    CreateInternal,
    /// Enter rename mode on the focused row.
    Rename,
    /// Copy the selected nodes.
    Copy,
    /// Paste into the focused row.
    Paste,
    /// Delete the selection or the focused row.
    Delete,
    /// Select every visible row.
    SelectAll,
}

/// Configurable shortcut bindings.
///
/// Each action accepts several combos. Deserializes from key strings:
///
/// ```ignore
/// { "create_leaf": ["ctrl+n"], "delete": ["ctrl+backspace", "delete"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub create_leaf: Vec<KeyCombo>,
    pub create_internal: Vec<KeyCombo>,
    pub rename: Vec<KeyCombo>,
    pub copy: Vec<KeyCombo>,
    pub paste: Vec<KeyCombo>,
    pub delete: Vec<KeyCombo>,
    pub select_all: Vec<KeyCombo>,
}

impl Default for Keymap {
    fn default() -> Self {
        let command = |c| KeyCombo::key(Key::Char(c)).ctrl();
        Self {
            create_leaf: vec![command('n')],
            create_internal: vec![command('n').shift()],
            rename: vec![command('r')],
            copy: vec![command('c')],
            paste: vec![command('v')],
            delete: vec![KeyCombo::key(Key::Backspace).ctrl(), KeyCombo::key(Key::Delete)],
            select_all: vec![command('a')],
        }
    }
}

impl Keymap {
    /// Create the default keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Keymap with no shortcuts bound
    pub fn empty() -> Self {
        Self {
            create_leaf: Vec::new(),
            create_internal: Vec::new(),
            rename: Vec::new(),
            copy: Vec::new(),
            paste: Vec::new(),
            delete: Vec::new(),
            select_all: Vec::new(),
        }
    }

    fn slot(&mut self, action: KeyAction) -> &mut Vec<KeyCombo> {
        match action {
            KeyAction::CreateLeaf => &mut self.create_leaf,
            KeyAction::CreateInternal => &mut self.create_internal,
            KeyAction::Rename => &mut self.rename,
            KeyAction::Copy => &mut self.copy,
            KeyAction::Paste => &mut self.paste,
            KeyAction::Delete => &mut self.delete,
            KeyAction::SelectAll => &mut self.select_all,
        }
    }

    /// Add a binding for an action
    pub fn bind(&mut self, action: KeyAction, combo: KeyCombo) {
        self.slot(action).push(combo);
    }

    /// Replace all bindings of an action with the given key strings
    pub fn rebind(&mut self, action: KeyAction, keys: &[&str]) -> Result<(), KeybindError> {
        let combos = keys
            .iter()
            .map(|k| k.parse())
            .collect::<Result<Vec<KeyCombo>, _>>()?;
        *self.slot(action) = combos;
        Ok(())
    }

    /// Find the action bound to a pressed key.
    ///
    /// Actions are checked in a fixed order; `CreateInternal` is checked
    /// before `CreateLeaf` so the shifted variant wins when both match.
    pub fn action_for(&self, pressed: &KeyCombo) -> Option<KeyAction> {
        let table = [
            (KeyAction::CreateInternal, &self.create_internal),
            (KeyAction::CreateLeaf, &self.create_leaf),
            (KeyAction::Rename, &self.rename),
            (KeyAction::Copy, &self.copy),
            (KeyAction::Paste, &self.paste),
            (KeyAction::Delete, &self.delete),
            (KeyAction::SelectAll, &self.select_all),
        ];
        table
            .into_iter()
            .find(|(_, combos)| combos.iter().any(|c| c.matches(pressed)))
            .map(|(action, _)| action)
    }
}
