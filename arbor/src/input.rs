//! Convert crossterm key events to arbor key combos.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;

use crate::keybinds::{Key, KeyCombo, Modifiers};

/// Convert crossterm KeyModifiers to arbor Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

/// Convert crossterm KeyCode to arbor Key
fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::F(n) => Some(Key::F(n)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

/// Convert a crossterm KeyEvent to a KeyCombo
pub fn convert_key_event(event: KeyEvent) -> Option<KeyCombo> {
    let key = convert_key(event.code)?;
    Some(KeyCombo::new(key, convert_modifiers(event.modifiers)))
}

/// Extract a key press from a crossterm event.
///
/// Release and repeat events are dropped, as are non-key events.
pub fn convert_event(event: &CrosstermEvent) -> Option<KeyCombo> {
    let CrosstermEvent::Key(key_event) = event else {
        return None;
    };
    trace!(
        "Key event: code={:?}, modifiers={:?}, kind={:?}",
        key_event.code, key_event.modifiers, key_event.kind
    );
    if key_event.kind != KeyEventKind::Press {
        trace!("Ignoring non-press key event");
        return None;
    }
    convert_key_event(*key_event)
}
