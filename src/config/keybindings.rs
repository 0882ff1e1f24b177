//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Bindings are keyed on code and modifiers only, so key-release state
/// flags reported by some terminals do not affect the lookup. Shift is
/// ignored for character keys because the character already carries it.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key.code, key.modifiers)).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(normalize(code, modifiers), action);
    }
}

fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(_) | KeyCode::BackTab => (code, modifiers - KeyModifiers::SHIFT),
        _ => (code, modifiers),
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyAction::*;
        const NONE: KeyModifiers = KeyModifiers::NONE;
        const SHIFT: KeyModifiers = KeyModifiers::SHIFT;
        const CTRL: KeyModifiers = KeyModifiers::CONTROL;

        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Item navigation
        keys.bind(KeyCode::Char('j'), NONE, NextItem);
        keys.bind(KeyCode::Down, NONE, NextItem);
        keys.bind(KeyCode::Char('k'), NONE, PrevItem);
        keys.bind(KeyCode::Up, NONE, PrevItem);
        keys.bind(KeyCode::Enter, NONE, Select);

        // Focus
        keys.bind(KeyCode::Tab, NONE, NextPane);
        keys.bind(KeyCode::BackTab, SHIFT, PrevPane);

        // Viewport
        keys.bind(KeyCode::Char('K'), NONE, ScrollUp);
        keys.bind(KeyCode::Up, SHIFT, ScrollUp);
        keys.bind(KeyCode::Char('J'), NONE, ScrollDown);
        keys.bind(KeyCode::Down, SHIFT, ScrollDown);
        keys.bind(KeyCode::Char('u'), NONE, HalfPageUp);
        keys.bind(KeyCode::Char('u'), CTRL, HalfPageUp);
        keys.bind(KeyCode::Char('d'), NONE, HalfPageDown);
        keys.bind(KeyCode::Char('d'), CTRL, HalfPageDown);
        keys.bind(KeyCode::Char('b'), NONE, PageUp);
        keys.bind(KeyCode::PageUp, NONE, PageUp);
        keys.bind(KeyCode::Char('f'), NONE, PageDown);
        keys.bind(KeyCode::PageDown, NONE, PageDown);
        keys.bind(KeyCode::Char('g'), NONE, ScrollToTop);
        keys.bind(KeyCode::Home, NONE, ScrollToTop);
        keys.bind(KeyCode::Char('G'), NONE, ScrollToBottom);
        keys.bind(KeyCode::End, NONE, ScrollToBottom);

        // Messages
        keys.bind(KeyCode::Char(' '), NONE, ToggleCollapse);
        keys.bind(KeyCode::Char('C'), NONE, ToggleCollapseAll);
        keys.bind(KeyCode::Char('c'), NONE, Copy);

        // Data
        keys.bind(KeyCode::Char('L'), NONE, LoadMore);
        keys.bind(KeyCode::Char('R'), NONE, Reload);
        keys.bind(KeyCode::Char('/'), NONE, StartFilter);

        // Application controls
        keys.bind(KeyCode::Char('?'), NONE, Help);
        keys.bind(KeyCode::Char('q'), NONE, Quit);
        keys.bind(KeyCode::Esc, NONE, Quit);
        keys.bind(KeyCode::Char('c'), CTRL, Quit);

        keys
    }
}
