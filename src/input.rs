//! Logical input
//!
//! The simulation reads a per-tick snapshot of logical actions. Physical
//! key names are mapped to actions by `KeyBindings`; `KeyboardState` tracks
//! held keys plus the keys that went down since the last tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Start,
}

/// Name-entry keystrokes (high-score initials)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Char(char),
    Backspace,
    Confirm,
}

/// What the simulation may ask of input during one tick
pub trait InputSnapshot {
    /// Action currently held
    fn is_down(&self, action: Action) -> bool;
    /// Action went from up to down since the previous tick
    fn pressed(&self, action: Action) -> bool;
    /// Name-entry keystrokes received since the previous tick
    fn text(&self) -> &[TextKey] {
        &[]
    }
}

/// Physical key names per logical action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
    pub start: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            left: keys(&["ArrowLeft", "a", "A"]),
            right: keys(&["ArrowRight", "d", "D"]),
            jump: keys(&[" ", "Space"]),
            start: keys(&["Enter"]),
        }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> &[String] {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
            Action::Start => &self.start,
        }
    }
}

/// Keyboard state fed by key events, read once per tick
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    down: HashSet<String>,
    pressed: HashSet<String>,
    text: Vec<TextKey>,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if !self.down.contains(key) {
            self.pressed.insert(key.to_string());
            if let Some(text) = text_key_for(key) {
                self.text.push(text);
            }
        }
        self.down.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.down.remove(key);
    }

    /// Drop edge-triggered state; call once after each simulated tick
    pub fn end_tick(&mut self) {
        self.pressed.clear();
        self.text.clear();
    }

    fn any(&self, set: &HashSet<String>, action: Action) -> bool {
        self.bindings
            .keys_for(action)
            .iter()
            .any(|k| set.contains(k))
    }
}

impl InputSnapshot for KeyboardState {
    fn is_down(&self, action: Action) -> bool {
        self.any(&self.down, action)
    }

    fn pressed(&self, action: Action) -> bool {
        self.any(&self.pressed, action)
    }

    fn text(&self) -> &[TextKey] {
        &self.text
    }
}

fn text_key_for(key: &str) -> Option<TextKey> {
    match key {
        "Backspace" => Some(TextKey::Backspace),
        "Enter" => Some(TextKey::Confirm),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Some(TextKey::Char(c)),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_edge_triggered() {
        let mut kb = KeyboardState::default();
        kb.key_down("Space");
        assert!(kb.pressed(Action::Jump));
        assert!(kb.is_down(Action::Jump));
        kb.end_tick();
        kb.key_down("Space"); // auto-repeat
        assert!(!kb.pressed(Action::Jump));
        assert!(kb.is_down(Action::Jump));
        kb.key_up("Space");
        assert!(!kb.is_down(Action::Jump));
    }

    #[test]
    fn test_any_bound_key_counts() {
        let mut kb = KeyboardState::default();
        kb.key_down("a");
        assert!(kb.is_down(Action::Left));
        assert!(!kb.is_down(Action::Right));
    }

    #[test]
    fn test_text_keys() {
        let mut kb = KeyboardState::default();
        kb.key_down("x");
        kb.key_down("Backspace");
        kb.key_down("Enter");
        kb.key_down("ArrowLeft");
        assert_eq!(
            kb.text(),
            &[TextKey::Char('x'), TextKey::Backspace, TextKey::Confirm]
        );
        kb.end_tick();
        assert!(kb.text().is_empty());
    }
}
