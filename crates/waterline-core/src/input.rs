use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Logical input actions the runtime polls each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Reserved viewport action; the session polls it but takes no
    /// gameplay effect from it.
    Resize,
}

/// Current boolean state of the logical actions, polled once per tick.
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Maps stable device key codes (e.g. `"ArrowLeft"`, `"Space"`) to
/// logical actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    map: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("ArrowLeft".to_string(), Action::MoveLeft);
        map.insert("ArrowRight".to_string(), Action::MoveRight);
        map.insert("Space".to_string(), Action::Jump);
        map.insert("KeyR".to_string(), Action::Resize);
        Self { map }
    }
}

impl KeyBindings {
    pub fn bind(&mut self, code: impl Into<String>, action: Action) {
        self.map.insert(code.into(), action);
    }

    pub fn action_for(&self, code: &str) -> Option<Action> {
        self.map.get(code).copied()
    }
}

/// Keyboard-backed input state, updated from device key events.
#[derive(Debug, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    held: HashSet<Action>,
    just_pressed: HashSet<Action>,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Register a key-down event. Auto-repeat (a key-down for a code
    /// already held) does not count as a fresh press.
    pub fn on_key_down(&mut self, code: &str) {
        if let Some(action) = self.bindings.action_for(code)
            && self.held.insert(action)
        {
            self.just_pressed.insert(action);
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        if let Some(action) = self.bindings.action_for(code) {
            self.held.remove(&action);
        }
    }

    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Clear per-tick state. Call after the session has polled input.
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_and_up() {
        let mut input = KeyboardState::new(KeyBindings::default());
        input.on_key_down("ArrowLeft");
        assert!(input.is_held(Action::MoveLeft));
        assert!(input.is_just_pressed(Action::MoveLeft));

        input.end_tick();
        assert!(input.is_held(Action::MoveLeft));
        assert!(!input.is_just_pressed(Action::MoveLeft));

        input.on_key_up("ArrowLeft");
        assert!(!input.is_held(Action::MoveLeft));
    }

    #[test]
    fn auto_repeat_is_not_a_fresh_press() {
        let mut input = KeyboardState::new(KeyBindings::default());
        input.on_key_down("Space");
        input.end_tick();
        input.on_key_down("Space");
        assert!(input.is_held(Action::Jump));
        assert!(!input.is_just_pressed(Action::Jump));
    }

    #[test]
    fn unbound_codes_are_ignored() {
        let mut input = KeyboardState::new(KeyBindings::default());
        input.on_key_down("KeyQ");
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Resize,
        ] {
            assert!(!input.is_held(action));
        }
    }

    #[test]
    fn rebinding_replaces_the_code() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyW", Action::Jump);
        let mut input = KeyboardState::new(bindings);
        input.on_key_down("KeyW");
        assert!(input.is_held(Action::Jump));
    }
}
