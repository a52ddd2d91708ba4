//! Player input handling.
//!
//! This module turns raw key and pointer events into the per-sub-step input
//! the physics controller samples.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use walkabout_physics::{InputIntent, InputSampler, MoveKeys, ViewAngles};

/// Keys the avatar responds to, named by their DOM key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Space,
}

impl Key {
    /// Look up a key code such as `"KeyW"` or `"Space"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::KeyW),
            "KeyA" => Some(Self::KeyA),
            "KeyS" => Some(Self::KeyS),
            "KeyD" => Some(Self::KeyD),
            "Space" => Some(Self::Space),
            _ => None,
        }
    }
}

/// Keyboard and pointer state accumulated between frames.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    pressed: HashSet<Key>,
    pointer_delta: (f32, f32),

    /// The pointer is captured; motion turns the view.
    pub pointer_locked: bool,

    /// The view comes from a tracked headset; pointer motion is ignored.
    pub head_tracked: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Returns whether the code was recognised.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };

        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
        true
    }

    /// Accumulate pointer movement in pixels.
    pub fn handle_pointer_motion(&mut self, dx: f32, dy: f32) {
        if !self.pointer_locked || self.head_tracked {
            return;
        }
        self.pointer_delta.0 += dx;
        self.pointer_delta.1 += dy;
    }

    /// Take and clear the pointer movement since the last call.
    pub fn take_pointer_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.pointer_delta)
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Current key state as movement flags.
    pub fn keys(&self) -> MoveKeys {
        MoveKeys {
            forward: self.is_pressed(Key::KeyW),
            back: self.is_pressed(Key::KeyS),
            left: self.is_pressed(Key::KeyA),
            right: self.is_pressed(Key::KeyD),
            jump: self.is_pressed(Key::Space),
        }
    }
}

impl InputSampler for KeyboardInput {
    fn sample(&mut self, view: &ViewAngles) -> InputIntent {
        InputIntent::from_view(self.keys(), view)
    }
}
