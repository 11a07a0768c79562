//! Held-key tracking and per-tick movement intent
//!
//! Key events only mutate the held set. The tick reads the set once and turns
//! it into an `Intent`, so rotation and thrust are continuous while a key is
//! down. Firing is edge-triggered and handled by the session controller.

use std::collections::HashSet;

use super::geometry::Viewport;
use super::state::Ship;
use crate::consts::SHIP_ROTATION_STEP;
use crate::settings::KeyBindings;

/// Movement requested for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Degrees to turn this tick (negative = counter-clockwise)
    pub rotation_delta: f32,
    /// Move forward one thrust step
    pub thrust: bool,
}

impl Intent {
    /// Apply rotation then thrust to the ship
    pub fn apply(&self, ship: &mut Ship, viewport: Viewport) {
        if self.rotation_delta != 0.0 {
            ship.rotate(self.rotation_delta);
        }
        if self.thrust {
            ship.thrust(viewport);
        }
    }
}

/// Set of key identifiers currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true on the initial press, false when the
    /// key was already held (auto-repeat).
    pub fn press(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_owned())
    }

    /// Record a key-up. Returns true if the key was held.
    pub fn release(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Translate the held set into this tick's movement
    pub fn intent(&self, bindings: &KeyBindings) -> Intent {
        let mut rotation_delta = 0.0;
        if self.is_held(&bindings.rotate_left) {
            rotation_delta -= SHIP_ROTATION_STEP;
        }
        if self.is_held(&bindings.rotate_right) {
            rotation_delta += SHIP_ROTATION_STEP;
        }
        Intent {
            rotation_delta,
            thrust: self.is_held(&bindings.thrust),
        }
    }
}
