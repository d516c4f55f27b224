use std::collections::HashSet;

use crate::keybinds::key::KeyCode;

/// The input capability a host must supply for press-state queries.
///
/// `is_held` is level-triggered: true for every tick the physical key stays
/// active. `just_pressed` is edge-triggered: true for exactly one tick at the
/// start of a press. A key the backend doesn't know simply reads as not held.
pub trait InputSource {
    fn is_held(&self, key: KeyCode) -> bool;
    fn just_pressed(&self, key: KeyCode) -> bool;
}

/// A concrete per-tick input snapshot.
///
/// Hosts that poll a raw backend once per simulation tick can maintain one of
/// these and hand it to the press queries; tests script it directly.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: HashSet<KeyCode>,
    fresh: HashSet<KeyCode>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down this tick: held and newly pressed.
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
        self.fresh.insert(key);
    }

    /// Key is held over from an earlier tick (not newly pressed).
    pub fn hold(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
        self.fresh.remove(&key);
    }

    /// Advance one tick: everything still held stops being "newly pressed".
    pub fn next_tick(&mut self) {
        self.fresh.clear();
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.fresh.clear();
    }
}

impl InputSource for InputSnapshot {
    #[inline]
    fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    #[inline]
    fn just_pressed(&self, key: KeyCode) -> bool {
        self.fresh.contains(&key)
    }
}
