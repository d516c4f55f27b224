//! Runtime registry for rebindable input actions ("keybinds").
//!
//! This crate is host-agnostic: it knows nothing about windows, event loops,
//! settings UIs or save files. It exposes:
//! - `keybinds::registry`: per-owner registration with a frozen default
//!   snapshot next to every live (rebindable) entry.
//! - `keybinds::keybind`: the entity itself plus press-state queries against
//!   an [`keybinds::input::InputSource`] the host supplies.
//! - `core_log::CoreLog`: thin logging trait the host can implement.
//!
//! Import the `prelude` if you want the most common types in scope.

pub mod core_log;

pub mod keybinds {
    pub mod input;
    pub mod key;
    pub mod keybind;
    pub mod owner;
    pub mod registry;
}

pub use core_log::CoreLog;

/// Convenient re-exports for downstream users (hosts/tests).
pub mod prelude {
    pub use crate::core_log::{CoreLog, NoopLog};

    pub use crate::keybinds::input::{InputSnapshot, InputSource};
    pub use crate::keybinds::key::{KeyCode, MODIFIER_KEYS};
    pub use crate::keybinds::keybind::{ComboParseError, Keybind};
    pub use crate::keybinds::owner::OwnerId;
    pub use crate::keybinds::registry::{KeybindRegistry, KeybindStore};
}
