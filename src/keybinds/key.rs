use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbolic keyboard trigger. This is what a [`Keybind`](crate::keybinds::keybind::Keybind)
/// stores; the host's input backend decides what physical event each value maps to.
///
/// Serialized form is the canonical lowercase token from [`KeyCode::name`]
/// ("lctrl", "np_1", "space"), so saved bindings read the same as combo strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    Np0, Np1, Np2, Np3, Np4, Np5, Np6, Np7, Np8, Np9,
    NpAdd, NpSubtract, NpMultiply, NpDivide, NpEnter, NpPeriod,

    LShift, RShift, LCtrl, RCtrl, LAlt, RAlt,

    Space, Tab, Enter, Escape, Backspace, CapsLock,
    Insert, Delete, Home, End, PageUp, PageDown,
    Up, Down, Left, Right,

    Minus, Equals, LBracket, RBracket, Semicolon, Apostrophe,
    Grave, Backslash, Comma, Period, Slash,
}

/// Keys accepted in the modifier slot of a combo ("lshift+x").
pub const MODIFIER_KEYS: &[KeyCode] = &[
    KeyCode::LShift,
    KeyCode::RShift,
    KeyCode::LCtrl,
    KeyCode::RCtrl,
    KeyCode::LAlt,
    KeyCode::RAlt,
];

impl KeyCode {
    /// Every variant, in declaration order. Used by `parse` and handy for
    /// hosts building rebind pickers.
    pub const ALL: &'static [KeyCode] = &[
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F,
        KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L,
        KeyCode::M, KeyCode::N, KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R,
        KeyCode::S, KeyCode::T, KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X,
        KeyCode::Y, KeyCode::Z,
        KeyCode::Num0, KeyCode::Num1, KeyCode::Num2, KeyCode::Num3, KeyCode::Num4,
        KeyCode::Num5, KeyCode::Num6, KeyCode::Num7, KeyCode::Num8, KeyCode::Num9,
        KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
        KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
        KeyCode::Np0, KeyCode::Np1, KeyCode::Np2, KeyCode::Np3, KeyCode::Np4,
        KeyCode::Np5, KeyCode::Np6, KeyCode::Np7, KeyCode::Np8, KeyCode::Np9,
        KeyCode::NpAdd, KeyCode::NpSubtract, KeyCode::NpMultiply, KeyCode::NpDivide,
        KeyCode::NpEnter, KeyCode::NpPeriod,
        KeyCode::LShift, KeyCode::RShift, KeyCode::LCtrl, KeyCode::RCtrl,
        KeyCode::LAlt, KeyCode::RAlt,
        KeyCode::Space, KeyCode::Tab, KeyCode::Enter, KeyCode::Escape,
        KeyCode::Backspace, KeyCode::CapsLock,
        KeyCode::Insert, KeyCode::Delete, KeyCode::Home, KeyCode::End,
        KeyCode::PageUp, KeyCode::PageDown,
        KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right,
        KeyCode::Minus, KeyCode::Equals, KeyCode::LBracket, KeyCode::RBracket,
        KeyCode::Semicolon, KeyCode::Apostrophe, KeyCode::Grave, KeyCode::Backslash,
        KeyCode::Comma, KeyCode::Period, KeyCode::Slash,
    ];

    /// Canonical lowercase token.
    pub const fn name(self) -> &'static str {
        match self {
            KeyCode::A => "a", KeyCode::B => "b", KeyCode::C => "c", KeyCode::D => "d",
            KeyCode::E => "e", KeyCode::F => "f", KeyCode::G => "g", KeyCode::H => "h",
            KeyCode::I => "i", KeyCode::J => "j", KeyCode::K => "k", KeyCode::L => "l",
            KeyCode::M => "m", KeyCode::N => "n", KeyCode::O => "o", KeyCode::P => "p",
            KeyCode::Q => "q", KeyCode::R => "r", KeyCode::S => "s", KeyCode::T => "t",
            KeyCode::U => "u", KeyCode::V => "v", KeyCode::W => "w", KeyCode::X => "x",
            KeyCode::Y => "y", KeyCode::Z => "z",

            KeyCode::Num0 => "0", KeyCode::Num1 => "1", KeyCode::Num2 => "2",
            KeyCode::Num3 => "3", KeyCode::Num4 => "4", KeyCode::Num5 => "5",
            KeyCode::Num6 => "6", KeyCode::Num7 => "7", KeyCode::Num8 => "8",
            KeyCode::Num9 => "9",

            KeyCode::F1 => "f1", KeyCode::F2 => "f2", KeyCode::F3 => "f3",
            KeyCode::F4 => "f4", KeyCode::F5 => "f5", KeyCode::F6 => "f6",
            KeyCode::F7 => "f7", KeyCode::F8 => "f8", KeyCode::F9 => "f9",
            KeyCode::F10 => "f10", KeyCode::F11 => "f11", KeyCode::F12 => "f12",

            KeyCode::Np0 => "np_0", KeyCode::Np1 => "np_1", KeyCode::Np2 => "np_2",
            KeyCode::Np3 => "np_3", KeyCode::Np4 => "np_4", KeyCode::Np5 => "np_5",
            KeyCode::Np6 => "np_6", KeyCode::Np7 => "np_7", KeyCode::Np8 => "np_8",
            KeyCode::Np9 => "np_9",
            KeyCode::NpAdd => "np_add",
            KeyCode::NpSubtract => "np_subtract",
            KeyCode::NpMultiply => "np_multiply",
            KeyCode::NpDivide => "np_divide",
            KeyCode::NpEnter => "np_enter",
            KeyCode::NpPeriod => "np_period",

            KeyCode::LShift => "lshift", KeyCode::RShift => "rshift",
            KeyCode::LCtrl => "lctrl", KeyCode::RCtrl => "rctrl",
            KeyCode::LAlt => "lalt", KeyCode::RAlt => "ralt",

            KeyCode::Space => "space", KeyCode::Tab => "tab",
            KeyCode::Enter => "enter", KeyCode::Escape => "escape",
            KeyCode::Backspace => "backspace", KeyCode::CapsLock => "capslock",
            KeyCode::Insert => "insert", KeyCode::Delete => "delete",
            KeyCode::Home => "home", KeyCode::End => "end",
            KeyCode::PageUp => "pgup", KeyCode::PageDown => "pgdn",
            KeyCode::Up => "up", KeyCode::Down => "down",
            KeyCode::Left => "left", KeyCode::Right => "right",

            KeyCode::Minus => "minus", KeyCode::Equals => "equals",
            KeyCode::LBracket => "lbracket", KeyCode::RBracket => "rbracket",
            KeyCode::Semicolon => "semicolon", KeyCode::Apostrophe => "apostrophe",
            KeyCode::Grave => "grave", KeyCode::Backslash => "backslash",
            KeyCode::Comma => "comma", KeyCode::Period => "period",
            KeyCode::Slash => "slash",
        }
    }

    /// Parse a single key token, case-insensitive. Accepts canonical names
    /// plus common aliases ("ctrl", "esc", "return", "del").
    pub fn parse(s: &str) -> Option<KeyCode> {
        let t = s.trim().to_ascii_lowercase();
        if t.is_empty() {
            return None;
        }

        // Aliases that don't match a canonical name
        let aliased = match t.as_str() {
            "ctrl" | "control" => Some(KeyCode::LCtrl),
            "shift" => Some(KeyCode::LShift),
            "alt" => Some(KeyCode::LAlt),
            "altgr" => Some(KeyCode::RAlt),
            "esc" => Some(KeyCode::Escape),
            "return" => Some(KeyCode::Enter),
            "del" => Some(KeyCode::Delete),
            "ins" => Some(KeyCode::Insert),
            "spacebar" => Some(KeyCode::Space),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),
            "bksp" => Some(KeyCode::Backspace),
            _ => None,
        };
        if aliased.is_some() {
            return aliased;
        }

        KeyCode::ALL.iter().copied().find(|k| k.name() == t)
    }

    /// True for keys accepted in the modifier slot of a combo.
    #[inline]
    pub fn is_modifier(self) -> bool {
        MODIFIER_KEYS.contains(&self)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCode::parse(s).ok_or_else(|| format!("unknown key token '{s}'"))
    }
}

impl From<KeyCode> for String {
    fn from(k: KeyCode) -> Self {
        k.name().to_owned()
    }
}

impl TryFrom<String> for KeyCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for &k in KeyCode::ALL {
            assert_eq!(KeyCode::parse(k.name()), Some(k), "token '{}'", k.name());
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(KeyCode::parse(" LShift "), Some(KeyCode::LShift));
        assert_eq!(KeyCode::parse("NP_1"), Some(KeyCode::Np1));
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(KeyCode::parse("ctrl"), Some(KeyCode::LCtrl));
        assert_eq!(KeyCode::parse("esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::parse("return"), Some(KeyCode::Enter));
    }

    #[test]
    fn unknown_token_is_none() {
        assert_eq!(KeyCode::parse("mwheel_up"), None);
        assert_eq!(KeyCode::parse(""), None);
    }

    #[test]
    fn modifier_classification() {
        assert!(KeyCode::LShift.is_modifier());
        assert!(KeyCode::RAlt.is_modifier());
        assert!(!KeyCode::Space.is_modifier());
        assert!(!KeyCode::X.is_modifier());
    }

    #[test]
    fn serde_uses_canonical_tokens() {
        let json = serde_json::to_string(&KeyCode::Np1).unwrap();
        assert_eq!(json, "\"np_1\"");
        let back: KeyCode = serde_json::from_str("\"lctrl\"").unwrap();
        assert_eq!(back, KeyCode::LCtrl);
    }
}
