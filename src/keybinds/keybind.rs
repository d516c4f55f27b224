use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::keybinds::input::InputSource;
use crate::keybinds::key::KeyCode;
use crate::keybinds::owner::OwnerId;

/// A rebindable input action: primary key plus an optional modifier.
///
/// Identity (`id`, `name`, `owner`) is fixed once registered; `key` and
/// `modifier` are the live, user-rebindable values. Rebinding is plain field
/// assignment, there is no setter contract beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybind {
    /// Unique within the owner's namespace. Uniqueness is a caller contract,
    /// not enforced here.
    pub id: Arc<str>,
    /// Human-readable label for settings UIs.
    pub name: String,
    pub key: KeyCode,
    /// `None` means the primary key alone triggers the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<KeyCode>,
    /// Stamped by the registry on `add`; never reassigned afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboParseError {
    NoInput,
    UnknownToken(String),
    TooManyMainKeys(Vec<String>),
    TooManyModifiers(Vec<String>),
}

impl fmt::Display for ComboParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboParseError::NoInput => write!(f, "empty combo"),
            ComboParseError::UnknownToken(t) => write!(f, "unknown key token '{t}'"),
            ComboParseError::TooManyMainKeys(keys) => {
                write!(f, "more than one main key: {}", keys.join(", "))
            }
            ComboParseError::TooManyModifiers(keys) => {
                write!(f, "more than one modifier: {}", keys.join(", "))
            }
        }
    }
}

impl Keybind {
    /// Keybind without a modifier.
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N, key: KeyCode) -> Self {
        Self {
            id: Arc::from(id.as_ref()),
            name: name.into(),
            key,
            modifier: None,
            owner: None,
        }
    }

    /// Keybind gated behind a modifier.
    pub fn with_modifier<I: AsRef<str>, N: Into<String>>(
        id: I,
        name: N,
        key: KeyCode,
        modifier: KeyCode,
    ) -> Self {
        Self {
            id: Arc::from(id.as_ref()),
            name: name.into(),
            key,
            modifier: Some(modifier),
            owner: None,
        }
    }

    /// Value-copy of the descriptive fields. The registry stores one of these
    /// in the default collection, so later rebinds of the live entry leave the
    /// default untouched.
    pub fn snapshot(&self) -> Keybind {
        Keybind {
            id: Arc::clone(&self.id),
            name: self.name.clone(),
            key: self.key,
            modifier: self.modifier,
            owner: self.owner.clone(),
        }
    }

    /// True while the bind is held: with a modifier, both modifier and key
    /// must be held at once; without one, the key alone.
    pub fn is_pressed<S: InputSource + ?Sized>(&self, input: &S) -> bool {
        match self.modifier {
            Some(m) => input.is_held(m) && input.is_held(self.key),
            None => input.is_held(self.key),
        }
    }

    /// True for the one tick the bind fires: the primary key must be newly
    /// pressed, while the modifier (if any) only needs to be held. The user
    /// holds the modifier first, then taps the key.
    pub fn is_down<S: InputSource + ?Sized>(&self, input: &S) -> bool {
        match self.modifier {
            Some(m) => input.is_held(m) && input.just_pressed(self.key),
            None => input.just_pressed(self.key),
        }
    }

    /// Render the current binding as a combo string: "lshift+x" or "x".
    pub fn combo(&self) -> String {
        match self.modifier {
            Some(m) => format!("{}+{}", m.name(), self.key.name()),
            None => self.key.name().to_owned(),
        }
    }

    /// Parse a combo string ("lshift+x", "F5", "ctrl + np_1") and assign it to
    /// the live `key`/`modifier` fields. The bind is unchanged on error.
    pub fn set_combo(&mut self, input: &str) -> Result<(), ComboParseError> {
        let (key, modifier) = parse_combo(input)?;
        self.key = key;
        self.modifier = modifier;
        Ok(())
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.combo())
    }
}

/// Split a combo string into (main key, optional modifier).
///
/// At most one modifier and one main key; a lone modifier token is promoted
/// to the main key so "lshift" on its own is a valid binding.
pub fn parse_combo(input: &str) -> Result<(KeyCode, Option<KeyCode>), ComboParseError> {
    let segments: Vec<&str> = input
        .split('+')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(ComboParseError::NoInput);
    }

    let mut modifiers: Vec<KeyCode> = Vec::new();
    let mut main_keys: Vec<KeyCode> = Vec::new();

    for seg in segments {
        let key = KeyCode::parse(seg).ok_or_else(|| ComboParseError::UnknownToken(seg.into()))?;
        if key.is_modifier() {
            modifiers.push(key);
        } else {
            main_keys.push(key);
        }
    }

    if modifiers.len() > 1 {
        return Err(ComboParseError::TooManyModifiers(
            modifiers.iter().map(|k| k.name().to_owned()).collect(),
        ));
    }

    match main_keys.len() {
        // Modifier-only combo: promote it to the main key
        0 => Ok((modifiers[0], None)),
        1 => Ok((main_keys[0], modifiers.first().copied())),
        _ => Err(ComboParseError::TooManyMainKeys(
            main_keys.iter().map(|k| k.name().to_owned()).collect(),
        )),
    }
}
