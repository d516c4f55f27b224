use std::{collections::HashMap, fmt, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// Equal owner ids share one Arc buffer; the registry clones these freely.
static OWNER_INTERN: Lazy<RwLock<HashMap<String, Arc<str>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn intern(s: &str) -> Arc<str> {
    if let Some(existing) = OWNER_INTERN.read().get(s) {
        return Arc::clone(existing);
    }
    let mut w = OWNER_INTERN.write();
    if let Some(existing) = w.get(s) {
        return Arc::clone(existing);
    }
    let arc: Arc<str> = Arc::from(s);
    w.insert(s.to_owned(), Arc::clone(&arc));
    arc
}

/// Stable handle for the module that registered a keybind.
///
/// Compares by content, not by reference, so two handles built from the same
/// string always partition the registry the same way. Serializes as a plain
/// string; deserializing re-interns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct OwnerId(Arc<str>);

impl OwnerId {
    pub fn new<S: AsRef<str>>(id: S) -> Self {
        Self(intern(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ids_share_one_buffer() {
        let a = OwnerId::new("mod.example");
        let b = OwnerId::new("mod.example");
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn distinct_ids_differ() {
        assert_ne!(OwnerId::new("mod.a"), OwnerId::new("mod.b"));
    }

    #[test]
    fn serde_round_trip_preserves_equality() {
        let a = OwnerId::new("mod.serde");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"mod.serde\"");
        let back: OwnerId = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
