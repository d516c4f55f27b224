use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core_log::CoreLog;
use crate::keybinds::key::KeyCode;
use crate::keybinds::keybind::Keybind;
use crate::keybinds::owner::OwnerId;

/// Append-only keybind registry, partitioned by owner.
///
/// Two parallel collections: `current` holds the live, rebindable values and
/// `defaults` holds the frozen snapshot taken at registration. Entries are
/// never removed, so an index into one collection is valid for the other.
///
/// Registration is expected to happen once, during host init, on one thread;
/// reads and rebinds follow on that same thread. Nothing here locks — wrap
/// the registry in a [`KeybindStore`] if components need to share it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindRegistry {
    current: Vec<Keybind>,
    defaults: Vec<Keybind>,
    /// Positions per owner, in registration order. Rebuilt after deserialize.
    #[serde(skip)]
    by_owner: IndexMap<OwnerId, Vec<usize>>,
}

impl KeybindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keybind for `owner`: stamps the owner, appends the live
    /// value to the current collection and a snapshot to the defaults.
    ///
    /// No uniqueness check: duplicate ids are retained, same as everything
    /// else. Keeping ids unique within an owner is the caller's job.
    pub fn add(&mut self, owner: &OwnerId, mut keybind: Keybind) {
        keybind.owner = Some(owner.clone());
        let snapshot = keybind.snapshot();

        self.by_owner
            .entry(owner.clone())
            .or_default()
            .push(self.current.len());
        self.current.push(keybind);
        self.defaults.push(snapshot);
    }

    /// All live keybinds for `owner`, in registration order. Empty when the
    /// owner never registered anything.
    pub fn get(&self, owner: &OwnerId) -> Vec<&Keybind> {
        self.collect_for(owner, &self.current)
    }

    /// The frozen registration-time snapshots for `owner`, same order and
    /// contract as [`get`](Self::get).
    pub fn get_default(&self, owner: &OwnerId) -> Vec<&Keybind> {
        self.collect_for(owner, &self.defaults)
    }

    /// Mutable access to the live entries for `owner`, for direct rebinding.
    pub fn get_mut(&mut self, owner: &OwnerId) -> Vec<&mut Keybind> {
        self.current
            .iter_mut()
            .filter(|k| k.owner.as_ref() == Some(owner))
            .collect()
    }

    /// First live keybind matching (owner, id). Under duplicate ids the
    /// earliest registration wins.
    pub fn find(&self, owner: &OwnerId, id: &str) -> Option<&Keybind> {
        self.get(owner).into_iter().find(|k| &*k.id == id)
    }

    pub fn find_mut(&mut self, owner: &OwnerId, id: &str) -> Option<&mut Keybind> {
        self.get_mut(owner).into_iter().find(|k| &*k.id == id)
    }

    /// First default snapshot matching (owner, id).
    pub fn find_default(&self, owner: &OwnerId, id: &str) -> Option<&Keybind> {
        self.get_default(owner).into_iter().find(|k| &*k.id == id)
    }

    /// Owners in first-registration order.
    pub fn owners(&self) -> impl Iterator<Item = &OwnerId> {
        self.by_owner.keys()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("serialize KeybindRegistry: {e}"))
    }

    /// Load a registry from JSON, e.g. a saved bindings file. The two
    /// collections must line up entry for entry and every entry must carry an
    /// owner; a hand-edited file that breaks either reads as an error, never
    /// a half-loaded registry.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let mut reg: KeybindRegistry = serde_json::from_str(content)
            .map_err(|e| format!("deserialize KeybindRegistry: {e}"))?;
        if reg.defaults.len() != reg.current.len() {
            return Err(format!(
                "corrupt registry: {} current entries but {} defaults",
                reg.current.len(),
                reg.defaults.len()
            ));
        }
        if let Some(kb) = reg
            .current
            .iter()
            .chain(reg.defaults.iter())
            .find(|k| k.owner.is_none())
        {
            return Err(format!("corrupt registry: keybind '{}' has no owner", kb.id));
        }
        reg.rebuild_index(); // <- by_owner is not serialized
        Ok(reg)
    }

    fn collect_for<'a>(&'a self, owner: &OwnerId, slots: &'a [Keybind]) -> Vec<&'a Keybind> {
        match self.by_owner.get(owner) {
            Some(ixs) => ixs.iter().map(|&i| &slots[i]).collect(),
            None => Vec::new(),
        }
    }

    fn rebuild_index(&mut self) {
        self.by_owner.clear();
        for (i, kb) in self.current.iter().enumerate() {
            if let Some(owner) = &kb.owner {
                self.by_owner.entry(owner.clone()).or_default().push(i);
            }
        }
    }
}

/// Shared handle around a [`KeybindRegistry`] for hosts whose settings UI,
/// persistence and simulation code all need the same instance.
pub struct KeybindStore {
    inner: Arc<RwLock<KeybindRegistry>>,
    logger: Arc<dyn CoreLog>,
}

impl Clone for KeybindStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl KeybindStore {
    pub fn new(logger: Arc<dyn CoreLog>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(KeybindRegistry::new())),
            logger,
        }
    }

    /// Register a keybind. A duplicate id within the owner's namespace is
    /// logged and kept; the registry stays permissive.
    pub fn add(&self, owner: &OwnerId, keybind: Keybind) {
        let mut reg = self.inner.write();
        if reg.find(owner, &keybind.id).is_some() {
            self.logger.warn(&format!(
                "[add] duplicate keybind id '{}' for owner '{owner}', keeping both",
                keybind.id
            ));
        }
        self.logger.debug(&format!(
            "[add] {owner}: '{}' bound to {}",
            keybind.id,
            keybind.combo()
        ));
        reg.add(owner, keybind);
    }

    /// Cloned live keybinds for `owner`, registration order.
    pub fn get(&self, owner: &OwnerId) -> Vec<Keybind> {
        self.inner.read().get(owner).into_iter().cloned().collect()
    }

    /// Cloned default snapshots for `owner`.
    pub fn get_default(&self, owner: &OwnerId) -> Vec<Keybind> {
        self.inner
            .read()
            .get_default(owner)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rebind a live entry. Returns false when (owner, id) is unknown.
    pub fn rebind(&self, owner: &OwnerId, id: &str, key: KeyCode, modifier: Option<KeyCode>) -> bool {
        let mut reg = self.inner.write();
        match reg.find_mut(owner, id) {
            Some(kb) => {
                kb.key = key;
                kb.modifier = modifier;
                self.logger
                    .info(&format!("[rebind] {owner}: '{id}' now {}", kb.combo()));
                true
            }
            None => false,
        }
    }

    /// Copy the registration-time snapshot back into the live entry. Returns
    /// false when (owner, id) is unknown.
    pub fn reset_to_default(&self, owner: &OwnerId, id: &str) -> bool {
        let mut reg = self.inner.write();
        let Some((key, modifier)) = reg.find_default(owner, id).map(|d| (d.key, d.modifier)) else {
            return false;
        };
        match reg.find_mut(owner, id) {
            Some(kb) => {
                kb.key = key;
                kb.modifier = modifier;
                self.logger
                    .info(&format!("[reset_to_default] {owner}: '{id}' back to {}", kb.combo()));
                true
            }
            None => false,
        }
    }

    /// Owners in first-registration order.
    pub fn owners(&self) -> Vec<OwnerId> {
        self.inner.read().owners().cloned().collect()
    }

    /// Clone of the whole registry, for persistence consumers.
    pub fn snapshot(&self) -> KeybindRegistry {
        self.inner.read().clone()
    }

    pub fn to_json(&self) -> Result<String, String> {
        self.inner.read().to_json()
    }

    /// Replace the registry wholesale, e.g. after loading saved bindings.
    pub fn replace(&self, registry: KeybindRegistry) {
        *self.inner.write() = registry;
    }
}
