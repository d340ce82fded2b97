use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::models::Truck;

/// Registry key derived from a truck's coordinates exactly as the server
/// sent them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKey(String);

impl MarkerKey {
    pub fn for_truck(truck: &Truck) -> Self {
        Self(format!("{},{}", truck.latitude.trim(), truck.longitude.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct MarkerEntry<M> {
    pub marker: M,
    /// Details shown in the info window, as received when the marker was made.
    pub truck: Truck,
    pub visible: bool,
}

/// Every marker ever created, one per coordinate pair. Entries are never
/// removed; hiding a marker only flips `visible`.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    entries: HashMap<MarkerKey, MarkerEntry<M>>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &MarkerKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &MarkerKey) -> Option<&MarkerEntry<M>> {
        self.entries.get(key)
    }

    /// Registers a visible marker for `key`. Returns `false` and leaves the
    /// registry untouched when the key is already taken.
    pub fn insert(&mut self, key: MarkerKey, marker: M, truck: Truck) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, MarkerEntry { marker, truck, visible: true });
        true
    }

    /// Records the new visibility and returns the marker if it changed.
    pub fn set_visible(&mut self, key: &MarkerKey, visible: bool) -> Option<&M> {
        let entry = self.entries.get_mut(key)?;
        if entry.visible == visible {
            return None;
        }
        entry.visible = visible;
        Some(&entry.marker)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MarkerKey> {
        self.entries.keys()
    }

    pub fn visible_keys(&self) -> BTreeSet<MarkerKey> {
        self.entries.iter().filter(|(_, e)| e.visible).map(|(k, _)| k.clone()).collect()
    }
}
