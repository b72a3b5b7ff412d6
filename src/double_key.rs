// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    config::{CapacityPolicy, Config},
    linear_probe::LinearProbeTable,
    Error, Result,
};

/// Boxed iterator returned by the lazy key/value accessors
pub type BoxedIterator<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Two-level hash table keyed by a pair of strings.
///
/// The top level maps the first key to a bottom-level [`LinearProbeTable`],
/// which maps the second key to the value. Both levels use linear probing and
/// grow independently through their own capacity sequences.
///
/// `len()` counts top-level keys, not key pairs.
#[derive(Clone, Debug)]
pub struct DoubleKeyTable<V> {
    top_level_table: LinearProbeTable<LinearProbeTable<V>>,
    internal_capacities: CapacityPolicy,
}

impl<V> Default for DoubleKeyTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DoubleKeyTable<V> {
    /// Creates an empty table using the default capacity sequences.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty table from the given config.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            top_level_table: LinearProbeTable::with_capacities(config.capacities),
            internal_capacities: config.internal_capacities,
        }
    }

    /// Number of top-level slots.
    #[must_use]
    pub fn table_size(&self) -> usize {
        self.top_level_table.table_size()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.top_level_table.len()
    }

    /// Returns `true` if there are no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_level_table.is_empty()
    }

    fn bottom(&self, key1: &str) -> Result<&LinearProbeTable<V>> {
        self.top_level_table
            .get(key1)
            .map_err(|_| Error::OuterKeyNotFound(key1.into()))
    }

    fn bottom_mut(&mut self, key1: &str) -> Result<&mut LinearProbeTable<V>> {
        self.top_level_table
            .get_mut(key1)
            .map_err(|_| Error::OuterKeyNotFound(key1.into()))
    }

    /// Returns the value stored under `(key1, key2)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OuterKeyNotFound`] if `key1` is absent, or
    /// [`Error::InnerKeyNotFound`] if `key1` has no entry for `key2`.
    pub fn get(&self, key1: &str, key2: &str) -> Result<&V> {
        self.bottom(key1)?
            .get(key2)
            .map_err(|_| Error::InnerKeyNotFound(key1.into(), key2.into()))
    }

    /// Returns a mutable reference to the value stored under `(key1, key2)`.
    ///
    /// # Errors
    ///
    /// Same as [`DoubleKeyTable::get`].
    pub fn get_mut(&mut self, key1: &str, key2: &str) -> Result<&mut V> {
        self.bottom_mut(key1)?
            .get_mut(key2)
            .map_err(|_| Error::InnerKeyNotFound(key1.into(), key2.into()))
    }

    /// Returns `true` if the key pair is present.
    #[must_use]
    pub fn contains(&self, key1: &str, key2: &str) -> bool {
        self.get(key1, key2).is_ok()
    }

    /// Inserts or overwrites the value under `(key1, key2)`, returning the
    /// previous value.
    ///
    /// A new `key1` gets a fresh bottom table. The top level rehashes once
    /// more than half of its slots are taken.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if either level has no room left. The table is
    /// not modified in that case.
    pub fn set(&mut self, key1: &str, key2: impl Into<String>, value: V) -> Result<Option<V>> {
        if self.top_level_table.contains(key1) {
            return self.bottom_mut(key1)?.set(key2, value);
        }

        let mut bottom = LinearProbeTable::with_capacities(self.internal_capacities.clone());
        bottom.set(key2, value)?;

        log::trace!("new bottom-level table for {key1:?}");
        self.top_level_table.set(key1, bottom)?;

        Ok(None)
    }

    /// Removes `(key1, key2)`, returning its value.
    ///
    /// If this empties the bottom table of `key1`, the top-level slot is freed
    /// and the following cluster is reinserted.
    ///
    /// # Errors
    ///
    /// Same as [`DoubleKeyTable::get`]; nothing is modified on error.
    pub fn delete(&mut self, key1: &str, key2: &str) -> Result<V> {
        let bottom = self.bottom_mut(key1)?;

        let value = bottom
            .delete(key2)
            .map_err(|_| Error::InnerKeyNotFound(key1.into(), key2.into()))?;

        if bottom.is_empty() {
            log::trace!("bottom-level table for {key1:?} is empty, removing");
            self.top_level_table.delete(key1)?;
        }

        Ok(value)
    }

    /// Without `key1`: returns all top-level keys.
    ///
    /// With `key1`: returns all bottom-level keys stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OuterKeyNotFound`] if `key1` is given but absent.
    pub fn keys(&self, key1: Option<&str>) -> Result<Vec<&str>> {
        Ok(self.iter_keys(key1)?.collect())
    }

    /// Without `key1`: returns every value in the table.
    ///
    /// With `key1`: returns all values stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OuterKeyNotFound`] if `key1` is given but absent.
    pub fn values(&self, key1: Option<&str>) -> Result<Vec<&V>> {
        Ok(self.iter_values(key1)?.collect())
    }

    /// Lazy variant of [`DoubleKeyTable::keys`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OuterKeyNotFound`] if `key1` is given but absent.
    pub fn iter_keys(&self, key1: Option<&str>) -> Result<BoxedIterator<'_, &str>> {
        let iter: BoxedIterator<'_, &str> = match key1 {
            None => Box::new(self.top_level_table.iter().map(|(k, _)| k)),
            Some(key1) => Box::new(self.bottom(key1)?.iter().map(|(k, _)| k)),
        };
        Ok(iter)
    }

    /// Lazy variant of [`DoubleKeyTable::values`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OuterKeyNotFound`] if `key1` is given but absent.
    pub fn iter_values(&self, key1: Option<&str>) -> Result<BoxedIterator<'_, &V>> {
        let iter: BoxedIterator<'_, &V> = match key1 {
            None => Box::new(
                self.top_level_table
                    .iter()
                    .flat_map(|(_, bottom)| bottom.iter().map(|(_, v)| v)),
            ),
            Some(key1) => Box::new(self.bottom(key1)?.iter().map(|(_, v)| v)),
        };
        Ok(iter)
    }

    /// Iterates over every `(key1, key2, value)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &V)> + '_ {
        self.top_level_table.iter().flat_map(|(key1, bottom)| {
            bottom.iter().map(move |(key2, value)| (key1, key2, value))
        })
    }
}

/// Writes `{key1: {key2: value, ...}, ...}` in slot order.
impl<V: std::fmt::Display> std::fmt::Display for DoubleKeyTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.top_level_table, f)
    }
}
