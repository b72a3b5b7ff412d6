// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{config::CapacityPolicy, hash::polynomial, Error, Result};

type Slot<V> = Option<(String, V)>;

fn empty_slots<V>(capacity: usize) -> Box<[Slot<V>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Open-addressing hash table with linear probing over string keys.
///
/// Grows through its [`CapacityPolicy`] once more than half of the slots are
/// occupied. Deletion shifts the rest of the probe cluster back, so the table
/// never holds tombstones.
#[derive(Clone, Debug)]
pub struct LinearProbeTable<V> {
    slots: Box<[Slot<V>]>,
    size_index: usize,
    count: usize,
    capacities: CapacityPolicy,
}

impl<V> Default for LinearProbeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LinearProbeTable<V> {
    /// Creates an empty table using the default capacity sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(CapacityPolicy::default())
    }

    /// Creates an empty table sized by the first entry of `capacities`.
    #[must_use]
    pub fn with_capacities(capacities: CapacityPolicy) -> Self {
        let initial = capacities.first().copied().unwrap_or(2);

        Self {
            slots: empty_slots(initial),
            size_index: 0,
            count: 0,
            capacities,
        }
    }

    /// Number of slots (not the number of entries).
    #[must_use]
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn slot(&self, pos: usize) -> Option<&(String, V)> {
        self.slots.get(pos).and_then(Option::as_ref)
    }

    /// Finds the slot holding `key`, or the empty slot where it would go.
    ///
    /// Walks at most `table_size` slots, wrapping around.
    fn linear_probe(&self, key: &str, is_insert: bool) -> Result<usize> {
        let size = self.table_size();
        let mut pos = polynomial(key, size);

        for _ in 0..size {
            match self.slots.get(pos) {
                Some(None) => {
                    return if is_insert {
                        Ok(pos)
                    } else {
                        Err(Error::KeyNotFound(key.into()))
                    };
                }
                Some(Some((k, _))) if k == key => return Ok(pos),
                _ => pos = (pos + 1) % size,
            }
        }

        if is_insert {
            Err(Error::Full(size))
        } else {
            Err(Error::KeyNotFound(key.into()))
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&V> {
        let pos = self.linear_probe(key, false)?;
        self.slot(pos)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::KeyNotFound(key.into()))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        let pos = self.linear_probe(key, false)?;
        self.slots
            .get_mut(pos)
            .and_then(Option::as_mut)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::KeyNotFound(key.into()))
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.linear_probe(key, false).is_ok()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if the key is new and every slot is taken.
    /// The table is left unchanged in that case.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let key = key.into();
        let pos = self.linear_probe(&key, true)?;

        let Some(slot) = self.slots.get_mut(pos) else {
            return Err(Error::Full(self.table_size()));
        };

        let previous = slot.replace((key, value)).map(|(_, v)| v);

        if previous.is_none() {
            self.count += 1;

            if 2 * self.count > self.table_size() {
                self.rehash();
            }
        }

        Ok(previous)
    }

    /// Removes `key`, returning its value.
    ///
    /// The cluster following the freed slot is taken out and reinserted so
    /// every remaining key stays reachable from its home slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent; nothing is modified.
    pub fn delete(&mut self, key: &str) -> Result<V> {
        let pos = self.linear_probe(key, false)?;

        let Some((_, value)) = self.slots.get_mut(pos).and_then(Option::take) else {
            return Err(Error::KeyNotFound(key.into()));
        };
        self.count -= 1;

        let size = self.table_size();
        let mut next = (pos + 1) % size;
        let mut moved = 0usize;

        while let Some((k, v)) = self.slots.get_mut(next).and_then(Option::take) {
            // At least one slot is free, so the probe cannot fail
            let home = self.linear_probe(&k, true)?;
            if let Some(slot) = self.slots.get_mut(home) {
                *slot = Some((k, v));
            }
            moved += 1;
            next = (next + 1) % size;
        }

        if moved > 0 {
            log::trace!("delete: back-shifted {moved} entries after slot {pos}");
        }

        Ok(value)
    }

    /// Moves every entry into a table of the next capacity in the sequence.
    ///
    /// Does nothing once the sequence is exhausted.
    fn rehash(&mut self) {
        let next = self.size_index + 1;

        let Some(capacity) = self.capacities.get(next) else {
            if next == self.capacities.len() {
                log::warn!(
                    "capacity sequence exhausted at {} slots, load may now exceed one half",
                    self.table_size(),
                );
                // Park past the end so the warning fires once
                self.size_index = next;
            }
            return;
        };

        log::debug!(
            "rehash: {} -> {capacity} slots ({} entries)",
            self.table_size(),
            self.count,
        );

        self.size_index = next;
        let old = std::mem::replace(&mut self.slots, empty_slots(capacity));

        for (key, value) in old.into_vec().into_iter().flatten() {
            let mut pos = polynomial(&key, capacity);

            while let Some(Some(_)) = self.slots.get(pos) {
                pos = (pos + 1) % capacity;
            }

            if let Some(slot) = self.slots.get_mut(pos) {
                *slot = Some((key, value));
            }
        }
    }

    /// Iterates over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.slots
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates mutably over `(key, value)` pairs in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> + '_ {
        self.slots
            .iter_mut()
            .flatten()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Returns all keys in slot order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Returns all values in slot order.
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }
}

/// Writes `{key: value, ...}` in slot order.
pub(crate) fn write_entries<'a, K, V>(
    f: &mut std::fmt::Formatter<'_>,
    entries: impl Iterator<Item = (K, &'a V)>,
) -> std::fmt::Result
where
    K: std::fmt::Display,
    V: std::fmt::Display + 'a,
{
    write!(f, "{{")?;
    for (idx, (key, value)) in entries.enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    write!(f, "}}")
}

impl<V: std::fmt::Display> std::fmt::Display for LinearProbeTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_entries(f, self.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn linear_probe_set_get() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();

        assert_eq!(None, table.set("a", 1)?);
        assert_eq!(None, table.set("b", 2)?);
        assert_eq!(Some(1), table.set("a", 3)?);

        assert_eq!(&3, table.get("a")?);
        assert_eq!(&2, table.get("b")?);
        assert_eq!(2, table.len());
        assert_eq!(Err(Error::KeyNotFound("c".into())), table.get("c"));

        Ok(())
    }

    #[test]
    fn linear_probe_rehash_on_half_load() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();
        assert_eq!(5, table.table_size());

        table.set("a", 1)?;
        table.set("b", 2)?;
        assert_eq!(5, table.table_size());

        // 3 > 5 / 2
        table.set("c", 3)?;
        assert_eq!(13, table.table_size());

        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            assert_eq!(&v, table.get(k)?);
        }

        Ok(())
    }

    #[test]
    fn linear_probe_full() -> crate::Result<()> {
        let mut table = LinearProbeTable::with_capacities(CapacityPolicy::fixed(3));

        table.set("a", 1)?;
        table.set("b", 2)?;
        table.set("c", 3)?;
        assert_eq!(3, table.table_size());

        assert_eq!(Err(Error::Full(3)), table.set("d", 4));
        assert_eq!(3, table.len());

        // Overwriting still works in a full table
        assert_eq!(Some(3), table.set("c", 30)?);
        assert_eq!(&30, table.get("c")?);

        Ok(())
    }

    #[test]
    fn linear_probe_delete_back_shift() -> crate::Result<()> {
        // A single capacity keeps every key in one cluster
        let mut table = LinearProbeTable::with_capacities(CapacityPolicy::fixed(7));
        let keys = ["a", "h", "o", "v", "b", "i"];

        for (i, k) in keys.iter().enumerate() {
            table.set(*k, i)?;
        }

        for (i, k) in keys.iter().enumerate() {
            assert_eq!(i, table.delete(k)?);
            assert!(!table.contains(k));

            for (j, rest) in keys.iter().enumerate().skip(i + 1) {
                assert_eq!(&j, table.get(rest)?, "{rest} lost after deleting {k}");
            }
        }

        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn linear_probe_delete_missing_is_noop() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();
        table.set("a", 1)?;

        assert_eq!(Err(Error::KeyNotFound("b".into())), table.delete("b"));
        assert_eq!(1, table.len());
        assert_eq!(&1, table.get("a")?);

        Ok(())
    }

    #[test]
    fn linear_probe_keys_values() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();
        assert!(table.keys().is_empty());
        assert!(table.values().is_empty());

        table.set("x", 10)?;
        table.set("y", 20)?;

        let mut keys = table.keys();
        keys.sort_unstable();
        assert_eq!(vec!["x", "y"], keys);

        let mut values: Vec<_> = table.values().into_iter().copied().collect();
        values.sort_unstable();
        assert_eq!(vec![10, 20], values);

        Ok(())
    }

    #[test]
    fn linear_probe_get_mut() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();
        table.set("a", 1)?;
        *table.get_mut("a")? += 41;
        assert_eq!(&42, table.get("a")?);
        Ok(())
    }

    #[test]
    fn linear_probe_display_in_slot_order() -> crate::Result<()> {
        let mut table = LinearProbeTable::new();
        assert_eq!("{}", table.to_string());

        // "a" hashes to slot 2, "b" to slot 3
        table.set("b", 2)?;
        table.set("a", 1)?;
        assert_eq!("{a: 1, b: 2}", table.to_string());

        Ok(())
    }
}
