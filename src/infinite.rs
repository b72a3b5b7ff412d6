// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Unbounded hash table that resolves collisions by growing levels.
//!
//! Every node is an array of [`TRIE_WIDTH`] slots. At depth `level`, a key
//! goes into the slot picked by its `level`-th character; a key with no
//! character left goes into the terminal slot. When two keys land on the same
//! slot, the slot is replaced by a child node one level deeper holding both.
//!
//! Deleting keys pulls lone survivors back up, so every node below the root
//! holds at least two keys.

use crate::{
    hash::{bucket, separable, TRIE_WIDTH},
    linear_probe::write_entries,
    Error, Result,
};

#[derive(Clone, Debug)]
enum Slot<V> {
    Empty,

    Leaf {
        key: String,
        value: V,
    },

    /// Child node; `prefix` holds the leading characters of the key that forced the split
    Table {
        prefix: String,
        node: Box<Node<V>>,
    },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Clone, Debug)]
struct Node<V> {
    slots: [Slot<V>; TRIE_WIDTH],
    level: usize,

    /// Number of keys stored anywhere beneath this node
    count: usize,
}

impl<V> Node<V> {
    fn new(level: usize) -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::Empty),
            level,
            count: 0,
        }
    }

    #[expect(clippy::indexing_slicing, reason = "buckets are below TRIE_WIDTH")]
    fn slot(&self, key: &str) -> &Slot<V> {
        &self.slots[bucket(key, self.level)]
    }

    #[expect(clippy::indexing_slicing, reason = "buckets are below TRIE_WIDTH")]
    fn slot_mut(&mut self, key: &str) -> &mut Slot<V> {
        &mut self.slots[bucket(key, self.level)]
    }

    fn insert(&mut self, key: String, value: V) -> Result<Option<V>> {
        let level = self.level;
        let slot = self.slot_mut(&key);

        let previous = match slot {
            Slot::Empty => {
                *slot = Slot::Leaf { key, value };
                None
            }
            Slot::Leaf {
                key: existing,
                value: old,
            } if *existing == key => Some(std::mem::replace(old, value)),
            Slot::Leaf { key: existing, .. } => {
                if !separable(existing, &key, level + 1) {
                    return Err(Error::KeyCollision(existing.clone(), key));
                }

                let prefix: String = key.chars().take(level + 1).collect();
                log::trace!("split at level {level}: {existing:?} and {key:?} under {prefix:?}");

                // Both inserts succeed once the keys are known to be separable
                let mut node = Box::new(Node::new(level + 1));
                if let Slot::Leaf {
                    key: existing,
                    value: old,
                } = std::mem::take(slot)
                {
                    node.insert(existing, old)?;
                }
                node.insert(key, value)?;

                *slot = Slot::Table { prefix, node };
                None
            }
            Slot::Table { node, .. } => node.insert(key, value)?,
        };

        if previous.is_none() {
            self.count += 1;
        }

        Ok(previous)
    }

    /// Removes `key` from the subtree, collapsing lone-leaf children on the way up.
    ///
    /// Returns `None` without modifying anything if the key is absent.
    fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.slot_mut(key);

        let value = match slot {
            Slot::Empty => return None,
            Slot::Leaf { key: existing, .. } if existing.as_str() != key => return None,
            Slot::Leaf { .. } => {
                let Slot::Leaf { value, .. } = std::mem::take(slot) else {
                    return None;
                };
                value
            }
            Slot::Table { prefix, node } => {
                let value = node.remove(key)?;

                if node.count == 1 {
                    if let Some(leaf) = node.take_sole_leaf() {
                        log::trace!("collapse {prefix:?} from level {}", node.level);
                        *slot = leaf;
                    }
                }

                value
            }
        };

        self.count -= 1;
        Some(value)
    }

    /// Takes the only occupied slot out of this node if it is a leaf.
    ///
    /// A lone subtree is left in place.
    fn take_sole_leaf(&mut self) -> Option<Slot<V>> {
        let mut occupied = self
            .slots
            .iter_mut()
            .filter(|slot| !matches!(slot, Slot::Empty));

        let sole = occupied.next()?;
        if occupied.next().is_some() {
            return None;
        }

        match sole {
            Slot::Leaf { .. } => Some(std::mem::take(sole)),
            Slot::Table { .. } | Slot::Empty => None,
        }
    }
}

/// Hash table of unbounded depth keyed by strings.
///
/// Keys are spread over [`TRIE_WIDTH`] buckets by their character at each
/// depth, see the module docs.
#[derive(Clone, Debug)]
pub struct InfiniteHashTable<V> {
    root: Node<V>,
}

impl<V> Default for InfiniteHashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> InfiniteHashTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { root: Node::new(0) }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.count
    }

    /// Returns `true` if the table holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.count == 0
    }

    /// Walks from the root towards `key`, calling `visit` with every slot index.
    fn descend(&self, key: &str, mut visit: impl FnMut(usize)) -> Result<&V> {
        let mut node = &self.root;

        loop {
            visit(bucket(key, node.level));

            match node.slot(key) {
                Slot::Table { node: child, .. } => node = child.as_ref(),
                Slot::Leaf {
                    key: existing,
                    value,
                } if existing == key => return Ok(value),
                Slot::Leaf { .. } | Slot::Empty => return Err(Error::KeyNotFound(key.into())),
            }
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.descend(key, |_| {})
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Returns the slot indices leading from the root to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get_location(&self, key: &str) -> Result<Vec<usize>> {
        let mut path = Vec::new();
        self.descend(key, |pos| path.push(pos))?;
        Ok(path)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyCollision`] if `key` can never be told apart from
    /// a stored key by its buckets, which only happens for characters outside
    /// `a..=z` sharing a bucket. The table is not modified in that case.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        self.root.insert(key.into(), value)
    }

    /// Removes `key`, returning its value.
    ///
    /// Nodes left with a single key are folded back into their parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent; nothing is modified.
    pub fn delete(&mut self, key: &str) -> Result<V> {
        self.root
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.into()))
    }

    /// Iterates over all `(key, value)` pairs, depth-first in bucket order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![self.root.slots.iter()],
        }
    }

    /// Returns all keys, depth-first in bucket order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Returns all keys in lexicographic order.
    #[must_use]
    pub fn sort_keys(&self) -> Vec<&str> {
        let mut keys = self.keys();
        keys.sort_unstable();
        keys
    }
}

/// Writes `{key: value, ...}`, depth-first in bucket order.
impl<V: std::fmt::Display> std::fmt::Display for InfiniteHashTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_entries(f, self.iter())
    }
}

/// Depth-first iterator over an [`InfiniteHashTable`]
pub struct Iter<'a, V> {
    stack: Vec<std::slice::Iter<'a, Slot<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slots = self.stack.last_mut()?;

            match slots.next() {
                None => {
                    self.stack.pop();
                }
                Some(Slot::Empty) => {}
                Some(Slot::Leaf { key, value }) => return Some((key.as_str(), value)),
                Some(Slot::Table { node, .. }) => self.stack.push(node.slots.iter()),
            }
        }
    }
}

#[cfg(test)]
impl<V> InfiniteHashTable<V> {
    /// Checks the per-node counts and that no node below the root holds fewer than two keys.
    fn assert_invariants(&self) {
        fn walk<V>(node: &Node<V>, is_root: bool) -> usize {
            let mut count = 0;

            for slot in &node.slots {
                match slot {
                    Slot::Empty => {}
                    Slot::Leaf { .. } => count += 1,
                    Slot::Table { node: child, .. } => {
                        assert_eq!(node.level + 1, child.level);
                        count += walk(child, false);
                    }
                }
            }

            assert_eq!(count, node.count, "stale count at level {}", node.level);
            if !is_root {
                assert!(count >= 2, "uncollapsed node at level {}", node.level);
            }
            count
        }

        walk(&self.root, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::TERMINAL_BUCKET;
    use test_log::test;

    fn sample() -> crate::Result<InfiniteHashTable<u32>> {
        let mut table = InfiniteHashTable::new();
        table.set("lin", 1)?;
        table.set("leg", 2)?;
        table.set("mine", 3)?;
        table.set("linked", 4)?;
        table.assert_invariants();
        Ok(table)
    }

    #[test]
    fn infinite_shared_prefix() -> crate::Result<()> {
        let table = sample()?;

        assert_eq!(&1, table.get("lin")?);
        assert_eq!(&2, table.get("leg")?);
        assert_eq!(&3, table.get("mine")?);
        assert_eq!(&4, table.get("linked")?);
        assert_eq!(4, table.len());

        assert_eq!(vec![4, 1, 6, TERMINAL_BUCKET], table.get_location("lin")?);
        assert_eq!(vec![4, 1, 6, 3], table.get_location("linked")?);
        assert_eq!(vec![4, 23], table.get_location("leg")?);
        assert_eq!(vec![5], table.get_location("mine")?);

        Ok(())
    }

    #[test]
    fn infinite_delete_collapses_chain() -> crate::Result<()> {
        let mut table = sample()?;

        assert_eq!(4, table.delete("linked")?);
        table.assert_invariants();

        assert_eq!(&1, table.get("lin")?);
        assert_eq!(vec![4, 1], table.get_location("lin")?);
        assert_eq!(3, table.len());

        assert_eq!(2, table.delete("leg")?);
        table.assert_invariants();
        assert_eq!(vec![4], table.get_location("lin")?);

        Ok(())
    }

    #[test]
    fn infinite_delete_missing_is_noop() -> crate::Result<()> {
        let mut table = sample()?;

        assert_eq!(Err(Error::KeyNotFound("li".into())), table.delete("li"));
        assert_eq!(Err(Error::KeyNotFound("zzz".into())), table.delete("zzz"));
        assert_eq!(4, table.len());
        table.assert_invariants();

        Ok(())
    }

    #[test]
    fn infinite_overwrite_in_place() -> crate::Result<()> {
        let mut table = sample()?;
        let before = table.get_location("linked")?;

        assert_eq!(Some(4), table.set("linked", 40)?);
        assert_eq!(&40, table.get("linked")?);
        assert_eq!(before, table.get_location("linked")?);
        assert_eq!(4, table.len());

        Ok(())
    }

    #[test]
    fn infinite_empty_key() -> crate::Result<()> {
        let mut table = InfiniteHashTable::new();
        table.set("", 0)?;
        table.set("a", 1)?;

        assert_eq!(vec![TERMINAL_BUCKET], table.get_location("")?);
        assert_eq!(&0, table.get("")?);
        assert_eq!(&1, table.get("a")?);

        Ok(())
    }

    #[test]
    fn infinite_prefix_keys() -> crate::Result<()> {
        let mut table = InfiniteHashTable::new();
        for (i, key) in ["a", "aa", "aaa", "aaaa"].into_iter().enumerate() {
            table.set(key, i)?;
        }
        table.assert_invariants();

        assert_eq!(vec![19, 19, 19, 19], table.get_location("aaaa")?);
        assert_eq!(vec![19, 19, 19, TERMINAL_BUCKET], table.get_location("aaa")?);

        for (i, key) in ["a", "aa", "aaa", "aaaa"].into_iter().enumerate() {
            assert_eq!(&i, table.get(key)?);
        }

        assert_eq!(1, table.delete("aa")?);
        table.assert_invariants();
        assert_eq!(3, table.len());

        Ok(())
    }

    #[test]
    fn infinite_key_collision() -> crate::Result<()> {
        let mut table = InfiniteHashTable::new();
        table.set("a", 1)?;

        // 'a' and '{' share a bucket and both keys end at level 1
        assert_eq!(
            Err(Error::KeyCollision("a".into(), "{".into())),
            table.set("{", 2),
        );
        assert_eq!(1, table.len());
        assert_eq!(vec![19], table.get_location("a")?);
        table.assert_invariants();

        Ok(())
    }

    #[test]
    fn infinite_iter_and_sort_keys() -> crate::Result<()> {
        let table = sample()?;
        assert_eq!(4, table.iter().count());
        assert_eq!(vec!["leg", "lin", "linked", "mine"], table.sort_keys());

        let empty = InfiniteHashTable::<u8>::new();
        assert!(empty.keys().is_empty());
        assert!(empty.is_empty());

        Ok(())
    }

    #[test]
    fn infinite_display_depth_first() -> crate::Result<()> {
        assert_eq!("{}", InfiniteHashTable::<u32>::new().to_string());
        assert_eq!(
            "{linked: 4, lin: 1, leg: 2, mine: 3}",
            sample()?.to_string(),
        );
        Ok(())
    }
}
