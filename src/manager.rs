// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{DoubleKeyTable, Mountain, Result};

/// Store of mountains, grouped by difficulty level
///
/// Backed by a [`DoubleKeyTable`] keyed by `(difficulty, name)`.
#[derive(Clone, Debug, Default)]
pub struct MountainManager {
    organisers: DoubleKeyTable<Mountain>,
}

impl MountainManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct difficulty levels.
    #[must_use]
    pub fn difficulty_count(&self) -> usize {
        self.organisers.len()
    }

    /// Adds a mountain, replacing one with the same name and difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Full`] if the underlying table has no room left.
    pub fn add_mountain(&mut self, mountain: Mountain) -> Result<()> {
        let difficulty = mountain.difficulty_level.to_string();
        let name = mountain.name.clone();
        self.organisers.set(&difficulty, name, mountain)?;
        Ok(())
    }

    /// Removes a mountain.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the mountain is not stored.
    pub fn remove_mountain(&mut self, mountain: &Mountain) -> Result<()> {
        self.organisers
            .delete(&mountain.difficulty_level.to_string(), &mountain.name)?;
        Ok(())
    }

    /// Replaces `old` with `new`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `old` is not stored; nothing is modified then.
    pub fn edit_mountain(&mut self, old: &Mountain, new: Mountain) -> Result<()> {
        self.remove_mountain(old)?;
        self.add_mountain(new)
    }

    /// Returns all mountains of the given difficulty, in mountain order.
    ///
    /// Empty if no mountain has that difficulty.
    #[must_use]
    pub fn mountains_with_difficulty(&self, difficulty: u32) -> Vec<Mountain> {
        let mut mountains: Vec<Mountain> = self
            .organisers
            .iter_values(Some(&difficulty.to_string()))
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        mountains.sort();
        mountains
    }

    /// Returns one group per difficulty level, easiest first.
    ///
    /// Each group is in mountain order.
    #[must_use]
    pub fn group_by_difficulty(&self) -> Vec<Vec<Mountain>> {
        let mut difficulties: Vec<u32> = self
            .organisers
            .iter()
            .map(|(_, _, mountain)| mountain.difficulty_level)
            .collect();

        difficulties.sort_unstable();
        difficulties.dedup();

        difficulties
            .into_iter()
            .map(|difficulty| self.mountains_with_difficulty(difficulty))
            .collect()
    }
}
