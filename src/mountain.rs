// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::cmp::Ordering;

/// A mountain on a trail
///
/// Ordered by length, then by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mountain {
    /// Name
    pub name: String,

    /// Difficulty level
    pub difficulty_level: u32,

    /// Length
    pub length: u32,
}

impl Mountain {
    /// Creates a new mountain.
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty_level: u32, length: u32) -> Self {
        Self {
            name: name.into(),
            difficulty_level,
            length,
        }
    }
}

impl Ord for Mountain {
    fn cmp(&self, other: &Self) -> Ordering {
        // Difficulty only breaks ties so that ordering agrees with equality
        (self.length, &self.name, self.difficulty_level).cmp(&(
            other.length,
            &other.name,
            other.difficulty_level,
        ))
    }
}

impl PartialOrd for Mountain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
