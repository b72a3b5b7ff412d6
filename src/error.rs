// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key is not in a single-key table
    KeyNotFound(String),

    /// Top-level key is not in a double-key table
    OuterKeyNotFound(String),

    /// Top-level key exists, but has no entry for the bottom-level key
    InnerKeyNotFound(String, String),

    /// Every slot was probed without finding room (table capacity)
    Full(usize),

    /// Two distinct keys produce the same bucket at every trie level
    /// (existing key, rejected key)
    KeyCollision(String, String),
}

impl Error {
    /// Returns `true` for any of the "key is absent" variants.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound(_) | Self::OuterKeyNotFound(_) | Self::InnerKeyNotFound(_, _)
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TableError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
