// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod capacity;

pub use capacity::{CapacityPolicy, DEFAULT_CAPACITIES};

/// Double-key table configuration builder
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Capacity sequence of the top-level table (keyed by the first key)
    pub capacities: CapacityPolicy,

    /// Capacity sequence of every bottom-level table (keyed by the second key)
    pub internal_capacities: CapacityPolicy,
}

impl Config {
    /// Initializes a new config with the default capacity sequences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity sequence of the top-level table.
    ///
    /// Does not affect the bottom-level tables.
    ///
    /// Defaults to [`DEFAULT_CAPACITIES`].
    #[must_use]
    pub fn capacities(mut self, policy: CapacityPolicy) -> Self {
        self.capacities = policy;
        self
    }

    /// Sets the capacity sequence of the bottom-level tables.
    ///
    /// Defaults to [`DEFAULT_CAPACITIES`].
    #[must_use]
    pub fn internal_capacities(mut self, policy: CapacityPolicy) -> Self {
        self.internal_capacities = policy;
        self
    }
}
