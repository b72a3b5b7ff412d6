// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Table sizes used when no policy is given.
///
/// No table is expected to exceed a million entries.
pub const DEFAULT_CAPACITIES: [usize; 19] = [
    5, 13, 29, 53, 97, 193, 389, 769, 1_543, 3_079, 6_151, 12_289, 24_593, 49_157, 98_317,
    196_613, 393_241, 786_433, 1_572_869,
];

/// Capacity policy
///
/// The sequence of table sizes a table moves through when it rehashes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CapacityPolicy(Vec<usize>);

impl std::ops::Deref for CapacityPolicy {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self(DEFAULT_CAPACITIES.to_vec())
    }
}

impl CapacityPolicy {
    /// Returns the capacity at `size_index`, or `None` once the sequence is exhausted.
    pub(crate) fn get(&self, size_index: usize) -> Option<usize> {
        self.0.get(size_index).copied()
    }

    /// Uses a single fixed capacity; tables never grow.
    #[must_use]
    pub fn fixed(capacity: usize) -> Self {
        Self::new(vec![capacity])
    }

    /// Constructs a custom capacity policy.
    ///
    /// # Panics
    ///
    /// Panics if the policy is empty or contains a capacity below 2.
    #[must_use]
    pub fn new(policy: impl Into<Vec<usize>>) -> Self {
        let policy = policy.into();
        assert!(!policy.is_empty(), "capacity policy may not be empty");
        assert!(
            policy.iter().all(|&c| c >= 2),
            "capacities must be at least 2",
        );
        Self(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn capacity_policy_get() {
        let policy = CapacityPolicy::new([3, 7]);
        assert_eq!(Some(3), policy.get(0));
        assert_eq!(Some(7), policy.get(1));
        assert_eq!(None, policy.get(2));
    }

    #[test]
    fn capacity_policy_default_starts_at_five() {
        let policy = CapacityPolicy::default();
        assert_eq!(Some(5), policy.get(0));
        assert_eq!(19, policy.len());
    }

    #[test]
    #[should_panic = "capacity policy may not be empty"]
    fn capacity_policy_empty() {
        let _ = CapacityPolicy::new(Vec::<usize>::new());
    }

    #[test]
    #[should_panic = "capacities must be at least 2"]
    fn capacity_policy_too_small() {
        let _ = CapacityPolicy::new([5, 1]);
    }
}
