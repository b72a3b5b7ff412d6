// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{Trail, TrailStore};
use crate::Mountain;

/// Decides which branch to take when following a trail
pub trait WalkerPersonality {
    /// Returns `true` to take `top`, `false` to take `bottom`.
    fn select_branch(&mut self, top: &Trail, bottom: &Trail) -> bool;

    /// Called for every mountain passed, in order.
    fn add_mountain(&mut self, mountain: &Mountain);
}

/// Always takes the top branch
#[derive(Clone, Debug, Default)]
pub struct TopWalker {
    /// Mountains passed so far
    pub mountains: Vec<Mountain>,
}

impl WalkerPersonality for TopWalker {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> bool {
        true
    }

    fn add_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }
}

/// Always takes the bottom branch
#[derive(Clone, Debug, Default)]
pub struct BottomWalker {
    /// Mountains passed so far
    pub mountains: Vec<Mountain>,
}

impl WalkerPersonality for BottomWalker {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> bool {
        false
    }

    fn add_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }
}

/// Takes the branch with fewer mountains before its next fork, preferring top on ties
#[derive(Clone, Debug, Default)]
pub struct LazyWalker {
    /// Mountains passed so far
    pub mountains: Vec<Mountain>,
}

/// Counts mountains in series until the trail forks or ends.
fn mountains_until_fork(trail: &Trail) -> usize {
    let mut count = 0;
    let mut current = trail;

    while let Some(TrailStore::Series(series)) = current.store.as_deref() {
        count += 1;
        current = &series.following;
    }

    count
}

impl WalkerPersonality for LazyWalker {
    fn select_branch(&mut self, top: &Trail, bottom: &Trail) -> bool {
        mountains_until_fork(top) <= mountains_until_fork(bottom)
    }

    fn add_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }
}
