// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Branching trails of mountains.
//!
//! A trail is either empty, a mountain followed by the rest of the trail
//! ([`TrailSeries`]), or a fork ([`TrailSplit`]) whose two branches join back
//! into a following trail:
//!
//! ```text
//!    ___path_top____
//!   /               \
//! -<                 >-path_follow-
//!   \__path_bottom__/
//! ```
//!
//! Trails are persistent: editing operations return a new trail or store and
//! leave the receiver untouched. Sub-trails are shared behind an [`Arc`], so an
//! edit copies only the parts it changes.

mod personality;

pub use personality::{BottomWalker, LazyWalker, TopWalker, WalkerPersonality};

use crate::Mountain;
use std::sync::Arc;

/// A fork in the trail
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrailSplit {
    /// Upper branch
    pub path_top: Trail,

    /// Lower branch
    pub path_bottom: Trail,

    /// Trail taken after either branch
    pub path_follow: Trail,
}

impl TrailSplit {
    /// Creates a split from its three parts.
    #[must_use]
    pub fn new(path_top: Trail, path_bottom: Trail, path_follow: Trail) -> Self {
        Self {
            path_top,
            path_bottom,
            path_follow,
        }
    }

    /// Removes the branch, leaving only the following trail.
    #[must_use]
    pub fn remove_branch(&self) -> Option<TrailStore> {
        self.path_follow.store.as_deref().cloned()
    }
}

/// A mountain, followed by the rest of the trail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailSeries {
    /// The mountain at the start of this series
    pub mountain: Mountain,

    /// Everything after the mountain
    pub following: Trail,
}

impl TrailSeries {
    /// Creates a series from a mountain and what follows it.
    #[must_use]
    pub fn new(mountain: Mountain, following: Trail) -> Self {
        Self {
            mountain,
            following,
        }
    }

    /// Removes the mountain at the beginning of this series.
    #[must_use]
    pub fn remove_mountain(&self) -> Option<TrailStore> {
        self.following.store.as_deref().cloned()
    }

    /// Adds a mountain in series before the current one.
    #[must_use]
    pub fn add_mountain_before(&self, mountain: Mountain) -> TrailStore {
        TrailStore::Series(Self::new(mountain, Trail::from(self.clone())))
    }

    /// Adds an empty branch, where the current series becomes the following path.
    #[must_use]
    pub fn add_empty_branch_before(&self) -> TrailStore {
        TrailStore::Split(TrailSplit::new(
            Trail::default(),
            Trail::default(),
            Trail::from(self.clone()),
        ))
    }

    /// Adds a mountain after the current mountain, but before the following trail.
    #[must_use]
    pub fn add_mountain_after(&self, mountain: Mountain) -> TrailStore {
        TrailStore::Series(Self::new(
            self.mountain.clone(),
            Trail::from(Self::new(mountain, self.following.clone())),
        ))
    }

    /// Adds an empty branch after the current mountain, but before the following trail.
    #[must_use]
    pub fn add_empty_branch_after(&self) -> TrailStore {
        TrailStore::Series(Self::new(
            self.mountain.clone(),
            Trail::from(TrailSplit::new(
                Trail::default(),
                Trail::default(),
                self.following.clone(),
            )),
        ))
    }
}

/// Contents of a non-empty trail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrailStore {
    /// A fork
    Split(TrailSplit),

    /// A mountain and what follows it
    Series(TrailSeries),
}

/// A (possibly empty) trail
///
/// Cloning is cheap: clones share their store.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    /// `None` for the empty trail
    pub store: Option<Arc<TrailStore>>,
}

impl Drop for Trail {
    fn drop(&mut self) {
        // Unlink iteratively, a long series would otherwise drop one frame per mountain
        let mut worklist: Vec<Arc<TrailStore>> = self.store.take().into_iter().collect();

        while let Some(store) = worklist.pop() {
            // Stores still shared with another trail are left to their last owner
            let Some(store) = Arc::into_inner(store) else {
                continue;
            };

            match store {
                TrailStore::Series(mut series) => {
                    worklist.extend(series.following.store.take());
                }
                TrailStore::Split(mut split) => {
                    worklist.extend(split.path_top.store.take());
                    worklist.extend(split.path_bottom.store.take());
                    worklist.extend(split.path_follow.store.take());
                }
            }
        }
    }
}

impl PartialEq for Trail {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];

        while let Some((left, right)) = pairs.pop() {
            match (left.store.as_ref(), right.store.as_ref()) {
                (None, None) => {}
                (Some(a), Some(b)) if Arc::ptr_eq(a, b) => {}
                (Some(a), Some(b)) => match (a.as_ref(), b.as_ref()) {
                    (TrailStore::Series(a), TrailStore::Series(b)) => {
                        if a.mountain != b.mountain {
                            return false;
                        }
                        pairs.push((&a.following, &b.following));
                    }
                    (TrailStore::Split(a), TrailStore::Split(b)) => {
                        pairs.push((&a.path_follow, &b.path_follow));
                        pairs.push((&a.path_bottom, &b.path_bottom));
                        pairs.push((&a.path_top, &b.path_top));
                    }
                    _ => return false,
                },
                _ => return false,
            }
        }

        true
    }
}

impl Eq for Trail {}

impl From<TrailStore> for Trail {
    fn from(store: TrailStore) -> Self {
        Self {
            store: Some(Arc::new(store)),
        }
    }
}

impl From<Option<TrailStore>> for Trail {
    fn from(store: Option<TrailStore>) -> Self {
        Self {
            store: store.map(Arc::new),
        }
    }
}

impl From<TrailSeries> for Trail {
    fn from(series: TrailSeries) -> Self {
        TrailStore::Series(series).into()
    }
}

impl From<TrailSplit> for Trail {
    fn from(split: TrailSplit) -> Self {
        TrailStore::Split(split).into()
    }
}

/// Traversal state of one path being enumerated
struct PathState<'a> {
    current: &'a Trail,
    mountains: Vec<&'a Mountain>,
    resume: Vec<&'a Trail>,
}

impl Trail {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the trail has no store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_none()
    }

    /// Adds a mountain before everything currently in the trail.
    #[must_use]
    pub fn add_mountain_before(&self, mountain: Mountain) -> Self {
        TrailSeries::new(mountain, self.clone()).into()
    }

    /// Adds an empty branch before everything currently in the trail.
    #[must_use]
    pub fn add_empty_branch_before(&self) -> Self {
        TrailSplit::new(Self::default(), Self::default(), self.clone()).into()
    }

    /// Follows a single path, letting `personality` pick a branch at every fork.
    ///
    /// Every mountain passed is reported through [`WalkerPersonality::add_mountain`].
    pub fn follow_path<P: WalkerPersonality + ?Sized>(&self, personality: &mut P) {
        let mut resume: Vec<&Self> = Vec::new();
        let mut current = self;

        loop {
            match current.store.as_deref() {
                Some(TrailStore::Series(series)) => {
                    personality.add_mountain(&series.mountain);
                    current = &series.following;
                }
                Some(TrailStore::Split(split)) => {
                    resume.push(&split.path_follow);

                    current = if personality.select_branch(&split.path_top, &split.path_bottom) {
                        &split.path_top
                    } else {
                        &split.path_bottom
                    };
                }
                None => match resume.pop() {
                    Some(next) => current = next,
                    None => return,
                },
            }
        }
    }

    /// Returns every mountain on the trail once, top branches before bottom ones.
    #[must_use]
    pub fn collect_all_mountains(&self) -> Vec<Mountain> {
        let mut mountains = Vec::new();
        let mut stack = vec![self];

        while let Some(trail) = stack.pop() {
            match trail.store.as_deref() {
                Some(TrailStore::Series(series)) => {
                    mountains.push(series.mountain.clone());
                    stack.push(&series.following);
                }
                Some(TrailStore::Split(split)) => {
                    stack.push(&split.path_follow);
                    stack.push(&split.path_bottom);
                    stack.push(&split.path_top);
                }
                None => {}
            }
        }

        mountains
    }

    /// Enumerates every path through the trail, taking both branches at each fork.
    ///
    /// Paths are yielded depth-first, top branch first.
    fn all_paths(&self) -> Vec<Vec<&Mountain>> {
        let mut paths = Vec::new();
        let mut worklist = vec![PathState {
            current: self,
            mountains: Vec::new(),
            resume: Vec::new(),
        }];

        while let Some(mut state) = worklist.pop() {
            loop {
                match state.current.store.as_deref() {
                    Some(TrailStore::Series(series)) => {
                        state.mountains.push(&series.mountain);
                        state.current = &series.following;
                    }
                    Some(TrailStore::Split(split)) => {
                        state.resume.push(&split.path_follow);

                        // The bottom branch gets its own copy of the path so far
                        worklist.push(PathState {
                            current: &split.path_bottom,
                            mountains: state.mountains.clone(),
                            resume: state.resume.clone(),
                        });

                        state.current = &split.path_top;
                    }
                    None => match state.resume.pop() {
                        Some(next) => state.current = next,
                        None => {
                            paths.push(state.mountains);
                            break;
                        }
                    },
                }
            }
        }

        paths
    }

    /// Returns all paths containing exactly `k` mountains.
    ///
    /// Paths that take different branches are distinct, even if they pass the
    /// same mountains.
    #[must_use]
    pub fn length_k_paths(&self, k: usize) -> Vec<Vec<Mountain>> {
        self.all_paths()
            .into_iter()
            .filter(|path| path.len() == k)
            .map(|path| path.into_iter().cloned().collect())
            .collect()
    }
}
