// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! In-memory hash tables with explicit collision handling, and branching trails of mountains.
//!
//! ##### About
//!
//! This crate exports three string-keyed tables:
//!
//! - [`LinearProbeTable`]: open addressing with linear probing, growing along a
//!   configurable sequence of (prime) capacities and deleting with back-shifting
//! - [`DoubleKeyTable`]: a linear probe table of linear probe tables, addressed by
//!   `(key1, key2)`
//! - [`InfiniteHashTable`]: a trie of 27-slot nodes that indexes one character per
//!   level, splitting on collision and collapsing again on deletion
//!
//! On top of these, [`Trail`] models a path of [`Mountain`]s that may fork into
//! two branches and join again, with single-path walks driven by a
//! [`WalkerPersonality`] and full path enumeration.
//!
//! ```
//! use probe_tables::DoubleKeyTable;
//!
//! let mut table = DoubleKeyTable::new();
//! table.set("5", "Everest", 8_849)?;
//! table.set("5", "K2", 8_611)?;
//!
//! assert_eq!(&8_849, table.get("5", "Everest")?);
//! assert_eq!(1, table.len());
//! #
//! # Ok::<(), probe_tables::Error>(())
//! ```
//!
//! Tables never grow past the last capacity of their [`CapacityPolicy`]; an insert
//! that finds no free slot fails with [`Error::Full`].

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]

/// Configuration
pub mod config;

mod double_key;
mod error;
mod hash;
mod infinite;
mod linear_probe;
mod manager;
mod mountain;
mod organiser;

/// Branching trails
pub mod trail;

pub use {
    config::{CapacityPolicy, Config},
    double_key::{BoxedIterator, DoubleKeyTable},
    error::{Error, Result},
    infinite::{InfiniteHashTable, Iter as InfiniteIter},
    linear_probe::LinearProbeTable,
    manager::MountainManager,
    mountain::Mountain,
    organiser::MountainOrganiser,
    trail::{
        BottomWalker, LazyWalker, TopWalker, Trail, TrailSeries, TrailSplit, TrailStore,
        WalkerPersonality,
    },
};
