// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Number of slots in a trie node: one per lowercase letter, plus the terminal slot.
pub const TRIE_WIDTH: usize = 27;

/// Slot used once a key has no character left at the current level.
pub const TERMINAL_BUCKET: usize = TRIE_WIDTH - 1;

const HASH_SEED: u64 = 31_415;
const HASH_BASE: u64 = 31;

/// Horner-style polynomial string hash, reduced by `table_size`.
///
/// The multiplier evolves per character modulo `table_size - 1`,
/// so `table_size` must be at least 2.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is reduced modulo a usize table size"
)]
pub fn polynomial(key: &str, table_size: usize) -> usize {
    debug_assert!(table_size >= 2, "table size too small to hash into");

    let size = table_size as u64;
    let mut value = 0u64;
    let mut a = HASH_SEED;

    for c in key.chars() {
        value = (u64::from(u32::from(c)) + a * value) % size;
        a = a * HASH_BASE % (size - 1);
    }

    value as usize
}

/// Trie bucket of `key` at depth `level`.
pub fn bucket(key: &str, level: usize) -> usize {
    match key.chars().nth(level) {
        Some(c) => u32::from(c) as usize % (TRIE_WIDTH - 1),
        None => TERMINAL_BUCKET,
    }
}

/// Returns `true` if the two keys reach different buckets at some level `>= level`.
pub fn separable(a: &str, b: &str, level: usize) -> bool {
    let depth = a.chars().count().max(b.chars().count());
    (level..depth).any(|l| bucket(a, l) != bucket(b, l))
}
