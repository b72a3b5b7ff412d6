// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{Error, Mountain, Result};

/// Keeps mountains sorted by their natural order (length, then name)
#[derive(Clone, Debug, Default)]
pub struct MountainOrganiser {
    mountains: Vec<Mountain>,
}

impl MountainOrganiser {
    /// Creates an empty organiser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mountains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mountains.len()
    }

    /// Returns `true` if there are no mountains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mountains.is_empty()
    }

    /// Returns the rank of `mountain` among all added mountains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] with the mountain's name if it was never added.
    pub fn cur_position(&self, mountain: &Mountain) -> Result<usize> {
        self.mountains
            .binary_search(mountain)
            .map_err(|_| Error::KeyNotFound(mountain.name.clone()))
    }

    /// Adds mountains, keeping the whole list sorted.
    pub fn add_mountains(&mut self, mountains: impl IntoIterator<Item = Mountain>) {
        self.mountains.extend(mountains);

        // NOTE: The existing prefix is one sorted run, which the stable sort merges cheaply
        self.mountains.sort();
    }

    /// Iterates over the mountains in order.
    pub fn iter(&self) -> impl Iterator<Item = &Mountain> + '_ {
        self.mountains.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn organiser_positions() -> crate::Result<()> {
        let m1 = Mountain::new("m1", 2, 2);
        let m2 = Mountain::new("m2", 2, 2);
        let m3 = Mountain::new("m3", 3, 3);
        let m4 = Mountain::new("m4", 3, 1);
        let m5 = Mountain::new("m5", 4, 4);

        let mut organiser = MountainOrganiser::new();
        organiser.add_mountains([m1.clone(), m2.clone()]);
        assert_eq!(0, organiser.cur_position(&m1)?);
        assert_eq!(1, organiser.cur_position(&m2)?);

        organiser.add_mountains([m4.clone(), m3.clone(), m5.clone()]);
        assert_eq!(0, organiser.cur_position(&m4)?);
        assert_eq!(1, organiser.cur_position(&m1)?);
        assert_eq!(2, organiser.cur_position(&m2)?);
        assert_eq!(3, organiser.cur_position(&m3)?);
        assert_eq!(4, organiser.cur_position(&m5)?);
        assert_eq!(5, organiser.len());

        let missing = Mountain::new("m6", 1, 1);
        assert_eq!(
            Err(Error::KeyNotFound("m6".into())),
            organiser.cur_position(&missing),
        );

        Ok(())
    }
}
