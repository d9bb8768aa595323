//! Shared input buffer split into exclusive lane chunks
//!
//! A [`LaneArena`] borrows the caller's buffer mutably for the duration of a
//! partition run and hands out one [`LaneChunk`] per lane. Chunks are carved
//! with successive `split_at_mut` calls, so two lanes can never hold
//! overlapping views: the borrow checker rejects it rather than a runtime
//! lock.
//!
//! # Example
//!
//! ```
//! use lanesplit::{LaneArena, LaneLayout};
//!
//! let mut data = vec![4, 3, 2, 1, 8, 7];
//! let layout = LaneLayout::new(data.len(), 3).unwrap();
//! let arena = LaneArena::new(&mut data, &layout).unwrap();
//!
//! let mut chunks = arena.split();
//! chunks[1].sort_unstable();
//! assert_eq!(&*chunks[1], &[1, 2]);
//! assert_eq!(chunks[2].range().start, 4);
//! ```

use std::ops::{Deref, DerefMut};

use crate::lanes::{LaneError, LaneLayout, LaneRange};

/// The input buffer of one partition run, paired with its layout
#[derive(Debug)]
pub struct LaneArena<'a, T> {
    data: &'a mut [T],
    layout: LaneLayout,
}

impl<'a, T> LaneArena<'a, T> {
    /// Pair `data` with `layout`
    ///
    /// Fails if the layout was computed for a different length.
    pub fn new(data: &'a mut [T], layout: &LaneLayout) -> Result<Self, LaneError> {
        if data.len() != layout.len() {
            return Err(LaneError::LengthMismatch {
                expected: layout.len(),
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            layout: layout.clone(),
        })
    }

    /// Returns the layout this arena is split by
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// Returns the number of elements in the arena
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Split the buffer into one exclusive chunk per lane, in lane order
    pub fn split(self) -> Vec<LaneChunk<'a, T>> {
        let mut chunks = Vec::with_capacity(self.layout.lane_count());
        let mut rest = self.data;
        for range in &self.layout {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            chunks.push(LaneChunk { range, data: head });
            rest = tail;
        }
        debug_assert!(rest.is_empty());
        chunks
    }
}

/// A lane's exclusive, mutable view into the arena
#[derive(Debug)]
pub struct LaneChunk<'a, T> {
    range: LaneRange,
    data: &'a mut [T],
}

impl<'a, T> LaneChunk<'a, T> {
    /// Returns the arena range this chunk covers
    pub fn range(&self) -> LaneRange {
        self.range
    }

    /// Returns the owning lane's index
    pub fn lane(&self) -> usize {
        self.range.lane
    }

    /// Returns the data as a slice
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Returns the data as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }
}

impl<'a, T> Deref for LaneChunk<'a, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a, T> DerefMut for LaneChunk<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<'a, T> AsRef<[T]> for LaneChunk<'a, T> {
    fn as_ref(&self) -> &[T] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_matches_layout() {
        let mut data: Vec<i32> = (0..12).collect();
        let layout = LaneLayout::new(12, 4).unwrap();
        let chunks = LaneArena::new(&mut data, &layout).unwrap().split();

        assert_eq!(chunks.len(), 4);
        for (lane, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.lane(), lane);
            assert_eq!(chunk.range(), layout.range(lane));
            let expected: Vec<i32> = chunk.range().as_range().map(|i| i as i32).collect();
            assert_eq!(chunk.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn test_chunk_writes_land_in_buffer() {
        let mut data = vec![0i64; 6];
        let layout = LaneLayout::new(6, 3).unwrap();
        {
            let mut chunks = LaneArena::new(&mut data, &layout).unwrap().split();
            for chunk in chunks.iter_mut() {
                let lane = chunk.lane() as i64;
                chunk.as_mut_slice().fill(lane);
            }
        }
        assert_eq!(data, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut data = vec![1, 2, 3];
        let layout = LaneLayout::new(4, 2).unwrap();

        assert_eq!(
            LaneArena::new(&mut data, &layout).unwrap_err(),
            LaneError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_single_lane_takes_everything() {
        let mut data = vec![3, 1, 2];
        let layout = LaneLayout::new(3, 1).unwrap();
        let arena = LaneArena::new(&mut data, &layout).unwrap();
        assert_eq!(arena.len(), 3);
        assert!(!arena.is_empty());
        assert_eq!(arena.layout().lane_count(), 1);

        let chunks = arena.split();
        assert_eq!(chunks.len(), 1);
        assert_eq!(&*chunks[0], &[3, 1, 2]);
    }
}
