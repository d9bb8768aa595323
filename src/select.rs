//! In-place selection of a chunk's boundary median
//!
//! Selection delegates to the standard library's `select_nth_unstable`, an
//! introselect: expected O(n) quickselect that falls back to
//! median-of-medians, giving a worst-case O(n) bound. No second buffer is
//! allocated; the chunk is only rearranged.
//!
//! Calling it concurrently on disjoint chunks is safe by construction, since
//! each call needs `&mut` access to its own slice.

use thiserror::Error;

/// Errors that can occur during selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("selection index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Position of the boundary median in a chunk of `len` elements: `len / 2`
///
/// For even `len` this is the upper of the two middle positions, so a
/// two-element chunk publishes its larger value.
pub fn median_index(len: usize) -> usize {
    len / 2
}

/// Rearrange `chunk` so that `chunk[k]` holds its sorted-order value
///
/// Everything before `k` compares `<=` the selected value and everything
/// after compares `>=`; neither side is otherwise ordered.
pub fn select_in_place<T: Ord>(chunk: &mut [T], k: usize) -> Result<&T, SelectError> {
    if k >= chunk.len() {
        return Err(SelectError::IndexOutOfBounds {
            index: k,
            len: chunk.len(),
        });
    }
    let (_, selected, _) = chunk.select_nth_unstable(k);
    Ok(selected)
}

/// Select the value at [`median_index`] of `chunk`, or `None` if it is empty
pub fn select_median<T: Ord + Copy>(chunk: &mut [T]) -> Option<T> {
    let k = median_index(chunk.len());
    select_in_place(chunk, k).ok().copied()
}
