//! In-place relocation of element ranges.
//!
//! Both helpers work on the raw byte region and a stride. `copy_within` handles
//! overlapping source and destination in either direction.

/// Moves elements `[index, len)` right by `count` slots.
///
/// The caller guarantees that `bytes` holds at least `len + count` slots.
pub(crate) fn shift_right(bytes: &mut [u8], stride: usize, index: usize, len: usize, count: usize) {
    debug_assert!(count > 0);
    debug_assert!((len + count) * stride <= bytes.len());
    bytes.copy_within(index * stride..len * stride, (index + count) * stride);
}

/// Closes the gap `[index, index + count)` by moving elements `[index + count, len)` left.
pub(crate) fn shift_left(bytes: &mut [u8], stride: usize, index: usize, len: usize, count: usize) {
    debug_assert!(count > 0);
    debug_assert!(index + count <= len);
    bytes.copy_within((index + count) * stride..len * stride, index * stride);
}
