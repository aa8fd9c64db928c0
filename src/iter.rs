use core::slice::ChunksExact;

use crate::core::StrideVec;

/// Iterator over the elements of a `StrideVec`
///
/// This iterator implements `Clone` and can be walked from both ends.
#[derive(Clone, Debug)]
pub struct StrideVecIter<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> StrideVecIter<'a> {
    pub(crate) fn new(live: &'a [u8], element_size: usize) -> Self {
        Self {
            chunks: live.chunks_exact(element_size),
        }
    }
}

impl<'a> Iterator for StrideVecIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.chunks.nth(n)
    }
}

impl DoubleEndedIterator for StrideVecIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks.next_back()
    }
}

impl ExactSizeIterator for StrideVecIter<'_> {}

impl core::iter::FusedIterator for StrideVecIter<'_> {}

impl<'a> IntoIterator for &'a StrideVec<'_> {
    type Item = &'a [u8];
    type IntoIter = StrideVecIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
