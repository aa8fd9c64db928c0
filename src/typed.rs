use alloc::vec::Vec;
use core::marker::PhantomData;
use core::mem::size_of;

use bytemuck::Pod;

use crate::core::StrideVec;
use crate::error::StrideVecError;

/// A typed view over a `StrideVec` whose elements are plain-old-data values of `T`.
///
/// Values are copied in and out with unaligned reads, so any byte buffer,
/// including a borrowed one, can back the vector.
#[derive(Debug)]
pub struct TypedVec<'a, T> {
    raw: StrideVec<'a>,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod> TypedVec<'a, T> {
    /// Creates an owned vector with the default allocator and policy.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` for zero-sized `T`, or
    /// `StrideVecError::Allocation` if the storage cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self, StrideVecError> {
        Ok(Self {
            raw: StrideVec::new(size_of::<T>(), capacity)?,
            _marker: PhantomData,
        })
    }

    /// Creates a vector over a caller-supplied buffer.
    ///
    /// # Errors
    ///
    /// See [`StrideVec::with_buffer`].
    pub fn with_buffer(buffer: &'a mut [u8]) -> Result<Self, StrideVecError> {
        Ok(Self {
            raw: StrideVec::with_buffer(size_of::<T>(), buffer)?,
            _marker: PhantomData,
        })
    }

    /// Wraps an existing vector.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if the element size of `raw`
    /// differs from `size_of::<T>()`.
    pub fn from_raw(raw: StrideVec<'a>) -> Result<Self, StrideVecError> {
        if raw.element_size() != size_of::<T>() {
            return Err(StrideVecError::InvalidArgument {
                reason: "element size does not match the value type",
            });
        }
        Ok(Self {
            raw,
            _marker: PhantomData,
        })
    }

    #[must_use]
    pub fn as_raw(&self) -> &StrideVec<'a> {
        &self.raw
    }

    #[must_use]
    pub fn into_raw(self) -> StrideVec<'a> {
        self.raw
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// # Errors
    ///
    /// See [`StrideVec::push`].
    pub fn push(&mut self, value: T) -> Result<(), StrideVecError> {
        self.raw.push(bytemuck::bytes_of(&value))
    }

    /// Removes and returns the last value.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if the vector is empty.
    pub fn pop(&mut self) -> Result<T, StrideVecError> {
        let Some(last_index) = self.len().checked_sub(1) else {
            return Err(StrideVecError::OutOfRange {
                index: 0,
                count: 1,
                size: 0,
            });
        };
        let last = self.get(last_index)?;
        self.raw.pop()?;
        Ok(last)
    }

    /// # Errors
    ///
    /// See [`StrideVec::get`].
    pub fn get(&self, index: usize) -> Result<T, StrideVecError> {
        self.raw.get(index).map(bytemuck::pod_read_unaligned)
    }

    /// # Errors
    ///
    /// See [`StrideVec::set`].
    pub fn set(&mut self, index: usize, value: T) -> Result<(), StrideVecError> {
        self.raw.set(index, bytemuck::bytes_of(&value))
    }

    /// # Errors
    ///
    /// See [`StrideVec::insert`].
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), StrideVecError> {
        self.raw.insert(index, bytemuck::bytes_of(&value))
    }

    /// Inserts all `values` at `index`, keeping their order.
    ///
    /// # Errors
    ///
    /// See [`StrideVec::insert_many`].
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StrideVecError> {
        self.raw.insert_many(index, bytemuck::cast_slice(values))
    }

    /// # Errors
    ///
    /// See [`StrideVec::delete`].
    pub fn delete(&mut self, index: usize) -> Result<(), StrideVecError> {
        self.raw.delete(index)
    }

    /// Index of the first value equal to `value`.
    #[must_use]
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.raw
            .iter()
            .position(|stored| bytemuck::pod_read_unaligned::<T>(stored) == *value)
    }

    /// Binary search over a vector sorted in ascending order.
    ///
    /// Returns `Ok(i)` with the first index holding `value`, or `Err(i)` with the
    /// index where it would be inserted.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize>
    where
        T: Ord,
    {
        let cmp = |stored: &[u8], _: &[u8]| bytemuck::pod_read_unaligned::<T>(stored).cmp(value);
        self.raw
            .search_sorted(bytemuck::bytes_of(value), cmp, 0, self.len())
    }

    /// Copies all values into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.raw.iter().map(bytemuck::pod_read_unaligned).collect()
    }
}
