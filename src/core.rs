use alloc::boxed::Box;
use core::cmp::Ordering;
use core::ops::Range;

use log::{debug, trace, warn};

use crate::allocator::{Allocator, Global};
use crate::error::StrideVecError;
use crate::iter::StrideVecIter;
use crate::policy::{GrowthPolicy, MIN_CAPACITY};
use crate::shift::{shift_left, shift_right};

/// Backing storage, fixed at construction.
enum Storage<'a> {
    /// Block obtained from `allocator` and returned to it on destruction.
    Owned {
        block: Box<[u8]>,
        allocator: &'a dyn Allocator,
    },
    /// Caller-supplied region; never resized or freed.
    Borrowed(&'a mut [u8]),
}

impl Storage<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Owned { block, .. } => &block[..],
            Storage::Borrowed(buffer) => &buffer[..],
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned { block, .. } => &mut block[..],
            Storage::Borrowed(buffer) => &mut buffer[..],
        }
    }
}

/// A contiguous vector of fixed-width, type-erased elements.
///
/// Elements are byte slices of exactly `element_size` bytes. Storage is either
/// owned (obtained from an [`Allocator`], grown and shrunk by the [`GrowthPolicy`])
/// or borrowed from the caller with a fixed capacity.
pub struct StrideVec<'a> {
    storage: Storage<'a>,
    element_size: usize,
    size: usize,
    capacity: usize,
    policy: GrowthPolicy,
}

impl<'a> StrideVec<'a> {
    /// Creates an owned vector using the [`Global`] allocator and the default policy.
    ///
    /// At least `MIN_CAPACITY` slots are allocated.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `element_size` is 0, or
    /// `StrideVecError::Allocation` if the storage cannot be allocated.
    pub fn new(element_size: usize, capacity: usize) -> Result<Self, StrideVecError> {
        Self::with_policy(element_size, capacity, &Global, GrowthPolicy::default())
    }

    /// Creates an owned vector with an explicit allocator and policy parameters.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `element_size` is 0,
    /// `growth_factor < 1.0` or `shrink_threshold` is outside `[0.0, 1.0]`.
    /// Returns `StrideVecError::Allocation` if the allocator fails.
    pub fn with_allocator(
        element_size: usize,
        capacity: usize,
        allocator: &'a dyn Allocator,
        growth_factor: f32,
        shrink_threshold: f32,
    ) -> Result<Self, StrideVecError> {
        let policy = GrowthPolicy::new(growth_factor, shrink_threshold)?;
        Self::with_policy(element_size, capacity, allocator, policy)
    }

    /// Creates an owned vector with an explicit allocator and a prepared policy.
    ///
    /// # Errors
    ///
    /// Same as [`StrideVec::with_allocator`].
    pub fn with_policy(
        element_size: usize,
        capacity: usize,
        allocator: &'a dyn Allocator,
        policy: GrowthPolicy,
    ) -> Result<Self, StrideVecError> {
        if element_size == 0 {
            return Err(StrideVecError::InvalidArgument {
                reason: "element size must be non-zero",
            });
        }

        let capacity = capacity.max(MIN_CAPACITY);
        let block = allocator.allocate(element_size, capacity).map_err(|err| {
            debug!("initial allocation of {capacity} x {element_size} bytes failed: {err}");
            err
        })?;

        Ok(Self {
            storage: Storage::Owned { block, allocator },
            element_size,
            size: 0,
            capacity,
            policy,
        })
    }

    /// Creates a vector over a caller-supplied buffer.
    ///
    /// The capacity is the number of whole elements that fit in `buffer`. The
    /// buffer is never resized; trailing bytes beyond the last whole slot are unused.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `element_size` is 0 or the
    /// buffer cannot hold a single element.
    pub fn with_buffer(element_size: usize, buffer: &'a mut [u8]) -> Result<Self, StrideVecError> {
        if element_size == 0 {
            return Err(StrideVecError::InvalidArgument {
                reason: "element size must be non-zero",
            });
        }

        let capacity = buffer.len() / element_size;
        if capacity == 0 {
            return Err(StrideVecError::InvalidArgument {
                reason: "buffer cannot hold a single element",
            });
        }

        Ok(Self {
            storage: Storage::Borrowed(buffer),
            element_size,
            size: 0,
            capacity,
            policy: GrowthPolicy::FIXED,
        })
    }

    /// Copies this vector into a new owned vector using the [`Global`] allocator
    /// and the default policy.
    ///
    /// The copy has room for `max(capacity, self.len())` elements.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::Allocation` if the storage cannot be allocated.
    pub fn duplicate(&self, capacity: usize) -> Result<StrideVec<'static>, StrideVecError> {
        let mut copy = StrideVec::with_policy(
            self.element_size,
            capacity.max(self.size),
            &Global,
            GrowthPolicy::default(),
        )?;
        copy.copy_elements_from(self);
        Ok(copy)
    }

    /// Copies this vector into a new owned vector with an explicit allocator and policy.
    ///
    /// # Errors
    ///
    /// Same as [`StrideVec::with_allocator`].
    pub fn duplicate_with_allocator<'b>(
        &self,
        capacity: usize,
        allocator: &'b dyn Allocator,
        growth_factor: f32,
        shrink_threshold: f32,
    ) -> Result<StrideVec<'b>, StrideVecError> {
        let mut copy = StrideVec::with_allocator(
            self.element_size,
            capacity.max(self.size),
            allocator,
            growth_factor,
            shrink_threshold,
        )?;
        copy.copy_elements_from(self);
        Ok(copy)
    }

    /// Copies this vector into a caller-supplied buffer.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InsufficientBufferSize` if `buffer` holds fewer
    /// slots than this vector has elements, or `StrideVecError::InvalidArgument`
    /// if it cannot hold a single element.
    pub fn duplicate_into_buffer<'b>(
        &self,
        buffer: &'b mut [u8],
    ) -> Result<StrideVec<'b>, StrideVecError> {
        let capacity = buffer.len() / self.element_size;
        if capacity < self.size {
            return Err(StrideVecError::InsufficientBufferSize {
                required: self.size,
                capacity,
            });
        }

        let mut copy = StrideVec::with_buffer(self.element_size, buffer)?;
        copy.copy_elements_from(self);
        Ok(copy)
    }

    fn copy_elements_from(&mut self, source: &StrideVec<'_>) {
        debug_assert!(self.capacity >= source.size);
        let live = source.as_bytes();
        self.storage.bytes_mut()[..live.len()].copy_from_slice(live);
        self.size = source.size;
    }

    /// Releases the storage, reporting allocator failures.
    ///
    /// Borrowed buffers are left to the caller. Dropping a vector releases the
    /// storage as well but can only log a failure.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::Allocation` if the allocator refuses the release.
    pub fn destroy(mut self) -> Result<(), StrideVecError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), StrideVecError> {
        if let Storage::Owned { block, allocator } = &mut self.storage {
            if self.capacity > 0 {
                let block = core::mem::take(block);
                let capacity = core::mem::replace(&mut self.capacity, 0);
                self.size = 0;
                allocator.deallocate(block, self.element_size, capacity)?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    #[must_use]
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Returns `true` if the vector writes into a caller-supplied buffer.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    /// Byte range of `count` slots starting at `index`.
    fn byte_range(&self, index: usize, count: usize) -> Range<usize> {
        index * self.element_size..(index + count) * self.element_size
    }

    fn check_index(&self, index: usize) -> Result<(), StrideVecError> {
        if index >= self.size {
            return Err(StrideVecError::OutOfRange {
                index,
                count: 1,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Validates a search range; `index == size` is allowed for an empty range.
    fn check_range(&self, index: usize, count: usize) -> Result<(), StrideVecError> {
        match index.checked_add(count) {
            Some(end) if end <= self.size => Ok(()),
            _ => Err(StrideVecError::OutOfRange {
                index,
                count,
                size: self.size,
            }),
        }
    }

    fn check_element(&self, element: &[u8]) -> Result<(), StrideVecError> {
        if element.len() != self.element_size {
            return Err(StrideVecError::InvalidArgument {
                reason: "element length does not match the element size",
            });
        }
        Ok(())
    }

    /// Resizes the storage to `requested` slots.
    ///
    /// Borrowed buffers only accept requests within their fixed capacity. Owned
    /// buffers never go below `MIN_CAPACITY`; a request under the floor is a no-op
    /// once the floor is reached.
    fn reallocate(&mut self, requested: usize) -> Result<(), StrideVecError> {
        match &mut self.storage {
            Storage::Borrowed(_) => {
                if requested > self.capacity {
                    return Err(StrideVecError::InsufficientBufferSize {
                        required: requested,
                        capacity: self.capacity,
                    });
                }
                Ok(())
            }
            Storage::Owned { block, allocator } => {
                let mut requested = requested;
                if requested < MIN_CAPACITY {
                    if self.capacity <= MIN_CAPACITY {
                        return Ok(());
                    }
                    requested = MIN_CAPACITY;
                }
                if requested == self.capacity {
                    return Ok(());
                }

                trace!(
                    "reallocating {} -> {requested} slots of {} bytes",
                    self.capacity,
                    self.element_size
                );
                allocator
                    .reallocate(block, self.element_size, requested)
                    .map_err(|err| {
                        debug!("reallocation to {requested} slots failed: {err}");
                        err
                    })?;
                self.capacity = requested;
                Ok(())
            }
        }
    }

    /// Makes room for `required` elements, growing by the policy if needed.
    fn grow_for(&mut self, required: usize) -> Result<(), StrideVecError> {
        if required > self.capacity {
            self.reallocate(self.policy.scaled(required))?;
        }
        Ok(())
    }

    /// Shrinks owned storage after removals when the fill ratio drops below the
    /// threshold. The removal is already committed, so failure is only logged.
    fn shrink_if_sparse(&mut self) {
        if self.policy.should_shrink(self.size, self.capacity) {
            let target = self.policy.scaled(self.size);
            if let Err(err) = self.reallocate(target) {
                warn!("keeping {} slots, shrink to {target} failed: {err}", self.capacity);
            }
        }
    }

    /// Gets the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&[u8], StrideVecError> {
        self.check_index(index)?;
        let range = self.byte_range(index, 1);
        Ok(&self.storage.bytes()[range])
    }

    /// Gets the element at `index` for in-place modification.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut [u8], StrideVecError> {
        self.check_index(index)?;
        let range = self.byte_range(index, 1);
        Ok(&mut self.storage.bytes_mut()[range])
    }

    /// Overwrites the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `value` is not exactly one
    /// element long, or `StrideVecError::OutOfRange` if `index >= len()`.
    pub fn set(&mut self, index: usize, value: &[u8]) -> Result<(), StrideVecError> {
        self.check_element(value)?;
        self.get_mut(index)?.copy_from_slice(value);
        Ok(())
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `element` is not exactly one
    /// element long, `StrideVecError::InsufficientBufferSize` if a borrowed buffer
    /// is full, or `StrideVecError::Allocation` if growing fails.
    pub fn push(&mut self, element: &[u8]) -> Result<(), StrideVecError> {
        self.check_element(element)?;
        self.grow_for(self.size + 1)?;

        let range = self.byte_range(self.size, 1);
        self.storage.bytes_mut()[range].copy_from_slice(element);
        self.size += 1;

        Ok(())
    }

    /// Inserts an element at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// See [`StrideVec::insert_many`].
    pub fn insert(&mut self, index: usize, element: &[u8]) -> Result<(), StrideVecError> {
        self.check_element(element)?;
        self.insert_many(index, element)
    }

    /// Inserts consecutive elements at `index`, shifting later elements right.
    ///
    /// `elements` holds `elements.len() / element_size()` elements back to back.
    /// Inserting at `index == len()` appends without shifting.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `elements` is empty or not a
    /// whole number of elements, `StrideVecError::OutOfRange` if `index > len()`,
    /// and the growth errors of [`StrideVec::push`].
    pub fn insert_many(&mut self, index: usize, elements: &[u8]) -> Result<(), StrideVecError> {
        if elements.is_empty() || elements.len() % self.element_size != 0 {
            return Err(StrideVecError::InvalidArgument {
                reason: "elements must hold a non-zero whole number of elements",
            });
        }
        let count = elements.len() / self.element_size;
        if index > self.size {
            return Err(StrideVecError::OutOfRange {
                index,
                count,
                size: self.size,
            });
        }

        self.grow_for(self.size + count)?;

        let (stride, size) = (self.element_size, self.size);
        let range = self.byte_range(index, count);
        let bytes = self.storage.bytes_mut();
        if index < size {
            shift_right(bytes, stride, index, size, count);
        }
        bytes[range].copy_from_slice(elements);
        self.size += count;

        Ok(())
    }

    /// Reserves a zero-filled slot at the end and returns it for in-place construction.
    ///
    /// # Errors
    ///
    /// The growth errors of [`StrideVec::push`].
    pub fn emplace(&mut self) -> Result<&mut [u8], StrideVecError> {
        self.emplace_with(self.size, |_| Ok(()))
    }

    /// Reserves a zero-filled slot at `index` and returns it for in-place construction.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index > len()`, and the growth
    /// errors of [`StrideVec::push`].
    pub fn emplace_at(&mut self, index: usize) -> Result<&mut [u8], StrideVecError> {
        self.emplace_with(index, |_| Ok(()))
    }

    /// Reserves a zero-filled slot at `index` and runs `constructor` on it.
    ///
    /// The element counts as inserted only once `constructor` succeeds. On failure
    /// the shifted elements are moved back and the vector is unchanged apart
    /// from a possibly grown capacity.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index > len()`, the growth errors
    /// of [`StrideVec::push`], or whatever `constructor` returns.
    pub fn emplace_with<F>(&mut self, index: usize, constructor: F) -> Result<&mut [u8], StrideVecError>
    where
        F: FnOnce(&mut [u8]) -> Result<(), StrideVecError>,
    {
        if index > self.size {
            return Err(StrideVecError::OutOfRange {
                index,
                count: 1,
                size: self.size,
            });
        }

        self.grow_for(self.size + 1)?;

        let (stride, size) = (self.element_size, self.size);
        let range = self.byte_range(index, 1);
        let bytes = self.storage.bytes_mut();
        if index < size {
            shift_right(bytes, stride, index, size, 1);
        }
        let slot = &mut bytes[range.clone()];
        slot.fill(0);
        if let Err(err) = constructor(slot) {
            if index < size {
                shift_left(bytes, stride, index, size + 1, 1);
            }
            return Err(err);
        }
        self.size += 1;

        Ok(&mut self.storage.bytes_mut()[range])
    }

    /// Removes the element at `index`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// See [`StrideVec::delete_many`].
    pub fn delete(&mut self, index: usize) -> Result<(), StrideVecError> {
        self.delete_many(index, 1)
    }

    /// Removes `count` elements starting at `index`, shifting later elements left.
    ///
    /// A range ending exactly at `len()` is valid. Afterwards owned storage is
    /// shrunk if the fill ratio falls below the shrink threshold.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InvalidArgument` if `count` is 0, or
    /// `StrideVecError::OutOfRange` if `index + count > len()`.
    pub fn delete_many(&mut self, index: usize, count: usize) -> Result<(), StrideVecError> {
        if count == 0 {
            return Err(StrideVecError::InvalidArgument {
                reason: "count must be non-zero",
            });
        }
        self.check_range(index, count)?;

        let (stride, size) = (self.element_size, self.size);
        if index + count < size {
            shift_left(self.storage.bytes_mut(), stride, index, size, count);
        }
        self.size -= count;
        self.shrink_if_sparse();

        Ok(())
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if the vector is empty.
    pub fn pop(&mut self) -> Result<(), StrideVecError> {
        if self.size == 0 {
            return Err(StrideVecError::OutOfRange {
                index: 0,
                count: 1,
                size: 0,
            });
        }

        self.size -= 1;
        self.shrink_if_sparse();

        Ok(())
    }

    /// Removes all elements, applying the same policy as `resize(0)`.
    ///
    /// # Errors
    ///
    /// See [`StrideVec::resize`].
    pub fn clear(&mut self) -> Result<(), StrideVecError> {
        self.resize(0)
    }

    /// Finds the first element equal to `element` according to `eq`.
    ///
    /// `eq` receives the stored element first and `element` second.
    ///
    /// # Errors
    ///
    /// Never fails for the whole-vector search; kept fallible for symmetry with
    /// [`StrideVec::find_in`].
    pub fn find<F>(&self, element: &[u8], eq: F) -> Result<Option<usize>, StrideVecError>
    where
        F: Fn(&[u8], &[u8]) -> bool,
    {
        self.find_in(element, eq, 0, self.size)
    }

    /// Finds the first match within `[index, index + count)`.
    ///
    /// Returns the absolute index of the match, or `None`. An empty range,
    /// including one starting at `len()`, finds nothing.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index + count > len()`.
    pub fn find_in<F>(
        &self,
        element: &[u8],
        eq: F,
        index: usize,
        count: usize,
    ) -> Result<Option<usize>, StrideVecError>
    where
        F: Fn(&[u8], &[u8]) -> bool,
    {
        self.check_range(index, count)?;

        let live = &self.as_bytes()[self.byte_range(index, count)];
        Ok(live
            .chunks_exact(self.element_size)
            .position(|candidate| eq(candidate, element))
            .map(|offset| index + offset))
    }

    /// Binary-searches the whole vector, which must be sorted by `cmp`.
    ///
    /// # Errors
    ///
    /// Never fails for the whole-vector search; kept fallible for symmetry with
    /// [`StrideVec::binary_search_in`].
    pub fn binary_search<F>(
        &self,
        element: &[u8],
        cmp: F,
    ) -> Result<Result<usize, usize>, StrideVecError>
    where
        F: Fn(&[u8], &[u8]) -> Ordering,
    {
        self.binary_search_in(element, cmp, 0, self.size)
    }

    /// Binary-searches `[index, index + count)`, which must be sorted by `cmp`.
    ///
    /// `cmp` compares the stored element against `element`. Returns `Ok(i)` with
    /// the first matching index, or `Err(i)` with the index where `element` would
    /// be inserted to keep the order. An empty range yields `Err(index)`.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::OutOfRange` if `index + count > len()`.
    pub fn binary_search_in<F>(
        &self,
        element: &[u8],
        cmp: F,
        index: usize,
        count: usize,
    ) -> Result<Result<usize, usize>, StrideVecError>
    where
        F: Fn(&[u8], &[u8]) -> Ordering,
    {
        self.check_range(index, count)?;
        Ok(self.search_sorted(element, cmp, index, count))
    }

    /// Lower-bound search over a range already known to be valid.
    pub(crate) fn search_sorted<F>(
        &self,
        element: &[u8],
        cmp: F,
        index: usize,
        count: usize,
    ) -> Result<usize, usize>
    where
        F: Fn(&[u8], &[u8]) -> Ordering,
    {
        let bytes = self.storage.bytes();
        let mut found = false;
        let (mut low, mut high) = (index, index + count);
        while low < high {
            let mid = low + (high - low) / 2;
            match cmp(&bytes[self.byte_range(mid, 1)], element) {
                Ordering::Less => low = mid + 1,
                Ordering::Equal => {
                    found = true;
                    high = mid;
                }
                Ordering::Greater => high = mid,
            }
        }

        if found {
            Ok(low)
        } else {
            Err(low)
        }
    }

    /// Sets the number of live elements.
    ///
    /// Storage is resized to `new_size * growth_factor` slots when `new_size`
    /// exceeds the capacity or falls below the shrink threshold. Newly exposed
    /// slots hold whatever bytes the storage contains (zero for fresh memory).
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InsufficientBufferSize` if a borrowed buffer is too
    /// small, or `StrideVecError::Allocation` if resizing fails. The size is
    /// unchanged on error.
    pub fn resize(&mut self, new_size: usize) -> Result<(), StrideVecError> {
        if new_size > self.capacity || self.policy.should_shrink(new_size, self.capacity) {
            self.reallocate(self.policy.scaled(new_size))?;
        }
        self.size = new_size;
        Ok(())
    }

    /// Grows the storage to at least `capacity` slots. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::InsufficientBufferSize` if a borrowed buffer is too
    /// small, or `StrideVecError::Allocation` if growing fails.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), StrideVecError> {
        if capacity > self.capacity {
            self.reallocate(capacity)?;
        }
        Ok(())
    }

    /// Shrinks owned storage to the number of live elements, but not below
    /// `MIN_CAPACITY`. Borrowed buffers are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `StrideVecError::Allocation` if the allocator fails.
    pub fn shrink_to_fit(&mut self) -> Result<(), StrideVecError> {
        self.reallocate(self.size)
    }

    /// The live elements as one contiguous byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.size * self.element_size]
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> StrideVecIter<'_> {
        StrideVecIter::new(self.as_bytes(), self.element_size)
    }
}

impl Drop for StrideVec<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("dropping vector leaked its storage: {err}");
        }
    }
}

impl core::fmt::Debug for StrideVec<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrideVec")
            .field("element_size", &self.element_size)
            .field("len", &self.size)
            .field("capacity", &self.capacity)
            .field("borrowed", &self.is_borrowed())
            .field("policy", &self.policy)
            .finish()
    }
}
