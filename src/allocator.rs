use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::error::AllocError;

/// Source of backing storage for owned vectors.
///
/// Blocks are plain byte boxes sized `element_size * capacity`. The vector never
/// looks inside an allocator; it only forwards the failures it reports.
pub trait Allocator {
    /// Returns a zero-filled block for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns an `AllocError` if the block cannot be provided.
    fn allocate(&self, element_size: usize, capacity: usize) -> Result<Box<[u8]>, AllocError>;

    /// Resizes `block` to hold `capacity` elements, keeping the common prefix.
    ///
    /// # Errors
    ///
    /// Returns an `AllocError` if the block cannot be resized. On failure `block`
    /// is left exactly as it was.
    fn reallocate(
        &self,
        block: &mut Box<[u8]>,
        element_size: usize,
        capacity: usize,
    ) -> Result<(), AllocError>;

    /// Releases a block previously returned by this allocator.
    ///
    /// # Errors
    ///
    /// Returns an `AllocError` if the allocator refuses the release.
    fn deallocate(
        &self,
        block: Box<[u8]>,
        element_size: usize,
        capacity: usize,
    ) -> Result<(), AllocError>;
}

/// Byte length of `capacity` elements of `element_size` bytes.
pub(crate) fn block_len(element_size: usize, capacity: usize) -> Result<usize, AllocError> {
    element_size
        .checked_mul(capacity)
        .ok_or(AllocError::CapacityOverflow {
            element_size,
            capacity,
        })
}

/// Heap allocator backed by the global allocator.
///
/// Allocation failures are reported as `AllocError::OutOfMemory` instead of aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, element_size: usize, capacity: usize) -> Result<Box<[u8]>, AllocError> {
        let len = block_len(element_size, capacity)?;
        let mut block = Vec::new();
        block
            .try_reserve_exact(len)
            .map_err(|_| AllocError::OutOfMemory { requested: len })?;
        block.resize(len, 0);
        Ok(block.into_boxed_slice())
    }

    fn reallocate(
        &self,
        block: &mut Box<[u8]>,
        element_size: usize,
        capacity: usize,
    ) -> Result<(), AllocError> {
        let len = block_len(element_size, capacity)?;
        let mut bytes = core::mem::take(block).into_vec();
        if len > bytes.len() {
            if bytes.try_reserve_exact(len - bytes.len()).is_err() {
                *block = bytes.into_boxed_slice();
                return Err(AllocError::OutOfMemory { requested: len });
            }
            bytes.resize(len, 0);
        } else {
            bytes.truncate(len);
        }
        *block = bytes.into_boxed_slice();
        Ok(())
    }

    fn deallocate(
        &self,
        block: Box<[u8]>,
        _element_size: usize,
        _capacity: usize,
    ) -> Result<(), AllocError> {
        drop(block);
        Ok(())
    }
}

/// Allocator wrapper that caps the total number of outstanding bytes.
///
/// Every allocation and growth is charged against the budget before it is
/// forwarded to the inner allocator; releases and shrinks refund it.
pub struct BudgetAllocator<'b> {
    inner: &'b dyn Allocator,
    limit: usize,
    used: Cell<usize>,
}

impl BudgetAllocator<'static> {
    /// Creates a budget of `limit` bytes on top of [`Global`].
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self::with_inner(&Global, limit)
    }
}

impl<'b> BudgetAllocator<'b> {
    /// Creates a budget of `limit` bytes on top of `inner`.
    #[must_use]
    pub fn with_inner(inner: &'b dyn Allocator, limit: usize) -> Self {
        Self {
            inner,
            limit,
            used: Cell::new(0),
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently handed out.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Bytes that can still be handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.used.get()
    }

    fn charge(&self, bytes: usize) -> Result<(), AllocError> {
        if bytes > self.remaining() {
            return Err(AllocError::BudgetExceeded {
                requested: bytes,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

impl Allocator for BudgetAllocator<'_> {
    fn allocate(&self, element_size: usize, capacity: usize) -> Result<Box<[u8]>, AllocError> {
        let len = block_len(element_size, capacity)?;
        self.charge(len)?;
        let block = self.inner.allocate(element_size, capacity)?;
        self.used.set(self.used.get() + block.len());
        Ok(block)
    }

    fn reallocate(
        &self,
        block: &mut Box<[u8]>,
        element_size: usize,
        capacity: usize,
    ) -> Result<(), AllocError> {
        let len = block_len(element_size, capacity)?;
        let old_len = block.len();
        if len > old_len {
            self.charge(len - old_len)?;
        }
        self.inner.reallocate(block, element_size, capacity)?;
        self.used.set(self.used.get() - old_len + block.len());
        Ok(())
    }

    fn deallocate(
        &self,
        block: Box<[u8]>,
        element_size: usize,
        capacity: usize,
    ) -> Result<(), AllocError> {
        let len = block.len();
        self.inner.deallocate(block, element_size, capacity)?;
        self.used.set(self.used.get() - len);
        Ok(())
    }
}

impl core::fmt::Debug for BudgetAllocator<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BudgetAllocator")
            .field("limit", &self.limit)
            .field("used", &self.used.get())
            .finish_non_exhaustive()
    }
}
