use thiserror::Error;

/// Error types for `StrideVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StrideVecError {
    /// A size, count, element length or policy parameter is not acceptable
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument
        reason: &'static str,
    },
    /// Index or index range lies outside the live elements
    #[error("Out of range: {count} element(s) at index {index} with vector length {size}")]
    OutOfRange {
        /// First index of the requested range
        index: usize,
        /// Number of elements in the requested range
        count: usize,
        /// Current length of the vector
        size: usize,
    },
    /// A borrowed buffer cannot hold the requested number of elements
    #[error("Insufficient buffer size: {required} slots required, but only {capacity} available")]
    InsufficientBufferSize {
        /// Number of element slots needed
        required: usize,
        /// Fixed capacity of the buffer
        capacity: usize,
    },
    /// The allocator refused to provide or resize storage
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocError),
    /// An emplace constructor reported failure
    #[error("Element construction failed: {reason}")]
    Construction {
        /// Description supplied by the constructor
        reason: &'static str,
    },
}

/// Failures reported by an [`Allocator`](crate::Allocator).
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AllocError {
    /// `element_size * capacity` does not fit in `usize`
    #[error("capacity overflow: {capacity} elements of {element_size} bytes")]
    CapacityOverflow {
        /// Element width in bytes
        element_size: usize,
        /// Requested number of elements
        capacity: usize,
    },
    /// The underlying heap could not satisfy the request
    #[error("out of memory: {requested} bytes requested")]
    OutOfMemory {
        /// Number of bytes requested
        requested: usize,
    },
    /// A budgeted allocator would exceed its limit
    #[error("budget exceeded: {requested} bytes requested, {remaining} bytes remaining")]
    BudgetExceeded {
        /// Number of additional bytes requested
        requested: usize,
        /// Bytes still available in the budget
        remaining: usize,
    },
}
