#![no_std]

//! `StrideVec`: a type-erased, contiguous vector of fixed-width elements.
//!
//! Every element is a byte slice of exactly `element_size` bytes. The vector
//! either owns its storage, obtained from a pluggable [`Allocator`] and resized
//! according to a [`GrowthPolicy`], or writes into a client-provided buffer that
//! it never resizes or frees.
//!
//! This crate is `no_std` compatible; it needs `alloc` only for owned storage.
//!
//! # Ownership Modes
//!
//! ```
//! # use stridevec::StrideVec;
//! // Owned: grows on demand
//! let mut owned = StrideVec::new(4, 2).unwrap();
//! for i in 0..5i32 {
//!     owned.push(&i.to_le_bytes()).unwrap();
//! }
//! assert_eq!(owned.len(), 5);
//! assert_eq!(owned.get(2).unwrap(), &2i32.to_le_bytes());
//!
//! // Borrowed: fixed capacity, fails instead of growing
//! let mut buffer = [0u8; 8];
//! let mut borrowed = StrideVec::with_buffer(4, &mut buffer).unwrap();
//! borrowed.push(&[1; 4]).unwrap();
//! borrowed.push(&[2; 4]).unwrap();
//! assert!(borrowed.push(&[3; 4]).is_err());
//! assert_eq!(borrowed.len(), 2);
//! ```
//!
//! # Positional Editing
//!
//! Insertion and deletion shift the following elements in place. A failed
//! operation never changes the length or the visible contents.
//!
//! ```
//! # use stridevec::StrideVec;
//! let mut vec = StrideVec::new(1, 4).unwrap();
//! vec.insert_many(0, b"ace").unwrap();
//! vec.insert(1, b"b").unwrap();
//! vec.insert(3, b"d").unwrap();
//! assert_eq!(vec.as_bytes(), b"abcde");
//!
//! vec.delete_many(1, 3).unwrap();
//! assert_eq!(vec.as_bytes(), b"ae");
//!
//! // Construct an element in place
//! vec.emplace_with(1, |slot| {
//!     slot[0] = b'z';
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(vec.as_bytes(), b"aze");
//! ```
//!
//! # Searching
//!
//! Comparison semantics are supplied per call. `binary_search` follows the
//! convention of `slice::binary_search`: `Ok` with the match, or `Err` with the
//! insertion point that keeps the order.
//!
//! ```
//! # use stridevec::StrideVec;
//! let mut vec = StrideVec::new(1, 4).unwrap();
//! vec.insert_many(0, &[1, 3, 5, 7]).unwrap();
//!
//! assert_eq!(vec.find(&[5], |a, b| a == b).unwrap(), Some(2));
//! assert_eq!(vec.find(&[4], |a, b| a == b).unwrap(), None);
//!
//! assert_eq!(vec.binary_search(&[5], |a, b| a.cmp(b)).unwrap(), Ok(2));
//! assert_eq!(vec.binary_search(&[4], |a, b| a.cmp(b)).unwrap(), Err(2));
//! ```
//!
//! # Typed Access
//!
//! For plain-old-data element types, [`TypedVec`] hides the byte conversions:
//!
//! ```
//! # use stridevec::TypedVec;
//! let mut values = TypedVec::<i32>::new(4).unwrap();
//! values.insert_slice(0, &[1, 3, 5, 7]).unwrap();
//! assert_eq!(values.binary_search(&4), Err(2));
//! assert_eq!(values.to_vec(), vec![1, 3, 5, 7]);
//! ```
//!
//! # Allocators
//!
//! [`Global`] is used by default. [`BudgetAllocator`] caps the total number of
//! bytes handed out, which turns memory limits into ordinary errors:
//!
//! ```
//! # use stridevec::{BudgetAllocator, StrideVec, StrideVecError};
//! let budget = BudgetAllocator::new(16);
//! let mut vec = StrideVec::with_allocator(4, 4, &budget, 2.0, 0.25).unwrap();
//! for i in 0..4u32 {
//!     vec.push(&i.to_le_bytes()).unwrap();
//! }
//! assert!(matches!(
//!     vec.push(&[0; 4]),
//!     Err(StrideVecError::Allocation(_))
//! ));
//! assert_eq!(vec.len(), 4);
//! ```

extern crate alloc;

mod allocator;
mod core;
mod error;
mod iter;
mod policy;
mod shift;
mod typed;

pub use crate::allocator::{Allocator, BudgetAllocator, Global};
pub use crate::core::StrideVec;
pub use crate::error::{AllocError, StrideVecError};
pub use crate::iter::StrideVecIter;
pub use crate::policy::{GrowthPolicy, MIN_CAPACITY};
pub use crate::typed::TypedVec;
