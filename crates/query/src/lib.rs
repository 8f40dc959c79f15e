//! Deferred, composable query operators over in-memory sequences.
//!
//! A sequence is an [`Enumerable`] holding one [`Cursor`] chain. Leaf cursors
//! read a backing [`SparseArray`] or [`Record`] (or compute elements, see
//! [`Enumerable::range`]); every operator wraps the chain in a
//! [`Decorator`]-built cursor; terminal operators reset a copy of the chain
//! and drive it.
//!
//! ```
//! use seqlinq::Enumerable;
//!
//! let evens = Enumerable::range(1, 10).filter(|n| n % 2 == 0).skip(1).take(2);
//! assert_eq!(evens.to_vec().unwrap(), [4, 6]);
//! assert_eq!(evens.count().unwrap(), 2);
//! ```

mod combine;
mod cursor;
mod decorator;
mod enumerable;
mod generators;
pub mod source;

pub use combine::{ConcatCursor, ZipCursor};
pub use cursor::{BoxCursor, Cursor, EmptyCursor};
pub use decorator::Decorator;
pub use enumerable::{Enumerable, Iter};
pub use generators::{RangeCursor, RepeatCursor};
pub use seqlinq_core::{
    CastMode, Error, ErrorKind, Function, Object, Primitive, Result, TypeDescriptor, TypeKind, TypeMode, TypeRegistry, Value,
    cast_to, is_of_type, type_of,
};
pub use source::{ArrayCursor, KeyValuePair, Record, RecordCursor, SparseArray};
