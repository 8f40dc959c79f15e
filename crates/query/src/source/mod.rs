//! Backing collections and the leaf cursors that read them.

mod array;
mod record;

pub use array::{ArrayCursor, SparseArray};
pub use record::{KeyValuePair, Record, RecordCursor};
