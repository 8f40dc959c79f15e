use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use seqlinq_core::{Error, Result};
use tracing::trace;

use crate::cursor::{BoxCursor, Cursor, Position};

/// Shared handle over an index-keyed sequence that may have holes.
///
/// Indices are signed and need not be contiguous. Clones share the same
/// storage, so a mutation through one handle is seen by every cursor built
/// from another, starting with that cursor's next `reset`.
#[derive(Debug)]
pub struct SparseArray<T> {
    items: Rc<RefCell<BTreeMap<i64, T>>>,
}

impl<T> Clone for SparseArray<T> {
    fn clone(&self) -> Self {
        Self { items: Rc::clone(&self.items) }
    }
}

impl<T> Default for SparseArray<T> {
    fn default() -> Self {
        Self { items: Rc::new(RefCell::new(BTreeMap::new())) }
    }
}

impl<T> SparseArray<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends after the highest non-negative index and returns the index used.
    pub fn push(&self, value: T) -> i64 {
        let mut items = self.items.borrow_mut();
        let next = items.range(0..).next_back().map_or(0, |(idx, _)| idx + 1);
        items.insert(next, value);
        next
    }

    pub fn set(&self, index: i64, value: T) -> Option<T> {
        self.items.borrow_mut().insert(index, value)
    }

    pub fn remove(&self, index: i64) -> Option<T> {
        self.items.borrow_mut().remove(&index)
    }

    pub fn contains(&self, index: i64) -> bool {
        self.items.borrow().contains_key(&index)
    }

    /// Number of present elements; holes are not counted.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Present indices in ascending order.
    pub fn indices(&self) -> Vec<i64> {
        self.items.borrow().keys().copied().collect()
    }
}

impl<T: Clone> SparseArray<T> {
    pub fn get(&self, index: i64) -> Option<T> {
        self.items.borrow().get(&index).cloned()
    }
}

impl<T> FromIterator<T> for SparseArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items = (0..).zip(iter).collect();
        Self { items: Rc::new(RefCell::new(items)) }
    }
}

impl<T> From<Vec<T>> for SparseArray<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

/// Leaf cursor visiting the present indices of a [`SparseArray`] in
/// ascending order. The index list is captured on every reset.
pub struct ArrayCursor<T> {
    source: SparseArray<T>,
    indices: Vec<i64>,
    position: Position,
}

impl<T> ArrayCursor<T> {
    pub fn new(source: SparseArray<T>) -> Self {
        let indices = source.indices();
        Self { source, indices, position: Position::Unset }
    }
}

impl<T: Clone + 'static> Cursor<T> for ArrayCursor<T> {
    fn current(&self) -> Result<T> {
        let idx = self.indices[self.position.index()?];
        // The index may have been removed since the last reset.
        self.source.get(idx).ok_or(Error::InvalidState)
    }

    fn reset(&mut self) {
        self.indices = self.source.indices();
        self.position = Position::Unset;
        trace!(len = self.indices.len(), "array cursor reset");
    }

    fn advance(&mut self) -> Result<bool> {
        Ok(self.position.step(self.indices.len()))
    }

    fn boxed_clone(&self) -> BoxCursor<T> {
        Box::new(Self { source: self.source.clone(), indices: self.indices.clone(), position: self.position })
    }
}
