//! The traversal primitive every sequence is built from.

use core::marker::PhantomData;

use seqlinq_core::{Error, Result};

/// Single-direction, resettable traversal over a finite sequence.
///
/// A cursor starts unset. `current` is valid only after an `advance` that
/// returned `true` and until the next `reset` or `advance`; at any other time
/// it fails with [`Error::InvalidState`]. `reset` rewinds to the unset state
/// and recomputes whatever traversal order the cursor caches.
pub trait Cursor<T> {
    fn current(&self) -> Result<T>;

    fn reset(&mut self);

    /// Moves to the next element. Returns `false` once the sequence is
    /// exhausted; `current` stays invalid from then on.
    fn advance(&mut self) -> Result<bool>;

    /// Duplicates this cursor and everything it wraps. Backing collections
    /// are shared, traversal state is not.
    fn boxed_clone(&self) -> BoxCursor<T>;
}

pub type BoxCursor<T> = Box<dyn Cursor<T>>;

impl<T> Cursor<T> for BoxCursor<T> {
    fn current(&self) -> Result<T> {
        (**self).current()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }

    fn boxed_clone(&self) -> BoxCursor<T> {
        (**self).boxed_clone()
    }
}

/// Traversal marker shared by the leaf cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Position {
    #[default]
    Unset,
    At(usize),
    Exhausted,
}

impl Position {
    /// Steps to the next slot of a sequence holding `len` elements.
    pub(crate) fn step(&mut self, len: usize) -> bool {
        let next = match *self {
            Position::Unset => 0,
            Position::At(idx) => idx + 1,
            Position::Exhausted => return false,
        };
        if next < len {
            *self = Position::At(next);
            true
        } else {
            *self = Position::Exhausted;
            false
        }
    }

    pub(crate) fn index(self) -> Result<usize> {
        match self {
            Position::At(idx) => Ok(idx),
            Position::Unset | Position::Exhausted => Err(Error::InvalidState),
        }
    }
}

/// Cursor over nothing.
pub struct EmptyCursor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyCursor<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EmptyCursor<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: 'static> Cursor<T> for EmptyCursor<T> {
    fn current(&self) -> Result<T> {
        Err(Error::InvalidState)
    }

    fn reset(&mut self) {}

    fn advance(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn boxed_clone(&self) -> BoxCursor<T> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn position_walks_then_exhausts() {
        let mut position = Position::default();
        assert_eq!(position.index(), Err(Error::InvalidState));
        assert!(position.step(2));
        assert_eq!(position.index(), Ok(0));
        assert!(position.step(2));
        assert_eq!(position.index(), Ok(1));
        assert!(!position.step(2));
        assert_eq!(position, Position::Exhausted);
        assert!(!position.step(2));
        assert_eq!(position.index(), Err(Error::InvalidState));
    }

    #[rstest]
    fn empty_cursor_never_positions() {
        let mut cursor = EmptyCursor::<i32>::new();
        assert_eq!(cursor.current(), Err(Error::InvalidState));
        assert_eq!(cursor.advance(), Ok(false));
        cursor.reset();
        assert_eq!(cursor.current(), Err(Error::InvalidState));
    }
}
