//! Cursors that compute their elements from the traversal position.

use seqlinq_core::{Error, Result};

use crate::cursor::{BoxCursor, Cursor, Position};

/// `start, start + 1, ..., start + count - 1`.
#[derive(Debug, Clone)]
pub struct RangeCursor {
    start: i64,
    count: usize,
    position: Position,
}

impl RangeCursor {
    pub fn new(start: i64, count: usize) -> Self {
        Self { start, count, position: Position::Unset }
    }
}

impl Cursor<i64> for RangeCursor {
    fn current(&self) -> Result<i64> {
        let offset = self.position.index()?;
        i64::try_from(offset)
            .ok()
            .and_then(|step| self.start.checked_add(step))
            .ok_or(Error::Overflow { start: self.start, offset })
    }

    fn reset(&mut self) {
        self.position = Position::Unset;
    }

    fn advance(&mut self) -> Result<bool> {
        Ok(self.position.step(self.count))
    }

    fn boxed_clone(&self) -> BoxCursor<i64> {
        Box::new(self.clone())
    }
}

/// The same value `count` times.
#[derive(Debug, Clone)]
pub struct RepeatCursor<T> {
    value: T,
    count: usize,
    position: Position,
}

impl<T> RepeatCursor<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count, position: Position::Unset }
    }
}

impl<T: Clone + 'static> Cursor<T> for RepeatCursor<T> {
    fn current(&self) -> Result<T> {
        self.position.index()?;
        Ok(self.value.clone())
    }

    fn reset(&mut self) {
        self.position = Position::Unset;
    }

    fn advance(&mut self) -> Result<bool> {
        Ok(self.position.step(self.count))
    }

    fn boxed_clone(&self) -> BoxCursor<T> {
        Box::new(self.clone())
    }
}
