//! Cursors driving two independent inner cursors.

use std::rc::Rc;

use seqlinq_core::{Error, Result};

use crate::cursor::{BoxCursor, Cursor};

/// Every element of `first`, then every element of `second`.
pub struct ConcatCursor<T> {
    first: BoxCursor<T>,
    second: BoxCursor<T>,
    on_second: bool,
}

impl<T> ConcatCursor<T> {
    pub fn new(first: BoxCursor<T>, second: BoxCursor<T>) -> Self {
        Self { first, second, on_second: false }
    }
}

impl<T: 'static> Cursor<T> for ConcatCursor<T> {
    fn current(&self) -> Result<T> {
        if self.on_second { self.second.current() } else { self.first.current() }
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.on_second = false;
    }

    fn advance(&mut self) -> Result<bool> {
        if !self.on_second {
            if self.first.advance()? {
                return Ok(true);
            }
            self.on_second = true;
        }
        self.second.advance()
    }

    fn boxed_clone(&self) -> BoxCursor<T> {
        Box::new(Self { first: self.first.boxed_clone(), second: self.second.boxed_clone(), on_second: self.on_second })
    }
}

/// Pairs elements positionally and stops with the shorter side.
pub struct ZipCursor<A, B, U> {
    left: BoxCursor<A>,
    right: BoxCursor<B>,
    combine: Rc<dyn Fn(A, B) -> U>,
    positioned: bool,
}

impl<A, B, U> ZipCursor<A, B, U> {
    pub fn new(left: BoxCursor<A>, right: BoxCursor<B>, combine: impl Fn(A, B) -> U + 'static) -> Self {
        Self { left, right, combine: Rc::new(combine), positioned: false }
    }
}

impl<A: 'static, B: 'static, U: 'static> Cursor<U> for ZipCursor<A, B, U> {
    fn current(&self) -> Result<U> {
        if !self.positioned {
            return Err(Error::InvalidState);
        }
        Ok((self.combine)(self.left.current()?, self.right.current()?))
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.positioned = false;
    }

    fn advance(&mut self) -> Result<bool> {
        self.positioned = false;
        self.positioned = self.left.advance()? && self.right.advance()?;
        Ok(self.positioned)
    }

    fn boxed_clone(&self) -> BoxCursor<U> {
        Box::new(Self {
            left: self.left.boxed_clone(),
            right: self.right.boxed_clone(),
            combine: Rc::clone(&self.combine),
            positioned: self.positioned,
        })
    }
}
