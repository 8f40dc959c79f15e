//! Cursor decoration: wrap an inner cursor and override part of its behaviour.
//!
//! Every query operator is a [`Decorator`]. An operator supplies a private
//! state value plus the hooks it needs; every operation without a hook is
//! forwarded to the inner cursor. The engine tracks whether the decorated
//! cursor is positioned, so `current` fails with [`Error::InvalidState`]
//! before the first successful `advance`, after a reset and after
//! exhaustion, regardless of what the inner cursor would still answer.

use std::rc::Rc;

use seqlinq_core::{Error, Result};

use crate::cursor::{BoxCursor, Cursor};

type CurrentHook<T, U, S> = Rc<dyn Fn(&dyn Cursor<T>, &S) -> Result<U>>;
type ResetHook<S> = Rc<dyn Fn(&mut S)>;
type AdvanceHook<T, S> = Rc<dyn Fn(&mut dyn Cursor<T>, &mut S) -> Result<bool>>;

struct Hooks<T, U, S> {
    current: CurrentHook<T, U, S>,
    reset: Option<ResetHook<S>>,
    advance: Option<AdvanceHook<T, S>>,
}

impl<T, U, S> Clone for Hooks<T, U, S> {
    fn clone(&self) -> Self {
        Self { current: Rc::clone(&self.current), reset: self.reset.clone(), advance: self.advance.clone() }
    }
}

/// Builder for a decorated cursor yielding `U` on top of an inner cursor
/// yielding `T`, with operator state `S`.
pub struct Decorator<T, U, S> {
    inner: BoxCursor<T>,
    state: S,
    hooks: Hooks<T, U, S>,
}

impl<T: 'static, S: 'static> Decorator<T, T, S> {
    /// Starts a decorator that forwards everything to `inner`.
    pub fn new(inner: BoxCursor<T>, state: S) -> Self {
        let current: CurrentHook<T, T, S> = Rc::new(|inner: &dyn Cursor<T>, _: &S| inner.current());
        Self { inner, state, hooks: Hooks { current, reset: None, advance: None } }
    }
}

impl<T: 'static, U: 'static, S: Clone + 'static> Decorator<T, U, S> {
    /// Replaces how the current element is read, possibly changing its type.
    pub fn with_current<V>(self, current: impl Fn(&dyn Cursor<T>, &S) -> Result<V> + 'static) -> Decorator<T, V, S> {
        let Hooks { reset, advance, .. } = self.hooks;
        Decorator { inner: self.inner, state: self.state, hooks: Hooks { current: Rc::new(current), reset, advance } }
    }

    /// Runs after the inner cursor has been reset; rewinds the operator state.
    #[must_use]
    pub fn on_reset(mut self, reset: impl Fn(&mut S) + 'static) -> Self {
        self.hooks.reset = Some(Rc::new(reset));
        self
    }

    /// Replaces how the cursor moves forward. The hook owns driving the inner
    /// cursor and reports whether the decorated cursor is now positioned.
    #[must_use]
    pub fn on_advance(mut self, advance: impl Fn(&mut dyn Cursor<T>, &mut S) -> Result<bool> + 'static) -> Self {
        self.hooks.advance = Some(Rc::new(advance));
        self
    }

    pub fn build(self) -> BoxCursor<U> {
        Box::new(DecoratedCursor { inner: self.inner, state: self.state, hooks: self.hooks, positioned: false })
    }
}

struct DecoratedCursor<T, U, S> {
    inner: BoxCursor<T>,
    state: S,
    hooks: Hooks<T, U, S>,
    positioned: bool,
}

impl<T: 'static, U: 'static, S: Clone + 'static> Cursor<U> for DecoratedCursor<T, U, S> {
    fn current(&self) -> Result<U> {
        if !self.positioned {
            return Err(Error::InvalidState);
        }
        (self.hooks.current)(&*self.inner, &self.state)
    }

    fn reset(&mut self) {
        self.positioned = false;
        self.inner.reset();
        if let Some(reset) = &self.hooks.reset {
            reset(&mut self.state);
        }
    }

    fn advance(&mut self) -> Result<bool> {
        self.positioned = false;
        let moved = match &self.hooks.advance {
            Some(advance) => advance(&mut *self.inner, &mut self.state)?,
            None => self.inner.advance()?,
        };
        self.positioned = moved;
        Ok(moved)
    }

    fn boxed_clone(&self) -> BoxCursor<U> {
        Box::new(Self {
            inner: self.inner.boxed_clone(),
            state: self.state.clone(),
            hooks: self.hooks.clone(),
            positioned: self.positioned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ArrayCursor, SparseArray};
    use rstest::rstest;

    fn source(items: &[i32]) -> BoxCursor<i32> {
        Box::new(ArrayCursor::new(SparseArray::from(items.to_vec())))
    }

    #[rstest]
    fn forwards_everything_without_hooks() {
        let mut cursor = Decorator::new(source(&[4, 5]), ()).build();
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok(4));
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok(5));
        assert_eq!(cursor.advance(), Ok(false));
    }

    #[rstest]
    fn refusing_advance_invalidates_current_even_if_inner_is_positioned() {
        let mut cursor = Decorator::new(source(&[1, 2, 3]), false)
            .on_advance(|inner, stop| if *stop { Ok(false) } else { inner.advance() })
            .build();
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok(1));
        let mut stopped = Decorator::new(cursor.boxed_clone(), true)
            .on_advance(|inner, stop| if *stop { Ok(false) } else { inner.advance() })
            .build();
        assert_eq!(stopped.advance(), Ok(false));
        assert_eq!(stopped.current(), Err(Error::InvalidState));
    }

    #[rstest]
    fn reset_hook_runs_after_inner_reset() {
        let mut cursor = Decorator::new(source(&[7, 8]), 0usize)
            .with_current(|inner, seen| inner.current().map(|value| (value, *seen)))
            .on_reset(|seen| *seen = 0)
            .on_advance(|inner, seen| {
                let moved = inner.advance()?;
                *seen += usize::from(moved);
                Ok(moved)
            })
            .build();
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok((8, 2)));
        cursor.reset();
        assert_eq!(cursor.current(), Err(Error::InvalidState));
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok((7, 1)));
    }

    #[rstest]
    fn clones_carry_their_own_state() {
        let mut cursor = Decorator::new(source(&[1, 2, 3]), 0usize)
            .with_current(|_, n| Ok(*n))
            .on_advance(|inner, n| {
                *n += 1;
                inner.advance()
            })
            .build();
        assert_eq!(cursor.advance(), Ok(true));
        let mut copy = cursor.boxed_clone();
        assert_eq!(copy.advance(), Ok(true));
        assert_eq!(copy.current(), Ok(2));
        assert_eq!(cursor.current(), Ok(1));
    }
}
