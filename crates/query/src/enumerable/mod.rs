//! [`Enumerable`]: the query façade and its deferred operators.
//!
//! Operators take `&self` and return a new façade over a decorated clone of
//! the receiver's cursor chain; nothing is evaluated until a terminal
//! operator (see `terminal.rs`) drives the chain.

mod terminal;
mod typed;

use seqlinq_core::{Error, Result};
use tracing::trace;

use crate::combine::{ConcatCursor, ZipCursor};
use crate::cursor::{BoxCursor, Cursor, EmptyCursor};
use crate::decorator::Decorator;
use crate::generators::{RangeCursor, RepeatCursor};
use crate::source::{ArrayCursor, KeyValuePair, Record, RecordCursor, SparseArray};

/// Deferred, re-drivable sequence wrapping exactly one cursor chain.
pub struct Enumerable<T> {
    cursor: BoxCursor<T>,
}

impl<T: 'static> Clone for Enumerable<T> {
    fn clone(&self) -> Self {
        Self { cursor: self.cursor.boxed_clone() }
    }
}

impl<T: 'static> Enumerable<T> {
    pub fn new(cursor: impl Cursor<T> + 'static) -> Self {
        Self { cursor: Box::new(cursor) }
    }

    pub fn from_cursor(cursor: BoxCursor<T>) -> Self {
        Self { cursor }
    }

    pub fn empty() -> Self {
        Self::new(EmptyCursor::new())
    }

    /// Fresh, reset copy of the underlying chain.
    pub fn cursor(&self) -> BoxCursor<T> {
        let mut cursor = self.cursor.boxed_clone();
        cursor.reset();
        cursor
    }

    /// Resets a copy of the chain and walks it. Each item is a `Result`
    /// because reading an element may fail (e.g. behind [`Enumerable::cast`]).
    pub fn iter(&self) -> Iter<T> {
        trace!("driving cursor chain");
        Iter { cursor: self.cursor(), done: false }
    }

    fn decorate<U: 'static>(&self, build: impl FnOnce(BoxCursor<T>) -> BoxCursor<U>) -> Enumerable<U> {
        Enumerable { cursor: build(self.cursor.boxed_clone()) }
    }

    /// Elements for which `predicate` holds, in source order.
    #[doc(alias = "where")]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, ())
                .on_advance(move |inner, _| {
                    while inner.advance()? {
                        if predicate(&inner.current()?) {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                })
                .build()
        })
    }

    pub fn select<U: 'static>(&self, selector: impl Fn(T) -> U + 'static) -> Enumerable<U> {
        self.decorate(|inner| {
            Decorator::new(inner, ()).with_current(move |inner, _| inner.current().map(&selector)).build()
        })
    }

    /// Like [`Enumerable::select`], also passing the zero-based position.
    pub fn select_with_index<U: 'static>(&self, selector: impl Fn(T, usize) -> U + 'static) -> Enumerable<U> {
        self.decorate(|inner| {
            Decorator::new(inner, 0usize)
                .with_current(move |inner, yielded| Ok(selector(inner.current()?, yielded.saturating_sub(1))))
                .on_reset(|yielded| *yielded = 0)
                .on_advance(|inner, yielded| {
                    let moved = inner.advance()?;
                    *yielded += usize::from(moved);
                    Ok(moved)
                })
                .build()
        })
    }

    /// At most the first `count` elements.
    pub fn take(&self, count: usize) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, 0usize)
                .on_reset(|taken| *taken = 0)
                .on_advance(move |inner, taken| {
                    if *taken >= count {
                        return Ok(false);
                    }
                    let moved = inner.advance()?;
                    *taken += usize::from(moved);
                    Ok(moved)
                })
                .build()
        })
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: usize) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, 0usize)
                .on_reset(|skipped| *skipped = 0)
                .on_advance(move |inner, skipped| {
                    while *skipped < count {
                        *skipped += 1;
                        if !inner.advance()? {
                            return Ok(false);
                        }
                    }
                    inner.advance()
                })
                .build()
        })
    }

    /// Drops elements while `predicate` holds, then yields the rest.
    pub fn skip_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, false)
                .on_reset(|yielding| *yielding = false)
                .on_advance(move |inner, yielding| {
                    if *yielding {
                        return inner.advance();
                    }
                    while inner.advance()? {
                        if !predicate(&inner.current()?) {
                            *yielding = true;
                            return Ok(true);
                        }
                    }
                    Ok(false)
                })
                .build()
        })
    }

    /// Yields elements until `predicate` first fails.
    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, false)
                .on_reset(|stopped| *stopped = false)
                .on_advance(move |inner, stopped| {
                    if *stopped {
                        return Ok(false);
                    }
                    if inner.advance()? && predicate(&inner.current()?) {
                        return Ok(true);
                    }
                    *stopped = true;
                    Ok(false)
                })
                .build()
        })
    }

    /// Every element of `self`, then every element of `other`.
    pub fn concat(&self, other: &Enumerable<T>) -> Self {
        Self::new(ConcatCursor::new(self.cursor.boxed_clone(), other.cursor.boxed_clone()))
    }

    /// Positional pairing; ends with the shorter sequence.
    pub fn zip<B: 'static, U: 'static>(
        &self,
        other: &Enumerable<B>,
        combine: impl Fn(T, B) -> U + 'static,
    ) -> Enumerable<U> {
        Enumerable::new(ZipCursor::new(self.cursor.boxed_clone(), other.cursor.boxed_clone(), combine))
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Sequence over a shared array; later mutations are seen on re-traversal.
    pub fn from_array(array: &SparseArray<T>) -> Self {
        Self::new(ArrayCursor::new(array.clone()))
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_array(&SparseArray::from(items))
    }

    pub fn repeat(value: T, count: usize) -> Self {
        Self::new(RepeatCursor::new(value, count))
    }

    /// Yields `default` once when the source turns out to be empty.
    pub fn default_if_empty(&self, default: T) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, Probe::Unknown)
                .with_current(move |inner, probe| match *probe {
                    Probe::Synthesized => Ok(default.clone()),
                    Probe::Unknown | Probe::Filled => inner.current(),
                    Probe::Spent => Err(Error::InvalidState),
                })
                .on_reset(|probe| *probe = Probe::Unknown)
                .on_advance(|inner, probe| {
                    let moved = match *probe {
                        Probe::Unknown => {
                            *probe = if inner.advance()? { Probe::Filled } else { Probe::Synthesized };
                            true
                        }
                        Probe::Filled => inner.advance()?,
                        Probe::Synthesized | Probe::Spent => {
                            *probe = Probe::Spent;
                            false
                        }
                    };
                    Ok(moved)
                })
                .build()
        })
    }
}

impl<T: Clone + PartialEq + 'static> Enumerable<T> {
    /// First occurrence of each element, compared with `PartialEq`.
    pub fn distinct(&self) -> Self {
        self.decorate(|inner| {
            Decorator::new(inner, Vec::<T>::new())
                .on_reset(Vec::clear)
                .on_advance(|inner, seen| {
                    while inner.advance()? {
                        let item = inner.current()?;
                        if !seen.contains(&item) {
                            seen.push(item);
                            return Ok(true);
                        }
                    }
                    Ok(false)
                })
                .build()
        })
    }
}

impl Enumerable<i64> {
    /// `start, start + 1, ..., start + count - 1`.
    pub fn range(start: i64, count: usize) -> Self {
        Self::new(RangeCursor::new(start, count))
    }
}

impl<V: Clone + 'static> Enumerable<KeyValuePair<V>> {
    /// Sequence of the record's entries in key order.
    pub fn from_record(record: &Record<V>) -> Self {
        Self::new(RecordCursor::new(record.clone()))
    }

    pub fn keys(&self) -> Enumerable<String> {
        self.select(|pair| pair.key)
    }

    pub fn values(&self) -> Enumerable<V> {
        self.select(|pair| pair.value)
    }
}

impl<T: Clone + 'static> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_array(&iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Enumerable<T> {
    fn from(value: Vec<T>) -> Self {
        Self::from_vec(value)
    }
}

impl<T: 'static> IntoIterator for &Enumerable<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Unknown,
    Filled,
    Synthesized,
    Spent,
}

/// Iterator over a reset copy of a cursor chain. Stops after the first error.
pub struct Iter<T> {
    cursor: BoxCursor<T>,
    done: bool,
}

impl<T> Iterator for Iter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = match self.cursor.advance() {
            Ok(true) => self.cursor.current().map(Some),
            Ok(false) => Ok(None),
            Err(err) => Err(err),
        };
        match step {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
