use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use seqlinq_core::{Error, Result};
use tracing::trace;

use crate::cursor::{BoxCursor, Cursor, Position};

/// Shared handle over a keyed record. Keys keep insertion order.
#[derive(Debug)]
pub struct Record<V> {
    entries: Rc<RefCell<IndexMap<String, V>>>,
}

impl<V> Clone for Record<V> {
    fn clone(&self) -> Self {
        Self { entries: Rc::clone(&self.entries) }
    }
}

impl<V> Default for Record<V> {
    fn default() -> Self {
        Self { entries: Rc::new(RefCell::new(IndexMap::new())) }
    }
}

impl<V> Record<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.borrow_mut().insert(key.into(), value)
    }

    /// Removes `key`, keeping the relative order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl<V: Clone> Record<V> {
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Record<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(key, value)| (key.into(), value)).collect();
        Self { entries: Rc::new(RefCell::new(entries)) }
    }
}

/// Element yielded by a [`RecordCursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair<V> {
    pub key: String,
    pub value: V,
}

impl<V> KeyValuePair<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self { key: key.into(), value }
    }
}

/// Leaf cursor over a [`Record`]; the key list is captured on every reset.
pub struct RecordCursor<V> {
    source: Record<V>,
    keys: Vec<String>,
    position: Position,
}

impl<V> RecordCursor<V> {
    pub fn new(source: Record<V>) -> Self {
        let keys = source.keys();
        Self { source, keys, position: Position::Unset }
    }
}

impl<V: Clone + 'static> Cursor<KeyValuePair<V>> for RecordCursor<V> {
    fn current(&self) -> Result<KeyValuePair<V>> {
        let key = &self.keys[self.position.index()?];
        let value = self.source.get(key).ok_or(Error::InvalidState)?;
        Ok(KeyValuePair { key: key.clone(), value })
    }

    fn reset(&mut self) {
        self.keys = self.source.keys();
        self.position = Position::Unset;
        trace!(len = self.keys.len(), "record cursor reset");
    }

    fn advance(&mut self) -> Result<bool> {
        Ok(self.position.step(self.keys.len()))
    }

    fn boxed_clone(&self) -> BoxCursor<KeyValuePair<V>> {
        Box::new(Self { source: self.source.clone(), keys: self.keys.clone(), position: self.position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn yields_pairs_in_insertion_order() {
        let record: Record<i32> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let mut cursor = RecordCursor::new(record);
        let mut seen = Vec::new();
        while cursor.advance().expect("advance") {
            seen.push(cursor.current().expect("current"));
        }
        assert_eq!(seen, [KeyValuePair::new("b", 2), KeyValuePair::new("a", 1), KeyValuePair::new("c", 3)]);
    }

    #[rstest]
    fn reset_recaptures_keys() {
        let record = Record::new();
        record.insert("x", 1);
        let mut cursor = RecordCursor::new(record.clone());
        record.insert("y", 2);
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.advance(), Ok(false));

        record.remove("x");
        cursor.reset();
        assert_eq!(cursor.current(), Err(Error::InvalidState));
        assert_eq!(cursor.advance(), Ok(true));
        assert_eq!(cursor.current(), Ok(KeyValuePair::new("y", 2)));
        assert_eq!(cursor.advance(), Ok(false));
    }
}
