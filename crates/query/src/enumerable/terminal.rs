//! Eager operators. Each one resets a copy of the chain before walking it,
//! so calling a terminal twice gives the same answer.

use seqlinq_core::{Error, Result};
use tracing::trace;

use super::Enumerable;
use crate::cursor::Cursor;

impl<T: 'static> Enumerable<T> {
    #[doc(alias = "to_array")]
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }

    /// Number of elements. Walks the whole chain without reading elements,
    /// so a failing `current` (e.g. behind [`Enumerable::cast`]) is not hit.
    pub fn count(&self) -> Result<usize> {
        let mut cursor = self.cursor();
        let mut count = 0usize;
        while cursor.advance()? {
            count += 1;
        }
        trace!(count, "count evaluated");
        Ok(count)
    }

    pub fn all(&self, predicate: impl Fn(&T) -> bool) -> Result<bool> {
        for item in self {
            if !predicate(&item?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the sequence has at least one element. Like [`Enumerable::count`]
    /// it only advances.
    pub fn any(&self) -> Result<bool> {
        self.cursor().advance()
    }

    pub fn any_where(&self, predicate: impl Fn(&T) -> bool) -> Result<bool> {
        for item in self {
            if predicate(&item?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Element at zero-based `index`; negative or past-the-end indices fail
    /// with [`Error::IndexOutOfRange`]. Only the element at `index` is read.
    pub fn element_at(&self, index: i64) -> Result<T> {
        let Ok(position) = usize::try_from(index) else {
            return Err(Error::IndexOutOfRange { index });
        };
        let mut cursor = self.cursor();
        for _ in 0..=position {
            if !cursor.advance()? {
                return Err(Error::IndexOutOfRange { index });
            }
        }
        cursor.current()
    }

    pub fn element_at_or_default(&self, index: i64, default: T) -> Result<T> {
        match self.element_at(index) {
            Err(Error::IndexOutOfRange { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn first(&self) -> Result<T> {
        self.iter().next().unwrap_or(Err(Error::NoElement))
    }

    pub fn first_where(&self, predicate: impl Fn(&T) -> bool) -> Result<T> {
        self.find_first(predicate)?.ok_or(Error::NoElement)
    }

    pub fn first_or_default(&self, default: T) -> Result<T> {
        Ok(self.iter().next().transpose()?.unwrap_or(default))
    }

    pub fn first_or_default_where(&self, predicate: impl Fn(&T) -> bool, default: T) -> Result<T> {
        Ok(self.find_first(predicate)?.unwrap_or(default))
    }

    pub fn last(&self) -> Result<T> {
        self.find_last(|_| true)?.ok_or(Error::NoElement)
    }

    pub fn last_where(&self, predicate: impl Fn(&T) -> bool) -> Result<T> {
        self.find_last(predicate)?.ok_or(Error::NoElement)
    }

    pub fn last_or_default(&self, default: T) -> Result<T> {
        Ok(self.find_last(|_| true)?.unwrap_or(default))
    }

    pub fn last_or_default_where(&self, predicate: impl Fn(&T) -> bool, default: T) -> Result<T> {
        Ok(self.find_last(predicate)?.unwrap_or(default))
    }

    /// Sum of `selector` over the sequence; `0.0` when empty.
    pub fn sum(&self, selector: impl Fn(&T) -> f64) -> Result<f64> {
        let mut total = 0.0;
        for item in self {
            total += selector(&item?);
        }
        Ok(total)
    }

    /// Mean of `selector`; fails with [`Error::NoElement`] when empty.
    pub fn average(&self, selector: impl Fn(&T) -> f64) -> Result<f64> {
        let mut total = 0.0;
        let mut count = 0usize;
        for item in self {
            total += selector(&item?);
            count += 1;
        }
        if count == 0 {
            return Err(Error::NoElement);
        }
        Ok(total / count as f64)
    }

    pub fn min(&self, selector: impl Fn(&T) -> f64) -> Result<f64> {
        self.fold_numbers(selector, f64::min)
    }

    pub fn max(&self, selector: impl Fn(&T) -> f64) -> Result<f64> {
        self.fold_numbers(selector, f64::max)
    }

    /// Left fold starting from `seed`; an empty sequence returns `seed`.
    pub fn aggregate<A>(&self, seed: A, func: impl Fn(A, T) -> A) -> Result<A> {
        let mut acc = seed;
        for item in self {
            acc = func(acc, item?);
        }
        Ok(acc)
    }

    fn find_first(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>> {
        for item in self {
            let item = item?;
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn find_last(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>> {
        let mut found = None;
        for item in self {
            let item = item?;
            if predicate(&item) {
                found = Some(item);
            }
        }
        Ok(found)
    }

    fn fold_numbers(&self, selector: impl Fn(&T) -> f64, pick: fn(f64, f64) -> f64) -> Result<f64> {
        let mut acc: Option<f64> = None;
        for item in self {
            let value = selector(&item?);
            acc = Some(acc.map_or(value, |current| pick(current, value)));
        }
        acc.ok_or(Error::NoElement)
    }
}

impl<T: PartialEq + 'static> Enumerable<T> {
    pub fn contains(&self, needle: &T) -> Result<bool> {
        self.any_where(|item| item == needle)
    }

    /// Pairwise equality plus equal length. Stops at the first mismatch.
    pub fn sequence_equal(&self, other: &Enumerable<T>) -> Result<bool> {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next().transpose()?, right.next().transpose()?) {
                (Some(a), Some(b)) if a == b => {}
                (None, None) => return Ok(true),
                _ => return Ok(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers(items: &[i32]) -> Enumerable<i32> {
        Enumerable::from_vec(items.to_vec())
    }

    #[rstest]
    fn count_and_any() {
        assert_eq!(numbers(&[1, 2, 3]).count(), Ok(3));
        assert_eq!(numbers(&[]).count(), Ok(0));
        assert_eq!(numbers(&[]).any(), Ok(false));
        assert_eq!(numbers(&[0]).any(), Ok(true));
        assert_eq!(numbers(&[1, 3]).any_where(|n| n % 2 == 0), Ok(false));
        assert_eq!(numbers(&[1, 3]).all(|n| n % 2 == 1), Ok(true));
        assert_eq!(numbers(&[]).all(|_| false), Ok(true));
    }

    #[rstest]
    #[case(0, Ok(10))]
    #[case(2, Ok(30))]
    #[case(3, Err(Error::IndexOutOfRange { index: 3 }))]
    #[case(-1, Err(Error::IndexOutOfRange { index: -1 }))]
    fn element_at_bounds(#[case] index: i64, #[case] expected: Result<i32>) {
        assert_eq!(numbers(&[10, 20, 30]).element_at(index), expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(3)]
    fn element_at_or_default_falls_back(#[case] index: i64) {
        assert_eq!(numbers(&[10, 20, 30]).element_at_or_default(index, -7), Ok(-7));
    }

    #[rstest]
    fn first_and_last_variants() {
        let seq = numbers(&[1, 2, 3, 4]);
        assert_eq!(seq.first(), Ok(1));
        assert_eq!(seq.last(), Ok(4));
        assert_eq!(seq.first_where(|n| *n > 1), Ok(2));
        assert_eq!(seq.last_where(|n| *n < 4), Ok(3));
        assert_eq!(seq.first_where(|n| *n > 9), Err(Error::NoElement));
        assert_eq!(seq.last_or_default_where(|n| *n > 9, 0), Ok(0));
        assert_eq!(seq.first_or_default_where(|n| *n > 2, 0), Ok(3));

        let empty = numbers(&[]);
        assert_eq!(empty.first(), Err(Error::NoElement));
        assert_eq!(empty.last(), Err(Error::NoElement));
        assert_eq!(empty.first_or_default(5), Ok(5));
        assert_eq!(empty.last_or_default(6), Ok(6));
    }

    #[rstest]
    fn numeric_aggregates() {
        let seq = numbers(&[4, 1, 7]);
        assert_eq!(seq.sum(|n| f64::from(*n)), Ok(12.0));
        assert_eq!(seq.average(|n| f64::from(*n)), Ok(4.0));
        assert_eq!(seq.min(|n| f64::from(*n)), Ok(1.0));
        assert_eq!(seq.max(|n| f64::from(*n)), Ok(7.0));
        assert_eq!(seq.aggregate(String::new(), |acc, n| format!("{acc}{n}")), Ok("417".to_owned()));
    }

    #[rstest]
    fn numeric_aggregates_over_empty() {
        let empty = numbers(&[]);
        assert_eq!(empty.sum(|n| f64::from(*n)), Ok(0.0));
        assert_eq!(empty.average(|n| f64::from(*n)), Err(Error::NoElement));
        assert_eq!(empty.min(|n| f64::from(*n)), Err(Error::NoElement));
        assert_eq!(empty.max(|n| f64::from(*n)), Err(Error::NoElement));
        assert_eq!(empty.aggregate(9, |acc, n| acc + n), Ok(9));
    }

    #[rstest]
    #[case(&[1, 2, 3], &[1, 2, 3], true)]
    #[case(&[1, 2, 3], &[1], false)]
    #[case(&[1], &[1, 2, 3], false)]
    #[case(&[1, 2], &[1, 3], false)]
    #[case(&[], &[], true)]
    fn sequence_equal_compares_values_and_length(#[case] a: &[i32], #[case] b: &[i32], #[case] expected: bool) {
        assert_eq!(numbers(a).sequence_equal(&numbers(b)), Ok(expected));
    }

    #[rstest]
    fn contains_uses_equality() {
        assert_eq!(numbers(&[1, 2]).contains(&2), Ok(true));
        assert_eq!(numbers(&[1, 2]).contains(&5), Ok(false));
    }
}
