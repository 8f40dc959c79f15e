use std::fmt::Debug;

use rstest::rstest;
use seqlinq::{BoxCursor, Cursor, Enumerable, Error, KeyValuePair, Record, SparseArray};

fn drain<T>(cursor: &mut BoxCursor<T>) -> Vec<T> {
    let mut seen = Vec::new();
    while cursor.advance().expect("advance") {
        seen.push(cursor.current().expect("current"));
    }
    seen
}

/// Resetting twice in a row behaves like resetting once, both on a fresh
/// cursor and on one stopped mid-traversal.
fn assert_reset_is_idempotent<T: PartialEq + Debug>(mut cursor: BoxCursor<T>, expected: &[T]) {
    cursor.reset();
    cursor.reset();
    assert_eq!(cursor.current().err(), Some(Error::InvalidState));
    assert_eq!(drain(&mut cursor), expected);

    cursor.reset();
    if !expected.is_empty() {
        assert_eq!(cursor.advance(), Ok(true));
    }
    cursor.reset();
    cursor.reset();
    assert_eq!(cursor.current().err(), Some(Error::InvalidState));
    assert_eq!(drain(&mut cursor), expected);
}

fn numbers() -> Enumerable<i32> {
    Enumerable::from_array(&SparseArray::from(vec![1, 2, 3]))
}

#[rstest]
#[case::array(numbers(), vec![1, 2, 3])]
#[case::take(numbers().take(2), vec![1, 2])]
#[case::skip(numbers().skip(1), vec![2, 3])]
#[case::default_if_empty_filled(numbers().default_if_empty(0), vec![1, 2, 3])]
#[case::default_if_empty_synthesized(Enumerable::empty().default_if_empty(7), vec![7])]
#[case::concat(numbers().concat(&numbers().take(1)), vec![1, 2, 3, 1])]
#[case::zip(numbers().zip(&numbers().skip(1), |a, b| a * b), vec![2, 6])]
fn reset_twice_matches_reset_once(#[case] seq: Enumerable<i32>, #[case] expected: Vec<i32>) {
    assert_reset_is_idempotent(seq.cursor(), &expected);
}

#[rstest]
fn range_reset_is_idempotent() {
    assert_reset_is_idempotent(Enumerable::range(3, 3).cursor(), &[3, 4, 5]);
}

#[rstest]
fn record_reset_is_idempotent() {
    let record = Record::new();
    record.insert("a", 1);
    record.insert("b", 2);
    let expected = [KeyValuePair::new("a", 1), KeyValuePair::new("b", 2)];
    assert_reset_is_idempotent(Enumerable::from_record(&record).cursor(), &expected);
}
