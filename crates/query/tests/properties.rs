use proptest::prelude::*;
use seqlinq::Enumerable;

fn source() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..24)
}

proptest! {
    #[test]
    fn filter_matches_vec_filter(items in source(), threshold in -50i32..50) {
        let expected: Vec<i32> = items.iter().copied().filter(|n| *n >= threshold).collect();
        let seq = Enumerable::from_vec(items);
        prop_assert_eq!(seq.filter(move |n| *n >= threshold).to_vec(), Ok(expected));
    }

    #[test]
    fn to_vec_is_idempotent(items in source()) {
        let seq = Enumerable::from_vec(items).skip_while(|n| *n < 0);
        prop_assert_eq!(seq.to_vec(), seq.to_vec());
    }

    #[test]
    fn take_and_skip_partition(items in source(), n in 0usize..30) {
        let seq = Enumerable::from_vec(items.clone());
        let head = seq.take(n).to_vec().expect("take");
        let tail = seq.skip(n).to_vec().expect("skip");
        prop_assert_eq!(head.len(), n.min(items.len()));
        prop_assert_eq!(tail.len(), items.len().saturating_sub(n));
        prop_assert_eq!([head, tail].concat(), items);
    }

    #[test]
    fn range_counts_up(start in -1000i64..1000, count in 0usize..64) {
        let expected: Vec<i64> = (0..count).map(|offset| start + offset as i64).collect();
        prop_assert_eq!(Enumerable::range(start, count).to_vec(), Ok(expected));
    }

    #[test]
    fn count_equals_to_vec_len(items in source()) {
        let seq = Enumerable::from_vec(items).filter(|n| n % 3 == 0);
        prop_assert_eq!(seq.count(), seq.to_vec().map(|v| v.len()));
    }
}
