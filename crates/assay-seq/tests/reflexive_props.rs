mod common;

use assay_core::AssertionError;
use assay_seq::compare_sequences_eq;
use proptest::prelude::*;

use common::{Listing, RangeSequence};

fn expected_range(count: usize) -> Vec<i32> {
    (0..count as i32).collect()
}

proptest! {
    #[test]
    fn consistent_listing_equals_its_items(items in prop::collection::vec(any::<i32>(), 0..32)) {
        let subject = Listing::new(items.clone());
        prop_assert!(compare_sequences_eq::<i32, _, _>(Some(&subject), Some(items)).is_ok());
    }

    #[test]
    fn listing_never_equals_different_items(
        items in prop::collection::vec(any::<i32>(), 0..16),
        other in prop::collection::vec(any::<i32>(), 0..16),
    ) {
        prop_assume!(items != other);
        let subject = Listing::new(items);
        let result = compare_sequences_eq::<i32, _, _>(Some(&subject), Some(other));
        prop_assert!(
            matches!(
                result,
                Err(AssertionError::ElementMismatch { .. } | AssertionError::LengthMismatch(_))
            ),
            "unexpected outcome: {:?}",
            result
        );
    }

    #[test]
    fn equal_path_counts_compare_equal(count in 0usize..16) {
        let subject = RangeSequence::list(count, count, count, count, count);
        let expected = expected_range(count);
        prop_assert!(compare_sequences_eq::<i32, _, _>(Some(&subject), Some(expected)).is_ok());
    }

    #[test]
    fn any_disagreeing_path_fails(
        count in 0usize..8,
        counts in prop::array::uniform5(0usize..8),
    ) {
        prop_assume!(counts.iter().any(|c| *c != count));
        let [own, sequence, typed, len, indexed] = counts;
        let subject = RangeSequence::list(own, sequence, typed, len, indexed);
        let err = compare_sequences_eq::<i32, _, _>(Some(&subject), Some(expected_range(count)))
            .expect_err("a disagreeing path must fail");
        prop_assert!(!err.is_validation());
        prop_assert_eq!(subject.lifecycle().acquired.get(), subject.lifecycle().released.get());
    }
}
