//! Algebraic properties of the PSI functions.

use proptest::prelude::*;

use noshow_monitor::psi::{MIN_SAMPLES, psi_categorical, psi_numeric};

fn values(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, len)
}

proptest! {
    #[test]
    fn identical_numeric_slices_score_zero(sample in values(MIN_SAMPLES..400), bins in 2usize..20) {
        prop_assert_eq!(psi_numeric(&sample, &sample, bins), 0.0);
    }

    #[test]
    fn numeric_psi_is_never_negative(
        reference in values(MIN_SAMPLES..300),
        current in values(MIN_SAMPLES..300),
    ) {
        let psi = psi_numeric(&reference, &current, 10);
        prop_assert!(psi >= 0.0);
    }

    #[test]
    fn undersized_slices_are_nan(
        reference in values(0..MIN_SAMPLES),
        current in values(MIN_SAMPLES..200),
    ) {
        prop_assert!(psi_numeric(&reference, &current, 10).is_nan());
        prop_assert!(psi_numeric(&current, &reference, 10).is_nan());
    }

    #[test]
    fn categorical_psi_ignores_row_order(
        sample in prop::collection::vec("[a-e]", 1..100),
    ) {
        let mut reordered = sample.clone();
        reordered.sort();
        reordered.reverse();
        prop_assert_eq!(psi_categorical(&sample, &reordered), 0.0);
    }
}
