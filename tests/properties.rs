use discrete_lab::{
    number_base::{self, Base},
    searching,
    set_ops::{self, FiniteSet},
    sorting,
};
use discrete_protocol::{SortAlgorithm, StepKind};
use proptest::prelude::*;

fn small_vec() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-50i64..50, 0..24)
}

fn base() -> impl Strategy<Value = Base> {
    prop::sample::select(Base::ALL.to_vec())
}

fn set_of(values: &[i64]) -> FiniteSet<i64> {
    values.iter().copied().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn conversion_round_trips_through_any_base(n in -1_000_000i64..1_000_000, from in base(), to in base()) {
        let rendered = number_base::render_numeral(n as i128, from);
        let converted = number_base::convert(&rendered, from.radix(), to.radix()).unwrap();
        let back = number_base::convert(&converted, to.radix(), from.radix()).unwrap();
        prop_assert_eq!(back, rendered);
        prop_assert_eq!(number_base::parse_numeral(&converted, to).unwrap(), n as i128);
    }

    #[test]
    fn inclusion_exclusion_holds(a in small_vec(), b in small_vec()) {
        let (a, b) = (set_of(&a), set_of(&b));
        let union = set_ops::union(&a, &b);
        let inter = set_ops::intersection(&a, &b);
        prop_assert_eq!(
            set_ops::cardinality(&union) + set_ops::cardinality(&inter),
            set_ops::cardinality(&a) + set_ops::cardinality(&b)
        );
    }

    #[test]
    fn difference_is_disjoint_from_subtrahend(a in small_vec(), b in small_vec()) {
        let (a, b) = (set_of(&a), set_of(&b));
        let diff = set_ops::difference(&a, &b);
        prop_assert!(set_ops::intersection(&diff, &b).is_empty());
        prop_assert!(diff.iter().all(|x| a.contains(x)));
    }

    #[test]
    fn sorts_agree_and_keep_every_snapshot_a_permutation(values in small_vec()) {
        let mut expected = values.clone();
        expected.sort();
        for algorithm in SortAlgorithm::all() {
            let result = sorting::sort(algorithm, &values);
            prop_assert_eq!(&result.sorted, &expected);
            prop_assert_eq!(result.comparisons, result.steps_of(StepKind::Compare));
            for (i, step) in result.trace.iter().enumerate() {
                prop_assert_eq!(step.step, i);
                prop_assert!(step.max_index().is_some_and(|m| m < values.len()));
                if let Some(snapshot) = &step.snapshot {
                    let mut permuted = snapshot.clone();
                    permuted.sort();
                    prop_assert_eq!(&permuted, &expected);
                }
            }
        }
    }

    #[test]
    fn binary_search_agrees_with_linear_on_distinct_sorted_input(values in small_vec(), target in -60i64..60) {
        let mut distinct = values;
        distinct.sort();
        distinct.dedup();
        let linear = searching::linear_search(&distinct, target);
        let binary = searching::binary_search(&distinct, target);
        prop_assert_eq!(linear.index, binary.index);
        prop_assert_eq!(linear.found, binary.found);
        let bound = usize::BITS - distinct.len().leading_zeros();
        prop_assert!(binary.probes() <= bound as usize);
    }

    #[test]
    fn search_traces_stay_in_bounds_on_any_input(values in small_vec(), target in -60i64..60) {
        for result in [
            searching::linear_search(&values, target),
            searching::binary_search(&values, target),
        ] {
            for (i, step) in result.trace.iter().enumerate() {
                prop_assert_eq!(step.step, i);
                prop_assert_eq!(step.kind, StepKind::Probe);
                prop_assert!(step.max_index().is_some_and(|m| m < values.len()));
                if let Some([lo, hi]) = step.window {
                    prop_assert!(lo <= hi && hi < values.len());
                }
            }
            if let Some(index) = result.index {
                prop_assert_eq!(values[index], target);
            }
        }
    }
}
