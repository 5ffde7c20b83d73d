use crate::trace::TraceRecorder;
use discrete_protocol::{SortAlgorithm, SortResult, StepKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Whether selection sort records an exchange when the minimum already sits
/// at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSwapPolicy {
    #[default]
    SkipInPlace,
    Always,
}

/// Working copy plus counters shared by the three sorts.
struct SortRun {
    values: Vec<i64>,
    trace: TraceRecorder,
    comparisons: usize,
    swaps: usize,
    moves: usize,
}

impl SortRun {
    fn new(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            trace: TraceRecorder::new(),
            comparisons: 0,
            swaps: 0,
            moves: 0,
        }
    }

    fn compare(&mut self, a: usize, b: usize) -> Ordering {
        self.comparisons += 1;
        self.trace.compare(&self.values, a, b);
        self.values[a].cmp(&self.values[b])
    }

    fn swap(&mut self, a: usize, b: usize) {
        let before = vec![self.values[a], self.values[b]];
        self.values.swap(a, b);
        self.swaps += 1;
        self.trace.record(
            StepKind::Swap,
            vec![a, b],
            before,
            Some(self.values.clone()),
        );
    }

    /// Shifts the element at `from` one slot right into `to`. The key being
    /// inserted is carried into `from`, so the snapshot stays a permutation.
    fn shift(&mut self, from: usize, to: usize) {
        let before = vec![self.values[from], self.values[to]];
        self.values.swap(from, to);
        self.moves += 1;
        self.trace.record(
            StepKind::Move,
            vec![from, to],
            before,
            Some(self.values.clone()),
        );
    }

    fn finish(self, algorithm: SortAlgorithm, input: &[i64]) -> SortResult {
        SortResult {
            algorithm,
            input: input.to_vec(),
            sorted: self.values,
            trace: self.trace.finish(),
            comparisons: self.comparisons,
            swaps: self.swaps,
            moves: self.moves,
        }
    }
}

/// Adjacent compare-and-swap passes; stops after the first pass without a
/// swap.
pub fn bubble_sort(values: &[i64]) -> SortResult {
    let mut run = SortRun::new(values);
    let n = values.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if run.compare(j, j + 1) == Ordering::Greater {
                run.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    run.finish(SortAlgorithm::Bubble, values)
}

pub fn selection_sort(values: &[i64]) -> SortResult {
    selection_sort_with(values, SelectionSwapPolicy::default())
}

pub fn selection_sort_with(values: &[i64], policy: SelectionSwapPolicy) -> SortResult {
    let mut run = SortRun::new(values);
    let n = values.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if run.compare(min, j) == Ordering::Greater {
                min = j;
            }
        }
        if min != i || policy == SelectionSwapPolicy::Always {
            run.swap(i, min);
        }
    }
    run.finish(SortAlgorithm::Selection, values)
}

pub fn insertion_sort(values: &[i64]) -> SortResult {
    let mut run = SortRun::new(values);
    for i in 1..values.len() {
        // the key travels left from i; j is its current slot
        let mut j = i;
        while j > 0 && run.compare(j - 1, j) == Ordering::Greater {
            run.shift(j - 1, j);
            j -= 1;
        }
    }
    run.finish(SortAlgorithm::Insertion, values)
}

pub fn sort(algorithm: SortAlgorithm, values: &[i64]) -> SortResult {
    sort_with_policy(algorithm, values, SelectionSwapPolicy::default())
}

pub fn sort_with_policy(
    algorithm: SortAlgorithm,
    values: &[i64],
    policy: SelectionSwapPolicy,
) -> SortResult {
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(values),
        SortAlgorithm::Selection => selection_sort_with(values, policy),
        SortAlgorithm::Insertion => insertion_sort(values),
    }
}

pub fn is_non_decreasing(values: &[i64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: &SortResult) -> Vec<StepKind> {
        result.trace.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_bubble_sort_textbook_example() {
        let result = bubble_sort(&[64, 34, 25, 12, 22, 11, 90]);
        assert_eq!(result.sorted, vec![11, 12, 22, 25, 34, 64, 90]);
        assert_eq!(result.input, vec![64, 34, 25, 12, 22, 11, 90]);
        assert_eq!(result.swaps, result.steps_of(StepKind::Swap));
        assert_eq!(result.comparisons, result.steps_of(StepKind::Compare));
    }

    #[test]
    fn test_bubble_sort_trace_order() {
        use StepKind::*;
        let result = bubble_sort(&[3, 1, 2]);
        assert_eq!(kinds(&result), vec![Compare, Swap, Compare, Swap, Compare]);
        assert_eq!(result.trace[1].indices, vec![0, 1]);
        assert_eq!(result.trace[1].values, vec![3, 1]);
        assert_eq!(result.trace[1].snapshot, Some(vec![1, 3, 2]));
        assert_eq!((result.comparisons, result.swaps), (3, 2));
    }

    #[test]
    fn test_bubble_sort_exits_early_on_sorted_input() {
        let result = bubble_sort(&[1, 2, 3, 4]);
        assert_eq!(result.comparisons, 3);
        assert_eq!(result.swaps, 0);
    }

    #[test]
    fn test_selection_sort_trace_order() {
        use StepKind::*;
        let result = selection_sort(&[3, 1, 2]);
        assert_eq!(result.sorted, vec![1, 2, 3]);
        assert_eq!(kinds(&result), vec![Compare, Compare, Swap, Compare, Swap]);
        assert_eq!(result.trace[0].indices, vec![0, 1]);
        assert_eq!(result.trace[1].indices, vec![1, 2]);
        assert_eq!(result.trace[2].indices, vec![0, 1]);
        assert_eq!((result.comparisons, result.swaps), (3, 2));
    }

    #[test]
    fn test_selection_sort_skips_in_place_minimum_by_default() {
        let result = selection_sort(&[1, 2, 3]);
        assert_eq!(result.comparisons, 3);
        assert_eq!(result.swaps, 0);
        assert_eq!(result.steps_of(StepKind::Swap), 0);
    }

    #[test]
    fn test_selection_sort_always_policy_records_self_swaps() {
        let result = selection_sort_with(&[1, 2, 3], SelectionSwapPolicy::Always);
        assert_eq!(result.swaps, 2);
        let swaps: Vec<Vec<usize>> = result
            .trace
            .iter()
            .filter(|s| s.kind == StepKind::Swap)
            .map(|s| s.indices.clone())
            .collect();
        assert_eq!(swaps, vec![vec![0, 0], vec![1, 1]]);
        assert_eq!(result.sorted, vec![1, 2, 3]);
    }

    #[test]
    fn test_insertion_sort_trace_order() {
        use StepKind::*;
        let result = insertion_sort(&[3, 1, 2]);
        assert_eq!(result.sorted, vec![1, 2, 3]);
        assert_eq!(kinds(&result), vec![Compare, Move, Compare, Move, Compare]);
        assert_eq!(result.trace[1].indices, vec![0, 1]);
        assert_eq!(result.trace[1].snapshot, Some(vec![1, 3, 2]));
        assert_eq!(result.trace[3].snapshot, Some(vec![1, 2, 3]));
        assert_eq!((result.comparisons, result.moves, result.swaps), (3, 2, 0));
    }

    #[test]
    fn test_insertion_sort_best_case_is_linear() {
        let result = insertion_sort(&[1, 2, 3, 4, 5]);
        assert_eq!(result.comparisons, 4);
        assert_eq!(result.moves, 0);
    }

    #[test]
    fn test_trivial_inputs_produce_no_steps() {
        for algorithm in SortAlgorithm::all() {
            assert!(sort(algorithm, &[]).trace.is_empty());
            let single = sort(algorithm, &[7]);
            assert!(single.trace.is_empty());
            assert_eq!(single.sorted, vec![7]);
        }
    }

    #[test]
    fn test_all_algorithms_agree_with_duplicates_and_negatives() {
        let input = [5, -2, 9, 5, 0, -2, 13, 1];
        let mut expected = input.to_vec();
        expected.sort();
        for algorithm in SortAlgorithm::all() {
            let result = sort(algorithm, &input);
            assert_eq!(result.sorted, expected, "{}", algorithm.name());
            assert!(is_non_decreasing(&result.sorted));
            for step in &result.trace {
                assert!(step.max_index().unwrap_or(0) < input.len());
                if let Some(snapshot) = &step.snapshot {
                    let mut permuted = snapshot.clone();
                    permuted.sort();
                    assert_eq!(permuted, expected);
                }
            }
        }
    }
}
