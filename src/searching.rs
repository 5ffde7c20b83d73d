use crate::{
    error::{DiscreteError, Result},
    trace::TraceRecorder,
};
use discrete_protocol::{SearchAlgorithm, SearchResult};
use std::cmp::Ordering;

/// Probes every index from the front and stops at the first match.
pub fn linear_search(values: &[i64], target: i64) -> SearchResult {
    let mut trace = TraceRecorder::new();
    let mut index = None;
    for (i, &value) in values.iter().enumerate() {
        trace.record_probe(i, value, None);
        if value == target {
            index = Some(i);
            break;
        }
    }
    SearchResult {
        algorithm: SearchAlgorithm::Linear,
        target,
        found: index.is_some(),
        index,
        trace: trace.finish(),
    }
}

/// Classic lo/hi bisection over an inclusive window.
///
/// `values` must be sorted ascending. Unsorted input is not rejected here:
/// the probe sequence runs as usual and the outcome may simply be wrong. Use
/// [`binary_search_checked`] to reject it instead.
pub fn binary_search(values: &[i64], target: i64) -> SearchResult {
    let mut trace = TraceRecorder::new();
    let mut index = None;
    if !values.is_empty() {
        let mut lo = 0usize;
        let mut hi = values.len() - 1;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let value = values[mid];
            trace.record_probe(mid, value, Some([lo, hi]));
            match value.cmp(&target) {
                Ordering::Equal => {
                    index = Some(mid);
                    break;
                }
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => {
                    // hi would drop below zero; the window is exhausted
                    if mid == 0 {
                        break;
                    }
                    hi = mid - 1;
                }
            }
        }
    }
    SearchResult {
        algorithm: SearchAlgorithm::Binary,
        target,
        found: index.is_some(),
        index,
        trace: trace.finish(),
    }
}

/// Index of the first element that is smaller than its predecessor.
pub fn first_unsorted_index(values: &[i64]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[0] > pair[1])
        .map(|i| i + 1)
}

pub fn binary_search_checked(values: &[i64], target: i64) -> Result<SearchResult> {
    if let Some(index) = first_unsorted_index(values) {
        return Err(DiscreteError::NotSorted { index });
    }
    Ok(binary_search(values, target))
}
