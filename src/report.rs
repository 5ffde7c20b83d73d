//! Human-readable narration of engine results, one line per trace step.

use crate::{
    number_base::{Base, Conversion},
    set_ops::FiniteSet,
};
use discrete_protocol::{SearchAlgorithm, SearchResult, SortResult, StepKind, TraceStep};
use itertools::Itertools;
use std::cmp::Ordering;

pub fn format_sequence(values: &[i64]) -> String {
    format!("[{}]", values.iter().join(", "))
}

pub fn format_set(set: &FiniteSet<i64>) -> String {
    set.to_string()
}

pub fn describe_search_step(step: &TraceStep, algorithm: SearchAlgorithm, target: i64) -> String {
    let index = step.indices.first().copied().unwrap_or_default();
    let value = step.values.first().copied().unwrap_or_default();
    match algorithm {
        SearchAlgorithm::Linear => {
            let relation = if value == target { "=" } else { "≠" };
            format!("Checking index {index}: {value} {relation} {target}")
        }
        SearchAlgorithm::Binary => {
            let [lo, hi] = step.window.unwrap_or([index, index]);
            let head = format!(
                "Step {}: Checking middle element at index {index} = {value}",
                step.step + 1
            );
            match value.cmp(&target) {
                Ordering::Equal => head,
                Ordering::Less => format!(
                    "{head}; {value} < {target}, searching right half [{}..{hi}]",
                    index + 1
                ),
                Ordering::Greater => format!(
                    "{head}; {value} > {target}, searching left half [{lo}..{}]",
                    index as i64 - 1
                ),
            }
        }
    }
}

pub fn search_report(result: &SearchResult, values: &[i64]) -> Vec<String> {
    let mut lines = vec![
        format!("{} for {} in {}", result.algorithm.name(), result.target, format_sequence(values)),
    ];
    lines.extend(
        result
            .trace
            .iter()
            .map(|step| describe_search_step(step, result.algorithm, result.target)),
    );
    match result.index {
        Some(index) => lines.push(format!("✓ Found at index {index}!")),
        None => lines.push("✗ Target not found in array".to_string()),
    }
    lines.push(format!("Probes: {}", result.probes()));
    lines
}

pub fn describe_sort_step(step: &TraceStep) -> String {
    let snapshot = step
        .snapshot
        .as_deref()
        .map(format_sequence)
        .unwrap_or_default();
    match (step.kind, step.indices.as_slice(), step.values.as_slice()) {
        (StepKind::Compare, [a, b], [va, vb]) => {
            format!("Compare index {a} ({va}) with index {b} ({vb})")
        }
        (StepKind::Swap, [a, b], [va, _]) if a == b => {
            format!("{va} is already in correct position at index {a}")
        }
        (StepKind::Swap, [_, _], [va, vb]) => format!("Swapped {va} and {vb}: {snapshot}"),
        (StepKind::Move, [_, to], [va, _]) => {
            format!("Shifted {va} to the right (index {to}): {snapshot}")
        }
        (kind, indices, _) => format!("{kind} at {indices:?}"),
    }
}

pub fn sort_report(result: &SortResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: starting array {}",
        result.algorithm.name(),
        format_sequence(&result.input)
    )];
    lines.extend(
        result
            .trace
            .iter()
            .map(|step| format!("Step {}: {}", step.step + 1, describe_sort_step(step))),
    );
    lines.push(format!("Final sorted array: {}", format_sequence(&result.sorted)));
    lines.push(format!(
        "Comparisons: {}, swaps: {}, moves: {}",
        result.comparisons, result.swaps, result.moves
    ));
    lines
}

pub fn conversion_report(value: &str, from: Base, to: Base, converted: &str) -> Vec<String> {
    vec![
        format!("Input:  {} (base {})", value.trim(), from.radix()),
        format!("Output: {converted} (base {})", to.radix()),
    ]
}

pub fn all_conversions_report(value: &str, from: Base, conversions: &[Conversion]) -> Vec<String> {
    let mut lines = vec![format!("All conversions of {} (base {}):", value.trim(), from.radix())];
    lines.extend(
        conversions
            .iter()
            .map(|c| format!("  • {:<20} → {}", c.base.to_string(), c.value)),
    );
    lines
}

pub fn set_report(
    label: &str,
    a: &FiniteSet<i64>,
    b: Option<&FiniteSet<i64>>,
    result: &FiniteSet<i64>,
) -> Vec<String> {
    let mut lines = vec![format!("Set A: {}", format_set(a))];
    if let Some(b) = b {
        lines.push(format!("Set B: {}", format_set(b)));
    }
    lines.push(format!("{label}: {}", format_set(result)));
    lines.push(format!("Cardinality: {}", result.len()));
    lines
}
