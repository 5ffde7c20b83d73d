//! Machine-readable result contracts shared by the Discrete Lab engines and
//! every presentation surface (GUI, shell, CLI JSON output).

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Compare,
    Swap,
    Probe,
    Move,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Probe => "probe",
            Self::Move => "move",
        };
        write!(f, "{name}")
    }
}

/// One recorded algorithm step.
///
/// `indices` and `values` are parallel: `values[k]` is the element that sat
/// at `indices[k]` when the step happened. `snapshot` is the sequence state
/// after the step and is only recorded for steps that change the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: usize,
    pub kind: StepKind,
    pub indices: Vec<usize>,
    pub values: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Vec<i64>>,
}

impl TraceStep {
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    Linear,
    Binary,
}

impl SearchAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear Search",
            Self::Binary => "Binary Search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub algorithm: SearchAlgorithm,
    pub target: i64,
    pub found: bool,
    /// `None` when the target is absent.
    pub index: Option<usize>,
    pub trace: Vec<TraceStep>,
}

impl SearchResult {
    pub fn probes(&self) -> usize {
        self.trace.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
}

impl SortAlgorithm {
    pub fn all() -> [SortAlgorithm; 3] {
        [Self::Bubble, Self::Selection, Self::Insertion]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" | "bubble-sort" => Ok(Self::Bubble),
            "selection" | "selection-sort" => Ok(Self::Selection),
            "insertion" | "insertion-sort" => Ok(Self::Insertion),
            other => Err(format!(
                "Unknown sort algorithm '{other}', expected 'bubble', 'selection' or 'insertion'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResult {
    pub algorithm: SortAlgorithm,
    pub input: Vec<i64>,
    pub sorted: Vec<i64>,
    pub trace: Vec<TraceStep>,
    pub comparisons: usize,
    pub swaps: usize,
    pub moves: usize,
}

impl SortResult {
    pub fn steps_of(&self, kind: StepKind) -> usize {
        self.trace.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_kind_serializes_snake_case() {
        let text = serde_json::to_string(&StepKind::Probe).unwrap();
        assert_eq!(text, "\"probe\"");
    }

    #[test]
    fn test_trace_step_omits_absent_optionals() {
        let step = TraceStep {
            step: 0,
            kind: StepKind::Compare,
            indices: vec![0, 1],
            values: vec![5, 3],
            window: None,
            snapshot: None,
        };
        let value = serde_json::to_value(&step).unwrap();
        assert!(value.get("window").is_none());
        assert!(value.get("snapshot").is_none());
        let back: TraceStep = serde_json::from_value(value).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_not_found_index_is_null() {
        let result = SearchResult {
            algorithm: SearchAlgorithm::Linear,
            target: 4,
            found: false,
            index: None,
            trace: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["index"].is_null());
    }

    #[test]
    fn test_sort_algorithm_from_str() {
        assert_eq!("Bubble".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Bubble));
        assert_eq!(
            "insertion-sort".parse::<SortAlgorithm>(),
            Ok(SortAlgorithm::Insertion)
        );
        assert!("quick".parse::<SortAlgorithm>().is_err());
    }
}
