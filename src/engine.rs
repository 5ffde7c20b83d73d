use crate::{
    error::DiscreteError,
    number_base::{self, ArithmeticOp, Base, Conversion},
    report,
    searching,
    set_ops::{self, FiniteSet},
    sorting::{self, SelectionSwapPolicy},
};
use discrete_protocol::{SearchResult, SortAlgorithm, SortResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub type OpId = String;
pub type RunId = String;

pub const MAX_REPLAY_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabSettings {
    pub selection_swap_policy: SelectionSwapPolicy,
    pub reject_empty_input: bool,
    pub require_sorted_for_binary_search: bool,
    pub replay_interval_ms: u64,
}

impl LabSettings {
    /// Replay step interval, clamped to [`MAX_REPLAY_INTERVAL_MS`] for values
    /// read from hand-edited state files.
    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms.min(MAX_REPLAY_INTERVAL_MS))
    }
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            selection_swap_policy: SelectionSwapPolicy::SkipInPlace,
            reject_empty_input: true,
            require_sorted_for_binary_search: false,
            replay_interval_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabState {
    #[serde(default)]
    pub settings: LabSettings,
}

impl LabState {
    pub fn load_from_path(path: &str) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError {
            code: ErrorCode::Io,
            message: format!("Could not read state file '{path}': {e}"),
        })?;
        serde_json::from_str(&text).map_err(|e| EngineError {
            code: ErrorCode::InvalidInput,
            message: format!("Could not parse state JSON '{path}': {e}"),
        })
    }

    pub fn save_to_path(&self, path: &str) -> Result<(), EngineError> {
        let text = serde_json::to_string_pretty(self).map_err(|e| EngineError {
            code: ErrorCode::Internal,
            message: format!("Could not serialize state: {e}"),
        })?;
        std::fs::write(path, text).map_err(|e| EngineError {
            code: ErrorCode::Io,
            message: format!("Could not write state file '{path}': {e}"),
        })?;
        debug!(path, "saved lab state");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Convert {
        value: String,
        from_base: u32,
        to_base: u32,
    },
    ConvertAll {
        value: String,
        from_base: u32,
    },
    Arithmetic {
        a: String,
        b: String,
        op: ArithmeticOp,
        base: u32,
    },
    Union {
        a: Vec<i64>,
        b: Vec<i64>,
    },
    Intersection {
        a: Vec<i64>,
        b: Vec<i64>,
    },
    Difference {
        a: Vec<i64>,
        b: Vec<i64>,
    },
    Cardinality {
        set: Vec<i64>,
    },
    LinearSearch {
        values: Vec<i64>,
        target: i64,
    },
    BinarySearch {
        values: Vec<i64>,
        target: i64,
        /// Search a sorted copy; reported indices refer to that copy.
        #[serde(default)]
        presort: bool,
    },
    Sort {
        algorithm: SortAlgorithm,
        values: Vec<i64>,
    },
    SetParameter {
        name: String,
        value: serde_json::Value,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert { .. } => "Convert",
            Self::ConvertAll { .. } => "ConvertAll",
            Self::Arithmetic { .. } => "Arithmetic",
            Self::Union { .. } => "Union",
            Self::Intersection { .. } => "Intersection",
            Self::Difference { .. } => "Difference",
            Self::Cardinality { .. } => "Cardinality",
            Self::LinearSearch { .. } => "LinearSearch",
            Self::BinarySearch { .. } => "BinarySearch",
            Self::Sort { .. } => "Sort",
            Self::SetParameter { .. } => "SetParameter",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub run_id: RunId,
    pub ops: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpOutput {
    Numeral { value: String, base: u32 },
    Conversions { conversions: Vec<Conversion> },
    Set { elements: Vec<i64>, cardinality: usize },
    Cardinality { count: usize },
    Search { result: SearchResult },
    Sort { result: SortResult },
    Parameter { name: String, value: serde_json::Value },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub op_id: OpId,
    pub output: OpOutput,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub run_id: RunId,
    pub op: Operation,
    pub result: OpResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    Unsupported,
    Io,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct EngineError {
    pub code: ErrorCode,
    pub message: String,
}

impl EngineError {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
        }
    }
}

impl From<DiscreteError> for EngineError {
    fn from(err: DiscreteError) -> Self {
        let code = match err {
            DiscreteError::UnsupportedBase(_) => ErrorCode::Unsupported,
            _ => ErrorCode::InvalidInput,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub protocol_version: String,
    pub supported_operations: Vec<String>,
    pub supported_bases: Vec<u32>,
    pub sort_algorithms: Vec<SortAlgorithm>,
    pub deterministic_operation_log: bool,
}

pub trait Engine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError>;
    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError>;
    fn state(&self) -> &LabState;
}

/// Dispatches operations to the stateless engines.
///
/// The only state held here belongs to the presentation side: settings and
/// the log of applied operations.
#[derive(Debug, Clone, Default)]
pub struct LabEngine {
    state: LabState,
    journal: Vec<OperationRecord>,
    op_counter: u64,
}

impl LabEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: LabState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &LabState {
        &self.state
    }

    pub fn settings(&self) -> &LabSettings {
        &self.state.settings
    }

    pub fn capabilities() -> Capabilities {
        Capabilities {
            protocol_version: "v1".to_string(),
            supported_operations: vec![
                "Convert".to_string(),
                "ConvertAll".to_string(),
                "Arithmetic".to_string(),
                "Union".to_string(),
                "Intersection".to_string(),
                "Difference".to_string(),
                "Cardinality".to_string(),
                "LinearSearch".to_string(),
                "BinarySearch".to_string(),
                "Sort".to_string(),
                "SetParameter".to_string(),
            ],
            supported_bases: Base::ALL.iter().map(|b| b.radix()).collect(),
            sort_algorithms: SortAlgorithm::all().to_vec(),
            deterministic_operation_log: true,
        }
    }

    pub fn operation_log(&self) -> &[OperationRecord] {
        &self.journal
    }

    fn next_op_id(&mut self) -> OpId {
        self.op_counter += 1;
        format!("op-{}", self.op_counter)
    }

    fn require_values(&self, values: &[i64], what: &str) -> Result<(), EngineError> {
        if values.is_empty() && self.state.settings.reject_empty_input {
            return Err(DiscreteError::EmptyInput(format!("{what} needs at least one element")).into());
        }
        Ok(())
    }

    fn set_parameter(&mut self, name: &str, value: &serde_json::Value) -> Result<(), EngineError> {
        let settings = &mut self.state.settings;
        match name {
            "selection_swap_policy" => {
                settings.selection_swap_policy = serde_json::from_value(value.clone())
                    .map_err(|e| {
                        EngineError::invalid(format!(
                            "Invalid value for selection_swap_policy: {e}"
                        ))
                    })?;
            }
            "reject_empty_input" => {
                settings.reject_empty_input = value.as_bool().ok_or_else(|| {
                    EngineError::invalid("reject_empty_input expects a boolean")
                })?;
            }
            "require_sorted_for_binary_search" => {
                settings.require_sorted_for_binary_search = value.as_bool().ok_or_else(|| {
                    EngineError::invalid("require_sorted_for_binary_search expects a boolean")
                })?;
            }
            "replay_interval_ms" => {
                settings.replay_interval_ms = value
                    .as_u64()
                    .filter(|ms| *ms <= MAX_REPLAY_INTERVAL_MS)
                    .ok_or_else(|| {
                        EngineError::invalid(format!(
                            "replay_interval_ms expects an integer between 0 and {MAX_REPLAY_INTERVAL_MS}"
                        ))
                    })?;
            }
            other => {
                return Err(EngineError::invalid(format!("Unknown parameter '{other}'")));
            }
        }
        Ok(())
    }

    fn set_output(
        &self,
        label: &str,
        a: &FiniteSet<i64>,
        b: &FiniteSet<i64>,
        result: FiniteSet<i64>,
    ) -> (OpOutput, Vec<String>) {
        let messages = report::set_report(label, a, Some(b), &result);
        let output = OpOutput::Set {
            cardinality: set_ops::cardinality(&result),
            elements: result.sorted(),
        };
        (output, messages)
    }

    fn apply_internal(&mut self, op: &Operation) -> Result<OpResult, EngineError> {
        let mut warnings = Vec::new();
        let (output, messages) = match op {
            Operation::Convert {
                value,
                from_base,
                to_base,
            } => {
                let converted = number_base::convert(value, *from_base, *to_base)?;
                let messages = report::conversion_report(
                    value,
                    Base::try_from(*from_base)?,
                    Base::try_from(*to_base)?,
                    &converted,
                );
                (
                    OpOutput::Numeral {
                        value: converted,
                        base: *to_base,
                    },
                    messages,
                )
            }
            Operation::ConvertAll { value, from_base } => {
                let conversions = number_base::convert_all(value, *from_base)?;
                let messages = report::all_conversions_report(
                    value,
                    Base::try_from(*from_base)?,
                    &conversions,
                );
                (OpOutput::Conversions { conversions }, messages)
            }
            Operation::Arithmetic { a, b, op, base } => {
                let result = number_base::arithmetic(a, b, *op, *base)?;
                let messages = vec![format!(
                    "{} {} {} = {result} (base {base})",
                    a.trim(),
                    op.symbol(),
                    b.trim()
                )];
                (
                    OpOutput::Numeral {
                        value: result,
                        base: *base,
                    },
                    messages,
                )
            }
            Operation::Union { a, b } => {
                let (a, b) = (FiniteSet::from_iter(a.clone()), FiniteSet::from_iter(b.clone()));
                self.set_output("Union (A ∪ B)", &a, &b, set_ops::union(&a, &b))
            }
            Operation::Intersection { a, b } => {
                let (a, b) = (FiniteSet::from_iter(a.clone()), FiniteSet::from_iter(b.clone()));
                self.set_output("Intersection (A ∩ B)", &a, &b, set_ops::intersection(&a, &b))
            }
            Operation::Difference { a, b } => {
                let (a, b) = (FiniteSet::from_iter(a.clone()), FiniteSet::from_iter(b.clone()));
                self.set_output("Difference (A - B)", &a, &b, set_ops::difference(&a, &b))
            }
            Operation::Cardinality { set } => {
                let set: FiniteSet<i64> = set.iter().copied().collect();
                let count = set_ops::cardinality(&set);
                let messages = vec![format!(
                    "Cardinality of {} (|A|): {count}",
                    report::format_set(&set)
                )];
                (OpOutput::Cardinality { count }, messages)
            }
            Operation::LinearSearch { values, target } => {
                self.require_values(values, "Linear search")?;
                let result = searching::linear_search(values, *target);
                let messages = report::search_report(&result, values);
                (OpOutput::Search { result }, messages)
            }
            Operation::BinarySearch {
                values,
                target,
                presort,
            } => {
                self.require_values(values, "Binary search")?;
                let mut messages = Vec::new();
                let result = if *presort {
                    let mut sorted = values.clone();
                    sorted.sort_unstable();
                    messages.push(format!("Sorted array: {}", report::format_sequence(&sorted)));
                    warnings.push("Indices refer to the sorted copy of the input".to_string());
                    let result = searching::binary_search(&sorted, *target);
                    messages.extend(report::search_report(&result, &sorted));
                    result
                } else {
                    let result = if self.state.settings.require_sorted_for_binary_search {
                        searching::binary_search_checked(values, *target)?
                    } else {
                        if let Some(index) = searching::first_unsorted_index(values) {
                            warnings.push(format!(
                                "Input is not sorted ascending (order breaks at index {index}); the result may be wrong"
                            ));
                        }
                        searching::binary_search(values, *target)
                    };
                    messages.extend(report::search_report(&result, values));
                    result
                };
                (OpOutput::Search { result }, messages)
            }
            Operation::Sort { algorithm, values } => {
                self.require_values(values, algorithm.name())?;
                let result = sorting::sort_with_policy(
                    *algorithm,
                    values,
                    self.state.settings.selection_swap_policy,
                );
                if !sorting::is_non_decreasing(&result.sorted) {
                    return Err(EngineError {
                        code: ErrorCode::Internal,
                        message: format!("{} produced unsorted output", algorithm.name()),
                    });
                }
                let messages = report::sort_report(&result);
                (OpOutput::Sort { result }, messages)
            }
            Operation::SetParameter { name, value } => {
                self.set_parameter(name, value)?;
                debug!(name = name.as_str(), %value, "updated setting");
                (
                    OpOutput::Parameter {
                        name: name.clone(),
                        value: value.clone(),
                    },
                    vec![format!("Set parameter '{name}' to {value}")],
                )
            }
        };

        Ok(OpResult {
            op_id: self.next_op_id(),
            output,
            warnings,
            messages,
        })
    }

    fn apply_recorded(&mut self, op: Operation, run_id: &str) -> Result<OpResult, EngineError> {
        debug!(op = op.name(), run_id, "applying operation");
        let result = self.apply_internal(&op).inspect_err(|e| {
            warn!(op = op.name(), run_id, error = %e, "operation rejected");
        })?;
        self.journal.push(OperationRecord {
            run_id: run_id.to_string(),
            op,
            result: result.clone(),
        });
        Ok(result)
    }
}

impl Engine for LabEngine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError> {
        self.apply_recorded(op, "interactive")
    }

    /// All or nothing: settings, journal and op ids are only committed when
    /// every operation succeeds.
    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError> {
        let mut staged = self.clone();
        let mut results = Vec::with_capacity(wf.ops.len());
        for op in wf.ops {
            results.push(staged.apply_recorded(op, &wf.run_id)?);
        }
        *self = staged;
        Ok(results)
    }

    fn state(&self) -> &LabState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discrete_protocol::StepKind;

    fn search_of(result: OpResult) -> SearchResult {
        match result.output {
            OpOutput::Search { result } => result,
            other => panic!("unexpected output: {other:?}"),
        }
    }

    fn sort_of(result: OpResult) -> SortResult {
        match result.output {
            OpOutput::Sort { result } => result,
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn test_convert_operation() {
        let mut engine = LabEngine::new();
        let res = engine
            .apply(Operation::Convert {
                value: "13".to_string(),
                from_base: 10,
                to_base: 16,
            })
            .unwrap();
        assert_eq!(
            res.output,
            OpOutput::Numeral {
                value: "D".to_string(),
                base: 16
            }
        );
        assert_eq!(res.op_id, "op-1");
        assert!(res.messages.iter().any(|m| m.contains("Output: D")));
    }

    #[test]
    fn test_error_codes_follow_taxonomy() {
        let mut engine = LabEngine::new();
        let err = engine
            .apply(Operation::Convert {
                value: "12".to_string(),
                from_base: 7,
                to_base: 10,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unsupported);

        let err = engine
            .apply(Operation::Convert {
                value: "19".to_string(),
                from_base: 8,
                to_base: 10,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("Invalid digit '9'"));
        assert!(engine.operation_log().is_empty());
    }

    #[test]
    fn test_set_operations_dedupe_and_sort_output() {
        let mut engine = LabEngine::new();
        let res = engine
            .apply(Operation::Union {
                a: vec![3, 1, 2, 3],
                b: vec![4, 2],
            })
            .unwrap();
        assert_eq!(
            res.output,
            OpOutput::Set {
                elements: vec![1, 2, 3, 4],
                cardinality: 4
            }
        );
        let res = engine
            .apply(Operation::Difference {
                a: vec![1, 2, 3],
                b: vec![2, 3, 4],
            })
            .unwrap();
        assert_eq!(
            res.output,
            OpOutput::Set {
                elements: vec![1],
                cardinality: 1
            }
        );
        let res = engine
            .apply(Operation::Cardinality { set: vec![] })
            .unwrap();
        assert_eq!(res.output, OpOutput::Cardinality { count: 0 });
    }

    #[test]
    fn test_empty_sequences_rejected_by_default() {
        let mut engine = LabEngine::new();
        let err = engine
            .apply(Operation::LinearSearch {
                values: vec![],
                target: 1,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.starts_with("Empty input"));

        engine
            .apply(Operation::SetParameter {
                name: "reject_empty_input".to_string(),
                value: serde_json::json!(false),
            })
            .unwrap();
        let res = engine
            .apply(Operation::Sort {
                algorithm: SortAlgorithm::Bubble,
                values: vec![],
            })
            .unwrap();
        assert!(sort_of(res).sorted.is_empty());
    }

    #[test]
    fn test_binary_search_warns_on_unsorted_input() {
        let mut engine = LabEngine::new();
        let res = engine
            .apply(Operation::BinarySearch {
                values: vec![9, 1, 5],
                target: 5,
                presort: false,
            })
            .unwrap();
        assert_eq!(res.warnings.len(), 1);
        assert!(res.warnings[0].contains("index 1"));
    }

    #[test]
    fn test_binary_search_guard_setting() {
        let mut engine = LabEngine::new();
        engine
            .apply(Operation::SetParameter {
                name: "require_sorted_for_binary_search".to_string(),
                value: serde_json::json!(true),
            })
            .unwrap();
        let err = engine
            .apply(Operation::BinarySearch {
                values: vec![9, 1, 5],
                target: 5,
                presort: false,
            })
            .unwrap_err();
        assert!(err.message.contains("ascending"));
    }

    #[test]
    fn test_binary_search_presort_searches_sorted_copy() {
        let mut engine = LabEngine::new();
        let res = engine
            .apply(Operation::BinarySearch {
                values: vec![56, 2, 23, 8],
                target: 23,
                presort: true,
            })
            .unwrap();
        assert_eq!(res.messages[0], "Sorted array: [2, 8, 23, 56]");
        let result = search_of(res);
        assert_eq!(result.index, Some(2));
    }

    #[test]
    fn test_selection_policy_setting_reaches_sort() {
        let mut engine = LabEngine::new();
        engine
            .apply(Operation::SetParameter {
                name: "selection_swap_policy".to_string(),
                value: serde_json::json!("always"),
            })
            .unwrap();
        assert_eq!(
            engine.settings().selection_swap_policy,
            SelectionSwapPolicy::Always
        );
        let res = engine
            .apply(Operation::Sort {
                algorithm: SortAlgorithm::Selection,
                values: vec![1, 2, 3],
            })
            .unwrap();
        assert_eq!(sort_of(res).steps_of(StepKind::Swap), 2);
    }

    #[test]
    fn test_set_parameter_rejects_unknown_and_mistyped() {
        let mut engine = LabEngine::new();
        let err = engine
            .apply(Operation::SetParameter {
                name: "colour".to_string(),
                value: serde_json::json!(1),
            })
            .unwrap_err();
        assert!(err.message.contains("Unknown parameter"));
        let err = engine
            .apply(Operation::SetParameter {
                name: "replay_interval_ms".to_string(),
                value: serde_json::json!("fast"),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        let err = engine
            .apply(Operation::SetParameter {
                name: "replay_interval_ms".to_string(),
                value: serde_json::json!(u64::MAX),
            })
            .unwrap_err();
        assert!(err.message.contains("between 0 and 5000"));
        assert_eq!(engine.settings(), &LabSettings::default());
    }

    #[test]
    fn test_replay_interval_clamps_values_from_state_files() {
        let settings: LabSettings =
            serde_json::from_value(serde_json::json!({ "replay_interval_ms": u64::MAX })).unwrap();
        assert_eq!(
            settings.replay_interval(),
            Duration::from_millis(MAX_REPLAY_INTERVAL_MS)
        );
        assert_eq!(
            LabSettings::default().replay_interval(),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn test_workflow_is_journaled_in_order() {
        let mut engine = LabEngine::new();
        let wf: Workflow = serde_json::from_value(serde_json::json!({
            "run_id": "lesson-1",
            "ops": [
                { "Sort": { "algorithm": "insertion", "values": [3, 2, 1] } },
                { "LinearSearch": { "values": [1, 2, 3], "target": 3 } }
            ]
        }))
        .unwrap();
        let results = engine.apply_workflow(wf).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(engine.operation_log().len(), 2);
        assert_eq!(engine.operation_log()[0].run_id, "lesson-1");
        assert_eq!(engine.operation_log()[1].result.op_id, "op-2");
    }

    #[test]
    fn test_failed_workflow_leaves_engine_untouched() {
        let mut engine = LabEngine::new();
        let wf: Workflow = serde_json::from_value(serde_json::json!({
            "run_id": "broken",
            "ops": [
                { "SetParameter": { "name": "reject_empty_input", "value": false } },
                { "Convert": { "value": "12", "from_base": 10, "to_base": 2 } },
                { "Convert": { "value": "9", "from_base": 8, "to_base": 10 } }
            ]
        }))
        .unwrap();
        let err = engine.apply_workflow(wf).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(Engine::state(&engine), &LabState::default());
        assert!(engine.operation_log().is_empty());

        let res = engine
            .apply(Operation::Cardinality { set: vec![1, 1, 2] })
            .unwrap();
        assert_eq!(res.op_id, "op-1");
    }

    #[test]
    fn test_state_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let path = path.to_string_lossy().to_string();
        let mut state = LabState::default();
        state.settings.replay_interval_ms = 50;
        state.save_to_path(&path).unwrap();
        assert_eq!(LabState::load_from_path(&path).unwrap(), state);

        let missing = dir.path().join("missing.json");
        let err = LabState::load_from_path(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err.code, ErrorCode::Io));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let state: LabState =
            serde_json::from_str(r#"{ "settings": { "reject_empty_input": false } }"#).unwrap();
        assert!(!state.settings.reject_empty_input);
        assert_eq!(state.settings.replay_interval_ms, 400);
    }
}
