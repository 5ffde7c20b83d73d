//! Editable text fields behind each tab. A form only turns what was typed
//! into an [`Operation`]; the engine does the rest.

use crate::{
    engine::{EngineError, Operation},
    input,
    number_base::{ArithmeticOp, Base},
};
use discrete_protocol::{SearchAlgorithm, SortAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    NumberSystems,
    Sets,
    Searching,
    Sorting,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::NumberSystems, Tab::Sets, Tab::Searching, Tab::Sorting];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::NumberSystems => "Number Systems",
            Tab::Sets => "Set Operations",
            Tab::Searching => "Searching",
            Tab::Sorting => "Sorting",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterForm {
    pub value: String,
    pub from_base: Base,
    pub to_base: Base,
}

impl Default for ConverterForm {
    fn default() -> Self {
        Self {
            value: String::new(),
            from_base: Base::Decimal,
            to_base: Base::Binary,
        }
    }
}

impl ConverterForm {
    pub fn convert(&self) -> Operation {
        Operation::Convert {
            value: self.value.clone(),
            from_base: self.from_base.radix(),
            to_base: self.to_base.radix(),
        }
    }

    pub fn convert_all(&self) -> Operation {
        Operation::ConvertAll {
            value: self.value.clone(),
            from_base: self.from_base.radix(),
        }
    }

    pub fn swap_bases(&mut self) {
        std::mem::swap(&mut self.from_base, &mut self.to_base);
    }
}

#[derive(Debug, Clone)]
pub struct ArithmeticForm {
    pub a: String,
    pub b: String,
    pub op: ArithmeticOp,
    pub base: Base,
}

impl Default for ArithmeticForm {
    fn default() -> Self {
        Self {
            a: "1010".to_string(),
            b: "11".to_string(),
            op: ArithmeticOp::Add,
            base: Base::Binary,
        }
    }
}

impl ArithmeticForm {
    pub fn operation(&self) -> Operation {
        Operation::Arithmetic {
            a: self.a.clone(),
            b: self.b.clone(),
            op: self.op,
            base: self.base.radix(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAction {
    Union,
    Intersection,
    Difference,
    CardinalityA,
    CardinalityB,
}

impl SetAction {
    pub const ALL: [SetAction; 5] = [
        SetAction::Union,
        SetAction::Intersection,
        SetAction::Difference,
        SetAction::CardinalityA,
        SetAction::CardinalityB,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SetAction::Union => "Union (A ∪ B)",
            SetAction::Intersection => "Intersection (A ∩ B)",
            SetAction::Difference => "Difference (A - B)",
            SetAction::CardinalityA => "Cardinality |A|",
            SetAction::CardinalityB => "Cardinality |B|",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetForm {
    pub set_a: String,
    pub set_b: String,
}

impl Default for SetForm {
    fn default() -> Self {
        Self {
            set_a: "1, 2, 3".to_string(),
            set_b: "2, 3, 4".to_string(),
        }
    }
}

impl SetForm {
    pub fn operation(&self, action: SetAction) -> Result<Operation, EngineError> {
        let a = || input::parse_set(&self.set_a).map(|s| s.into_vec());
        let b = || input::parse_set(&self.set_b).map(|s| s.into_vec());
        Ok(match action {
            SetAction::Union => Operation::Union { a: a()?, b: b()? },
            SetAction::Intersection => Operation::Intersection { a: a()?, b: b()? },
            SetAction::Difference => Operation::Difference { a: a()?, b: b()? },
            SetAction::CardinalityA => Operation::Cardinality { set: a()? },
            SetAction::CardinalityB => Operation::Cardinality { set: b()? },
        })
    }
}

#[derive(Debug, Clone)]
pub struct SearchForm {
    pub values: String,
    pub target: String,
    pub presort: bool,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            values: "2, 5, 8, 12, 16, 23, 38, 45, 56".to_string(),
            target: "23".to_string(),
            presort: false,
        }
    }
}

impl SearchForm {
    pub fn operation(&self, algorithm: SearchAlgorithm) -> Result<Operation, EngineError> {
        let values = input::parse_sequence(&self.values)?;
        let target = input::parse_target(&self.target)?;
        Ok(match algorithm {
            SearchAlgorithm::Linear => Operation::LinearSearch { values, target },
            SearchAlgorithm::Binary => Operation::BinarySearch {
                values,
                target,
                presort: self.presort,
            },
        })
    }

    /// The list the trace indices refer to.
    pub fn displayed_values(&self) -> Result<Vec<i64>, EngineError> {
        let mut values = input::parse_sequence(&self.values)?;
        if self.presort {
            values.sort_unstable();
        }
        Ok(values)
    }
}

#[derive(Debug, Clone)]
pub struct SortForm {
    pub values: String,
}

impl Default for SortForm {
    fn default() -> Self {
        Self {
            values: "64, 34, 25, 12, 22, 11, 90".to_string(),
        }
    }
}

impl SortForm {
    pub fn operation(&self, algorithm: SortAlgorithm) -> Result<Operation, EngineError> {
        Ok(Operation::Sort {
            algorithm,
            values: input::parse_sequence(&self.values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, ErrorCode, LabEngine, OpOutput};

    #[test]
    fn test_default_forms_run_cleanly() {
        let mut engine = LabEngine::new();
        let sets = SetForm::default();
        for action in SetAction::ALL {
            engine.apply(sets.operation(action).unwrap()).unwrap();
        }
        let search = SearchForm::default();
        for algorithm in [SearchAlgorithm::Linear, SearchAlgorithm::Binary] {
            let res = engine.apply(search.operation(algorithm).unwrap()).unwrap();
            match res.output {
                OpOutput::Search { result } => assert_eq!(result.index, Some(5)),
                other => panic!("unexpected output: {other:?}"),
            }
        }
        let sort = SortForm::default();
        for algorithm in SortAlgorithm::all() {
            engine.apply(sort.operation(algorithm).unwrap()).unwrap();
        }
        engine.apply(ArithmeticForm::default().operation()).unwrap();
    }

    #[test]
    fn test_converter_form_uses_radix_values() {
        let mut form = ConverterForm {
            value: "255".to_string(),
            ..ConverterForm::default()
        };
        assert_eq!(
            form.convert(),
            Operation::Convert {
                value: "255".to_string(),
                from_base: 10,
                to_base: 2,
            }
        );
        form.swap_bases();
        assert_eq!(form.from_base, Base::Binary);
        assert_eq!(form.to_base, Base::Decimal);
    }

    #[test]
    fn test_bad_fields_become_invalid_input() {
        let form = SortForm {
            values: "3, x, 1".to_string(),
        };
        let err = form.operation(SortAlgorithm::Bubble).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let search = SearchForm {
            target: String::new(),
            ..SearchForm::default()
        };
        assert!(search.operation(SearchAlgorithm::Linear).is_err());
    }

    #[test]
    fn test_presorted_display_matches_engine_indices() {
        let form = SearchForm {
            values: "9, 1, 5".to_string(),
            target: "5".to_string(),
            presort: true,
        };
        assert_eq!(form.displayed_values().unwrap(), vec![1, 5, 9]);
    }
}
