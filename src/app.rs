use std::time::Duration;

use crate::{
    engine::{
        Engine, EngineError, LabEngine, LabState, MAX_REPLAY_INTERVAL_MS, OpOutput, OpResult,
        Operation,
    },
    forms::{ArithmeticForm, ConverterForm, SearchForm, SetAction, SetForm, SortForm, Tab},
    number_base::{ArithmeticOp, Base},
    report,
    trace::TraceReplay,
};
use discrete_protocol::{SearchAlgorithm, SortAlgorithm, StepKind, TraceStep};
use eframe::egui::{self, Color32, RichText, Ui};
use tracing::{info, warn};

const COMPARE_COLOR: Color32 = Color32::from_rgb(250, 210, 90);
const SWAP_COLOR: Color32 = Color32::from_rgb(240, 120, 110);
const PROBE_COLOR: Color32 = Color32::from_rgb(120, 180, 250);
const WINDOW_COLOR: Color32 = Color32::from_rgb(215, 230, 250);

enum Narration {
    Search {
        algorithm: SearchAlgorithm,
        target: i64,
    },
    Sort,
}

/// The animated part of the output panel.
struct ReplayView {
    values: Vec<i64>,
    narration: Narration,
    replay: TraceReplay,
}

impl ReplayView {
    fn step_line(&self, step: &TraceStep) -> String {
        match self.narration {
            Narration::Search { algorithm, target } => {
                report::describe_search_step(step, algorithm, target)
            }
            Narration::Sort => format!("Step {}: {}", step.step + 1, report::describe_sort_step(step)),
        }
    }

    /// Array as it looked after the latest visible step.
    fn current_values(&self) -> &[i64] {
        self.replay
            .visible_steps()
            .iter()
            .rev()
            .find_map(|s| s.snapshot.as_deref())
            .unwrap_or(&self.values)
    }
}

pub struct DiscreteLabApp {
    engine: LabEngine,
    settings_path: Option<String>,
    tab: Tab,
    converter: ConverterForm,
    arithmetic: ArithmeticForm,
    sets: SetForm,
    search: SearchForm,
    sort: SortForm,
    output: Vec<String>,
    warnings: Vec<String>,
    error: Option<String>,
    replay: Option<ReplayView>,
}

impl DiscreteLabApp {
    pub fn new_with_settings(path: Option<&str>) -> Self {
        let state = match path {
            Some(path) if std::path::Path::new(path).exists() => {
                LabState::load_from_path(path).unwrap_or_else(|e| {
                    warn!(path, error = %e, "falling back to default settings");
                    LabState::default()
                })
            }
            _ => LabState::default(),
        };
        Self {
            engine: LabEngine::from_state(state),
            settings_path: path.map(str::to_string),
            tab: Tab::default(),
            converter: ConverterForm::default(),
            arithmetic: ArithmeticForm::default(),
            sets: SetForm::default(),
            search: SearchForm::default(),
            sort: SortForm::default(),
            output: Vec::new(),
            warnings: Vec::new(),
            error: None,
            replay: None,
        }
    }

    fn replay_interval(&self) -> Duration {
        self.engine.settings().replay_interval()
    }

    fn run(&mut self, op: Result<Operation, EngineError>) -> Option<OpResult> {
        self.error = None;
        self.warnings.clear();
        self.replay = None;
        let result = op.and_then(|op| self.engine.apply(op));
        match result {
            Ok(result) => {
                self.output = result.messages.clone();
                self.warnings = result.warnings.clone();
                Some(result)
            }
            Err(e) => {
                self.output.clear();
                self.error = Some(e.message);
                None
            }
        }
    }

    fn start_replay(&mut self, values: Vec<i64>, narration: Narration, steps: Vec<TraceStep>) {
        self.replay = Some(ReplayView {
            values,
            narration,
            replay: TraceReplay::new(steps, self.replay_interval()),
        });
    }

    fn run_search(&mut self, algorithm: SearchAlgorithm) {
        let values = self.search.displayed_values().unwrap_or_default();
        if let Some(OpResult {
            output: OpOutput::Search { result },
            ..
        }) = self.run(self.search.operation(algorithm))
        {
            let narration = Narration::Search {
                algorithm,
                target: result.target,
            };
            self.start_replay(values, narration, result.trace);
        }
    }

    fn run_sort(&mut self, algorithm: SortAlgorithm) {
        if let Some(OpResult {
            output: OpOutput::Sort { result },
            ..
        }) = self.run(self.sort.operation(algorithm))
        {
            self.start_replay(result.input, Narration::Sort, result.trace);
        }
    }

    fn save_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            return;
        };
        match self.engine.state().save_to_path(&path) {
            Ok(()) => info!(path, "settings saved"),
            Err(e) => self.error = Some(e.message),
        }
    }

    fn base_picker(ui: &mut Ui, label: &str, base: &mut Base) {
        egui::ComboBox::from_label(label)
            .selected_text(base.to_string())
            .show_ui(ui, |ui| {
                for candidate in Base::ALL {
                    ui.selectable_value(base, candidate, candidate.to_string());
                }
            });
    }

    fn render_number_systems(&mut self, ui: &mut Ui) {
        ui.heading("Base conversion");
        ui.horizontal(|ui| {
            ui.label("Number:");
            ui.text_edit_singleline(&mut self.converter.value);
        });
        Self::base_picker(ui, "From base", &mut self.converter.from_base);
        Self::base_picker(ui, "To base", &mut self.converter.to_base);
        ui.horizontal(|ui| {
            if ui.button("Convert").clicked() {
                self.run(Ok(self.converter.convert()));
            }
            if ui.button("Show all bases").clicked() {
                self.run(Ok(self.converter.convert_all()));
            }
            if ui.button("⇄ Swap").clicked() {
                self.converter.swap_bases();
            }
        });

        ui.separator();
        ui.heading("Arithmetic");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.arithmetic.a);
            egui::ComboBox::from_id_salt("arith_op")
                .selected_text(self.arithmetic.op.symbol().to_string())
                .show_ui(ui, |ui| {
                    for op in [ArithmeticOp::Add, ArithmeticOp::Sub] {
                        ui.selectable_value(&mut self.arithmetic.op, op, op.symbol().to_string());
                    }
                });
            ui.text_edit_singleline(&mut self.arithmetic.b);
        });
        Self::base_picker(ui, "Base", &mut self.arithmetic.base);
        if ui.button("Calculate").clicked() {
            self.run(Ok(self.arithmetic.operation()));
        }
    }

    fn render_sets(&mut self, ui: &mut Ui) {
        ui.heading("Finite sets");
        ui.horizontal(|ui| {
            ui.label("Set A:");
            ui.text_edit_singleline(&mut self.sets.set_a);
        });
        ui.horizontal(|ui| {
            ui.label("Set B:");
            ui.text_edit_singleline(&mut self.sets.set_b);
        });
        ui.horizontal_wrapped(|ui| {
            for action in SetAction::ALL {
                if ui.button(action.label()).clicked() {
                    self.run(self.sets.operation(action));
                }
            }
        });
    }

    fn render_searching(&mut self, ui: &mut Ui) {
        ui.heading("Searching");
        ui.horizontal(|ui| {
            ui.label("Array:");
            ui.text_edit_singleline(&mut self.search.values);
        });
        ui.horizontal(|ui| {
            ui.label("Target:");
            ui.text_edit_singleline(&mut self.search.target);
        });
        ui.checkbox(&mut self.search.presort, "Sort before binary search");
        ui.horizontal(|ui| {
            if ui.button("Linear Search").clicked() {
                self.run_search(SearchAlgorithm::Linear);
            }
            if ui.button("Binary Search").clicked() {
                self.run_search(SearchAlgorithm::Binary);
            }
        });
    }

    fn render_sorting(&mut self, ui: &mut Ui) {
        ui.heading("Sorting");
        ui.horizontal(|ui| {
            ui.label("Array:");
            ui.text_edit_singleline(&mut self.sort.values);
        });
        ui.horizontal(|ui| {
            for algorithm in SortAlgorithm::all() {
                if ui.button(algorithm.name()).clicked() {
                    self.run_sort(algorithm);
                }
            }
        });
        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Replay interval (ms):");
            let mut interval = self.engine.settings().replay_interval_ms;
            if ui
                .add(egui::DragValue::new(&mut interval).range(0..=MAX_REPLAY_INTERVAL_MS))
                .changed()
            {
                let op = Operation::SetParameter {
                    name: "replay_interval_ms".to_string(),
                    value: serde_json::json!(interval),
                };
                if self.engine.apply(op).is_ok() {
                    self.save_settings();
                }
            }
        });
    }

    fn render_array(ui: &mut Ui, view: &ReplayView) {
        let values = view.current_values();
        let current = view.replay.current();
        let window = current.and_then(|s| s.window);
        ui.horizontal_wrapped(|ui| {
            for (i, value) in values.iter().enumerate() {
                let mut text = RichText::new(format!(" {value} ")).monospace();
                if let Some(step) = current.filter(|s| s.indices.contains(&i)) {
                    let color = match step.kind {
                        StepKind::Compare => COMPARE_COLOR,
                        StepKind::Swap | StepKind::Move => SWAP_COLOR,
                        StepKind::Probe => PROBE_COLOR,
                    };
                    text = text.background_color(color).color(Color32::BLACK);
                } else if window.is_some_and(|[lo, hi]| lo <= i && i <= hi) {
                    text = text.background_color(WINDOW_COLOR).color(Color32::BLACK);
                }
                ui.label(text);
            }
        });
    }

    fn render_output(&mut self, ui: &mut Ui) {
        if let Some(error) = &self.error {
            ui.colored_label(Color32::RED, format!("Error: {error}"));
        }
        for warning in &self.warnings {
            ui.colored_label(Color32::from_rgb(200, 140, 0), warning);
        }

        let replaying = self.replay.as_ref().is_some_and(|v| !v.replay.finished());
        if let Some(view) = &mut self.replay {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Step {} of {}",
                    view.replay.visible_count(),
                    view.replay.total()
                ));
                if ui.button("Replay").clicked() {
                    view.replay.reset();
                }
                if ui.button("Skip").clicked() {
                    view.replay.skip_to_end();
                }
            });
            Self::render_array(ui, view);
            ui.separator();
        }

        egui::ScrollArea::vertical().show(ui, |ui| match &self.replay {
            Some(view) if replaying => {
                for step in view.replay.visible_steps() {
                    ui.monospace(view.step_line(step));
                }
            }
            _ => {
                for line in &self.output {
                    ui.monospace(line);
                }
            }
        });
    }
}

impl eframe::App for DiscreteLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(view) = &mut self.replay {
            if !view.replay.finished() {
                let dt = ctx.input(|i| i.stable_dt);
                view.replay.advance(Duration::from_secs_f32(dt.max(0.0)));
                ctx.request_repaint_after(Duration::from_millis(16));
            }
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.title());
                }
            });
        });

        egui::TopBottomPanel::bottom("output")
            .resizable(true)
            .min_height(200.0)
            .show(ctx, |ui| self.render_output(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::NumberSystems => self.render_number_systems(ui),
            Tab::Sets => self.render_sets(ui),
            Tab::Searching => self.render_searching(ui),
            Tab::Sorting => self.render_sorting(ui),
        });
    }
}
