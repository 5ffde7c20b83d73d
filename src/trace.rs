use discrete_protocol::{StepKind, TraceStep};
use std::time::Duration;

/// Collects trace steps in execution order and numbers them from zero.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: StepKind,
        indices: Vec<usize>,
        values: Vec<i64>,
        snapshot: Option<Vec<i64>>,
    ) {
        let step = self.steps.len();
        self.steps.push(TraceStep {
            step,
            kind,
            indices,
            values,
            window: None,
            snapshot,
        });
    }

    pub fn record_probe(&mut self, index: usize, value: i64, window: Option<[usize; 2]>) {
        self.record(StepKind::Probe, vec![index], vec![value], None);
        if let Some(last) = self.steps.last_mut() {
            last.window = window;
        }
    }

    pub fn compare(&mut self, values: &[i64], a: usize, b: usize) {
        self.record(StepKind::Compare, vec![a, b], vec![values[a], values[b]], None);
    }

    pub fn finish(self) -> Vec<TraceStep> {
        self.steps
    }
}

/// Timed replay over a finished trace.
///
/// The first step is visible immediately and one more step is revealed per
/// `interval`. A zero interval reveals everything at once. Restarting only
/// rewinds the clock; the trace itself is never recomputed.
#[derive(Debug, Clone)]
pub struct TraceReplay {
    steps: Vec<TraceStep>,
    interval: Duration,
    elapsed: Duration,
}

impl TraceReplay {
    pub fn new(steps: Vec<TraceStep>, interval: Duration) -> Self {
        Self {
            steps,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn skip_to_end(&mut self) {
        self.elapsed = Duration::MAX;
    }

    /// Moves the replay clock forward and returns the number of visible steps.
    pub fn advance(&mut self, delta: Duration) -> usize {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.visible_count()
    }

    pub fn visible_count(&self) -> usize {
        if self.steps.is_empty() {
            return 0;
        }
        if self.interval.is_zero() {
            return self.steps.len();
        }
        let revealed = self.elapsed.as_millis() / self.interval.as_millis().max(1);
        let revealed = usize::try_from(revealed).unwrap_or(usize::MAX);
        revealed.saturating_add(1).min(self.steps.len())
    }

    pub fn visible_steps(&self) -> &[TraceStep] {
        &self.steps[..self.visible_count()]
    }

    pub fn current(&self) -> Option<&TraceStep> {
        self.visible_steps().last()
    }

    pub fn finished(&self) -> bool {
        self.visible_count() == self.steps.len()
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }
}
