//! Identity baseline engine.

use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};

/// A filter that never filters: the prediction is always zero, so the
/// returned error is the reference itself, and no update ever fires.
///
/// Useful for calibrating a host harness — any measurement taken through a
/// `BypassFilter` reflects the harness, not an algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct BypassFilter {
    steps: u64,
}

impl BypassFilter {
    /// Creates a bypass filter. Infallible: there is nothing to configure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdaptiveFilter for BypassFilter {
    fn step(&mut self, _sample: f64, reference: f64, _mode: UpdateMode) -> StepOutcome {
        self.steps += 1;
        StepOutcome {
            error: reference,
            updated: false,
        }
    }

    fn restart(&mut self) {
        self.steps = 0;
    }

    fn coefficients(&self) -> &[f64] {
        &[]
    }

    fn name(&self) -> &'static str {
        "bypass"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
