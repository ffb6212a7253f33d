//! Least-mean-squares engine.

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};
use crate::history::RingDelayLine;

/// The baseline gradient-descent engine: fixed step size, no normalization.
///
/// Stability requires `mu` small relative to `1 / (N · input power)`; that
/// is a property of the chosen configuration and is not checked at runtime.
/// [`NlmsFilter`](crate::NlmsFilter) removes the hand-tuning by normalizing
/// the step against input energy.
#[derive(Clone, Debug)]
pub struct LmsFilter {
    x: RingDelayLine,
    w: Vec<f64>,
    mu: f64,
    steps: u64,
}

impl LmsFilter {
    /// Creates an LMS filter from `config` (reads `taps` and `step_size`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when `config` fails validation.
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            x: RingDelayLine::new(config.taps()),
            w: vec![0.0; config.taps()],
            mu: config.step_size(),
            steps: 0,
        })
    }
}

impl AdaptiveFilter for LmsFilter {
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome {
        self.x.push(sample);

        let prediction: f64 = self.w.iter().zip(self.x.iter()).map(|(w, x)| w * x).sum();
        let error = reference - prediction;

        let updated = mode != UpdateMode::Hold;
        if updated {
            let scale = 2.0 * self.mu * error;
            for (w, x) in self.w.iter_mut().zip(self.x.iter()) {
                *w += scale * x;
            }
        }

        self.steps += 1;
        StepOutcome { error, updated }
    }

    fn restart(&mut self) {
        tracing::debug!(name = self.name(), "restart");
        self.x.reset();
        self.w.fill(0.0);
        self.steps = 0;
    }

    fn coefficients(&self) -> &[f64] {
        &self.w
    }

    fn name(&self) -> &'static str {
        "LMS"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
