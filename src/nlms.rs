//! Normalized least-mean-squares engine.

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};
use crate::history::DelayLine;

/// LMS with the step size normalized by the energy of the input window:
///
/// ```text
/// w += mu · error · x / (delta + ‖x‖²)
/// ```
///
/// `delta` keeps the division defined when the input is silent. Because the
/// effective step scales with input power, `mu` needs no hand-tuning against
/// the signal level; this is the numerically safer baseline.
#[derive(Clone, Debug)]
pub struct NlmsFilter {
    x: DelayLine,
    w: Vec<f64>,
    mu: f64,
    delta: f64,
    steps: u64,
}

impl NlmsFilter {
    /// Creates an NLMS filter from `config` (reads `taps`, `step_size`, and
    /// `regularization`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when `config` fails validation.
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            x: DelayLine::new(config.taps()),
            w: vec![0.0; config.taps()],
            mu: config.step_size(),
            delta: config.regularization(),
            steps: 0,
        })
    }
}

impl AdaptiveFilter for NlmsFilter {
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome {
        self.x.push(sample);

        let x = self.x.as_slice();
        let prediction: f64 = self.w.iter().zip(x).map(|(w, x)| w * x).sum();
        let error = reference - prediction;

        let updated = mode != UpdateMode::Hold;
        if updated {
            let scale = self.mu * error / (self.delta + self.x.energy());
            for (w, x) in self.w.iter_mut().zip(self.x.as_slice()) {
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
        "NLMS"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn filter(taps: usize, mu: f64, delta: f64) -> NlmsFilter {
        NlmsFilter::new(
            &FilterConfig::new(taps)
                .with_step_size(mu)
                .with_regularization(delta),
        )
        .unwrap()
    }

    #[test]
    fn hand_computed_step() {
        // n=2, mu=0.5, delta=1e-6; first sample 1 against reference 1:
        // w[0] = 0.5 · 1 · 1 / (1e-6 + 1).
        let mut f = filter(2, 0.5, 1e-6);
        let out = f.step(1.0, 1.0, UpdateMode::Adapt);
        assert_abs_diff_eq!(out.error, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.coefficients()[0], 0.5 / (1.0 + 1e-6), epsilon = 1e-12);
        assert_abs_diff_eq!(f.coefficients()[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn silence_is_safe() {
        // Zero input energy must not divide by zero.
        let mut f = filter(4, 0.5, 1e-9);
        for _ in 0..50 {
            let out = f.step(0.0, 0.0, UpdateMode::Adapt);
            assert_eq!(out.error, 0.0);
        }
        assert!(f.coefficients().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn nonzero_reference_on_silent_input_stays_finite() {
        let mut f = filter(4, 0.5, 1e-9);
        let out = f.step(0.0, 1.0, UpdateMode::Adapt);
        assert_eq!(out.error, 1.0);
        assert!(f.coefficients().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn hold_never_updates() {
        let mut f = filter(3, 0.5, 1e-9);
        f.step(1.0, 2.0, UpdateMode::Adapt);
        let snapshot = f.coefficients().to_vec();
        for k in 0..20 {
            let out = f.step((k as f64).sin(), 1.0, UpdateMode::Hold);
            assert!(!out.updated);
        }
        assert_eq!(f.coefficients(), snapshot.as_slice());
    }

    #[test]
    fn restart_matches_fresh_instance() {
        let mut f = filter(3, 0.5, 1e-9);
        for k in 0..5 {
            f.step(k as f64, 1.0, UpdateMode::Adapt);
        }
        f.restart();

        let mut fresh = filter(3, 0.5, 1e-9);
        let a = f.step(0.0, 0.0, UpdateMode::Adapt);
        let b = fresh.step(0.0, 0.0, UpdateMode::Adapt);
        assert_eq!(a, b);
        assert_eq!(f.coefficients(), fresh.coefficients());
    }
}
