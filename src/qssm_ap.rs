//! Sparsity-promoting affine-projection engine.

use crate::ap::ApCore;
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};

/// Affine projection with a sign-coherence gate and a smooth sparsity
/// penalty.
///
/// Two additions over [`ApFilter`](crate::ApFilter):
///
/// - The residual entering the error window is soft-thresholded by the
///   floor `gamma_bar`, and the coefficient update runs only while the
///   thresholded residual keeps the raw residual's sign. Near-zero
///   residuals would otherwise inject noise into the coefficient vector.
///   [`UpdateMode::Force`] overrides the gate.
/// - Each update subtracts `alpha · 2·beta²·w / (beta²·w² + 1)²` per
///   coefficient — a differentiable surrogate for a count-of-nonzeros
///   penalty that pulls small coefficients toward exactly zero while
///   leaving established taps nearly untouched. `alpha` sets the strength,
///   `beta` the transition sharpness between "small" and "large".
#[derive(Clone, Debug)]
pub struct QssmApFilter {
    core: ApCore,
    mu: f64,
    alpha: f64,
    beta: f64,
    gamma_bar: f64,
    steps: u64,
}

impl QssmApFilter {
    /// Creates a QSSM-AP filter from `config` (reads `taps`,
    /// `projection_order`, `step_size`, `regularization`, `penalty_gain`,
    /// `penalty_sharpness`, and `error_floor`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when `config` fails validation.
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            core: ApCore::new(
                config.taps(),
                config.projection_order(),
                config.regularization(),
            ),
            mu: config.step_size(),
            alpha: config.penalty_gain(),
            beta: config.penalty_sharpness(),
            gamma_bar: config.error_floor(),
            steps: 0,
        })
    }
}

impl AdaptiveFilter for QssmApFilter {
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome {
        self.core.advance(sample);

        let residual = reference - self.core.predict();
        let thresholded = residual - self.gamma_bar.copysign(residual);
        self.core.push_err(thresholded);

        // Sign-coherence gate: a residual small enough that thresholding
        // flips its sign is treated as noise.
        let coherent = (residual > 0.0) == (thresholded > 0.0);
        let updated = match mode {
            UpdateMode::Hold => false,
            UpdateMode::Adapt => coherent,
            UpdateMode::Force => true,
        };

        if updated {
            let correction = self.core.correction();
            let (mu, alpha, beta) = (self.mu, self.alpha, self.beta);
            for (w, c) in self.core.coefficients_mut().iter_mut().zip(correction.iter()) {
                let penalty = alpha * (2.0 * beta * beta * *w) / (beta * beta * *w * *w + 1.0).powi(2);
                *w += mu * c - penalty;
            }
        }

        self.steps += 1;
        StepOutcome {
            error: residual,
            updated,
        }
    }

    fn restart(&mut self) {
        tracing::debug!(name = self.name(), "restart");
        self.core.reset();
        self.steps = 0;
    }

    fn coefficients(&self) -> &[f64] {
        self.core.coefficients()
    }

    fn name(&self) -> &'static str {
        "QSSM-AP"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
