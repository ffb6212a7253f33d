//! Affine-projection engine.

use ndarray::{Array1, Array2, ArrayView1};

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};
use crate::history::{DelayLine, HistoryMatrix};
use crate::linalg::cholesky_solve;

/// Window, Gram matrix, and correction machinery shared by the plain and
/// sparsity-promoting affine-projection engines.
///
/// Maintains the invariant `XtX == delta·I + Xᵀ·X` recursively: each push
/// removes the evicted row's outer product and adds the fresh row's, instead
/// of recomputing the full product. The recursion is a telescoping sum, so
/// its rounding drift grows with the window length; the regularizer is
/// scaled with N at construction to stay ahead of it.
#[derive(Clone, Debug)]
pub(crate) struct ApCore {
    x: HistoryMatrix,
    xtx: Array2<f64>,
    err: DelayLine,
    w: Vec<f64>,
    delta: f64,
}

impl ApCore {
    pub(crate) fn new(n: usize, m: usize, delta_base: f64) -> Self {
        let delta = 10.0 * n as f64 * delta_base;
        Self {
            x: HistoryMatrix::new(n, m),
            xtx: Array2::eye(m) * delta,
            err: DelayLine::new(m),
            w: vec![0.0; n],
            delta,
        }
    }

    /// Pushes `sample` into the window and applies the two-term rank-1
    /// correction to the Gram matrix.
    pub(crate) fn advance(&mut self, sample: f64) {
        // The row about to be evicted leaves the Gram matrix.
        let outgoing = self.x.last_row().to_owned();
        self.x.push(sample);
        let incoming = self.x.first_row();

        // XtX += first_row⊗first_row - last_row⊗last_row, derived for
        // i <= j only and mirrored so XtX stays exactly symmetric.
        let m = self.xtx.nrows();
        for i in 0..m {
            for j in i..m {
                let v = self.xtx[[i, j]] - outgoing[i] * outgoing[j] + incoming[i] * incoming[j];
                self.xtx[[i, j]] = v;
                if i != j {
                    self.xtx[[j, i]] = v;
                }
            }
        }
    }

    /// Filter output against the current input vector.
    pub(crate) fn predict(&self) -> f64 {
        self.x
            .first_column()
            .iter()
            .zip(&self.w)
            .map(|(x, w)| x * w)
            .sum()
    }

    /// Pushes a residual into the error window.
    pub(crate) fn push_err(&mut self, error: f64) {
        self.err.push(error);
    }

    /// Solves `XtX · z = err` by Cholesky and lifts the M-dimensional
    /// solution back to tap space: returns `X · z`.
    pub(crate) fn correction(&self) -> Array1<f64> {
        let z = cholesky_solve(&self.xtx, ArrayView1::from(self.err.as_slice()));
        self.x.matrix().dot(&z)
    }

    pub(crate) fn coefficients(&self) -> &[f64] {
        &self.w
    }

    pub(crate) fn coefficients_mut(&mut self) -> &mut [f64] {
        &mut self.w
    }

    pub(crate) fn reset(&mut self) {
        self.x.reset();
        self.err.reset();
        self.w.fill(0.0);
        self.xtx = Array2::eye(self.err.as_slice().len()) * self.delta;
    }

    #[cfg(test)]
    pub(crate) fn gram(&self) -> &Array2<f64> {
        &self.xtx
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> &Array2<f64> {
        self.x.matrix()
    }

    #[cfg(test)]
    pub(crate) fn regularizer(&self) -> f64 {
        self.delta
    }
}

/// Affine-projection engine: generalizes NLMS from one input vector to the
/// M most recent ones, correcting the coefficients against all M residuals
/// at once through the regularized Gram system.
///
/// Positive definiteness of the Gram matrix is preserved by construction in
/// exact arithmetic but not monitored at runtime; see the crate docs on
/// numerical conditioning.
#[derive(Clone, Debug)]
pub struct ApFilter {
    core: ApCore,
    mu: f64,
    steps: u64,
}

impl ApFilter {
    /// Creates an AP filter from `config` (reads `taps`,
    /// `projection_order`, `step_size`, and `regularization`).
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
            steps: 0,
        })
    }

    #[cfg(test)]
    pub(crate) fn core(&self) -> &ApCore {
        &self.core
    }
}

impl AdaptiveFilter for ApFilter {
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome {
        self.core.advance(sample);

        let error = reference - self.core.predict();
        self.core.push_err(error);

        let updated = mode != UpdateMode::Hold;
        if updated {
            let correction = self.core.correction();
            for (w, c) in self.core.coefficients_mut().iter_mut().zip(correction.iter()) {
                *w += self.mu * c;
            }
        }

        self.steps += 1;
        StepOutcome { error, updated }
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
        "AP"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
