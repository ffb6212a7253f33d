//! Recursive least-squares engine.

use ndarray::{Array2, ArrayView1};

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filter::{AdaptiveFilter, StepOutcome, UpdateMode};
use crate::history::DelayLine;

/// Recursive least squares with an explicit inverse-covariance surrogate.
///
/// The matrix `S` starts at `delta·I` and is downdated every step by a
/// Sherman–Morrison-style rank-1 correction, avoiding the O(N³) inversion a
/// direct least-squares solve would need — at the cost of O(N²) state and
/// per-step work. Intended for small N (tens, not hundreds).
///
/// `S` is kept symmetric by construction: the downdate derives only the
/// upper triangle and mirrors it, so asymmetric rounding cannot accumulate.
/// Positive definiteness is **not** monitored; after very long runs the
/// recursion can drift and degrade the output (see the crate docs). Callers
/// needing robustness should watch the coefficient norm and
/// [`restart`](AdaptiveFilter::restart) on divergence.
#[derive(Clone, Debug)]
pub struct RlsFilter {
    x: DelayLine,
    w: Vec<f64>,
    s: Array2<f64>,
    lambda: f64,
    lambda_inv: f64,
    delta: f64,
    steps: u64,
}

impl RlsFilter {
    /// Creates an RLS filter from `config` (reads `taps`, `forgetting`, and
    /// `regularization`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when `config` fails validation.
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let n = config.taps();
        let delta = config.regularization();
        Ok(Self {
            x: DelayLine::new(n),
            w: vec![0.0; n],
            s: Array2::eye(n) * delta,
            lambda: config.forgetting(),
            lambda_inv: 1.0 / config.forgetting(),
            delta,
            steps: 0,
        })
    }

    fn update(&mut self, error: f64) {
        let x = ArrayView1::from(self.x.as_slice());
        let n = self.w.len();

        // psi = S · x
        let psi = self.s.dot(&x);

        // phi = 1 / (lambda + psi' · x)
        let phi = 1.0 / (self.lambda + psi.dot(&x));

        // S = (1/lambda) · (S - psi·phi·psi'), derived for i <= j only and
        // mirrored so S stays exactly symmetric.
        for i in 0..n {
            self.s[[i, i]] = self.lambda_inv * (self.s[[i, i]] - psi[i] * phi * psi[i]);
            for j in (i + 1)..n {
                let v = self.lambda_inv * (self.s[[i, j]] - psi[i] * phi * psi[j]);
                self.s[[i, j]] = v;
                self.s[[j, i]] = v;
            }
        }

        // w += S · x · error, against the updated S.
        let psi = self.s.dot(&x);
        for (w, p) in self.w.iter_mut().zip(psi.iter()) {
            *w += p * error;
        }
    }

    #[cfg(test)]
    pub(crate) fn covariance_inverse(&self) -> &Array2<f64> {
        &self.s
    }
}

impl AdaptiveFilter for RlsFilter {
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome {
        self.x.push(sample);

        let prediction: f64 = self
            .w
            .iter()
            .zip(self.x.as_slice())
            .map(|(w, x)| w * x)
            .sum();
        let error = reference - prediction;

        let updated = mode != UpdateMode::Hold;
        if updated {
            self.update(error);
        }

        self.steps += 1;
        StepOutcome { error, updated }
    }

    fn restart(&mut self) {
        tracing::debug!(name = self.name(), "restart");
        self.x.reset();
        self.w.fill(0.0);
        self.s = Array2::eye(self.w.len()) * self.delta;
        self.steps = 0;
    }

    fn coefficients(&self) -> &[f64] {
        &self.w
    }

    fn name(&self) -> &'static str {
        "RLS"
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
