//! The lifecycle contract shared by every engine.

use crate::ap::ApFilter;
use crate::bypass::BypassFilter;
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::lms::LmsFilter;
use crate::nlms::NlmsFilter;
use crate::qssm_ap::QssmApFilter;
use crate::rls::RlsFilter;

/// Controls whether a [`step`](AdaptiveFilter::step) adapts the
/// coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateMode {
    /// Compute and return the prediction error only; never adapt the
    /// coefficients. Sliding-window state (input history, error window,
    /// and the Gram matrix that mirrors them) still advances.
    Hold,
    /// Update, subject to the engine's own gate (QSSM-AP may still refuse).
    Adapt,
    /// Update unconditionally, overriding any gate.
    Force,
}

/// Result of one [`step`](AdaptiveFilter::step).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// The prediction error `reference - prediction`, computed before any
    /// coefficient update.
    pub error: f64,
    /// Whether the coefficient update actually ran this step.
    pub updated: bool,
}

/// One streaming adaptive-filter estimator.
///
/// Every engine implements the same five-operation lifecycle: construction
/// (`EngineType::new` or [`build()`]), [`restart`](AdaptiveFilter::restart),
/// [`step`](AdaptiveFilter::step), inspection
/// ([`coefficients`](AdaptiveFilter::coefficients)), and destruction
/// (`Drop`). Hosts compose over this trait, never over concrete engine
/// types.
///
/// # Lifecycle
///
/// ```mermaid
/// graph LR
///     A["build(algorithm, &config)?"] --> B["Ready"]
///     B -->|".step(x, d, mode)"| B
///     B -->|".restart()"| B
///     B -->|"drop"| C["Destroyed"]
/// ```
///
/// `Ready` always accepts the next step; there is no other state.
///
/// A filter instance is exclusively owned, and every operation runs to
/// completion synchronously; there is no internal locking.
pub trait AdaptiveFilter: Send {
    /// Feeds one input/reference sample pair.
    ///
    /// Always pushes the sample into the history and computes the
    /// prediction error; adapts the coefficients according to `mode`.
    fn step(&mut self, sample: f64, reference: f64, mode: UpdateMode) -> StepOutcome;

    /// Zeroes all mutable state in place, preserving the configuration.
    ///
    /// A restarted filter is indistinguishable from a freshly constructed
    /// one.
    fn restart(&mut self);

    /// Read-only view of the current coefficient vector.
    fn coefficients(&self) -> &[f64];

    /// Short human-readable engine name.
    fn name(&self) -> &'static str;

    /// Number of steps taken since construction or the last restart.
    fn steps_taken(&self) -> u64;
}

/// Selects an engine for [`build()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Identity baseline: no prediction, no adaptation.
    Bypass,
    /// Least-mean-squares gradient descent.
    Lms,
    /// LMS with the step normalized by input energy.
    Nlms,
    /// Recursive least squares.
    Rls,
    /// Affine projection.
    Ap,
    /// Affine projection with a sign-coherence gate and sparsity penalty.
    QssmAp,
}

/// Constructs the selected engine behind the lifecycle trait.
///
/// # Errors
///
/// Returns [`FilterError`] when `config` fails validation; see
/// [`FilterConfig::validate()`].
pub fn build(
    algorithm: Algorithm,
    config: &FilterConfig,
) -> Result<Box<dyn AdaptiveFilter>, FilterError> {
    config.validate()?;
    tracing::debug!(?algorithm, taps = config.taps(), "building adaptive filter");
    Ok(match algorithm {
        Algorithm::Bypass => Box::new(BypassFilter::new()),
        Algorithm::Lms => Box::new(LmsFilter::new(config)?),
        Algorithm::Nlms => Box::new(NlmsFilter::new(config)?),
        Algorithm::Rls => Box::new(RlsFilter::new(config)?),
        Algorithm::Ap => Box::new(ApFilter::new(config)?),
        Algorithm::QssmAp => Box::new(QssmApFilter::new(config)?),
    })
}
