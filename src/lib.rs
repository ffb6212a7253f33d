//! # adaptfilt
//!
//! Streaming adaptive-filter estimators. Each engine consumes one scalar
//! input sample and one scalar reference sample per step, maintains a
//! coefficient vector that is incrementally adjusted to minimize prediction
//! error, and reports that error.
//!
//! ## Engines
//!
//! | Engine | Update rule | Auxiliary state |
//! |--------|-------------|-----------------|
//! | [`LmsFilter`] | fixed-step gradient descent | none |
//! | [`NlmsFilter`] | step normalized by input energy | none |
//! | [`RlsFilter`] | recursive least squares | N×N inverse-covariance matrix |
//! | [`ApFilter`] | affine projection over the last M input vectors | M×M Gram matrix, M error samples |
//! | [`QssmApFilter`] | AP + sign-coherence gate + sparsity penalty | as AP |
//! | [`BypassFilter`] | none (identity baseline) | none |
//!
//! All engines implement [`AdaptiveFilter`]; hosts select one via
//! [`Algorithm`] and [`build()`] and drive it through the trait.
//!
//! ## Example
//!
//! ```
//! use adaptfilt::{build, AdaptiveFilter, Algorithm, FilterConfig, UpdateMode};
//!
//! let config = FilterConfig::new(32).with_step_size(0.5);
//! let mut filter = build(Algorithm::Nlms, &config)?;
//!
//! // Identify an unknown system: feed its input and its observed output.
//! for (x, d) in [(0.3, 0.0), (-1.2, 0.15), (0.7, -0.6)] {
//!     let out = filter.step(x, d, UpdateMode::Adapt);
//!     let _residual = out.error;
//! }
//! # Ok::<(), adaptfilt::FilterError>(())
//! ```
//!
//! ## Numerical conditioning
//!
//! RLS and the affine-projection engines maintain their auxiliary matrix by
//! pure recursion — it is never re-derived from scratch. Symmetry is exact
//! by construction (only one triangle is computed, then mirrored), and
//! positive definiteness holds in exact arithmetic thanks to the
//! regularizer injected at reset, but accumulated rounding over very long
//! runs can still violate it. The engines do not detect or repair this:
//! once the matrix degenerates, NaN propagates to the coefficients and the
//! reported error. Callers needing robustness should monitor the
//! coefficient norm (via [`AdaptiveFilter::coefficients()`]) and call
//! [`AdaptiveFilter::restart()`] on divergence.
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Config accessor | Meaning |
//! |--------|-----------------|---------|
//! | N | [`FilterConfig::taps()`] | filter length: number of coefficients |
//! | M | [`FilterConfig::projection_order()`] | stacked input vectors in the AP engines |
//! | mu | [`FilterConfig::step_size()`] | how aggressively coefficients move per update |
//! | lambda | [`FilterConfig::forgetting()`] | exponential discount on older samples (RLS) |
//! | delta | [`FilterConfig::regularization()`] | additive guard against singular matrices and division by zero |
//! | alpha | [`FilterConfig::penalty_gain()`] | sparsity penalty strength (QSSM-AP) |
//! | beta | [`FilterConfig::penalty_sharpness()`] | sparsity penalty transition sharpness (QSSM-AP) |
//! | gamma_bar | [`FilterConfig::error_floor()`] | residual floor for the sign-coherence gate (QSSM-AP) |

mod ap;
mod bypass;
mod config;
mod error;
mod filter;
mod history;
mod linalg;
mod lms;
mod nlms;
mod qssm_ap;
mod rls;

pub use ap::ApFilter;
pub use bypass::BypassFilter;
pub use config::FilterConfig;
pub use error::FilterError;
pub use filter::{build, AdaptiveFilter, Algorithm, StepOutcome, UpdateMode};
pub use lms::LmsFilter;
pub use nlms::NlmsFilter;
pub use qssm_ap::QssmApFilter;
pub use rls::RlsFilter;
