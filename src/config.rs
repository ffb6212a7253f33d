//! Configuration for adaptive-filter construction.

use crate::error::FilterError;

/// Configuration shared by every engine.
///
/// One instance carries every algorithm constant; each engine reads the
/// subset it needs and ignores the rest, so a single config can be handed to
/// [`build()`](crate::build) for any [`Algorithm`](crate::Algorithm).
/// Constants are fixed for the lifetime of the constructed filter.
///
/// # Example
///
/// ```
/// use adaptfilt::FilterConfig;
///
/// let config = FilterConfig::new(64)
///     .with_step_size(0.5)
///     .with_projection_order(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    taps: usize,
    projection_order: usize,
    step_size: f64,
    forgetting: f64,
    regularization: f64,
    penalty_gain: f64,
    penalty_sharpness: f64,
    error_floor: f64,
}

impl FilterConfig {
    /// Creates a configuration for a filter of length `taps`.
    ///
    /// Defaults: `projection_order = 1`, `step_size = 0.9`,
    /// `forgetting = 0.9`, `regularization = sqrt(f64::EPSILON)`,
    /// `penalty_gain = 2.5e-3`, `penalty_sharpness = 5.0`,
    /// `error_floor = 1e-3`.
    pub fn new(taps: usize) -> Self {
        Self {
            taps,
            projection_order: 1,
            step_size: 0.9,
            forgetting: 0.9,
            regularization: f64::EPSILON.sqrt(),
            penalty_gain: 2.5e-3,
            penalty_sharpness: 5.0,
            error_floor: 1e-3,
        }
    }

    /// Sets the projection order `M` (number of stacked input vectors used
    /// by the affine-projection engines). Must not exceed `taps`.
    pub fn with_projection_order(mut self, m: usize) -> Self {
        self.projection_order = m;
        self
    }

    /// Sets the step size `mu`.
    pub fn with_step_size(mut self, mu: f64) -> Self {
        self.step_size = mu;
        self
    }

    /// Sets the RLS forgetting factor `lambda`, in `(0, 1]`.
    pub fn with_forgetting(mut self, lambda: f64) -> Self {
        self.forgetting = lambda;
        self
    }

    /// Sets the regularization constant `delta`.
    pub fn with_regularization(mut self, delta: f64) -> Self {
        self.regularization = delta;
        self
    }

    /// Sets the sparsity penalty gain `alpha` (QSSM-AP only).
    pub fn with_penalty_gain(mut self, alpha: f64) -> Self {
        self.penalty_gain = alpha;
        self
    }

    /// Sets the sparsity penalty sharpness `beta` (QSSM-AP only).
    pub fn with_penalty_sharpness(mut self, beta: f64) -> Self {
        self.penalty_sharpness = beta;
        self
    }

    /// Sets the residual floor `gamma_bar` used by the sign-coherence gate
    /// (QSSM-AP only).
    pub fn with_error_floor(mut self, gamma_bar: f64) -> Self {
        self.error_floor = gamma_bar;
        self
    }

    // --- Accessors ---

    /// Returns the filter length `N`.
    pub fn taps(&self) -> usize {
        self.taps
    }

    /// Returns the projection order `M`.
    pub fn projection_order(&self) -> usize {
        self.projection_order
    }

    /// Returns the step size `mu`.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the forgetting factor `lambda`.
    pub fn forgetting(&self) -> f64 {
        self.forgetting
    }

    /// Returns the regularization constant `delta`.
    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Returns the sparsity penalty gain `alpha`.
    pub fn penalty_gain(&self) -> f64 {
        self.penalty_gain
    }

    /// Returns the sparsity penalty sharpness `beta`.
    pub fn penalty_sharpness(&self) -> f64 {
        self.penalty_sharpness
    }

    /// Returns the residual floor `gamma_bar`.
    pub fn error_floor(&self) -> f64 {
        self.error_floor
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::ZeroTaps`] | `taps == 0` |
    /// | [`FilterError::ZeroProjectionOrder`] | `projection_order == 0` |
    /// | [`FilterError::ProjectionOrderTooLarge`] | `projection_order > taps` |
    /// | [`FilterError::NonPositiveParameter`] | `step_size`, `regularization`, or `penalty_sharpness` non-finite or `<= 0` |
    /// | [`FilterError::NegativeParameter`] | `penalty_gain` or `error_floor` non-finite or `< 0` |
    /// | [`FilterError::InvalidForgetting`] | `forgetting` outside `(0, 1]` |
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.taps == 0 {
            return Err(FilterError::ZeroTaps);
        }
        if self.projection_order == 0 {
            return Err(FilterError::ZeroProjectionOrder);
        }
        if self.projection_order > self.taps {
            return Err(FilterError::ProjectionOrderTooLarge {
                m: self.projection_order,
                n: self.taps,
            });
        }

        for (name, value) in [
            ("step_size", self.step_size),
            ("regularization", self.regularization),
            ("penalty_sharpness", self.penalty_sharpness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FilterError::NonPositiveParameter { name, value });
            }
        }

        for (name, value) in [
            ("penalty_gain", self.penalty_gain),
            ("error_floor", self.error_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FilterError::NegativeParameter { name, value });
            }
        }

        if !self.forgetting.is_finite() || self.forgetting <= 0.0 || self.forgetting > 1.0 {
            return Err(FilterError::InvalidForgetting {
                value: self.forgetting,
            });
        }

        Ok(())
    }
}
