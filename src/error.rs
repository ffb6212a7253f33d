//! Error types for the adaptfilt crate.

/// Error type for all fallible operations in the adaptfilt crate.
///
/// Every variant describes a configuration rejected at construction time;
/// once an engine exists, stepping it is infallible (see the crate docs on
/// numerical conditioning for the one caveat).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FilterError {
    /// Returned when the configured filter length is zero.
    #[error("filter must have at least one tap")]
    ZeroTaps,

    /// Returned when the projection order is zero.
    #[error("projection order must be at least one")]
    ZeroProjectionOrder,

    /// Returned when the projection order exceeds the filter length.
    #[error("projection order {m} exceeds filter length {n}")]
    ProjectionOrderTooLarge {
        /// Configured projection order.
        m: usize,
        /// Configured filter length.
        n: usize,
    },

    /// Returned when a parameter that must be strictly positive is not.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositiveParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a parameter that must be non-negative is not.
    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when the forgetting factor lies outside `(0, 1]`.
    #[error("forgetting factor must be in (0, 1], got {value}")]
    InvalidForgetting {
        /// The rejected value.
        value: f64,
    },
}
