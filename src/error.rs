//! Configuration errors raised when a parameter set is validated.

use thiserror::Error;

/// A parameter set that would make the derivative computations degenerate
/// (division by zero, inverted limits, NaN propagation).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A divisor-like quantity (mass, inertia, radius, length) is zero or negative.
    #[error("parameter `{name}` must be positive, got {value}")]
    NonPositive {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A field is NaN or infinite.
    #[error("parameter `{name}` must be finite")]
    NonFinite {
        /// Field name.
        name: &'static str,
    },

    /// A `[min, max]` pair is not ordered.
    #[error("range `{name}` is inverted: min {min} >= max {max}")]
    InvertedRange {
        /// Range name.
        name: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A bounded quantity (fraction, sign-constrained limit) is outside its domain.
    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Allowed lower bound.
        min: f64,
        /// Allowed upper bound.
        max: f64,
    },
}

impl ParameterError {
    /// Fails unless `value` is finite.
    pub fn check_finite(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { name })
        }
    }

    /// Fails unless `value` is finite and strictly positive.
    pub fn check_positive(name: &'static str, value: f64) -> Result<(), Self> {
        Self::check_finite(name, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositive { name, value })
        }
    }

    /// Fails unless `min < max` and both are finite.
    pub fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), Self> {
        Self::check_finite(name, min)?;
        Self::check_finite(name, max)?;
        if min < max {
            Ok(())
        } else {
            Err(Self::InvertedRange { name, min, max })
        }
    }

    /// Fails unless `value` lies in `[min, max]`.
    pub fn check_within(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        Self::check_finite(name, value)?;
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange { name, value, min, max })
        }
    }
}
