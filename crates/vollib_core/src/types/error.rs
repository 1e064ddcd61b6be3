//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Rejected option inputs and distribution arguments
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised input errors raised before any pricing formula runs.
///
/// Every operation in the workspace validates its arguments at the boundary
/// and reports the first offending value through one of these variants.
///
/// # Variants
/// - `InvalidStrike`: Strike not strictly positive
/// - `InvalidUnderlying`: Spot or forward not strictly positive
/// - `InvalidVolatility`: Negative volatility
/// - `InvalidExpiry`: Negative time to expiry
/// - `NonFiniteInput`: NaN or infinite argument
/// - `InvalidCorrelation`: Correlation outside `[-1, 1]`
/// - `InvalidFlag`: Unrecognised option flag string
///
/// # Examples
/// ```
/// use vollib_core::types::PricingError;
///
/// let err = PricingError::InvalidStrike { strike: -5.0 };
/// assert_eq!(format!("{}", err), "Invalid strike: -5 (must be positive)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Strike must be strictly positive.
    #[error("Invalid strike: {strike} (must be positive)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Spot or forward must be strictly positive.
    #[error("Invalid underlying: {underlying} (must be positive)")]
    InvalidUnderlying {
        /// The rejected spot or forward
        underlying: f64,
    },

    /// Volatility must be non-negative.
    #[error("Invalid volatility: {volatility} (must be non-negative)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Time to expiry must be non-negative.
    #[error("Invalid expiry: {expiry} (must be non-negative)")]
    InvalidExpiry {
        /// The rejected time to expiry in years
        expiry: f64,
    },

    /// An argument was NaN or infinite.
    #[error("Non-finite input: {name} = {value}")]
    NonFiniteInput {
        /// Argument name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Correlation must lie in `[-1, 1]`.
    #[error("Invalid correlation: {rho} (must lie in [-1, 1])")]
    InvalidCorrelation {
        /// The rejected correlation
        rho: f64,
    },

    /// Option flag string was not one of `c`, `p`, `call`, `put`.
    #[error("Invalid option flag: '{0}'")]
    InvalidFlag(String),
}

impl PricingError {
    /// Returns `Ok(value)` when finite, otherwise `NonFiniteInput` tagged with `name`.
    ///
    /// # Examples
    /// ```
    /// use vollib_core::types::PricingError;
    ///
    /// assert_eq!(PricingError::require_finite("rate", 0.05), Ok(0.05));
    /// assert!(PricingError::require_finite("rate", f64::NAN).is_err());
    /// ```
    pub fn require_finite(name: &'static str, value: f64) -> Result<f64, PricingError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NonFiniteInput { name, value })
        }
    }
}

/// Root-finding solver errors.
///
/// Provides structured error handling for numerical solvers
/// (Newton-Raphson, Brent) with context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Failed to converge within iteration limit
/// - `DerivativeNearZero`: Newton step undefined
/// - `NoBracket`: Invalid bracket for bracketing methods
/// - `NumericalInstability`: Iteration left the finite domain
/// - `InvalidConfig`: Solver configuration rejected
///
/// # Examples
/// ```
/// use vollib_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability (NaN or infinity encountered).
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Tolerance or iteration limit out of range.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // PricingError tests

    #[test]
    fn test_pricing_error_strike_display() {
        let err = PricingError::InvalidStrike { strike: 0.0 };
        assert_eq!(format!("{}", err), "Invalid strike: 0 (must be positive)");
    }

    #[test]
    fn test_pricing_error_underlying_display() {
        let err = PricingError::InvalidUnderlying { underlying: -1.5 };
        assert_eq!(
            format!("{}", err),
            "Invalid underlying: -1.5 (must be positive)"
        );
    }

    #[test]
    fn test_pricing_error_non_finite_display() {
        let err = PricingError::NonFiniteInput {
            name: "volatility",
            value: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Non-finite input: volatility = inf");
    }

    #[test]
    fn test_pricing_error_correlation_display() {
        let err = PricingError::InvalidCorrelation { rho: 1.5 };
        assert!(format!("{}", err).contains("[-1, 1]"));
    }

    #[test]
    fn test_pricing_error_flag_display() {
        let err = PricingError::InvalidFlag("x".to_string());
        assert_eq!(format!("{}", err), "Invalid option flag: 'x'");
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(PricingError::require_finite("strike", 95.0), Ok(95.0));
        match PricingError::require_finite("strike", f64::NEG_INFINITY) {
            Err(PricingError::NonFiniteInput { name, value }) => {
                assert_eq!(name, "strike");
                assert!(value.is_infinite());
            }
            other => panic!("Expected NonFiniteInput, got {:?}", other),
        }
    }

    #[test]
    fn test_pricing_error_trait_implementation() {
        let err = PricingError::InvalidExpiry { expiry: -1.0 };
        let _: &dyn std::error::Error = &err;
    }

    // SolverError tests

    #[test]
    fn test_solver_error_max_iterations_display() {
        let err = SolverError::MaxIterationsExceeded { iterations: 100 };
        assert_eq!(
            format!("{}", err),
            "Failed to converge after 100 iterations"
        );
    }

    #[test]
    fn test_solver_error_no_bracket_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert_eq!(
            format!("{}", err),
            "No bracket: f(0) and f(1) have same sign"
        );
    }

    #[test]
    fn test_solver_error_invalid_config_display() {
        let err = SolverError::InvalidConfig("tolerance must be positive".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid solver configuration: tolerance must be positive"
        );
    }

    #[test]
    fn test_solver_error_clone_and_equality() {
        let err1 = SolverError::DerivativeNearZero { x: 1.5 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
