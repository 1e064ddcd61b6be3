//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors from pricing, Greeks and implied volatility

use crate::greeks::GreeksConfigError;
use thiserror::Error;
use vollib_core::types::PricingError;

/// Analytical pricing errors.
///
/// Provides structured error handling for analytical pricing operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `Input`: An input failed validation
/// - `Config`: A finite-difference configuration was rejected
/// - `DegenerateGreeks`: Sensitivities requested at zero expiry or volatility
/// - `PriceAboveMaximum`: Implied volatility requested for a price at or above
///   the no-arbitrage upper bound
/// - `PriceBelowIntrinsic`: Implied volatility requested for a price below
///   intrinsic value
/// - `NumericalInstability`: The inversion routine failed to converge
///
/// # Examples
/// ```
/// use vollib_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::PriceBelowIntrinsic { price: 0.5 };
/// assert!(format!("{}", err).contains("intrinsic"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Input validation failure from the foundation layer.
    #[error(transparent)]
    Input(#[from] PricingError),

    /// Finite-difference configuration rejected.
    #[error(transparent)]
    Config(#[from] GreeksConfigError),

    /// Greeks are undefined when expiry or volatility is zero.
    #[error("Greeks are undefined at t = {expiry}, σ = {volatility}")]
    DegenerateGreeks {
        /// Time to expiry in years
        expiry: f64,
        /// Volatility
        volatility: f64,
    },

    /// Option price is at or above the maximum attainable value.
    #[error("The volatility is too high: price {price} is at or above the maximum")]
    PriceAboveMaximum {
        /// The quoted option price
        price: f64,
    },

    /// Option price is below intrinsic value.
    #[error("The volatility is below the intrinsic value: price {price}")]
    PriceBelowIntrinsic {
        /// The quoted option price
        price: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_transparent() {
        let err: AnalyticalError = PricingError::InvalidStrike { strike: 0.0 }.into();
        assert_eq!(format!("{}", err), "Invalid strike: 0 (must be positive)");
        assert!(matches!(
            err,
            AnalyticalError::Input(PricingError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_config_error_converts() {
        let err: AnalyticalError = GreeksConfigError::InvalidVolBump("zero".to_string()).into();
        assert_eq!(format!("{}", err), "Invalid vol bump: zero");
    }

    #[test]
    fn test_degenerate_greeks_display() {
        let err = AnalyticalError::DegenerateGreeks {
            expiry: 0.0,
            volatility: 0.2,
        };
        assert_eq!(format!("{}", err), "Greeks are undefined at t = 0, σ = 0.2");
    }

    #[test]
    fn test_sentinel_error_display() {
        let above = AnalyticalError::PriceAboveMaximum { price: 101.0 };
        let below = AnalyticalError::PriceBelowIntrinsic { price: 0.1 };
        assert!(format!("{}", above).contains("too high"));
        assert!(format!("{}", below).contains("below the intrinsic"));
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = AnalyticalError::NumericalInstability {
            message: "inversion did not converge".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Numerical instability: inversion did not converge"
        );
    }

    #[test]
    fn test_error_trait_and_source() {
        use std::error::Error;
        let err = AnalyticalError::Input(PricingError::InvalidCorrelation { rho: 2.0 });
        let _: &dyn std::error::Error = &err;
        // Transparent forwards source() to the inner error, which has none
        assert!(err.source().is_none());
    }
}
