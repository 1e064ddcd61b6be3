//! Implied-volatility façade.
//!
//! The per-convention `implied_volatility` functions reduce a quoted price to
//! an undiscounted Black price, hand it to a [`BlackDelegate`] and pass the
//! raw answer through [`interpret`]. This module holds the shared plumbing.
//!
//! [`BlackDelegate`]: crate::analytical::BlackDelegate

use crate::analytical::{AnalyticalError, BlackDelegate, FLOAT_MAX, MINUS_FLOAT_MAX};
use tracing::debug;
use vollib_core::types::{OptionType, PricingError};

/// Maps the delegate's sentinel floats onto [`AnalyticalError`].
///
/// `price` is the quote the caller asked about and is carried into the error.
///
/// # Examples
/// ```
/// use vollib_models::analytical::{AnalyticalError, FLOAT_MAX};
/// use vollib_models::implied::interpret;
///
/// assert_eq!(interpret(0.25, 3.0), Ok(0.25));
/// assert_eq!(
///     interpret(FLOAT_MAX, 120.0),
///     Err(AnalyticalError::PriceAboveMaximum { price: 120.0 })
/// );
/// ```
pub fn interpret(sigma: f64, price: f64) -> Result<f64, AnalyticalError> {
    if sigma == FLOAT_MAX {
        debug!(price, "price at or above the maximum");
        Err(AnalyticalError::PriceAboveMaximum { price })
    } else if sigma == MINUS_FLOAT_MAX {
        debug!(price, "price below intrinsic value");
        Err(AnalyticalError::PriceBelowIntrinsic { price })
    } else if sigma.is_nan() {
        Err(AnalyticalError::NumericalInstability {
            message: format!("implied volatility did not converge for price {price}"),
        })
    } else {
        Ok(sigma)
    }
}

/// Inverts an undiscounted Black price on a validated forward and strike.
pub(crate) fn invert<D: BlackDelegate + ?Sized>(
    delegate: &D,
    undiscounted: f64,
    quoted: f64,
    forward: f64,
    strike: f64,
    t: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    PricingError::require_finite("price", quoted)?;
    if !(forward.is_finite() && forward > 0.0) {
        return Err(PricingError::InvalidUnderlying {
            underlying: forward,
        }
        .into());
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::InvalidStrike { strike }.into());
    }
    if !(t.is_finite() && t >= 0.0) {
        return Err(PricingError::InvalidExpiry { expiry: t }.into());
    }
    let sigma = delegate.implied_volatility(undiscounted, forward, strike, t, flag.sign());
    interpret(sigma, quoted)
}
