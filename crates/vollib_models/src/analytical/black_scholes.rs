//! Black-Scholes pricing for European options on a non-dividend-paying spot.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put Price**: P = K·e^(−rT)·N(−d₂) − S·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! Everything here is the `q = 0` case of
//! [`black_scholes_merton`](super::black_scholes_merton).

use super::black_scholes_merton as bsm;
use super::delegate::{BlackDelegate, ClosedFormDelegate};
use super::error::AnalyticalError;
use crate::greeks::Greeks;
use vollib_core::types::OptionType;

/// `d₁` with zero dividend yield.
#[inline]
pub fn d1(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> f64 {
    bsm::d1(spot, strike, t, r, sigma, 0.0)
}

/// `d₂ = d₁ − σ√t` with zero dividend yield.
#[inline]
pub fn d2(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> f64 {
    bsm::d2(spot, strike, t, r, sigma, 0.0)
}

/// Discounted Black-Scholes price.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black_scholes;
///
/// let c = black_scholes::price(OptionType::Call, 100.0, 90.0, 0.5, 0.01, 0.2).unwrap();
/// assert!((c - 12.111581435).abs() < 1e-6);
///
/// let p = black_scholes::price(OptionType::Put, 100.0, 90.0, 0.5, 0.01, 0.2).unwrap();
/// assert!((p - 1.66270456231).abs() < 1e-6);
/// ```
pub fn price(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::price(flag, spot, strike, t, r, sigma, 0.0)
}

/// [`price`] through an alternative delegate.
pub fn price_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::price_with(delegate, flag, spot, strike, t, r, sigma, 0.0)
}

/// Delta `∂V/∂S`.
pub fn delta(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::delta(flag, spot, strike, t, r, sigma, 0.0)
}

/// Gamma `∂²V/∂S²`.
pub fn gamma(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::gamma(flag, spot, strike, t, r, sigma, 0.0)
}

/// Theta per calendar day.
pub fn theta(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::theta(flag, spot, strike, t, r, sigma, 0.0)
}

/// Vega per volatility point.
pub fn vega(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::vega(flag, spot, strike, t, r, sigma, 0.0)
}

/// Rho per rate point.
pub fn rho(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    bsm::rho(flag, spot, strike, t, r, sigma, 0.0)
}

/// All five Greeks.
pub fn greeks(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<Greeks, AnalyticalError> {
    bsm::greeks(flag, spot, strike, t, r, sigma, 0.0)
}

/// Volatility reproducing a discounted Black-Scholes `price`.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black_scholes;
///
/// let sigma = black_scholes::implied_volatility(12.111581435, 100.0, 90.0, 0.5, 0.01, OptionType::Call)
///     .unwrap();
/// assert!((sigma - 0.2).abs() < 1e-6);
/// ```
pub fn implied_volatility(
    price: f64,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied_volatility_with(&ClosedFormDelegate::default(), price, spot, strike, t, r, flag)
}

/// [`implied_volatility`] through an alternative delegate.
pub fn implied_volatility_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    bsm::implied_volatility_with(delegate, price, spot, strike, t, r, 0.0, flag)
}
