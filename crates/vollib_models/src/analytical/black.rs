//! Black-76 pricing for options on forwards and futures.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = e^(−rT)·[F·N(d₁) − K·N(d₂)]
//! **Put Price**: P = e^(−rT)·[K·N(−d₂) − F·N(−d₁)]
//!
//! Where:
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! Greeks are taken with respect to the forward and hold the forward fixed
//! when the rate moves, so rho is `−T·V`.
//!
//! Argument order follows the usual Black conventions: pricing takes
//! `(flag, F, K, t, r, σ)` while [`implied_volatility`] takes the rate before
//! the expiry, `(price, F, K, r, t, flag)`.

use super::black_scholes_merton::{self as bsm, Terms};
use super::delegate::{BlackDelegate, ClosedFormDelegate};
use super::error::AnalyticalError;
use crate::greeks::numerical::PER_POINT;
use crate::greeks::Greeks;
use crate::implied;
use vollib_core::math::solvers::SolverConfig;
use vollib_core::types::{OptionSpec, OptionType, PricingError};

pub use super::delegate::undiscounted_black;

/// `d₁ = (ln(F/K) + σ²t/2)/(σ√t)`.
///
/// # Examples
/// ```
/// use vollib_models::analytical::black;
///
/// // Hull, example 16.6
/// let d1 = black::d1(20.0, 20.0, 4.0 / 12.0, 0.25);
/// assert!((d1 - 0.0721687836487).abs() < 1e-12);
/// ```
#[inline]
pub fn d1(forward: f64, strike: f64, t: f64, sigma: f64) -> f64 {
    bsm::d1(forward, strike, t, 0.0, sigma, 0.0)
}

/// `d₂ = d₁ − σ√t`.
#[inline]
pub fn d2(forward: f64, strike: f64, t: f64, sigma: f64) -> f64 {
    bsm::d2(forward, strike, t, 0.0, sigma, 0.0)
}

/// Discounted Black price.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black;
///
/// let c = black::price(OptionType::Call, 100.0, 100.0, 0.5, 0.02, 0.2).unwrap();
/// assert!((c - 5.58110672460481).abs() < 1e-9);
/// ```
pub fn price(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    price_with(&ClosedFormDelegate::default(), flag, forward, strike, t, r, sigma)
}

/// [`price`] through an alternative delegate.
pub fn price_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    price_of(delegate, &OptionSpec::new(flag, forward, strike, t, r, sigma))
}

/// Normalised Black price `B/√(FK)` at log-moneyness `x` and total standard
/// deviation `s = σ√t`.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black;
///
/// let x = (100.0_f64 / 95.0).ln();
/// let s = 0.3 * 0.5_f64.sqrt();
/// let put = black::normalised_black(x, s, OptionType::Put);
/// assert!((put - 0.061296663817558904).abs() < 1e-12);
/// ```
pub fn normalised_black(x: f64, s: f64, flag: OptionType) -> f64 {
    ClosedFormDelegate::default().normalised_black(x, s, flag.sign())
}

/// Delta with respect to the forward.
pub fn delta(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    Ok(terms(flag, forward, strike, t, r, sigma)?.delta())
}

/// Gamma with respect to the forward.
pub fn gamma(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    Ok(terms(flag, forward, strike, t, r, sigma)?.gamma())
}

/// Theta per calendar day, forward held fixed.
pub fn theta(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    Ok(terms(flag, forward, strike, t, r, sigma)?.theta())
}

/// Vega per volatility point.
pub fn vega(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    Ok(terms(flag, forward, strike, t, r, sigma)?.vega())
}

/// Rho per rate point, `−t·V·0.01`.
pub fn rho(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<f64, AnalyticalError> {
    Ok(forward_rho(&terms(flag, forward, strike, t, r, sigma)?))
}

/// All five Greeks.
pub fn greeks(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<Greeks, AnalyticalError> {
    greeks_of(&OptionSpec::new(flag, forward, strike, t, r, sigma))
}

/// Volatility reproducing a discounted Black `price`.
///
/// Note the `(r, t)` order.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black;
///
/// let sigma =
///     black::implied_volatility(5.58110672460481, 100.0, 100.0, 0.02, 0.5, OptionType::Call)
///         .unwrap();
/// assert!((sigma - 0.2).abs() < 1e-9);
/// ```
pub fn implied_volatility(
    price: f64,
    forward: f64,
    strike: f64,
    r: f64,
    t: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied_volatility_with(&ClosedFormDelegate::default(), price, forward, strike, r, t, flag)
}

/// [`implied_volatility`] through an alternative delegate.
pub fn implied_volatility_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    forward: f64,
    strike: f64,
    r: f64,
    t: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    let spec = OptionSpec::new(flag, forward, strike, t, r, 0.0);
    implied_volatility_of(delegate, price, &spec)
}

/// [`implied_volatility`] with both inversion stages capped at
/// `max_iterations`.
///
/// A tight cap may leave the inversion unconverged, which surfaces as
/// `NumericalInstability`.
pub fn implied_volatility_limited_iterations(
    price: f64,
    forward: f64,
    strike: f64,
    r: f64,
    t: f64,
    flag: OptionType,
    max_iterations: usize,
) -> Result<f64, AnalyticalError> {
    let delegate = limited(max_iterations);
    implied_volatility_with(&delegate, price, forward, strike, r, t, flag)
}

/// Volatility reproducing an undiscounted Black `price`.
pub fn implied_volatility_of_undiscounted_price(
    price: f64,
    forward: f64,
    strike: f64,
    t: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied_volatility_of_undiscounted_price_with(
        &ClosedFormDelegate::default(),
        price,
        forward,
        strike,
        t,
        flag,
    )
}

/// [`implied_volatility_of_undiscounted_price`] through an alternative
/// delegate.
pub fn implied_volatility_of_undiscounted_price_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    forward: f64,
    strike: f64,
    t: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied::invert(delegate, price, price, forward, strike, t, flag)
}

/// Total standard deviation `s` reproducing a normalised Black price `beta`
/// at log-moneyness `x`.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black;
///
/// let beta = black::normalised_black(0.1, 0.23232323888, OptionType::Put);
/// let s = black::normalised_implied_volatility(beta, 0.1, OptionType::Put).unwrap();
/// assert!((s - 0.23232323888).abs() < 1e-9);
/// ```
pub fn normalised_implied_volatility(
    beta: f64,
    x: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    normalised_implied_volatility_with(&ClosedFormDelegate::default(), beta, x, flag)
}

/// [`normalised_implied_volatility`] through an alternative delegate.
pub fn normalised_implied_volatility_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    beta: f64,
    x: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    PricingError::require_finite("beta", beta)?;
    PricingError::require_finite("x", x)?;
    let s = delegate.normalised_implied_volatility(beta, x, flag.sign());
    implied::interpret(s, beta)
}

/// [`normalised_implied_volatility`] with both inversion stages capped at
/// `max_iterations`.
pub fn normalised_implied_volatility_limited_iterations(
    beta: f64,
    x: f64,
    flag: OptionType,
    max_iterations: usize,
) -> Result<f64, AnalyticalError> {
    normalised_implied_volatility_with(&limited(max_iterations), beta, x, flag)
}

fn limited(max_iterations: usize) -> ClosedFormDelegate {
    ClosedFormDelegate::with_config(SolverConfig::default().with_max_iterations(max_iterations))
}

fn terms(
    flag: OptionType,
    forward: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
) -> Result<Terms, AnalyticalError> {
    carry_free(&OptionSpec::new(flag, forward, strike, t, r, sigma))
}

/// A forward earns no carry: the Merton terms with `q = r`.
fn carry_free(spec: &OptionSpec) -> Result<Terms, AnalyticalError> {
    Terms::new(&spec.with_dividend_yield(spec.rate))
}

fn forward_rho(terms: &Terms) -> f64 {
    -terms.expiry() * terms.value() * PER_POINT
}

pub(crate) fn price_of<D: BlackDelegate + ?Sized>(
    delegate: &D,
    spec: &OptionSpec,
) -> Result<f64, AnalyticalError> {
    spec.validate()?;
    let undiscounted = delegate.black(
        spec.underlying,
        spec.strike,
        spec.volatility,
        spec.expiry,
        spec.flag.sign(),
    );
    Ok(undiscounted * (-spec.rate * spec.expiry).exp())
}

pub(crate) fn greeks_of(spec: &OptionSpec) -> Result<Greeks, AnalyticalError> {
    let terms = carry_free(spec)?;
    Ok(terms.greeks().with_rho(forward_rho(&terms)))
}

/// `spec.volatility` is ignored.
pub(crate) fn implied_volatility_of<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    spec: &OptionSpec,
) -> Result<f64, AnalyticalError> {
    spec.with_volatility(0.0).validate()?;
    let undiscounted = price * (spec.rate * spec.expiry).exp();
    implied::invert(
        delegate,
        undiscounted,
        price,
        spec.underlying,
        spec.strike,
        spec.expiry,
        spec.flag,
    )
}
