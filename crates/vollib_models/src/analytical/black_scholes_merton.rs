//! Black-Scholes-Merton pricing for options on a spot paying a continuous
//! dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Forward**: F = S·e^((r−q)T)
//!
//! **Call Price**: C = S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put Price**: P = K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! The Greek formulas here are the general case: Black-Scholes is `q = 0`,
//! and Black on a forward is `q = r` with its own rho.

use super::delegate::{BlackDelegate, ClosedFormDelegate};
use super::error::AnalyticalError;
use crate::greeks::numerical::{check, DAYS_PER_YEAR, PER_POINT};
use crate::greeks::Greeks;
use crate::implied;
use vollib_core::math::distributions::{norm_cdf, norm_pdf};
use vollib_core::types::{OptionSpec, OptionType};

/// Forward price `S·e^((r−q)t)`.
///
/// # Examples
/// ```
/// use vollib_models::analytical::black_scholes_merton::forward;
///
/// assert!((forward(100.0, 1.0, 0.05, 0.05) - 100.0).abs() < 1e-12);
/// ```
#[inline]
pub fn forward(spot: f64, t: f64, r: f64, q: f64) -> f64 {
    spot * ((r - q) * t).exp()
}

/// `d₁`; infinite or NaN when `σ√t = 0`.
#[inline]
pub fn d1(spot: f64, strike: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// `d₂ = d₁ − σ√t`.
#[inline]
pub fn d2(spot: f64, strike: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    d1(spot, strike, t, r, sigma, q) - sigma * t.sqrt()
}

/// Discounted Black-Scholes-Merton price.
///
/// Zero expiry or zero volatility gives the discounted intrinsic value of the
/// forward.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black_scholes_merton;
///
/// // Haug, p. 4
/// let p = black_scholes_merton::price(OptionType::Put, 100.0, 95.0, 0.5, 0.1, 0.2, 0.05).unwrap();
/// assert!((p - 2.4648).abs() < 1e-4);
/// ```
pub fn price(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    price_with(&ClosedFormDelegate::default(), flag, spot, strike, t, r, sigma, q)
}

/// [`price`] through an alternative delegate.
#[allow(clippy::too_many_arguments)]
pub fn price_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    price_of(delegate, &spec(flag, spot, strike, t, r, sigma, q))
}

/// Delta `∂V/∂S`.
pub fn delta(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    Ok(Terms::new(&spec(flag, spot, strike, t, r, sigma, q))?.delta())
}

/// Gamma `∂²V/∂S²`.
pub fn gamma(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    Ok(Terms::new(&spec(flag, spot, strike, t, r, sigma, q))?.gamma())
}

/// Theta per calendar day.
pub fn theta(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    Ok(Terms::new(&spec(flag, spot, strike, t, r, sigma, q))?.theta())
}

/// Vega per volatility point.
pub fn vega(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    Ok(Terms::new(&spec(flag, spot, strike, t, r, sigma, q))?.vega())
}

/// Rho per rate point, dividend yield held fixed.
pub fn rho(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<f64, AnalyticalError> {
    Ok(Terms::new(&spec(flag, spot, strike, t, r, sigma, q))?.rho())
}

/// All five Greeks.
///
/// # Errors
/// `DegenerateGreeks` at zero expiry or volatility, `Input` on invalid
/// arguments.
pub fn greeks(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> Result<Greeks, AnalyticalError> {
    greeks_of(&spec(flag, spot, strike, t, r, sigma, q))
}

/// Volatility reproducing a discounted Black-Scholes-Merton `price`.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::black_scholes_merton;
///
/// let (s, k, t, r, q) = (100.0, 95.0, 0.5, 0.1, 0.05);
/// let p = black_scholes_merton::price(OptionType::Put, s, k, t, r, 0.2, q).unwrap();
/// let sigma = black_scholes_merton::implied_volatility(p, s, k, t, r, q, OptionType::Put).unwrap();
/// assert!((sigma - 0.2).abs() < 1e-8);
/// ```
pub fn implied_volatility(
    price: f64,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    q: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied_volatility_with(&ClosedFormDelegate::default(), price, spot, strike, t, r, q, flag)
}

/// [`implied_volatility`] through an alternative delegate.
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility_with<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    q: f64,
    flag: OptionType,
) -> Result<f64, AnalyticalError> {
    implied_volatility_of(delegate, price, &spec(flag, spot, strike, t, r, 0.0, q))
}

fn spec(
    flag: OptionType,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    q: f64,
) -> OptionSpec {
    OptionSpec::new(flag, spot, strike, t, r, sigma).with_dividend_yield(q)
}

pub(crate) fn price_of<D: BlackDelegate + ?Sized>(
    delegate: &D,
    spec: &OptionSpec,
) -> Result<f64, AnalyticalError> {
    spec.validate()?;
    let f = forward(spec.underlying, spec.expiry, spec.rate, spec.dividend_yield);
    let undiscounted = delegate.black(
        f,
        spec.strike,
        spec.volatility,
        spec.expiry,
        spec.flag.sign(),
    );
    Ok(undiscounted * (-spec.rate * spec.expiry).exp())
}

pub(crate) fn greeks_of(spec: &OptionSpec) -> Result<Greeks, AnalyticalError> {
    Ok(Terms::new(spec)?.greeks())
}

/// `spec.volatility` is ignored.
pub(crate) fn implied_volatility_of<D: BlackDelegate + ?Sized>(
    delegate: &D,
    price: f64,
    spec: &OptionSpec,
) -> Result<f64, AnalyticalError> {
    spec.with_volatility(0.0).validate()?;
    let (t, r) = (spec.expiry, spec.rate);
    let f = forward(spec.underlying, t, r, spec.dividend_yield);
    let undiscounted = price * (r * t).exp();
    implied::invert(delegate, undiscounted, price, f, spec.strike, t, spec.flag)
}

/// Intermediate quantities shared by the closed-form Greeks.
///
/// `spec.dividend_yield` is the carry `q`; Black passes `q = r`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Terms {
    sign: f64,
    spot: f64,
    strike: f64,
    t: f64,
    sqrt_t: f64,
    sigma: f64,
    rate: f64,
    carry: f64,
    /// `e^{−qt}`
    carry_df: f64,
    /// `e^{−rt}`
    df: f64,
    /// `N(s·d₁)`
    n_d1: f64,
    /// `N(s·d₂)`
    n_d2: f64,
    /// `φ(d₁)`
    pdf_d1: f64,
}

impl Terms {
    /// Fails with `DegenerateGreeks` at zero expiry or volatility.
    pub(crate) fn new(spec: &OptionSpec) -> Result<Self, AnalyticalError> {
        check(spec)?;
        let (s, k, t, r, sigma, q) = (
            spec.underlying,
            spec.strike,
            spec.expiry,
            spec.rate,
            spec.volatility,
            spec.dividend_yield,
        );
        let sign = spec.flag.sign();
        let d1 = d1(s, k, t, r, sigma, q);
        let d2 = d1 - sigma * t.sqrt();
        Ok(Self {
            sign,
            spot: s,
            strike: k,
            t,
            sqrt_t: t.sqrt(),
            sigma,
            rate: r,
            carry: q,
            carry_df: (-q * t).exp(),
            df: (-r * t).exp(),
            n_d1: norm_cdf(sign * d1),
            n_d2: norm_cdf(sign * d2),
            pdf_d1: norm_pdf(d1),
        })
    }

    pub(crate) fn delta(&self) -> f64 {
        self.sign * self.carry_df * self.n_d1
    }

    pub(crate) fn gamma(&self) -> f64 {
        self.carry_df * self.pdf_d1 / (self.spot * self.sigma * self.sqrt_t)
    }

    pub(crate) fn vega(&self) -> f64 {
        self.spot * self.carry_df * self.pdf_d1 * self.sqrt_t * PER_POINT
    }

    pub(crate) fn theta(&self) -> f64 {
        let decay = -self.spot * self.carry_df * self.pdf_d1 * self.sigma / (2.0 * self.sqrt_t);
        let carry = self.sign * self.carry * self.spot * self.carry_df * self.n_d1;
        let funding = self.sign * self.rate * self.strike * self.df * self.n_d2;
        (decay + carry - funding) / DAYS_PER_YEAR
    }

    pub(crate) fn rho(&self) -> f64 {
        self.sign * self.t * self.strike * self.df * self.n_d2 * PER_POINT
    }

    /// Option value implied by the terms, `s·(S·e^{−qt}·N(s·d₁) − K·e^{−rt}·N(s·d₂))`.
    pub(crate) fn value(&self) -> f64 {
        self.sign * (self.spot * self.carry_df * self.n_d1 - self.strike * self.df * self.n_d2)
    }

    pub(crate) fn expiry(&self) -> f64 {
        self.t
    }

    pub(crate) fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            theta: self.theta(),
            vega: self.vega(),
            rho: self.rho(),
        }
    }
}
