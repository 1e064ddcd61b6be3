//! Selection of a pricing convention over a shared [`OptionSpec`].
//!
//! Enum dispatch lets callers treat the three closed-form models uniformly,
//! which the Greeks verification and batch evaluation rely on.

use std::fmt;

use super::delegate::{BlackDelegate, ClosedFormDelegate};
use super::error::AnalyticalError;
use super::{black, black_scholes_merton as bsm};
use crate::greeks::{Greeks, GreeksConfig, GreeksVerification, NumericalGreeks};
use vollib_core::types::OptionSpec;

/// Closed-form pricing convention.
///
/// | Variant | `spec.underlying` | Forward |
/// |---------|-------------------|---------|
/// | `Black` | forward `F` | `F` |
/// | `BlackScholes` | spot `S` | `S·e^(rt)` |
/// | `BlackScholesMerton` | spot `S` | `S·e^((r−q)t)` |
///
/// Only `BlackScholesMerton` reads `spec.dividend_yield`.
///
/// # Examples
/// ```
/// use vollib_core::types::{OptionSpec, OptionType};
/// use vollib_models::analytical::PricingConvention;
///
/// let spec = OptionSpec::new(OptionType::Call, 100.0, 100.0, 0.5, 0.02, 0.2);
/// let price = PricingConvention::Black.price(&spec).unwrap();
/// assert!((price - 5.58110672460481).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingConvention {
    /// Black-76 on a forward or futures price.
    Black,
    /// Black-Scholes on a spot without carry.
    BlackScholes,
    /// Black-Scholes-Merton on a spot with continuous dividend yield.
    BlackScholesMerton,
}

impl PricingConvention {
    /// Every convention, in declaration order.
    pub const ALL: [PricingConvention; 3] = [
        PricingConvention::Black,
        PricingConvention::BlackScholes,
        PricingConvention::BlackScholesMerton,
    ];

    /// Forward price implied by `spec` under this convention.
    pub fn forward(&self, spec: &OptionSpec) -> f64 {
        match self {
            PricingConvention::Black => spec.underlying,
            PricingConvention::BlackScholes => {
                bsm::forward(spec.underlying, spec.expiry, spec.rate, 0.0)
            }
            PricingConvention::BlackScholesMerton => {
                bsm::forward(spec.underlying, spec.expiry, spec.rate, spec.dividend_yield)
            }
        }
    }

    /// Discounted price.
    pub fn price(&self, spec: &OptionSpec) -> Result<f64, AnalyticalError> {
        self.price_with(&ClosedFormDelegate::default(), spec)
    }

    /// Discounted price through an alternative delegate.
    pub fn price_with<D: BlackDelegate + ?Sized>(
        &self,
        delegate: &D,
        spec: &OptionSpec,
    ) -> Result<f64, AnalyticalError> {
        match self {
            PricingConvention::Black => black::price_of(delegate, spec),
            PricingConvention::BlackScholes => bsm::price_of(delegate, &without_carry(spec)),
            PricingConvention::BlackScholesMerton => bsm::price_of(delegate, spec),
        }
    }

    /// Closed-form Greeks.
    pub fn analytical_greeks(&self, spec: &OptionSpec) -> Result<Greeks, AnalyticalError> {
        match self {
            PricingConvention::Black => black::greeks_of(spec),
            PricingConvention::BlackScholes => bsm::greeks_of(&without_carry(spec)),
            PricingConvention::BlackScholesMerton => bsm::greeks_of(spec),
        }
    }

    /// Finite-difference Greeks of [`PricingConvention::price`].
    pub fn numerical_greeks(
        &self,
        spec: &OptionSpec,
        config: &GreeksConfig,
    ) -> Result<Greeks, AnalyticalError> {
        let engine = NumericalGreeks::new(*config)?;
        engine.all(&|s: &OptionSpec| self.price(s), spec)
    }

    /// Compares closed-form and finite-difference Greeks against
    /// `config.verification_tolerance`.
    ///
    /// # Examples
    /// ```
    /// use vollib_core::types::{OptionSpec, OptionType};
    /// use vollib_models::analytical::PricingConvention;
    /// use vollib_models::greeks::GreeksConfig;
    ///
    /// let spec = OptionSpec::new(OptionType::Put, 49.0, 50.0, 0.3846, 0.05, 0.2);
    /// let report = PricingConvention::BlackScholes
    ///     .verify_greeks(&spec, &GreeksConfig::default())
    ///     .unwrap();
    /// assert!(report.is_within_tolerance());
    /// ```
    pub fn verify_greeks(
        &self,
        spec: &OptionSpec,
        config: &GreeksConfig,
    ) -> Result<GreeksVerification, AnalyticalError> {
        let analytical = self.analytical_greeks(spec)?;
        let numerical = self.numerical_greeks(spec, config)?;
        Ok(GreeksVerification::new(
            analytical,
            numerical,
            config.verification_tolerance,
        ))
    }

    /// Volatility reproducing the discounted `price`; `spec.volatility` is
    /// ignored.
    pub fn implied_volatility(&self, price: f64, spec: &OptionSpec) -> Result<f64, AnalyticalError> {
        self.implied_volatility_with(&ClosedFormDelegate::default(), price, spec)
    }

    /// [`PricingConvention::implied_volatility`] through an alternative
    /// delegate.
    pub fn implied_volatility_with<D: BlackDelegate + ?Sized>(
        &self,
        delegate: &D,
        price: f64,
        spec: &OptionSpec,
    ) -> Result<f64, AnalyticalError> {
        match self {
            PricingConvention::Black => black::implied_volatility_of(delegate, price, spec),
            PricingConvention::BlackScholes => {
                bsm::implied_volatility_of(delegate, price, &without_carry(spec))
            }
            PricingConvention::BlackScholesMerton => {
                bsm::implied_volatility_of(delegate, price, spec)
            }
        }
    }

    /// Short name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingConvention::Black => "black",
            PricingConvention::BlackScholes => "black_scholes",
            PricingConvention::BlackScholesMerton => "black_scholes_merton",
        }
    }
}

impl fmt::Display for PricingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn without_carry(spec: &OptionSpec) -> OptionSpec {
    spec.with_dividend_yield(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::{black_scholes, AnalyticalError};
    use approx::assert_relative_eq;
    use vollib_core::types::OptionType;

    fn spec() -> OptionSpec {
        OptionSpec::new(OptionType::Call, 100.0, 95.0, 0.5, 0.1, 0.2).with_dividend_yield(0.05)
    }

    #[test]
    fn test_forward() {
        let s = spec();
        assert_eq!(PricingConvention::Black.forward(&s), 100.0);
        assert_relative_eq!(
            PricingConvention::BlackScholes.forward(&s),
            100.0 * 0.05_f64.exp(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            PricingConvention::BlackScholesMerton.forward(&s),
            100.0 * 0.025_f64.exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_black_scholes_ignores_dividend_yield() {
        let s = spec();
        let direct = black_scholes::price(s.flag, 100.0, 95.0, 0.5, 0.1, 0.2).unwrap();
        assert_eq!(PricingConvention::BlackScholes.price(&s).unwrap(), direct);
    }

    #[test]
    fn test_black_scholes_merton_is_black_on_its_forward() {
        let s = spec();
        let f = PricingConvention::BlackScholesMerton.forward(&s);
        let merton = PricingConvention::BlackScholesMerton.price(&s).unwrap();
        let black = PricingConvention::Black.price(&s.with_underlying(f)).unwrap();
        assert_relative_eq!(merton, black, epsilon = 1e-10);
    }

    #[test]
    fn test_verify_greeks_all_conventions() {
        let config = GreeksConfig::default();
        for convention in PricingConvention::ALL {
            for flag in [OptionType::Call, OptionType::Put] {
                let report = convention
                    .verify_greeks(&spec().with_flag(flag), &config)
                    .unwrap();
                assert!(report.failures().is_empty(), "{convention} {flag}: {report:?}");
            }
        }
    }

    #[test]
    fn test_numerical_greeks_reject_invalid_config() {
        let config = GreeksConfig {
            spot_bump_relative: -1.0,
            ..GreeksConfig::default()
        };
        assert!(matches!(
            PricingConvention::Black.numerical_greeks(&spec(), &config),
            Err(AnalyticalError::Config(_))
        ));
    }

    #[test]
    fn test_implied_volatility_round_trip() {
        for convention in PricingConvention::ALL {
            let s = spec().with_volatility(0.33);
            let p = convention.price(&s).unwrap();
            let sigma = convention.implied_volatility(p, &s.with_volatility(0.0)).unwrap();
            assert_relative_eq!(sigma, 0.33, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PricingConvention::BlackScholesMerton.to_string(), "black_scholes_merton");
    }
}
