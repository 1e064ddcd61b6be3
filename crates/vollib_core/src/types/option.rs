//! Option value types shared by every pricing convention.
//!
//! - [`OptionType`]: call/put flag, carried as a sign
//! - [`OptionSpec`]: the full set of market inputs for one European option

use super::error::PricingError;
use std::fmt;
use std::str::FromStr;

/// Call or put.
///
/// Formulas use the flag only through [`OptionType::sign`], which keeps call
/// and put branches in a single expression.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
///
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// assert_eq!("P".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert!("x".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl OptionType {
    /// `+1.0` for a call, `-1.0` for a put.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Single-character flag (`"c"` or `"p"`).
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "c",
            OptionType::Put => "p",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidFlag(s.to_string())),
        }
    }
}

/// Market inputs for a single European option.
///
/// `underlying` is the forward price under the Black convention and the spot
/// price under Black-Scholes and Black-Scholes-Merton. `dividend_yield` is
/// ignored by the conventions without carry.
///
/// # Examples
/// ```
/// use vollib_core::types::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(OptionType::Put, 100.0, 95.0, 0.5, 0.1, 0.2)
///     .with_dividend_yield(0.05);
/// assert!(spec.validate().is_ok());
///
/// let bumped = spec.with_volatility(0.21);
/// assert_eq!(spec.volatility, 0.2);
/// assert_eq!(bumped.volatility, 0.21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// Call or put
    pub flag: OptionType,
    /// Forward (Black) or spot (Black-Scholes, Black-Scholes-Merton)
    pub underlying: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Continuous dividend yield
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: f64,
}

impl OptionSpec {
    /// Creates a spec with zero dividend yield.
    ///
    /// No validation is performed here; call [`OptionSpec::validate`] or
    /// let the pricing functions do it.
    pub fn new(
        flag: OptionType,
        underlying: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            flag,
            underlying,
            strike,
            expiry,
            rate,
            volatility,
            dividend_yield: 0.0,
        }
    }

    /// Copy with a different flag.
    pub fn with_flag(self, flag: OptionType) -> Self {
        Self { flag, ..self }
    }

    /// Copy with a different spot or forward.
    pub fn with_underlying(self, underlying: f64) -> Self {
        Self { underlying, ..self }
    }

    /// Copy with a different strike.
    pub fn with_strike(self, strike: f64) -> Self {
        Self { strike, ..self }
    }

    /// Copy with a different time to expiry.
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self { expiry, ..self }
    }

    /// Copy with a different risk-free rate.
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    /// Copy with a different volatility.
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a different dividend yield.
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    /// Checks every field and reports the first violation.
    ///
    /// # Errors
    ///
    /// - `NonFiniteInput` for any NaN or infinite field
    /// - `InvalidUnderlying` / `InvalidStrike` when not strictly positive
    /// - `InvalidExpiry` / `InvalidVolatility` when negative
    pub fn validate(&self) -> Result<(), PricingError> {
        let underlying = PricingError::require_finite("underlying", self.underlying)?;
        let strike = PricingError::require_finite("strike", self.strike)?;
        let expiry = PricingError::require_finite("expiry", self.expiry)?;
        PricingError::require_finite("rate", self.rate)?;
        let volatility = PricingError::require_finite("volatility", self.volatility)?;
        PricingError::require_finite("dividend_yield", self.dividend_yield)?;

        if underlying <= 0.0 {
            return Err(PricingError::InvalidUnderlying { underlying });
        }
        if strike <= 0.0 {
            return Err(PricingError::InvalidStrike { strike });
        }
        if expiry < 0.0 {
            return Err(PricingError::InvalidExpiry { expiry });
        }
        if volatility < 0.0 {
            return Err(PricingError::InvalidVolatility { volatility });
        }
        Ok(())
    }

    /// True when `expiry` or `volatility` is zero, i.e. the option has no
    /// remaining time value.
    pub fn is_degenerate(&self) -> bool {
        self.expiry == 0.0 || self.volatility == 0.0
    }
}
