//! Greeks calculation configuration.
//!
//! Provides [`GreeksConfig`] for configuring the bump widths of the
//! finite-difference engine and the tolerance used when it is compared with
//! the closed-form Greeks.

use thiserror::Error;

/// Configuration for numerical Greeks.
///
/// Controls bump widths for finite differences and verification tolerances.
/// Use the builder pattern via [`GreeksConfig::builder()`] for construction.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `spot_bump_relative` | 1e-4 | Relative bump for spot or forward |
/// | `vol_bump_absolute` | 0.01 | Absolute bump for volatility |
/// | `rate_bump_absolute` | 0.01 | Absolute bump for interest rate |
/// | `time_bump_years` | 1/365 | Time bump in years (1 calendar day) |
/// | `min_expiry` | 1e-5 | Shortest expiry a time bump may reach |
/// | `verification_tolerance` | 1e-3 | Accepted analytical/numerical gap |
///
/// # Examples
///
/// ```rust
/// use vollib_models::greeks::GreeksConfig;
///
/// // Use defaults
/// let config = GreeksConfig::default();
/// assert!(config.validate().is_ok());
///
/// // Use builder for custom values
/// let config = GreeksConfig::builder()
///     .spot_bump_relative(1e-3)
///     .vol_bump_absolute(0.005)
///     .build()
///     .unwrap();
/// assert_eq!(config.vol_bump_absolute, 0.005);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksConfig {
    /// Relative bump for spot or forward (default: 1e-4).
    ///
    /// The actual bump is `spot_bump_relative * underlying`, floored at 1e-8.
    pub spot_bump_relative: f64,

    /// Absolute bump for volatility (default: 0.01 = 1 vol point).
    pub vol_bump_absolute: f64,

    /// Absolute bump for interest rate (default: 0.01 = 1%).
    pub rate_bump_absolute: f64,

    /// Time bump in years (default: 1/365 = 1 calendar day).
    pub time_bump_years: f64,

    /// Expiry below which a downward time bump is clipped (default: 1e-5).
    pub min_expiry: f64,

    /// Tolerance for analytical/numerical verification (default: 1e-3).
    pub verification_tolerance: f64,
}

const DEFAULT_SPOT_BUMP: f64 = 1e-4;
const DEFAULT_VOL_BUMP: f64 = 0.01;
const DEFAULT_RATE_BUMP: f64 = 0.01;
const DEFAULT_TIME_BUMP: f64 = 1.0 / 365.0;
const DEFAULT_MIN_EXPIRY: f64 = 1e-5;
const DEFAULT_TOLERANCE: f64 = 1e-3;

impl Default for GreeksConfig {
    fn default() -> Self {
        Self {
            spot_bump_relative: DEFAULT_SPOT_BUMP,
            vol_bump_absolute: DEFAULT_VOL_BUMP,
            rate_bump_absolute: DEFAULT_RATE_BUMP,
            time_bump_years: DEFAULT_TIME_BUMP,
            min_expiry: DEFAULT_MIN_EXPIRY,
            verification_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl GreeksConfig {
    /// Creates a new builder for constructing a `GreeksConfig`.
    pub fn builder() -> GreeksConfigBuilder {
        GreeksConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Returns an error if any parameter is out of valid range. NaN values
    /// are always rejected.
    pub fn validate(&self) -> Result<(), GreeksConfigError> {
        if !(self.spot_bump_relative > 0.0 && self.spot_bump_relative <= 0.1) {
            return Err(GreeksConfigError::InvalidSpotBump(
                "spot_bump_relative must lie in (0, 0.1]".to_string(),
            ));
        }
        if !(self.vol_bump_absolute > 0.0 && self.vol_bump_absolute <= 0.5) {
            return Err(GreeksConfigError::InvalidVolBump(
                "vol_bump_absolute must lie in (0, 0.5]".to_string(),
            ));
        }
        if !(self.rate_bump_absolute > 0.0 && self.rate_bump_absolute <= 0.1) {
            return Err(GreeksConfigError::InvalidRateBump(
                "rate_bump_absolute must lie in (0, 0.1]".to_string(),
            ));
        }
        if !(self.time_bump_years > 0.0 && self.time_bump_years <= 1.0) {
            return Err(GreeksConfigError::InvalidTimeBump(
                "time_bump_years must lie in (0, 1]".to_string(),
            ));
        }
        if !(self.min_expiry > 0.0 && self.min_expiry < self.time_bump_years) {
            return Err(GreeksConfigError::InvalidTimeBump(
                "min_expiry must be positive and below time_bump_years".to_string(),
            ));
        }
        if !(self.verification_tolerance > 0.0 && self.verification_tolerance.is_finite()) {
            return Err(GreeksConfigError::InvalidTolerance(
                "verification_tolerance must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Computes the absolute bump for a given spot or forward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vollib_models::greeks::GreeksConfig;
    ///
    /// let config = GreeksConfig::default();
    /// assert!((config.compute_spot_bump(100.0) - 0.01).abs() < 1e-15);
    /// assert_eq!(config.compute_spot_bump(0.0), 1e-8);
    /// ```
    #[inline]
    pub fn compute_spot_bump(&self, underlying: f64) -> f64 {
        (self.spot_bump_relative * underlying).max(1e-8)
    }
}

/// Builder for [`GreeksConfig`].
///
/// Provides a fluent interface for constructing a `GreeksConfig` with
/// custom parameters. Unset parameters take their defaults.
#[derive(Debug, Default)]
pub struct GreeksConfigBuilder {
    spot_bump_relative: Option<f64>,
    vol_bump_absolute: Option<f64>,
    rate_bump_absolute: Option<f64>,
    time_bump_years: Option<f64>,
    min_expiry: Option<f64>,
    verification_tolerance: Option<f64>,
}

impl GreeksConfigBuilder {
    /// Sets the relative spot bump (default: 1e-4).
    pub fn spot_bump_relative(mut self, bump: f64) -> Self {
        self.spot_bump_relative = Some(bump);
        self
    }

    /// Sets the absolute volatility bump (default: 0.01).
    pub fn vol_bump_absolute(mut self, bump: f64) -> Self {
        self.vol_bump_absolute = Some(bump);
        self
    }

    /// Sets the absolute rate bump (default: 0.01).
    pub fn rate_bump_absolute(mut self, bump: f64) -> Self {
        self.rate_bump_absolute = Some(bump);
        self
    }

    /// Sets the time bump in years (default: 1/365).
    pub fn time_bump_years(mut self, bump: f64) -> Self {
        self.time_bump_years = Some(bump);
        self
    }

    /// Sets the shortest reachable expiry (default: 1e-5).
    pub fn min_expiry(mut self, min_expiry: f64) -> Self {
        self.min_expiry = Some(min_expiry);
        self
    }

    /// Sets the verification tolerance (default: 1e-3).
    pub fn verification_tolerance(mut self, tolerance: f64) -> Self {
        self.verification_tolerance = Some(tolerance);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GreeksConfigError`] if any parameter is invalid.
    pub fn build(self) -> Result<GreeksConfig, GreeksConfigError> {
        let config = GreeksConfig {
            spot_bump_relative: self.spot_bump_relative.unwrap_or(DEFAULT_SPOT_BUMP),
            vol_bump_absolute: self.vol_bump_absolute.unwrap_or(DEFAULT_VOL_BUMP),
            rate_bump_absolute: self.rate_bump_absolute.unwrap_or(DEFAULT_RATE_BUMP),
            time_bump_years: self.time_bump_years.unwrap_or(DEFAULT_TIME_BUMP),
            min_expiry: self.min_expiry.unwrap_or(DEFAULT_MIN_EXPIRY),
            verification_tolerance: self.verification_tolerance.unwrap_or(DEFAULT_TOLERANCE),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Error type for [`GreeksConfig`] validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[allow(clippy::enum_variant_names)]
pub enum GreeksConfigError {
    /// Invalid spot bump value.
    #[error("Invalid spot bump: {0}")]
    InvalidSpotBump(String),
    /// Invalid volatility bump value.
    #[error("Invalid vol bump: {0}")]
    InvalidVolBump(String),
    /// Invalid rate bump value.
    #[error("Invalid rate bump: {0}")]
    InvalidRateBump(String),
    /// Invalid time bump or minimum expiry.
    #[error("Invalid time bump: {0}")]
    InvalidTimeBump(String),
    /// Invalid verification tolerance.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),
}
