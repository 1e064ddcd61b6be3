//! Finite-difference Greeks for any pricing function.
//!
//! [`NumericalGreeks`] bumps one field of an [`OptionSpec`] at a time and
//! revalues through a caller-supplied pricer. It reports its results in the
//! same units as the closed-form engines (theta per day, vega and rho per
//! point), so the two can be compared directly.

use super::config::{GreeksConfig, GreeksConfigError};
use super::result::Greeks;
use crate::analytical::AnalyticalError;
use vollib_core::types::OptionSpec;

/// Days per year used to express theta per calendar day.
pub(crate) const DAYS_PER_YEAR: f64 = 365.0;

/// Scale from per-unit to per-point sensitivities (vega, rho).
pub(crate) const PER_POINT: f64 = 0.01;

/// Bump-and-revalue Greeks engine.
///
/// # Schemes
///
/// | Greek | Scheme |
/// |-------|--------|
/// | delta | central difference in `underlying`, bump `h = spot_bump_relative·x` |
/// | gamma | three-point second difference with the same `h` |
/// | vega | central difference in `volatility`; forward difference when `σ ≤ dσ` |
/// | rho | central difference in `rate`, dividend yield held fixed |
/// | theta | difference in `expiry` over `[max(t − dt, min_expiry), t + dt]` |
///
/// Zero expiry or zero volatility yields `AnalyticalError::DegenerateGreeks`.
///
/// # Examples
///
/// ```rust
/// use vollib_core::types::{OptionSpec, OptionType};
/// use vollib_models::analytical::black_scholes;
/// use vollib_models::greeks::{GreeksConfig, NumericalGreeks};
///
/// let engine = NumericalGreeks::new(GreeksConfig::default()).unwrap();
/// let spec = OptionSpec::new(OptionType::Call, 49.0, 50.0, 0.3846, 0.05, 0.2);
///
/// let pricer = |s: &OptionSpec| {
///     black_scholes::price(s.flag, s.underlying, s.strike, s.expiry, s.rate, s.volatility)
/// };
/// let greeks = engine.all(&pricer, &spec).unwrap();
/// assert!((greeks.delta - 0.522).abs() < 0.01);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NumericalGreeks {
    config: GreeksConfig,
}

impl NumericalGreeks {
    /// Creates an engine after validating `config`.
    pub fn new(config: GreeksConfig) -> Result<Self, GreeksConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the bump configuration.
    pub fn config(&self) -> &GreeksConfig {
        &self.config
    }

    /// Delta by central difference in the underlying.
    pub fn delta<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let h = self.config.compute_spot_bump(spec.underlying);
        let up = pricer(&spec.with_underlying(spec.underlying + h))?;
        let down = pricer(&spec.with_underlying(spec.underlying - h))?;
        Ok((up - down) / (2.0 * h))
    }

    /// Gamma by second difference in the underlying.
    pub fn gamma<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let base = pricer(spec)?;
        self.gamma_from_base(pricer, spec, base)
    }

    /// Vega per volatility point.
    pub fn vega<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let dv = self.config.vol_bump_absolute;
        let up = pricer(&spec.with_volatility(spec.volatility + dv))?;
        let slope = if spec.volatility - dv > 0.0 {
            let down = pricer(&spec.with_volatility(spec.volatility - dv))?;
            (up - down) / (2.0 * dv)
        } else {
            (up - pricer(spec)?) / dv
        };
        Ok(slope * PER_POINT)
    }

    /// Rho per rate point.
    pub fn rho<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let dr = self.config.rate_bump_absolute;
        let up = pricer(&spec.with_rate(spec.rate + dr))?;
        let down = pricer(&spec.with_rate(spec.rate - dr))?;
        Ok((up - down) / (2.0 * dr) * PER_POINT)
    }

    /// Theta per calendar day, positive when value grows as expiry nears.
    pub fn theta<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let dt = self.config.time_bump_years;
        let t = spec.expiry;
        let later = t + dt;
        let earlier = (t - dt).max(self.config.min_expiry.min(t));
        let far = pricer(&spec.with_expiry(later))?;
        let near = pricer(&spec.with_expiry(earlier))?;
        Ok(-(far - near) / (later - earlier) / DAYS_PER_YEAR)
    }

    /// All five Greeks, sharing the unbumped valuation.
    pub fn all<F>(&self, pricer: &F, spec: &OptionSpec) -> Result<Greeks, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        check(spec)?;
        let base = pricer(spec)?;
        Ok(Greeks {
            delta: self.delta(pricer, spec)?,
            gamma: self.gamma_from_base(pricer, spec, base)?,
            theta: self.theta(pricer, spec)?,
            vega: self.vega(pricer, spec)?,
            rho: self.rho(pricer, spec)?,
        })
    }

    fn gamma_from_base<F>(
        &self,
        pricer: &F,
        spec: &OptionSpec,
        base: f64,
    ) -> Result<f64, AnalyticalError>
    where
        F: Fn(&OptionSpec) -> Result<f64, AnalyticalError>,
    {
        let h = self.config.compute_spot_bump(spec.underlying);
        let up = pricer(&spec.with_underlying(spec.underlying + h))?;
        let down = pricer(&spec.with_underlying(spec.underlying - h))?;
        Ok((up - 2.0 * base + down) / (h * h))
    }
}

/// Validates `spec` and rejects zero expiry or volatility.
pub(crate) fn check(spec: &OptionSpec) -> Result<(), AnalyticalError> {
    spec.validate()?;
    if spec.is_degenerate() {
        return Err(AnalyticalError::DegenerateGreeks {
            expiry: spec.expiry,
            volatility: spec.volatility,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vollib_core::types::{OptionType, PricingError};

    /// Undiscounted forward contract: value F − K, delta 1, gamma 0.
    fn forward_contract(spec: &OptionSpec) -> Result<f64, AnalyticalError> {
        Ok(spec.underlying - spec.strike)
    }

    /// Zero-coupon bond paying the strike: value K·e^{−rt}.
    fn bond(spec: &OptionSpec) -> Result<f64, AnalyticalError> {
        Ok(spec.strike * (-spec.rate * spec.expiry).exp())
    }

    fn spec() -> OptionSpec {
        OptionSpec::new(OptionType::Call, 100.0, 90.0, 1.0, 0.05, 0.2)
    }

    fn engine() -> NumericalGreeks {
        NumericalGreeks::default()
    }

    #[test]
    fn test_linear_payoff_delta_and_gamma() {
        let greeks = engine().all(&forward_contract, &spec()).unwrap();
        assert_relative_eq!(greeks.delta, 1.0, epsilon = 1e-9);
        assert!(greeks.gamma.abs() < 1e-6);
        assert_eq!(greeks.vega, 0.0);
        assert_eq!(greeks.theta, 0.0);
    }

    #[test]
    fn test_bond_rho_and_theta() {
        let s = spec();
        let value = bond(&s).unwrap();
        let rho = engine().rho(&bond, &s).unwrap();
        let theta = engine().theta(&bond, &s).unwrap();
        // ∂/∂r = −t·B; −∂/∂t = r·B
        assert_relative_eq!(rho, -s.expiry * value * PER_POINT, epsilon = 1e-4);
        assert_relative_eq!(theta, s.rate * value / DAYS_PER_YEAR, epsilon = 1e-8);
    }

    #[test]
    fn test_vega_switches_to_forward_difference() {
        // Value linear in σ; both schemes are exact
        let linear = |s: &OptionSpec| Ok(3.0 * s.volatility);
        let low_vol = spec().with_volatility(0.005);
        assert_relative_eq!(engine().vega(&linear, &low_vol).unwrap(), 0.03, epsilon = 1e-12);
        assert_relative_eq!(engine().vega(&linear, &spec()).unwrap(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_theta_near_expiry_stays_positive_time() {
        let seen_min = std::cell::Cell::new(f64::INFINITY);
        let recorder = |s: &OptionSpec| {
            seen_min.set(seen_min.get().min(s.expiry));
            Ok(s.expiry)
        };
        let short = spec().with_expiry(1e-3);
        let theta = engine().theta(&recorder, &short).unwrap();
        assert_eq!(seen_min.get(), engine().config().min_expiry);
        assert_relative_eq!(theta, -1.0 / DAYS_PER_YEAR, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        for s in [spec().with_expiry(0.0), spec().with_volatility(0.0)] {
            assert!(matches!(
                engine().all(&forward_contract, &s),
                Err(AnalyticalError::DegenerateGreeks { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let result = engine().delta(&forward_contract, &spec().with_strike(-1.0));
        assert_eq!(
            result,
            Err(AnalyticalError::Input(PricingError::InvalidStrike {
                strike: -1.0
            }))
        );
    }

    #[test]
    fn test_pricer_errors_propagate() {
        let failing = |_: &OptionSpec| {
            Err(AnalyticalError::NumericalInstability {
                message: "boom".to_string(),
            })
        };
        assert!(matches!(
            engine().gamma(&failing, &spec()),
            Err(AnalyticalError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GreeksConfig {
            vol_bump_absolute: 0.0,
            ..GreeksConfig::default()
        };
        assert!(NumericalGreeks::new(config).is_err());
    }
}
