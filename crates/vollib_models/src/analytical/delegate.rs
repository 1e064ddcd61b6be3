//! Undiscounted Black-76 kernel and the implied-volatility boundary.
//!
//! Every pricing convention in this crate reduces to the undiscounted Black
//! formula on a forward. The two operations that touch that formula directly,
//! pricing and inversion, sit behind the [`BlackDelegate`] trait so that a
//! dedicated implied-volatility routine can be plugged in without touching
//! the conventions.
//!
//! The inversion contract signals out-of-range prices with sentinel floats
//! rather than errors:
//!
//! | Return | Meaning |
//! |--------|---------|
//! | [`FLOAT_MAX`] | price at or above the maximum (F for calls, K for puts) |
//! | [`MINUS_FLOAT_MAX`] | price below intrinsic value |
//! | `NaN` | inversion did not converge |
//!
//! [`crate::implied::interpret`] turns these into [`AnalyticalError`] values.
//!
//! [`AnalyticalError`]: super::AnalyticalError

use tracing::{trace, warn};
use vollib_core::math::distributions::{norm_cdf, norm_pdf};
use vollib_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use vollib_core::types::OptionType;

/// Sentinel returned when the price is at or above its maximum.
pub const FLOAT_MAX: f64 = f64::MAX;

/// Sentinel returned when the price is below intrinsic value.
pub const MINUS_FLOAT_MAX: f64 = -f64::MAX;

/// Maximum number of doublings when searching for an upper volatility bound.
const MAX_BRACKET_DOUBLINGS: usize = 64;

/// Pricing and inversion of the undiscounted Black-76 formula.
///
/// `theta` is the flag sign: `+1.0` for calls, `-1.0` for puts.
///
/// # Examples
/// ```
/// use vollib_models::analytical::{BlackDelegate, ClosedFormDelegate};
///
/// let delegate = ClosedFormDelegate::default();
/// let price = delegate.black(100.0, 100.0, 0.2, 0.5, 1.0);
/// assert!((price - 5.637197779701664).abs() < 1e-12);
///
/// let sigma = delegate.implied_volatility(price, 100.0, 100.0, 0.5, 1.0);
/// assert!((sigma - 0.2).abs() < 1e-10);
/// ```
pub trait BlackDelegate: Send + Sync {
    /// Undiscounted Black price of an option on `forward`.
    fn black(&self, forward: f64, strike: f64, sigma: f64, t: f64, theta: f64) -> f64;

    /// Volatility reproducing the undiscounted `price`, or a sentinel.
    fn implied_volatility(
        &self,
        price: f64,
        forward: f64,
        strike: f64,
        t: f64,
        theta: f64,
    ) -> f64;

    /// Normalised Black price with log-moneyness `x = ln(F/K)` and total
    /// standard deviation `s = σ√t`.
    ///
    /// Equal to the Black price at `F = e^{x/2}`, `K = e^{-x/2}`, `t = 1`,
    /// i.e. the price divided by `√(FK)`. Puts and calls at the same `x`
    /// carry identical time value.
    fn normalised_black(&self, x: f64, s: f64, theta: f64) -> f64 {
        self.black((0.5 * x).exp(), (-0.5 * x).exp(), s, 1.0, theta)
    }

    /// Inverse of [`BlackDelegate::normalised_black`] in `s`.
    fn normalised_implied_volatility(&self, beta: f64, x: f64, theta: f64) -> f64 {
        self.implied_volatility(beta, (0.5 * x).exp(), (-0.5 * x).exp(), 1.0, theta)
    }
}

/// Default delegate: closed-form Black-76 pricing and a safeguarded
/// root-finding inversion.
///
/// Inversion runs Newton-Raphson on the out-of-the-money time value, using
/// the analytic vega and starting from the inflection point
/// `σ* = √(2|ln(F/K)|/t)` where Newton converges monotonically. If Newton
/// stalls, Brent's method is run on a bracket grown by doubling.
///
/// The solver configuration bounds each of the two stages; a small
/// `max_iterations` trades accuracy for latency.
///
/// # Examples
/// ```
/// use vollib_core::math::solvers::SolverConfig;
/// use vollib_models::analytical::{BlackDelegate, ClosedFormDelegate, FLOAT_MAX};
///
/// let delegate = ClosedFormDelegate::with_config(SolverConfig::fast());
/// assert_eq!(delegate.implied_volatility(120.0, 100.0, 90.0, 1.0, 1.0), FLOAT_MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosedFormDelegate {
    config: SolverConfig<f64>,
}

impl ClosedFormDelegate {
    /// Delegate with the default solver configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate with a custom solver configuration.
    pub fn with_config(config: SolverConfig<f64>) -> Self {
        Self { config }
    }

    /// Solver configuration used for inversion.
    pub fn config(&self) -> &SolverConfig<f64> {
        &self.config
    }

    /// Solves for σ given an out-of-the-money time value `price > 0`.
    fn invert_time_value(
        &self,
        price: f64,
        forward: f64,
        strike: f64,
        t: f64,
        theta: f64,
    ) -> f64 {
        let objective = |sigma: f64| otm_black(forward, strike, sigma, t, theta) / price - 1.0;
        let slope = |sigma: f64| black_vega(forward, strike, sigma, t) / price;

        let inflection = (2.0 * (forward / strike).ln().abs() / t).sqrt();
        let start = inflection.max(1e-6);

        let newton = NewtonRaphsonSolver::new(self.config);
        match newton.find_root(objective, slope, start) {
            Ok(sigma) if sigma >= 0.0 => return sigma,
            Ok(sigma) => trace!(sigma, "Newton converged to a negative volatility"),
            Err(err) => {
                trace!(%err, price, forward, strike, t, "Newton failed, falling back to Brent")
            }
        }

        let mut upper = start.max(1.0);
        let mut doublings = 0;
        while objective(upper) < 0.0 && doublings < MAX_BRACKET_DOUBLINGS {
            upper *= 2.0;
            doublings += 1;
        }

        let brent = BrentSolver::new(self.config);
        match brent.find_root(objective, 0.0, upper) {
            Ok(sigma) => sigma,
            Err(err) => {
                warn!(%err, price, forward, strike, t, "implied volatility did not converge");
                f64::NAN
            }
        }
    }
}

impl BlackDelegate for ClosedFormDelegate {
    fn black(&self, forward: f64, strike: f64, sigma: f64, t: f64, theta: f64) -> f64 {
        let intrinsic = (theta * (forward - strike)).max(0.0);
        // In the money: price the opposite option and add intrinsic value
        let otm_theta = if theta * (forward - strike) > 0.0 {
            -theta
        } else {
            theta
        };
        intrinsic + otm_black(forward, strike, sigma, t, otm_theta)
    }

    fn implied_volatility(
        &self,
        price: f64,
        forward: f64,
        strike: f64,
        t: f64,
        theta: f64,
    ) -> f64 {
        if !(price.is_finite() && forward > 0.0 && strike > 0.0 && t.is_finite() && t >= 0.0) {
            return f64::NAN;
        }

        let intrinsic = (theta * (forward - strike)).max(0.0);
        let maximum = if theta > 0.0 { forward } else { strike };

        if price >= maximum {
            return FLOAT_MAX;
        }
        if price < intrinsic {
            return MINUS_FLOAT_MAX;
        }
        if price == intrinsic {
            return 0.0;
        }
        if t == 0.0 {
            // No volatility produces time value with zero time left
            return FLOAT_MAX;
        }

        let (time_value, otm_theta) = if theta * (forward - strike) > 0.0 {
            (price - intrinsic, -theta)
        } else {
            (price, theta)
        };
        self.invert_time_value(time_value, forward, strike, t, otm_theta)
    }
}

/// Black price of an option that is at or out of the money for `theta`,
/// floored at zero. Returns zero when `σ√t` is not positive.
fn otm_black(forward: f64, strike: f64, sigma: f64, t: f64, theta: f64) -> f64 {
    let stddev = sigma * t.sqrt();
    if stddev.is_nan() || stddev <= 0.0 {
        return (theta * (forward - strike)).max(0.0);
    }
    let d1 = (forward / strike).ln() / stddev + 0.5 * stddev;
    let d2 = d1 - stddev;
    let value = theta * (forward * norm_cdf(theta * d1) - strike * norm_cdf(theta * d2));
    value.max(0.0)
}

/// Undiscounted vega `∂B/∂σ = F·φ(d1)·√t`; zero when `σ√t` is not positive.
pub(crate) fn black_vega(forward: f64, strike: f64, sigma: f64, t: f64) -> f64 {
    let sqrt_t = t.sqrt();
    let stddev = sigma * sqrt_t;
    if stddev.is_nan() || stddev <= 0.0 {
        return 0.0;
    }
    let d1 = (forward / strike).ln() / stddev + 0.5 * stddev;
    forward * norm_pdf(d1) * sqrt_t
}

/// Undiscounted Black price through the default delegate.
///
/// # Examples
/// ```
/// use vollib_core::types::OptionType;
/// use vollib_models::analytical::undiscounted_black;
///
/// let price = undiscounted_black(OptionType::Call, 100.0, 100.0, 0.2, 0.5);
/// assert!((price - 5.637197779701664).abs() < 1e-12);
/// ```
pub fn undiscounted_black(
    flag: OptionType,
    forward: f64,
    strike: f64,
    sigma: f64,
    t: f64,
) -> f64 {
    ClosedFormDelegate::default().black(forward, strike, sigma, t, flag.sign())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // Pricing
    // ==========================================================

    #[test]
    fn test_black_reference_value() {
        let delegate = ClosedFormDelegate::new();
        assert_relative_eq!(
            delegate.black(100.0, 100.0, 0.2, 0.5, 1.0),
            5.637197779701664,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_black_put_call_parity() {
        let delegate = ClosedFormDelegate::new();
        for &(f, k) in &[(100.0, 80.0), (100.0, 100.0), (100.0, 130.0)] {
            let call = delegate.black(f, k, 0.3, 1.2, 1.0);
            let put = delegate.black(f, k, 0.3, 1.2, -1.0);
            assert_relative_eq!(call - put, f - k, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_black_zero_stddev_returns_intrinsic() {
        let delegate = ClosedFormDelegate::new();
        assert_eq!(delegate.black(110.0, 100.0, 0.0, 1.0, 1.0), 10.0);
        assert_eq!(delegate.black(110.0, 100.0, 0.2, 0.0, -1.0), 0.0);
        assert_eq!(delegate.black(90.0, 100.0, 0.2, 0.0, -1.0), 10.0);
    }

    #[test]
    fn test_black_never_below_intrinsic() {
        let delegate = ClosedFormDelegate::new();
        for sigma in [1e-12, 1e-8, 1e-4, 0.01] {
            assert!(delegate.black(150.0, 100.0, sigma, 1.0, 1.0) >= 50.0);
            assert!(delegate.black(150.0, 100.0, sigma, 1.0, -1.0) >= 0.0);
        }
    }

    #[test]
    fn test_normalised_black_reference_values() {
        let delegate = ClosedFormDelegate::new();
        let x = (100.0_f64 / 95.0).ln();
        let s = 0.3 * 0.5_f64.sqrt();
        assert_relative_eq!(
            delegate.normalised_black(x, s, -1.0),
            0.061296663817558904,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            delegate.normalised_black(x, s, 1.0),
            0.11259558142181655,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_undiscounted_black_uses_flag_sign() {
        let call = undiscounted_black(OptionType::Call, 100.0, 90.0, 0.25, 1.0);
        let put = undiscounted_black(OptionType::Put, 100.0, 90.0, 0.25, 1.0);
        assert_relative_eq!(call - put, 10.0, epsilon = 1e-12);
    }

    // ==========================================================
    // Inversion
    // ==========================================================

    #[test]
    fn test_implied_volatility_round_trip() {
        let delegate = ClosedFormDelegate::new();
        for &theta in &[1.0, -1.0] {
            for &k in &[80.0, 95.0, 100.0, 105.0, 125.0] {
                for &sigma in &[0.1, 0.2, 0.8, 2.0] {
                    let price = delegate.black(100.0, k, sigma, 0.75, theta);
                    let implied = delegate.implied_volatility(price, 100.0, k, 0.75, theta);
                    assert_relative_eq!(implied, sigma, epsilon = 1e-7);
                }
            }
        }
    }

    #[test]
    fn test_normalised_implied_volatility_reference_values() {
        let delegate = ClosedFormDelegate::new();
        let beta_call = delegate.normalised_black(0.0, 0.2, 1.0);
        let beta_put = delegate.normalised_black(0.1, 0.23232323888, -1.0);
        assert_relative_eq!(beta_call, 0.0796556745541, epsilon = 1e-10);
        assert_relative_eq!(beta_put, 0.0509710222785, epsilon = 1e-10);
        assert_relative_eq!(
            delegate.normalised_implied_volatility(beta_call, 0.0, 1.0),
            0.2,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            delegate.normalised_implied_volatility(beta_put, 0.1, -1.0),
            0.23232323888,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sentinels() {
        let delegate = ClosedFormDelegate::new();
        // Call worth more than the forward
        assert_eq!(delegate.implied_volatility(100.0, 100.0, 90.0, 1.0, 1.0), FLOAT_MAX);
        // Put worth more than the strike
        assert_eq!(delegate.implied_volatility(95.0, 100.0, 90.0, 1.0, -1.0), FLOAT_MAX);
        // Call below intrinsic value of 10
        assert_eq!(
            delegate.implied_volatility(9.0, 100.0, 90.0, 1.0, 1.0),
            MINUS_FLOAT_MAX
        );
        // Exactly intrinsic
        assert_eq!(delegate.implied_volatility(10.0, 100.0, 90.0, 1.0, 1.0), 0.0);
        // Time value with no time left
        assert_eq!(delegate.implied_volatility(1.0, 100.0, 100.0, 0.0, 1.0), FLOAT_MAX);
    }

    #[test]
    fn test_invalid_inputs_give_nan() {
        let delegate = ClosedFormDelegate::new();
        assert!(delegate
            .implied_volatility(f64::NAN, 100.0, 100.0, 1.0, 1.0)
            .is_nan());
        assert!(delegate
            .implied_volatility(5.0, -100.0, 100.0, 1.0, 1.0)
            .is_nan());
    }

    #[test]
    fn test_brent_fallback_with_starved_newton() {
        // One Newton step cannot reach 1e-10; Brent then also has one step,
        // so the inversion reports non-convergence
        let config = SolverConfig::new(1e-10, 1).unwrap();
        let delegate = ClosedFormDelegate::with_config(config);
        let price = delegate.black(100.0, 130.0, 0.35, 1.0, 1.0);
        assert!(delegate.implied_volatility(price, 100.0, 130.0, 1.0, 1.0).is_nan());

        // A modest budget is enough
        let delegate = ClosedFormDelegate::with_config(config.with_max_iterations(50));
        let sigma = delegate.implied_volatility(price, 100.0, 130.0, 1.0, 1.0);
        assert_relative_eq!(sigma, 0.35, epsilon = 1e-8);
    }

    #[test]
    fn test_black_vega_matches_finite_difference() {
        let h = 1e-6;
        let numerical = (ClosedFormDelegate::new().black(100.0, 105.0, 0.2 + h, 0.5, 1.0)
            - ClosedFormDelegate::new().black(100.0, 105.0, 0.2 - h, 0.5, 1.0))
            / (2.0 * h);
        assert_relative_eq!(black_vega(100.0, 105.0, 0.2, 0.5), numerical, epsilon = 1e-6);
        assert_eq!(black_vega(100.0, 105.0, 0.0, 0.5), 0.0);
    }
}
