//! Greeks result types.
//!
//! Provides [`Greeks`], the five first- and second-order sensitivities
//! returned by both the analytical and the numerical engines, and
//! [`GreeksVerification`], the outcome of comparing the two.

use std::fmt;

/// Option sensitivities in market-quoting units.
///
/// # Units
///
/// | Greek | Definition | Unit |
/// |-------|------------|------|
/// | `delta` | ∂V/∂S | per unit of underlying |
/// | `gamma` | ∂²V/∂S² | per unit of underlying squared |
/// | `theta` | −∂V/∂t | per calendar day (annual / 365) |
/// | `vega` | ∂V/∂σ | per volatility point (× 0.01) |
/// | `rho` | ∂V/∂r | per rate point (× 0.01) |
///
/// # Examples
///
/// ```rust
/// use vollib_models::greeks::Greeks;
///
/// let a = Greeks { delta: 0.52, gamma: 0.066, theta: -0.012, vega: 0.121, rho: 0.089 };
/// let b = a.with_delta(0.53);
///
/// let diff = a.abs_diff(&b);
/// assert!((diff.delta - 0.01).abs() < 1e-12);
/// assert!((diff.max_abs() - 0.01).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Delta: ∂V/∂S.
    pub delta: f64,
    /// Gamma: ∂²V/∂S².
    pub gamma: f64,
    /// Theta: −∂V/∂t per calendar day.
    pub theta: f64,
    /// Vega: ∂V/∂σ per volatility point.
    pub vega: f64,
    /// Rho: ∂V/∂r per rate point.
    pub rho: f64,
}

impl Greeks {
    /// Copy with a different delta.
    pub fn with_delta(self, delta: f64) -> Self {
        Self { delta, ..self }
    }

    /// Copy with a different gamma.
    pub fn with_gamma(self, gamma: f64) -> Self {
        Self { gamma, ..self }
    }

    /// Copy with a different theta.
    pub fn with_theta(self, theta: f64) -> Self {
        Self { theta, ..self }
    }

    /// Copy with a different vega.
    pub fn with_vega(self, vega: f64) -> Self {
        Self { vega, ..self }
    }

    /// Copy with a different rho.
    pub fn with_rho(self, rho: f64) -> Self {
        Self { rho, ..self }
    }

    /// Element-wise absolute difference.
    pub fn abs_diff(&self, other: &Greeks) -> Greeks {
        Greeks {
            delta: (self.delta - other.delta).abs(),
            gamma: (self.gamma - other.gamma).abs(),
            theta: (self.theta - other.theta).abs(),
            vega: (self.vega - other.vega).abs(),
            rho: (self.rho - other.rho).abs(),
        }
    }

    /// Largest absolute component. NaN components propagate.
    pub fn max_abs(&self) -> f64 {
        let mut max = 0.0_f64;
        for (_, value) in self.as_array() {
            if value.is_nan() {
                return f64::NAN;
            }
            max = max.max(value.abs());
        }
        max
    }

    /// Named components in the order delta, gamma, theta, vega, rho.
    pub fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("theta", self.theta),
            ("vega", self.vega),
            ("rho", self.rho),
        ]
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|(_, v)| v.is_finite())
    }
}

impl fmt::Display for Greeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delta={:.6} gamma={:.6} theta={:.6} vega={:.6} rho={:.6}",
            self.delta, self.gamma, self.theta, self.vega, self.rho
        )
    }
}

/// Analytical and numerical Greeks side by side.
///
/// Produced by `PricingConvention::verify_greeks`; `deviation` is the
/// element-wise absolute difference of the two sets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksVerification {
    /// Closed-form sensitivities.
    pub analytical: Greeks,
    /// Finite-difference sensitivities.
    pub numerical: Greeks,
    /// `|analytical − numerical|` per Greek.
    pub deviation: Greeks,
    /// Maximum accepted deviation per Greek.
    pub tolerance: f64,
}

impl GreeksVerification {
    /// Builds the comparison and computes the deviation.
    pub fn new(analytical: Greeks, numerical: Greeks, tolerance: f64) -> Self {
        Self {
            analytical,
            numerical,
            deviation: analytical.abs_diff(&numerical),
            tolerance,
        }
    }

    /// True when every Greek deviates by at most `tolerance`.
    pub fn is_within_tolerance(&self) -> bool {
        self.deviation
            .as_array()
            .iter()
            .all(|(_, v)| *v <= self.tolerance)
    }

    /// Names of the Greeks whose deviation exceeds `tolerance`.
    pub fn failures(&self) -> Vec<&'static str> {
        self.deviation
            .as_array()
            .iter()
            .filter(|(_, v)| !(*v <= self.tolerance))
            .map(|(name, _)| *name)
            .collect()
    }
}
