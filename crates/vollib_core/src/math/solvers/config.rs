//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;

/// Converts an `f64` literal into `T`, yielding NaN if `T` cannot hold it.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `tolerance` | 1e-10 |
/// | `max_iterations` | 100 |
///
/// # Example
///
/// ```
/// use vollib_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// // Capped iteration budget for latency-sensitive inversion
/// let capped = SolverConfig::new(1e-8, 10).unwrap();
/// assert_eq!(capped.max_iterations, 10);
///
/// assert!(SolverConfig::new(0.0, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance for root finding.
    ///
    /// The solver stops when `|f(x)| < tolerance`, or for bracketing
    /// methods when the bracket half-width falls below it.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: constant(1e-10),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidConfig` if `tolerance` is not a positive finite
    /// number or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants enforced by [`SolverConfig::new`].
    ///
    /// Useful for configurations built with struct literal syntax or
    /// deserialised from external input.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > T::zero() && self.tolerance.is_finite()) {
            return Err(SolverError::InvalidConfig(
                "tolerance must be positive and finite".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with a different iteration cap.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Relaxed settings: tolerance 1e-6, 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: constant(1e-6),
            max_iterations: 50,
        }
    }
}
