//! Newton-Raphson root-finding solver.

use super::config::constant;
use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. However, it may
/// fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The function has discontinuities
///
/// Callers that need a guaranteed answer pair it with [`BrentSolver`]
/// as a fallback.
///
/// [`BrentSolver`]: super::BrentSolver
///
/// # Example
///
/// ```
/// use vollib_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find root of
    /// * `f_prime` - Derivative of f
    /// * `x0` - Initial guess
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Iterate became non-finite
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;
        let epsilon = constant::<T>(1e-30);

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);
            if !f_val.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "objective is not finite at x = {}",
                    x.to_f64().unwrap_or(f64::NAN)
                )));
            }

            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.is_nan() || f_prime_val.abs() < epsilon {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            #[allow(clippy::assign_op_pattern)]
            {
                x = x - f_val / f_prime_val;
            }

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let root = solver
            .find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0)
            .unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_find_cubic_root() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let f = |x: f64| x * x * x - x - 2.0;
        let root = solver.find_root(f, |x: f64| 3.0 * x * x - 1.0, 1.5).unwrap();
        assert!(f(root).abs() < 1e-10);
    }

    #[test]
    fn test_find_exp_root() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let root = solver
            .find_root(|x: f64| x.exp() - 2.0, |x: f64| x.exp(), 0.0)
            .unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_derivative_near_zero() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        // f'(0) = 0 for f(x) = x² + 1
        match solver.find_root(|x: f64| x * x + 1.0, |x: f64| 2.0 * x, 0.0) {
            Err(SolverError::DerivativeNearZero { x }) => assert_eq!(x, 0.0),
            other => panic!("Expected DerivativeNearZero, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_derivative_is_rejected() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let result = solver.find_root(|x: f64| x - 1.0, |_| f64::NAN, 0.0);
        assert!(matches!(result, Err(SolverError::DerivativeNearZero { .. })));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        // x² + 1 has no real root; Newton wanders forever
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 5).unwrap());
        match solver.find_root(|x: f64| x * x + 1.0, |x: f64| 2.0 * x, 0.5) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 5),
            other => panic!("Expected MaxIterationsExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_and_accessor() {
        let solver: NewtonRaphsonSolver<f64> = NewtonRaphsonSolver::new(SolverConfig::default());
        assert_eq!(solver.config().max_iterations, 100);
        let root = solver.find_root(|x: f64| x - 1.0, |_| 1.0, 0.0).unwrap();
        assert!((root - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_with_f32() {
        let solver: NewtonRaphsonSolver<f32> = NewtonRaphsonSolver::new(SolverConfig::fast());
        let root = solver
            .find_root(|x: f32| x * x - 2.0, |x: f32| 2.0 * x, 1.0_f32)
            .unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
