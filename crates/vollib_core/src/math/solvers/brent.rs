//! Brent's method root-finding solver.

use super::config::constant;
use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Algorithm
///
/// Each iteration keeps `b` as the best estimate and `c` as the
/// contrapoint with `f(b)·f(c) ≤ 0`. An interpolated step is accepted only
/// when it stays well inside the bracket and shrinks faster than the step
/// before last; otherwise the solver bisects.
///
/// # Example
///
/// ```
/// use vollib_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    /// Either endpoint order is accepted.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket has
    ///   collapsed below `tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned NaN or infinity
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    ///
    /// # Example
    ///
    /// ```
    /// use vollib_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let one = T::one();
        let two = constant::<T>(2.0);
        let three = constant::<T>(3.0);
        let tol = self.config.tolerance;

        let eval = |x: T| -> Result<T, SolverError> {
            let y = f(x);
            if y.is_finite() {
                Ok(y)
            } else {
                Err(SolverError::NumericalInstability(format!(
                    "objective is not finite at x = {}",
                    x.to_f64().unwrap_or(f64::NAN)
                )))
            }
        };

        let mut a = a;
        let mut b = b;
        let mut fa = eval(a)?;
        let mut fb = eval(b)?;

        if fa == zero {
            return Ok(a);
        }
        if fb == zero {
            return Ok(b);
        }
        if (fa > zero) == (fb > zero) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            // Re-establish the contrapoint on the opposite side of b
            if (fb > zero) == (fc > zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b must be the better estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let m = (c - b) / two;
            if m.abs() <= tol || fb.abs() < tol {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant
                    (two * m * s, one - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - one)),
                        (q - one) * (r - one) * (s - one),
                    )
                };
                if p > zero {
                    q = -q;
                }
                p = p.abs();

                let bound = (three * m * q - (tol * q).abs()).min((e * q).abs());
                if two * p < bound {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = m;
                }
            } else {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if m > zero {
                b + tol
            } else {
                b - tol
            };
            fb = eval(b)?;
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
