//! Root-finding solvers for numerical computation.
//!
//! The pricing layer uses these to invert the Black formula for implied
//! volatility: Newton-Raphson with the analytic vega as derivative, falling
//! back to Brent on a bracket when Newton stalls.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use vollib_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let brent = BrentSolver::new(SolverConfig::default());
//!
//! let a = newton.find_root(f, f_prime, 1.0).unwrap();
//! let b = brent.find_root(f, 0.0, 2.0).unwrap();
//! assert!((a - b).abs() < 1e-9);
//! ```

mod brent;
mod config;
mod newton_raphson;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
