//! Option value types and error types.
//!
//! This module provides:
//! - `option`: Call/put flag and the market inputs of a European option
//! - `error`: Structured error types for input validation and solvers
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionType`], [`OptionSpec`] from `option`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod option;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use option::{OptionSpec, OptionType};
