//! Closed-form pricing, Greeks and implied volatility for European options.
//!
//! Three conventions share one undiscounted Black-76 kernel:
//! - [`black`]: options on forwards and futures
//! - [`black_scholes`]: options on a spot without carry
//! - [`black_scholes_merton`]: options on a spot with continuous dividend yield
//!
//! Each module exposes `price`, the five Greeks, `greeks` and
//! `implied_volatility`, plus `*_with` variants that run against an
//! alternative [`BlackDelegate`]. [`PricingConvention`] selects among them
//! at runtime over an [`OptionSpec`](vollib_core::types::OptionSpec).
//!
//! ## Units
//!
//! Theta is per calendar day, vega and rho per percentage point.

pub mod black;
pub mod black_scholes;
pub mod black_scholes_merton;
pub mod convention;
pub mod delegate;
pub mod error;

// Re-export main types at module level
pub use convention::PricingConvention;
pub use delegate::{
    undiscounted_black, BlackDelegate, ClosedFormDelegate, FLOAT_MAX, MINUS_FLOAT_MAX,
};
pub use error::AnalyticalError;
