//! Greeks: result types, finite-difference engine and its configuration.
//!
//! The closed-form Greeks live next to each pricing convention in
//! [`crate::analytical`]; this module holds what both engines share and the
//! bump-and-revalue engine used to cross-check them.
//!
//! - [`Greeks`]: delta, gamma, theta, vega, rho in market units
//! - [`GreeksConfig`]: bump widths, validated through a builder
//! - [`NumericalGreeks`]: finite differences over any pricing function

pub mod config;
pub mod numerical;
pub mod result;

pub use config::{GreeksConfig, GreeksConfigBuilder, GreeksConfigError};
pub use numerical::NumericalGreeks;
pub use result::{Greeks, GreeksVerification};
