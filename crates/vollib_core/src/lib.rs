//! # vollib_core: Numerical Foundation for Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! vollib_core is the bottom layer of the workspace, providing:
//! - Standard and bivariate normal distribution functions (`math::distributions`)
//! - Root-finding solvers: Brent and Newton-Raphson (`math::solvers`)
//! - Option value types: `OptionType`, `OptionSpec` (`types::option`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other vollib_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - libm: Double-precision complementary error function
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use vollib_core::math::distributions::{bivariate_norm_cdf, norm_cdf};
//! use vollib_core::types::{OptionSpec, OptionType};
//!
//! // Independence: the bivariate CDF factorises when ρ = 0
//! let joint = bivariate_norm_cdf(0.3, -0.2, 0.0).unwrap();
//! assert!((joint - norm_cdf(0.3) * norm_cdf(-0.2)).abs() < 1e-12);
//!
//! // Option inputs are validated once and then passed around by value
//! let spec = OptionSpec::new(OptionType::Call, 100.0, 95.0, 0.5, 0.02, 0.2);
//! assert!(spec.validate().is_ok());
//! assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionType` and `OptionSpec`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
