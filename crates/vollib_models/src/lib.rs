//! # Vollib Models
//!
//! Closed-form European option pricing under the Black, Black-Scholes and
//! Black-Scholes-Merton conventions, with analytical Greeks, a
//! finite-difference Greeks engine to cross-check them, and implied
//! volatility.
//!
//! This crate provides:
//! - [`analytical`]: pricing, closed-form Greeks, implied volatility and the
//!   [`BlackDelegate`](analytical::BlackDelegate) boundary
//! - [`greeks`]: the [`Greeks`](greeks::Greeks) result type and the
//!   bump-and-revalue engine
//! - [`implied`]: interpretation of the delegate's sentinel returns
//! - [`batch`]: parallel evaluation over slices
//!
//! ## Design Principles
//!
//! - **Pure functions over `f64`**: no caching, no shared mutable state
//! - **One kernel**: every convention reduces to the undiscounted Black price
//!   of a forward
//! - **Errors, not NaN**: invalid inputs and degenerate Greeks are reported
//!   through [`AnalyticalError`](analytical::AnalyticalError)
//!
//! ## Example
//!
//! ```rust
//! use vollib_core::types::OptionType;
//! use vollib_models::analytical::black_scholes_merton;
//!
//! let put = black_scholes_merton::price(OptionType::Put, 100.0, 95.0, 0.5, 0.1, 0.2, 0.05).unwrap();
//! let greeks = black_scholes_merton::greeks(OptionType::Put, 100.0, 95.0, 0.5, 0.1, 0.2, 0.05).unwrap();
//! assert!(put > 0.0 && greeks.delta < 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod batch;
pub mod greeks;
pub mod implied;
