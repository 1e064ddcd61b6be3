//! Mathematical building blocks.
//!
//! - `distributions`: Univariate and bivariate standard normal functions
//! - `solvers`: Newton-Raphson and Brent root finders

pub mod distributions;
pub mod solvers;
