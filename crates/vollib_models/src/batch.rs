//! Parallel evaluation over slices of options.
//!
//! Each element is priced independently with rayon and the output keeps the
//! input order. One failing element does not affect the others: every slot
//! carries its own `Result`. Results are identical to evaluating the scalar
//! API in a loop.
//!
//! # Example
//!
//! ```rust
//! use vollib_core::types::{OptionSpec, OptionType};
//! use vollib_models::analytical::PricingConvention;
//! use vollib_models::batch;
//!
//! let specs: Vec<OptionSpec> = (1..=5)
//!     .map(|i| OptionSpec::new(OptionType::Call, 100.0, 80.0 + 10.0 * i as f64, 1.0, 0.02, 0.25))
//!     .collect();
//!
//! let prices = batch::price(PricingConvention::BlackScholes, &specs);
//! assert_eq!(prices.len(), 5);
//! assert!(prices.windows(2).all(|w| w[0].as_ref().unwrap() > w[1].as_ref().unwrap()));
//! ```

use rayon::prelude::*;
use tracing::debug;
use vollib_core::types::OptionSpec;

use crate::analytical::{AnalyticalError, PricingConvention};
use crate::greeks::Greeks;

/// Minimum elements per rayon task.
const MIN_CHUNK_LEN: usize = 64;

/// Discounted prices, one per spec.
pub fn price(
    convention: PricingConvention,
    specs: &[OptionSpec],
) -> Vec<Result<f64, AnalyticalError>> {
    debug!(%convention, count = specs.len(), "batch price");
    specs
        .par_iter()
        .with_min_len(MIN_CHUNK_LEN)
        .map(|spec| convention.price(spec))
        .collect()
}

/// Closed-form Greeks, one per spec.
pub fn analytical_greeks(
    convention: PricingConvention,
    specs: &[OptionSpec],
) -> Vec<Result<Greeks, AnalyticalError>> {
    debug!(%convention, count = specs.len(), "batch greeks");
    specs
        .par_iter()
        .with_min_len(MIN_CHUNK_LEN)
        .map(|spec| convention.analytical_greeks(spec))
        .collect()
}

/// Implied volatilities for `(price, spec)` quotes; each spec's volatility
/// is ignored.
pub fn implied_volatility(
    convention: PricingConvention,
    quotes: &[(f64, OptionSpec)],
) -> Vec<Result<f64, AnalyticalError>> {
    debug!(%convention, count = quotes.len(), "batch implied volatility");
    let results: Vec<_> = quotes
        .par_iter()
        .with_min_len(MIN_CHUNK_LEN)
        .map(|(price, spec)| convention.implied_volatility(*price, spec))
        .collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        debug!(%convention, failed, "batch implied volatility had failures");
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use vollib_core::types::OptionType;

    fn grid() -> Vec<OptionSpec> {
        let mut specs = Vec::new();
        for i in 0..200 {
            let flag = if i % 2 == 0 {
                OptionType::Call
            } else {
                OptionType::Put
            };
            let strike = 60.0 + i as f64 * 0.4;
            let t = 0.1 + (i % 7) as f64 * 0.3;
            specs.push(OptionSpec::new(flag, 100.0, strike, t, 0.03, 0.2 + (i % 5) as f64 * 0.05));
        }
        specs
    }

    #[test]
    fn test_batch_price_matches_scalar() {
        let specs = grid();
        for convention in PricingConvention::ALL {
            let batch = price(convention, &specs);
            assert_eq!(batch.len(), specs.len());
            for (spec, result) in specs.iter().zip(&batch) {
                assert_eq!(*result, convention.price(spec));
            }
        }
    }

    #[test]
    fn test_batch_greeks_matches_scalar() {
        let specs = grid();
        let batch = analytical_greeks(PricingConvention::BlackScholesMerton, &specs);
        for (spec, result) in specs.iter().zip(&batch) {
            assert_eq!(
                *result,
                PricingConvention::BlackScholesMerton.analytical_greeks(spec)
            );
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut specs = grid();
        specs[3] = specs[3].with_strike(-1.0);
        specs[10] = specs[10].with_expiry(0.0);
        let greeks = analytical_greeks(PricingConvention::Black, &specs);
        assert!(matches!(greeks[3], Err(AnalyticalError::Input(_))));
        assert!(matches!(
            greeks[10],
            Err(AnalyticalError::DegenerateGreeks { .. })
        ));
        assert!(greeks[4].is_ok());
    }

    #[test]
    fn test_batch_implied_volatility_round_trip() {
        // Keep strikes within three standard deviations of the forward
        let specs: Vec<OptionSpec> = grid()
            .into_iter()
            .filter(|s| {
                let stddev = s.volatility * s.expiry.sqrt();
                (s.underlying / s.strike).ln().abs() < 3.0 * stddev
            })
            .collect();
        assert!(specs.len() > 50);
        let quotes: Vec<(f64, OptionSpec)> = specs
            .iter()
            .map(|s| (PricingConvention::Black.price(s).unwrap(), s.with_volatility(0.0)))
            .collect();
        let vols = implied_volatility(PricingConvention::Black, &quotes);
        for (spec, vol) in specs.iter().zip(vols) {
            let vol = vol.unwrap();
            assert!((vol - spec.volatility).abs() < 1e-6, "{spec:?}: {vol}");
        }
    }

    #[test]
    fn test_empty_slices() {
        assert!(price(PricingConvention::Black, &[]).is_empty());
        assert!(implied_volatility(PricingConvention::Black, &[]).is_empty());
    }
}
