//! Closed-form Greeks against finite differences over a parameter grid.
//!
//! For each convention and flag, the mean absolute deviation between the
//! analytical and numerical engines is taken over a 10×10×10×10 grid of
//! strike, expiry, rate and volatility.

use vollib_core::types::{OptionSpec, OptionType};
use vollib_models::analytical::PricingConvention;
use vollib_models::greeks::{Greeks, GreeksConfig};

const UNDERLYING: f64 = 100.0;
const DIVIDEND_YIELD: f64 = 0.02;

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
        .collect()
}

fn grid(flag: OptionType) -> Vec<OptionSpec> {
    let strikes = linspace(20.0, 200.0, 10);
    let expiries = linspace(0.01, 2.0, 10);
    let rates = linspace(0.0, 0.2, 10);
    let vols = linspace(0.1, 0.5, 10);

    let mut specs = Vec::with_capacity(10_000);
    for &k in &strikes {
        for &t in &expiries {
            for &r in &rates {
                for &sigma in &vols {
                    specs.push(
                        OptionSpec::new(flag, UNDERLYING, k, t, r, sigma)
                            .with_dividend_yield(DIVIDEND_YIELD),
                    );
                }
            }
        }
    }
    specs
}

/// Mean absolute deviation per Greek.
fn mean_abs_deviation(convention: PricingConvention, flag: OptionType) -> Greeks {
    let config = GreeksConfig::default();
    let specs = grid(flag);
    let mut total = Greeks::default();
    for spec in &specs {
        let analytical = convention.analytical_greeks(spec).unwrap();
        let numerical = convention.numerical_greeks(spec, &config).unwrap();
        let diff = analytical.abs_diff(&numerical);
        total.delta += diff.delta;
        total.gamma += diff.gamma;
        total.theta += diff.theta;
        total.vega += diff.vega;
        total.rho += diff.rho;
    }
    let n = specs.len() as f64;
    Greeks {
        delta: total.delta / n,
        gamma: total.gamma / n,
        theta: total.theta / n,
        vega: total.vega / n,
        rho: total.rho / n,
    }
}

fn assert_grid_agreement(convention: PricingConvention) {
    for flag in [OptionType::Call, OptionType::Put] {
        let mad = mean_abs_deviation(convention, flag);
        assert!(mad.is_finite(), "{convention} {flag}: {mad}");
        assert!(mad.delta < 1e-5, "{convention} {flag} delta MAD {}", mad.delta);
        assert!(mad.gamma < 1e-4, "{convention} {flag} gamma MAD {}", mad.gamma);
        assert!(mad.vega < 1e-3, "{convention} {flag} vega MAD {}", mad.vega);
        assert!(mad.rho < 1e-3, "{convention} {flag} rho MAD {}", mad.rho);
        assert!(mad.theta < 1e-2, "{convention} {flag} theta MAD {}", mad.theta);
    }
}

// ============================================================================
// Grid agreement per convention
// ============================================================================

#[test]
fn test_black_grid_agreement() {
    assert_grid_agreement(PricingConvention::Black);
}

#[test]
fn test_black_scholes_grid_agreement() {
    assert_grid_agreement(PricingConvention::BlackScholes);
}

#[test]
fn test_black_scholes_merton_grid_agreement() {
    assert_grid_agreement(PricingConvention::BlackScholesMerton);
}

// ============================================================================
// Pointwise verification
// ============================================================================

#[test]
fn test_verify_greeks_near_the_money() {
    let config = GreeksConfig::default();
    for convention in PricingConvention::ALL {
        for &k in &[90.0, 100.0, 110.0] {
            let spec = OptionSpec::new(OptionType::Put, UNDERLYING, k, 0.75, 0.04, 0.3)
                .with_dividend_yield(DIVIDEND_YIELD);
            let report = convention.verify_greeks(&spec, &config).unwrap();
            assert!(
                report.is_within_tolerance(),
                "{convention} K={k}: {:?}",
                report.failures()
            );
        }
    }
}

#[test]
fn test_verify_greeks_flags_a_coarse_config() {
    // A half-year time bump cannot track theta for a one-month option
    let config = GreeksConfig::builder()
        .time_bump_years(0.5)
        .verification_tolerance(1e-6)
        .build()
        .unwrap();
    let spec = OptionSpec::new(OptionType::Call, UNDERLYING, 100.0, 1.0 / 12.0, 0.05, 0.2);
    let report = PricingConvention::BlackScholes
        .verify_greeks(&spec, &config)
        .unwrap();
    assert!(report.failures().contains(&"theta"));
}
