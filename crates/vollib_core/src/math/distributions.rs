//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function Φ(x)
//! - `norm_pdf`: Probability density function φ(x)
//! - `bivariate_norm_cdf`: Joint CDF Φ₂(x, y; ρ) of two correlated standard normals
//!
//! The univariate CDF is built on the fdlibm-derived `erfc` from `libm`, which
//! is correct to within an ulp or two across the real line.
//!
//! The bivariate CDF follows Genz (2004), "Numerical computation of rectangular
//! bivariate and trivariate normal and t probabilities", itself a refinement of
//! Drezner and Wesolowsky (1990): Gauss-Legendre quadrature whose order is
//! chosen from |ρ|, with an asymptotic expansion for |ρ| ≥ 0.925.

use crate::types::PricingError;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Exponent below which a term is treated as zero.
const EXP_CUTOFF: f64 = -100.0;

/// |ρ| at and above which the asymptotic branch is used.
const HIGH_CORRELATION: f64 = 0.925;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Accuracy
/// Inherits the relative accuracy of `libm::erfc`, close to machine precision
/// across the whole real line, including deep tails.
///
/// # Examples
/// ```
/// use vollib_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96) - 0.9750021048517795).abs() < 1e-12);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1/sqrt(2π)) * exp(-x²/2)
///
/// # Examples
/// ```
/// use vollib_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

// Gauss-Legendre abscissae (negative half) and weights.

const GL6_X: [f64; 3] = [
    -0.932_469_514_203_152_2,
    -0.661_209_386_466_264_7,
    -0.238_619_186_083_197,
];
const GL6_W: [f64; 3] = [
    0.171_324_492_379_170_5,
    0.360_761_573_048_138_4,
    0.467_913_934_572_690_4,
];

const GL12_X: [f64; 6] = [
    -0.981_560_634_246_719_1,
    -0.904_117_256_370_475,
    -0.769_902_674_194_305,
    -0.587_317_954_286_617_1,
    -0.367_831_498_998_180_2,
    -0.125_233_408_511_469_2,
];
const GL12_W: [f64; 6] = [
    0.047_175_336_386_511_77,
    0.106_939_325_995_318_3,
    0.160_078_328_543_346_4,
    0.203_167_426_723_065_9,
    0.233_492_536_538_354_7,
    0.249_147_045_813_402_9,
];

const GL20_X: [f64; 10] = [
    -0.993_128_599_185_094_9,
    -0.963_971_927_277_913_8,
    -0.912_234_428_251_325_9,
    -0.839_116_971_822_218_8,
    -0.746_331_906_460_150_8,
    -0.636_053_680_726_515,
    -0.510_867_001_950_827_1,
    -0.373_706_088_715_419_6,
    -0.227_785_851_141_645_1,
    -0.076_526_521_133_497_33,
];
const GL20_W: [f64; 10] = [
    0.017_614_007_139_152_12,
    0.040_601_429_800_386_94,
    0.062_672_048_334_109_06,
    0.083_276_741_576_704_75,
    0.101_930_119_817_240_4,
    0.118_194_531_961_518_4,
    0.131_688_638_449_176_6,
    0.142_096_109_318_382_1,
    0.149_172_986_472_603_7,
    0.152_753_387_130_725_9,
];

/// Quadrature rule for a given |ρ|: 6, 12 or 20 points, stored as one half
/// of the symmetric node set.
fn gauss_legendre(abs_rho: f64) -> (&'static [f64], &'static [f64]) {
    if abs_rho < 0.3 {
        (&GL6_X, &GL6_W)
    } else if abs_rho < 0.75 {
        (&GL12_X, &GL12_W)
    } else {
        (&GL20_X, &GL20_W)
    }
}

/// Bivariate standard normal cumulative distribution function.
///
/// Computes P(X < x, Y < y) where X and Y are standard normal with
/// correlation `rho`.
///
/// # Algorithm
///
/// - |ρ| < 0.925: the density is integrated along ρ' ∈ [0, ρ] through the
///   substitution ρ' = sin θ and the result added to Φ(x)Φ(y).
/// - |ρ| ≥ 0.925: an asymptotic expansion in √(1 − ρ²) plus a quadrature
///   correction, with one marginal reflected when ρ < 0.
///
/// At ρ = 0 the product Φ(x)Φ(y) is returned exactly. At ρ = ±1 the result
/// is the Fréchet bound Φ(min(x, y)) or max(0, Φ(x) + Φ(y) − 1).
///
/// # Errors
///
/// - `PricingError::NonFiniteInput` if any argument is NaN or infinite
/// - `PricingError::InvalidCorrelation` if |ρ| > 1
///
/// # Examples
/// ```
/// use vollib_core::math::distributions::bivariate_norm_cdf;
///
/// let p = bivariate_norm_cdf(0.0, 0.0, 0.5).unwrap();
/// assert!((p - 1.0 / 3.0).abs() < 1e-12);
///
/// assert!(bivariate_norm_cdf(0.0, 0.0, 1.5).is_err());
/// ```
pub fn bivariate_norm_cdf(x: f64, y: f64, rho: f64) -> Result<f64, PricingError> {
    PricingError::require_finite("x", x)?;
    PricingError::require_finite("y", y)?;
    let rho = PricingError::require_finite("rho", rho)?;
    if rho.abs() > 1.0 {
        return Err(PricingError::InvalidCorrelation { rho });
    }

    if rho == 0.0 {
        return Ok(norm_cdf(x) * norm_cdf(y));
    }

    // Upper-tail form: P(X > h, Y > k) with h = -x, k = -y.
    let h = -x;
    let mut k = -y;
    let mut hk = h * k;
    let (nodes, weights) = gauss_legendre(rho.abs());

    if rho.abs() < HIGH_CORRELATION {
        let hs = (h * h + k * k) / 2.0;
        let asr = rho.asin();
        let mut sum = 0.0;
        for (&node, &weight) in nodes.iter().zip(weights) {
            for side in [-1.0, 1.0] {
                let sn = (asr * (side * node + 1.0) / 2.0).sin();
                sum += weight * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
            }
        }
        return Ok(sum * asr / (4.0 * PI) + norm_cdf(-h) * norm_cdf(-k));
    }

    if rho < 0.0 {
        k = -k;
        hk = -hk;
    }

    let mut bvn = 0.0;
    if rho.abs() < 1.0 {
        let as_ = (1.0 - rho) * (1.0 + rho);
        let mut a = as_.sqrt();
        let bs = (h - k) * (h - k);
        let c = (4.0 - hk) / 8.0;
        let d = (12.0 - hk) / 16.0;

        let asr = -(bs / as_ + hk) / 2.0;
        if asr > EXP_CUTOFF {
            bvn = a
                * asr.exp()
                * (1.0 - c * (bs - as_) * (1.0 - d * bs / 5.0) / 3.0 + c * d * as_ * as_ / 5.0);
        }
        if -hk < -EXP_CUTOFF {
            let b = bs.sqrt();
            bvn -= (-hk / 2.0).exp()
                * SQRT_2PI
                * norm_cdf(-b / a)
                * b
                * (1.0 - c * bs * (1.0 - d * bs / 5.0) / 3.0);
        }

        a /= 2.0;
        for (&node, &weight) in nodes.iter().zip(weights) {
            for side in [-1.0, 1.0] {
                let xs = (a * (side * node + 1.0)).powi(2);
                let rs = (1.0 - xs).sqrt();
                let asr = -(bs / xs + hk) / 2.0;
                if asr > EXP_CUTOFF {
                    bvn += a
                        * weight
                        * asr.exp()
                        * ((-hk * (1.0 - rs) / (2.0 * (1.0 + rs))).exp() / rs
                            - (1.0 + c * xs * (1.0 + d * xs)));
                }
            }
        }
        bvn = -bvn / (2.0 * PI);
    }

    if rho > 0.0 {
        Ok(bvn + norm_cdf(-h.max(k)))
    } else {
        let mut bvn = -bvn;
        if k > h {
            bvn += norm_cdf(k) - norm_cdf(h);
        }
        Ok(bvn)
    }
}
