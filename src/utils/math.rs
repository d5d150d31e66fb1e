use std::f64::consts::{PI, SQRT_2};

/// `ln(sqrt(2π))`, the normalizing constant of the standard normal density.
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Past this z-score `erfc` underflows, so the log upper tail switches to
/// its asymptotic expansion.
const TAIL_ASYMPTOTIC_Z: f64 = 37.0;

/// Log-density of `N(mu, sigma²)` at `x`.
///
/// Returns `-inf` for a non-positive or non-finite `sigma`.
#[inline]
pub fn normal_log_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return f64::NEG_INFINITY;
    }
    let z = (x - mu) / sigma;
    -LN_SQRT_2PI - sigma.ln() - 0.5 * z * z
}

/// Log of the standard normal upper tail, `ln P(Z >= z)`.
///
/// Evaluated in log space throughout: the lower half uses `ln_1p` on the
/// complementary tail, the upper half `erfc` (which keeps relative
/// precision in the tail), and the far tail the asymptotic series
/// `φ(z)/z · (1 - 1/z² + 3/z⁴)`.
pub fn normal_log_sf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z < 0.0 {
        (-0.5 * libm::erfc(-z / SQRT_2)).ln_1p()
    } else if z < TAIL_ASYMPTOTIC_Z {
        (0.5 * libm::erfc(z / SQRT_2)).ln()
    } else if z.is_infinite() {
        f64::NEG_INFINITY
    } else {
        let z2 = z * z;
        -0.5 * z2 - z.ln() - 0.5 * (2.0 * PI).ln() + (-1.0 / z2 + 3.0 / (z2 * z2)).ln_1p()
    }
}
