//! Numerically stable special functions: log-gamma, digamma and log-domain helpers.

use std::f64::consts::{LN_2, PI};

const LOG_SQRT_2PI: f64 = 0.918_938_533_204_672_8; // 0.5 * ln(2*pi)
const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)] // These are published numerical constants
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Below this argument digamma is shifted upward with ψ(x) = ψ(x+1) − 1/x.
const DIGAMMA_ASYMPTOTIC_MIN: f64 = 10.0;

/// Natural log of the Gamma function (log |Gamma(z)|).
///
/// Uses a Lanczos approximation with reflection for z < 0.5.
pub fn log_gamma(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return f64::INFINITY;
    }
    if z == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if z <= 0.0 && z == z.round() {
        return f64::NAN;
    }
    if z < 0.5 {
        let sin_pi = (PI * z).sin();
        if sin_pi == 0.0 {
            return f64::NAN;
        }
        return PI.ln() - sin_pi.abs().ln() - log_gamma(1.0 - z);
    }

    let z_minus = z - 1.0;
    let mut x = LANCZOS_COEFFS[0];
    for (i, coeff) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        x += coeff / (z_minus + i as f64);
    }
    let t = z_minus + LANCZOS_G + 0.5;
    LOG_SQRT_2PI + (z_minus + 0.5) * t.ln() - t + x.ln()
}

/// Digamma function ψ(x) = d/dx ln Γ(x).
///
/// Shifts small arguments up with the recurrence, then applies the
/// asymptotic expansion
/// `ln x − 1/(2x) − 1/(12x²) + 1/(120x⁴) − 1/(252x⁶) + 1/(240x⁸) − 1/(132x¹⁰)`.
/// Negative arguments go through the reflection `ψ(1−x) − π·cot(πx)`.
/// Poles (0, −1, −2, …) return NaN.
pub fn digamma(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::NAN;
    }
    if x < 0.0 {
        return digamma(1.0 - x) - PI / (PI * x).tan();
    }

    let mut z = x;
    let mut shift = 0.0;
    while z < DIGAMMA_ASYMPTOTIC_MIN {
        shift -= 1.0 / z;
        z += 1.0;
    }

    let inv = 1.0 / z;
    let inv2 = inv * inv;
    let series = inv2
        * (1.0 / 12.0
            - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))));
    shift + z.ln() - 0.5 * inv - series
}

/// Stable log(1 - exp(a)) for a <= 0.
///
/// Switches between `ln(-expm1(a))` and `ln1p(-exp(a))` at −ln 2
/// (Mächler's split). Returns NaN for a > 0 and −∞ at a = 0.
pub fn log1m_exp(a: f64) -> f64 {
    if a.is_nan() || a > 0.0 {
        return f64::NAN;
    }
    if a == 0.0 {
        return f64::NEG_INFINITY;
    }
    if a == f64::NEG_INFINITY {
        return 0.0;
    }
    if a > -LN_2 {
        (-a.exp_m1()).ln()
    } else {
        (-a.exp()).ln_1p()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Euler–Mascheroni constant.
    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn log_gamma_known_values() {
        let lg1 = log_gamma(1.0);
        assert!(approx_eq(lg1, 0.0, 1e-12));

        let lg_half = log_gamma(0.5);
        let expected = 0.5 * PI.ln();
        assert!(approx_eq(lg_half, expected, 1e-10));

        let lg5 = log_gamma(5.0); // Gamma(5)=24
        assert!(approx_eq(lg5, 24.0f64.ln(), 1e-10));
    }

    #[test]
    fn log_gamma_negative_integer_is_nan() {
        assert!(log_gamma(-2.0).is_nan());
        assert!(log_gamma(0.0).is_nan());
    }

    #[test]
    fn log_gamma_reflection_region() {
        // Gamma(-0.5) = -2 sqrt(pi), so log|Gamma(-0.5)| = ln(2 sqrt(pi))
        let expected = (2.0 * PI.sqrt()).ln();
        assert!(approx_eq(log_gamma(-0.5), expected, 1e-10));
    }

    #[test]
    fn digamma_known_values() {
        assert!(approx_eq(digamma(1.0), -EULER_GAMMA, 1e-12));
        assert!(approx_eq(digamma(0.5), -EULER_GAMMA - 2.0 * LN_2, 1e-12));
        // psi(2) = 1 - gamma
        assert!(approx_eq(digamma(2.0), 1.0 - EULER_GAMMA, 1e-12));
        // psi(10) = H_9 - gamma
        let h9: f64 = (1..=9).map(|k| 1.0 / k as f64).sum();
        assert!(approx_eq(digamma(10.0), h9 - EULER_GAMMA, 1e-12));
    }

    #[test]
    fn digamma_negative_argument() {
        // psi(-0.5) = psi(0.5) + 2 by the recurrence
        let expected = -EULER_GAMMA - 2.0 * LN_2 + 2.0;
        assert!(approx_eq(digamma(-0.5), expected, 1e-10));
    }

    #[test]
    fn digamma_poles_are_nan() {
        assert!(digamma(0.0).is_nan());
        assert!(digamma(-3.0).is_nan());
        assert!(digamma(f64::NAN).is_nan());
    }

    #[test]
    fn digamma_large_argument_tracks_log() {
        let x = 1e8;
        assert!(approx_eq(digamma(x), x.ln() - 0.5 / x, 1e-12));
        assert_eq!(digamma(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn log1m_exp_matches_naive_in_safe_range() {
        for a in [-0.01f64, -0.5, -1.0, -5.0, -30.0] {
            let naive = (1.0 - a.exp()).ln();
            assert!(approx_eq(log1m_exp(a), naive, 1e-12), "a={}", a);
        }
    }

    #[test]
    fn log1m_exp_edges() {
        assert!(log1m_exp(0.0).is_infinite() && log1m_exp(0.0).is_sign_negative());
        assert_eq!(log1m_exp(f64::NEG_INFINITY), 0.0);
        assert!(log1m_exp(0.1).is_nan());
        // Tiny |a|: 1 - exp(a) ≈ -a
        let a = -1e-20;
        assert!(approx_eq(log1m_exp(a), (1e-20f64).ln(), 1e-9));
    }
}
