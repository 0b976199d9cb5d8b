//! Integer-order cylindrical Bessel and Hankel functions.
//!
//! Thin layer over the `spec_math` Bessel implementations: negative integer
//! orders via the reflection $J_{-m} = (-1)^m J_m$ (likewise for $Y_m$),
//! Hankel functions as $H_m^{(1,2)} = J_m \pm i Y_m$, and derivatives via
//! the symmetric recurrence $f_m'(x) = (f_{m-1}(x) - f_{m+1}(x)) / 2$.

use num_complex::Complex64;
use spec_math::Bessel;

/// Bessel function of the first kind, integer order `m`.
pub fn bessel_j(m: i32, x: f64) -> f64 {
    let value = x.bessel_jv(m.unsigned_abs() as f64);
    if m < 0 && m % 2 != 0 {
        -value
    } else {
        value
    }
}

/// Bessel function of the second kind (Neumann), integer order `m`.
pub fn bessel_y(m: i32, x: f64) -> f64 {
    let value = x.bessel_yv(m.unsigned_abs() as f64);
    if m < 0 && m % 2 != 0 {
        -value
    } else {
        value
    }
}

/// Hankel function of the first kind, $H_m^{(1)} = J_m + i Y_m$.
pub fn hankel1(m: i32, x: f64) -> Complex64 {
    Complex64::new(bessel_j(m, x), bessel_y(m, x))
}

/// Hankel function of the second kind, $H_m^{(2)} = J_m - i Y_m$.
pub fn hankel2(m: i32, x: f64) -> Complex64 {
    Complex64::new(bessel_j(m, x), -bessel_y(m, x))
}

/// Derivative $J_m'(x)$.
pub fn bessel_j_prime(m: i32, x: f64) -> f64 {
    0.5 * (bessel_j(m - 1, x) - bessel_j(m + 1, x))
}

/// Derivative $H_m^{(1)\prime}(x)$.
pub fn hankel1_prime(m: i32, x: f64) -> Complex64 {
    0.5 * (hankel1(m - 1, x) - hankel1(m + 1, x))
}

/// Derivative $H_m^{(2)\prime}(x)$.
pub fn hankel2_prime(m: i32, x: f64) -> Complex64 {
    0.5 * (hankel2(m - 1, x) - hankel2(m + 1, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Reference values from Abramowitz & Stegun, Table 9.1.
    #[test]
    fn test_bessel_j_known_values() {
        assert_abs_diff_eq!(bessel_j(0, 1.0), 0.765_197_686_6, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j(1, 1.0), 0.440_050_585_7, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j(0, 2.404_825_557_7), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bessel_y_known_values() {
        assert_abs_diff_eq!(bessel_y(0, 1.0), 0.088_256_964_2, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_y(1, 1.0), -0.781_212_821_3, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_order_reflection() {
        for x in [0.5, 1.0, 3.7] {
            assert_abs_diff_eq!(bessel_j(-1, x), -bessel_j(1, x), epsilon = 1e-14);
            assert_abs_diff_eq!(bessel_j(-2, x), bessel_j(2, x), epsilon = 1e-14);
            assert_abs_diff_eq!(bessel_y(-3, x), -bessel_y(3, x), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_derivative_identity_j0() {
        // J_0'(x) = -J_1(x)
        for x in [0.3, 1.0, 2.5] {
            assert_abs_diff_eq!(bessel_j_prime(0, x), -bessel_j(1, x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_wronskian() {
        // J_m(x) Y_m'(x) - J_m'(x) Y_m(x) = 2 / (π x)
        for m in -2..=2 {
            for x in [0.7, 1.0, 4.2] {
                let y_prime = 0.5 * (bessel_y(m - 1, x) - bessel_y(m + 1, x));
                let w = bessel_j(m, x) * y_prime - bessel_j_prime(m, x) * bessel_y(m, x);
                assert_abs_diff_eq!(w, 2.0 / (std::f64::consts::PI * x), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_hankel_conjugate_pair() {
        // For real arguments H^(2) is the conjugate of H^(1).
        let h1 = hankel1(2, 1.5);
        let h2 = hankel2(2, 1.5);
        assert_abs_diff_eq!(h1.re, h2.re, epsilon = 1e-14);
        assert_abs_diff_eq!(h1.im, -h2.im, epsilon = 1e-14);
    }
}
