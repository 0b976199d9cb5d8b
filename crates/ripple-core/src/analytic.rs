//! Closed-form reference for the homogeneous circular cavity.
//!
//! For a circular cavity of refractive index $n_c$ in a medium $n_o$ the
//! scattering matrix is diagonal, with coefficients
//!
//! $$ S_m = -\frac{\eta J_m'(z_c) H_m^{(2)}(z_o) - J_m(z_c) H_m^{(2)\prime}(z_o)}
//!               {\eta J_m'(z_c) H_m^{(1)}(z_o) - J_m(z_c) H_m^{(1)\prime}(z_o)} $$
//!
//! where $z_c = n_c k$, $z_o = n_o k$ and $\eta = n_c / n_o$. This is the
//! validation benchmark for the integral-equation solver.

use num_complex::Complex64;

use crate::error::SolverError;
use crate::special::{bessel_j, bessel_j_prime, hankel1, hankel1_prime, hankel2, hankel2_prime};

/// Denominator magnitudes below this are a resonance hit, not a number.
const SINGULAR_THRESHOLD: f64 = 1e-14;

/// Diagonal scattering coefficients for orders $-M_{max} \ldots M_{max}$.
///
/// # Errors
/// [`SolverError::SingularReference`] when a denominator is near zero; the
/// coefficient would otherwise silently become inf/NaN.
pub fn reference_coefficients(
    n_core: f64,
    n_outside: f64,
    k: f64,
    max_order: i32,
) -> Result<Vec<Complex64>, SolverError> {
    let zc = n_core * k;
    let zo = n_outside * k;
    let eta = n_core / n_outside;

    let mut coefficients = Vec::with_capacity(2 * max_order as usize + 1);
    for m in -max_order..=max_order {
        let jp = bessel_j_prime(m, zc);
        let j = bessel_j(m, zc);

        let num = -(eta * jp * hankel2(m, zo) - j * hankel2_prime(m, zo));
        let den = eta * jp * hankel1(m, zo) - j * hankel1_prime(m, zo);

        if den.norm() < SINGULAR_THRESHOLD {
            return Err(SolverError::SingularReference {
                order: m,
                denominator: den.norm(),
            });
        }

        coefficients.push(num / den);
    }

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_finite_for_standard_cavity() {
        // nc=2, no=1, k=1, Mmax=1: three finite coefficients.
        let coeffs = reference_coefficients(2.0, 1.0, 1.0, 1).unwrap();
        assert_eq!(coeffs.len(), 3);
        for c in &coeffs {
            assert!(c.re.is_finite() && c.im.is_finite());
        }
    }

    #[test]
    fn test_reference_symmetric_in_order() {
        // The circular cavity couples +m and -m identically.
        let coeffs = reference_coefficients(2.0, 1.0, 1.0, 2).unwrap();
        let max_order = 2_usize;
        for m in 1..=max_order {
            let plus = coeffs[max_order + m];
            let minus = coeffs[max_order - m];
            assert_abs_diff_eq!(plus.re, minus.re, epsilon = 1e-12);
            assert_abs_diff_eq!(plus.im, minus.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reference_unimodular_for_lossless_cavity() {
        // With real indices H^(2) = conj(H^(1)), so S_m = -conj(den)/den
        // and |S_m| = 1 (energy conservation).
        for &k in &[0.5, 1.0, 2.3] {
            let coeffs = reference_coefficients(2.0, 1.0, k, 2).unwrap();
            for c in &coeffs {
                assert_abs_diff_eq!(c.norm(), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_no_contrast_reference_is_unity() {
        // nc == no: the cavity is invisible and every coefficient is 1.
        let coeffs = reference_coefficients(1.0, 1.0, 1.0, 1).unwrap();
        for c in &coeffs {
            assert_abs_diff_eq!(c.re, 1.0, epsilon = 1e-10);
            assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-10);
        }
    }
}
