//! The 2D free-space Green's-function interaction kernel.
//!
//! The outgoing Green's function of the 2D Helmholtz equation is
//! $(i/4)\,H_0^{(1)}(k|p-q|)$. The integral-equation kernel carries the
//! dielectric contrast and a $k^2$ source prefactor on top of it:
//!
//! $$ K(p, q) = \chi \, k^2 \, \frac{i}{4} H_0^{(1)}(k |p - q|) $$
//!
//! where $\chi = n_c^2 - n_o^2$. The kernel is long-range: $H_0^{(1)}$ has
//! no compact support, so the assembled interaction matrix is dense.

use num_complex::Complex64;

use crate::special::hankel1;

/// Pairwise interaction value between collocation points `p` and `q`.
///
/// The self term (`p == q`) contributes exactly zero: the diagonal of the
/// integral-equation system is carried entirely by the identity, and the
/// kernel singularity is excluded rather than regularised.
pub fn interaction_kernel(k: f64, contrast: f64, p: [f64; 2], q: [f64; 2]) -> Complex64 {
    if p == q {
        return Complex64::new(0.0, 0.0);
    }

    let dx = p[0] - q[0];
    let dy = p[1] - q[1];
    let dist = (dx * dx + dy * dy).sqrt();

    Complex64::new(0.0, contrast * k * k / 4.0) * hankel1(0, k * dist)
}
