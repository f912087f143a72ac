//! geometry::connection: Christoffel symbols of the Levi-Civita connection.
//!
//! Computes
//!
//! ```text
//! Γ^c_ab = ½ Σ_d g^cd (∂_a g_bd + ∂_b g_ad − ∂_d g_ab)
//! ```
//!
//! for every `(a, b, c)`. Metric derivatives `∂_d g_ab` are taken once up
//! front; the lower-index symmetry `Γ^c_ab = Γ^c_ba` is exact in the
//! formula, so only `a ≤ b` is evaluated and the rest is mirrored.
use ndarray::Array3;
use tracing::debug;

use crate::{
    geometry::{errors::GeometryResult, metric::Metric},
    symbolic::Expr,
};

/// Christoffel symbols stored as `[c, a, b]` for `Γ^c_ab`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionTensor {
    gamma: Array3<Expr>,
}

impl ConnectionTensor {
    /// `Γ^c_ab`. Panics if an index is out of range.
    pub fn gamma(&self, c: usize, a: usize, b: usize) -> &Expr {
        &self.gamma[[c, a, b]]
    }

    pub fn dim(&self) -> usize {
        self.gamma.dim().0
    }

    /// `true` when every coefficient canonicalizes to zero.
    pub fn is_flat(&self) -> bool {
        self.gamma.iter().all(Expr::is_zero)
    }
}

/// Christoffel symbols of `metric`.
///
/// Pure and deterministic; the result depends only on the metric
/// components and their inverse.
///
/// # Errors
/// Propagates [`SymbolicError`](crate::symbolic::SymbolicError) from the
/// coefficient arithmetic as `GeometryError::Symbolic`.
pub fn christoffel(metric: &Metric) -> GeometryResult<ConnectionTensor> {
    let n = metric.dim();
    let g = metric.components();
    let g_inv = metric.inverse();
    let coords = metric.space().coords();

    // dg[[d, a, b]] = ∂_d g_ab
    let dg = Array3::from_shape_fn((n, n, n), |(d, a, b)| g[[a, b]].diff(&coords[d]));

    let half = Expr::rational(1, 2)?;
    let mut gamma = Array3::from_elem((n, n, n), Expr::zero());
    for c in 0..n {
        for a in 0..n {
            for b in a..n {
                let mut sum = Expr::zero();
                for d in 0..n {
                    let g_cd = &g_inv[[c, d]];
                    if g_cd.is_zero() {
                        continue;
                    }
                    let bracket = &dg[[a, b, d]] + &dg[[b, a, d]] - &dg[[d, a, b]];
                    if bracket.is_zero() {
                        continue;
                    }
                    sum = sum + g_cd * &bracket;
                }
                let value = &half * &sum;
                gamma[[c, b, a]] = value.clone();
                gamma[[c, a, b]] = value;
            }
        }
    }
    let non_zero = gamma.iter().filter(|e| !e.is_zero()).count();
    debug!(dim = n, non_zero, "christoffel symbols computed");
    Ok(ConnectionTensor { gamma })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::field_space::FieldSpace;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Vanishing connection of a flat Cartesian metric.
    // - Known Christoffel symbols of the polar and exponential metrics.
    // - Lower-index symmetry.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A constant metric has a vanishing connection.
    fn flat_metric_has_zero_connection() {
        let space = FieldSpace::from_names(&["x", "y", "z"]).unwrap();
        let metric = Metric::euclidean(space).unwrap();

        let conn = christoffel(&metric).unwrap();

        assert!(conn.is_flat());
        assert_eq!(conn.dim(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Polar coordinates reproduce the textbook Christoffel symbols.
    //
    // Given
    // -----
    // - Coordinates `(r, θ)`, metric `diag(1, r²)`.
    //
    // Expect
    // ------
    // - `Γ^r_θθ = −r`, `Γ^θ_rθ = Γ^θ_θr = 1/r`, every other entry zero.
    fn polar_metric_christoffel_symbols() {
        let space = FieldSpace::from_names(&["r", "theta"]).unwrap();
        let r = Expr::symbol("r");
        let metric = Metric::diagonal(space, vec![Expr::one(), r.powi(2)]).unwrap();

        let conn = christoffel(&metric).unwrap();

        assert_eq!(conn.gamma(0, 1, 1), &-r.clone());
        assert_eq!(conn.gamma(1, 0, 1), &r.recip().unwrap());
        assert_eq!(conn.gamma(1, 1, 0), &r.recip().unwrap());
        assert!(conn.gamma(0, 0, 0).is_zero());
        assert!(conn.gamma(0, 0, 1).is_zero());
        assert!(conn.gamma(1, 0, 0).is_zero());
        assert!(conn.gamma(1, 1, 1).is_zero());
    }

    #[test]
    // Purpose
    // -------
    // A transcendental metric function differentiates through the chain
    // rule inside the connection.
    //
    // Given
    // -----
    // - Coordinates `(p, q)`, metric `diag(1, exp(2p))`.
    //
    // Expect
    // ------
    // - `Γ^p_qq = −exp(2p)` and `Γ^q_pq = 1`.
    fn exponential_metric_christoffel_symbols() {
        let space = FieldSpace::from_names(&["p", "q"]).unwrap();
        let e = (Expr::integer(2) * Expr::symbol("p")).exp();
        let metric = Metric::diagonal(space, vec![Expr::one(), e.clone()]).unwrap();

        let conn = christoffel(&metric).unwrap();

        assert_eq!(conn.gamma(0, 1, 1), &-e);
        assert!(conn.gamma(1, 0, 1).is_one());
        assert!(conn.gamma(1, 1, 1).is_zero());
    }
}
