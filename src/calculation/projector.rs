//! calculation::projector: bilinear projection of the Hessian.
use crate::{
    calculation::errors::CalcResult,
    geometry::{GeometryError, HesseMatrix, Vector},
    symbolic::Expr,
};

/// `Σ_a Σ_b H_ab v1^a v2^b`.
///
/// Parameters
/// ----------
/// - `hessian`: `&HesseMatrix`
///   Square `n × n` matrix.
/// - `v1`, `v2`: `&Vector`
///   Length-`n` contravariant vectors, typically frame vectors.
///
/// Returns
/// -------
/// `CalcResult<Expr>`
///   Canonical scalar; bilinear in `v1` and `v2`.
///
/// Errors
/// ------
/// - `Geometry(DimensionMismatch)` if the matrix is not square or a vector
///   length differs from its side.
pub fn project(hessian: &HesseMatrix, v1: &Vector, v2: &Vector) -> CalcResult<Expr> {
    let (rows, cols) = hessian.dim();
    for (what, found) in [("hessian columns", cols), ("projection lhs", v1.len()), ("projection rhs", v2.len())] {
        if found != rows {
            return Err(GeometryError::DimensionMismatch { what, expected: rows, found }.into());
        }
    }
    let mut acc = Expr::zero();
    for ((a, b), h_ab) in hessian.indexed_iter() {
        if h_ab.is_zero() || v1[a].is_zero() || v2[b].is_zero() {
            continue;
        }
        acc = acc + &(h_ab * &v1[a]) * &v2[b];
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::errors::CalcError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Projection of a symbolic matrix onto coordinate and mixed vectors.
    // - Shape validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Projection onto coordinate vectors picks matrix entries; mixed
    // vectors combine them bilinearly.
    //
    // Given
    // -----
    // - `H = [[a, b], [b, c]]`, `e0 = (1, 0)`, `e1 = (0, 1)`, `u = (1, 1)`.
    //
    // Expect
    // ------
    // - `P(e0, e1) = b`, `P(u, u) = a + 2b + c`.
    fn project_combines_entries_bilinearly() {
        let (a, b, c) = (Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c"));
        let h = array![[a.clone(), b.clone()], [b.clone(), c.clone()]];
        let e0 = array![Expr::one(), Expr::zero()];
        let e1 = array![Expr::zero(), Expr::one()];
        let u = array![Expr::one(), Expr::one()];

        assert_eq!(project(&h, &e0, &e1).unwrap(), b);
        assert_eq!(project(&h, &u, &u).unwrap(), a + Expr::integer(2) * b + c);
    }

    #[test]
    // Purpose
    // -------
    // Vectors of the wrong length are rejected.
    fn project_checks_dimensions() {
        let h = array![[Expr::one(), Expr::zero()], [Expr::zero(), Expr::one()]];
        let short = array![Expr::one()];
        let ok = array![Expr::one(), Expr::one()];

        let err = project(&h, &ok, &short).unwrap_err();

        assert!(matches!(
            err,
            CalcError::Geometry(GeometryError::DimensionMismatch { expected: 2, found: 1, .. })
        ));
    }
}
