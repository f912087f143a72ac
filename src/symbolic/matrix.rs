//! symbolic::matrix: exact matrix helpers over [`Expr`].
//!
//! Purpose
//! -------
//! Invert symbolic matrices (the field-space metric) and check symmetry
//! of symbolic matrices (metric and Hessian validation).
//!
//! Key behaviors
//! -------------
//! - [`invert`] runs Gauss-Jordan elimination. Pivots are chosen by the
//!   structural zero test, preferring the smallest candidate expression to
//!   limit intermediate growth.
//! - [`first_asymmetry`] scans the strict upper triangle and reports the
//!   first `(row, col)` with `m[row][col] != m[col][row]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are canonical; zero tests are therefore exact up to the
//!   limitations documented in `symbolic::canon`.
use ndarray::Array2;

use crate::symbolic::{
    errors::{SymbolicError, SymbolicResult},
    expr::Expr,
};

/// Inverse of a square symbolic matrix.
///
/// Parameters
/// ----------
/// - `m`: `&Array2<Expr>`
///   Square matrix with canonical entries.
///
/// Returns
/// -------
/// `SymbolicResult<Array2<Expr>>`
///   The inverse with canonical entries.
///
/// Errors
/// ------
/// - [`SymbolicError::NonSquareMatrix`] if `m` is not square.
/// - [`SymbolicError::SingularMatrix`] if some column has no non-zero pivot.
pub fn invert(m: &Array2<Expr>) -> SymbolicResult<Array2<Expr>> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(SymbolicError::NonSquareMatrix { rows, cols });
    }
    let n = rows;
    let mut a = m.clone();
    let mut inv = identity(n);

    for col in 0..n {
        let pivot_row = (col..n)
            .filter(|&r| !a[[r, col]].is_zero())
            .min_by_key(|&r| a[[r, col]].term_count())
            .ok_or(SymbolicError::SingularMatrix { column: col })?;
        if pivot_row != col {
            for k in 0..n {
                a.swap([pivot_row, k], [col, k]);
                inv.swap([pivot_row, k], [col, k]);
            }
        }

        let scale = a[[col, col]].recip()?;
        for k in 0..n {
            a[[col, k]] = &a[[col, k]] * &scale;
            inv[[col, k]] = &inv[[col, k]] * &scale;
        }

        for r in 0..n {
            if r == col || a[[r, col]].is_zero() {
                continue;
            }
            let factor = a[[r, col]].clone();
            for k in 0..n {
                a[[r, k]] = &a[[r, k]] - &(&factor * &a[[col, k]]);
                inv[[r, k]] = &inv[[r, k]] - &(&factor * &inv[[col, k]]);
            }
        }
    }
    Ok(inv)
}

/// First `(row, col)` with `row < col` where `m` is not symmetric.
pub fn first_asymmetry(m: &Array2<Expr>) -> Option<(usize, usize)> {
    let n = m.nrows().min(m.ncols());
    (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).find(|&(i, j)| m[[i, j]] != m[[j, i]])
}

/// `n × n` identity matrix.
pub fn identity(n: usize) -> Array2<Expr> {
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { Expr::one() } else { Expr::zero() })
}
