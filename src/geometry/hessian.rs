//! geometry::hessian: covariant Hessian of the potential.
//!
//! Purpose
//! -------
//! Build `∇_a ∇_b V = ∂_a ∂_b V − Σ_c Γ^c_ab ∂_c V` on a curved field
//! space from a validated [`Metric`] and a scalar potential.
//!
//! Key behaviors
//! -------------
//! - First derivatives `∂_c V` are taken once and shared by the second
//!   derivatives and the connection contraction.
//! - [`HessianFill::Full`] evaluates every entry and then compares the two
//!   triangles, logging any pair that fails to match.
//! - [`HessianFill::UpperTriangle`] evaluates `a ≤ b` and mirrors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The Levi-Civita connection is symmetric in its lower indices and
//!   partial derivatives commute, so the exact Hessian is symmetric. A
//!   mismatch under `Full` points at a canonical-form gap, not at the
//!   inputs, and is reported but not raised.
//!
//! Testing notes
//! -------------
//! - Unit tests check the flat quadratic, polar, and exponential cases;
//!   end-to-end checks live in `tests/`.
use ndarray::Array2;
use tracing::{debug, warn};

use crate::{
    geometry::{
        connection::{christoffel, ConnectionTensor},
        errors::GeometryResult,
        metric::Metric,
        types::HesseMatrix,
    },
    symbolic::{first_asymmetry, Expr},
};

/// How the Hessian matrix is filled.
///
/// - `Full` (default): compute all `n²` entries and check symmetry.
/// - `UpperTriangle`: compute `n(n+1)/2` entries and mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HessianFill {
    #[default]
    Full,
    UpperTriangle,
}

/// Covariant Hessian of `potential`, computing the connection of `metric`.
///
/// Parameters
/// ----------
/// - `metric`: `&Metric`
///   Field-space metric; its coordinates are the differentiation variables.
/// - `potential`: `&Expr`
///   Scalar potential `V`.
/// - `fill`: `HessianFill`
///
/// Returns
/// -------
/// `GeometryResult<HesseMatrix>`
///   `n × n` matrix `∇_a ∇_b V`.
pub fn hessian(metric: &Metric, potential: &Expr, fill: HessianFill) -> GeometryResult<HesseMatrix> {
    let connection = christoffel(metric)?;
    covariant_hessian(metric, &connection, potential, fill)
}

/// Covariant Hessian with a precomputed connection.
///
/// # Errors
/// `DimensionMismatch` when `connection` was built for a different
/// dimension than `metric`.
pub fn covariant_hessian(
    metric: &Metric, connection: &ConnectionTensor, potential: &Expr, fill: HessianFill,
) -> GeometryResult<HesseMatrix> {
    let n = metric.dim();
    metric.space().check_dim("connection", connection.dim())?;
    let coords = metric.space().coords();
    let grad = metric.space().gradient(potential);

    let entry = |a: usize, b: usize| -> Expr {
        let second = grad[a].diff(&coords[b]);
        let correction: Expr = (0..n)
            .filter(|&c| !grad[c].is_zero() && !connection.gamma(c, a, b).is_zero())
            .map(|c| connection.gamma(c, a, b) * &grad[c])
            .sum();
        second - correction
    };

    let mut h = Array2::from_elem((n, n), Expr::zero());
    match fill {
        HessianFill::Full => {
            for ((a, b), slot) in h.indexed_iter_mut() {
                *slot = entry(a, b);
            }
            if let Some((row, col)) = first_asymmetry(&h) {
                warn!(
                    row,
                    col,
                    upper = %h[[row, col]],
                    lower = %h[[col, row]],
                    "hessian entries differ across the diagonal"
                );
            }
        }
        HessianFill::UpperTriangle => {
            for a in 0..n {
                for b in a..n {
                    let value = entry(a, b);
                    h[[b, a]] = value.clone();
                    h[[a, b]] = value;
                }
            }
        }
    }
    debug!(dim = n, ?fill, "covariant hessian built");
    Ok(h)
}
