//! geometry::types: shared container aliases for field-space tensors.
//!
//! All tensors are dense `ndarray` containers of canonical [`Expr`]
//! entries, indexed by field-space coordinate position.
use ndarray::{Array1, Array2};

use crate::symbolic::Expr;

/// Contravariant vector `v^a` (or covector `w_a` where noted).
pub type Vector = Array1<Expr>;

/// Twice-covariant Hessian `∇_a ∇_b V`.
pub type HesseMatrix = Array2<Expr>;

/// Hessian projected onto a frame, entry `(a, b)` for frame vectors `a, b`.
pub type ProjectedMatrix = Array2<Expr>;

/// Render a vector as `[v0, v1, ...]` for log fields and error payloads.
pub fn format_vector(v: &Vector) -> String {
    let parts: Vec<String> = v.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
