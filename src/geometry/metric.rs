//! geometry::metric: the field-space metric and its vector algebra.
//!
//! Purpose
//! -------
//! Hold a validated, invertible, symmetric metric `g_ab` over a
//! [`FieldSpace`] and provide the metric algebra the frame construction is
//! written in: inner products, normalization, and index raising.
//!
//! Key behaviors
//! -------------
//! - [`Metric::new`] checks the shape against the field space, verifies
//!   symmetry entry by entry, and computes the inverse `g^ab` once.
//! - [`Metric::inner_product`] evaluates `Σ_a Σ_b v1^a v2^b g_ab`.
//! - [`Metric::normalize`] divides a vector by `sqrt(⟨v, v⟩)` and fails
//!   with [`GeometryError::DegenerateVector`] when the squared norm is zero.
//! - [`Metric::raise`] contracts a covector with `g^ab`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed `Metric` is immutable; its inverse matches its
//!   components exactly.
//! - Every result is canonical (all arithmetic goes through `Expr`).
//!
//! Conventions
//! -----------
//! - Indices follow the coordinate order of the owning [`FieldSpace`].
//! - Vectors are contravariant unless a method says otherwise.
//!
//! Downstream usage
//! ----------------
//! - `geometry::connection` reads components and the inverse.
//! - `calculation::basis` builds the frame from `inner_product`,
//!   `normalize`, and `raise`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation, the polar metric, and normalization.
//!   Symmetry of the inner product over random inputs is a property test
//!   in `tests/`.
use ndarray::Array2;
use tracing::{debug, warn};

use crate::{
    geometry::{
        errors::{GeometryError, GeometryResult},
        field_space::FieldSpace,
        types::{format_vector, Vector},
    },
    symbolic::{first_asymmetry, invert, Expr},
};

/// Symmetric, invertible field-space metric with cached inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    space: FieldSpace,
    components: Array2<Expr>,
    inverse: Array2<Expr>,
}

impl Metric {
    /// Validate `components` against `space` and invert it.
    ///
    /// Parameters
    /// ----------
    /// - `space`: `FieldSpace`
    ///   Coordinates the metric is expressed over; fixes `n`.
    /// - `components`: `Array2<Expr>`
    ///   `n × n` matrix `g_ab`.
    ///
    /// Returns
    /// -------
    /// `GeometryResult<Metric>`
    ///
    /// Errors
    /// ------
    /// - `DimensionMismatch` if either side of `components` differs from `n`.
    /// - `AsymmetricMetric` at the first `(row, col)` with `g_rc != g_cr`.
    /// - `SingularMetric` if Gauss-Jordan elimination finds no pivot.
    pub fn new(space: FieldSpace, components: Array2<Expr>) -> GeometryResult<Self> {
        let (rows, cols) = components.dim();
        space.check_dim("metric rows", rows)?;
        space.check_dim("metric columns", cols)?;
        if let Some((row, col)) = first_asymmetry(&components) {
            warn!(
                row,
                col,
                upper = %components[[row, col]],
                lower = %components[[col, row]],
                "metric entries differ across the diagonal"
            );
            return Err(GeometryError::AsymmetricMetric { row, col });
        }
        let inverse = invert(&components)?;
        debug!(dim = space.dim(), "metric validated and inverted");
        Ok(Self { space, components, inverse })
    }

    /// Diagonal metric `diag(entries)`.
    pub fn diagonal(space: FieldSpace, entries: Vec<Expr>) -> GeometryResult<Self> {
        space.check_dim("metric diagonal", entries.len())?;
        let n = entries.len();
        let mut g = Array2::from_elem((n, n), Expr::zero());
        for (i, e) in entries.into_iter().enumerate() {
            g[[i, i]] = e;
        }
        Metric::new(space, g)
    }

    /// Flat Euclidean metric `δ_ab`.
    pub fn euclidean(space: FieldSpace) -> GeometryResult<Self> {
        let n = space.dim();
        Metric::diagonal(space, vec![Expr::one(); n])
    }

    pub fn space(&self) -> &FieldSpace {
        &self.space
    }

    pub fn dim(&self) -> usize {
        self.space.dim()
    }

    /// Lower-index components `g_ab`.
    pub fn components(&self) -> &Array2<Expr> {
        &self.components
    }

    /// Upper-index components `g^ab`.
    pub fn inverse(&self) -> &Array2<Expr> {
        &self.inverse
    }

    /// `⟨v1, v2⟩ = Σ_a Σ_b v1^a v2^b g_ab`.
    ///
    /// # Errors
    /// `DimensionMismatch` if either vector length differs from `n`.
    pub fn inner_product(&self, v1: &Vector, v2: &Vector) -> GeometryResult<Expr> {
        self.space.check_dim("inner product lhs", v1.len())?;
        self.space.check_dim("inner product rhs", v2.len())?;
        let mut acc = Expr::zero();
        for ((a, b), g_ab) in self.components.indexed_iter() {
            if g_ab.is_zero() || v1[a].is_zero() || v2[b].is_zero() {
                continue;
            }
            acc = acc + &(&v1[a] * &v2[b]) * g_ab;
        }
        Ok(acc)
    }

    /// `v / sqrt(⟨v, v⟩)`.
    ///
    /// Errors
    /// ------
    /// - `DimensionMismatch` if `v.len() != n`.
    /// - `DegenerateVector` if `⟨v, v⟩` canonicalizes to zero. The vector is
    ///   logged at `warn` level first, since a zero that only holds through
    ///   an identity the canonical form misses also lands here.
    /// - `Symbolic` if the squared norm is a negative constant.
    pub fn normalize(&self, v: &Vector) -> GeometryResult<Vector> {
        let squared = self.inner_product(v, v)?;
        if squared.is_zero() {
            let residual = format_vector(v);
            warn!(vector = %residual, "squared norm canonicalizes to zero");
            return Err(GeometryError::DegenerateVector { residual });
        }
        let norm = squared.sqrt()?;
        debug!(terms = norm.term_count(), "normalizing vector");
        let mut out = Vec::with_capacity(v.len());
        for component in v.iter() {
            out.push(component.checked_div(&norm)?);
        }
        Ok(Vector::from(out))
    }

    /// Raise a covector: `v^a = Σ_b g^ab w_b`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `covector.len() != n`.
    pub fn raise(&self, covector: &Vector) -> GeometryResult<Vector> {
        self.space.check_dim("covector", covector.len())?;
        Ok(self.inverse.rows().into_iter().map(|row| contract(&row, covector)).collect())
    }
}

fn contract(row: &ndarray::ArrayView1<'_, Expr>, w: &Vector) -> Expr {
    row.iter()
        .zip(w.iter())
        .filter(|(g, wb)| !g.is_zero() && !wb.is_zero())
        .map(|(g, wb)| g * wb)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation of shape, symmetry, and invertibility.
    // - Inner products and index raising on the polar metric.
    // - Normalization to unit length and the degenerate-vector error.
    //
    // They intentionally DO NOT cover:
    // - Christoffel symbols (see `geometry::connection`).
    // -------------------------------------------------------------------------

    fn polar() -> Metric {
        let space = FieldSpace::from_names(&["r", "theta"]).unwrap();
        Metric::diagonal(space, vec![Expr::one(), Expr::symbol("r").powi(2)]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Shape, symmetry, and singularity problems are rejected at construction.
    //
    // Given
    // -----
    // - A 2-field space with a 3 × 3 matrix, an asymmetric matrix, and the
    //   rank-one matrix `[[x, x], [x, x]]`.
    //
    // Expect
    // ------
    // - `DimensionMismatch`, `AsymmetricMetric { 0, 1 }`, `SingularMetric`.
    fn new_rejects_invalid_metrics() {
        let space = FieldSpace::from_names(&["x", "y"]).unwrap();
        let x = Expr::symbol("x");

        let big = Array2::from_elem((3, 3), Expr::one());
        assert!(matches!(
            Metric::new(space.clone(), big),
            Err(GeometryError::DimensionMismatch { expected: 2, found: 3, .. })
        ));

        let asym = array![[Expr::one(), x.clone()], [Expr::zero(), Expr::one()]];
        assert_eq!(
            Metric::new(space.clone(), asym),
            Err(GeometryError::AsymmetricMetric { row: 0, col: 1 })
        );

        let singular = array![[x.clone(), x.clone()], [x.clone(), x]];
        assert_eq!(Metric::new(space, singular), Err(GeometryError::SingularMetric { column: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Inner products and raising use the metric and its inverse.
    //
    // Given
    // -----
    // - Polar metric `diag(1, r²)`, vectors `u = (1, 1)`, `v = (r, 1/r)`.
    //
    // Expect
    // ------
    // - `⟨u, v⟩ = r + r = 2r` and `⟨u, v⟩ = ⟨v, u⟩`.
    // - Raising the covector `(a, b)` gives `(a, b/r²)`.
    fn inner_product_and_raise_on_polar_metric() {
        let g = polar();
        let r = Expr::symbol("r");
        let u = array![Expr::one(), Expr::one()];
        let v = array![r.clone(), r.recip().unwrap()];

        let uv = g.inner_product(&u, &v).unwrap();
        assert_eq!(uv, Expr::integer(2) * &r);
        assert_eq!(uv, g.inner_product(&v, &u).unwrap());

        let (a, b) = (Expr::symbol("a"), Expr::symbol("b"));
        let raised = g.raise(&array![a.clone(), b.clone()]).unwrap();
        assert_eq!(raised[0], a);
        assert_eq!(raised[1], b.checked_div(&r.powi(2)).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Normalized vectors have unit norm, zero vectors are degenerate.
    //
    // Given
    // -----
    // - Polar metric, `v = (x, y)` with free symbols, and `0 = (0, 0)`.
    //
    // Expect
    // ------
    // - `⟨n(v), n(v)⟩ = 1`.
    // - `normalize(0)` fails with `DegenerateVector`.
    fn normalize_yields_unit_vectors() {
        let g = polar();
        let v = array![Expr::symbol("x"), Expr::symbol("y")];

        let n = g.normalize(&v).unwrap();
        assert!(g.inner_product(&n, &n).unwrap().is_one());

        let zero = array![Expr::zero(), Expr::zero()];
        assert!(matches!(g.normalize(&zero), Err(GeometryError::DegenerateVector { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Vector lengths are checked before any arithmetic.
    fn inner_product_checks_dimensions() {
        let g = polar();
        let short = array![Expr::one()];
        let ok = array![Expr::one(), Expr::one()];
        assert!(matches!(
            g.inner_product(&short, &ok),
            Err(GeometryError::DimensionMismatch { expected: 2, found: 1, .. })
        ));
    }
}
