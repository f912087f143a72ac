//! calculation::basis: Gram-Schmidt frame construction on a curved metric.
//!
//! Purpose
//! -------
//! Build an orthonormal frame (vielbein) `w_0, …, w_{n−1}` whose first
//! vector points along the metric-raised gradient of the potential and
//! whose remaining vectors come from user-supplied guesses.
//!
//! Key behaviors
//! -------------
//! - [`gradient_seed`] computes `v^a = Σ_b g^ab ∂_b V`.
//! - [`next_frame_vector`] orthogonalizes one guess against the frame
//!   built so far and normalizes it.
//! - [`build_basis`] checks the guess count and every shape before doing
//!   any symbolic work, then runs the steps in order.
//! - [`verify_orthonormal`] checks every pair against the Kronecker delta.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly `n − 1` guesses are consumed; more is a `BasisOverflow`,
//!   fewer an `IncompleteBasis`.
//! - Each overlap is taken against the original guess, never against the
//!   partially reduced running vector:
//!   `y = g − Σ_x ⟨x, g⟩ x` for every accepted `x`.
//!   For unit `x` orthogonal among themselves this equals the textbook
//!   update. Otherwise the two differ, and this rule is the one applied.
//! - A guess in the span of the current frame leaves `y = 0` and fails in
//!   normalization with `DegenerateVector`.
//!
//! Conventions
//! -----------
//! - Frame vectors are contravariant, in coordinate order.
//!
//! Testing notes
//! -------------
//! - Unit tests cover count checks, the overlap rule against a
//!   non-orthogonal frame, and verification failures.
use tracing::{debug, info, warn};

use crate::{
    calculation::errors::{CalcError, CalcResult},
    geometry::{format_vector, Metric, Vector},
    symbolic::Expr,
};

/// Ordered orthonormal frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    vectors: Vec<Vector>,
}

impl Basis {
    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Metric-raised gradient `v^a = Σ_b g^ab ∂_b V`, the unnormalized first
/// frame direction.
pub fn gradient_seed(metric: &Metric, potential: &Expr) -> CalcResult<Vector> {
    let covector = metric.space().gradient(potential);
    Ok(metric.raise(&covector)?)
}

/// Orthonormalize `guess` against `frame`.
///
/// Parameters
/// ----------
/// - `metric`: `&Metric`
/// - `frame`: `&[Vector]`
///   Accepted frame vectors, in construction order.
/// - `guess`: `&Vector`
///   Original guess; it is not modified.
///
/// Returns
/// -------
/// `CalcResult<Vector>`
///   `normalize(guess − Σ_x ⟨x, guess⟩ x)`.
///
/// Errors
/// ------
/// - `BasisOverflow` if `frame` already holds `n` vectors.
/// - `Geometry(DimensionMismatch)` if `guess` has the wrong length.
/// - `Geometry(DegenerateVector)` if the residual has zero norm.
pub fn next_frame_vector(metric: &Metric, frame: &[Vector], guess: &Vector) -> CalcResult<Vector> {
    let n = metric.dim();
    if frame.len() >= n {
        return Err(CalcError::BasisOverflow { supplied: frame.len(), capacity: n - 1 });
    }
    metric.space().check_dim("guess", guess.len())?;

    let mut y = guess.clone();
    for x in frame {
        let overlap = metric.inner_product(x, guess)?;
        if overlap.is_zero() {
            continue;
        }
        y = y.iter().zip(x.iter()).map(|(yc, xc)| yc - &(&overlap * xc)).collect();
    }
    Ok(metric.normalize(&y)?)
}

/// Orthonormal frame from the gradient seed and `n − 1` guesses.
///
/// Errors
/// ------
/// - `BasisOverflow { supplied, capacity }` if more than `n − 1` guesses.
/// - `IncompleteBasis { expected, found }` if fewer than `n − 1` guesses.
/// - `Geometry(DimensionMismatch)` for a seed or guess of the wrong length.
/// - `Geometry(DegenerateVector)` for a zero seed or a dependent guess.
///
/// All count and shape checks run before the first normalization.
pub fn build_basis(metric: &Metric, seed: &Vector, guesses: &[Vector]) -> CalcResult<Basis> {
    let n = metric.dim();
    let capacity = n - 1;
    if guesses.len() > capacity {
        return Err(CalcError::BasisOverflow { supplied: guesses.len(), capacity });
    }
    if guesses.len() < capacity {
        return Err(CalcError::IncompleteBasis { expected: capacity, found: guesses.len() });
    }
    metric.space().check_dim("gradient seed", seed.len())?;
    for guess in guesses {
        metric.space().check_dim("guess", guess.len())?;
    }

    info!(dim = n, guesses = guesses.len(), "building frame");
    let mut vectors = Vec::with_capacity(n);
    vectors.push(metric.normalize(seed)?);
    for (i, guess) in guesses.iter().enumerate() {
        let w = next_frame_vector(metric, &vectors, guess)?;
        debug!(step = i + 1, "frame vector normalized");
        vectors.push(w);
    }
    Ok(Basis { vectors })
}

/// Check `⟨w_a, w_b⟩ = δ_ab` for every pair.
///
/// Only pairs with `b ≥ a` are evaluated. The metric is symmetric, so
/// `⟨w_b, w_a⟩ = ⟨w_a, w_b⟩` and the lower triangle follows.
///
/// # Errors
/// `FrameConsistency` at the first failing pair, in row-major order over
/// the upper triangle. The offending inner product is logged at `warn`
/// level; a value equal to the delta only through an identity the
/// canonical form does not apply also fails here.
pub fn verify_orthonormal(metric: &Metric, basis: &Basis) -> CalcResult<()> {
    let w = basis.vectors();
    for row in 0..w.len() {
        for col in row..w.len() {
            let ip = metric.inner_product(&w[row], &w[col])?;
            let ok = if row == col { ip.is_one() } else { ip.is_zero() };
            if !ok {
                let residual = ip.to_string();
                warn!(
                    row,
                    col,
                    %residual,
                    lhs = %format_vector(&w[row]),
                    rhs = %format_vector(&w[col]),
                    "frame inner product is not the kronecker delta"
                );
                return Err(CalcError::FrameConsistency { row, col, residual });
            }
        }
    }
    debug!(size = w.len(), "frame verified orthonormal");
    Ok(())
}
