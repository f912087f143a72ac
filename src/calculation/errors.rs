//! Errors for the frame-projection calculation (basis construction,
//! orthonormality verification, projection, and the worker pool).
//!
//! This module defines `CalcError`, returned by every public entry point
//! of `calculation`. Geometry and symbolic failures are wrapped through
//! `From`, so `?` works across the layers. An alias `CalcResult<T>`
//! standardizes the return type.
use crate::{geometry::GeometryError, symbolic::SymbolicError};

/// Result alias for calculation operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Unified error type for the calculation pipeline.
///
/// Covers frame-construction precondition violations, the post-build
/// orthonormality check, configuration problems, and passthrough errors
/// from the geometry layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    // ---- Basis construction ----
    /// More guesses than needed, or a guess processed on a complete frame.
    BasisOverflow {
        supplied: usize,
        capacity: usize,
    },

    /// Fewer than `n − 1` guesses; the frame cannot be completed.
    IncompleteBasis {
        expected: usize,
        found: usize,
    },

    // ---- Verification ----
    /// `⟨w_row, w_col⟩` did not canonicalize to the Kronecker delta.
    FrameConsistency {
        row: usize,
        col: usize,
        residual: String,
    },

    // ---- Options ----
    /// Worker count must be at least one.
    InvalidWorkerCount {
        workers: usize,
        reason: &'static str,
    },

    // ---- Worker pool ----
    /// The projection thread pool could not be built.
    WorkerPool {
        text: String,
    },

    /// Assembled output has the wrong number of entries.
    Shape {
        text: String,
    },

    // ---- Geometry ----
    Geometry(GeometryError),
}

impl std::error::Error for CalcError {}

impl From<GeometryError> for CalcError {
    fn from(err: GeometryError) -> Self {
        CalcError::Geometry(err)
    }
}

impl From<SymbolicError> for CalcError {
    fn from(err: SymbolicError) -> Self {
        CalcError::Geometry(GeometryError::from(err))
    }
}

impl From<rayon::ThreadPoolBuildError> for CalcError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        CalcError::WorkerPool { text: err.to_string() }
    }
}

impl From<ndarray::ShapeError> for CalcError {
    fn from(err: ndarray::ShapeError) -> Self {
        CalcError::Shape { text: err.to_string() }
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Basis construction ----
            CalcError::BasisOverflow { supplied, capacity } => write!(
                f,
                "Calculation Error: {supplied} guesses supplied but the frame only takes {capacity}"
            ),
            CalcError::IncompleteBasis { expected, found } => write!(
                f,
                "Calculation Error: {found} guesses supplied, {expected} needed to complete the frame"
            ),

            // ---- Verification ----
            CalcError::FrameConsistency { row, col, residual } => write!(
                f,
                "Calculation Error: frame is not orthonormal at ({row}, {col}); inner product {residual}"
            ),

            // ---- Options ----
            CalcError::InvalidWorkerCount { workers, reason } => {
                write!(f, "Calculation Error: invalid worker count {workers}. {reason}")
            }

            // ---- Worker pool ----
            CalcError::WorkerPool { text } => {
                write!(f, "Calculation Error: could not start worker pool: {text}")
            }
            CalcError::Shape { text } => write!(f, "Calculation Error: output shape: {text}"),

            // ---- Geometry ----
            CalcError::Geometry(err) => write!(f, "Calculation Error: {err}"),
        }
    }
}
