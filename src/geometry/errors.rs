//! Errors for field-space geometry (field spaces, metrics, connections,
//! and Hessians).
//!
//! `GeometryError` covers malformed inputs (empty or duplicated coordinates,
//! shape mismatches, asymmetric or singular metrics) and the fatal
//! degenerate-vector condition raised by normalization. Symbolic failures
//! are wrapped through `From<SymbolicError>`.
use crate::symbolic::SymbolicError;

/// Result alias for geometry operations that may produce [`GeometryError`].
pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    // ---- Field space ----
    /// At least one coordinate is required.
    EmptyFieldSpace,

    /// Coordinates must be pairwise distinct.
    DuplicateCoordinate {
        name: String,
    },

    // ---- Shapes ----
    /// A vector or matrix disagrees with the field-space dimension.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    // ---- Metric ----
    /// `g[row][col] != g[col][row]` after canonicalization.
    AsymmetricMetric {
        row: usize,
        col: usize,
    },

    /// The metric has no symbolic inverse.
    SingularMetric {
        column: usize,
    },

    // ---- Vectors ----
    /// Squared norm canonicalizes to zero.
    DegenerateVector {
        residual: String,
    },

    // ---- Symbolic ----
    Symbolic(SymbolicError),
}

impl std::error::Error for GeometryError {}

impl From<SymbolicError> for GeometryError {
    fn from(err: SymbolicError) -> Self {
        match err {
            SymbolicError::SingularMatrix { column } => GeometryError::SingularMetric { column },
            other => GeometryError::Symbolic(other),
        }
    }
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Field space ----
            GeometryError::EmptyFieldSpace => {
                write!(f, "Geometry Error: field space needs at least one coordinate")
            }
            GeometryError::DuplicateCoordinate { name } => {
                write!(f, "Geometry Error: coordinate {name} appears more than once")
            }

            // ---- Shapes ----
            GeometryError::DimensionMismatch { what, expected, found } => {
                write!(f, "Geometry Error: {what} has dimension {found}, expected {expected}")
            }

            // ---- Metric ----
            GeometryError::AsymmetricMetric { row, col } => {
                write!(f, "Geometry Error: metric is not symmetric at ({row}, {col})")
            }
            GeometryError::SingularMetric { column } => {
                write!(f, "Geometry Error: metric is singular (no pivot in column {column})")
            }

            // ---- Vectors ----
            GeometryError::DegenerateVector { residual } => write!(
                f,
                "Geometry Error: vector has zero norm (linearly dependent or null); residual {residual}"
            ),

            // ---- Symbolic ----
            GeometryError::Symbolic(err) => write!(f, "Geometry Error: {err}"),
        }
    }
}
