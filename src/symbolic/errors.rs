//! Errors for the symbolic substrate (checked arithmetic, radicals,
//! elementary functions, and matrix inversion).
//!
//! Every fallible operation on [`Expr`](crate::symbolic::Expr) reports a
//! [`SymbolicError`] instead of panicking. Higher layers wrap it through
//! `From` conversions (see `geometry::errors`).

/// Result alias for symbolic operations that may produce [`SymbolicError`].
pub type SymbolicResult<T> = Result<T, SymbolicError>;

/// Unified error type for the expression engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    // ---- Arithmetic ----
    /// Divisor canonicalizes to the literal zero.
    DivisionByZero { dividend: String },

    /// Square root of a negative rational constant.
    NegativeRadicand { value: String },

    /// Logarithm of an expression that canonicalizes to zero.
    LogOfZero,

    // ---- Matrices ----
    /// Matrix must be square.
    NonSquareMatrix { rows: usize, cols: usize },

    /// No non-zero pivot exists in the given column.
    SingularMatrix { column: usize },
}

impl std::error::Error for SymbolicError {}

impl std::fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Arithmetic ----
            SymbolicError::DivisionByZero { dividend } => {
                write!(f, "Symbolic Error: division of {dividend} by an expression equal to zero")
            }
            SymbolicError::NegativeRadicand { value } => {
                write!(f, "Symbolic Error: square root of negative constant {value}")
            }
            SymbolicError::LogOfZero => write!(f, "Symbolic Error: logarithm of zero"),

            // ---- Matrices ----
            SymbolicError::NonSquareMatrix { rows, cols } => {
                write!(f, "Symbolic Error: expected a square matrix, found {rows}x{cols}")
            }
            SymbolicError::SingularMatrix { column } => {
                write!(f, "Symbolic Error: matrix is singular (no pivot in column {column})")
            }
        }
    }
}
