//! inflatox: symbolic covariant Hessian projection for multi-field inflation.
//!
//! Purpose
//! -------
//! Compute, for a scalar-field theory on a curved field-space manifold, the
//! covariant Hessian of the potential projected onto an orthonormal frame
//! (vielbein) whose first vector follows the gradient. The entries of the
//! result give the effective masses of fluctuations along and transverse to
//! the background trajectory. Every quantity stays an exact symbolic
//! expression in the field coordinates.
//!
//! Key behaviors
//! -------------
//! - `symbolic`: exact expression engine with a canonical normal form,
//!   square roots, elementary functions, derivatives, and matrix inversion.
//! - `geometry`: field spaces, metrics, Christoffel symbols, and the
//!   covariant Hessian.
//! - `calculation`: Gram-Schmidt frame, orthonormality check, projection,
//!   and the concurrent orchestration of a run.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated once when a session is created; derived values
//!   are immutable.
//! - Symbols are treated as positive real quantities when square roots are
//!   simplified.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` containers of
//!   [`Expr`](symbolic::Expr), indexed in coordinate order.
//! - Errors are layered: `SymbolicError` → `GeometryError` → `CalcError`,
//!   with `From` conversions so `?` crosses layers.
//! - Logging goes through `tracing`; the crate installs no subscriber.
//!
//! Downstream usage
//! ----------------
//! - Most callers need only [`calculation::run`] or
//!   [`calculation::SymbolicCalculation`].
//! - Display layers implement [`calculation::Reporter`] to receive frame
//!   vectors, the Hessian, and projected entries as they are produced.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module. End-to-end scenarios and property
//!   tests live in `tests/`.

pub mod calculation;
pub mod geometry;
pub mod symbolic;
