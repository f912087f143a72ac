//! Symbolic: exact computer algebra for field-space geometry.
//!
//! Purpose
//! -------
//! Provide the expression engine the geometry and calculation layers are
//! written against: exact rational arithmetic, a canonical normal form,
//! square roots, elementary functions, partial derivatives, and matrix
//! inversion. No floating-point evaluation happens anywhere in the crate.
//!
//! Key behaviors
//! -------------
//! - [`Expr`] values are canonical rational functions over [`Atom`]s; every
//!   arithmetic combination is canonicalized by [`canonicalize`], so
//!   expression size stays bounded and structural equality is value
//!   equality.
//! - Fallible operations (division, `sqrt`, `ln`, inversion) return
//!   [`SymbolicResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Symbols are assumed positive when denesting square roots.
//! - Identities between distinct radicals or between transcendental atoms
//!   are not applied. An expression that is zero only through such an
//!   identity does not test as zero.
//!
//! Downstream usage
//! ----------------
//! - `geometry` builds metrics, connections, and Hessians from [`Expr`]
//!   matrices held in `ndarray` containers.
//! - `calculation` compares inner products against `0`/`1` through
//!   [`Expr::is_zero`] and [`Expr::is_one`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own layer; property tests
//!   over random polynomials live in `tests/`.
pub mod atom;
pub mod canon;
pub mod diff;
pub mod errors;
pub mod expr;
pub mod gcd;
pub mod matrix;
pub mod poly;

pub use self::atom::{Atom, FuncKind, Symbol};
pub use self::canon::canonicalize;
pub use self::errors::{SymbolicError, SymbolicResult};
pub use self::expr::Expr;
pub use self::matrix::{first_asymmetry, identity, invert};
pub use self::poly::{Monomial, Poly};
