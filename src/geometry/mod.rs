//! Geometry: metric algebra, connection, and covariant Hessian on the
//! field-space manifold.
//!
//! Purpose
//! -------
//! Turn the user inputs (coordinates, metric matrix, potential) into the
//! derived tensors the frame projection needs.
//!
//! Key behaviors
//! -------------
//! - [`FieldSpace`] fixes the dimension and coordinate order.
//! - [`Metric`] validates and inverts `g_ab`; it provides inner products,
//!   normalization, and index raising.
//! - [`christoffel`] derives the connection `Γ^c_ab` from a metric.
//! - [`hessian`]/[`covariant_hessian`] build `∇_a ∇_b V`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All tensors hold canonical [`Expr`](crate::symbolic::Expr) entries and
//!   are immutable after construction.
//! - Shapes are checked eagerly against the field-space dimension.
//!
//! Downstream usage
//! ----------------
//! - `calculation` drives these building blocks in sequence and maps
//!   [`GeometryError`] into its own error type.
pub mod connection;
pub mod errors;
pub mod field_space;
pub mod hessian;
pub mod metric;
pub mod types;

pub use self::connection::{christoffel, ConnectionTensor};
pub use self::errors::{GeometryError, GeometryResult};
pub use self::field_space::FieldSpace;
pub use self::hessian::{covariant_hessian, hessian, HessianFill};
pub use self::metric::Metric;
pub use self::types::{format_vector, HesseMatrix, ProjectedMatrix, Vector};
