//! Calculation: frame construction and Hessian projection.
//!
//! Purpose
//! -------
//! Drive the geometry layer to produce the projected Hessian
//! `H(w_a, w_b)` on an orthonormal frame adapted to the gradient of the
//! potential.
//!
//! Key behaviors
//! -------------
//! - [`build_basis`] runs Gram-Schmidt under the field-space metric, with
//!   overlaps taken against the original guesses.
//! - [`verify_orthonormal`] checks the frame before it is used.
//! - [`project`] contracts the Hessian with two frame vectors.
//! - [`SymbolicCalculation::execute`] sequences everything and evaluates
//!   the `n²` projections on a bounded rayon pool.
//!
//! Invariants & assumptions
//! ------------------------
//! - Phases are strictly sequential; only the projections run in parallel.
//! - Errors are fatal and never retried; no partial outcome is returned.
//!
//! Conventions
//! -----------
//! - Frame vector 0 is the normalized metric-raised gradient; vectors
//!   `1..n` come from the guesses in order.
//! - `projected[[a, b]]` uses frame vector `a` on the left.
pub mod basis;
pub mod errors;
pub mod options;
pub mod projector;
pub mod reporter;
pub mod run;

pub use self::basis::{build_basis, gradient_seed, next_frame_vector, verify_orthonormal, Basis};
pub use self::errors::{CalcError, CalcResult};
pub use self::options::{CalculationOptions, DEFAULT_WORKERS};
pub use self::projector::project;
pub use self::reporter::{Phase, Reporter, SilentReporter, TracingReporter};
pub use self::run::{run, CalculationOutcome, SymbolicCalculation};
