//! symbolic::atom: indivisible variables of the polynomial layer.
//!
//! Purpose
//! -------
//! Name the building blocks every polynomial is written over: user symbols,
//! square roots of polynomials, and elementary functions of canonical
//! expressions. Two atoms are the same variable exactly when they compare
//! equal, so the arguments stored inside radicals and functions are always
//! in canonical form.
//!
//! Conventions
//! -----------
//! - `Atom` ordering is total and deterministic (derived). The polynomial
//!   layer uses it as the variable order for lexicographic term ordering and
//!   for picking the main variable in GCD computations.
//! - [`Atom::depth`] measures radical nesting; rationalization removes the
//!   deepest radical first so that substituting `s² → P` only introduces
//!   shallower atoms.
use std::{fmt, sync::Arc};

use crate::symbolic::{expr::Expr, poly::Poly};

/// Named symbolic coordinate or parameter, e.g. `phi1` or `m1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        Symbol(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// Elementary functions understood by the differentiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuncKind {
    Exp,
    Log,
    Sin,
    Cos,
}

impl FuncKind {
    fn name(self) -> &'static str {
        match self {
            FuncKind::Exp => "exp",
            FuncKind::Log => "log",
            FuncKind::Sin => "sin",
            FuncKind::Cos => "cos",
        }
    }
}

/// Atom: a variable of the polynomial ring.
///
/// Variants
/// --------
/// - `Symbol(s)`
///   A user symbol.
/// - `Sqrt(p)`
///   Positive square root of a primitive polynomial `p` with no square
///   monomial factors. Satisfies `Sqrt(p)² = p`; the polynomial layer
///   applies this rule on every product.
/// - `Func(kind, e)`
///   `kind(e)` for a canonical expression `e`. No identities between
///   function atoms are applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    Symbol(Symbol),
    Sqrt(Arc<Poly>),
    Func(FuncKind, Arc<Expr>),
}

impl Atom {
    pub fn is_radical(&self) -> bool {
        matches!(self, Atom::Sqrt(_))
    }

    /// Nesting depth: 0 for symbols, one more than the deepest atom in the
    /// argument otherwise.
    pub fn depth(&self) -> usize {
        match self {
            Atom::Symbol(_) => 0,
            Atom::Sqrt(p) => 1 + p.max_depth(),
            Atom::Func(_, e) => 1 + e.numerator().max_depth().max(e.denominator().max_depth()),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(s) => write!(f, "{s}"),
            Atom::Sqrt(p) => write!(f, "sqrt({p})"),
            Atom::Func(kind, e) => write!(f, "{}({e})", kind.name()),
        }
    }
}
