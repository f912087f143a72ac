//! symbolic::expr: canonical symbolic scalars.
//!
//! Purpose
//! -------
//! Represent every scalar quantity of the calculation (metric components,
//! potentials, vector components, Hessian entries) as an immutable
//! canonical rational function `num / den` over [`Atom`]s.
//!
//! Key behaviors
//! -------------
//! - Ring operations through `std::ops` (`+`, `-`, `*`, unary `-`) on owned
//!   values and references; every result passes through
//!   [`canonicalize`](crate::symbolic::canon::canonicalize).
//! - Checked division ([`Expr::checked_div`]) and square roots
//!   ([`Expr::sqrt`]) that report [`SymbolicError`] instead of panicking.
//! - Elementary functions `exp`, `ln`, `sin`, `cos` with constant folding
//!   at zero.
//! - Structural zero/one tests that are exact for canonical forms.
//!
//! Invariants & assumptions
//! ------------------------
//! - The denominator is non-zero, radical free, monic, and coprime to the
//!   numerator. The derived `PartialEq`/`Hash` therefore compare values.
//! - `Expr` is `Send + Sync`; radical and function arguments are shared
//!   through `Arc`.
//!
//! Conventions
//! -----------
//! - `Display` prints `num` or `(num)/(den)`, with terms in descending
//!   lexicographic order, e.g. `(m1^2*phi1)/(phi1^2 + phi2^2)`.
use std::{
    fmt,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
    sync::Arc,
};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use crate::symbolic::{
    atom::{Atom, FuncKind, Symbol},
    canon::{canonicalize, split_square},
    errors::{SymbolicError, SymbolicResult},
    poly::Poly,
};

/// Canonical symbolic scalar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expr {
    num: Poly,
    den: Poly,
}

impl Expr {
    pub fn zero() -> Expr {
        Expr { num: Poly::zero(), den: Poly::one() }
    }

    pub fn one() -> Expr {
        Expr::integer(1)
    }

    pub fn integer(value: i64) -> Expr {
        Expr::from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// `numer / denom` as an exact rational constant.
    ///
    /// # Errors
    /// [`SymbolicError::DivisionByZero`] when `denom == 0`.
    pub fn rational(numer: i64, denom: i64) -> SymbolicResult<Expr> {
        if denom == 0 {
            return Err(SymbolicError::DivisionByZero { dividend: numer.to_string() });
        }
        Ok(Expr::from_rational(BigRational::new(BigInt::from(numer), BigInt::from(denom))))
    }

    pub fn from_rational(value: BigRational) -> Expr {
        Expr { num: Poly::constant(value), den: Poly::one() }
    }

    pub fn symbol(name: &str) -> Expr {
        Expr::from(Symbol::new(name))
    }

    pub(crate) fn from_atom(atom: Atom) -> Expr {
        Expr { num: Poly::from_atom(atom), den: Poly::one() }
    }

    /// Expression for a polynomial; radicals are reduced.
    pub(crate) fn from_poly(p: Poly) -> Expr {
        Expr { num: p.reduce_radicals(), den: Poly::one() }
    }

    /// Canonical expression for `num / den`; `den` must be non-zero.
    pub(crate) fn from_parts(num: Poly, den: Poly) -> Expr {
        canonicalize(num, den)
    }

    /// Wrap parts that are already canonical. Only `canon` calls this.
    pub(crate) fn from_canonical_parts(num: Poly, den: Poly) -> Expr {
        Expr { num, den }
    }

    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    /// Value of a rational constant, `None` if the expression has atoms.
    pub fn as_rational(&self) -> Option<BigRational> {
        let n = self.num.as_constant()?;
        let d = self.den.as_constant()?;
        Some(n / d)
    }

    /// Number of stored terms; a rough size measure used in logging.
    pub fn term_count(&self) -> usize {
        self.num.len() + self.den.len()
    }

    pub fn powi(&self, exp: u32) -> Expr {
        let mut out = Expr::one();
        for _ in 0..exp {
            out = &out * self;
        }
        out
    }

    /// `self / divisor`.
    ///
    /// # Errors
    /// [`SymbolicError::DivisionByZero`] when `divisor` canonicalizes to 0.
    pub fn checked_div(&self, divisor: &Expr) -> SymbolicResult<Expr> {
        if divisor.is_zero() {
            return Err(SymbolicError::DivisionByZero { dividend: self.to_string() });
        }
        Ok(Expr::from_parts(self.num.mul_raw(&divisor.den), self.den.mul_raw(&divisor.num)))
    }

    pub fn recip(&self) -> SymbolicResult<Expr> {
        Expr::one().checked_div(self)
    }

    /// Positive square root with power denesting.
    ///
    /// Parameters
    /// ----------
    /// - `self`: radicand. Symbols are assumed positive, so
    ///   `sqrt(x²·y) = x·sqrt(y)`.
    ///
    /// Returns
    /// -------
    /// `SymbolicResult<Expr>`
    ///   `outside · sqrt(inside)` where `inside` is a primitive polynomial
    ///   without square monomial factors, or a radical-free expression
    ///   when the radicand is a perfect square of a monomial.
    ///
    /// Errors
    /// ------
    /// - [`SymbolicError::NegativeRadicand`] for negative rational constants.
    ///
    /// Notes
    /// -----
    /// - `sqrt(N/D)` is rewritten as `sqrt(N·D)/D` so that radical
    ///   arguments are always polynomials.
    /// - Perfect squares of non-monomial polynomials are not detected.
    pub fn sqrt(&self) -> SymbolicResult<Expr> {
        if self.is_zero() {
            return Ok(Expr::zero());
        }
        if let Some(c) = self.as_rational() {
            if c.is_negative() {
                return Err(SymbolicError::NegativeRadicand { value: c.to_string() });
            }
        }
        let radicand = self.num.mul_raw(&self.den).reduce_radicals();
        let (outside, inside) = split_square(&radicand);
        let root = if inside.is_one() {
            Poly::one()
        } else {
            Poly::from_atom(Atom::Sqrt(Arc::new(inside)))
        };
        Ok(Expr::from_parts(outside.mul_raw(&root), self.den.clone()))
    }

    pub fn exp(&self) -> Expr {
        if self.is_zero() {
            return Expr::one();
        }
        Expr::from_atom(Atom::Func(FuncKind::Exp, Arc::new(self.clone())))
    }

    /// Natural logarithm.
    ///
    /// # Errors
    /// [`SymbolicError::LogOfZero`] when `self` canonicalizes to 0.
    pub fn ln(&self) -> SymbolicResult<Expr> {
        if self.is_zero() {
            return Err(SymbolicError::LogOfZero);
        }
        if self.is_one() {
            return Ok(Expr::zero());
        }
        Ok(Expr::from_atom(Atom::Func(FuncKind::Log, Arc::new(self.clone()))))
    }

    pub fn sin(&self) -> Expr {
        if self.is_zero() {
            return Expr::zero();
        }
        Expr::from_atom(Atom::Func(FuncKind::Sin, Arc::new(self.clone())))
    }

    pub fn cos(&self) -> Expr {
        if self.is_zero() {
            return Expr::one();
        }
        Expr::from_atom(Atom::Func(FuncKind::Cos, Arc::new(self.clone())))
    }

    fn add_ref(&self, other: &Expr) -> Expr {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.den == other.den {
            return Expr::from_parts(self.num.add(&other.num), self.den.clone());
        }
        Expr::from_parts(
            self.num.mul_raw(&other.den).add(&other.num.mul_raw(&self.den)),
            self.den.mul_raw(&other.den),
        )
    }

    fn mul_ref(&self, other: &Expr) -> Expr {
        if self.is_zero() || other.is_zero() {
            return Expr::zero();
        }
        Expr::from_parts(self.num.mul_raw(&other.num), self.den.mul_raw(&other.den))
    }

    fn neg_ref(&self) -> Expr {
        Expr { num: self.num.neg(), den: self.den.clone() }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Expr::zero()
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::from_atom(Atom::Symbol(symbol))
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Expr::from(symbol.clone())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $body:expr) => {
        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                let f: fn(&Expr, &Expr) -> Expr = $body;
                f(self, rhs)
            }
        }
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $trait::$method(&self, &rhs)
            }
        }
        impl $trait<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $trait::$method(&self, rhs)
            }
        }
        impl $trait<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $trait::$method(self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, |a, b| a.add_ref(b));
impl_binary_op!(Sub, sub, |a, b| a.add_ref(&b.neg_ref()));
impl_binary_op!(Mul, mul, |a, b| a.mul_ref(b));

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.neg_ref()
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.neg_ref()
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

impl<'a> Sum<&'a Expr> for Expr {
    fn sum<I: Iterator<Item = &'a Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, e| acc + e)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        let wrap = |p: &Poly| if p.len() > 1 { format!("({p})") } else { p.to_string() };
        write!(f, "{}/{}", wrap(&self.num), wrap(&self.den))
    }
}
