//! symbolic::diff: partial derivatives of canonical expressions.
//!
//! Derivatives are taken term by term over the polynomial layer with the
//! product rule, then combined through the quotient rule. Atom derivatives
//! follow the chain rule:
//!
//! - `d sqrt(P) = dP · sqrt(P) / (2P)`
//! - `d exp(u) = exp(u) · du`, `d log(u) = du / u`
//! - `d sin(u) = cos(u) · du`, `d cos(u) = −sin(u) · du`
//!
//! Every intermediate result is canonical, so the output of `diff` is in
//! normal form and may be compared structurally.
use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::symbolic::{
    atom::{Atom, FuncKind, Symbol},
    expr::Expr,
    poly::Poly,
};

impl Expr {
    /// Partial derivative `∂self/∂symbol`.
    ///
    /// Returns
    /// -------
    /// `Expr`
    ///   Canonical derivative; zero when `symbol` does not occur in `self`.
    ///
    /// Notes
    /// -----
    /// - Infallible: the quotient rule only divides by the square of the
    ///   (non-zero) denominator, and `d log(u)` divides by `u ≠ 0`.
    pub fn diff(&self, symbol: &Symbol) -> Expr {
        let num = self.numerator();
        let den = self.denominator();
        let dn = diff_poly(num, symbol);
        if den.is_one() {
            return dn;
        }
        let dd = diff_poly(den, symbol);
        if dd.is_zero() {
            return dn * Expr::from_parts(Poly::one(), den.clone());
        }
        let top = dn * Expr::from_poly(den.clone()) - Expr::from_poly(num.clone()) * dd;
        top * Expr::from_parts(Poly::one(), den.mul_raw(den))
    }
}

fn diff_poly(p: &Poly, symbol: &Symbol) -> Expr {
    let target = Atom::Symbol(symbol.clone());
    let mut atom_derivatives: BTreeMap<Atom, Expr> = BTreeMap::new();
    for atom in p.atoms() {
        if matches!(atom, Atom::Symbol(_)) {
            continue;
        }
        let d = diff_atom(&atom, symbol);
        if !d.is_zero() {
            atom_derivatives.insert(atom, d);
        }
    }

    // Symbol factors differentiate to constants and stay in the polynomial ring.
    let mut plain = Poly::zero();
    let mut chained = Expr::zero();
    for (mono, coeff) in p.terms() {
        for (atom, exp) in mono.factors() {
            let lowered = mono.with_exponent(atom, exp - 1);
            let factor = coeff * BigRational::from_integer(BigInt::from(exp));
            if *atom == target {
                plain.add_term(lowered, factor);
            } else if let Some(d) = atom_derivatives.get(atom) {
                chained = chained + Expr::from_poly(Poly::term(lowered, factor)) * d;
            }
        }
    }
    Expr::from_poly(plain) + chained
}

fn diff_atom(atom: &Atom, symbol: &Symbol) -> Expr {
    match atom {
        Atom::Symbol(s) if s == symbol => Expr::one(),
        Atom::Symbol(_) => Expr::zero(),
        Atom::Sqrt(arg) => {
            let d_arg = diff_poly(arg, symbol);
            if d_arg.is_zero() {
                return Expr::zero();
            }
            let two_arg = arg.scale(&BigRational::from_integer(BigInt::from(2)));
            d_arg * Expr::from_parts(Poly::from_atom(atom.clone()), two_arg)
        }
        Atom::Func(kind, arg) => {
            let du = arg.diff(symbol);
            if du.is_zero() {
                return Expr::zero();
            }
            match kind {
                FuncKind::Exp => Expr::from_atom(atom.clone()) * du,
                FuncKind::Log => {
                    du * Expr::from_parts(arg.denominator().clone(), arg.numerator().clone())
                }
                FuncKind::Sin => arg.cos() * du,
                FuncKind::Cos => -(arg.sin() * du),
            }
        }
    }
}
