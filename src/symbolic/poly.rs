//! symbolic::poly: sparse multivariate polynomials over exact rationals.
//!
//! Purpose
//! -------
//! Provide the polynomial layer under [`Expr`](crate::symbolic::Expr):
//! sparse maps from [`Monomial`] to `BigRational` coefficients, written over
//! [`Atom`] variables.
//!
//! Key behaviors
//! -------------
//! - Ring arithmetic (`add`, `sub`, `mul_raw`, `pow_raw`, `scale`).
//! - Radical reduction: [`Poly::reduce_radicals`] rewrites every
//!   `sqrt(P)^k` with `k ≥ 2` as `sqrt(P)^(k mod 2) · P^(k div 2)`.
//! - Views used by the GCD and canonicalization code: coefficients in a
//!   chosen atom, lexicographic leading term, rational content, and
//!   monomial content.
//!
//! Invariants & assumptions
//! ------------------------
//! - No stored coefficient is zero; the zero polynomial has no terms.
//! - Monomials keep their factors sorted by atom with positive exponents,
//!   so structural equality of `Poly` is equality of polynomials.
//!
//! Conventions
//! -----------
//! - `*_raw` operations do not apply radical reduction. Code outside the
//!   GCD routines should reduce before handing a polynomial to `Expr`.
//! - The leading term is taken under lexicographic order with the greatest
//!   atom most significant ([`Monomial::cmp_lex`]).
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    fmt,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::symbolic::atom::{Atom, Symbol};

/// Product of atoms raised to positive integer powers.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(Vec<(Atom, u32)>);

impl Monomial {
    pub fn one() -> Monomial {
        Monomial(Vec::new())
    }

    pub fn atom(atom: Atom, exp: u32) -> Monomial {
        if exp == 0 { Monomial::one() } else { Monomial(vec![(atom, exp)]) }
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn factors(&self) -> impl Iterator<Item = (&Atom, u32)> {
        self.0.iter().map(|(a, e)| (a, *e))
    }

    /// Greatest atom with a positive exponent.
    pub fn max_atom(&self) -> Option<&Atom> {
        self.0.last().map(|(a, _)| a)
    }

    pub fn degree_of(&self, atom: &Atom) -> u32 {
        self.0.binary_search_by(|(a, _)| a.cmp(atom)).map(|i| self.0[i].1).unwrap_or(0)
    }

    /// Copy of `self` with the exponent of `atom` replaced by `exp`.
    pub fn with_exponent(&self, atom: &Atom, exp: u32) -> Monomial {
        let mut factors = self.0.clone();
        match factors.binary_search_by(|(a, _)| a.cmp(atom)) {
            Ok(i) if exp == 0 => {
                factors.remove(i);
            }
            Ok(i) => factors[i].1 = exp,
            Err(i) if exp > 0 => factors.insert(i, (atom.clone(), exp)),
            Err(_) => {}
        }
        Monomial(factors)
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut out = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                Ordering::Less => {
                    out.push(self.0[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(other.0[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((self.0[i].0.clone(), self.0[i].1 + other.0[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.0[i..]);
        out.extend_from_slice(&other.0[j..]);
        Monomial(out)
    }

    /// `self / other`, or `None` when `other` does not divide `self`.
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        let mut out = self.clone();
        for (atom, exp) in &other.0 {
            let have = out.degree_of(atom);
            if have < *exp {
                return None;
            }
            out = out.with_exponent(atom, have - exp);
        }
        Some(out)
    }

    pub fn gcd(&self, other: &Monomial) -> Monomial {
        Monomial(
            self.0
                .iter()
                .filter_map(|(a, e)| {
                    let o = other.degree_of(a);
                    (o > 0).then(|| (a.clone(), (*e).min(o)))
                })
                .collect(),
        )
    }

    /// Lexicographic comparison with the greatest atom most significant.
    pub fn cmp_lex(&self, other: &Monomial) -> Ordering {
        let (mut i, mut j) = (self.0.len(), other.0.len());
        loop {
            match (i, j) {
                (0, 0) => return Ordering::Equal,
                (0, _) => return Ordering::Less,
                (_, 0) => return Ordering::Greater,
                _ => {
                    let (a, ea) = &self.0[i - 1];
                    let (b, eb) = &other.0[j - 1];
                    match a.cmp(b) {
                        Ordering::Equal => match ea.cmp(eb) {
                            Ordering::Equal => {
                                i -= 1;
                                j -= 1;
                            }
                            ord => return ord,
                        },
                        ord => return ord,
                    }
                }
            }
        }
    }

    fn reducible_radical(&self) -> Option<(&Atom, u32, &Poly)> {
        self.0.iter().find_map(|(atom, e)| match atom {
            Atom::Sqrt(arg) if *e >= 2 => Some((atom, *e, arg.as_ref())),
            _ => None,
        })
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (atom, exp)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            if *exp == 1 { write!(f, "{atom}")? } else { write!(f, "{atom}^{exp}")? }
        }
        Ok(())
    }
}

/// Sparse polynomial with exact rational coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub fn zero() -> Poly {
        Poly::default()
    }

    pub fn one() -> Poly {
        Poly::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Poly {
        Poly::term(Monomial::one(), value)
    }

    pub fn term(mono: Monomial, coeff: BigRational) -> Poly {
        let mut out = Poly::zero();
        out.add_term(mono, coeff);
        out
    }

    pub fn from_atom(atom: Atom) -> Poly {
        Poly::term(Monomial::atom(atom, 1), BigRational::one())
    }

    pub fn from_symbol(symbol: &Symbol) -> Poly {
        Poly::from_atom(Atom::Symbol(symbol.clone()))
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// Value of a constant polynomial (zero included), `None` otherwise.
    pub fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    pub(crate) fn add_term(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.entry(mono) {
            Entry::Vacant(slot) => {
                slot.insert(coeff);
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += coeff;
                if slot.get().is_zero() {
                    slot.remove();
                }
            }
        }
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (mono, coeff) in &other.terms {
            out.add_term(mono.clone(), coeff.clone());
        }
        out
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (mono, coeff) in &other.terms {
            out.add_term(mono.clone(), -coeff);
        }
        out
    }

    pub fn neg(&self) -> Poly {
        Poly { terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect() }
    }

    pub fn scale(&self, factor: &BigRational) -> Poly {
        if factor.is_zero() {
            return Poly::zero();
        }
        Poly { terms: self.terms.iter().map(|(m, c)| (m.clone(), c * factor)).collect() }
    }

    pub fn mul_term(&self, mono: &Monomial, coeff: &BigRational) -> Poly {
        if coeff.is_zero() {
            return Poly::zero();
        }
        Poly { terms: self.terms.iter().map(|(m, c)| (m.mul(mono), c * coeff)).collect() }
    }

    /// Product without radical reduction.
    pub fn mul_raw(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                out.add_term(m1.mul(m2), c1 * c2);
            }
        }
        out
    }

    pub fn pow_raw(&self, exp: u32) -> Poly {
        let mut out = Poly::one();
        for _ in 0..exp {
            out = out.mul_raw(self);
        }
        out
    }

    /// Apply `sqrt(P)² = P` until every radical has exponent at most one.
    pub fn reduce_radicals(&self) -> Poly {
        if self.terms.keys().all(|m| m.reducible_radical().is_none()) {
            return self.clone();
        }
        let mut out = Poly::zero();
        for (mono, coeff) in &self.terms {
            let reduced = match mono.reducible_radical() {
                None => Poly::term(mono.clone(), coeff.clone()),
                Some((atom, exp, arg)) => {
                    Poly::term(mono.with_exponent(atom, exp % 2), coeff.clone())
                        .mul_raw(&arg.pow_raw(exp / 2))
                        .reduce_radicals()
                }
            };
            for (m, c) in reduced.terms {
                out.add_term(m, c);
            }
        }
        out
    }

    pub fn atoms(&self) -> BTreeSet<Atom> {
        self.terms.keys().flat_map(|m| m.factors().map(|(a, _)| a.clone())).collect()
    }

    pub fn max_atom(&self) -> Option<Atom> {
        self.terms.keys().filter_map(Monomial::max_atom).max().cloned()
    }

    pub fn max_depth(&self) -> usize {
        self.atoms().iter().map(Atom::depth).max().unwrap_or(0)
    }

    pub fn degree_in(&self, atom: &Atom) -> u32 {
        self.terms.keys().map(|m| m.degree_of(atom)).max().unwrap_or(0)
    }

    /// Coefficient of `atom^degree`, as a polynomial free of `atom`.
    pub fn coefficient_in(&self, atom: &Atom, degree: u32) -> Poly {
        let mut out = Poly::zero();
        for (mono, coeff) in &self.terms {
            if mono.degree_of(atom) == degree {
                out.add_term(mono.with_exponent(atom, 0), coeff.clone());
            }
        }
        out
    }

    /// Univariate view: degree in `atom` → coefficient polynomial.
    pub fn coefficients_in(&self, atom: &Atom) -> BTreeMap<u32, Poly> {
        let mut out: BTreeMap<u32, Poly> = BTreeMap::new();
        for (mono, coeff) in &self.terms {
            out.entry(mono.degree_of(atom))
                .or_default()
                .add_term(mono.with_exponent(atom, 0), coeff.clone());
        }
        out
    }

    pub fn leading_term(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().max_by(|(a, _), (b, _)| a.cmp_lex(b))
    }

    pub fn leading_coefficient(&self) -> Option<BigRational> {
        self.leading_term().map(|(_, c)| c.clone())
    }

    /// `self` scaled so that its leading coefficient is one.
    pub fn monic(&self) -> Poly {
        match self.leading_coefficient() {
            Some(lc) if !lc.is_one() => self.scale(&lc.recip()),
            _ => self.clone(),
        }
    }

    /// Positive rational content: gcd of numerators over lcm of denominators.
    pub fn content(&self) -> BigRational {
        let mut num = BigInt::zero();
        let mut den = BigInt::one();
        for coeff in self.terms.values() {
            num = num.gcd(coeff.numer());
            den = den.lcm(coeff.denom());
        }
        if num.is_zero() {
            return BigRational::one();
        }
        BigRational::new(num, den)
    }

    /// Largest monomial dividing every term.
    pub fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        iter.fold(first.clone(), |acc, m| acc.gcd(m))
    }

    /// Divide every term by `mono`; `None` if some term is not divisible.
    pub fn div_monomial(&self, mono: &Monomial) -> Option<Poly> {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            out.add_term(m.div(mono)?, c.clone());
        }
        Some(out)
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        let mut terms: Vec<_> = self.terms.iter().collect();
        terms.sort_by(|(a, _), (b, _)| b.cmp_lex(a));
        for (i, (mono, coeff)) in terms.into_iter().enumerate() {
            match (i, coeff.is_negative()) {
                (0, true) => f.write_str("-")?,
                (0, false) => {}
                (_, true) => f.write_str(" - ")?,
                (_, false) => f.write_str(" + ")?,
            }
            let magnitude = coeff.abs();
            if mono.is_one() {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write!(f, "{mono}")?;
            } else {
                write!(f, "{magnitude}*{mono}")?;
            }
        }
        Ok(())
    }
}
