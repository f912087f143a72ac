//! symbolic::canon: the canonicalization pass.
//!
//! Purpose
//! -------
//! Bring a pair `(num, den)` of polynomials into the unique normal form
//! stored by [`Expr`]. Every arithmetic combination in the crate ends here,
//! which keeps expression size bounded across the Gram-Schmidt and
//! projection steps and makes structural equality a valid equality test.
//!
//! Key behaviors
//! -------------
//! 1. Reduce `sqrt(P)^k` with `k ≥ 2` in both numerator and denominator.
//! 2. Rationalize: while the denominator holds a radical `s`, write it as
//!    `A + B·s` and multiply through by `A − B·s`, deepest radical first.
//! 3. Cancel the polynomial GCD of numerator and denominator.
//! 4. Scale so the denominator's lexicographic leading coefficient is one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `den` is non-zero on entry; checked division guards this upstream.
//! - On exit the denominator is radical free and monic, and numerator and
//!   denominator share no non-constant factor.
//!
//! Notes
//! -----
//! - Power denesting for square roots ([`split_square`]) assumes positive
//!   symbols, so `sqrt(x²) = x`.
//! - Relations between distinct radicals (e.g. `sqrt(2)·sqrt(3) = sqrt(6)`)
//!   are not detected; expressions equal only through such a relation keep
//!   distinct representations.
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::symbolic::{
    atom::Atom,
    expr::Expr,
    gcd::{exact_div, poly_gcd},
    poly::{Monomial, Poly},
};

/// Trial-division bound used when extracting square factors of integers.
pub const TRIAL_DIVISION_LIMIT: u32 = 1000;

/// Canonical expression for `num / den`.
pub fn canonicalize(num: Poly, den: Poly) -> Expr {
    debug_assert!(!den.is_zero(), "canonicalize called with a zero denominator");
    let mut num = num.reduce_radicals();
    let mut den = den.reduce_radicals();
    if num.is_zero() {
        return Expr::zero();
    }
    rationalize(&mut num, &mut den);
    cancel_common_factors(&mut num, &mut den);
    if let Some(lc) = den.leading_coefficient() {
        if !lc.is_one() {
            let inv = lc.recip();
            num = num.scale(&inv);
            den = den.scale(&inv);
        }
    }
    Expr::from_canonical_parts(num, den)
}

fn rationalize(num: &mut Poly, den: &mut Poly) {
    while let Some(radical) = deepest_radical(den) {
        let coeffs = den.coefficients_in(&radical);
        let a = coeffs.get(&0).cloned().unwrap_or_default();
        let b = coeffs.get(&1).cloned().unwrap_or_default();
        let conjugate = a.sub(&b.mul_raw(&Poly::from_atom(radical.clone())));
        let next = den.mul_raw(&conjugate).reduce_radicals();
        if next.is_zero() || next.degree_in(&radical) > 0 {
            break;
        }
        *num = num.mul_raw(&conjugate).reduce_radicals();
        *den = next;
    }
}

fn deepest_radical(p: &Poly) -> Option<Atom> {
    p.atoms().into_iter().filter(Atom::is_radical).max_by_key(Atom::depth)
}

fn cancel_common_factors(num: &mut Poly, den: &mut Poly) {
    if den.is_constant() {
        return;
    }
    let g = poly_gcd(num, den);
    if g.is_constant() {
        return;
    }
    if let (Some(n), Some(d)) = (exact_div(num, &g), exact_div(den, &g)) {
        *num = n;
        *den = d;
    }
}

/// Split a non-zero radicand `R` into `(outside, inside)` with
/// `sqrt(R) = outside · sqrt(inside)` under positive-symbol assumptions.
///
/// `outside` is a single term; `inside` carries the square-free part of
/// the rational content and the primitive polynomial without its square
/// monomial factors. Equal radicands up to square factors yield the same
/// `inside`.
pub fn split_square(radicand: &Poly) -> (Poly, Poly) {
    let content = radicand.content();
    let primitive = radicand.scale(&content.recip());

    let mono = primitive.monomial_content();
    let mut outer_mono = Monomial::one();
    for (atom, exp) in mono.factors() {
        outer_mono = outer_mono.mul(&Monomial::atom(atom.clone(), exp / 2));
    }
    let inner = primitive.div_monomial(&outer_mono.mul(&outer_mono)).unwrap_or(primitive);

    let scaled = content.numer() * content.denom();
    let (root, rest) = split_square_integer(&scaled);
    let outside = Poly::term(outer_mono, BigRational::new(root, content.denom().clone()));
    let inside = inner.scale(&BigRational::from_integer(rest));
    (outside, inside)
}

/// Write a positive integer `k` as `root² · rest`.
fn split_square_integer(k: &BigInt) -> (BigInt, BigInt) {
    let mut root = BigInt::one();
    let mut rest = BigInt::one();
    let mut remaining = k.clone();
    let mut f = BigInt::from(2u32);
    let limit = BigInt::from(TRIAL_DIVISION_LIMIT);
    while &f * &f <= remaining && f <= limit {
        let mut count = 0u32;
        while (&remaining % &f).is_zero() {
            remaining /= &f;
            count += 1;
        }
        root *= f.pow(count / 2);
        if count % 2 == 1 {
            rest *= &f;
        }
        f += 1u32;
    }
    let r = remaining.sqrt();
    if &r * &r == remaining {
        root *= r;
    } else {
        rest *= remaining;
    }
    (root, rest)
}
