//! symbolic::gcd: multivariate polynomial GCD and exact division.
//!
//! Greatest common divisors over `Q[atoms]` by the recursive primitive
//! pseudo-remainder sequence: pick the greatest atom `x` as main variable,
//! split off contents (GCDs of the coefficients in `x`, computed
//! recursively over fewer atoms), and run pseudo-division on the primitive
//! parts. Radical atoms are treated as plain variables here; callers reduce
//! radicals before and after.
use crate::symbolic::{atom::Atom, poly::Poly};

/// Monic GCD of `a` and `b`. `gcd(0, 0) = 0`.
pub fn poly_gcd(a: &Poly, b: &Poly) -> Poly {
    if a.is_zero() {
        return b.monic();
    }
    if b.is_zero() {
        return a.monic();
    }
    let Some(x) = main_atom(a, b) else {
        return Poly::one();
    };
    let (da, db) = (a.degree_in(&x), b.degree_in(&x));
    if da == 0 {
        return poly_gcd(a, &content_in(b, &x));
    }
    if db == 0 {
        return poly_gcd(&content_in(a, &x), b);
    }

    let (ca, cb) = (content_in(a, &x), content_in(b, &x));
    let content = poly_gcd(&ca, &cb);
    let (Some(pa), Some(pb)) = (exact_div(a, &ca), exact_div(b, &cb)) else {
        return content;
    };
    let (pa, pb) = (primitive_over_q(&pa), primitive_over_q(&pb));
    let (mut p, mut q) = if da >= db { (pa, pb) } else { (pb, pa) };
    loop {
        let r = pseudo_rem(&p, &q, &x);
        if r.is_zero() {
            break;
        }
        if r.degree_in(&x) == 0 {
            q = Poly::one();
            break;
        }
        p = q;
        q = primitive_part_in(&r, &x);
    }
    content.mul_raw(&q).monic()
}

/// `a / b` when `b` divides `a` exactly, `None` otherwise.
pub fn exact_div(a: &Poly, b: &Poly) -> Option<Poly> {
    if b.is_zero() {
        return None;
    }
    if let Some(c) = b.as_constant() {
        return Some(a.scale(&c.recip()));
    }
    let (lm_b, lc_b) = b.leading_term().map(|(m, c)| (m.clone(), c.clone()))?;
    let mut rem = a.clone();
    let mut quot = Poly::zero();
    while let Some((lm_r, lc_r)) = rem.leading_term().map(|(m, c)| (m.clone(), c.clone())) {
        let mono = lm_r.div(&lm_b)?;
        let coeff = lc_r / &lc_b;
        rem = rem.sub(&b.mul_term(&mono, &coeff));
        quot.add_term(mono, coeff);
    }
    Some(quot)
}

fn main_atom(a: &Poly, b: &Poly) -> Option<Atom> {
    a.max_atom().into_iter().chain(b.max_atom()).max()
}

/// GCD of the coefficients of `p` viewed as a polynomial in `x`.
fn content_in(p: &Poly, x: &Atom) -> Poly {
    p.coefficients_in(x).values().fold(Poly::zero(), |acc, c| poly_gcd(&acc, c))
}

/// Primitive part in `x`, also stripped of its rational content.
///
/// `content_in` is monic, so the rational scalar picked up by
/// pseudo-division is divided out here.
fn primitive_part_in(p: &Poly, x: &Atom) -> Poly {
    let content = content_in(p, x);
    let q = exact_div(p, &content).unwrap_or_else(|| p.clone());
    primitive_over_q(&q)
}

fn primitive_over_q(p: &Poly) -> Poly {
    p.scale(&p.content().recip())
}

/// Sparse pseudo-remainder of `a` by `b` in the variable `x`.
fn pseudo_rem(a: &Poly, b: &Poly, x: &Atom) -> Poly {
    let db = b.degree_in(x);
    let lc_b = b.coefficient_in(x, db);
    let mut r = a.clone();
    while !r.is_zero() && r.degree_in(x) >= db {
        let dr = r.degree_in(x);
        let lc_r = r.coefficient_in(x, dr);
        let shift = Poly::from_atom(x.clone()).pow_raw(dr - db);
        r = r.mul_raw(&lc_b).sub(&lc_r.mul_raw(&shift).mul_raw(b));
    }
    r
}
