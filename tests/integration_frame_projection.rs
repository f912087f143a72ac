//! Integration tests for the frame-projection pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end run: from coordinates, metric, and potential,
//!   through the Gram-Schmidt frame and covariant Hessian, to the projected
//!   matrix assembled from concurrent evaluations.
//! - Use models with closed-form answers (flat quadratic, polar, and
//!   exponential field spaces) so every entry can be compared exactly.
//!
//! Coverage
//! --------
//! - `calculation::SymbolicCalculation`:
//!   - Successful runs on flat and curved metrics, including a metric
//!     with off-diagonal terms.
//!   - Degenerate and overflowing guesses, and the phases reached before
//!     failure.
//!   - Reporter callbacks for frame vectors, Hessian, and entries.
//! - `calculation::run`:
//!   - The one-call entry point with default options.
//! - Input validation for singular and asymmetric metrics.
//!
//! Exclusions
//! ----------
//! - Canonical-form internals and derivative rules, which are covered by
//!   unit tests in `symbolic`.
//! - Algebraic properties over random inputs (see `property_metric_algebra.rs`).
use std::sync::Mutex;

use inflatox::{
    calculation::{
        run, CalcError, CalculationOptions, Phase, Reporter, SilentReporter, SymbolicCalculation,
    },
    geometry::{GeometryError, HessianFill, HesseMatrix, Vector},
    symbolic::{first_asymmetry, Expr, Symbol},
};
use ndarray::{array, Array2};

/// Collects every callback for later inspection.
#[derive(Default)]
struct RecordingReporter {
    phases: Mutex<Vec<Phase>>,
    frame: Mutex<Vec<usize>>,
    hessians: Mutex<usize>,
    entries: Mutex<Vec<(usize, usize)>>,
}

impl Reporter for RecordingReporter {
    fn phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn frame_vector(&self, index: usize, _vector: &Vector) {
        self.frame.lock().unwrap().push(index);
    }

    fn hessian(&self, _hessian: &HesseMatrix) {
        *self.hessians.lock().unwrap() += 1;
    }

    fn projected_entry(&self, row: usize, col: usize, _value: &Expr) {
        self.entries.lock().unwrap().push((row, col));
    }
}

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn half() -> Expr {
    Expr::rational(1, 2).unwrap()
}

fn coords(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|n| Symbol::new(n)).collect()
}

fn diag(entries: Vec<Expr>) -> Array2<Expr> {
    let n = entries.len();
    let mut g = Array2::from_elem((n, n), Expr::zero());
    for (i, e) in entries.into_iter().enumerate() {
        g[[i, i]] = e;
    }
    g
}

/// `V = ½ m1² φ1² + ½ m2² φ2²` on the flat plane.
fn flat_quadratic(m1: &Expr, m2: &Expr) -> SymbolicCalculation {
    let (p1, p2) = (sym("phi1"), sym("phi2"));
    let v = half() * m1.powi(2) * p1.powi(2) + half() * m2.powi(2) * p2.powi(2);
    SymbolicCalculation::new(coords(&["phi1", "phi2"]), diag(vec![Expr::one(), Expr::one()]), v)
        .unwrap()
}

#[test]
// Purpose
// -------
// Equal masses give a rotation-invariant mass matrix.
//
// Given
// -----
// - Flat metric, `V = ½ m² (φ1² + φ2²)`, guess `(−φ2, φ1)`.
//
// Expect
// ------
// - Hessian and projected matrix both equal `diag(m², m²)`.
// - Frame vector 0 is `(φ1, φ2)/sqrt(φ1² + φ2²)`.
fn flat_equal_masses_project_to_diagonal() {
    let m = sym("m");
    let calc = flat_quadratic(&m, &m);
    let guess = array![-sym("phi2"), sym("phi1")];

    let out = calc.execute(&[guess], &CalculationOptions::default(), &SilentReporter).unwrap();

    let m2 = m.powi(2);
    let expected = diag(vec![m2.clone(), m2]);
    assert_eq!(out.hessian, expected);
    assert_eq!(out.projected, expected);

    let radius = (sym("phi1").powi(2) + sym("phi2").powi(2)).sqrt().unwrap();
    let w0 = &out.frame.vectors()[0];
    assert_eq!(w0[0], sym("phi1").checked_div(&radius).unwrap());
    assert_eq!(w0[1], sym("phi2").checked_div(&radius).unwrap());
}

#[test]
// Purpose
// -------
// Unequal masses mix along and across the gradient direction.
//
// Given
// -----
// - Flat metric, `V = ½ m1² φ1² + ½ m2² φ2²`, guess `(0, 1)`.
// - `P = m1⁴ φ1² + m2⁴ φ2²` (squared gradient norm).
//
// Expect
// ------
// - `M00 = (m1⁶ φ1² + m2⁶ φ2²) / P`.
// - `M01 = M10 = m1² m2² φ1 φ2 (m2² − m1²) / P`.
// - `M11 = m1² m2² (m1² φ1² + m2² φ2²) / P`.
// - `M00 + M11 = m1² + m2²` (trace is frame independent).
fn flat_unequal_masses_mix_entries() {
    let (m1, m2) = (sym("m1"), sym("m2"));
    let (p1, p2) = (sym("phi1"), sym("phi2"));
    let calc = flat_quadratic(&m1, &m2);

    let out = calc
        .execute(&[array![Expr::zero(), Expr::one()]], &CalculationOptions::default(), &SilentReporter)
        .unwrap();

    let p = m1.powi(4) * p1.powi(2) + m2.powi(4) * p2.powi(2);
    let m00 = (m1.powi(6) * p1.powi(2) + m2.powi(6) * p2.powi(2)).checked_div(&p).unwrap();
    let m01 = (m1.powi(2) * m2.powi(2) * &p1 * &p2 * (m2.powi(2) - m1.powi(2)))
        .checked_div(&p)
        .unwrap();
    let m11 = (m1.powi(2) * m2.powi(2) * (m1.powi(2) * p1.powi(2) + m2.powi(2) * p2.powi(2)))
        .checked_div(&p)
        .unwrap();

    let pm = &out.projected;
    assert_eq!(pm[[0, 0]], m00);
    assert_eq!(pm[[0, 1]], m01);
    assert_eq!(pm[[1, 0]], m01);
    assert_eq!(pm[[1, 1]], m11);
    assert_eq!(&pm[[0, 0]] + &pm[[1, 1]], m1.powi(2) + m2.powi(2));
}

#[test]
// Purpose
// -------
// Curvature enters through the connection and the frame normalization.
//
// Given
// -----
// - Polar coordinates `(r, θ)`, metric `diag(1, r²)`, `V = ½ m² r²`,
//   guess `(0, 1)`.
//
// Expect
// ------
// - Frame `[(1, 0), (0, 1/r)]`.
// - Hessian `diag(m², m² r²)`, projected matrix `diag(m², m²)`.
fn polar_field_space_scenario() {
    let (r, m) = (sym("r"), sym("m"));
    let calc = SymbolicCalculation::new(
        coords(&["r", "theta"]),
        diag(vec![Expr::one(), r.powi(2)]),
        half() * m.powi(2) * r.powi(2),
    )
    .unwrap();

    let out = calc
        .execute(&[array![Expr::zero(), Expr::one()]], &CalculationOptions::default(), &SilentReporter)
        .unwrap();

    let frame = out.frame.vectors();
    assert_eq!(frame[0], array![Expr::one(), Expr::zero()]);
    assert_eq!(frame[1], array![Expr::zero(), r.recip().unwrap()]);
    assert_eq!(out.hessian, diag(vec![m.powi(2), m.powi(2) * r.powi(2)]));
    assert_eq!(out.projected, diag(vec![m.powi(2), m.powi(2)]));
}

#[test]
// Purpose
// -------
// A transcendental metric function produces radical frame components that
// cancel in the projection.
//
// Given
// -----
// - Coordinates `(p, q)`, metric `diag(1, exp(2p))`, `V = ½ m² p²`,
//   guess `(0, 1)`, and the upper-triangle fill strategy on two workers.
//
// Expect
// ------
// - Hessian `diag(m², m² p exp(2p))`.
// - Projected matrix `diag(m², m² p)`.
fn exponential_field_space_scenario() {
    let (p, m) = (sym("p"), sym("m"));
    let e = (Expr::integer(2) * &p).exp();
    let calc = SymbolicCalculation::new(
        coords(&["p", "q"]),
        diag(vec![Expr::one(), e.clone()]),
        half() * m.powi(2) * p.powi(2),
    )
    .unwrap();
    let opts = CalculationOptions::new(2, HessianFill::UpperTriangle).unwrap();

    let out = calc.execute(&[array![Expr::zero(), Expr::one()]], &opts, &SilentReporter).unwrap();

    assert_eq!(out.hessian, diag(vec![m.powi(2), m.powi(2) * &p * &e]));
    assert_eq!(out.projected, diag(vec![m.powi(2), m.powi(2) * &p]));
}

#[test]
// Purpose
// -------
// Gram-Schmidt and the covariant Hessian work on a metric with
// off-diagonal terms, and both matrices come out symmetric.
//
// Given
// -----
// - Coordinates `(x, y)`, metric `[[1 + x², x y], [x y, 1 + y²]]`,
//   `V = x² + y`, guess `(1, 0)`, two workers.
//
// Expect
// ------
// - The run succeeds with a two-vector frame (so verification passed).
// - Hessian and projected matrix are exactly symmetric.
// - Every projected entry was reported.
fn off_diagonal_metric_yields_symmetric_matrices() {
    let (x, y) = (sym("x"), sym("y"));
    let xy = &x * &y;
    let g = array![[Expr::one() + x.powi(2), xy.clone()], [xy, Expr::one() + y.powi(2)]];
    let calc = SymbolicCalculation::new(coords(&["x", "y"]), g, x.powi(2) + &y).unwrap();
    let opts = CalculationOptions::new(2, HessianFill::Full).unwrap();
    let reporter = RecordingReporter::default();

    let out = calc.execute(&[array![Expr::one(), Expr::zero()]], &opts, &reporter).unwrap();

    assert_eq!(out.frame.len(), 2);
    assert_eq!(first_asymmetry(&out.hessian), None);
    assert_eq!(first_asymmetry(&out.projected), None);
    assert_eq!(reporter.entries.lock().unwrap().len(), 4);
}

#[test]
// Purpose
// -------
// A guess parallel to the gradient fails in normalization.
//
// Given
// -----
// - Flat equal-mass model, guess `(φ1, φ2)` (parallel to the gradient).
//
// Expect
// ------
// - `Geometry(DegenerateVector)`; the run stops during frame construction.
fn parallel_guess_raises_degenerate_vector() {
    let m = sym("m");
    let calc = flat_quadratic(&m, &m);
    let reporter = RecordingReporter::default();

    let err = calc
        .execute(&[array![sym("phi1"), sym("phi2")]], &CalculationOptions::default(), &reporter)
        .unwrap_err();

    assert!(matches!(err, CalcError::Geometry(GeometryError::DegenerateVector { .. })));
    assert_eq!(*reporter.phases.lock().unwrap(), vec![Phase::Frame]);
    assert!(reporter.frame.lock().unwrap().is_empty());
}

#[test]
// Purpose
// -------
// Supplying `n` guesses fails before any Hessian work.
//
// Given
// -----
// - Flat 2-field model with two guesses.
//
// Expect
// ------
// - `BasisOverflow { supplied: 2, capacity: 1 }`.
// - The Hessian phase is never reached and no Hessian is reported.
fn extra_guess_raises_overflow_before_hessian() {
    let m = sym("m");
    let calc = flat_quadratic(&m, &m);
    let reporter = RecordingReporter::default();
    let guesses = [array![Expr::zero(), Expr::one()], array![Expr::one(), Expr::zero()]];

    let err = calc.execute(&guesses, &CalculationOptions::default(), &reporter).unwrap_err();

    assert_eq!(err, CalcError::BasisOverflow { supplied: 2, capacity: 1 });
    assert!(!reporter.phases.lock().unwrap().contains(&Phase::Hessian));
    assert_eq!(*reporter.hessians.lock().unwrap(), 0);
}

#[test]
// Purpose
// -------
// Reporter callbacks see every artifact exactly once.
//
// Given
// -----
// - Flat equal-mass model, one worker and four workers.
//
// Expect
// ------
// - Phases in order, two frame vectors, one Hessian, four entries.
// - Identical projected matrices for both worker counts.
fn reporter_receives_every_artifact() {
    let m = sym("m");
    let calc = flat_quadratic(&m, &m);
    let guess = [array![-sym("phi2"), sym("phi1")]];
    let reporter = RecordingReporter::default();

    let single = CalculationOptions::new(1, HessianFill::Full).unwrap();
    let out_single = calc.execute(&guess, &single, &reporter).unwrap();

    assert_eq!(
        *reporter.phases.lock().unwrap(),
        vec![Phase::Frame, Phase::Verification, Phase::Hessian, Phase::Projection, Phase::Done]
    );
    assert_eq!(*reporter.frame.lock().unwrap(), vec![0, 1]);
    assert_eq!(*reporter.hessians.lock().unwrap(), 1);
    let mut entries = reporter.entries.lock().unwrap().clone();
    entries.sort();
    assert_eq!(entries, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    let multi = CalculationOptions::new(4, HessianFill::Full).unwrap();
    let out_multi = calc.execute(&guess, &multi, &SilentReporter).unwrap();
    assert_eq!(out_single.projected, out_multi.projected);
}

#[test]
// Purpose
// -------
// The one-call entry point returns the frame and projected matrix.
fn run_entry_point_matches_session() {
    let m = sym("m");
    let v = half() * m.powi(2) * (sym("x").powi(2) + sym("y").powi(2));
    let g = diag(vec![Expr::one(), Expr::one()]);

    let (frame, projected) =
        run(coords(&["x", "y"]), g, v, &[array![-sym("y"), sym("x")]]).unwrap();

    assert_eq!(frame.len(), 2);
    assert_eq!(projected, diag(vec![m.powi(2), m.powi(2)]));
}

#[test]
// Purpose
// -------
// Invalid metrics are rejected when the session is created.
//
// Given
// -----
// - The rank-one metric `[[1, x], [x, x²]]` and an asymmetric metric.
//
// Expect
// ------
// - `Geometry(SingularMetric)` and `Geometry(AsymmetricMetric)`.
fn invalid_metrics_are_rejected() {
    let x = sym("x");
    let singular = array![[Expr::one(), x.clone()], [x.clone(), x.powi(2)]];
    let err = SymbolicCalculation::new(coords(&["x", "y"]), singular, x.clone()).unwrap_err();
    assert!(matches!(err, CalcError::Geometry(GeometryError::SingularMetric { .. })));

    let asymmetric = array![[Expr::one(), x.clone()], [Expr::zero(), Expr::one()]];
    let err = SymbolicCalculation::new(coords(&["x", "y"]), asymmetric, x).unwrap_err();
    assert_eq!(err, CalcError::Geometry(GeometryError::AsymmetricMetric { row: 0, col: 1 }));
}
