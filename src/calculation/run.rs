//! calculation::run: end-to-end orchestration of a projection run.
//!
//! Purpose
//! -------
//! Sequence the pipeline from validated inputs to the projected Hessian:
//! frame construction, orthonormality verification, covariant Hessian, and
//! the `n²` concurrent projections.
//!
//! Key behaviors
//! -------------
//! - [`SymbolicCalculation::new`] validates coordinates, metric, and
//!   inverse once; the session can then be executed with different guesses.
//! - [`SymbolicCalculation::execute`] runs the phases strictly in order.
//!   Guess-count problems surface before any Gram-Schmidt or Hessian work.
//! - Projections run on a dedicated rayon pool of `workers` threads and are
//!   collected through an indexed parallel iterator, so entry `(a, b)` lands
//!   at row `a`, column `b` whatever the completion order.
//!
//! Invariants & assumptions
//! ------------------------
//! - The frame and Hessian are complete and immutable before the fan-out
//!   starts; tasks share them read-only.
//! - Any failing task fails the run; no partial matrix is returned.
//!
//! Downstream usage
//! ----------------
//! - [`run`] is the one-call entry point with default options and
//!   tracing-backed reporting.
//!
//! Testing notes
//! -------------
//! - The fan-out is tested with tasks that finish in reverse order.
//!   End-to-end scenarios live in `tests/`.
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    calculation::{
        basis::{build_basis, gradient_seed, verify_orthonormal, Basis},
        errors::{CalcError, CalcResult},
        options::CalculationOptions,
        projector::project,
        reporter::{Phase, Reporter, TracingReporter},
    },
    geometry::{hessian, FieldSpace, HesseMatrix, Metric, ProjectedMatrix, Vector},
    symbolic::{Expr, Symbol},
};

/// Everything a successful run produces.
///
/// - `frame`: orthonormal frame, gradient direction first.
/// - `hessian`: covariant Hessian in coordinate components.
/// - `projected`: `projected[[a, b]] = H(w_a, w_b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    pub frame: Basis,
    pub hessian: HesseMatrix,
    pub projected: ProjectedMatrix,
}

/// Validated session: a metric over its field space and a potential.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicCalculation {
    metric: Metric,
    potential: Expr,
}

impl SymbolicCalculation {
    /// Validate the inputs of a calculation.
    ///
    /// Errors
    /// ------
    /// - `Geometry(EmptyFieldSpace | DuplicateCoordinate)` for bad coordinates.
    /// - `Geometry(DimensionMismatch | AsymmetricMetric | SingularMetric)`
    ///   for a bad metric. The inverse is computed here, before any derived
    ///   quantity.
    pub fn new(coords: Vec<Symbol>, metric: Array2<Expr>, potential: Expr) -> CalcResult<Self> {
        let space = FieldSpace::new(coords)?;
        let metric = Metric::new(space, metric)?;
        Ok(Self { metric, potential })
    }

    pub fn from_metric(metric: Metric, potential: Expr) -> Self {
        Self { metric, potential }
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    pub fn potential(&self) -> &Expr {
        &self.potential
    }

    /// Run the full pipeline.
    ///
    /// Parameters
    /// ----------
    /// - `guesses`: `&[Vector]`
    ///   Exactly `n − 1` contravariant vectors of length `n`.
    /// - `opts`: `&CalculationOptions`
    ///   Worker count and Hessian fill strategy.
    /// - `reporter`: `&dyn Reporter`
    ///   Receives artifacts as they are produced.
    ///
    /// Returns
    /// -------
    /// `CalcResult<CalculationOutcome>`
    ///
    /// Errors
    /// ------
    /// - `InvalidWorkerCount` if `opts.workers == 0`.
    /// - `BasisOverflow`, `IncompleteBasis`, `Geometry(DimensionMismatch)`
    ///   for malformed guesses, before any symbolic work.
    /// - `Geometry(DegenerateVector)` for a zero gradient or dependent guess.
    /// - `FrameConsistency` if the frame fails verification.
    /// - `WorkerPool` if the thread pool cannot be started.
    pub fn execute(
        &self, guesses: &[Vector], opts: &CalculationOptions, reporter: &dyn Reporter,
    ) -> CalcResult<CalculationOutcome> {
        if opts.workers == 0 {
            return Err(CalcError::InvalidWorkerCount {
                workers: opts.workers,
                reason: "At least one worker thread is required.",
            });
        }
        let n = self.metric.dim();
        info!(dim = n, workers = opts.workers, "starting frame projection");

        reporter.phase(Phase::Frame);
        let seed = gradient_seed(&self.metric, &self.potential)?;
        let frame = build_basis(&self.metric, &seed, guesses)?;
        for (i, w) in frame.vectors().iter().enumerate() {
            reporter.frame_vector(i, w);
        }

        reporter.phase(Phase::Verification);
        verify_orthonormal(&self.metric, &frame)?;

        reporter.phase(Phase::Hessian);
        let hesse = hessian(&self.metric, &self.potential, opts.hessian_fill)?;
        reporter.hessian(&hesse);

        reporter.phase(Phase::Projection);
        let w = frame.vectors();
        let projected = fan_out(n, opts.workers, |a, b| {
            let value = project(&hesse, &w[a], &w[b])?;
            reporter.projected_entry(a, b, &value);
            Ok(value)
        })?;

        reporter.phase(Phase::Done);
        info!(dim = n, "frame projection finished");
        Ok(CalculationOutcome { frame, hessian: hesse, projected })
    }
}

/// One-call run with default options and [`TracingReporter`].
///
/// Returns the frame and the projected matrix; see
/// [`SymbolicCalculation::execute`] for errors.
pub fn run(
    coords: Vec<Symbol>, metric: Array2<Expr>, potential: Expr, guesses: &[Vector],
) -> CalcResult<(Basis, ProjectedMatrix)> {
    let calc = SymbolicCalculation::new(coords, metric, potential)?;
    let outcome = calc.execute(guesses, &CalculationOptions::default(), &TracingReporter)?;
    Ok((outcome.frame, outcome.projected))
}

/// Evaluate `task(a, b)` for every cell of an `n × n` grid on a pool of
/// `workers` threads and assemble the results by index.
pub(crate) fn fan_out<F>(n: usize, workers: usize, task: F) -> CalcResult<Array2<Expr>>
where
    F: Fn(usize, usize) -> CalcResult<Expr> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("inflatox-projection-{i}"))
        .build()?;
    let entries = pool.install(|| {
        (0..n * n).into_par_iter().map(|idx| task(idx / n, idx % n)).collect::<CalcResult<Vec<Expr>>>()
    })?;
    debug!(entries = entries.len(), "projection fan-out collected");
    Ok(Array2::from_shape_vec((n, n), entries)?)
}
