//! calculation::reporter: presentation hook for intermediate artifacts.
//!
//! A [`Reporter`] receives the frame vectors, the Hessian, and every
//! projected entry as the calculation produces them. It returns nothing and
//! cannot influence the result. `projected_entry` is called from pool
//! worker threads in completion order, so implementations must be `Sync`
//! and must not assume any ordering between entries.
use tracing::{debug, info};

use crate::{
    geometry::{format_vector, HesseMatrix, Vector},
    symbolic::Expr,
};

/// Sequential stages of a calculation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Frame,
    Verification,
    Hessian,
    Projection,
    Done,
}

/// Receiver for intermediate artifacts. Every method defaults to a no-op.
pub trait Reporter: Sync {
    fn phase(&self, _phase: Phase) {}

    fn frame_vector(&self, _index: usize, _vector: &Vector) {}

    fn hessian(&self, _hessian: &HesseMatrix) {}

    fn projected_entry(&self, _row: usize, _col: usize, _value: &Expr) {}
}

/// Forwards every artifact to `tracing` (`info` for phases, `debug` for
/// artifacts).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn phase(&self, phase: Phase) {
        info!(?phase, "calculation phase");
    }

    fn frame_vector(&self, index: usize, vector: &Vector) {
        debug!(index, vector = %format_vector(vector), "frame vector accepted");
    }

    fn hessian(&self, hessian: &HesseMatrix) {
        for ((row, col), value) in hessian.indexed_iter() {
            debug!(row, col, %value, "hessian entry");
        }
    }

    fn projected_entry(&self, row: usize, col: usize, value: &Expr) {
        debug!(row, col, %value, "projected entry");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
