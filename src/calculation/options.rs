//! calculation::options: run configuration.
use crate::{
    calculation::errors::{CalcError, CalcResult},
    geometry::HessianFill,
};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 8;

/// Configuration for a [`SymbolicCalculation`](crate::calculation::SymbolicCalculation) run.
///
/// Fields:
/// - `workers: usize`: threads in the pool that evaluates the `n²`
///   projections. Frame and Hessian construction always run on the
///   calling thread.
/// - `hessian_fill: HessianFill`: whether all Hessian entries are
///   computed and symmetry-checked, or only the upper triangle.
///
/// Constructor:
/// - `new(workers, hessian_fill) -> CalcResult<Self>` rejects `workers == 0`.
///
/// Default:
/// - `workers`: `8`
/// - `hessian_fill`: `HessianFill::Full`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationOptions {
    pub workers: usize,
    pub hessian_fill: HessianFill,
}

impl CalculationOptions {
    /// Create validated options.
    ///
    /// # Errors
    /// [`CalcError::InvalidWorkerCount`] if `workers == 0`.
    pub fn new(workers: usize, hessian_fill: HessianFill) -> CalcResult<Self> {
        if workers == 0 {
            return Err(CalcError::InvalidWorkerCount {
                workers,
                reason: "At least one worker thread is required.",
            });
        }
        Ok(Self { workers, hessian_fill })
    }
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self { workers: DEFAULT_WORKERS, hessian_fill: HessianFill::Full }
    }
}
