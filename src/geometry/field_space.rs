//! geometry::field_space: ordered coordinates of the field-space manifold.
//!
//! A [`FieldSpace`] fixes the dimension `n` and the coordinate order every
//! vector, matrix, and tensor in a calculation is indexed by. It also owns
//! the shape checks used by the other geometry modules.
use std::collections::BTreeSet;

use ndarray::Array1;

use crate::{
    geometry::{
        errors::{GeometryError, GeometryResult},
        types::Vector,
    },
    symbolic::{Expr, Symbol},
};

/// Ordered, non-empty sequence of distinct coordinate symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpace {
    coords: Vec<Symbol>,
}

impl FieldSpace {
    /// Validate and wrap a coordinate list.
    ///
    /// # Errors
    /// - [`GeometryError::EmptyFieldSpace`] for an empty list.
    /// - [`GeometryError::DuplicateCoordinate`] when a name repeats.
    pub fn new(coords: Vec<Symbol>) -> GeometryResult<Self> {
        if coords.is_empty() {
            return Err(GeometryError::EmptyFieldSpace);
        }
        let mut seen = BTreeSet::new();
        for c in &coords {
            if !seen.insert(c) {
                return Err(GeometryError::DuplicateCoordinate { name: c.name().to_string() });
            }
        }
        Ok(Self { coords })
    }

    /// Convenience constructor from coordinate names.
    pub fn from_names(names: &[&str]) -> GeometryResult<Self> {
        FieldSpace::new(names.iter().map(|n| Symbol::new(n)).collect())
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[Symbol] {
        &self.coords
    }

    /// Coordinate gradient `∂_a f` as a covector.
    pub fn gradient(&self, f: &Expr) -> Vector {
        Array1::from_iter(self.coords.iter().map(|c| f.diff(c)))
    }

    /// Fail with `DimensionMismatch` unless `found == self.dim()`.
    pub fn check_dim(&self, what: &'static str, found: usize) -> GeometryResult<()> {
        if found != self.dim() {
            return Err(GeometryError::DimensionMismatch { what, expected: self.dim(), found });
        }
        Ok(())
    }
}
