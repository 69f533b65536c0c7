//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, out-of-range cells, mismatched grid sizes, invalid sampling
//! weights, and inputs whose connectivity does not allow the requested operation.
//!
//! A missing path between two endpoints is not an error; generators report it as `None`.
use thiserror::Error;

use crate::grid::{Cell, GridSize};

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cell {cell} is outside of a {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("grid size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: GridSize, actual: GridSize },

    #[error("invalid weight {weight} at index {index}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("cell {cell} is not walkable")]
    NotWalkable { cell: Cell },

    #[error("disconnected input: {0}")]
    Disconnected(String),
}

impl Error {
    pub(crate) fn out_of_bounds(cell: Cell, size: GridSize) -> Self {
        Error::OutOfBounds {
            cell,
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_cell_and_size() {
        let err = Error::out_of_bounds(Cell::new(7, 2), GridSize::new(4, 3));
        assert_eq!(err.to_string(), "cell (7, 2) is outside of a 4x3 grid");
    }

    #[test]
    fn size_mismatch_message_uses_dimensions() {
        let err = Error::SizeMismatch {
            expected: GridSize::new(3, 3),
            actual: GridSize::new(2, 5),
        };
        assert!(matches!(err, Error::SizeMismatch { .. }));
        assert_eq!(err.to_string(), "grid size mismatch: expected 3x3, got 2x5");
    }
}
