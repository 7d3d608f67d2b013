//! Error types for component stores

use symcomp_index::IndexError;
use thiserror::Error;

/// Errors raised by operations on [Components](crate::Components)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid index tuple or symmetry declaration
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The operands of a binary operation do not share their frame,
    /// number of indices or start index
    #[error("Incompatible operands: {reason}")]
    IncompatibleOperands { reason: String },

    /// A nonzero value was assigned to a component forced to zero by antisymmetry
    #[error("By antisymmetry, the component cannot have a nonzero value for the indices {indices:?}")]
    AntisymmetryConflict { indices: Vec<usize> },

    /// The components cannot be changed
    #[error("The components of a Kronecker delta cannot be changed")]
    Frozen,

    /// Positions given to a contraction, symmetrization or swap are invalid
    #[error("Invalid index positions: {reason}")]
    InvalidPositions { reason: String },

    /// An integer has no counterpart in the coefficient ring
    #[error("Cannot represent {value} in the coefficient ring")]
    ScalarCoercion { value: i64 },

    /// A nested array does not have the shape `[dim; nid]`
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
