/// Error types for checked matrix operations
use thiserror::Error;

/// Errors reported by the checked entry points of this crate.
///
/// The arithmetic itself is total; only row lookup by runtime index,
/// checked inversion and text parsing can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Row index outside `0..4`
    #[error("Row index {0} is out of range for a 4x4 matrix")]
    RowOutOfRange(usize),

    /// The matrix has a zero or non-finite determinant
    #[error("Matrix is singular (determinant {determinant})")]
    Singular { determinant: f64 },

    /// Malformed textual matrix
    #[error("Failed to parse matrix: {0}")]
    Parse(String),
}
