/// 4x3 affine transforms (3x3 linear block plus a translation row)
use crate::{point::Point3, scalar::Scalar};

/// An affine transform in the row-vector convention: three rows of the
/// linear part followed by the translation row. The implicit fourth column
/// is `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4x3<T> {
    rows: [Point3<T>; 4],
}

impl<T: Scalar> Matrix4x3<T> {
    pub const IDENTITY: Self = Self {
        rows: [
            Point3::new(T::IDENTITY, T::ZERO, T::ZERO),
            Point3::new(T::ZERO, T::IDENTITY, T::ZERO),
            Point3::new(T::ZERO, T::ZERO, T::IDENTITY),
            Point3::new(T::ZERO, T::ZERO, T::ZERO),
        ],
    };

    pub fn new(
        row0: Point3<T>,
        row1: Point3<T>,
        row2: Point3<T>,
        translation: Point3<T>,
    ) -> Self {
        Self {
            rows: [row0, row1, row2, translation],
        }
    }

    /// Pure translation with an identity linear part.
    pub fn from_translation(translation: Point3<T>) -> Self {
        let mut matrix = Self::IDENTITY;
        matrix.rows[3] = translation;
        matrix
    }

    /// Row `i` of the linear block.
    ///
    /// # Panics
    /// If `i` is not in `0..3`.
    pub fn linear_row(&self, i: usize) -> Point3<T> {
        assert!(i < 3, "Linear row index {} is out of range", i);
        self.rows[i]
    }

    pub fn translation(&self) -> Point3<T> {
        self.rows[3]
    }
}
