/// Single-precision snapshot of a matrix for GPU upload and other
/// narrow-precision consumers
use crate::{matrix::Matrix4x4, point::Point4, scalar::Scalar};
use bytemuck::{Pod, Zeroable};
use num_traits::AsPrimitive;

/// A [`Matrix4x4`] narrowed to `f32`, laid out as 16 contiguous floats in
/// row-major order.
///
/// Only built by converting a full matrix; it keeps no link to its source.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Matrix4x4f {
    rows: [Point4<f32>; 4],
}

impl Matrix4x4f {
    pub fn row(&self, i: usize) -> &Point4<f32> {
        &self.rows[i]
    }

    /// The 64-byte row-major buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn to_row_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }
}

impl<T: Scalar + AsPrimitive<f32>> From<&Matrix4x4<T>> for Matrix4x4f {
    fn from(matrix: &Matrix4x4<T>) -> Self {
        let narrow = |row: &Point4<T>| Point4::new(row.x.as_(), row.y.as_(), row.z.as_(), row.w.as_());
        Self {
            rows: [
                narrow(&matrix[0]),
                narrow(&matrix[1]),
                narrow(&matrix[2]),
                narrow(&matrix[3]),
            ],
        }
    }
}

impl<T: Scalar + AsPrimitive<f32>> From<Matrix4x4<T>> for Matrix4x4f {
    fn from(matrix: Matrix4x4<T>) -> Self {
        Self::from(&matrix)
    }
}
