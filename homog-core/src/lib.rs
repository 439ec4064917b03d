/// Homog Core Library - 4x4 homogeneous transform algebra
///
/// This library provides the value types used by the rendering pipeline:
/// points, affine and projective matrices, rotation and perspective
/// builders, viewport projection and a single-precision interchange form.

pub mod affine;
pub mod error;
pub mod matrix;
pub mod parse;
pub mod point;
pub mod reduced;
pub mod scalar;

// Re-export commonly used types
pub use affine::Matrix4x3;
pub use error::MatrixError;
pub use matrix::{Matrix44, Matrix4x4, MAX_FIELD_OF_VIEW_DEGREES};
pub use point::{Point3, Point4};
pub use reduced::Matrix4x4f;
pub use scalar::{degrees_to_radians, radians_to_degrees, Real, Scalar, TypeData, WorldUnit};
