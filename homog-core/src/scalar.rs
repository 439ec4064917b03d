//! Scalar element traits and the per-type descriptor registry.

use num_traits as nt;
use std::{fmt, ops::Neg};

/// Static description of a value type: its additive and multiplicative
/// identities plus flags about its numeric category.
///
/// Implemented once for every supported scalar and recursively for
/// [`Matrix4x4`](crate::Matrix4x4), whose flags are forwarded from the
/// element type.
pub trait TypeData: Sized {
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const IDENTITY: Self;

    const IS_INTEGRAL: bool;
    const IS_FLOAT: bool;
    const IS_POD: bool;
    const IS_BITWISE_COPY_SAFE: bool;
    const IS_POINTER: bool;
}

/// Element type for the exact part of the matrix algebra (construction,
/// arithmetic, multiplication and determinant).
pub trait Scalar:
    TypeData
    + nt::Num
    + Neg<Output = Self>
    + Copy
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
}

/// Floating point element type, required by inversion, rotation and
/// projection.
pub trait Real: Scalar + nt::Float + nt::FloatConst {
    /// Converts a literal constant into this type.
    fn of(value: f64) -> Self;

    /// Converts the scalar to `f64` for diagnostics.
    fn to_f64_lossy(self) -> f64;
}

/// Default scalar for world-space coordinates.
pub type WorldUnit = f64;

/// Converts an angle from degrees to radians.
pub fn degrees_to_radians<F: Real>(degrees: F) -> F {
    degrees * F::PI() / F::of(180.0)
}

/// Converts an angle from radians to degrees.
pub fn radians_to_degrees<F: Real>(radians: F) -> F {
    radians * F::of(180.0) * F::FRAC_1_PI()
}

macro_rules! impl_integral {
    ($i:ty) => {
        impl TypeData for $i {
            const ZERO: Self = 0;
            const IDENTITY: Self = 1;
            const IS_INTEGRAL: bool = true;
            const IS_FLOAT: bool = false;
            const IS_POD: bool = true;
            const IS_BITWISE_COPY_SAFE: bool = true;
            const IS_POINTER: bool = false;
        }

        impl Scalar for $i {}
    };
}

macro_rules! impl_float {
    ($f:ty) => {
        impl TypeData for $f {
            const ZERO: Self = 0.0;
            const IDENTITY: Self = 1.0;
            const IS_INTEGRAL: bool = false;
            const IS_FLOAT: bool = true;
            const IS_POD: bool = true;
            const IS_BITWISE_COPY_SAFE: bool = true;
            const IS_POINTER: bool = false;
        }

        impl Scalar for $f {}

        impl Real for $f {
            #[allow(clippy::cast_possible_truncation)]
            fn of(value: f64) -> Self {
                value as $f
            }

            #[allow(clippy::cast_lossless)]
            fn to_f64_lossy(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_integral!(i32);
impl_integral!(i64);
impl_float!(f32);
impl_float!(f64);
