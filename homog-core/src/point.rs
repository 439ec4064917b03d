/// Three- and four-component points consumed by the matrix algebra
use crate::scalar::{Real, Scalar};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use nalgebra as na;
use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// A point (or direction) with three components.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A homogeneous point with four components.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T> Point3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T> Point4<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }
}

impl<T: Scalar> Point3<T> {
    pub const ORIGIN: Self = Self::new(T::ZERO, T::ZERO, T::ZERO);

    /// Reads the first three scalars of the slice.
    ///
    /// # Panics
    /// If the slice holds fewer than three elements.
    pub fn from_slice(values: &[T]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Extends the point to homogeneous coordinates with `w = 1`.
    pub fn to_homogeneous(self) -> Point4<T> {
        Point4::new(self.x, self.y, self.z, T::IDENTITY)
    }

    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T: Scalar> Point4<T> {
    pub const ZERO: Self = Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO);

    /// Reads the first four scalars of the slice.
    ///
    /// # Panics
    /// If the slice holds fewer than four elements.
    pub fn from_slice(values: &[T]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Drops the `w` component.
    pub fn xyz(self) -> Point3<T> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Sum of the component-wise products with `other`.
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl<F: Real> Point4<F> {
    /// Divides `x`, `y` and `z` by `w`, keeping `w` itself.
    ///
    /// A zero `w` yields non-finite components.
    pub fn perspective_divide(self) -> Self {
        Self::new(self.x / self.w, self.y / self.w, self.z / self.w, self.w)
    }
}

impl<T: Scalar> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<T: Scalar> From<[T; 4]> for Point4<T> {
    fn from([x, y, z, w]: [T; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl<T: Scalar> From<Point3<T>> for Point4<T> {
    fn from(point: Point3<T>) -> Self {
        point.to_homogeneous()
    }
}

impl<T: Scalar> From<Point4<T>> for Point3<T> {
    fn from(point: Point4<T>) -> Self {
        point.xyz()
    }
}

impl<T: Scalar> From<na::Point3<T>> for Point3<T> {
    fn from(point: na::Point3<T>) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl<T: Scalar> From<Point3<T>> for na::Point3<T> {
    fn from(point: Point3<T>) -> Self {
        na::Point3::new(point.x, point.y, point.z)
    }
}

impl<T: Scalar> From<na::Vector4<T>> for Point4<T> {
    fn from(vector: na::Vector4<T>) -> Self {
        Self::new(vector.x, vector.y, vector.z, vector.w)
    }
}

impl<T: Scalar> From<Point4<T>> for na::Vector4<T> {
    fn from(point: Point4<T>) -> Self {
        na::Vector4::new(point.x, point.y, point.z, point.w)
    }
}

impl<T: Scalar> Add for Point3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Point3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Neg for Point3<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Mul<T> for Point3<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Scalar> Add for Point4<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl<T: Scalar> Sub for Point4<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl<T: Scalar> Neg for Point4<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<T: Scalar> Mul<T> for Point4<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl<T: fmt::Display> fmt::Display for Point4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Point3<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for Point3<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Point4<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for Point4<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

// SAFETY: `#[repr(C)]` with four `f32` fields, so there is no padding and
// every bit pattern is a valid value.
unsafe impl Zeroable for Point4<f32> {}
unsafe impl Pod for Point4<f32> {}
