//! 4x4 homogeneous transform matrices.
//!
//! Matrices act on row vectors: a point is transformed as `v * M`, and a
//! chain of transforms applied in the order `M1`, `M2`, `M3` is composed
//! as `M1 * M2 * M3`. The translation lives in row 3.

use crate::{
    affine::Matrix4x3,
    error::MatrixError,
    point::{Point3, Point4},
    scalar::{degrees_to_radians, Real, Scalar, TypeData, WorldUnit},
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::{
    fmt,
    ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Largest field of view accepted by [`Matrix4x4::set_perspective`], in
/// degrees. The tangent term diverges as the angle approaches 180.
pub const MAX_FIELD_OF_VIEW_DEGREES: f64 = 179.0;

/// A row-major 4x4 matrix stored as four [`Point4`] rows.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4x4<T> {
    rows: [Point4<T>; 4],
}

/// Matrix over the default world-space scalar.
pub type Matrix44 = Matrix4x4<WorldUnit>;

impl<T: Scalar> Matrix4x4<T> {
    pub const ZERO: Self = Self {
        rows: [Point4::ZERO; 4],
    };

    pub const IDENTITY: Self = Self {
        rows: [
            Point4::new(T::IDENTITY, T::ZERO, T::ZERO, T::ZERO),
            Point4::new(T::ZERO, T::IDENTITY, T::ZERO, T::ZERO),
            Point4::new(T::ZERO, T::ZERO, T::IDENTITY, T::ZERO),
            Point4::new(T::ZERO, T::ZERO, T::ZERO, T::IDENTITY),
        ],
    };

    pub fn from_rows(row0: Point4<T>, row1: Point4<T>, row2: Point4<T>, row3: Point4<T>) -> Self {
        Self {
            rows: [row0, row1, row2, row3],
        }
    }

    /// Builds a matrix from 16 scalars in row-major order.
    ///
    /// # Panics
    /// If the slice holds fewer than 16 elements.
    pub fn from_row_slice(values: &[T]) -> Self {
        Self::from_rows(
            Point4::from_slice(&values[0..4]),
            Point4::from_slice(&values[4..8]),
            Point4::from_slice(&values[8..12]),
            Point4::from_slice(&values[12..16]),
        )
    }

    /// [`Self::IDENTITY`] when `identity` is set, [`Self::ZERO`] otherwise.
    pub fn from_flag(identity: bool) -> Self {
        if identity {
            Self::IDENTITY
        } else {
            Self::ZERO
        }
    }

    /// Overwrites the matrix with the homogeneous form of an affine
    /// transform: the linear block and translation are copied and the
    /// fourth column becomes `(0, 0, 0, 1)`.
    pub fn set_affine(&mut self, affine: &Matrix4x3<T>) {
        for i in 0..3 {
            let row = affine.linear_row(i);
            self.rows[i] = Point4::new(row.x, row.y, row.z, T::ZERO);
        }
        let translation = affine.translation();
        self.rows[3] = Point4::new(translation.x, translation.y, translation.z, T::IDENTITY);
    }

    /// Pure translation matrix.
    pub fn translation(position: Point3<T>) -> Self {
        let mut matrix = Self::IDENTITY;
        matrix.set_position(position);
        matrix
    }

    /// Replaces the `x`, `y` and `z` components of the translation row,
    /// leaving its `w` and the other rows untouched.
    pub fn set_position(&mut self, position: Point3<T>) {
        let row = &mut self.rows[3];
        row.x = position.x;
        row.y = position.y;
        row.z = position.z;
    }

    pub fn position(&self) -> Point3<T> {
        self.rows[3].xyz()
    }

    pub fn row(&self, i: usize) -> &Point4<T> {
        &self.rows[i]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut Point4<T> {
        &mut self.rows[i]
    }

    /// Checked row lookup for indices only known at runtime.
    pub fn get_row(&self, i: usize) -> Result<&Point4<T>, MatrixError> {
        self.rows.get(i).ok_or(MatrixError::RowOutOfRange(i))
    }

    pub fn rows(&self) -> &[Point4<T>; 4] {
        &self.rows
    }

    pub fn into_rows(self) -> [Point4<T>; 4] {
        self.rows
    }

    /// The 16 components in row-major order.
    pub fn to_row_array(&self) -> [T; 16] {
        let [r0, r1, r2, r3] = self.rows;
        [
            r0.x, r0.y, r0.z, r0.w, r1.x, r1.y, r1.z, r1.w, r2.x, r2.y, r2.z, r2.w, r3.x, r3.y,
            r3.z, r3.w,
        ]
    }

    /// Unary plus.
    pub fn pos(self) -> Self {
        self
    }

    /// Multiplies every component by `factor`.
    pub fn scale(self, factor: T) -> Self {
        self.map_rows(|row| row * factor)
    }

    pub fn transpose(&self) -> Self {
        let [r0, r1, r2, r3] = self.rows;
        Self::from_rows(
            Point4::new(r0.x, r1.x, r2.x, r3.x),
            Point4::new(r0.y, r1.y, r2.y, r3.y),
            Point4::new(r0.z, r1.z, r2.z, r3.z),
            Point4::new(r0.w, r1.w, r2.w, r3.w),
        )
    }

    /// Determinant by Laplace expansion over the 2x2 minors of the upper
    /// and lower row pairs. No affine structure is assumed, and the result
    /// is exact for integral elements as long as the products of four
    /// components fit the type. For `i32` that bounds the components to
    /// roughly 100 in magnitude; larger values overflow (a panic in debug
    /// builds), so use `i64` there.
    pub fn determinant(&self) -> T {
        let (s, c) = self.pair_minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Transpose of the cofactor matrix, so that
    /// `self * self.adjugate() == determinant * IDENTITY`.
    pub fn adjugate(&self) -> Self {
        let (s, c) = self.pair_minors();
        let [a0, a1, a2, a3] = self.rows;

        Self::from_rows(
            Point4::new(
                a1.y * c[5] - a1.z * c[4] + a1.w * c[3],
                -a0.y * c[5] + a0.z * c[4] - a0.w * c[3],
                a3.y * s[5] - a3.z * s[4] + a3.w * s[3],
                -a2.y * s[5] + a2.z * s[4] - a2.w * s[3],
            ),
            Point4::new(
                -a1.x * c[5] + a1.z * c[2] - a1.w * c[1],
                a0.x * c[5] - a0.z * c[2] + a0.w * c[1],
                -a3.x * s[5] + a3.z * s[2] - a3.w * s[1],
                a2.x * s[5] - a2.z * s[2] + a2.w * s[1],
            ),
            Point4::new(
                a1.x * c[4] - a1.y * c[2] + a1.w * c[0],
                -a0.x * c[4] + a0.y * c[2] - a0.w * c[0],
                a3.x * s[4] - a3.y * s[2] + a3.w * s[0],
                -a2.x * s[4] + a2.y * s[2] - a2.w * s[0],
            ),
            Point4::new(
                -a1.x * c[3] + a1.y * c[1] - a1.z * c[0],
                a0.x * c[3] - a0.y * c[1] + a0.z * c[0],
                -a3.x * s[3] + a3.y * s[1] - a3.z * s[0],
                a2.x * s[3] - a2.y * s[1] + a2.z * s[0],
            ),
        )
    }

    // 2x2 minors of rows 0-1 (`s`) and rows 2-3 (`c`), indexed by column
    // pair (01, 02, 03, 12, 13, 23) for `s` and in reverse for `c`.
    fn pair_minors(&self) -> ([T; 6], [T; 6]) {
        let [a0, a1, a2, a3] = self.rows;
        let s = [
            a0.x * a1.y - a1.x * a0.y,
            a0.x * a1.z - a1.x * a0.z,
            a0.x * a1.w - a1.x * a0.w,
            a0.y * a1.z - a1.y * a0.z,
            a0.y * a1.w - a1.y * a0.w,
            a0.z * a1.w - a1.z * a0.w,
        ];
        let c = [
            a2.x * a3.y - a3.x * a2.y,
            a2.x * a3.z - a3.x * a2.z,
            a2.x * a3.w - a3.x * a2.w,
            a2.y * a3.z - a3.y * a2.z,
            a2.y * a3.w - a3.y * a2.w,
            a2.z * a3.w - a3.z * a2.w,
        ];
        (s, c)
    }

    fn map_rows(self, f: impl Fn(Point4<T>) -> Point4<T>) -> Self {
        let [r0, r1, r2, r3] = self.rows;
        Self::from_rows(f(r0), f(r1), f(r2), f(r3))
    }

    fn zip_rows(self, other: Self, f: impl Fn(Point4<T>, Point4<T>) -> Point4<T>) -> Self {
        let [a0, a1, a2, a3] = self.rows;
        let [b0, b1, b2, b3] = other.rows;
        Self::from_rows(f(a0, b0), f(a1, b1), f(a2, b2), f(a3, b3))
    }
}

impl<F: Real> Matrix4x4<F> {
    /// Inverse as the adjugate divided by the determinant.
    ///
    /// This is the unchecked path: for a singular matrix the division is by
    /// zero and every component of the result is infinite or NaN. The same
    /// happens when the determinant is so small that its reciprocal
    /// overflows, even if the matrix is invertible. Use
    /// [`Self::try_inverse`] when this must be detected.
    pub fn inverse(&self) -> Self {
        self.adjugate().scale(F::one() / self.determinant())
    }

    /// Inverse that rejects matrices whose determinant is zero, non-finite
    /// or too small for its reciprocal to be finite. Any matrix it returns
    /// has only finite components.
    pub fn try_inverse(&self) -> Result<Self, MatrixError> {
        let determinant = self.determinant();
        let inverse_determinant = F::one() / determinant;
        let inverse = self.adjugate().scale(inverse_determinant);

        if !inverse_determinant.is_finite()
            || !inverse.rows.iter().all(|row| row.to_array().iter().all(|v| v.is_finite()))
        {
            log::debug!("Refusing to invert singular matrix (determinant {})", determinant);
            return Err(MatrixError::Singular {
                determinant: determinant.to_f64_lossy(),
            });
        }
        Ok(inverse)
    }

    /// Overwrites the matrix with a rotation of `angle` radians about the
    /// x-axis.
    pub fn set_rotation_x(&mut self, angle: F) {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (F::zero(), F::one());
        *self = Self::from_rows(
            Point4::new(one, zero, zero, zero),
            Point4::new(zero, c, s, zero),
            Point4::new(zero, -s, c, zero),
            Point4::new(zero, zero, zero, one),
        );
    }

    /// Overwrites the matrix with a rotation of `angle` radians about the
    /// y-axis.
    pub fn set_rotation_y(&mut self, angle: F) {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (F::zero(), F::one());
        *self = Self::from_rows(
            Point4::new(c, zero, -s, zero),
            Point4::new(zero, one, zero, zero),
            Point4::new(s, zero, c, zero),
            Point4::new(zero, zero, zero, one),
        );
    }

    /// Overwrites the matrix with a rotation of `angle` radians about the
    /// z-axis.
    pub fn set_rotation_z(&mut self, angle: F) {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (F::zero(), F::one());
        *self = Self::from_rows(
            Point4::new(c, s, zero, zero),
            Point4::new(-s, c, zero, zero),
            Point4::new(zero, zero, one, zero),
            Point4::new(zero, zero, zero, one),
        );
    }

    pub fn rotation_x(angle: F) -> Self {
        let mut matrix = Self::ZERO;
        matrix.set_rotation_x(angle);
        matrix
    }

    pub fn rotation_y(angle: F) -> Self {
        let mut matrix = Self::ZERO;
        matrix.set_rotation_y(angle);
        matrix
    }

    pub fn rotation_z(angle: F) -> Self {
        let mut matrix = Self::ZERO;
        matrix.set_rotation_z(angle);
        matrix
    }

    /// Overwrites the matrix with a right-handed perspective projection.
    ///
    /// `fov` is the vertical field of view in degrees and is clamped to
    /// [`MAX_FIELD_OF_VIEW_DEGREES`]. View space looks down `-z`; a point at
    /// depth `-d` gets `w = d`, and the near and far planes map to clip
    /// depths `-1` and `1` after the divide.
    pub fn set_perspective(&mut self, fov: F, aspect: F, near: F, far: F) {
        let max_fov = F::of(MAX_FIELD_OF_VIEW_DEGREES);
        let fov = if fov > max_fov {
            log::debug!("Clamping field of view {} to {} degrees", fov, max_fov);
            max_fov
        } else {
            fov
        };

        let two = F::of(2.0);
        let (zero, one) = (F::zero(), F::one());

        let y_scale = one / (degrees_to_radians(fov) / two).tan();
        let x_scale = y_scale / aspect;
        let z1 = (far + near) / (near - far);
        let z2 = (two * far * near) / (near - far);

        *self = Self::from_rows(
            Point4::new(x_scale, zero, zero, zero),
            Point4::new(zero, y_scale, zero, zero),
            Point4::new(zero, zero, z1, -one),
            Point4::new(zero, zero, z2, zero),
        );
    }

    pub fn perspective(fov: F, aspect: F, near: F, far: F) -> Self {
        let mut matrix = Self::ZERO;
        matrix.set_perspective(fov, aspect, near, far);
        matrix
    }

    /// Maps a point from `[-1, 1]` device coordinates onto a `width` by
    /// `height` viewport, with depth remapped to `[0, 1]`.
    ///
    /// The returned `w` is `1 / v.w`. The divide itself is left to the
    /// caller: either pass a point that went through
    /// [`Point4::perspective_divide`], or scale the result by `w`.
    pub fn project(v: Point4<F>, width: F, height: F) -> Point4<F> {
        let half = F::of(0.5);
        let center_x = width * half;
        let center_y = height * half;

        Point4::new(
            v.x * center_x + center_x,
            v.y * center_y + center_y,
            v.z * half + half,
            F::one() / v.w,
        )
    }
}

impl<T: Scalar> Default for Matrix4x4<T> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<T: Scalar> TypeData for Matrix4x4<T> {
    const ZERO: Self = Matrix4x4::<T>::ZERO;
    const IDENTITY: Self = Matrix4x4::<T>::IDENTITY;

    const IS_INTEGRAL: bool = T::IS_INTEGRAL;
    const IS_FLOAT: bool = T::IS_FLOAT;
    const IS_POD: bool = T::IS_POD;
    const IS_BITWISE_COPY_SAFE: bool = T::IS_BITWISE_COPY_SAFE;
    const IS_POINTER: bool = T::IS_POINTER;
}

impl<T: Scalar> From<bool> for Matrix4x4<T> {
    fn from(identity: bool) -> Self {
        Self::from_flag(identity)
    }
}

impl<T: Scalar> From<[T; 16]> for Matrix4x4<T> {
    fn from(values: [T; 16]) -> Self {
        Self::from_row_slice(&values)
    }
}

impl<T: Scalar> From<Matrix4x3<T>> for Matrix4x4<T> {
    fn from(affine: Matrix4x3<T>) -> Self {
        let mut matrix = Self::ZERO;
        matrix.set_affine(&affine);
        matrix
    }
}

impl<T: Scalar> From<na::Matrix4<T>> for Matrix4x4<T> {
    fn from(matrix: na::Matrix4<T>) -> Self {
        let row = |i: usize| Point4::new(matrix[(i, 0)], matrix[(i, 1)], matrix[(i, 2)], matrix[(i, 3)]);
        Self::from_rows(row(0), row(1), row(2), row(3))
    }
}

/// Element-identical conversion. Under nalgebra's column-vector convention
/// the same transform is represented by the transpose.
impl<T: Scalar> From<Matrix4x4<T>> for na::Matrix4<T> {
    fn from(matrix: Matrix4x4<T>) -> Self {
        na::Matrix4::from_row_slice(&matrix.to_row_array())
    }
}

impl<T> Index<usize> for Matrix4x4<T> {
    type Output = Point4<T>;

    fn index(&self, i: usize) -> &Point4<T> {
        &self.rows[i]
    }
}

impl<T> IndexMut<usize> for Matrix4x4<T> {
    fn index_mut(&mut self, i: usize) -> &mut Point4<T> {
        &mut self.rows[i]
    }
}

impl<T: Scalar> Neg for Matrix4x4<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map_rows(|row| -row)
    }
}

impl<T: Scalar> Add for Matrix4x4<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_rows(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Sub for Matrix4x4<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_rows(rhs, |a, b| a - b)
    }
}

impl<T: Scalar> AddAssign for Matrix4x4<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Matrix4x4<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Each row of the product is the corresponding row of `self` transformed
/// by `rhs`.
impl<T: Scalar> Mul for Matrix4x4<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.map_rows(|row| row * rhs)
    }
}

impl<T: Scalar> MulAssign for Matrix4x4<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Row vector times matrix: the combination of the matrix rows weighted by
/// the components of the point.
impl<T: Scalar> Mul<Matrix4x4<T>> for Point4<T> {
    type Output = Point4<T>;
    fn mul(self, rhs: Matrix4x4<T>) -> Point4<T> {
        let [r0, r1, r2, r3] = rhs.rows;
        r0 * self.x + r1 * self.y + r2 * self.z + r3 * self.w
    }
}

/// Transforms the point with an implicit `w = 1`. The resulting `w` is
/// discarded without a perspective divide.
impl<T: Scalar> Mul<Matrix4x4<T>> for Point3<T> {
    type Output = Point3<T>;
    fn mul(self, rhs: Matrix4x4<T>) -> Point3<T> {
        (self.to_homogeneous() * rhs).xyz()
    }
}

macro_rules! impl_scalar_left_mul {
    ($t:ty) => {
        impl Mul<Matrix4x4<$t>> for $t {
            type Output = Matrix4x4<$t>;
            fn mul(self, rhs: Matrix4x4<$t>) -> Matrix4x4<$t> {
                rhs.scale(self)
            }
        }
    };
}

impl_scalar_left_mul!(i32);
impl_scalar_left_mul!(i64);
impl_scalar_left_mul!(f32);
impl_scalar_left_mul!(f64);

/// One `(x, y, z, w)` line per row, rows 0 through 3.
impl<T: fmt::Display> fmt::Display for Matrix4x4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Matrix4x4<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.rows
            .iter()
            .zip(&other.rows)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: RelativeEq> RelativeEq for Matrix4x4<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.rows
            .iter()
            .zip(&other.rows)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> Matrix4x4<i64> {
        Matrix4x4::from([1, 2, 3, 4, 5, 6, 7, 8, 2, 6, 4, 8, 3, 1, 1, 2])
    }

    prop_compose! {
        fn integer_matrix()(values in prop::array::uniform16(-100_i64..100)) -> Matrix4x4<i64> {
            Matrix4x4::from(values)
        }
    }

    prop_compose! {
        fn float_matrix()(values in prop::array::uniform16(-1e3..1e3)) -> Matrix44 {
            Matrix4x4::from(values)
        }
    }

    prop_compose! {
        fn invertible_matrix()(
            angle_x in -PI..PI,
            angle_y in -PI..PI,
            angle_z in -PI..PI,
            scaling in 0.1..10.0,
            tx in -1e2..1e2,
            ty in -1e2..1e2,
            tz in -1e2..1e2,
        ) -> Matrix44 {
            Matrix44::rotation_x(angle_x).scale(scaling)
                * Matrix44::rotation_y(angle_y)
                * Matrix44::rotation_z(angle_z)
                * Matrix44::translation(Point3::new(tx, ty, tz))
        }
    }

    #[test]
    fn test_constants() {
        assert!(Matrix4x4::<f64>::ZERO.to_row_array().iter().all(|&v| v == 0.0));
        assert_eq!(Matrix4x4::<i32>::IDENTITY[2], Point4::new(0, 0, 1, 0));
        assert_eq!(Matrix44::default(), Matrix44::ZERO);
        assert_eq!(<Matrix44 as TypeData>::IDENTITY, Matrix44::IDENTITY);
        assert!(<Matrix44 as TypeData>::IS_FLOAT);
        assert!(<Matrix4x4<i32> as TypeData>::IS_INTEGRAL);
    }

    #[test]
    fn test_flag_construction() {
        assert_eq!(Matrix44::from_flag(true), Matrix44::IDENTITY);
        assert_eq!(Matrix44::from(false), Matrix44::ZERO);
    }

    #[test]
    fn test_row_slice_is_row_major() {
        let m = sample();
        assert_eq!(m[1], Point4::new(5, 6, 7, 8));
        assert_eq!(m.row(3).w, 2);
        assert_eq!(m.to_row_array()[6], 7);
    }

    #[test]
    fn test_affine_conversion() {
        let affine = Matrix4x3::from_translation(Point3::new(5.0, 6.0, 7.0));
        let m = Matrix44::from(affine);

        let mut expected = Matrix44::IDENTITY;
        expected[3] = Point4::new(5.0, 6.0, 7.0, 1.0);
        assert_eq!(m, expected);
    }

    #[test]
    fn test_affine_conversion_copies_linear_block() {
        let affine = Matrix4x3::new(
            Point3::new(1, 2, 3),
            Point3::new(4, 5, 6),
            Point3::new(7, 8, 9),
            Point3::new(10, 11, 12),
        );
        let m = Matrix4x4::from(affine);
        assert_eq!(m[0], Point4::new(1, 2, 3, 0));
        assert_eq!(m[2], Point4::new(7, 8, 9, 0));
        assert_eq!(m[3], Point4::new(10, 11, 12, 1));
    }

    #[test]
    fn test_checked_row_access() {
        let m = sample();
        assert_eq!(m.get_row(0), Ok(&Point4::new(1, 2, 3, 4)));
        assert_eq!(m.get_row(4), Err(MatrixError::RowOutOfRange(4)));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let m = Matrix44::IDENTITY;
        let _ = m[4];
    }

    #[test]
    fn test_row_mutation() {
        let mut m = Matrix4x4::<i32>::ZERO;
        m[1] = Point4::new(1, 2, 3, 4);
        m.row_mut(2).z = 9;
        assert_eq!(m.to_row_array()[4..8], [1, 2, 3, 4]);
        assert_eq!(m[2].z, 9);
    }

    #[test]
    fn test_unary_and_compound_arithmetic() {
        let a = sample();
        assert_eq!(a.pos(), a);
        assert_eq!((-a)[0], Point4::new(-1, -2, -3, -4));

        let mut b = a;
        b += a;
        assert_eq!(b, 2 * a);
        b -= a;
        assert_eq!(b, a);
    }

    #[test]
    fn test_scalar_left_multiplication() {
        let m = 0.5 * Matrix44::IDENTITY;
        assert_eq!(m[3], Point4::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_multiplication_is_not_commutative() {
        let rotation = Matrix44::rotation_z(FRAC_PI_2);
        let translation = Matrix44::translation(Point3::new(1.0, 0.0, 0.0));
        assert!(!abs_diff_eq!(
            rotation * translation,
            translation * rotation,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_transform_order_follows_reading_order() {
        // Rotate first, then translate
        let m = Matrix44::rotation_z(FRAC_PI_2) * Matrix44::translation(Point3::new(10.0, 0.0, 0.0));
        let p = Point3::new(1.0, 0.0, 0.0) * m;
        assert_abs_diff_eq!(p, Point3::new(10.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_point3_transform_discards_w() {
        let mut m = Matrix44::IDENTITY;
        m[0].w = 3.0;
        m.set_position(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(Point3::new(1.0, 1.0, 1.0) * m, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(Point4::new(1.0, 1.0, 1.0, 1.0) * m, Point4::new(2.0, 3.0, 4.0, 4.0));
    }

    #[test]
    fn test_set_position_keeps_w_and_other_rows() {
        let mut m = sample();
        m.set_position(Point3::new(-1, -2, -3));
        assert_eq!(m[3], Point4::new(-1, -2, -3, 2));
        assert_eq!(m[0], sample()[0]);
        assert_eq!(m.position(), Point3::new(-1, -2, -3));
    }

    #[test]
    fn test_integer_determinant_is_exact() {
        assert_eq!(sample().determinant(), 72);
        assert_eq!(Matrix4x4::<i64>::IDENTITY.determinant(), 1);
        assert_eq!(Matrix4x4::<i64>::ZERO.determinant(), 0);
    }

    #[test]
    fn test_determinant_does_not_assume_affine() {
        let diagonal = Matrix4x4::from([2, 0, 0, 0, 0, 3, 0, 0, 0, 0, 4, 0, 0, 0, 0, 5]);
        assert_eq!(diagonal.determinant(), 120);
    }

    #[test]
    fn test_adjugate_identity() {
        let a = sample();
        assert_eq!(a * a.adjugate(), a.determinant() * Matrix4x4::IDENTITY);
    }

    #[test]
    fn test_identity_inverse() {
        assert_eq!(Matrix44::IDENTITY.determinant(), 1.0);
        assert_eq!(Matrix44::IDENTITY.inverse(), Matrix44::IDENTITY);
    }

    #[test]
    fn test_inverse_of_sample() {
        let a = Matrix44::from(sample().to_row_array().map(|v| v as f64));
        assert_abs_diff_eq!(a * a.inverse(), Matrix44::IDENTITY, epsilon = 1e-12);
        assert_abs_diff_eq!(a.inverse() * a, Matrix44::IDENTITY, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_inverse_is_not_finite() {
        let mut singular = Matrix44::IDENTITY;
        singular[2] = singular[1];
        assert_eq!(singular.determinant(), 0.0);
        assert!(singular
            .inverse()
            .to_row_array()
            .iter()
            .all(|v| !v.is_finite()));
        assert!(Matrix44::ZERO.inverse().to_row_array().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_try_inverse() {
        let m = Matrix44::translation(Point3::new(1.0, 2.0, 3.0));
        let inverse = m.try_inverse().unwrap();
        assert_abs_diff_eq!(inverse.position(), Point3::new(-1.0, -2.0, -3.0));

        assert_eq!(
            Matrix44::ZERO.try_inverse(),
            Err(MatrixError::Singular { determinant: 0.0 })
        );
    }

    #[test]
    fn test_try_inverse_rejects_overflowing_reciprocal() {
        let tiny = Matrix44::IDENTITY.scale(1e-80);
        assert!(tiny.determinant() != 0.0);
        assert!(matches!(
            tiny.try_inverse(),
            Err(MatrixError::Singular { .. })
        ));
        assert!(!tiny.inverse()[0].x.is_finite());
    }

    #[test]
    fn test_try_inverse_of_small_scale_is_finite() {
        let small = Matrix44::IDENTITY.scale(1e-20);
        let inverse = small.try_inverse().unwrap();
        assert_abs_diff_eq!(inverse[2].z, 1e20, epsilon = 1e6);
    }

    #[test]
    fn test_i64_determinant_beyond_i32_range() {
        let m = Matrix4x4::<i64>::IDENTITY.scale(1000);
        assert_eq!(m.determinant(), 1_000_000_000_000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let mut m = Matrix44::from([
            1.0, 0.5, 0.0, 0.0, -0.25, 2.0, 0.0, 0.0, 0.0, 0.0, -1.5, -1.0, 0.0, 0.0, -3.0, 0.0,
        ]);
        m.set_position(Point3::new(5.0, -6.5, 7.25));

        let json = serde_json::to_string(&m).unwrap();
        let parsed: Matrix44 = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);

        let point = Point4::new(1.5, -2.0, 0.0, 1.0);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(serde_json::from_str::<Point4<f64>>(&json).unwrap(), point);
    }

    #[test]
    fn test_determinant_matches_nalgebra() {
        let a = Matrix44::rotation_x(0.3) * Matrix44::perspective(60.0, 1.5, 0.5, 50.0);
        let reference: na::Matrix4<f64> = a.into();
        assert_abs_diff_eq!(a.determinant(), reference.determinant(), epsilon = 1e-12);

        let inverse = reference.try_inverse().unwrap();
        assert_abs_diff_eq!(a.inverse(), Matrix44::from(inverse), epsilon = 1e-9);
    }

    #[test]
    fn test_nalgebra_round_trip_keeps_layout() {
        let a = Matrix44::from(sample().to_row_array().map(|v| v as f64));
        let reference: na::Matrix4<f64> = a.into();
        assert_eq!(reference[(1, 2)], 7.0);
        assert_eq!(Matrix44::from(reference), a);
        assert_eq!(Matrix44::from(reference.transpose()), a.transpose());
    }

    #[test]
    fn test_zero_rotations_are_identity() {
        assert_eq!(Matrix44::rotation_x(0.0), Matrix44::IDENTITY);
        assert_eq!(Matrix44::rotation_y(0.0), Matrix44::IDENTITY);
        assert_eq!(Matrix44::rotation_z(0.0), Matrix44::IDENTITY);
    }

    #[test]
    fn test_half_turn_about_x() {
        let m = Matrix44::rotation_x(PI);
        assert_abs_diff_eq!(Point3::new(1.0, 0.0, 0.0) * m, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(Point3::new(0.0, 1.0, 0.0) * m, Point3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turns_are_right_handed() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let z = Point3::new(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(y * Matrix44::rotation_x(FRAC_PI_2), z, epsilon = 1e-12);
        assert_abs_diff_eq!(z * Matrix44::rotation_y(FRAC_PI_2), x, epsilon = 1e-12);
        assert_abs_diff_eq!(x * Matrix44::rotation_z(FRAC_PI_2), y, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_replaces_contents() {
        let mut m = Matrix44::translation(Point3::new(4.0, 5.0, 6.0));
        m.set_rotation_y(0.0);
        assert_eq!(m, Matrix44::IDENTITY);
    }

    #[test]
    fn test_perspective_layout() {
        let m = Matrix44::perspective(90.0, 2.0, 1.0, 3.0);
        assert_abs_diff_eq!(m[1].y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[0].x, 0.5, epsilon = 1e-12);
        assert_eq!(m[2], Point4::new(0.0, 0.0, -2.0, -1.0));
        assert_eq!(m[3], Point4::new(0.0, 0.0, -3.0, 0.0));
    }

    #[test]
    fn test_perspective_maps_clip_planes() {
        let m = Matrix44::perspective(60.0, 1.0, 1.0, 100.0);
        let near = (Point4::new(0.0, 0.0, -1.0, 1.0) * m).perspective_divide();
        let far = (Point4::new(0.0, 0.0, -100.0, 1.0) * m).perspective_divide();
        assert_abs_diff_eq!(near.z, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(far.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(far.w, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_view_axis_projects_to_viewport_center() {
        let mut m = Matrix44::ZERO;
        m.set_perspective(90.0, 1.0, 1.0, 100.0);

        let clip = Point4::new(0.0, 0.0, -1.0, 1.0) * m;
        let screen = Matrix44::project(clip, 800.0, 600.0);

        assert_abs_diff_eq!(screen.x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(screen.y, 300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(screen.z, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(screen.w, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_returns_reciprocal_w() {
        let screen = Matrix44::project(Point4::new(1.0, -1.0, 1.0, 4.0), 100.0, 50.0);
        assert_eq!(screen, Point4::new(100.0, 0.0, 1.0, 0.25));
    }

    #[test]
    fn test_field_of_view_is_clamped() {
        assert_eq!(
            Matrix44::perspective(200.0, 1.3, 0.1, 10.0),
            Matrix44::perspective(179.0, 1.3, 0.1, 10.0)
        );
        assert_ne!(
            Matrix44::perspective(178.0, 1.3, 0.1, 10.0),
            Matrix44::perspective(179.0, 1.3, 0.1, 10.0)
        );
    }

    #[test]
    fn test_display() {
        let text = Matrix4x4::<i32>::IDENTITY.to_string();
        assert_eq!(
            text,
            "(1, 0, 0, 0)\n(0, 1, 0, 0)\n(0, 0, 1, 0)\n(0, 0, 0, 1)\n"
        );
    }

    proptest! {
        #[test]
        fn identity_is_neutral(a in float_matrix()) {
            prop_assert_eq!(a * Matrix44::IDENTITY, a);
            prop_assert_eq!(Matrix44::IDENTITY * a, a);
        }
    }

    proptest! {
        #[test]
        fn negation_cancels(a in float_matrix()) {
            prop_assert_eq!(a + (-a), Matrix44::ZERO);
            prop_assert_eq!(a - a, Matrix44::ZERO);
        }
    }

    proptest! {
        #[test]
        fn multiplication_is_associative(a in integer_matrix(), b in integer_matrix(), c in integer_matrix()) {
            prop_assert_eq!((a * b) * c, a * (b * c));
        }
    }

    proptest! {
        #[test]
        fn points_are_fixed_by_identity(values in prop::array::uniform4(-1e6..1e6)) {
            let p4 = Point4::from(values);
            let p3 = p4.xyz();
            prop_assert_eq!(p4 * Matrix44::IDENTITY, p4);
            prop_assert_eq!(p3 * Matrix44::IDENTITY, p3);
        }
    }

    proptest! {
        #[test]
        fn inverse_undoes_transform(a in invertible_matrix()) {
            prop_assert!(a.determinant() != 0.0);
            prop_assert!(abs_diff_eq!(a * a.inverse(), Matrix44::IDENTITY, epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn integer_determinant_matches_nalgebra(a in integer_matrix()) {
            let reference: na::Matrix4<f64> =
                Matrix44::from(a.to_row_array().map(|v| v as f64)).into();
            let expected = reference.determinant();
            prop_assert!(abs_diff_eq!(
                a.determinant() as f64,
                expected,
                epsilon = 1e-3 + 1e-9 * expected.abs()
            ));
        }
    }
}
