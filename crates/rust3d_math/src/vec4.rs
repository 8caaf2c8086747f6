//! Homogeneous 4D vector type

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// Homogeneous vector with x, y, z, w components
///
/// `w = 1` marks a point and `w = 0` a direction. After a perspective
/// projection `w` carries the camera-space depth of the point; the
/// perspective divide keeps it so the rasterizer can depth-test with it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (`w = 1`)
    #[inline]
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Create a direction (`w = 0`)
    #[inline]
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Dot product of the xyz components only
    #[inline]
    pub fn dot_xyz(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product of the xyz components
    ///
    /// The result has `w = 1` so it can flow through homogeneous transforms
    /// like a point. Only its xyz part is meaningful as a direction.
    #[inline]
    pub fn cross_xyz(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
            1.0,
        )
    }

    /// Squared length of xyz
    #[inline]
    pub fn length_squared_xyz(self) -> f32 {
        self.dot_xyz(self)
    }

    /// Length of xyz
    #[inline]
    pub fn length_xyz(self) -> f32 {
        self.length_squared_xyz().sqrt()
    }

    /// Scale xyz to unit length, leaving w untouched
    ///
    /// A zero-length vector is returned unchanged.
    #[inline]
    pub fn normalized_xyz(self) -> Self {
        let len = self.length_xyz();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w)
        } else {
            self
        }
    }

    /// Divide xyz by w, keeping w as the depth of the point
    ///
    /// When `w == 0` the vector is returned unchanged.
    #[inline]
    pub fn perspective_divide(self) -> Self {
        if self.w != 0.0 {
            Self::new(self.x / self.w, self.y / self.w, self.z / self.w, self.w)
        } else {
            self
        }
    }

    /// Extract the xyz components as an array
    #[inline]
    pub fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two vectors (all four components)
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl From<[f32; 3]> for Vec4 {
    fn from(p: [f32; 3]) -> Self {
        Self::point(p[0], p[1], p[2])
    }
}

// Operator overloads

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl std::ops::AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self.w += other.w;
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl std::ops::SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self.w -= other.w;
    }
}

impl std::ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

impl std::ops::Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_point_and_direction() {
        assert_eq!(Vec4::point(1.0, 2.0, 3.0).w, 1.0);
        assert_eq!(Vec4::direction(1.0, 2.0, 3.0).w, 0.0);
    }

    #[test]
    fn test_dot_xyz_ignores_w() {
        let a = Vec4::new(1.0, 2.0, 3.0, 100.0);
        let b = Vec4::new(4.0, 5.0, 6.0, -7.0);
        // 4 + 10 + 18
        assert_eq!(a.dot_xyz(b), 32.0);
    }

    #[test]
    fn test_dot_xyz_self_non_negative() {
        let samples = [
            Vec4::new(-3.0, 0.5, -0.25, 1.0),
            Vec4::new(0.0, 0.0, 0.0, -9.0),
            Vec4::new(1e-3, -1e3, 7.0, 0.0),
        ];
        for v in samples {
            assert!(v.dot_xyz(v) >= 0.0, "dot_xyz(v, v) negative for {:?}", v);
        }
    }

    #[test]
    fn test_cross_xyz() {
        let c = Vec4::X.cross_xyz(Vec4::Y);
        assert_eq!(c, Vec4::new(0.0, 0.0, 1.0, 1.0));

        let c = Vec4::Y.cross_xyz(Vec4::X);
        assert_eq!(c.xyz(), [0.0, 0.0, -1.0]);
        assert_eq!(c.w, 1.0, "cross product result is point-like");
    }

    #[test]
    fn test_normalized_xyz_is_unit_length() {
        // True normalization (divide by length, not squared length)
        let v = Vec4::new(3.0, 0.0, 4.0, 1.0);
        let n = v.normalized_xyz();
        assert!(approx_eq(n.x, 0.6));
        assert!(approx_eq(n.z, 0.8));
        assert!(approx_eq(n.length_xyz(), 1.0));
        assert_eq!(n.w, 1.0);
    }

    #[test]
    fn test_normalized_xyz_idempotent() {
        let v = Vec4::new(2.0, -7.0, 0.5, 0.0);
        let once = v.normalized_xyz();
        let twice = once.normalized_xyz();
        assert!(approx_eq(once.x, twice.x));
        assert!(approx_eq(once.y, twice.y));
        assert!(approx_eq(once.z, twice.z));
    }

    #[test]
    fn test_normalized_xyz_zero() {
        let v = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(v.normalized_xyz(), v);
    }

    #[test]
    fn test_perspective_divide_keeps_w() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.perspective_divide(), Vec4::new(1.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn test_perspective_divide_zero_w_is_noop() {
        let v = Vec4::new(2.0, 4.0, 6.0, 0.0);
        assert_eq!(v.perspective_divide(), v);
    }

    #[test]
    fn test_lerp_interpolates_w() {
        let a = Vec4::new(0.0, 0.0, 0.0, 2.0);
        let b = Vec4::new(10.0, 10.0, 10.0, 4.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vec4::new(5.0, 5.0, 5.0, 3.0));
    }

    #[test]
    fn test_add_sub_neg() {
        let a = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let b = Vec4::direction(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec4::new(1.5, 2.5, 3.5, 1.0));
        assert_eq!(a - b, Vec4::new(0.5, 1.5, 2.5, 1.0));
        assert_eq!(-b, Vec4::direction(-0.5, -0.5, -0.5));
    }
}
