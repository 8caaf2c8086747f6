//! Clip planes described by a point and a normal
//!
//! The positive side of the plane (where the normal points) is "inside".

use crate::Vec4;

/// A plane through `point` with unit `normal`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Any point on the plane
    pub point: Vec4,
    /// Unit normal pointing to the inside half-space
    pub normal: Vec4,
}

impl Plane {
    /// Create a plane, normalizing the normal's xyz
    pub fn new(point: Vec4, normal: Vec4) -> Self {
        Self {
            point,
            normal: normal.normalized_xyz(),
        }
    }

    /// Signed distance from `p` to the plane (positive = inside)
    #[inline]
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        self.normal.dot_xyz(p) - self.normal.dot_xyz(self.point)
    }

    /// Point where the segment `a -> b` crosses the plane
    ///
    /// All four components are interpolated with the same parameter, so a
    /// depth carried in `w` stays consistent with the cut. A segment parallel
    /// to the plane returns `a`.
    pub fn intersect(&self, a: Vec4, b: Vec4) -> Vec4 {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;
        if denom == 0.0 {
            return a;
        }
        a.lerp(b, da / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_normal_is_normalized() {
        let plane = Plane::new(Vec4::ORIGIN, Vec4::direction(0.0, 0.0, 4.0));
        assert!((plane.normal.length_xyz() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_signed_distance() {
        let plane = Plane::new(Vec4::point(0.0, 0.0, 0.1), Vec4::direction(0.0, 0.0, 1.0));
        assert!((plane.signed_distance(Vec4::point(3.0, -2.0, 1.1)) - 1.0).abs() < EPSILON);
        assert!((plane.signed_distance(Vec4::point(0.0, 0.0, -0.9)) + 1.0).abs() < EPSILON);
        assert_eq!(plane.signed_distance(Vec4::point(5.0, 5.0, 0.1)), 0.0);
    }

    #[test]
    fn test_distance_not_scaled_by_normal_length() {
        let unit = Plane::new(Vec4::ORIGIN, Vec4::direction(1.0, 0.0, 0.0));
        let long = Plane::new(Vec4::ORIGIN, Vec4::direction(10.0, 0.0, 0.0));
        let p = Vec4::point(2.5, 0.0, 0.0);
        assert!((unit.signed_distance(p) - long.signed_distance(p)).abs() < EPSILON);
    }

    #[test]
    fn test_intersect() {
        let plane = Plane::new(Vec4::ORIGIN, Vec4::direction(0.0, 0.0, 1.0));
        let hit = plane.intersect(Vec4::point(0.0, 0.0, -1.0), Vec4::point(2.0, 4.0, 3.0));
        assert!((hit.z).abs() < EPSILON);
        assert!((hit.x - 0.5).abs() < EPSILON);
        assert!((hit.y - 1.0).abs() < EPSILON);
        assert!((hit.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_intersect_interpolates_w() {
        let plane = Plane::new(Vec4::ORIGIN, Vec4::direction(1.0, 0.0, 0.0));
        let hit = plane.intersect(Vec4::new(-1.0, 0.0, 0.0, 2.0), Vec4::new(1.0, 0.0, 0.0, 4.0));
        assert!((hit.w - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_intersect_parallel_returns_start() {
        let plane = Plane::new(Vec4::ORIGIN, Vec4::direction(0.0, 1.0, 0.0));
        let a = Vec4::point(0.0, 1.0, 0.0);
        let b = Vec4::point(5.0, 1.0, 0.0);
        assert_eq!(plane.intersect(a, b), a);
    }
}
