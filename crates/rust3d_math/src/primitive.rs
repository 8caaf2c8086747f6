//! Line and triangle primitives
//!
//! Primitives own their vertices by value. Two primitives never share a
//! vertex, so transforming one cannot affect another.

use crate::Vec4;

/// A line segment between two homogeneous points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub start: Vec4,
    pub end: Vec4,
}

impl Line {
    #[inline]
    pub fn new(start: Vec4, end: Vec4) -> Self {
        Self { start, end }
    }

    /// Apply `f` to both endpoints
    #[inline]
    pub fn map(self, mut f: impl FnMut(Vec4) -> Vec4) -> Self {
        Self::new(f(self.start), f(self.end))
    }
}

/// A triangle of three homogeneous points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec4; 3],
}

impl Triangle {
    #[inline]
    pub fn new(a: Vec4, b: Vec4, c: Vec4) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Apply `f` to every vertex
    #[inline]
    pub fn map(self, f: impl FnMut(Vec4) -> Vec4) -> Self {
        Self { vertices: self.vertices.map(f) }
    }

    /// Unnormalized face normal: `(v1 - v0) x (v2 - v0)`
    pub fn normal(&self) -> Vec4 {
        let [a, b, c] = self.vertices;
        (b - a).cross_xyz(c - a)
    }

    /// Area of the triangle in xyz
    pub fn area_xyz(&self) -> f32 {
        self.normal().length_xyz() * 0.5
    }

    /// The three edges in winding order
    pub fn edges(&self) -> [Line; 3] {
        let [a, b, c] = self.vertices;
        [Line::new(a, b), Line::new(b, c), Line::new(c, a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_map() {
        let line = Line::new(Vec4::point(1.0, 0.0, 0.0), Vec4::point(0.0, 1.0, 0.0));
        let moved = line.map(|v| v + Vec4::direction(0.0, 0.0, 2.0));
        assert_eq!(moved.start, Vec4::point(1.0, 0.0, 2.0));
        assert_eq!(moved.end, Vec4::point(0.0, 1.0, 2.0));
        // Original untouched
        assert_eq!(line.start.z, 0.0);
    }

    #[test]
    fn test_triangle_normal_and_area() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(2.0, 0.0, 0.0),
            Vec4::point(0.0, 2.0, 0.0),
        );
        assert_eq!(tri.normal().xyz(), [0.0, 0.0, 4.0]);
        assert_eq!(tri.area_xyz(), 2.0);
    }

    #[test]
    fn test_triangle_edges() {
        let a = Vec4::point(0.0, 0.0, 0.0);
        let b = Vec4::point(1.0, 0.0, 0.0);
        let c = Vec4::point(0.0, 1.0, 0.0);
        let edges = Triangle::new(a, b, c).edges();
        assert_eq!(edges[0], Line::new(a, b));
        assert_eq!(edges[1], Line::new(b, c));
        assert_eq!(edges[2], Line::new(c, a));
    }
}
