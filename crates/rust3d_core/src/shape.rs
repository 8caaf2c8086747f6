//! Shapes: ordered collections of line and triangle primitives
//!
//! A shape is the unit handed to the render pipeline. Vertices are stored
//! by value inside each primitive, so cloning a shape is a deep copy and
//! offsetting a copy never reaches back into the original.

use rust3d_math::{Line, Triangle, Vec4};

use crate::Color;

/// A single drawable element of a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Line(Line),
    Triangle(Triangle),
}

impl Primitive {
    /// Apply `f` to every vertex of the primitive
    pub fn map(self, f: impl FnMut(Vec4) -> Vec4) -> Self {
        match self {
            Primitive::Line(line) => Primitive::Line(line.map(f)),
            Primitive::Triangle(tri) => Primitive::Triangle(tri.map(f)),
        }
    }

    /// Number of vertices (2 or 3)
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Line(_) => 2,
            Primitive::Triangle(_) => 3,
        }
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Primitive::Line(line)
    }
}

impl From<Triangle> for Primitive {
    fn from(tri: Triangle) -> Self {
        Primitive::Triangle(tri)
    }
}

/// An ordered list of primitives with an optional fill color
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    primitives: Vec<Primitive>,
    color: Option<Color>,
}

impl Shape {
    /// Create a shape from primitives
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self {
            primitives,
            color: None,
        }
    }

    /// Builder: set the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set or clear the color
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Append a primitive
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterate over the line primitives
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            Primitive::Triangle(_) => None,
        })
    }

    /// Iterate over the triangle primitives
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Triangle(tri) => Some(tri),
            Primitive::Line(_) => None,
        })
    }

    /// A deep copy with every vertex moved by the xyz of `offset`
    pub fn translated(&self, offset: Vec4) -> Self {
        let offset = Vec4::direction(offset.x, offset.y, offset.z);
        Self {
            primitives: self
                .primitives
                .iter()
                .map(|p| p.map(|v| v + offset))
                .collect(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shape() -> Shape {
        let mut shape = Shape::new(Vec::new());
        shape.push(Line::new(Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 0.0, 0.0)));
        shape.push(Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        ));
        shape
    }

    #[test]
    fn test_lines_and_triangles() {
        let shape = sample_shape();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.lines().count(), 1);
        assert_eq!(shape.triangles().count(), 1);
        assert_eq!(shape.primitives()[0].arity(), 2);
        assert_eq!(shape.primitives()[1].arity(), 3);
    }

    #[test]
    fn test_translated_is_independent_copy() {
        let base = sample_shape().with_color(Color::RED);
        let moved = base.translated(Vec4::new(1.0, 2.0, 3.0, 1.0));

        let first = moved.lines().next().unwrap();
        assert_eq!(first.start, Vec4::point(1.0, 2.0, 3.0));
        // w of the points is preserved even though the offset had w = 1
        assert_eq!(first.end.w, 1.0);
        assert_eq!(moved.color(), Some(Color::RED));

        let original = base.lines().next().unwrap();
        assert_eq!(original.start, Vec4::point(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_clone_is_deep() {
        let base = sample_shape();
        let mut copy = base.clone();
        copy.push(Line::new(Vec4::ORIGIN, Vec4::ORIGIN));
        assert_eq!(base.len(), 2);
        assert_eq!(copy.len(), 3);
    }
}
