//! Shape file loading
//!
//! The shape format is line-oriented:
//!
//! ```text
//! 3                 # number of points
//! a 0 0 0           # <name> <x> <y> <z>
//! b 1 0 0
//! c 0 1 0
//! 2                 # number of primitives
//! a b               # two names: a line segment
//! a b c             # three names: a triangle
//! ```
//!
//! Blank lines and `#` comments are ignored. Any malformed input is an
//! error for the whole file; nothing is partially loaded.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use rust3d_math::{Line, Triangle, Vec4};

use crate::shape::{Primitive, Shape};

/// Error loading a shape file
///
/// Line numbers are 1-based and refer to the original source text.
#[derive(Debug)]
pub enum ShapeLoadError {
    /// IO error reading the file
    Io(io::Error),
    /// The file ended before the expected section
    UnexpectedEof { expected: &'static str },
    /// A count line was not a non-negative integer
    InvalidCount { line: usize, text: String },
    /// A point line was malformed
    InvalidPoint { line: usize, message: String },
    /// A point name was declared twice
    DuplicatePoint { line: usize, name: String },
    /// A primitive referenced a point that was never declared
    UnknownPoint { line: usize, name: String },
    /// A primitive line had neither 2 nor 3 point names
    InvalidPrimitive { line: usize, arity: usize },
    /// Content remained after the declared primitives
    TrailingData { line: usize },
}

impl fmt::Display for ShapeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeLoadError::Io(err) => write!(f, "Shape IO error: {}", err),
            ShapeLoadError::UnexpectedEof { expected } => {
                write!(f, "Unexpected end of shape file, expected {}", expected)
            }
            ShapeLoadError::InvalidCount { line, text } => {
                write!(f, "Line {}: invalid count '{}'", line, text)
            }
            ShapeLoadError::InvalidPoint { line, message } => {
                write!(f, "Line {}: invalid point: {}", line, message)
            }
            ShapeLoadError::DuplicatePoint { line, name } => {
                write!(f, "Line {}: point '{}' declared twice", line, name)
            }
            ShapeLoadError::UnknownPoint { line, name } => {
                write!(f, "Line {}: unknown point '{}'", line, name)
            }
            ShapeLoadError::InvalidPrimitive { line, arity } => {
                write!(f, "Line {}: primitive needs 2 or 3 points, got {}", line, arity)
            }
            ShapeLoadError::TrailingData { line } => {
                write!(f, "Line {}: unexpected data after the last primitive", line)
            }
        }
    }
}

impl std::error::Error for ShapeLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapeLoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ShapeLoadError {
    fn from(err: io::Error) -> Self {
        ShapeLoadError::Io(err)
    }
}

/// Load a shape from a file on disk
pub fn load_shape<P: AsRef<Path>>(path: P) -> Result<Shape, ShapeLoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let shape = parse_shape(&source)?;
    log::debug!(
        "Loaded shape {:?}: {} lines, {} triangles",
        path,
        shape.lines().count(),
        shape.triangles().count()
    );
    Ok(shape)
}

/// Parse a shape from its text form
pub fn parse_shape(source: &str) -> Result<Shape, ShapeLoadError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, strip_comment(text)))
        .filter(|(_, text)| !text.is_empty());

    let point_count = read_count(&mut lines, "point count")?;
    let mut points: HashMap<&str, Vec4> = HashMap::new();

    for _ in 0..point_count {
        let (line, text) = lines
            .next()
            .ok_or(ShapeLoadError::UnexpectedEof { expected: "point" })?;
        let (name, point) = parse_point(line, text)?;
        if points.insert(name, point).is_some() {
            return Err(ShapeLoadError::DuplicatePoint {
                line,
                name: name.to_string(),
            });
        }
    }

    let primitive_count = read_count(&mut lines, "primitive count")?;
    let mut primitives = Vec::new();

    for _ in 0..primitive_count {
        let (line, text) = lines
            .next()
            .ok_or(ShapeLoadError::UnexpectedEof { expected: "primitive" })?;
        primitives.push(parse_primitive(line, text, &points)?);
    }

    if let Some((line, _)) = lines.next() {
        return Err(ShapeLoadError::TrailingData { line });
    }

    Ok(Shape::new(primitives))
}

fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(idx) => text[..idx].trim(),
        None => text.trim(),
    }
}

fn read_count<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &'static str,
) -> Result<usize, ShapeLoadError> {
    let (line, text) = lines
        .next()
        .ok_or(ShapeLoadError::UnexpectedEof { expected })?;
    text.parse::<usize>().map_err(|_| ShapeLoadError::InvalidCount {
        line,
        text: text.to_string(),
    })
}

fn parse_point(line: usize, text: &str) -> Result<(&str, Vec4), ShapeLoadError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(ShapeLoadError::InvalidPoint {
            line,
            message: format!("expected '<name> <x> <y> <z>', got {} fields", tokens.len()),
        });
    }

    let mut coords = [0.0f32; 3];
    for (slot, token) in coords.iter_mut().zip(&tokens[1..]) {
        let value: f32 = token.parse().map_err(|_| ShapeLoadError::InvalidPoint {
            line,
            message: format!("'{}' is not a number", token),
        })?;
        if !value.is_finite() {
            return Err(ShapeLoadError::InvalidPoint {
                line,
                message: format!("'{}' is not a finite coordinate", token),
            });
        }
        *slot = value;
    }

    Ok((tokens[0], Vec4::point(coords[0], coords[1], coords[2])))
}

fn parse_primitive(
    line: usize,
    text: &str,
    points: &HashMap<&str, Vec4>,
) -> Result<Primitive, ShapeLoadError> {
    let lookup = |name: &str| {
        points
            .get(name)
            .copied()
            .ok_or_else(|| ShapeLoadError::UnknownPoint {
                line,
                name: name.to_string(),
            })
    };

    let names: Vec<&str> = text.split_whitespace().collect();
    match names.as_slice() {
        [a, b] => Ok(Primitive::Line(Line::new(lookup(*a)?, lookup(*b)?))),
        [a, b, c] => Ok(Primitive::Triangle(Triangle::new(
            lookup(*a)?,
            lookup(*b)?,
            lookup(*c)?,
        ))),
        other => Err(ShapeLoadError::InvalidPrimitive {
            line,
            arity: other.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
4
a 0 0 0
b 1 0 0
c 1 1 0
d 0 1 0
4
a b
b c
c d
d a
";

    #[test]
    fn test_parse_lines() {
        let shape = parse_shape(SQUARE).unwrap();
        assert_eq!(shape.len(), 4);
        assert_eq!(shape.lines().count(), 4);

        let first = shape.lines().next().unwrap();
        assert_eq!(first.start, Vec4::point(0.0, 0.0, 0.0));
        assert_eq!(first.end, Vec4::point(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_triangles_with_comments() {
        let source = "\
# single triangle
3
p0 0 0 1   # near corner
p1 1 0 1

p2 0 1 1
1
p0 p1 p2
";
        let shape = parse_shape(source).unwrap();
        assert_eq!(shape.triangles().count(), 1);
        let tri = shape.triangles().next().unwrap();
        assert_eq!(tri.vertices[2], Vec4::point(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_shared_names_produce_independent_vertices() {
        let shape = parse_shape(SQUARE).unwrap();
        let moved = shape.translated(Vec4::direction(5.0, 0.0, 0.0));
        // Point `b` is used by two primitives; both copies move independently
        let lines: Vec<_> = moved.lines().collect();
        assert_eq!(lines[0].end.x, 6.0);
        assert_eq!(lines[1].start.x, 6.0);
        assert_eq!(shape.lines().next().unwrap().end.x, 1.0);
    }

    #[test]
    fn test_unknown_point() {
        let source = "2\na 0 0 0\nb 1 1 1\n1\na z\n";
        match parse_shape(source) {
            Err(ShapeLoadError::UnknownPoint { line, name }) => {
                assert_eq!(line, 5);
                assert_eq!(name, "z");
            }
            other => panic!("Expected UnknownPoint, got {:?}", other),
        }
    }

    #[test]
    fn test_short_file() {
        let source = "3\na 0 0 0\nb 1 1 1\n";
        match parse_shape(source) {
            Err(ShapeLoadError::UnexpectedEof { expected }) => assert_eq!(expected, "point"),
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_primitive_section() {
        let source = "1\na 0 0 0\n";
        assert!(matches!(
            parse_shape(source),
            Err(ShapeLoadError::UnexpectedEof { expected: "primitive count" })
        ));
    }

    #[test]
    fn test_invalid_count() {
        let source = "three\n";
        match parse_shape(source) {
            Err(ShapeLoadError::InvalidCount { line, text }) => {
                assert_eq!(line, 1);
                assert_eq!(text, "three");
            }
            other => panic!("Expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_coordinate() {
        let source = "1\na 0 zero 0\n0\n";
        assert!(matches!(
            parse_shape(source),
            Err(ShapeLoadError::InvalidPoint { line: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinate() {
        for token in ["nan", "inf", "-inf"] {
            let source = format!("1\na {} 0 0\n0\n", token);
            assert!(
                matches!(parse_shape(&source), Err(ShapeLoadError::InvalidPoint { line: 2, .. })),
                "'{}' should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_huge_point_count_is_eof_error() {
        for count in ["18446744073709551615", "1000000000000"] {
            let source = format!("{}\na 0 0 0\n", count);
            assert!(matches!(
                parse_shape(&source),
                Err(ShapeLoadError::UnexpectedEof { expected: "point" })
            ));
        }
    }

    #[test]
    fn test_huge_primitive_count_is_eof_error() {
        for count in ["18446744073709551615", "1000000000000"] {
            let source = format!("1\na 0 0 0\n{}\na a\n", count);
            assert!(matches!(
                parse_shape(&source),
                Err(ShapeLoadError::UnexpectedEof { expected: "primitive" })
            ));
        }
    }

    #[test]
    fn test_duplicate_point() {
        let source = "2\na 0 0 0\na 1 1 1\n0\n";
        assert!(matches!(
            parse_shape(source),
            Err(ShapeLoadError::DuplicatePoint { line: 3, .. })
        ));
    }

    #[test]
    fn test_bad_arity() {
        let source = "1\na 0 0 0\n1\na a a a\n";
        assert!(matches!(
            parse_shape(source),
            Err(ShapeLoadError::InvalidPrimitive { line: 4, arity: 4 })
        ));
    }

    #[test]
    fn test_trailing_data() {
        let source = "1\na 0 0 0\n1\na a\na a\n";
        assert!(matches!(
            parse_shape(source),
            Err(ShapeLoadError::TrailingData { line: 5 })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_shape("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ShapeLoadError::Io(_)));
        use std::error::Error;
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_display_mentions_line() {
        let err = ShapeLoadError::UnknownPoint { line: 7, name: "q".to_string() };
        let msg = format!("{}", err);
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("'q'"));
    }
}
