//! Clipping of lines and triangles against planes
//!
//! Planes keep the half-space their normal points into. A vertex lying
//! exactly on a plane counts as inside. Clipped triangles keep the winding
//! of their source, so culling decisions stay valid after clipping.

use rust3d_math::{Line, Plane, Triangle, Vec4};

/// Clip a segment against a plane
///
/// Returns `None` when both endpoints are outside. When only one endpoint is
/// outside it is moved onto the plane.
pub fn clip_line_against_plane(plane: &Plane, line: &Line) -> Option<Line> {
    let start_dist = plane.signed_distance(line.start);
    let end_dist = plane.signed_distance(line.end);

    match (start_dist >= 0.0, end_dist >= 0.0) {
        (false, false) => None,
        (true, true) => Some(*line),
        (false, true) => Some(Line::new(plane.intersect(line.start, line.end), line.end)),
        (true, false) => Some(Line::new(line.start, plane.intersect(line.start, line.end))),
    }
}

/// Clip a triangle against a plane, producing zero, one or two triangles
pub fn clip_triangle_against_plane(plane: &Plane, triangle: &Triangle) -> Vec<Triangle> {
    let v = triangle.vertices;
    let inside = v.map(|p| plane.signed_distance(p) >= 0.0);
    let inside_count = inside.iter().filter(|&&flag| flag).count();

    match inside_count {
        0 => Vec::new(),
        3 => vec![*triangle],
        1 => {
            let keep = v[inside.iter().position(|&flag| flag).unwrap_or(0)];
            // Outside vertices slide towards the kept one; order is untouched
            let clipped = Triangle {
                vertices: [0, 1, 2].map(|i| {
                    if inside[i] {
                        v[i]
                    } else {
                        plane.intersect(keep, v[i])
                    }
                }),
            };
            vec![clipped]
        }
        2 => {
            let out = inside.iter().position(|&flag| !flag).unwrap_or(0);
            let a = v[(out + 1) % 3];
            let b = v[(out + 2) % 3];
            let o = v[out];

            // Quad a, b, b->o, o->a in the source winding
            let bo = plane.intersect(b, o);
            let oa = plane.intersect(o, a);
            vec![Triangle::new(a, b, bo), Triangle::new(a, bo, oa)]
        }
        count => unreachable!("triangle has {} inside vertices", count),
    }
}

/// Clip triangles against each plane in turn
pub fn clip_triangles_against_planes(planes: &[Plane], triangles: Vec<Triangle>) -> Vec<Triangle> {
    planes.iter().fold(triangles, |current, plane| {
        current
            .iter()
            .flat_map(|tri| clip_triangle_against_plane(plane, tri))
            .collect()
    })
}

/// Clip a segment against each plane in turn
pub fn clip_line_against_planes(planes: &[Plane], line: &Line) -> Option<Line> {
    planes
        .iter()
        .try_fold(*line, |current, plane| clip_line_against_plane(plane, &current))
}

/// Left, right, bottom and top edges of the NDC square, normals facing in
pub fn ndc_side_planes() -> [Plane; 4] {
    [
        Plane::new(Vec4::point(-1.0, 0.0, 0.0), Vec4::direction(1.0, 0.0, 0.0)),
        Plane::new(Vec4::point(1.0, 0.0, 0.0), Vec4::direction(-1.0, 0.0, 0.0)),
        Plane::new(Vec4::point(0.0, -1.0, 0.0), Vec4::direction(0.0, 1.0, 0.0)),
        Plane::new(Vec4::point(0.0, 1.0, 0.0), Vec4::direction(0.0, -1.0, 0.0)),
    ]
}
