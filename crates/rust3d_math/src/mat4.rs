//! 4x4 matrix utilities for homogeneous transforms
//!
//! Matrices are plain arrays in column-major order: `m[col][row]`.
//! Every operation returns a fresh matrix; the only in-place mutation is
//! [`set`], used while assembling the camera's view matrix.
//!
//! Rotations compose as `Rx · Ry · Rz` and are given in degrees.

use crate::Vec4;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Build a matrix from four rows written in reading order
///
/// # Example
/// ```
/// use rust3d_math::mat4::{self, from_rows};
/// let m = from_rows([
///     [1.0, 0.0, 0.0, 5.0],
///     [0.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0, 0.0],
///     [0.0, 0.0, 0.0, 1.0],
/// ]);
/// assert_eq!(mat4::get(m, 0, 3), 5.0);
/// ```
pub fn from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    transpose(rows)
}

/// Create a rotation matrix in the plane spanned by two axes.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
///
/// Rotates axis `p1` towards axis `p2`.
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the X axis (pitch), angle in degrees
pub fn rotation_x(degrees: f32) -> Mat4 {
    plane_rotation(degrees.to_radians(), 1, 2)
}

/// Rotation about the Y axis (yaw), angle in degrees
pub fn rotation_y(degrees: f32) -> Mat4 {
    plane_rotation(degrees.to_radians(), 2, 0)
}

/// Rotation about the Z axis (roll), angle in degrees
pub fn rotation_z(degrees: f32) -> Mat4 {
    plane_rotation(degrees.to_radians(), 0, 1)
}

/// Combined rotation `Rx · Ry · Rz` from angles in degrees
pub fn rotation_xyz(x_degrees: f32, y_degrees: f32, z_degrees: f32) -> Mat4 {
    mul(mul(rotation_x(x_degrees), rotation_y(y_degrees)), rotation_z(z_degrees))
}

/// Translation by the xyz components of `offset`
pub fn translation(offset: Vec4) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a Vec4 by a 4x4 matrix: `M * v`, no perspective divide
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}

/// Transform a Vec4 and apply the perspective divide when `w != 0`
pub fn transform_point(m: Mat4, v: Vec4) -> Vec4 {
    transform(m, v).perspective_divide()
}

/// Read the element at `row`, `col`
#[inline]
pub fn get(m: Mat4, row: usize, col: usize) -> f32 {
    m[col][row]
}

/// Write the element at `row`, `col` in place
#[inline]
pub fn set(m: &mut Mat4, row: usize, col: usize, value: f32) {
    m[col][row] = value;
}

/// Get a column vector from a matrix
pub fn get_column(m: Mat4, col: usize) -> Vec4 {
    Vec4::new(m[col][0], m[col][1], m[col][2], m[col][3])
}

/// Get a row vector from a matrix
pub fn get_row(m: Mat4, row: usize) -> Vec4 {
    Vec4::new(m[0][row], m[1][row], m[2][row], m[3][row])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}
