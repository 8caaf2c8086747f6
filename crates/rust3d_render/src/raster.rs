//! CPU rasterization into an owned framebuffer
//!
//! Screen space has its origin in the top-left corner with y growing
//! downwards. Depth is the camera-space distance carried in `w`; smaller
//! values are closer.

use rust3d_core::Color;
use rust3d_math::{Triangle, Vec4};

/// Per-pixel depth values
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![f32::INFINITY; (width * height) as usize],
        }
    }

    /// Mark every pixel as infinitely far away
    pub fn reset(&mut self) {
        self.values.fill(f32::INFINITY);
    }

    /// Depth at (x, y), or None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.values[idx])
    }

    /// Store `depth` if it is strictly closer than the current value
    ///
    /// Returns true if the value was written. Out-of-bounds coordinates are
    /// never written.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.values[idx] => {
                self.values[idx] = depth;
                true
            }
            _ => false,
        }
    }

    /// True if nothing has been written since the last reset
    pub fn is_clear(&self) -> bool {
        self.values.iter().all(|d| *d == f32::INFINITY)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }
}

/// Color buffer plus depth buffer for one surface
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<Color>,
    depth: DepthBuffer,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color: vec![Color::BLACK; (width * height) as usize],
            depth: DepthBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill with `background` and reset the depth buffer
    pub fn clear(&mut self, background: Color) {
        self.color.fill(background);
        self.depth.reset();
    }

    /// Reallocate for a new surface size; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.color = vec![Color::BLACK; (width * height) as usize];
        self.depth.resize(width, height);
    }

    /// Color at (x, y), or None if out of bounds
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.depth.index(x, y).map(|idx| self.color[idx])
    }

    /// Write a pixel without depth testing
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.depth.index(x, y) {
            self.color[idx] = color;
        }
    }

    /// Write a pixel if `depth` passes the depth test
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        if self.depth.test_and_set(x, y, depth) {
            self.set_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    /// Raw RGBA8 bytes, row-major from the top-left corner
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}

/// A vertex mapped to pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Map an NDC vertex to pixel coordinates, taking depth from `w`
#[inline]
pub fn to_screen(v: Vec4, width: u32, height: u32) -> ScreenVertex {
    ScreenVertex {
        x: (v.x + 1.0) * width as f32 / 2.0,
        y: (v.y + 1.0) * height as f32 / 2.0,
        depth: v.w,
    }
}

/// Camera-space backface test: true if the triangle faces the camera
///
/// The camera sits at the origin, so the first vertex doubles as the view
/// direction.
#[inline]
pub fn is_front_facing(triangle: &Triangle) -> bool {
    triangle.normal().dot_xyz(triangle.vertices[0]) > 0.0
}

/// Draw a segment with Bresenham's algorithm, ignoring depth
pub fn draw_line(fb: &mut Framebuffer, a: ScreenVertex, b: ScreenVertex, color: Color) {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return;
    }

    let (mut x0, mut y0) = (a.x as i32, a.y as i32);
    let (x1, y1) = (b.x as i32, b.y as i32);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        fb.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Per-row step of a quantity over `dy` rows; a flat edge gets 0
#[inline]
fn edge_step(delta: f32, dy: i32) -> f32 {
    if dy != 0 {
        delta / dy.abs() as f32
    } else {
        0.0
    }
}

/// Fill one row between two x positions, interpolating depth
fn draw_span(
    fb: &mut Framebuffer,
    y: i32,
    x_start: i32,
    x_end: i32,
    z_start: f32,
    z_end: f32,
    color: Color,
) -> usize {
    let (x_start, x_end, z_start, z_end) = if x_start > x_end {
        (x_end, x_start, z_end, z_start)
    } else {
        (x_start, x_end, z_start, z_end)
    };

    let t_step = edge_step(1.0, x_end - x_start);
    let mut written = 0;
    for (i, x) in (x_start..=x_end).enumerate() {
        let t = i as f32 * t_step;
        let z = z_start + (z_end - z_start) * t;
        if fb.set_pixel_with_depth(x, y, z, color) {
            written += 1;
        }
    }
    written
}

/// Scanline-fill a triangle with depth testing
///
/// Vertices are sorted by y and the triangle is split at the middle vertex
/// into a flat-bottom and a flat-top half. Returns the number of pixels
/// written.
pub fn fill_triangle(fb: &mut Framebuffer, vertices: [ScreenVertex; 3], color: Color) -> usize {
    if vertices
        .iter()
        .any(|v| !(v.x.is_finite() && v.y.is_finite() && v.depth.is_finite()))
    {
        return 0;
    }

    let mut v = vertices.map(|p| (p.x as i32, p.y as i32, p.depth));
    v.sort_by_key(|p| p.1);
    let [(x1, y1, z1), (x2, y2, z2), (x3, y3, z3)] = v;

    // Long edge 1 -> 3 is shared by both halves
    let long_x_step = edge_step((x3 - x1) as f32, y3 - y1);
    let long_z_step = edge_step(z3 - z1, y3 - y1);
    let long_edge = |y: i32| {
        let t = (y - y1) as f32;
        ((x1 as f32 + t * long_x_step) as i32, z1 + t * long_z_step)
    };

    let mut written = 0;

    let x_step = edge_step((x2 - x1) as f32, y2 - y1);
    let z_step = edge_step(z2 - z1, y2 - y1);
    for y in y1..=y2 {
        let t = (y - y1) as f32;
        let (bx, bz) = long_edge(y);
        let ax = (x1 as f32 + t * x_step) as i32;
        written += draw_span(fb, y, ax, bx, z1 + t * z_step, bz, color);
    }

    let x_step = edge_step((x3 - x2) as f32, y3 - y2);
    let z_step = edge_step(z3 - z2, y3 - y2);
    for y in y2..=y3 {
        let t = (y - y2) as f32;
        let (bx, bz) = long_edge(y);
        let ax = (x2 as f32 + t * x_step) as i32;
        written += draw_span(fb, y, ax, bx, z2 + t * z_step, bz, color);
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(x: f32, y: f32, depth: f32) -> ScreenVertex {
        ScreenVertex { x, y, depth }
    }

    fn lit_pixels(fb: &Framebuffer, color: Color) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel(x, y) == Some(color) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_depth_buffer_strictly_less() {
        let mut depth = DepthBuffer::new(4, 4);
        assert_eq!(depth.get(1, 1), Some(f32::INFINITY));
        assert!(depth.test_and_set(1, 1, 5.0));
        assert!(!depth.test_and_set(1, 1, 5.0));
        assert!(!depth.test_and_set(1, 1, 6.0));
        assert!(depth.test_and_set(1, 1, 4.0));
        assert_eq!(depth.get(1, 1), Some(4.0));

        depth.reset();
        assert!(depth.is_clear());
    }

    #[test]
    fn test_depth_buffer_bounds() {
        let mut depth = DepthBuffer::new(4, 4);
        assert!(!depth.test_and_set(-1, 0, 1.0));
        assert!(!depth.test_and_set(4, 0, 1.0));
        assert!(!depth.test_and_set(0, 4, 1.0));
        assert_eq!(depth.get(0, 4), None);
        assert!(depth.is_clear());
    }

    #[test]
    fn test_framebuffer_clear_and_bytes() {
        let mut fb = Framebuffer::new(2, 1);
        fb.clear(Color::WHITE);
        fb.set_pixel(1, 0, Color::RED);
        fb.set_pixel(5, 5, Color::RED);
        assert_eq!(fb.as_bytes(), &[255, 255, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_framebuffer_resize() {
        let mut fb = Framebuffer::new(2, 2);
        fb.resize(3, 5);
        assert_eq!((fb.width(), fb.height()), (3, 5));
        assert_eq!(fb.pixels().len(), 15);
        assert_eq!(fb.depth().get(2, 4), Some(f32::INFINITY));
    }

    #[test]
    fn test_to_screen_maps_ndc_corners() {
        let p = to_screen(Vec4::new(-1.0, -1.0, 0.5, 3.0), 720, 360);
        assert_eq!((p.x, p.y, p.depth), (0.0, 0.0, 3.0));
        let p = to_screen(Vec4::new(0.0, 1.0, 0.5, 3.0), 720, 360);
        assert_eq!((p.x, p.y), (360.0, 360.0));
    }

    #[test]
    fn test_front_facing() {
        // Clockwise on screen (y grows downwards)
        let front = Triangle::new(
            Vec4::point(0.0, 0.0, 5.0),
            Vec4::point(1.0, 0.0, 5.0),
            Vec4::point(0.0, 1.0, 5.0),
        );
        assert!(is_front_facing(&front));

        let back = Triangle::new(front.vertices[0], front.vertices[2], front.vertices[1]);
        assert!(!is_front_facing(&back));
    }

    #[test]
    fn test_draw_line_endpoints_and_bounds() {
        let mut fb = Framebuffer::new(10, 10);
        draw_line(&mut fb, sv(1.0, 1.0, 0.0), sv(8.0, 4.0, 0.0), Color::GREEN);
        assert_eq!(fb.pixel(1, 1), Some(Color::GREEN));
        assert_eq!(fb.pixel(8, 4), Some(Color::GREEN));
        assert_eq!(lit_pixels(&fb, Color::GREEN).len(), 8);
        assert!(fb.depth().is_clear());

        // Runs off the surface without panicking
        draw_line(&mut fb, sv(-5.0, 5.0, 0.0), sv(15.0, 5.0, 0.0), Color::BLUE);
        assert_eq!(lit_pixels(&fb, Color::BLUE).len(), 10);
    }

    #[test]
    fn test_fill_stays_in_bounding_box() {
        let mut fb = Framebuffer::new(32, 32);
        let tri = [sv(4.0, 3.0, 1.0), sv(20.0, 10.0, 1.0), sv(9.0, 25.0, 1.0)];
        let written = fill_triangle(&mut fb, tri, Color::RED);

        let pixels = lit_pixels(&fb, Color::RED);
        assert_eq!(pixels.len(), written);
        assert!(written > 0);
        for (x, y) in pixels {
            assert!((4..=20).contains(&x), "x = {}", x);
            assert!((3..=25).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_fill_flat_edges() {
        let mut fb = Framebuffer::new(16, 16);
        // Flat top
        assert!(fill_triangle(&mut fb, [sv(2.0, 2.0, 1.0), sv(12.0, 2.0, 1.0), sv(7.0, 10.0, 1.0)], Color::RED) > 0);
        // Flat bottom
        assert!(fill_triangle(&mut fb, [sv(7.0, 3.0, 0.5), sv(2.0, 12.0, 0.5), sv(12.0, 12.0, 0.5)], Color::BLUE) > 0);
        // Degenerate: all on one row
        fill_triangle(&mut fb, [sv(1.0, 14.0, 0.1), sv(5.0, 14.0, 0.1), sv(9.0, 14.0, 0.1)], Color::GREEN);
        assert_eq!(fb.pixel(5, 14), Some(Color::GREEN));
    }

    #[test]
    fn test_nearer_triangle_wins_in_any_order() {
        let near = [sv(2.0, 2.0, 1.0), sv(14.0, 3.0, 1.0), sv(6.0, 14.0, 1.0)];
        let far = [sv(1.0, 1.0, 5.0), sv(15.0, 1.0, 5.0), sv(8.0, 15.0, 5.0)];

        let mut first = Framebuffer::new(16, 16);
        fill_triangle(&mut first, near, Color::RED);
        fill_triangle(&mut first, far, Color::BLUE);

        let mut second = Framebuffer::new(16, 16);
        fill_triangle(&mut second, far, Color::BLUE);
        fill_triangle(&mut second, near, Color::RED);

        assert_eq!(first.pixels(), second.pixels());
        assert_eq!(first.pixel(6, 5), Some(Color::RED));
    }

    #[test]
    fn test_fill_interpolates_depth() {
        let mut fb = Framebuffer::new(16, 16);
        fill_triangle(&mut fb, [sv(0.0, 0.0, 1.0), sv(10.0, 0.0, 1.0), sv(0.0, 10.0, 11.0)], Color::RED);
        let top = fb.depth().get(0, 0).unwrap();
        let lower = fb.depth().get(0, 5).unwrap();
        assert!((top - 1.0).abs() < 1e-4);
        assert!((lower - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_non_finite_vertices_are_skipped() {
        let mut fb = Framebuffer::new(8, 8);
        let written = fill_triangle(
            &mut fb,
            [sv(f32::NAN, 0.0, 1.0), sv(4.0, 4.0, 1.0), sv(0.0, 4.0, 1.0)],
            Color::RED,
        );
        assert_eq!(written, 0);
    }
}
