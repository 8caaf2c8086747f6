//! Per-frame geometry and raster stages
//!
//! The geometry stage turns world-space shapes into a [`DrawList`] of NDC
//! primitives:
//!
//! - lines: view → near clip → projection → divide → side-plane clips
//! - triangles: view → backface cull → near clip → projection → divide →
//!   side-plane clips
//!
//! The raster stage draws a draw list into a [`Framebuffer`]. Source shapes
//! are only read; each stage works on copies of the vertices.

use serde::{Serialize, Deserialize};

use rust3d_core::{Color, Primitive, Shape};
use rust3d_math::{mat4, Line, Triangle};

use crate::camera::Camera;
use crate::clipping::{
    clip_line_against_plane, clip_line_against_planes, clip_triangle_against_plane,
    clip_triangles_against_planes, ndc_side_planes,
};
use crate::raster::{draw_line, fill_triangle, is_front_facing, to_screen, Framebuffer};

/// How triangles are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Depth-tested solid fill
    #[default]
    Filled,
    /// Triangle edges only, no depth buffer
    Wireframe,
}

impl RenderMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        }
    }
}

/// A primitive ready for rasterization, in NDC with depth in `w`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drawable {
    Line { line: Line, color: Color },
    Triangle { triangle: Triangle, color: Color },
}

/// Output of the geometry stage for one frame
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: Vec<Drawable>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drawable: Drawable) {
        self.items.push(drawable);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Drawable> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the triangles only
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.items.iter().filter_map(|d| match d {
            Drawable::Triangle { triangle, .. } => Some(triangle),
            Drawable::Line { .. } => None,
        })
    }

    /// Iterate over the lines only
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.items.iter().filter_map(|d| match d {
            Drawable::Line { line, .. } => Some(line),
            Drawable::Triangle { .. } => None,
        })
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Drawable;
    type IntoIter = std::slice::Iter<'a, Drawable>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Counters for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Primitives read from the shapes
    pub input_primitives: usize,
    /// Triangles dropped by the backface test
    pub culled: usize,
    /// Primitives with nothing left after clipping
    pub clipped_away: usize,
    /// Entries in the draw list
    pub drawn: usize,
    /// Pixels written by the raster stage
    pub pixels_written: usize,
}

/// Frame pipeline settings
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Triangle draw mode
    pub mode: RenderMode,
    /// Clear color
    pub background: Color,
    /// Color for shapes that carry none
    pub default_color: Color,
    /// Drop triangles facing away from the camera
    pub cull_backfaces: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            mode: RenderMode::Filled,
            background: Color::BLACK,
            default_color: Color::WHITE,
            cull_backfaces: true,
        }
    }

    /// Builder: set the draw mode
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set the clear color
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Builder: set the fallback shape color
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// Builder: enable or disable backface culling
    pub fn with_backface_culling(mut self, enabled: bool) -> Self {
        self.cull_backfaces = enabled;
        self
    }

    /// Run the geometry stage for every shape
    pub fn build_draw_list(&self, camera: &Camera, shapes: &[Shape]) -> (DrawList, FrameStats) {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let near = camera.near_plane();
        let sides = ndc_side_planes();

        let mut list = DrawList::new();
        let mut stats = FrameStats::default();

        for shape in shapes {
            let color = shape.color().unwrap_or(self.default_color);

            for primitive in shape.primitives() {
                stats.input_primitives += 1;

                match primitive {
                    Primitive::Line(line) => {
                        let in_camera = line.map(|v| mat4::transform(view, v));
                        let clipped = clip_line_against_plane(&near, &in_camera)
                            .map(|l| l.map(|v| mat4::transform_point(projection, v)))
                            .and_then(|l| clip_line_against_planes(&sides, &l));
                        match clipped {
                            Some(line) => list.push(Drawable::Line { line, color }),
                            None => stats.clipped_away += 1,
                        }
                    }
                    Primitive::Triangle(triangle) => {
                        let in_camera = triangle.map(|v| mat4::transform(view, v));
                        if self.cull_backfaces && !is_front_facing(&in_camera) {
                            stats.culled += 1;
                            continue;
                        }

                        let projected = clip_triangle_against_plane(&near, &in_camera)
                            .into_iter()
                            .map(|t| t.map(|v| mat4::transform_point(projection, v)))
                            .collect();
                        let clipped = clip_triangles_against_planes(&sides, projected);
                        if clipped.is_empty() {
                            stats.clipped_away += 1;
                        }
                        for triangle in clipped {
                            list.push(Drawable::Triangle { triangle, color });
                        }
                    }
                }
            }
        }

        stats.drawn = list.len();
        (list, stats)
    }

    /// Draw a draw list into the framebuffer
    ///
    /// Lines never use the depth buffer. In wireframe mode triangles are
    /// drawn as their three edges and the depth buffer is left untouched.
    /// Returns the number of depth-tested pixels written.
    pub fn rasterize(draw_list: &DrawList, fb: &mut Framebuffer, mode: RenderMode) -> usize {
        let (width, height) = (fb.width(), fb.height());
        let mut written = 0;

        for drawable in draw_list {
            match *drawable {
                Drawable::Line { line, color } => {
                    draw_line(
                        fb,
                        to_screen(line.start, width, height),
                        to_screen(line.end, width, height),
                        color,
                    );
                }
                Drawable::Triangle { triangle, color } => {
                    let screen = triangle.vertices.map(|v| to_screen(v, width, height));
                    match mode {
                        RenderMode::Filled => written += fill_triangle(fb, screen, color),
                        RenderMode::Wireframe => {
                            for i in 0..3 {
                                draw_line(fb, screen[i], screen[(i + 1) % 3], color);
                            }
                        }
                    }
                }
            }
        }

        written
    }

    /// Clear, build and rasterize one frame
    pub fn render_frame(&self, camera: &Camera, shapes: &[Shape], fb: &mut Framebuffer) -> FrameStats {
        fb.clear(self.background);
        let (list, mut stats) = self.build_draw_list(camera, shapes);
        stats.pixels_written = Self::rasterize(&list, fb, self.mode);
        log::trace!("Frame: {:?}", stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust3d_math::Vec4;

    fn camera() -> Camera {
        // At (0, 0, -2) looking down +z
        Camera::new(64, 64)
    }

    /// Front-facing for a camera looking down +z (clockwise on screen)
    fn facing_triangle(z: f32) -> Triangle {
        Triangle::new(
            Vec4::point(-0.5, -0.5, z),
            Vec4::point(0.5, -0.5, z),
            Vec4::point(-0.5, 0.5, z),
        )
    }

    fn shape_of(primitives: Vec<Primitive>, color: Color) -> Shape {
        Shape::new(primitives).with_color(color)
    }

    #[test]
    fn test_render_mode_toggle() {
        assert_eq!(RenderMode::Filled.toggled(), RenderMode::Wireframe);
        assert_eq!(RenderMode::Wireframe.toggled(), RenderMode::Filled);
    }

    #[test]
    fn test_visible_triangle_reaches_draw_list() {
        let shapes = vec![shape_of(vec![facing_triangle(1.0).into()], Color::RED)];
        let (list, stats) = Pipeline::new().build_draw_list(&camera(), &shapes);

        assert_eq!(stats.input_primitives, 1);
        assert_eq!(stats.culled, 0);
        assert_eq!(list.len(), 1);
        let tri = list.triangles().next().unwrap();
        // Depth is the camera-space distance: 1 - (-2) = 3
        for v in tri.vertices {
            assert!((v.w - 3.0).abs() < 1e-4);
            assert!(v.x.abs() <= 1.0 && v.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_back_facing_triangle_is_culled() {
        let front = facing_triangle(1.0);
        let back = Triangle::new(front.vertices[0], front.vertices[2], front.vertices[1]);
        let shapes = vec![shape_of(vec![back.into()], Color::RED)];

        let (list, stats) = Pipeline::new().build_draw_list(&camera(), &shapes);
        assert!(list.is_empty());
        assert_eq!(stats.culled, 1);

        let (list, _) = Pipeline::new()
            .with_backface_culling(false)
            .build_draw_list(&camera(), &shapes);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_triangle_behind_camera_is_clipped() {
        let shapes = vec![shape_of(vec![facing_triangle(-5.0).into()], Color::RED)];
        let (list, stats) = Pipeline::new()
            .with_backface_culling(false)
            .build_draw_list(&camera(), &shapes);
        assert!(list.is_empty());
        assert_eq!(stats.clipped_away, 1);
    }

    #[test]
    fn test_line_crossing_near_plane_is_trimmed() {
        let line = Line::new(Vec4::point(0.0, 0.0, -10.0), Vec4::point(0.0, 0.0, 10.0));
        let shapes = vec![shape_of(vec![line.into()], Color::GREEN)];
        let (list, _) = Pipeline::new().build_draw_list(&camera(), &shapes);

        let clipped = list.lines().next().unwrap();
        // The start was moved onto the near plane, so its depth is `near`
        assert!((clipped.start.w - 0.1).abs() < 1e-4);
        assert!((clipped.end.w - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_source_shapes_untouched() {
        let shapes = vec![shape_of(vec![facing_triangle(1.0).into()], Color::RED)];
        let before = shapes.clone();
        Pipeline::new().build_draw_list(&camera(), &shapes);
        assert_eq!(shapes, before);
    }

    #[test]
    fn test_uncolored_shape_uses_default() {
        let shapes = vec![Shape::new(vec![facing_triangle(1.0).into()])];
        let (list, _) = Pipeline::new()
            .with_default_color(Color::BLUE)
            .build_draw_list(&camera(), &shapes);
        match list.iter().next() {
            Some(Drawable::Triangle { color, .. }) => assert_eq!(*color, Color::BLUE),
            other => panic!("Expected a triangle, got {:?}", other),
        }
    }

    #[test]
    fn test_wireframe_leaves_depth_untouched() {
        let shapes = vec![shape_of(vec![facing_triangle(1.0).into()], Color::RED)];
        let mut fb = Framebuffer::new(64, 64);
        let stats = Pipeline::new()
            .with_mode(RenderMode::Wireframe)
            .render_frame(&camera(), &shapes, &mut fb);

        assert_eq!(stats.pixels_written, 0);
        assert!(fb.depth().is_clear());
        assert!(fb.pixels().contains(&Color::RED));
    }

    #[test]
    fn test_filled_frame_writes_depth() {
        let shapes = vec![shape_of(vec![facing_triangle(1.0).into()], Color::RED)];
        let mut fb = Framebuffer::new(64, 64);
        let stats = Pipeline::new().render_frame(&camera(), &shapes, &mut fb);

        assert!(stats.pixels_written > 0);
        assert_eq!(fb.pixel(28, 28), Some(Color::RED));
        assert!(!fb.depth().is_clear());
    }

    #[test]
    fn test_render_frame_clears_first() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_pixel(0, 0, Color::RED);
        Pipeline::new()
            .with_background(Color::WHITE)
            .render_frame(&camera(), &[], &mut fb);
        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE));
    }
}
