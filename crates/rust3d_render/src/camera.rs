//! Free-flying perspective camera
//!
//! The camera has a position and an orientation stored as pitch/yaw/roll
//! angles in degrees (rotation about x/y/z). At rest it looks down +z with
//! screen y growing downwards, so "up" is the -y direction.

use rust3d_input::CameraControl;
use rust3d_math::{mat4, Mat4, Plane, Vec4};

/// Tunable camera parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    /// Start position
    pub position: [f32; 3],
    /// Start orientation [pitch, yaw, roll] in degrees
    pub rotation: [f32; 3],
    /// Start field of view in degrees
    pub fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance moved per step
    pub position_step: f32,
    /// Degrees turned per step
    pub rotation_step: f32,
    /// Degrees of fov per zoom step
    pub fov_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -2.0],
            rotation: [0.0, 0.0, 0.0],
            fov: 90.0,
            min_fov: 10.0,
            max_fov: 170.0,
            near: 0.1,
            far: 100.0,
            position_step: 0.5,
            rotation_step: 5.0,
            fov_step: 10.0,
        }
    }
}

/// Perspective camera
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space position (w = 1)
    pub position: Vec4,
    pitch: f32,
    yaw: f32,
    roll: f32,
    fov: f32,
    aspect: f32,
    settings: CameraSettings,
}

impl Camera {
    /// Create a camera for a surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_settings(CameraSettings::default(), width, height)
    }

    pub fn with_settings(settings: CameraSettings, width: u32, height: u32) -> Self {
        let [x, y, z] = settings.position;
        let [pitch, yaw, roll] = settings.rotation;
        let mut camera = Self {
            position: Vec4::point(x, y, z),
            pitch,
            yaw,
            roll,
            fov: settings.fov.clamp(settings.min_fov, settings.max_fov),
            aspect: 1.0,
            settings,
        };
        camera.resize(width, height);
        camera
    }

    /// Return to the start position, orientation and fov
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Self {
            aspect,
            ..Self::with_settings(self.settings, 1, 1)
        };
    }

    /// Recompute the aspect ratio; a zero-sized surface is ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Orientation [pitch, yaw, roll] in degrees
    pub fn orientation(&self) -> [f32; 3] {
        [self.pitch, self.yaw, self.roll]
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn zoom_in(&mut self, delta_time: f32) {
        self.set_fov(self.fov - self.settings.fov_step * delta_time);
    }

    pub fn zoom_out(&mut self, delta_time: f32) {
        self.set_fov(self.fov + self.settings.fov_step * delta_time);
    }

    fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(self.settings.min_fov, self.settings.max_fov);
    }

    pub fn rotate_left(&mut self, delta_time: f32) {
        self.roll -= self.settings.rotation_step * delta_time;
    }

    pub fn rotate_right(&mut self, delta_time: f32) {
        self.roll += self.settings.rotation_step * delta_time;
    }

    pub fn look_up(&mut self, delta_time: f32) {
        self.pitch += self.settings.rotation_step * delta_time;
    }

    pub fn look_down(&mut self, delta_time: f32) {
        self.pitch -= self.settings.rotation_step * delta_time;
    }

    pub fn look_right(&mut self, delta_time: f32) {
        self.yaw += self.settings.rotation_step * delta_time;
    }

    pub fn look_left(&mut self, delta_time: f32) {
        self.yaw -= self.settings.rotation_step * delta_time;
    }

    pub fn move_front(&mut self, delta_time: f32) {
        self.move_along(Vec4::Z, delta_time);
    }

    pub fn move_back(&mut self, delta_time: f32) {
        self.move_along(-Vec4::Z, delta_time);
    }

    pub fn move_right(&mut self, delta_time: f32) {
        self.move_along(Vec4::X, delta_time);
    }

    pub fn move_left(&mut self, delta_time: f32) {
        self.move_along(-Vec4::X, delta_time);
    }

    pub fn move_up(&mut self, delta_time: f32) {
        self.move_along(-Vec4::Y, delta_time);
    }

    pub fn move_down(&mut self, delta_time: f32) {
        self.move_along(Vec4::Y, delta_time);
    }

    /// Move along a camera-local axis (a direction, w = 0)
    fn move_along(&mut self, axis: Vec4, delta_time: f32) {
        let world = mat4::transform(self.rotation_matrix(), axis);
        self.position += world * (self.settings.position_step * delta_time);
    }

    /// Camera-to-world rotation `Rx(pitch) · Ry(yaw) · Rz(roll)`
    pub fn rotation_matrix(&self) -> Mat4 {
        mat4::rotation_xyz(self.pitch, self.yaw, self.roll)
    }

    /// World-to-camera matrix
    ///
    /// The rotation part is the transpose of [`Self::rotation_matrix`]; the
    /// translation column holds `-dot(row_i, position)` for the three axes.
    pub fn view_matrix(&self) -> Mat4 {
        let mut view = mat4::transpose(self.rotation_matrix());
        for i in 0..3 {
            let row = mat4::get_row(view, i);
            mat4::set(&mut view, i, 3, -row.dot_xyz(self.position));
        }
        view
    }

    /// Perspective projection; the output w is the camera-space z
    pub fn projection_matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let near = self.settings.near;
        let far = self.settings.far;
        let q = far / (far - near);
        mat4::from_rows([
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, q, -q * near],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Near clip plane in camera space
    pub fn near_plane(&self) -> Plane {
        Plane::new(
            Vec4::point(0.0, 0.0, self.settings.near),
            Vec4::direction(0.0, 0.0, 1.0),
        )
    }

    /// Position and orientation, formatted for the window title
    pub fn readout(&self) -> String {
        format!(
            "x: {:.2} y: {:.2} z: {:.2} | o_x: {:.0} o_y: {:.0} o_z: {:.0} | fov: {:.0}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.pitch,
            self.yaw,
            self.roll,
            self.fov
        )
    }
}

impl CameraControl for Camera {
    fn zoom_in(&mut self, delta_time: f32) {
        Camera::zoom_in(self, delta_time);
    }

    fn zoom_out(&mut self, delta_time: f32) {
        Camera::zoom_out(self, delta_time);
    }

    fn rotate_left(&mut self, delta_time: f32) {
        Camera::rotate_left(self, delta_time);
    }

    fn rotate_right(&mut self, delta_time: f32) {
        Camera::rotate_right(self, delta_time);
    }

    fn look_up(&mut self, delta_time: f32) {
        Camera::look_up(self, delta_time);
    }

    fn look_down(&mut self, delta_time: f32) {
        Camera::look_down(self, delta_time);
    }

    fn look_left(&mut self, delta_time: f32) {
        Camera::look_left(self, delta_time);
    }

    fn look_right(&mut self, delta_time: f32) {
        Camera::look_right(self, delta_time);
    }

    fn move_front(&mut self, delta_time: f32) {
        Camera::move_front(self, delta_time);
    }

    fn move_back(&mut self, delta_time: f32) {
        Camera::move_back(self, delta_time);
    }

    fn move_left(&mut self, delta_time: f32) {
        Camera::move_left(self, delta_time);
    }

    fn move_right(&mut self, delta_time: f32) {
        Camera::move_right(self, delta_time);
    }

    fn move_up(&mut self, delta_time: f32) {
        Camera::move_up(self, delta_time);
    }

    fn move_down(&mut self, delta_time: f32) {
        Camera::move_down(self, delta_time);
    }
}
