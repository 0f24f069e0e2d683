use glam::{Quat, Vec2, Vec3};

use super::core::Camera;

/// Downward tilt of the initial viewpoint, in degrees.
const INITIAL_TILT_DEGREES: f32 = 20.0;
/// Radians of rotation per pixel of drag.
const ROTATE_SPEED: f32 = 0.005;
/// Fraction of the eye distance moved per pixel of pan.
const PAN_SPEED: f32 = 0.0015;
/// Fractional distance change per scroll line.
const ZOOM_SPEED: f32 = 0.1;

/// Camera that circles a bounding sphere around the world Y axis.
///
/// Every call to [`OrbitCamera::advance`] rotates the eye by the
/// configured step unless the orbit is paused. The initial distance keeps
/// the whole sphere in frame for any rotation; [`OrbitCamera::rotate`],
/// [`OrbitCamera::pan`] and [`OrbitCamera::zoom`] apply user input on top.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    center: Vec3,
    radius: f32,
    degrees_per_frame: f32,
    paused: bool,
    camera: Camera,
}

impl OrbitCamera {
    /// Frame a bounding sphere at `center` with the given `radius`.
    #[must_use]
    pub fn new(center: Vec3, radius: f32, aspect: f32, degrees_per_frame: f32) -> Self {
        let radius = radius.max(1.0);
        let mut orbit = Self {
            orientation: Quat::from_rotation_x(-INITIAL_TILT_DEGREES.to_radians()),
            distance: 0.0,
            focus_point: center,
            center,
            radius,
            degrees_per_frame,
            paused: false,
            camera: Camera {
                eye: Vec3::ZERO,
                target: center,
                up: Vec3::Y,
                aspect,
                fovy: 45.0,
                znear: 0.1,
                zfar: 1000.0,
            },
        };
        orbit.fit();
        orbit
    }

    /// Current camera state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Change the per-frame rotation step.
    pub fn set_degrees_per_frame(&mut self, degrees: f32) {
        self.degrees_per_frame = degrees;
    }

    /// Stop or resume the automatic per-frame rotation.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether [`OrbitCamera::advance`] is currently a no-op.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rotate the eye one step around the world Y axis.
    pub fn advance(&mut self) {
        if self.paused {
            return;
        }
        let step = Quat::from_rotation_y(self.degrees_per_frame.to_radians());
        self.orientation = (step * self.orientation).normalize();
        self.update_camera_pos();
    }

    /// Turn the view by a drag of `delta` pixels.
    ///
    /// Horizontal motion spins around the camera's up vector, vertical
    /// motion around its right vector.
    pub fn rotate(&mut self, delta: Vec2) {
        let up = self.orientation * Vec3::Y;
        self.orientation =
            Quat::from_axis_angle(up, -delta.x * ROTATE_SPEED) * self.orientation;

        let right = self.orientation * Vec3::X;
        self.orientation = (Quat::from_axis_angle(right, -delta.y * ROTATE_SPEED)
            * self.orientation)
            .normalize();
        self.update_camera_pos();
    }

    /// Slide the focus point by `delta` screen pixels. Positive x moves
    /// the structure right, positive y moves it down.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = self.distance * PAN_SPEED;

        self.focus_point += right * (-delta.x * scale) + up * (delta.y * scale);
        self.update_camera_pos();
    }

    /// Move the eye toward (positive `lines`) or away from the focus point.
    pub fn zoom(&mut self, lines: f32) {
        self.distance *= 1.0 - lines * ZOOM_SPEED;
        self.distance = self.distance.clamp(self.radius * 0.25, self.radius * 20.0);
        self.update_camera_pos();
    }

    fn fit(&mut self) {
        // The narrower of the two fields of view decides the fit.
        let half_fovy = self.camera.fovy.to_radians() / 2.0;
        let half_fovx = (half_fovy.tan() * self.camera.aspect).atan();
        let half_fov = half_fovy.min(half_fovx);
        self.distance = self.radius / half_fov.sin() * 1.1;
        self.update_camera_pos();
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;

        // Clip planes bracket the structure, wherever panning left it.
        let to_center = (self.center - self.camera.eye).dot(-dir);
        self.camera.znear = (to_center - self.radius * 1.5).max(0.1);
        self.camera.zfar = (to_center + self.radius * 1.5).max(self.camera.znear + 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_keeps_distance_and_target() {
        let center = Vec3::new(4.0, -2.0, 7.0);
        let mut orbit = OrbitCamera::new(center, 25.0, 1.5, 3.0);
        let before = (orbit.camera().eye - center).length();
        for _ in 0..50 {
            orbit.advance();
        }
        let after = (orbit.camera().eye - center).length();
        assert!((before - after).abs() < 1e-2);
        assert_eq!(orbit.camera().target, center);
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 10.0);
        orbit.advance();
        let first = orbit.camera().eye;
        for _ in 0..36 {
            orbit.advance();
        }
        assert!((orbit.camera().eye - first).length() < 1e-2);
    }

    #[test]
    fn paused_orbit_holds_still() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 5.0);
        let eye = orbit.camera().eye;
        orbit.set_paused(true);
        assert!(orbit.is_paused());
        orbit.advance();
        assert_eq!(orbit.camera().eye, eye);

        orbit.set_paused(false);
        orbit.advance();
        assert!((orbit.camera().eye - eye).length() > 1e-3);
    }

    #[test]
    fn rotate_keeps_distance_and_changes_direction() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mut orbit = OrbitCamera::new(center, 10.0, 1.0, 0.0);
        let before = orbit.camera().eye - center;
        orbit.rotate(Vec2::new(120.0, -40.0));
        let after = orbit.camera().eye - center;
        assert!((before.length() - after.length()).abs() < 1e-3);
        assert!(before.normalize().dot(after.normalize()) < 0.99);
        assert!((orbit.camera().up.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn horizontal_drag_keeps_up_vector() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 0.0);
        let up = orbit.camera().up;
        orbit.rotate(Vec2::new(200.0, 0.0));
        assert!((orbit.camera().up - up).length() < 1e-4);
    }

    #[test]
    fn pan_moves_target_in_view_plane() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 0.0);
        let forward = orbit.camera().forward();
        let eye = orbit.camera().eye;
        orbit.pan(Vec2::new(30.0, 10.0));
        let moved = orbit.camera().target;
        assert!(moved.length() > 1e-3);
        assert!(moved.dot(forward).abs() < 1e-4);
        assert!(((orbit.camera().eye - eye) - moved).length() < 1e-4);
    }

    #[test]
    fn dragging_right_moves_focus_left() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 0.0);
        let right = orbit.camera().forward().cross(orbit.camera().up);
        orbit.pan(Vec2::new(50.0, 0.0));
        assert!(orbit.camera().target.dot(right) < 0.0);
    }

    #[test]
    fn zoom_in_shortens_distance_within_limits() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 0.0);
        let start = orbit.camera().eye.length();
        orbit.zoom(1.0);
        let closer = orbit.camera().eye.length();
        assert!((closer - start * 0.9).abs() < 1e-3);

        for _ in 0..100 {
            orbit.zoom(1.0);
        }
        assert!((orbit.camera().eye.length() - 2.5).abs() < 1e-3);
        for _ in 0..100 {
            orbit.zoom(-1.0);
        }
        assert!((orbit.camera().eye.length() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn clip_planes_follow_zoom() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, 10.0, 1.0, 0.0);
        orbit.zoom(-5.0);
        let camera = orbit.camera();
        let distance = camera.eye.length();
        assert!(camera.znear < distance - 10.0);
        assert!(camera.zfar > distance + 10.0);
    }

    #[test]
    fn clip_planes_enclose_sphere() {
        let orbit = OrbitCamera::new(Vec3::ZERO, 30.0, 0.5, 1.0);
        let camera = orbit.camera();
        let distance = camera.eye.length();
        assert!(camera.znear < distance - 30.0);
        assert!(camera.zfar > distance + 30.0);
    }
}
