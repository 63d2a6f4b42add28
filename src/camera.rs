use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_4;

/// A basic orbiting camera with view and projection matrices.
///
/// Playgrounds drive it from whatever input their engine polls: feed mouse
/// coordinates to [`orbit`](Self::orbit) or elapsed time to
/// [`auto_rotate`](Self::auto_rotate), then upload
/// [`view_matrix`](Self::view_matrix) and [`projection`](Self::projection)
/// as effect parameters.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    radius: f32,
    projection: Mat4,
}

impl OrbitCamera {
    /// Near clip plane distance.
    pub const NEAR: f32 = 1.0;
    /// Far clip plane distance.
    pub const FAR: f32 = 1024.0;

    /// Creates a camera looking at `target` with the given up vector and
    /// viewport aspect ratio, positioned on its default orbit.
    pub fn new(target: Vec3, up: Vec3, aspect: f32) -> Self {
        Self {
            position: Vec3::new(2.0, 1.0, 2.0),
            target,
            up,
            radius: 2.0,
            projection: Mat4::perspective_rh(FRAC_PI_4, aspect, Self::NEAR, Self::FAR),
        }
    }

    /// Current camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the camera to an explicit position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Point the camera looks at.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Sets the orbit sphere radius used by [`orbit`](Self::orbit) and
    /// [`auto_rotate`](Self::auto_rotate).
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Right-handed look-at view matrix for the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Perspective projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Rebuilds the projection for a resized viewport.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = Mat4::perspective_rh(FRAC_PI_4, aspect, Self::NEAR, Self::FAR);
    }

    /// Repositions the camera on its orbit sphere from two angles, typically
    /// mouse x/y scaled by the caller.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.position = self.target
            + Vec3::new(
                yaw.sin() * self.radius,
                pitch.cos() * self.radius,
                yaw.cos() * self.radius,
            );
    }

    /// Time-driven rotation around the target, with a slow vertical bob.
    pub fn auto_rotate(&mut self, elapsed_secs: f32) {
        self.position = self.target
            + Vec3::new(
                elapsed_secs.cos() * self.radius,
                (elapsed_secs * 3.0).cos() * self.radius,
                elapsed_secs.sin() * self.radius,
            );
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_sits_on_the_view_axis() {
        let camera = OrbitCamera::default();
        let viewed = camera.view_matrix().transform_point3(camera.target());
        // Looking down -Z in view space, centered.
        assert!(viewed.x.abs() < 1e-5);
        assert!(viewed.y.abs() < 1e-5);
        assert!(viewed.z < 0.0);
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut camera = OrbitCamera::default();
        camera.set_radius(5.0);
        for i in 0..16 {
            camera.orbit(i as f32 * 0.41, i as f32 * 0.17);
            let d = camera.position().distance(camera.target());
            assert!((d - 5.0).abs() < 1e-4, "distance drifted to {d}");
        }
    }

    #[test]
    fn auto_rotate_moves_the_camera() {
        let mut camera = OrbitCamera::default();
        camera.auto_rotate(0.0);
        let a = camera.position();
        camera.auto_rotate(1.0);
        let b = camera.position();
        assert!(a.distance(b) > 0.1);
    }

    #[test]
    fn aspect_change_rebuilds_projection() {
        let mut camera = OrbitCamera::default();
        let before = camera.projection();
        camera.set_aspect(1.0);
        assert_ne!(before, camera.projection());
    }
}
