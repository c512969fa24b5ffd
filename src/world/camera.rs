/// Camera — low-level passive data container.
///
/// The camera computes nothing per frame. The caller (game engine) is
/// responsible for setting position, orientation and clip parameters;
/// the propagator reads them and builds the root frustum itself.
///
/// `view_corners` is a convenience for hosts that drive the camera from
/// high-level parameters; a host may equally compute the root view
/// rectangle by other means and feed it to the propagator directly.

use glam::Vec3;

/// Passive camera state consumed by the visibility propagator.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    /// Vertical field of view in radians
    fov_y: f32,
    /// Viewport width / height
    aspect: f32,
    /// Far-clip distance along `forward`
    far_clip: f32,
}

impl Camera {
    /// Create a camera. `forward` and `up` are normalized; `up` is
    /// re-orthogonalized against `forward`.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3, fov_y: f32, aspect: f32, far_clip: f32) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self { position, forward, up, fov_y, aspect, far_clip }
    }

    // ===== GETTERS =====

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View direction (unit length).
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Up vector (unit length, orthogonal to `forward`).
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Far-clip distance.
    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    // ===== SETTERS — store, compute nothing =====

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Re-orient the camera; `up` is re-orthogonalized.
    pub fn set_orientation(&mut self, forward: Vec3, up: Vec3) {
        let forward = forward.normalize();
        let right = forward.cross(up).normalize();
        self.forward = forward;
        self.up = right.cross(forward);
    }

    /// Change the far-clip distance.
    pub fn set_far_clip(&mut self, far_clip: f32) {
        self.far_clip = far_clip;
    }

    /// Corners of the view rectangle at `distance` along the forward
    /// axis, wound CCW as seen from the camera.
    ///
    /// This is the seed loop for the root frustum.
    pub fn view_corners(&self, distance: f32) -> [Vec3; 4] {
        let center = self.position + self.forward * distance;
        let half_height = (self.fov_y * 0.5).tan() * distance;
        let half_width = half_height * self.aspect;
        let right = self.forward.cross(self.up);

        let h = right * half_width;
        let v = self.up * half_height;
        [
            center - h - v,
            center + h - v,
            center + h + v,
            center - h + v,
        ]
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
