#![warn(missing_docs)]
//! Camera pose and projection for the stereoscopic viewer.
//!
//! One shared [`Camera`] is driven by the render loop: its orientation and
//! position come from the head (or per-eye) pose, and its projection is
//! either the symmetric default or an asymmetric per-eye frustum.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 100.0;
/// Default near clipping plane distance.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clipping plane distance.
pub const DEFAULT_FAR: f32 = 120.0;

/// Per-eye field of view as four positive half-angles in degrees.
///
/// Stereo displays report asymmetric frusta per eye; the four values are the
/// angles from the optical axis to each frustum edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeFov {
    /// Half-angle toward the left edge.
    pub left: f32,
    /// Half-angle toward the right edge.
    pub right: f32,
    /// Half-angle toward the bottom edge.
    pub bottom: f32,
    /// Half-angle toward the top edge.
    pub top: f32,
}

impl EyeFov {
    /// Symmetric field of view with the same half-angle on all four edges.
    pub fn symmetric(half_angle_deg: f32) -> Self {
        Self {
            left: half_angle_deg,
            right: half_angle_deg,
            bottom: half_angle_deg,
            top: half_angle_deg,
        }
    }
}

/// Camera with world-space position, orientation, and projection.
///
/// Yaw convention: radians about the vertical axis, positive turning right,
/// so the forward vector at yaw `y` (pitch 0) is `(sin y, 0, -cos y)`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation in world space.
    pub orientation: Quat,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            projection: Mat4::perspective_rh(
                DEFAULT_FOV_DEGREES.to_radians(),
                1.0,
                DEFAULT_NEAR,
                DEFAULT_FAR,
            ),
        }
    }
}

impl Camera {
    /// Create a camera at the given position, looking down `-Z`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set yaw and pitch in radians, replacing the current orientation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.orientation = Quat::from_rotation_y(-yaw) * Quat::from_rotation_x(pitch);
    }

    /// Rotation about the vertical axis in radians, extracted from the
    /// current orientation. Zero when looking straight up or down.
    pub fn yaw(&self) -> f32 {
        let forward = self.forward();
        if forward.x.abs() < 1e-6 && forward.z.abs() < 1e-6 {
            return 0.0;
        }
        forward.x.atan2(-forward.z)
    }

    /// Forward direction vector (where the camera is looking).
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize()
    }

    /// Up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        (self.orientation * Vec3::Y).normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Set a symmetric perspective projection.
    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far);
    }

    /// Set an asymmetric perspective projection from per-eye half-angles.
    pub fn set_perspective_fov(&mut self, fov: &EyeFov, near: f32, far: f32) {
        self.projection = perspective_from_eye_fov(fov, near, far);
    }

    /// Current projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Build a right-handed, zero-to-one depth projection from four frustum
/// half-angles. Matches `Mat4::perspective_rh` for symmetric inputs.
pub fn perspective_from_eye_fov(fov: &EyeFov, near: f32, far: f32) -> Mat4 {
    let tan_left = fov.left.to_radians().tan();
    let tan_right = fov.right.to_radians().tan();
    let tan_bottom = fov.bottom.to_radians().tan();
    let tan_top = fov.top.to_radians().tan();

    let sx = 2.0 / (tan_left + tan_right);
    let sy = 2.0 / (tan_bottom + tan_top);
    let ox = (tan_right - tan_left) / (tan_left + tan_right);
    let oy = (tan_top - tan_bottom) / (tan_bottom + tan_top);
    let r = far / (near - far);

    Mat4::from_cols(
        Vec4::new(sx, 0.0, 0.0, 0.0),
        Vec4::new(0.0, sy, 0.0, 0.0),
        Vec4::new(ox, oy, r, -1.0),
        Vec4::new(0.0, 0.0, r * near, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert_close(forward.x, 0.0);
        assert_close(forward.y, 0.0);
        assert_close(forward.z, -1.0);
        assert_close(camera.yaw(), 0.0);
    }

    #[test]
    fn yaw_quarter_turn_faces_positive_x() {
        let mut camera = Camera::default();
        camera.set_yaw_pitch(std::f32::consts::FRAC_PI_2, 0.0);
        let forward = camera.forward();
        assert_close(forward.x, 1.0);
        assert_close(forward.z, 0.0);
        assert_close(camera.yaw(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn yaw_roundtrips_through_orientation() {
        let mut camera = Camera::default();
        for yaw in [-2.5f32, -0.3, 0.0, 0.7, 3.0] {
            camera.set_yaw_pitch(yaw, 0.2);
            assert_close(camera.yaw(), yaw);
        }
    }

    #[test]
    fn positive_pitch_looks_up() {
        let mut camera = Camera::default();
        camera.set_yaw_pitch(0.0, 0.3);
        assert!(camera.forward().y > 0.0);
    }

    #[test]
    fn view_matrix_is_finite() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.set_yaw_pitch(1.1, -0.4);
        assert!(camera.view_matrix().to_cols_array().iter().all(|x| x.is_finite()));
        assert!(camera
            .view_projection_matrix()
            .to_cols_array()
            .iter()
            .all(|x| x.is_finite()));
    }

    #[test]
    fn symmetric_eye_fov_matches_perspective() {
        let half_angle = 45.0f32;
        let fov = EyeFov::symmetric(half_angle);
        let asym = perspective_from_eye_fov(&fov, 0.1, 100.0);
        let sym = Mat4::perspective_rh((2.0 * half_angle).to_radians(), 1.0, 0.1, 100.0);

        for (a, b) in asym.to_cols_array().iter().zip(sym.to_cols_array().iter()) {
            assert!((a - b).abs() < 1e-4, "{a} != {b}");
        }
    }

    #[test]
    fn asymmetric_eye_fov_offsets_center() {
        let fov = EyeFov {
            left: 50.0,
            right: 40.0,
            bottom: 45.0,
            top: 45.0,
        };
        let m = perspective_from_eye_fov(&fov, 0.1, 100.0);
        // Wider left half-angle shifts the projection center toward -X.
        assert!(m.z_axis.x < 0.0);
        assert_close(m.z_axis.y, 0.0);
    }
}
