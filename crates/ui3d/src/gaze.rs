//! Gaze test: is the camera's forward ray pointing at a widget?
//!
//! Pure with respect to stored state: reads only the camera pose and a
//! target position taken from one consistent transform snapshot, mutates
//! nothing, and is recomputed fresh every frame.

use glam::Vec3;
use vista360_camera::Camera;

/// Horizontal and vertical angles of `target` off the camera's forward
/// axis, in degrees. Targets behind the camera report angles beyond 90°.
pub fn gaze_angles(camera: &Camera, target: Vec3) -> (f32, f32) {
    let local = camera.view_matrix().transform_point3(target);
    // Camera space looks down -Z.
    let yaw = local.x.atan2(-local.z);
    let pitch = local.y.atan2(-local.z);
    (yaw.to_degrees(), pitch.to_degrees())
}

/// Whether the camera is looking at `target` within `tolerance_deg` on both
/// the horizontal and vertical axes.
pub fn is_looking_at(camera: &Camera, target: Vec3, tolerance_deg: f32) -> bool {
    // A target at the camera position has no direction; never a hit.
    if (target - camera.position).length_squared() < 1e-8 {
        return false;
    }
    let (yaw, pitch) = gaze_angles(camera, target);
    yaw.abs() <= tolerance_deg && pitch.abs() <= tolerance_deg
}
