//! Stereo render loop adapter.
//!
//! Per frame the display surface hands over a head view matrix and one set
//! of projection/view parameters per eye. The adapter poses the shared
//! camera once from the head (interaction runs there, once per logical
//! frame) and then twice from the eyes (draw only). Hover and trigger state
//! are never evaluated inside the per-eye pass, so the two draws can never
//! double-count a trigger.

use crate::viewer::Viewer;
use glam::{Mat4, Quat, Vec3};
use vista360_camera::{EyeFov, DEFAULT_FAR, DEFAULT_NEAR};
use vista360_scene::RenderBackend;

/// Symmetric per-eye half-angle used when synthesizing frames.
const DEFAULT_EYE_HALF_ANGLE_DEG: f32 = 45.0;

/// Projection and view parameters for one eye.
#[derive(Debug, Clone, Copy)]
pub struct EyeParams {
    /// Asymmetric field of view for this eye.
    pub fov: EyeFov,
    /// Eye view matrix (world space -> eye space), including the
    /// interpupillary offset.
    pub view: Mat4,
}

/// Everything the display surface reports for one frame.
#[derive(Debug, Clone, Copy)]
pub struct StereoFrame {
    /// Head view matrix (world space -> head space).
    pub head_view: Mat4,
    /// Left eye parameters.
    pub left: EyeParams,
    /// Right eye parameters.
    pub right: EyeParams,
}

impl StereoFrame {
    /// Synthesize a frame from a head yaw/pitch and an interpupillary
    /// distance, for the headless driver and tests.
    pub fn from_head_pose(yaw: f32, pitch: f32, ipd: f32) -> Self {
        let orientation = Quat::from_rotation_y(-yaw) * Quat::from_rotation_x(pitch);
        let head_view = Mat4::from_quat(orientation.inverse());
        let eye = |offset: f32| EyeParams {
            fov: EyeFov::symmetric(DEFAULT_EYE_HALF_ANGLE_DEG),
            view: Mat4::from_translation(Vec3::new(-offset, 0.0, 0.0)) * head_view,
        };
        Self {
            head_view,
            left: eye(-ipd * 0.5),
            right: eye(ipd * 0.5),
        }
    }
}

/// Drives the fixed per-frame sequence: frame update, left eye, right eye.
#[derive(Debug)]
pub struct StereoRenderLoop {
    near: f32,
    far: f32,
    frames: u64,
}

impl Default for StereoRenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl StereoRenderLoop {
    /// Render loop with the default clip planes.
    pub fn new() -> Self {
        Self {
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            frames: 0,
        }
    }

    /// Override the clip planes.
    pub fn with_clip(near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            frames: 0,
        }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render one full frame: one interaction update, two eye passes.
    pub fn render_frame<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>, frame: &StereoFrame) {
        // Pose the camera from the head and run all interaction logic once.
        // The view matrix carries the inverse of the world orientation, so
        // the rotation is inverted back on the way in.
        let (rotation, translation) = decompose(frame.head_view);
        let camera = viewer.camera_mut();
        camera.orientation = rotation.inverse();
        camera.position = rotation.inverse() * -translation;
        viewer.on_frame_update();

        // Draw passes: camera pose only, no interaction.
        for eye in [&frame.left, &frame.right] {
            let (rotation, translation) = decompose(eye.view);
            let camera = viewer.camera_mut();
            camera.set_perspective_fov(&eye.fov, self.near, self.far);
            camera.orientation = rotation.inverse();
            camera.position = rotation.inverse() * -translation;
            viewer.draw_eye();
        }

        self.frames += 1;
    }
}

fn decompose(view: Mat4) -> (Quat, Vec3) {
    let (_, rotation, translation) = view.to_scale_rotation_translation();
    (rotation, translation)
}
