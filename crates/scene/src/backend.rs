//! Render backend seam and the headless implementation used by tests and
//! the demo driver.

use crate::{NodeId, Scene, TextureId};
use std::collections::HashMap;
use thiserror::Error;
use vista360_camera::Camera;

/// Errors surfaced by the renderer boundary.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The backend failed to rasterize or attach a label texture.
    #[error("failed to create texture {label:?}: {reason}")]
    TextureCreation {
        /// Debug name of the requesting element.
        label: String,
        /// Backend-specific failure description.
        reason: String,
    },
    /// A node handle did not resolve to an attached node.
    #[error("unknown scene node {0:?}")]
    NodeNotFound(NodeId),
}

/// The surface the external stereoscopic renderer must provide.
///
/// Texture creation covers text-to-texture rasterization, which happens off
/// the interaction hot path (explicit text or mode changes only). `draw_eye`
/// is invoked twice per frame, once per eye, and must treat the scene as
/// read-only.
pub trait RenderBackend {
    /// Rasterize `text` into a texture and return its handle.
    fn create_text_texture(&mut self, label: &str, text: &str) -> Result<TextureId, SceneError>;

    /// Release a texture previously returned by [`Self::create_text_texture`].
    fn release_texture(&mut self, texture: TextureId);

    /// Draw one eye pass of the scene with the camera's current pose.
    fn draw_eye(&mut self, scene: &Scene, camera: &Camera);
}

/// In-memory backend: tracks texture lifetimes and counts draw calls.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_texture: u64,
    textures: HashMap<TextureId, String>,
    released: u64,
    draws: u64,
    fail_texture_creation: bool,
}

impl HeadlessBackend {
    /// Create a backend that accepts every request.
    pub fn new() -> Self {
        Self {
            next_texture: 1,
            ..Default::default()
        }
    }

    /// Arm or disarm texture-creation failure, for resource-error paths.
    pub fn set_fail_texture_creation(&mut self, fail: bool) {
        self.fail_texture_creation = fail;
    }

    /// Number of textures currently alive.
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of textures released so far.
    pub fn released_count(&self) -> u64 {
        self.released
    }

    /// Text content a live texture was created from.
    pub fn texture_text(&self, texture: TextureId) -> Option<&str> {
        self.textures.get(&texture).map(String::as_str)
    }

    /// Number of eye passes drawn so far.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_text_texture(&mut self, label: &str, text: &str) -> Result<TextureId, SceneError> {
        if self.fail_texture_creation {
            return Err(SceneError::TextureCreation {
                label: label.to_string(),
                reason: "texture creation disabled".to_string(),
            });
        }
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, text.to_string());
        tracing::debug!(label, texture = id.0, "created text texture");
        Ok(id)
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            tracing::warn!(texture = texture.0, "released unknown texture");
        }
        self.released += 1;
    }

    fn draw_eye(&mut self, scene: &Scene, camera: &Camera) {
        let visible = scene.iter().filter(|(id, _)| scene.is_visible(*id)).count();
        tracing::trace!(visible, yaw = camera.yaw(), "headless eye pass");
        self.draws += 1;
    }
}
