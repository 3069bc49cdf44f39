//! Floating text panel widget.

use crate::widget::Widget;
use glam::Vec3;
use vista360_scene::{Node, NodeId, RenderBackend, Scene, TextureId};

const PANEL_DEPTH: f32 = 0.4;

/// A larger, non-interactive text panel.
///
/// Shares the widget lifecycle with [`Button`](crate::Button): stacked by
/// the menu, recyclable, and label-swapped through the same scoped texture
/// exchange. It never hovers and never consumes trigger events.
pub struct LongText {
    node: NodeId,
    text: String,
    width: f32,
    height: f32,
    recycled: bool,
    texture: Option<TextureId>,
}

impl LongText {
    /// Create a text panel and attach its node to the scene.
    pub fn new(
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        text: impl Into<String>,
        width: f32,
        height: f32,
    ) -> Self {
        let text = text.into();
        let node = scene.add_node(Node::new("long_text").with_quad(width, height, PANEL_DEPTH));

        let texture = match backend.create_text_texture("long_text", &text) {
            Ok(texture) => {
                if let Some(node) = scene.node_mut(node) {
                    node.texture = Some(texture);
                }
                Some(texture)
            }
            Err(err) => {
                tracing::error!(%err, "text panel texture failed; starting blank");
                None
            }
        };

        Self {
            node,
            text,
            width,
            height,
            recycled: false,
            texture,
        }
    }

    /// Current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the rendered text; on failure the previous content stays.
    pub fn set_text(
        &mut self,
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if self.recycled {
            tracing::warn!("set_text on recycled text panel ignored");
            return;
        }
        match backend.create_text_texture("long_text", &text) {
            Ok(texture) => {
                if let Some(node) = scene.node_mut(self.node) {
                    node.texture = Some(texture);
                }
                if let Some(old) = self.texture.replace(texture) {
                    backend.release_texture(old);
                }
                self.text = text;
            }
            Err(err) => {
                tracing::error!(%err, "keeping previous panel text");
            }
        }
    }
}

impl Widget for LongText {
    fn node(&self) -> NodeId {
        self.node
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_position(&mut self, scene: &mut Scene, position: Vec3) {
        if let Some(node) = scene.node_mut(self.node) {
            node.transform.translation = position;
        }
    }

    fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        if let Some(node) = scene.node_mut(self.node) {
            node.visible = visible;
        }
    }

    fn move_up(&mut self, scene: &mut Scene, offset: f32) {
        if let Some(node) = scene.node_mut(self.node) {
            node.transform.translation.y += offset;
        }
    }

    fn recycle(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend) {
        if self.recycled {
            return;
        }
        self.recycled = true;
        if let Some(node) = scene.node_mut(self.node) {
            node.visible = false;
        }
        if let Some(texture) = self.texture.take() {
            backend.release_texture(texture);
        }
        scene.remove_node(self.node);
    }

    fn is_recycled(&self) -> bool {
        self.recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista360_scene::HeadlessBackend;

    #[test]
    fn never_interactive_never_hovered() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut panel = LongText::new(&mut scene, &mut backend, "hello", 10.0, 5.0);

        assert!(!panel.is_interactive());
        panel.set_hovered(&mut scene, true);
        assert!(!panel.is_hovered());
        assert!(!panel.on_trigger());
    }

    #[test]
    fn set_text_swaps_content() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut panel = LongText::new(&mut scene, &mut backend, "Equirectangular", 10.0, 5.0);

        panel.set_text(&mut scene, &mut backend, "Cubic");
        assert_eq!(panel.text(), "Cubic");
        assert_eq!(backend.live_texture_count(), 1);

        backend.set_fail_texture_creation(true);
        panel.set_text(&mut scene, &mut backend, "Ignored");
        assert_eq!(panel.text(), "Cubic");
    }

    #[test]
    fn recycle_detaches_node() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut panel = LongText::new(&mut scene, &mut backend, "hello", 10.0, 5.0);

        panel.recycle(&mut scene, &mut backend);
        assert!(panel.is_recycled());
        assert!(scene.node(panel.node()).is_none());
        assert_eq!(backend.live_texture_count(), 0);

        panel.recycle(&mut scene, &mut backend);
        assert_eq!(backend.released_count(), 1);
    }
}
