//! Interactive button widget.

use crate::widget::{Widget, DEFAULT_GAZE_TOLERANCE_DEG};
use glam::Vec3;
use vista360_scene::{Node, NodeId, RenderBackend, Scene, TextureId};

const BUTTON_DEPTH: f32 = 0.2;

/// Background tints for the two hover states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    /// Tint while idle.
    pub normal: [f32; 4],
    /// Tint while targeted by gaze.
    pub hovered: [f32; 4],
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            // Faint gray idle, darker opaque highlight on hover.
            normal: [0.216, 0.216, 0.216, 0.216],
            hovered: [0.176, 0.176, 0.176, 0.706],
        }
    }
}

/// A gaze-targetable button with a text label and a trigger action.
///
/// The action is a zero-argument callback invoked at most once per discrete
/// trigger event, never per render pass. Visual hover feedback is a tint
/// swap on the button's scene node.
pub struct Button {
    node: NodeId,
    label: String,
    width: f32,
    height: f32,
    colors: ButtonColors,
    tolerance_deg: f32,
    hovered: bool,
    recycled: bool,
    texture: Option<TextureId>,
    action: Option<Box<dyn FnMut()>>,
}

impl Button {
    /// Create a button and attach its node to the scene.
    ///
    /// Label texture creation can fail under resource exhaustion; the button
    /// is still constructed with a blank label and the failure is logged.
    pub fn new(
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        label: impl Into<String>,
        width: f32,
        height: f32,
    ) -> Self {
        let label = label.into();
        let colors = ButtonColors::default();
        let node = scene.add_node(
            Node::new(format!("button:{label}"))
                .with_quad(width, height, BUTTON_DEPTH)
                .with_tint(colors.normal),
        );

        let texture = match backend.create_text_texture("button", &label) {
            Ok(texture) => {
                if let Some(node) = scene.node_mut(node) {
                    node.texture = Some(texture);
                }
                Some(texture)
            }
            Err(err) => {
                tracing::error!(%err, %label, "button label texture failed; starting blank");
                None
            }
        };

        Self {
            node,
            label,
            width,
            height,
            colors,
            tolerance_deg: DEFAULT_GAZE_TOLERANCE_DEG,
            hovered: false,
            recycled: false,
            texture,
            action: None,
        }
    }

    /// Builder: bind the trigger action.
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Builder: override the gaze tolerance in degrees.
    pub fn with_gaze_tolerance(mut self, tolerance_deg: f32) -> Self {
        self.tolerance_deg = tolerance_deg;
        self
    }

    /// Builder: override the hover tints.
    pub fn with_colors(mut self, colors: ButtonColors) -> Self {
        self.colors = colors;
        self
    }

    /// Current label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the rendered label.
    ///
    /// Scoped resource exchange: the new texture is created and attached
    /// first, and only then is the old one released. On failure the old
    /// texture stays attached and the label is unchanged; the error is
    /// logged and never propagated to the frame loop.
    pub fn set_text(
        &mut self,
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if self.recycled {
            tracing::warn!(label = %self.label, "set_text on recycled button ignored");
            return;
        }
        match backend.create_text_texture("button", &text) {
            Ok(texture) => {
                if let Some(node) = scene.node_mut(self.node) {
                    node.texture = Some(texture);
                }
                if let Some(old) = self.texture.replace(texture) {
                    backend.release_texture(old);
                }
                self.label = text;
            }
            Err(err) => {
                tracing::error!(%err, label = %self.label, "keeping previous button label");
            }
        }
    }
}

impl Widget for Button {
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

    fn is_interactive(&self) -> bool {
        true
    }

    fn gaze_tolerance_deg(&self) -> f32 {
        self.tolerance_deg
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn set_hovered(&mut self, scene: &mut Scene, hovered: bool) {
        if self.recycled {
            return;
        }
        self.hovered = hovered;
        if let Some(node) = scene.node_mut(self.node) {
            node.tint = if hovered {
                self.colors.hovered
            } else {
                self.colors.normal
            };
        }
    }

    fn on_trigger(&mut self) -> bool {
        if !self.hovered || self.recycled {
            return false;
        }
        if let Some(action) = self.action.as_mut() {
            action();
        }
        true
    }

    fn recycle(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend) {
        if self.recycled {
            return;
        }
        self.recycled = true;
        self.hovered = false;
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
    use std::cell::Cell;
    use std::rc::Rc;
    use vista360_scene::HeadlessBackend;

    fn counting_button(
        scene: &mut Scene,
        backend: &mut HeadlessBackend,
    ) -> (Button, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let hits = Rc::clone(&count);
        let button = Button::new(scene, backend, "Cubic", 8.0, 2.0)
            .with_action(move || hits.set(hits.get() + 1));
        (button, count)
    }

    #[test]
    fn trigger_requires_hover() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let (mut button, count) = counting_button(&mut scene, &mut backend);

        assert!(!button.on_trigger());
        assert_eq!(count.get(), 0);

        button.set_hovered(&mut scene, true);
        assert!(button.on_trigger());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn repeated_triggers_are_not_debounced() {
        // Documented current behavior: without a hover change in between,
        // a second trigger event runs the action again.
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let (mut button, count) = counting_button(&mut scene, &mut backend);

        button.set_hovered(&mut scene, true);
        assert!(button.on_trigger());
        assert!(button.on_trigger());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn hover_swaps_background_tint() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut button = Button::new(&mut scene, &mut backend, "Cubic", 8.0, 2.0);

        let normal = scene.node(button.node()).unwrap().tint;
        button.set_hovered(&mut scene, true);
        let hovered = scene.node(button.node()).unwrap().tint;
        assert_ne!(normal, hovered);

        button.set_hovered(&mut scene, false);
        assert_eq!(scene.node(button.node()).unwrap().tint, normal);
    }

    #[test]
    fn set_text_exchanges_textures() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut button = Button::new(&mut scene, &mut backend, "Cubic", 8.0, 2.0);
        assert_eq!(backend.live_texture_count(), 1);

        button.set_text(&mut scene, &mut backend, "Equirectangular");
        assert_eq!(button.label(), "Equirectangular");
        // Old label texture was released after the new one attached.
        assert_eq!(backend.live_texture_count(), 1);
        assert_eq!(backend.released_count(), 1);

        let texture = scene.node(button.node()).unwrap().texture.unwrap();
        assert_eq!(backend.texture_text(texture), Some("Equirectangular"));
    }

    #[test]
    fn set_text_failure_keeps_previous_label() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut button = Button::new(&mut scene, &mut backend, "Cubic", 8.0, 2.0);
        let before = scene.node(button.node()).unwrap().texture;

        backend.set_fail_texture_creation(true);
        button.set_text(&mut scene, &mut backend, "Equirectangular");

        assert_eq!(button.label(), "Cubic");
        assert_eq!(scene.node(button.node()).unwrap().texture, before);
        assert_eq!(backend.live_texture_count(), 1);
    }

    #[test]
    fn construction_survives_texture_failure() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        backend.set_fail_texture_creation(true);

        let button = Button::new(&mut scene, &mut backend, "Cubic", 8.0, 2.0);
        assert!(scene.node(button.node()).unwrap().texture.is_none());
        assert!(!button.is_recycled());
    }

    #[test]
    fn recycle_is_idempotent() {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let (mut button, count) = counting_button(&mut scene, &mut backend);
        button.set_hovered(&mut scene, true);

        button.recycle(&mut scene, &mut backend);
        assert!(button.is_recycled());
        assert_eq!(backend.live_texture_count(), 0);
        assert!(scene.node(button.node()).is_none());

        // Second recycle and post-recycle trigger are no-ops.
        button.recycle(&mut scene, &mut backend);
        assert!(!button.on_trigger());
        assert_eq!(count.get(), 0);
        assert_eq!(backend.released_count(), 1);
    }
}
