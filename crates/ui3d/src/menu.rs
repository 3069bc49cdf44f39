//! Widget group: vertical stacking, camera-following, exclusive gaze scan,
//! and trigger propagation.

use crate::gaze;
use crate::widget::Widget;
use glam::Vec3;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use vista360_camera::Camera;
use vista360_scene::{Node, NodeId, RenderBackend, Scene};

/// Default distance from the viewer, in world units.
pub const DEFAULT_MENU_DISTANCE: f32 = 20.0;
/// Default vertical gap between stacked widgets, in world units.
pub const DEFAULT_WIDGET_SPACING: f32 = 0.5;

/// Vertical offset of the menu anchor above the viewer's eye line.
const MENU_BASE_HEIGHT: f32 = 2.0;

static MENU_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_menu_tag() -> String {
    format!("menu{}", MENU_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Errors from group operations. These are programmer errors: the operation
/// is not performed and group state is unchanged.
#[derive(Debug, Error)]
pub enum UiError {
    /// Widget index outside `[0, len)`.
    #[error("widget index {index} out of range (menu has {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of widgets in the group.
        len: usize,
    },
}

/// An ordered group of widgets stacked vertically below a shared anchor.
///
/// Insertion order is stacking order and decides gaze-scan priority: when
/// two widgets both satisfy the gaze test in one frame, the earlier-inserted
/// one wins and the rest are forced un-hovered. At most one widget in the
/// group is hovered at any time.
pub struct Menu {
    node: NodeId,
    tag: String,
    widgets: Vec<Box<dyn Widget>>,
    distance: f32,
    spacing: f32,
    following: bool,
    visible: bool,
    recycled: bool,
}

impl Menu {
    /// Create a menu with default distance and spacing.
    pub fn new(scene: &mut Scene) -> Self {
        Self::with_layout(scene, DEFAULT_MENU_DISTANCE, DEFAULT_WIDGET_SPACING)
    }

    /// Create a menu at `distance` ahead of the viewer with the given
    /// inter-widget `spacing`.
    pub fn with_layout(scene: &mut Scene, distance: f32, spacing: f32) -> Self {
        let tag = next_menu_tag();
        let node = scene.add_node(
            Node::new(tag.clone())
                .with_translation(Vec3::new(0.0, MENU_BASE_HEIGHT, -distance)),
        );
        Self {
            node,
            tag,
            widgets: Vec::new(),
            distance,
            spacing,
            following: true,
            visible: true,
            recycled: false,
        }
    }

    /// Handle of the menu's anchor node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Debug tag, unique per process.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of widgets in the group.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the group holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Enable or disable camera-following.
    pub fn set_following(&mut self, following: bool) {
        self.following = following;
    }

    /// Append a widget below the ones already added.
    ///
    /// The widget's vertical offset is the cumulative height-plus-spacing of
    /// every previously added widget. Its node is re-parented under the menu
    /// anchor. A widget that cannot be attached (recycled menu, unknown
    /// node) is recycled so its texture is released.
    pub fn add_widget(
        &mut self,
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        mut widget: Box<dyn Widget>,
    ) {
        if self.recycled {
            tracing::warn!(tag = %self.tag, "add_widget on recycled menu ignored");
            widget.recycle(scene, backend);
            return;
        }
        let offset = self.next_widget_y();
        if let Err(err) = scene.set_parent(widget.node(), Some(self.node)) {
            tracing::warn!(%err, tag = %self.tag, "could not attach widget to menu");
            widget.recycle(scene, backend);
            return;
        }
        widget.move_up(scene, -offset);
        self.widgets.push(widget);
    }

    /// Remove the widget whose scene node is `node`, detaching it from the
    /// menu and handing ownership back. Unknown nodes are a no-op returning
    /// `None`. Surviving widgets keep their offsets; there is no re-flow.
    pub fn remove_widget(&mut self, scene: &mut Scene, node: NodeId) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|w| w.node() == node)?;
        let widget = self.widgets.remove(index);
        if let Err(err) = scene.set_parent(node, None) {
            tracing::warn!(%err, tag = %self.tag, "could not detach removed widget");
        }
        Some(widget)
    }

    /// Widget at `index`, in insertion order.
    pub fn get_widget(&self, index: usize) -> Result<&dyn Widget, UiError> {
        self.widgets
            .get(index)
            .map(|w| w.as_ref())
            .ok_or(UiError::IndexOutOfRange {
                index,
                len: self.widgets.len(),
            })
    }

    /// Mutable widget at `index`, in insertion order.
    pub fn get_widget_mut(&mut self, index: usize) -> Result<&mut (dyn Widget + 'static), UiError> {
        let len = self.widgets.len();
        self.widgets
            .get_mut(index)
            .map(|w| w.as_mut())
            .ok_or(UiError::IndexOutOfRange { index, len })
    }

    /// Index of the currently hovered widget, if any.
    pub fn hovered_index(&self) -> Option<usize> {
        self.widgets.iter().position(|w| w.is_hovered())
    }

    /// Per-frame update: face the camera, follow its yaw, and run the
    /// exclusive gaze scan.
    ///
    /// Must be called once per logical frame, before the eye draw passes;
    /// running it per eye would double-count hover transitions.
    pub fn on_frame_update(&mut self, scene: &mut Scene, camera: &Camera) {
        if self.recycled {
            return;
        }
        if !scene.is_visible(self.node) {
            // Hidden groups drop out of gaze interaction entirely.
            for widget in &mut self.widgets {
                widget.set_hovered(scene, false);
            }
            return;
        }
        let camera_yaw = camera.yaw();
        if let Some(node) = scene.node_mut(self.node) {
            node.transform.yaw = PI + camera_yaw;
            if self.following {
                // Horizontal circle of radius `distance` around the viewer,
                // keeping the menu directly ahead at constant depth.
                node.transform.translation.x = self.distance * camera_yaw.sin();
                node.transform.translation.z = -self.distance * camera_yaw.cos();
            }
        }

        let mut consumed = false;
        for widget in &mut self.widgets {
            if !widget.is_interactive() {
                continue;
            }
            if consumed {
                // Short-circuit: earlier-inserted widgets win overlaps, the
                // rest are forced un-hovered without testing.
                widget.set_hovered(scene, false);
            } else {
                let target = scene.world_position(widget.node());
                let hit = gaze::is_looking_at(camera, target, widget.gaze_tolerance_deg());
                widget.set_hovered(scene, hit);
                consumed = hit;
            }
        }
    }

    /// Dispatch a discrete trigger event to the first widget that consumes
    /// it. Returns false when no widget is hovered.
    pub fn on_trigger(&mut self) -> bool {
        if self.recycled || !self.visible {
            return false;
        }
        for widget in &mut self.widgets {
            if widget.on_trigger() {
                return true;
            }
        }
        false
    }

    /// Show or hide the whole group. A hidden group takes no part in the
    /// gaze scan and never consumes trigger events.
    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        self.visible = visible;
        if let Some(node) = scene.node_mut(self.node) {
            node.visible = visible;
        }
    }

    /// Recycle every owned widget, clear the group, and detach the anchor.
    /// Safe to call twice; the second call is a no-op.
    pub fn recycle(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend) {
        if self.recycled {
            return;
        }
        self.recycled = true;
        self.set_visible(scene, false);
        for mut widget in self.widgets.drain(..) {
            widget.recycle(scene, backend);
        }
        scene.remove_node(self.node);
    }

    /// Whether [`Self::recycle`] has run.
    pub fn is_recycled(&self) -> bool {
        self.recycled
    }

    fn next_widget_y(&self) -> f32 {
        self.widgets
            .iter()
            .map(|w| w.height() + self.spacing)
            .sum()
    }
}
