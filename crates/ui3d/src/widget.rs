//! Base capability trait for spatial widgets.

use glam::Vec3;
use vista360_scene::{NodeId, RenderBackend, Scene};

/// Default angular gaze tolerance in degrees. Wider tolerances make larger,
/// more forgiving hit-targets.
pub const DEFAULT_GAZE_TOLERANCE_DEG: f32 = 3.0;

/// A positionable, sizeable, visible scene element with a disposal
/// lifecycle.
///
/// Widgets own a scene node by handle and expose position, visibility, and
/// hover/trigger behavior through this trait rather than inheriting any
/// renderer type. [`Button`](crate::Button) is interactive;
/// [`LongText`](crate::LongText) shares the lifecycle but never hovers.
pub trait Widget {
    /// Handle of the widget's scene node.
    fn node(&self) -> NodeId;

    /// Logical width in world units.
    fn width(&self) -> f32;

    /// Logical height in world units, used by group layout.
    fn height(&self) -> f32;

    /// Move the widget's local position.
    fn set_position(&mut self, scene: &mut Scene, position: Vec3);

    /// Show or hide the widget.
    fn set_visible(&mut self, scene: &mut Scene, visible: bool);

    /// Effective visibility of the widget's node, ancestors included.
    fn is_visible(&self, scene: &Scene) -> bool {
        scene.is_visible(self.node())
    }

    /// Shift the widget's local vertical offset by `offset`.
    fn move_up(&mut self, scene: &mut Scene, offset: f32);

    /// Whether the widget takes part in the gaze scan.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Angular tolerance for this widget's gaze test, in degrees.
    fn gaze_tolerance_deg(&self) -> f32 {
        DEFAULT_GAZE_TOLERANCE_DEG
    }

    /// Whether the widget is currently targeted by gaze.
    fn is_hovered(&self) -> bool {
        false
    }

    /// Set hover feedback. Non-interactive widgets ignore this.
    fn set_hovered(&mut self, scene: &mut Scene, hovered: bool) {
        let _ = (scene, hovered);
    }

    /// Dispatch a discrete trigger event. Returns true when the widget
    /// consumed it (ran its action); false widgets pass the event on.
    fn on_trigger(&mut self) -> bool {
        false
    }

    /// Release the widget's resources and detach it from the scene.
    /// Calling this twice is a no-op.
    fn recycle(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend);

    /// Whether [`Self::recycle`] has run.
    fn is_recycled(&self) -> bool;
}
