#![warn(missing_docs)]
//! Scene-graph abstraction over the external stereoscopic renderer.
//!
//! The real rendering engine (meshes, shaders, texture upload) lives outside
//! this workspace. Widgets and backgrounds only need a small surface from it:
//! attach/detach nodes, parent links, yaw-about-vertical transforms,
//! visibility, and texture handles. [`Scene`] holds that state; the
//! [`RenderBackend`] trait is the seam the engine plugs into.
//!
//! Concurrency discipline: the scene is mutated only during the frame-update
//! step and read-only during the per-eye draw passes.

pub mod backend;

pub use backend::{HeadlessBackend, RenderBackend, SceneError};

use glam::Vec3;
use std::collections::HashMap;

/// Handle to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Handle to a texture owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Local transform: translation plus rotation about the vertical axis.
///
/// UI elements only ever rotate about Y (billboard-style facing), so the
/// rotation is a single yaw angle in radians rather than a full quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent node (or the world origin).
    pub translation: Vec3,
    /// Rotation about the vertical axis in radians.
    pub yaw: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

/// Rotate a vector about the vertical axis.
///
/// Uses the camera yaw convention: a point at `(0, 0, -d)` rotated by yaw `y`
/// lands at `(d·sin y, 0, -d·cos y)`.
pub fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos)
}

/// Quad geometry attached to a node, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSize {
    /// Width along the node's local X axis.
    pub width: f32,
    /// Height along the vertical axis.
    pub height: f32,
    /// Depth along the node's local Z axis.
    pub depth: f32,
}

/// A scene node: transform, visibility, optional quad geometry and texture.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name, used in logs only.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Node's own visibility flag. Effective visibility also requires every
    /// ancestor to be visible.
    pub visible: bool,
    /// Parent node, if attached below another node.
    pub parent: Option<NodeId>,
    /// Quad geometry, for nodes that render as textured quads.
    pub quad: Option<QuadSize>,
    /// RGBA tint multiplied into the node's material.
    pub tint: [f32; 4],
    /// Texture drawn on the quad.
    pub texture: Option<TextureId>,
}

impl Node {
    /// Create an empty, visible node at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            parent: None,
            quad: None,
            tint: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }

    /// Builder: attach quad geometry.
    pub fn with_quad(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.quad = Some(QuadSize {
            width,
            height,
            depth,
        });
        self
    }

    /// Builder: set the local translation.
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    /// Builder: set the local yaw in radians.
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.transform.yaw = yaw;
        self
    }

    /// Builder: set the tint color.
    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }

    /// Builder: set the initial visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// All nodes currently attached to the renderer, keyed by handle.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Attach a node and return its handle.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Detach a node, returning it. Children of the removed node are
    /// re-rooted so stale parent links never dangle.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        for child in self.nodes.values_mut() {
            if child.parent == Some(id) {
                child.parent = None;
            }
        }
        Some(node)
    }

    /// Access a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutably access a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Re-parent a node. Passing `None` re-roots it.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(&parent_id) {
                return Err(SceneError::NodeNotFound(parent_id));
            }
        }
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.parent = parent;
                Ok(())
            }
            None => Err(SceneError::NodeNotFound(id)),
        }
    }

    /// World-space position of a node, composing parent transforms.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut position = Vec3::ZERO;
        let mut current = Some(id);
        let mut first = true;
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                break;
            };
            if first {
                position = node.transform.translation;
                first = false;
            } else {
                position = node.transform.translation + rotate_y(position, node.transform.yaw);
            }
            current = node.parent;
        }
        position
    }

    /// World-space yaw of a node, summing parent yaws.
    pub fn world_yaw(&self, id: NodeId) -> f32 {
        let mut yaw = 0.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                break;
            };
            yaw += node.transform.yaw;
            current = node.parent;
        }
        yaw
    }

    /// Effective visibility: the node and all of its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(&node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Number of attached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_nodes() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"));
        let b = scene.add_node(Node::new("b"));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        assert!(scene.remove_node(a).is_some());
        assert!(scene.remove_node(a).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn removing_parent_reroots_children() {
        let mut scene = Scene::new();
        let parent = scene.add_node(Node::new("parent"));
        let child = scene.add_node(Node::new("child"));
        scene.set_parent(child, Some(parent)).unwrap();

        scene.remove_node(parent);
        assert_eq!(scene.node(child).unwrap().parent, None);
    }

    #[test]
    fn world_position_composes_parent_yaw() {
        let mut scene = Scene::new();
        let parent = scene.add_node(
            Node::new("parent")
                .with_translation(Vec3::new(0.0, 2.0, 0.0))
                .with_yaw(std::f32::consts::FRAC_PI_2),
        );
        let child = scene.add_node(Node::new("child").with_translation(Vec3::new(0.0, 0.0, -5.0)));
        scene.set_parent(child, Some(parent)).unwrap();

        // Child sits 5 units ahead of the parent; parent yawed 90deg right.
        let world = scene.world_position(child);
        assert!((world.x - 5.0).abs() < 1e-4);
        assert!((world.y - 2.0).abs() < 1e-4);
        assert!(world.z.abs() < 1e-4);
    }

    #[test]
    fn world_yaw_sums_ancestors() {
        let mut scene = Scene::new();
        let parent = scene.add_node(Node::new("parent").with_yaw(0.5));
        let child = scene.add_node(Node::new("child").with_yaw(0.25));
        scene.set_parent(child, Some(parent)).unwrap();
        assert!((scene.world_yaw(child) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn visibility_requires_visible_ancestors() {
        let mut scene = Scene::new();
        let parent = scene.add_node(Node::new("parent"));
        let child = scene.add_node(Node::new("child"));
        scene.set_parent(child, Some(parent)).unwrap();
        assert!(scene.is_visible(child));

        scene.node_mut(parent).unwrap().visible = false;
        assert!(!scene.is_visible(child));
        assert!(scene.node(child).unwrap().visible);
    }

    #[test]
    fn set_parent_rejects_unknown_nodes() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"));
        assert!(scene.set_parent(a, Some(NodeId(999))).is_err());
        assert!(scene.set_parent(NodeId(999), None).is_err());
    }
}
