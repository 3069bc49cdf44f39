//! Viewer state: 360° backgrounds, status label, and the gaze menu.

use crate::config::ViewerConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::info;
use vista360_camera::Camera;
use vista360_scene::{Node, NodeId, RenderBackend, Scene};
use vista360_ui3d::{Button, LongText, Menu, Widget};

const BUTTON_WIDTH: f32 = 8.0;
const BUTTON_HEIGHT: f32 = 2.0;
const STATUS_WIDTH: f32 = 10.0;
const STATUS_HEIGHT: f32 = 5.0;
const STATUS_DISTANCE: f32 = 20.0;

/// Projection used for the 360° background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Photo mapped onto an inward-facing sphere.
    Equirectangular,
    /// Photo mapped onto a cubic skybox.
    Cubic,
}

impl ProjectionMode {
    /// Human-readable label shown on the status panel.
    pub fn label(self) -> &'static str {
        match self {
            ProjectionMode::Equirectangular => "Equirectangular",
            ProjectionMode::Cubic => "Cubic",
        }
    }
}

/// State changes requested by widget actions, applied on the next frame
/// update. Widget callbacks never mutate viewer state directly; everything
/// serializes onto the frame-update step through this queue.
enum Command {
    SetMode(ProjectionMode),
}

/// The viewer: scene content, shared camera, and the gaze menu.
///
/// The background is a sphere node (equirectangular) drawn in front of an
/// always-present skybox node (cubic); switching modes toggles the sphere
/// and updates the status panel.
pub struct Viewer<B: RenderBackend> {
    backend: B,
    scene: Scene,
    camera: Camera,
    menu: Menu,
    status: LongText,
    sphere: NodeId,
    skybox: NodeId,
    mode: ProjectionMode,
    commands: Receiver<Command>,
}

impl<B: RenderBackend> Viewer<B> {
    /// Build the viewer scene: backgrounds, status panel, and the mode menu.
    pub fn new(mut backend: B, config: &ViewerConfig) -> Self {
        let mut scene = Scene::new();
        let mut camera = Camera::default();
        camera.set_perspective(
            config.fov_degrees,
            1.0,
            vista360_camera::DEFAULT_NEAR,
            vista360_camera::DEFAULT_FAR,
        );

        let skybox = scene.add_node(Node::new("skybox"));
        let sphere = scene.add_node(
            Node::new("sphere").with_visible(config.start_mode == ProjectionMode::Equirectangular),
        );

        let mut status = LongText::new(
            &mut scene,
            &mut backend,
            config.start_mode.label(),
            STATUS_WIDTH,
            STATUS_HEIGHT,
        );
        status.set_position(&mut scene, Vec3::new(0.0, 0.0, -STATUS_DISTANCE));
        if let Some(node) = scene.node_mut(status.node()) {
            node.transform.yaw = PI;
        }

        let (tx, commands) = channel();
        let mut menu = Menu::with_layout(&mut scene, config.menu_distance, config.menu_spacing);
        for mode in [ProjectionMode::Cubic, ProjectionMode::Equirectangular] {
            let button = Self::mode_button(&mut scene, &mut backend, config, mode, &tx);
            menu.add_widget(&mut scene, &mut backend, Box::new(button));
        }

        Self {
            backend,
            scene,
            camera,
            menu,
            status,
            sphere,
            skybox,
            mode: config.start_mode,
            commands,
        }
    }

    fn mode_button(
        scene: &mut Scene,
        backend: &mut B,
        config: &ViewerConfig,
        mode: ProjectionMode,
        tx: &Sender<Command>,
    ) -> Button {
        let tx = tx.clone();
        Button::new(scene, backend, mode.label(), BUTTON_WIDTH, BUTTON_HEIGHT)
            .with_gaze_tolerance(config.gaze_tolerance_deg)
            .with_action(move || {
                let _ = tx.send(Command::SetMode(mode));
            })
    }

    /// Switch the active background projection and update the status panel.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        info!(mode = mode.label(), "switching projection mode");
        self.mode = mode;
        if let Some(node) = self.scene.node_mut(self.sphere) {
            node.visible = mode == ProjectionMode::Equirectangular;
        }
        self.status
            .set_text(&mut self.scene, &mut self.backend, mode.label());
    }

    /// Per-logical-frame update: drain queued commands, then let the menu
    /// face the camera and run its gaze scan. Never called per eye.
    pub fn on_frame_update(&mut self) {
        while let Ok(Command::SetMode(mode)) = self.commands.try_recv() {
            self.set_projection_mode(mode);
        }
        self.menu.on_frame_update(&mut self.scene, &self.camera);
    }

    /// Dispatch a discrete trigger event into the menu. Returns true when a
    /// hovered widget consumed it.
    pub fn on_trigger(&mut self) -> bool {
        self.menu.on_trigger()
    }

    /// Draw one eye pass with the camera's current pose.
    pub fn draw_eye(&mut self) {
        self.backend.draw_eye(&self.scene, &self.camera);
    }

    /// Active projection mode.
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Shared camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable shared camera, for the render loop to pose.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Scene contents.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The gaze menu.
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Render backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Status text panel.
    pub fn status(&self) -> &LongText {
        &self.status
    }

    /// Sphere background node (equirectangular projection).
    pub fn sphere_node(&self) -> NodeId {
        self.sphere
    }

    /// Skybox background node (cubic projection).
    pub fn skybox_node(&self) -> NodeId {
        self.skybox
    }
}
