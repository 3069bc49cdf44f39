#![warn(missing_docs)]
//! Gaze-driven 3D menu system for the stereoscopic viewer.
//!
//! Widgets are world-space scene elements that track the user's head
//! orientation every frame. A [`Menu`] stacks widgets vertically, keeps
//! itself ahead of the viewer at a fixed distance, and runs the per-frame
//! gaze scan that decides which single widget is hovered. A discrete trigger
//! event then dispatches to the hovered widget's action.
//!
//! # Frame contract
//!
//! [`Menu::on_frame_update`] must run exactly once per logical frame, before
//! the two eye draw passes. The gaze test itself is pure; all widget
//! mutation happens on the frame-update step.
//!
//! ```rust
//! use vista360_scene::{HeadlessBackend, Scene};
//! use vista360_camera::Camera;
//! use vista360_ui3d::{Button, Menu};
//!
//! let mut scene = Scene::new();
//! let mut backend = HeadlessBackend::new();
//! let mut menu = Menu::new(&mut scene);
//! let button = Button::new(&mut scene, &mut backend, "Cubic", 8.0, 2.0)
//!     .with_action(|| println!("switch to cubic"));
//! menu.add_widget(&mut scene, &mut backend, Box::new(button));
//!
//! // Once per frame, never per eye:
//! let camera = Camera::default();
//! menu.on_frame_update(&mut scene, &camera);
//! ```

pub mod button;
pub mod gaze;
pub mod long_text;
pub mod menu;
pub mod widget;

pub use button::{Button, ButtonColors};
pub use gaze::{gaze_angles, is_looking_at};
pub use long_text::LongText;
pub use menu::{Menu, UiError, DEFAULT_MENU_DISTANCE, DEFAULT_WIDGET_SPACING};
pub use widget::{Widget, DEFAULT_GAZE_TOLERANCE_DEG};
