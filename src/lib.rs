//! vista360: a stereoscopic 360° viewer with gaze-driven 3D menus.
//!
//! The heavy lifting lives in the workspace crates: `vista360-camera`
//! (pose and projection), `vista360-scene` (renderer abstraction), and
//! `vista360-ui3d` (widgets, menus, gaze). This crate wires them into a
//! viewer: projection-mode switching, the stereo render loop adapter, and
//! configuration.

pub mod config;
pub mod stereo;
pub mod viewer;
