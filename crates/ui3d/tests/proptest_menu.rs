//! Property-based tests for menu layout and gaze interaction
//!
//! Validates the group invariants:
//! - The N-th widget's vertical offset is the cumulative height-plus-spacing
//!   of every earlier widget
//! - At most one widget is hovered after any frame update
//! - A trigger with no hovered widget is never consumed

use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use vista360_camera::Camera;
use vista360_scene::{HeadlessBackend, Scene};
use vista360_ui3d::{Button, Menu, Widget};

proptest! {
    /// Property: stacking offsets are the running sum of (height + spacing).
    #[test]
    fn layout_offsets_are_cumulative(
        heights in prop::collection::vec(0.5f32..5.0, 1..6),
        spacing in 0.1f32..1.0,
    ) {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut menu = Menu::with_layout(&mut scene, 20.0, spacing);

        let mut nodes = Vec::new();
        for (i, height) in heights.iter().enumerate() {
            let button = Button::new(&mut scene, &mut backend, format!("b{i}"), 8.0, *height);
            nodes.push(button.node());
            menu.add_widget(&mut scene, &mut backend, Box::new(button));
        }

        let mut expected = 0.0f32;
        for (node, height) in nodes.iter().zip(heights.iter()) {
            let y = scene.node(*node).unwrap().transform.translation.y;
            prop_assert!(
                (y + expected).abs() < 1e-3,
                "offset {} expected {}",
                y,
                -expected
            );
            expected += height + spacing;
        }
    }

    /// Property: the gaze scan never leaves more than one widget hovered,
    /// whatever the camera pose or per-widget tolerance.
    #[test]
    fn at_most_one_widget_hovered(
        yaw in -std::f32::consts::PI..std::f32::consts::PI,
        pitch in -1.2f32..1.2,
        tolerances in prop::collection::vec(0.5f32..90.0, 1..5),
    ) {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut menu = Menu::new(&mut scene);

        for (i, tolerance) in tolerances.iter().enumerate() {
            let button = Button::new(&mut scene, &mut backend, format!("b{i}"), 8.0, 2.0)
                .with_gaze_tolerance(*tolerance);
            menu.add_widget(&mut scene, &mut backend, Box::new(button));
        }

        let mut camera = Camera::default();
        camera.set_yaw_pitch(yaw, pitch);
        menu.on_frame_update(&mut scene, &camera);

        let hovered = (0..menu.len())
            .filter(|i| menu.get_widget(*i).unwrap().is_hovered())
            .count();
        prop_assert!(hovered <= 1, "{hovered} widgets hovered");
    }

    /// Property: an unconsumed trigger runs no action.
    #[test]
    fn trigger_without_hover_is_inert(
        yaw in 2.0f32..3.0,
    ) {
        let mut scene = Scene::new();
        let mut backend = HeadlessBackend::new();
        let mut menu = Menu::new(&mut scene);

        let count = Rc::new(Cell::new(0u32));
        let hits = Rc::clone(&count);
        // Tiny tolerance plus a camera yawed far off the menu: never hovered.
        let button = Button::new(&mut scene, &mut backend, "b", 8.0, 2.0)
            .with_gaze_tolerance(0.01)
            .with_action(move || hits.set(hits.get() + 1));
        menu.add_widget(&mut scene, &mut backend, Box::new(button));
        menu.set_following(false);

        let mut camera = Camera::default();
        camera.set_yaw_pitch(yaw, 0.0);
        menu.on_frame_update(&mut scene, &camera);

        prop_assert!(menu.hovered_index().is_none());
        prop_assert!(!menu.on_trigger());
        prop_assert_eq!(count.get(), 0);
    }
}
