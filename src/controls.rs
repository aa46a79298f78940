//! Maps raw input (keys, mouse-drag deltas, scroll steps) onto mutations of
//! the scene and the current model.

use crate::{
    math::{Deg, Rad, Vector3},
    model::ModelData,
    render::LightKind,
    scene::Scene,
};
use winit::event::VirtualKeyCode;

/// What a drag or scroll currently edits. Exactly one mode is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditMode {
    /// Move the current model in the world.
    TranslateModel,
    /// Spin the current model around its axes.
    RotateModel,
    /// Stretch the current model along its axes.
    ScaleModel,
    /// Move the camera eye.
    ViewEye,
    /// Move the look-at target.
    ViewCenter,
    /// Tilt the camera's up hint.
    ViewUp,
    /// Move the active light / adjust its intensity or cone.
    Light,
    /// Adjust the global specular shininess.
    Shininess,
}

impl Default for EditMode {
    fn default() -> Self {
        EditMode::TranslateModel
    }
}

/// A discrete keyboard command. The key set is fixed and known at compile
/// time, so dispatch is a plain enum and a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Switch the edit mode.
    SetMode(EditMode),
    /// Select the previous model, wrapping.
    PreviousModel,
    /// Select the next model, wrapping.
    NextModel,
    /// Switch to the orthographic projection.
    Orthographic,
    /// Switch to the perspective projection.
    Perspective,
    /// Advance to the next light kind.
    CycleLight,
    /// Toggle wireframe rendering (flat mode).
    ToggleWireframe,
    /// Toggle flat vs Phong shading.
    ToggleShading,
    /// Print the current matrices to stdout.
    DumpMatrices,
}

impl Action {
    /// The action bound to `key`, if any.
    pub fn for_key(key: VirtualKeyCode) -> Option<Action> {
        use VirtualKeyCode::*;
        match key {
            T => Some(Action::SetMode(EditMode::TranslateModel)),
            R => Some(Action::SetMode(EditMode::RotateModel)),
            S => Some(Action::SetMode(EditMode::ScaleModel)),
            E => Some(Action::SetMode(EditMode::ViewEye)),
            C => Some(Action::SetMode(EditMode::ViewCenter)),
            U => Some(Action::SetMode(EditMode::ViewUp)),
            K => Some(Action::SetMode(EditMode::Light)),
            J => Some(Action::SetMode(EditMode::Shininess)),
            Z => Some(Action::PreviousModel),
            X => Some(Action::NextModel),
            O => Some(Action::Orthographic),
            P => Some(Action::Perspective),
            L => Some(Action::CycleLight),
            W => Some(Action::ToggleWireframe),
            F => Some(Action::ToggleShading),
            I => Some(Action::DumpMatrices),
            _ => None,
        }
    }
}

/// Apply a left-drag delta `(dx, dy)` in window pixels.
///
/// Only the current model, the camera or the active light move; camera edits
/// rebuild the view matrix before returning.
pub fn apply_drag(mode: EditMode, delta: (f32, f32), model: &mut ModelData, scene: &mut Scene) {
    let (dx, dy) = delta;
    match mode {
        EditMode::TranslateModel => {
            model.position.x += dx / 100.0;
            model.position.y -= dy / 100.0;
        }
        EditMode::ScaleModel => {
            model.scale.x -= dx / 100.0;
            model.scale.y -= dy / 100.0;
        }
        EditMode::RotateModel => {
            model.rotation.x -= Rad::from(Deg(dy));
            model.rotation.y -= Rad::from(Deg(dx));
        }
        EditMode::ViewEye => {
            scene.camera.position.x -= dx / 100.0;
            scene.camera.position.y += dy / 100.0;
            scene.rebuild_view();
        }
        EditMode::ViewCenter => {
            scene.camera.center.x -= dx / 100.0;
            scene.camera.center.y -= dy / 100.0;
            scene.rebuild_view();
        }
        EditMode::ViewUp => {
            scene.camera.up.x -= dx / 30.0;
            scene.camera.up.y += dy / 30.0;
            scene.rebuild_view();
        }
        EditMode::Light => {
            let source = scene.lights.active_source_mut();
            source.position.x += dx / 100.0;
            source.position.y -= dy / 100.0;
        }
        EditMode::Shininess => {}
    }
}

/// Apply a scroll-wheel step (positive = scroll up).
///
/// The delta lands on the mode's designated scalar: usually a Z-axis nudge,
/// for lights an intensity or cone edit, for shininess the exponent.
pub fn apply_scroll(mode: EditMode, delta: f32, model: &mut ModelData, scene: &mut Scene) {
    match mode {
        EditMode::TranslateModel => model.position.z += delta / 10.0,
        EditMode::ScaleModel => model.scale.z += delta / 10.0,
        EditMode::RotateModel => model.rotation.z += Rad::from(Deg(delta)),
        EditMode::ViewEye => {
            scene.camera.position.z -= delta / 10.0;
            scene.rebuild_view();
        }
        EditMode::ViewCenter => {
            scene.camera.center.z += delta / 10.0;
            scene.rebuild_view();
        }
        EditMode::ViewUp => {
            scene.camera.up.z += delta / 10.0;
            scene.rebuild_view();
        }
        EditMode::Light => match scene.lights.active {
            LightKind::Directional | LightKind::Point => {
                scene.lights.active_source_mut().diffuse = Vector3::new(0.1, 0.1, 0.1) * delta;
            }
            LightKind::Spot => {
                let cutoff = scene.lights.spot.cutoff - delta;
                scene.lights.spot.cutoff = cutoff.max(0.0).min(90.0);
            }
        },
        EditMode::Shininess => scene.lights.shininess += delta * 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn fixtures() -> (ModelData, Scene) {
        (ModelData::default(), Scene::new(1.0))
    }

    #[test]
    fn initial_mode_is_translate() {
        assert_eq!(EditMode::default(), EditMode::TranslateModel);
    }

    #[test]
    fn key_bindings() {
        use VirtualKeyCode::*;
        assert_eq!(
            Action::for_key(T),
            Some(Action::SetMode(EditMode::TranslateModel))
        );
        assert_eq!(
            Action::for_key(R),
            Some(Action::SetMode(EditMode::RotateModel))
        );
        assert_eq!(
            Action::for_key(S),
            Some(Action::SetMode(EditMode::ScaleModel))
        );
        assert_eq!(Action::for_key(E), Some(Action::SetMode(EditMode::ViewEye)));
        assert_eq!(
            Action::for_key(C),
            Some(Action::SetMode(EditMode::ViewCenter))
        );
        assert_eq!(Action::for_key(U), Some(Action::SetMode(EditMode::ViewUp)));
        assert_eq!(Action::for_key(K), Some(Action::SetMode(EditMode::Light)));
        assert_eq!(
            Action::for_key(J),
            Some(Action::SetMode(EditMode::Shininess))
        );
        assert_eq!(Action::for_key(Z), Some(Action::PreviousModel));
        assert_eq!(Action::for_key(X), Some(Action::NextModel));
        assert_eq!(Action::for_key(O), Some(Action::Orthographic));
        assert_eq!(Action::for_key(P), Some(Action::Perspective));
        assert_eq!(Action::for_key(L), Some(Action::CycleLight));
        assert_eq!(Action::for_key(W), Some(Action::ToggleWireframe));
        assert_eq!(Action::for_key(F), Some(Action::ToggleShading));
        assert_eq!(Action::for_key(I), Some(Action::DumpMatrices));
        assert_eq!(Action::for_key(Q), None);
    }

    #[test]
    fn scroll_rotate_adds_exactly_one_z_step() {
        let (mut model, mut scene) = fixtures();
        apply_scroll(EditMode::RotateModel, 5.0, &mut model, &mut scene);
        let expected: Rad = Deg(5.0).into();
        assert!((model.rotation.z.0 - expected.0).abs() < 1e-7);
        // nothing else moved
        assert_eq!(model.rotation.x, Rad(0.0));
        assert_eq!(model.rotation.y, Rad(0.0));
        assert_eq!(model.position, Vector3::zero());
    }

    #[test]
    fn scroll_translate_and_scale_nudge_z() {
        let (mut model, mut scene) = fixtures();
        apply_scroll(EditMode::TranslateModel, 3.0, &mut model, &mut scene);
        assert!((model.position.z - 0.3).abs() < 1e-7);
        apply_scroll(EditMode::ScaleModel, -2.0, &mut model, &mut scene);
        assert!((model.scale.z - 0.8).abs() < 1e-7);
    }

    #[test]
    fn scroll_view_modes_rebuild_the_view() {
        let (mut model, mut scene) = fixtures();
        let before = scene.view_matrix();
        apply_scroll(EditMode::ViewEye, 5.0, &mut model, &mut scene);
        assert!((scene.camera.position.z - 1.5).abs() < 1e-7);
        assert!(!approx_eq(&before, &scene.view_matrix(), 1e-7));
    }

    #[test]
    fn drag_translate_moves_xy() {
        let (mut model, mut scene) = fixtures();
        apply_drag(EditMode::TranslateModel, (50.0, -20.0), &mut model, &mut scene);
        assert!((model.position.x - 0.5).abs() < 1e-7);
        assert!((model.position.y - 0.2).abs() < 1e-7);
        assert_eq!(model.position.z, 0.0);
    }

    #[test]
    fn drag_rotate_uses_degrees_swapped_axes() {
        let (mut model, mut scene) = fixtures();
        apply_drag(EditMode::RotateModel, (10.0, 4.0), &mut model, &mut scene);
        let step_x: Rad = Deg(4.0).into();
        let step_y: Rad = Deg(10.0).into();
        assert!((model.rotation.x.0 + step_x.0).abs() < 1e-7);
        assert!((model.rotation.y.0 + step_y.0).abs() < 1e-7);
    }

    #[test]
    fn drag_up_mode_is_coarser_and_rebuilds() {
        let (mut model, mut scene) = fixtures();
        let before = scene.view_matrix();
        apply_drag(EditMode::ViewUp, (3.0, -6.0), &mut model, &mut scene);
        assert!((scene.camera.up.x + 0.1).abs() < 1e-7);
        assert!((scene.camera.up.y - 0.8).abs() < 1e-6);
        assert!(!approx_eq(&before, &scene.view_matrix(), 1e-7));
    }

    #[test]
    fn drag_light_moves_active_source_only() {
        let (mut model, mut scene) = fixtures();
        scene.lights.cycle(); // point light
        apply_drag(EditMode::Light, (100.0, -100.0), &mut model, &mut scene);
        assert!((scene.lights.active_source().position.x - 1.0).abs() < 1e-6);
        assert!((scene.lights.active_source().position.y - 3.0).abs() < 1e-6);
        scene.lights.active = LightKind::Directional;
        assert_eq!(
            scene.lights.active_source().position,
            Vector3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn scroll_light_sets_diffuse_from_delta() {
        let (mut model, mut scene) = fixtures();
        apply_scroll(EditMode::Light, 4.0, &mut model, &mut scene);
        let diffuse = scene.lights.active_source().diffuse;
        assert!((diffuse.x - 0.4).abs() < 1e-6);
        // assignment, not accumulation
        apply_scroll(EditMode::Light, 2.0, &mut model, &mut scene);
        assert!((scene.lights.active_source().diffuse.x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn scroll_spot_clamps_cutoff() {
        let (mut model, mut scene) = fixtures();
        scene.lights.active = LightKind::Spot;
        apply_scroll(EditMode::Light, 100.0, &mut model, &mut scene);
        assert_eq!(scene.lights.spot.cutoff, 0.0);
        apply_scroll(EditMode::Light, -500.0, &mut model, &mut scene);
        assert_eq!(scene.lights.spot.cutoff, 90.0);
        apply_scroll(EditMode::Light, 15.0, &mut model, &mut scene);
        assert_eq!(scene.lights.spot.cutoff, 75.0);
    }

    #[test]
    fn scroll_shininess_steps_by_five() {
        let (mut model, mut scene) = fixtures();
        apply_scroll(EditMode::Shininess, 2.0, &mut model, &mut scene);
        assert_eq!(scene.lights.shininess, 74.0);
        apply_scroll(EditMode::Shininess, -1.0, &mut model, &mut scene);
        assert_eq!(scene.lights.shininess, 69.0);
    }
}
