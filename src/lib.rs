//! An interactive OBJ model viewer: load meshes, edit their transforms and
//! the camera with the mouse and keyboard, and render them flat-colored or
//! Phong-lit.
//!
//! The crate is split into a math core ([`math`]) that builds every
//! translation/rotation/scaling/view/projection matrix from scratch, scene
//! and input state ([`Scene`], [`controls`]), and a vulkano-backed renderer
//! behind [`Window`].
//!
//! # Example
//!
//! ```no_run
//! use meshview::{App, GameState, ModelHandle, Window};
//!
//! struct Viewer {
//!     // Handles keep their models alive; drop one and the model is gone.
//!     model: ModelHandle,
//! }
//!
//! impl App for Viewer {
//!     fn update(&mut self, _state: &mut GameState) {
//!         // This will make the model spin
//!         self.model.modify(|data| {
//!             data.rotation.y += meshview::math::Rad(0.05);
//!         });
//!     }
//! }
//!
//! fn main() {
//!     let window = Window::new("viewer", 800.0, 600.0, |state| {
//!         let model = state
//!             .new_obj_model("models/bunny.obj")
//!             .build()
//!             .expect("could not load model");
//!         state.set_current_model(&model);
//!         Viewer { model }
//!     })
//!     .expect("could not initialize the renderer");
//!     window.run();
//! }
//! ```

#![warn(missing_docs)]

mod camera;
pub mod controls;
mod error;
mod game_state;
pub mod math;
mod model;
mod projection;
mod render;
mod scene;

pub use self::{
    camera::Camera,
    error::{InitError, ModelError},
    game_state::{GameState, KeyboardState, MouseState},
    model::{ModelBuilder, ModelData, ModelHandle},
    projection::{Projection, ProjectionKind},
    render::{LightKind, LightSource, LightState, Material, SpotParams, Window},
    scene::{Scene, ShadingMode},
};

pub use winit::event::{MouseButton, VirtualKeyCode, WindowEvent};

/// The entry point of the viewer implementation: a set of callbacks the
/// window loop hands input and frame updates to.
///
/// Every method has a default empty implementation; implement the ones the
/// application cares about.
pub trait App {
    /// Checks if the viewer can shut down. Called when the user closes the
    /// window.
    fn can_shutdown(&mut self, _state: &mut GameState) -> bool {
        true
    }
    /// Triggered for every winit window event, before the specialized
    /// callbacks below.
    fn event(&mut self, _state: &mut GameState, _event: &WindowEvent) {}
    /// Triggered when a key is pressed.
    fn keydown(&mut self, _state: &mut GameState, _key: VirtualKeyCode) {}
    /// Triggered when a key is released.
    fn keyup(&mut self, _state: &mut GameState, _key: VirtualKeyCode) {}
    /// Triggered when the cursor moves; `delta` is the motion since the last
    /// event, in physical pixels.
    fn mouse_moved(&mut self, _state: &mut GameState, _delta: (f32, f32)) {}
    /// Triggered when a mouse button is pressed or released. The state in
    /// [`GameState::mouse`] is updated before this runs.
    fn mouse_input(&mut self, _state: &mut GameState, _button: MouseButton, _pressed: bool) {}
    /// Triggered on scroll-wheel input, one scalar step per event
    /// (positive = up).
    fn scroll(&mut self, _state: &mut GameState, _delta: f32) {}
    /// Update the application, once per frame before rendering.
    fn update(&mut self, _state: &mut GameState) {}
}
