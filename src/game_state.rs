use crate::{
    model::{ModelBuilder, ModelHandle, ModelHandleMessage, ModelRef},
    scene::Scene,
};
use std::{
    collections::{HashMap, HashSet},
    sync::{mpsc::Sender, Arc},
};
use vulkano::device::Device;
use winit::event::VirtualKeyCode;

/// The state shared between the application and the engine: the scene, the
/// loaded models and the current input device state.
///
/// A reference is passed to every [`App`](crate::App) callback.
pub struct GameState {
    pub(crate) device: Arc<Device>,
    pub(crate) model_handles: HashMap<u64, ModelRef>,
    pub(crate) message_sender: Sender<ModelHandleMessage>,
    pub(crate) is_running: bool,
    /// Everything the renderer draws from: camera, projection, lights,
    /// shading flags and the current-model selection.
    pub scene: Scene,
    /// Which keys are held down this frame.
    pub keyboard: KeyboardState,
    /// Cursor position and button state.
    pub mouse: MouseState,
}

impl GameState {
    pub(crate) fn new(
        device: Arc<Device>,
        sender: Sender<ModelHandleMessage>,
        aspect: f32,
    ) -> Self {
        Self {
            device,
            model_handles: HashMap::new(),
            message_sender: sender,
            is_running: true,
            scene: Scene::new(aspect),
            keyboard: KeyboardState {
                pressed: HashSet::default(),
            },
            mouse: MouseState::default(),
        }
    }

    /// Load a model from the given OBJ path and place it at the origin of
    /// the world.
    ///
    /// Note: you *must* store the returned handle somewhere. When the handle
    /// is dropped, the model is removed from the world.
    pub fn new_obj_model<'a>(&'a mut self, path: &'a str) -> ModelBuilder<'a> {
        ModelBuilder::new(self, path)
    }

    /// Make `handle`'s model the one input edits and the renderer draws.
    pub fn set_current_model(&mut self, handle: &ModelHandle) {
        self.scene.set_current_model(Some(handle.id()));
    }

    /// Exit the viewer after the current frame. Once called, this cannot be
    /// cancelled and does not consult [`App::can_shutdown`](crate::App::can_shutdown).
    pub fn terminate(&mut self) {
        self.is_running = false;
    }

    pub(crate) fn insert_model(&mut self, id: u64, model_ref: ModelRef) {
        self.model_handles.insert(id, model_ref);
    }

    pub(crate) fn remove_model(&mut self, id: u64) {
        self.model_handles.remove(&id);
        if self.scene.current_model() == Some(id) {
            self.scene.set_current_model(None);
        }
    }
}

/// The state of the keyboard, usable to check which keys are held during the
/// current frame.
///
/// Note: when handling [`App::keydown`](crate::App::keydown) or
/// [`App::keyup`](crate::App::keyup), this state is updated *before* the
/// callback runs.
pub struct KeyboardState {
    pub(crate) pressed: HashSet<VirtualKeyCode>,
}

impl KeyboardState {
    /// Check if the given key is pressed.
    pub fn is_pressed(&self, key: VirtualKeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// The state of the mouse. Drag handling is stateful: the pressed flag gates
/// whether motion deltas apply, and the last cursor position is what turns
/// absolute positions into per-event deltas.
#[derive(Default)]
pub struct MouseState {
    /// The last seen cursor position, in physical pixels.
    pub position: (f32, f32),
    /// Whether the left button is held.
    pub left_pressed: bool,
    /// Whether the middle button is held.
    pub middle_pressed: bool,
    /// Whether the right button is held.
    pub right_pressed: bool,
}
