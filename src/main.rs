//! The viewer application: loads the requested OBJ models and wires the
//! key/mouse/scroll bindings to the scene.

use clap::Parser;
use meshview::{
    controls::{self, Action, EditMode},
    App, GameState, ModelHandle, VirtualKeyCode, Window,
};

#[derive(Parser, Debug)]
#[command(name = "meshview", about = "An interactive OBJ model viewer")]
struct Args {
    /// OBJ files to load; cycle through them with Z and X
    #[arg(default_values_t = [
        "models/bunny.obj".to_string(),
        "models/dragon.obj".to_string(),
        "models/lucy.obj".to_string(),
        "models/teapot.obj".to_string(),
        "models/dolphin.obj".to_string(),
    ])]
    models: Vec<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,
}

struct Viewer {
    models: Vec<ModelHandle>,
    current: usize,
    mode: EditMode,
}

impl Viewer {
    fn init(state: &mut GameState, paths: &[String]) -> Self {
        let mut models = Vec::with_capacity(paths.len());
        for path in paths {
            match state.new_obj_model(path).build() {
                Ok(handle) => {
                    log::info!("loaded {}", path);
                    models.push(handle);
                }
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        let viewer = Self {
            models,
            current: 0,
            mode: EditMode::default(),
        };
        if let Some(first) = viewer.models.first() {
            state.set_current_model(first);
        }
        viewer
    }

    fn select(&mut self, state: &mut GameState, index: usize) {
        self.current = index;
        state.set_current_model(&self.models[self.current]);
    }
}

impl App for Viewer {
    fn keydown(&mut self, state: &mut GameState, key: VirtualKeyCode) {
        let action = match Action::for_key(key) {
            Some(action) => action,
            None => return,
        };
        match action {
            Action::SetMode(mode) => self.mode = mode,
            Action::PreviousModel => {
                if !self.models.is_empty() {
                    let index = if self.current == 0 {
                        self.models.len() - 1
                    } else {
                        self.current - 1
                    };
                    self.select(state, index);
                }
            }
            Action::NextModel => {
                if !self.models.is_empty() {
                    let index = if self.current == self.models.len() - 1 {
                        0
                    } else {
                        self.current + 1
                    };
                    self.select(state, index);
                }
            }
            Action::Orthographic => state.scene.set_orthographic(),
            Action::Perspective => state.scene.set_perspective(),
            Action::CycleLight => state.scene.lights.cycle(),
            Action::ToggleWireframe => state.scene.wireframe = !state.scene.wireframe,
            Action::ToggleShading => state.scene.shading = state.scene.shading.toggled(),
            Action::DumpMatrices => {
                if let Some(model) = self.models.get(self.current) {
                    let report = model.read(|data| state.scene.matrix_report(data));
                    println!("{}", report);
                }
            }
        }
    }

    fn mouse_moved(&mut self, state: &mut GameState, delta: (f32, f32)) {
        if !state.mouse.left_pressed {
            return;
        }
        if let Some(model) = self.models.get(self.current) {
            model.modify(|data| controls::apply_drag(self.mode, delta, data, &mut state.scene));
        }
    }

    fn scroll(&mut self, state: &mut GameState, delta: f32) {
        if let Some(model) = self.models.get(self.current) {
            model.modify(|data| controls::apply_scroll(self.mode, delta, data, &mut state.scene));
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let window = match Window::new("meshview", args.width, args.height, |state| {
        Viewer::init(state, &args.models)
    }) {
        Ok(window) => window,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    window.run();
}
