use super::RenderPipeline;
use crate::{error::InitError, model::ModelHandleMessage, App, GameState};
use std::sync::mpsc::{channel, Receiver};
use vulkano::{
    device::{Device, DeviceExtensions, Features},
    instance::{Instance, PhysicalDevice, QueueFamily, Version},
};
use vulkano_win::VkSurfaceBuild;
use winit::{
    dpi::LogicalSize,
    event::{
        ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, WindowEvent,
    },
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

/// A handle to the window and the application state. This is the main entry
/// point of the viewer.
pub struct Window<A: App + 'static> {
    dimensions: [f32; 2],
    pipeline: Option<RenderPipeline>,
    events_loop: Option<EventLoop<()>>,
    game_state: GameState,
    message_receiver: Receiver<ModelHandleMessage>,
    app: A,
}

impl<A: App + 'static> Window<A> {
    /// Create the window and the Vulkan device behind it, then let `init`
    /// build the application (loading models, picking the current one).
    pub fn new(
        title: &str,
        width: f32,
        height: f32,
        init: impl FnOnce(&mut GameState) -> A,
    ) -> Result<Self, InitError> {
        let instance = {
            let extensions = vulkano_win::required_extensions();
            Instance::new(None, &extensions, None).map_err(InitError::CouldNotInitVulkano)?
        };

        let mut physical = None;
        let mut queue_family = None;
        for device in PhysicalDevice::enumerate(&instance) {
            let picked = if physical.is_none() {
                let family = device.queue_families().find(|q| q.supports_graphics());
                if family.is_some() {
                    physical = Some(device);
                    queue_family = family;
                }
                family.is_some()
            } else {
                false
            };
            log_physical_device_info(&device, picked, if picked { queue_family } else { None });
        }
        let physical = physical.ok_or(InitError::CouldNotFindPhysicalDevice)?;
        let queue_family = queue_family.ok_or(InitError::CouldNotFindValidGraphicsQueue)?;

        let (device, queue) = {
            let (device, mut queues) = Device::new(
                physical,
                &Features::none(),
                &DeviceExtensions {
                    khr_swapchain: true,
                    ..DeviceExtensions::none()
                },
                [(queue_family, 0.5)].iter().cloned(),
            )
            .map_err(InitError::CouldNotCreateDevice)?;
            let queue = queues
                .next()
                .ok_or(InitError::CouldNotFindValidGraphicsQueue)?;
            (device, queue)
        };

        let events_loop = EventLoop::new();
        let surface = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .build_vk_surface(&events_loop, instance.clone())
            .map_err(InitError::CouldNotCreateWindow)?;

        let pipeline =
            RenderPipeline::create(device.clone(), queue, surface, physical, [width, height])?;

        let (sender, receiver) = channel();

        let mut game_state = GameState::new(device, sender, width / height);

        let app = init(&mut game_state);

        Ok(Window {
            dimensions: [width, height],
            pipeline: Some(pipeline),
            events_loop: Some(events_loop),
            message_receiver: receiver,
            game_state,
            app,
        })
    }

    fn update_size(&mut self, width: f32, height: f32) {
        self.dimensions = [width, height];
        self.pipeline.as_mut().unwrap().resize(self.dimensions);
        // a minimized window reports zero; keep the last usable aspect
        if width > 0.0 && height > 0.0 {
            self.game_state.scene.set_aspect(width / height);
        }
    }

    fn update(&mut self) {
        self.app.update(&mut self.game_state);

        while let Ok(msg) = self.message_receiver.try_recv() {
            match msg {
                ModelHandleMessage::Dropped(id) => self.game_state.remove_model(id),
                ModelHandleMessage::NewClone(id, model_ref) => {
                    self.game_state.insert_model(id, model_ref)
                }
            }
        }
    }

    fn render_and_update(&mut self) {
        self.update();

        let mut pipeline = self.pipeline.take().unwrap();
        match pipeline.render(self.dimensions, &self.game_state) {
            Ok(future) => pipeline.finish_render(future),
            Err(e) => {
                log::error!("rendering failed: {}", e);
                std::process::exit(1);
            }
        }
        self.pipeline = Some(pipeline);
    }

    fn handle_window_event(&mut self, event: WindowEvent) {
        self.app.event(&mut self.game_state, &event);

        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => {
                if state == ElementState::Pressed {
                    self.game_state.keyboard.pressed.insert(key);
                    self.app.keydown(&mut self.game_state, key);
                } else {
                    self.game_state.keyboard.pressed.remove(&key);
                    self.app.keyup(&mut self.game_state, key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos: (f32, f32) = position.into();
                let diff = (
                    new_pos.0 - self.game_state.mouse.position.0,
                    new_pos.1 - self.game_state.mouse.position.1,
                );
                self.game_state.mouse.position = new_pos;
                self.app.mouse_moved(&mut self.game_state, diff);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.game_state.mouse.left_pressed = pressed,
                    MouseButton::Middle => self.game_state.mouse.middle_pressed = pressed,
                    MouseButton::Right => self.game_state.mouse.right_pressed = pressed,
                    MouseButton::Other(_) => {}
                }
                self.app.mouse_input(&mut self.game_state, button, pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let step = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
                };
                self.app.scroll(&mut self.game_state, step);
            }
            _ => {}
        }
    }

    /// Take control of the main loop and run the viewer until the window is
    /// closed or the application terminates the game state.
    pub fn run(mut self) -> ! {
        let events_loop = self.events_loop.take().unwrap();
        events_loop.run(move |event, _, control_flow| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::Resized(newsize),
                    ..
                } => {
                    self.update_size(newsize.width as f32, newsize.height as f32);
                }
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } if self.app.can_shutdown(&mut self.game_state) => {
                    *control_flow = ControlFlow::Exit
                }
                Event::RedrawEventsCleared => {
                    self.render_and_update();
                }
                _ => {}
            }
            if let Event::WindowEvent { event, .. } = event {
                self.handle_window_event(event);
            }

            if !self.game_state.is_running {
                *control_flow = ControlFlow::Exit;
            }
        })
    }
}

fn log_physical_device_info(
    device: &PhysicalDevice,
    picked: bool,
    queue_family: Option<QueueFamily>,
) {
    log::info!(
        "{} {}",
        if picked { "\u{2192}" } else { "-" },
        device.name(),
    );
    log::debug!("  - api version: {}", device.api_version());
    log::debug!(
        "  - driver version: {} (0x{:08X})",
        Version::from_vulkan_version(device.driver_version()),
        device.driver_version()
    );
    for family in device.queue_families() {
        let picked = queue_family.as_ref() == Some(&family);
        log::debug!(
            "  {} queue family {}, queue count: {:2}, graphics: {:5}, compute: {:5}",
            if picked { "\u{2192}" } else { "-" },
            family.id(),
            family.queues_count(),
            family.supports_graphics(),
            family.supports_compute(),
        );
    }
}
