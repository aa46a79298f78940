mod builder;
mod data;
mod handle;
mod loader;
pub(crate) mod pipeline;

pub use self::{builder::ModelBuilder, data::ModelData, handle::ModelHandle};
pub(crate) use self::handle::ModelHandleMessage;

use crate::render::{Material, Vertex};
use parking_lot::RwLock;
use std::sync::Arc;
use vulkano::buffer::CpuAccessibleBuffer;

/// The GPU side of a loaded model: one shared vertex buffer and one indexed
/// group per OBJ group, each with its own material.
pub struct Model {
    pub(crate) vertex_buffer: Arc<CpuAccessibleBuffer<[Vertex]>>,
    pub(crate) groups: Vec<ModelGroup>,
}

pub(crate) struct ModelGroup {
    pub(crate) material: Option<Material>,
    pub(crate) index: Arc<CpuAccessibleBuffer<[u32]>>,
}

/// What the engine keeps per live model: the GPU buffers plus the shared,
/// mutable transform.
#[derive(Clone)]
pub(crate) struct ModelRef {
    pub(crate) model: Arc<Model>,
    pub(crate) data: Arc<RwLock<ModelData>>,
}
