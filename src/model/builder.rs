use super::{loader, Model, ModelGroup, ModelHandle};
use crate::{error::ModelError, math::Vector3, render::Material, GameState, ModelData};
use std::sync::Arc;
use vulkano::buffer::{BufferUsage, CpuAccessibleBuffer};

/// A builder that is used to configure a model being loaded.
pub struct ModelBuilder<'a> {
    game_state: &'a mut GameState,
    source: &'a str,
    fallback_color: Option<Vector3>,
}

impl<'a> ModelBuilder<'a> {
    pub(crate) fn new(game_state: &'a mut GameState, source: &'a str) -> Self {
        Self {
            game_state,
            source,
            fallback_color: None,
        }
    }

    /// Set the diffuse color used for groups the OBJ assigns no material to.
    pub fn with_fallback_color(mut self, color: impl Into<Vector3>) -> Self {
        self.fallback_color = Some(color.into());
        self
    }

    /// Finish configuring the model and try to load it.
    pub fn build(self) -> Result<ModelHandle, ModelError> {
        let parsed = loader::obj::load(self.source)?;
        if parsed.vertices.is_empty() {
            return Err(ModelError::InvalidModelVertexBuffer);
        }

        let device = self.game_state.device.clone();
        let vertex_buffer = CpuAccessibleBuffer::from_iter(
            device.clone(),
            BufferUsage::all(),
            false,
            parsed.vertices.iter().copied(),
        )
        .unwrap();

        let fallback = self.fallback_color.map(|color| Material {
            diffuse: color.into(),
            ..Material::default()
        });

        let groups: Vec<_> = parsed
            .parts
            .into_iter()
            .filter(|part| !part.index.is_empty())
            .map(|part| ModelGroup {
                material: part.material.or(fallback),
                index: CpuAccessibleBuffer::from_iter(
                    device.clone(),
                    BufferUsage::all(),
                    false,
                    part.index.iter().copied(),
                )
                .unwrap(),
            })
            .collect();

        if groups.is_empty() {
            return Err(ModelError::InvalidModelVertexBuffer);
        }

        let model = Arc::new(Model {
            vertex_buffer,
            groups,
        });
        let (handle, id, model_ref) = ModelHandle::new(
            model,
            ModelData::default(),
            self.game_state.message_sender.clone(),
        );
        self.game_state.model_handles.insert(id, model_ref);

        Ok(handle)
    }
}
