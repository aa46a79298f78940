use super::{Model, ModelData, ModelRef};
use parking_lot::RwLock;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    mpsc::Sender,
    Arc,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A handle to a loaded model. This can be used to move the model around in
/// the world.
///
/// When this handle is dropped, the model disappears from the world on the
/// next frame. When it is cloned, a second, independently controlled model
/// appears.
pub struct ModelHandle {
    id: u64,
    model: Arc<Model>,
    data: Arc<RwLock<ModelData>>,
    sender: Sender<ModelHandleMessage>,
}

impl ModelHandle {
    pub(crate) fn new(
        model: Arc<Model>,
        data: ModelData,
        sender: Sender<ModelHandleMessage>,
    ) -> (Self, u64, ModelRef) {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let data = Arc::new(RwLock::new(data));
        let model_ref = ModelRef {
            model: model.clone(),
            data: data.clone(),
        };
        (
            Self {
                id,
                model,
                data,
                sender,
            },
            id,
            model_ref,
        )
    }

    /// The identifier the engine knows this model by.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the current position of the model. Short for `self.read(|d| d.position)`.
    pub fn position(&self) -> crate::math::Vector3 {
        self.read(|d| d.position)
    }

    /// Get the current rotation of the model. Short for `self.read(|d| d.rotation)`.
    pub fn rotation(&self) -> crate::math::Euler {
        self.read(|d| d.rotation)
    }

    /// Get the current scale of the model. Short for `self.read(|d| d.scale)`.
    pub fn scale(&self) -> crate::math::Vector3 {
        self.read(|d| d.scale)
    }

    /// Read the transform of the model, optionally returning a value.
    pub fn read<T>(&self, cb: impl FnOnce(&ModelData) -> T) -> T {
        let data = self.data.read();
        cb(&data)
    }

    /// Update the transform of the model, optionally returning a value.
    pub fn modify<T>(&self, cb: impl FnOnce(&mut ModelData) -> T) -> T {
        let mut data = self.data.write();
        cb(&mut data)
    }
}

impl Clone for ModelHandle {
    fn clone(&self) -> Self {
        let snapshot = *self.data.read();
        let (new_handle, new_id, new_ref) =
            ModelHandle::new(self.model.clone(), snapshot, self.sender.clone());

        // This sender only errors when the receiver is dropped, which only
        // happens when the game is shutting down, so the error is ignored.
        let _ = self
            .sender
            .send(ModelHandleMessage::NewClone(new_id, new_ref));

        new_handle
    }
}

impl Drop for ModelHandle {
    fn drop(&mut self) {
        // See Clone for why this error is ignored.
        let _ = self.sender.send(ModelHandleMessage::Dropped(self.id));
    }
}

/// Lifecycle messages a handle sends back to the window loop.
pub(crate) enum ModelHandleMessage {
    /// A handle was cloned; register the copy under the new id.
    NewClone(u64, ModelRef),
    /// A handle was dropped; unregister the model.
    Dropped(u64),
}
