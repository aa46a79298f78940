use thiserror::Error;

/// Errors generated when loading a model. These are static resource errors:
/// the viewer treats them as unrecoverable and exits.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The .obj file could not be read or parsed.
    #[error("Could not load OBJ model {path:?}: {inner:?}")]
    Obj {
        /// The path of the model that was being loaded.
        path: String,
        /// The inner error thrown by the OBJ parser.
        inner: obj::ObjError,
    },

    /// A material library referenced by the .obj file failed to load.
    #[error("Could not load materials for {path:?}: {inner:?}")]
    Mtl {
        /// The path of the model that was being loaded.
        path: String,
        /// The inner error thrown by the MTL parser.
        inner: obj::MtlLibsLoadError,
    },

    /// The model that was loaded has no vertices to draw.
    #[error("Model has no valid vertex buffer")]
    InvalidModelVertexBuffer,
}

/// Errors that are thrown during renderer initialization. These are mostly
/// graphics-card errors, unrecoverable by the viewer.
#[derive(Error, Debug)]
pub enum InitError {
    /// Could not load the capabilities of a surface
    #[error("Could not load surface capabilities: {0:?}")]
    CouldNotLoadSurfaceCapabilities(vulkano::swapchain::CapabilitiesError),

    /// The selected surface has no support for alpha blending
    #[error("The selected surface has no support for alpha blending")]
    NoCompositeAlpha,

    /// Could not initialize the swapchain
    #[error("Could not initialize the swapchain: {0:?}")]
    CouldNotInitSwapchain(vulkano::swapchain::SwapchainCreationError),

    /// Could not create the swapchain framebuffers
    #[error("Could not create swapchain images: {0:?}")]
    CouldNotBuildSwapchainImages(vulkano::framebuffer::FramebufferCreationError),

    /// Could not recreate the swapchain, which usually happens on resizing the window
    #[error("Could not recreate the swapchain: {0:?}")]
    CouldNotRecreateSwapchain(vulkano::swapchain::SwapchainCreationError),

    /// Could not acquire the next swapchain image
    #[error("Could not acquire the next swapchain image: {0:?}")]
    CouldNotAcquireSwapchainImage(vulkano::swapchain::AcquireError),

    /// Could not create a vulkano device
    #[error("Could not create a device: {0:?}")]
    CouldNotCreateDevice(vulkano::device::DeviceCreationError),

    /// Could not find a physical device
    #[error("Could not find a physical device")]
    CouldNotFindPhysicalDevice,

    /// Could not find a valid graphics queue
    #[error("Could not find a valid graphics queue")]
    CouldNotFindValidGraphicsQueue,

    /// Could not initialize Vulkano
    #[error("Could not init Vulkano: {0:?}")]
    CouldNotInitVulkano(vulkano::instance::InstanceCreationError),

    /// Could not create a window surface
    #[error("Could not create a window: {0:?}")]
    CouldNotCreateWindow(vulkano_win::CreationError),
}
