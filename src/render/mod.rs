mod lights;
mod pipeline;
mod window;

pub use self::{
    lights::{LightKind, LightSource, LightState, SpotParams},
    window::Window,
};
pub(crate) use self::pipeline::RenderPipeline;

/// The vertex layout shared by every pipeline: a position, a color and a
/// normal, matching what the OBJ loader and the built-in plane produce.
#[derive(Default, Copy, Clone)]
pub struct Vertex {
    /// Object-space position.
    pub position_in: [f32; 3],
    /// Per-vertex color, white for loaded meshes.
    pub color_in: [f32; 3],
    /// Object-space normal, zero when the mesh has none.
    pub normal_in: [f32; 3],
}
vulkano::impl_vertex!(Vertex, position_in, color_in, normal_in);

/// The reflectance constants of one shape, taken from its MTL entry.
///
/// The specular exponent is deliberately absent: shininess is a single
/// interactively edited value in [`LightState`](crate::LightState).
#[derive(Copy, Clone, Debug)]
pub struct Material {
    /// Ambient reflectance (Ka).
    pub ambient: [f32; 3],
    /// Diffuse reflectance (Kd).
    pub diffuse: [f32; 3],
    /// Specular reflectance (Ks).
    pub specular: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [1.0, 1.0, 1.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
        }
    }
}
