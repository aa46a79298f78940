use crate::render::{Material, Vertex};

pub(crate) mod obj;

/// A model decoded to the crate's vertex/index representation, ready for
/// buffer upload.
pub(crate) struct ParsedModel {
    pub vertices: Vec<Vertex>,
    pub parts: Vec<ParsedModelPart>,
}

pub(crate) struct ParsedModelPart {
    pub index: Vec<u32>,
    pub material: Option<Material>,
}

/// The fixed ground plane under the scene, drawn in flat mode with
/// two-tone vertex colors. Not indexed; drawn as-is.
pub(crate) static PLANE: [Vertex; 6] = [
    Vertex {
        position_in: [1.0, -0.9, -1.0],
        color_in: [0.0, 1.0, 0.0],
        normal_in: [0.0, 1.0, 0.0],
    },
    Vertex {
        position_in: [1.0, -0.9, 1.0],
        color_in: [0.0, 0.5, 0.8],
        normal_in: [0.0, 1.0, 0.0],
    },
    Vertex {
        position_in: [-1.0, -0.9, -1.0],
        color_in: [0.0, 1.0, 0.0],
        normal_in: [0.0, 1.0, 0.0],
    },
    Vertex {
        position_in: [1.0, -0.9, 1.0],
        color_in: [0.0, 0.5, 0.8],
        normal_in: [0.0, 1.0, 0.0],
    },
    Vertex {
        position_in: [-1.0, -0.9, 1.0],
        color_in: [0.0, 0.5, 0.8],
        normal_in: [0.0, 1.0, 0.0],
    },
    Vertex {
        position_in: [-1.0, -0.9, -1.0],
        color_in: [0.0, 1.0, 0.0],
        normal_in: [0.0, 1.0, 0.0],
    },
];
