use super::{ParsedModel, ParsedModelPart};
use crate::{
    error::ModelError,
    math::Vector3,
    render::{Material, Vertex},
};
use genmesh::EmitTriangles;
use obj::ObjMaterial;
use std::sync::Arc;

pub(crate) fn load(src: &str) -> Result<ParsedModel, ModelError> {
    let mut obj = obj::Obj::load(std::path::Path::new(src)).map_err(|inner| ModelError::Obj {
        path: src.to_owned(),
        inner,
    })?;
    obj.load_mtls().map_err(|inner| ModelError::Mtl {
        path: src.to_owned(),
        inner,
    })?;

    let obj::ObjData {
        mut position,
        texture: _,
        normal,
        objects,
        material_libs,
    } = obj.data;

    normalize_positions(&mut position);

    let vertices: Vec<_> = position
        .into_iter()
        .enumerate()
        .map(|(index, position)| Vertex {
            position_in: position,
            color_in: [1.0, 1.0, 1.0],
            normal_in: normal.get(index).cloned().unwrap_or([0.0, 0.0, 0.0]),
        })
        .collect();

    let mut parts = Vec::new();
    parts.reserve(objects.iter().map(|o| o.groups.len()).sum());

    for object in objects {
        for group in object.groups {
            let mut index_group = Vec::new();
            for poly in group.polys {
                poly.into_genmesh().emit_triangles(|triangle| {
                    index_group.push(triangle.x.0 as u32);
                    index_group.push(triangle.y.0 as u32);
                    index_group.push(triangle.z.0 as u32);
                });
            }

            let material = group.material.and_then(|m| match m {
                ObjMaterial::Mtl(mtl) => Some(mtl),
                ObjMaterial::Ref(name) => material_libs
                    .iter()
                    .flat_map(|m| &m.materials)
                    .find(|m| m.name == name)
                    .map(Arc::clone),
            });
            let material = material.map(|material| Material {
                ambient: material.ka.unwrap_or([1.0, 1.0, 1.0]),
                diffuse: material.kd.unwrap_or([1.0, 1.0, 1.0]),
                specular: material.ks.unwrap_or([1.0, 1.0, 1.0]),
            });

            parts.push(ParsedModelPart {
                index: index_group,
                material,
            });
        }
    }

    Ok(ParsedModel { vertices, parts })
}

/// Center the mesh on its bounding-box midpoint and scale it by half the
/// largest axis extent, so every model arrives fitting the same unit cube.
fn normalize_positions(positions: &mut [[f32; 3]]) {
    let mut iter = positions.iter().map(|p| Vector3::from(*p));
    let first = match iter.next() {
        Some(first) => first,
        None => return,
    };
    let (min, max) = iter.fold((first, first), |(min, max), v| {
        (min.memberwise_min(v), max.memberwise_max(v))
    });

    let offset = (min + max) * 0.5;
    let extent = max - min;
    let scale = extent.x.max(extent.y).max(extent.z) / 2.0;

    for p in positions.iter_mut() {
        p[0] = (p[0] - offset.x) / scale;
        p[1] = (p[1] - offset.y) / scale;
        p[2] = (p[2] - offset.z) / scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(positions: &[[f32; 3]]) -> (Vector3, Vector3) {
        positions.iter().map(|p| Vector3::from(*p)).fold(
            (
                Vector3::new(f32::MAX, f32::MAX, f32::MAX),
                Vector3::new(f32::MIN, f32::MIN, f32::MIN),
            ),
            |(min, max), v| (min.memberwise_min(v), max.memberwise_max(v)),
        )
    }

    #[test]
    fn normalization_centers_and_scales_to_unit_cube() {
        let mut positions = vec![[0.0, 0.0, 0.0], [4.0, 2.0, 1.0], [4.0, 0.0, 0.5]];
        normalize_positions(&mut positions);
        let (min, max) = bounds(&positions);

        // centered: the bounding box midpoint is the origin
        assert!(((min.x + max.x) / 2.0).abs() < 1e-6);
        assert!(((min.y + max.y) / 2.0).abs() < 1e-6);
        assert!(((min.z + max.z) / 2.0).abs() < 1e-6);
        // the largest axis spans exactly [-1, 1]
        assert!((max.x - 1.0).abs() < 1e-6);
        assert!((min.x + 1.0).abs() < 1e-6);
        // smaller axes scale by the same factor (largest extent was 4)
        assert!((max.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn normalization_is_idempotent_on_unit_meshes() {
        let mut positions = vec![[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]];
        let before = positions.clone();
        normalize_positions(&mut positions);
        for (a, b) in positions.iter().zip(before.iter()) {
            for i in 0..3 {
                assert!((a[i] - b[i]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn normalization_accepts_empty_input() {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        normalize_positions(&mut positions);
        assert!(positions.is_empty());
    }
}
