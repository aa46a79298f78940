use crate::math::{Euler, Matrix4, Vector3};

/// The transform of a model. This is behind an `Arc<RwLock<>>` so that the
/// engine can keep a copy and read the latest values each frame.
///
/// This is the value passed to `ModelHandle::modify`; the input handlers
/// mutate it in place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModelData {
    /// Where the model sits in the world.
    pub position: Vector3,
    /// Per-axis scale factors.
    pub scale: Vector3,
    /// The orientation, in Euler radians.
    pub rotation: Euler,
}

impl Default for ModelData {
    fn default() -> ModelData {
        Self {
            position: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Euler::zero(),
        }
    }
}

impl ModelData {
    /// The model matrix `T * R * S`: scale first, then rotate, then move.
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, Rad};

    #[test]
    fn default_is_identity() {
        assert!(approx_eq(
            &ModelData::default().matrix(),
            &Matrix4::identity(),
            0.0
        ));
    }

    #[test]
    fn matrix_composes_translate_rotate_scale() {
        let data = ModelData {
            position: Vector3::new(1.0, -2.0, 0.5),
            scale: Vector3::new(2.0, 1.0, 3.0),
            rotation: Euler::new(Rad(0.2), Rad(0.4), Rad(-0.3)),
        };
        let expected = Matrix4::from_translation(data.position)
            * Matrix4::from(data.rotation)
            * Matrix4::from_nonuniform_scale(data.scale);
        assert!(approx_eq(&data.matrix(), &expected, 1e-6));
        // translation survives in the last column regardless of R and S
        assert!((data.matrix().0[0][3] - 1.0).abs() < 1e-6);
        assert!((data.matrix().0[1][3] + 2.0).abs() < 1e-6);
    }
}
