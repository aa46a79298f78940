use crate::math::{Matrix4, Vector3};

/// The viewpoint: an eye position, a look-at target and an up hint.
///
/// The view matrix is a derived value; call [`Camera::view_matrix`] again
/// after mutating any field. The up vector must not be parallel to
/// `center - position`, or the basis degenerates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Where the eye sits in world space.
    pub position: Vector3,
    /// The point being looked at.
    pub center: Vector3,
    /// The approximate up direction. Only used to seed the basis; the
    /// actual up axis is re-orthogonalized against the viewing direction.
    pub up: Vector3,
}

impl Camera {
    /// Create a camera from eye, target and up.
    pub fn new(position: Vector3, center: Vector3, up: Vector3) -> Self {
        Self {
            position,
            center,
            up,
        }
    }

    /// The orthonormal camera basis `(right, up, forward)`.
    ///
    /// `forward` points from the eye toward the target; the returned up axis
    /// is `cross(right, forward)`, not the raw up field.
    pub fn basis(&self) -> (Vector3, Vector3, Vector3) {
        let forward = (self.center - self.position).normalized();
        let right = forward.cross(self.up).normalized();
        let true_up = right.cross(forward);
        (right, true_up, forward)
    }

    /// Build the world-to-view matrix.
    ///
    /// The rotation rows are `[right, up, -forward]` (the camera looks down
    /// negative Z in view space), composed with a translation by the negated
    /// eye position.
    pub fn view_matrix(&self) -> Matrix4 {
        let (right, up, forward) = self.basis();

        #[rustfmt::skip]
        let rotation = Matrix4::new(
            right.x,    right.y,    right.z,    0.0,
            up.x,       up.y,       up.z,       0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0,        0.0,        0.0,        1.0,
        );
        let translation = Matrix4::from_translation(-self.position);

        rotation * translation
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::zero(),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_basis() {
        let camera = Camera::default();
        let (right, up, forward) = camera.basis();
        assert!((forward - Vector3::new(0.0, 0.0, -1.0)).magnitude() < EPS);
        assert!((right - Vector3::new(1.0, 0.0, 0.0)).magnitude() < EPS);
        assert!((up - Vector3::new(0.0, 1.0, 0.0)).magnitude() < EPS);
    }

    #[test]
    fn default_view_translation_column() {
        let view = Camera::default().view_matrix();
        assert!((view.0[0][3]).abs() < EPS);
        assert!((view.0[1][3]).abs() < EPS);
        assert!((view.0[2][3] + 2.0).abs() < EPS);
    }

    #[test]
    fn basis_is_orthonormal_for_random_cameras() {
        let mut rng = StdRng::seed_from_u64(0x6361_6d65);
        let mut checked = 0;
        while checked < 100 {
            let position = Vector3::new(
                rng.gen_range(-5.0, 5.0),
                rng.gen_range(-5.0, 5.0),
                rng.gen_range(-5.0, 5.0),
            );
            let center = Vector3::new(
                rng.gen_range(-5.0, 5.0),
                rng.gen_range(-5.0, 5.0),
                rng.gen_range(-5.0, 5.0),
            );
            let up = Vector3::new(
                rng.gen_range(-1.0, 1.0),
                rng.gen_range(-1.0, 1.0),
                rng.gen_range(-1.0, 1.0),
            );
            // skip degenerate inputs: the precondition excludes them
            let gaze = center - position;
            if gaze.magnitude() < 1e-3 || gaze.normalized().cross(up).magnitude() < 1e-3 {
                continue;
            }
            checked += 1;

            let (right, true_up, forward) = Camera::new(position, center, up).basis();
            assert!((right.magnitude() - 1.0).abs() < EPS);
            assert!((true_up.magnitude() - 1.0).abs() < EPS);
            assert!((forward.magnitude() - 1.0).abs() < EPS);
            assert!(right.dot(true_up).abs() < EPS);
            assert!(right.dot(forward).abs() < EPS);
            assert!(true_up.dot(forward).abs() < EPS);
        }
    }

    #[test]
    fn raw_up_only_seeds_the_basis() {
        // a tilted, non-unit up hint still yields the orthonormal frame
        let camera = Camera::new(
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::zero(),
            Vector3::new(0.4, 2.0, 0.0),
        );
        let (right, up, forward) = camera.basis();
        assert!(right.dot(up).abs() < EPS);
        assert!(up.dot(forward).abs() < EPS);
        assert!((up.magnitude() - 1.0).abs() < EPS);
        // and the frame is not the raw hint
        assert!((up - camera.up.normalized()).magnitude() > 1e-3);
    }

    #[test]
    fn view_is_rotation_times_translation() {
        let camera = Camera::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-1.0, 0.5, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let (right, up, forward) = camera.basis();
        #[rustfmt::skip]
        let rotation = Matrix4::new(
            right.x,    right.y,    right.z,    0.0,
            up.x,       up.y,       up.z,       0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0,        0.0,        0.0,        1.0,
        );
        let expected = rotation * Matrix4::from_translation(-camera.position);
        assert!(approx_eq(&camera.view_matrix(), &expected, EPS));
    }
}
