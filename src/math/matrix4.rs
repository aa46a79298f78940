use super::{Euler, Rad, Vector3};

/// A 4x4 matrix of floats, stored row-major.
///
/// Multiplication composes right-to-left, so `a * b` applies `b` first. The
/// storage order is the logical (row-major) one; hand matrices to a
/// column-major graphics API through [`Matrix4::to_gl`], nowhere else.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4(pub [[f32; 4]; 4]);

impl Matrix4 {
    /// Create a matrix from 16 values in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m03: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m13: f32,
        m20: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m30: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self([
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ])
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let mat = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        mat
    }

    /// The zero matrix.
    pub fn zero() -> Self {
        Self([[0.0; 4]; 4])
    }

    /// A translation matrix: the identity with `position` in the last column.
    pub fn from_translation(position: Vector3) -> Self {
        #[rustfmt::skip]
        let mat = Matrix4::new(
            1.0, 0.0, 0.0, position.x,
            0.0, 1.0, 0.0, position.y,
            0.0, 0.0, 1.0, position.z,
            0.0, 0.0, 0.0, 1.0,
        );
        mat
    }

    /// A scaling matrix with `scale`'s components on the diagonal.
    pub fn from_nonuniform_scale(scale: Vector3) -> Self {
        #[rustfmt::skip]
        let mat = Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        );
        mat
    }

    /// A right-handed rotation around the X axis.
    pub fn from_angle_x(angle: Rad) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let mat = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        mat
    }

    /// A right-handed rotation around the Y axis.
    pub fn from_angle_y(angle: Rad) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let mat = Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        mat
    }

    /// A right-handed rotation around the Z axis.
    pub fn from_angle_z(angle: Rad) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let mat = Matrix4::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        mat
    }

    /// This matrix with rows and columns swapped.
    pub fn transposed(self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    /// Convert to the column-major layout column-major graphics APIs expect.
    ///
    /// This is the only place the row-major storage is transposed; call it
    /// when filling a uniform, never earlier.
    pub fn to_gl(self) -> [[f32; 4]; 4] {
        self.transposed().0
    }
}

/// The combined rotation `Rx(x) * Ry(y) * Rz(z)`, in exactly that order.
/// Axis rotations do not commute, so the order is part of the contract.
impl From<Euler> for Matrix4 {
    fn from(src: Euler) -> Self {
        Matrix4::from_angle_x(src.x) * Matrix4::from_angle_y(src.y) * Matrix4::from_angle_z(src.z)
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[r][k] * rhs.0[k][c]).sum();
            }
        }
        Matrix4(out)
    }
}

impl From<Matrix4> for [[f32; 4]; 4] {
    fn from(mat: Matrix4) -> Self {
        mat.0
    }
}

impl std::fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in &self.0 {
            writeln!(
                f,
                "{:10.4} {:10.4} {:10.4} {:10.4}",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: &Matrix4, b: &Matrix4, eps: f32) -> bool {
    a.0.iter()
        .flatten()
        .zip(b.0.iter().flatten())
        .all(|(x, y)| (x - y).abs() <= eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x6d61_7468)
    }

    #[test]
    fn identity_is_multiplicative_unit() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_angle_y(Rad(0.7));
        assert!(approx_eq(&(Matrix4::identity() * m), &m, EPS));
        assert!(approx_eq(&(m * Matrix4::identity()), &m, EPS));
    }

    #[test]
    fn multiplication_is_associative() {
        let a = Matrix4::from_angle_x(Rad(0.4));
        let b = Matrix4::from_translation(Vector3::new(3.0, -1.0, 2.0));
        let c = Matrix4::from_nonuniform_scale(Vector3::new(2.0, 0.5, 1.5));
        assert!(approx_eq(&((a * b) * c), &(a * (b * c)), EPS));
    }

    #[test]
    fn translation_inverse_is_negated_translation() {
        let mut rng = rng();
        for _ in 0..100 {
            let v = Vector3::new(
                rng.gen_range(-10.0, 10.0),
                rng.gen_range(-10.0, 10.0),
                rng.gen_range(-10.0, 10.0),
            );
            let product = Matrix4::from_translation(v) * Matrix4::from_translation(-v);
            assert!(approx_eq(&product, &Matrix4::identity(), EPS));
        }
    }

    #[test]
    fn translation_places_vector_in_last_column() {
        let m = Matrix4::from_translation(Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(m.0[0][3], 4.0);
        assert_eq!(m.0[1][3], 5.0);
        assert_eq!(m.0[2][3], 6.0);
        assert_eq!(m.0[3][3], 1.0);
    }

    #[test]
    fn scaling_inverse_is_reciprocal_scaling() {
        let mut rng = rng();
        for _ in 0..100 {
            let v = Vector3::new(
                rng.gen_range(0.1, 10.0),
                rng.gen_range(0.1, 10.0),
                rng.gen_range(0.1, 10.0),
            );
            let recip = Vector3::new(1.0 / v.x, 1.0 / v.y, 1.0 / v.z);
            let product =
                Matrix4::from_nonuniform_scale(v) * Matrix4::from_nonuniform_scale(recip);
            assert!(approx_eq(&product, &Matrix4::identity(), EPS));
        }
    }

    #[test]
    fn axis_rotation_inverse_is_negated_angle() {
        let mut rng = rng();
        for _ in 0..100 {
            let theta = Rad(rng.gen_range(-6.3, 6.3));
            for (fwd, back) in [
                (Matrix4::from_angle_x(theta), Matrix4::from_angle_x(-theta)),
                (Matrix4::from_angle_y(theta), Matrix4::from_angle_y(-theta)),
                (Matrix4::from_angle_z(theta), Matrix4::from_angle_z(-theta)),
            ]
            .iter()
            {
                assert!(approx_eq(&(*fwd * *back), &Matrix4::identity(), EPS));
            }
        }
    }

    #[test]
    fn euler_composes_x_then_y_then_z() {
        let angles = Euler::new(Rad(0.3), Rad(-1.1), Rad(2.0));
        let expected = Matrix4::from_angle_x(angles.x)
            * Matrix4::from_angle_y(angles.y)
            * Matrix4::from_angle_z(angles.z);
        assert!(approx_eq(&Matrix4::from(angles), &expected, EPS));
    }

    #[test]
    fn euler_order_matters() {
        // rotate((a, b, 0)) != rotate((b, a, 0)) in general
        let ab = Matrix4::from(Euler::new(Rad(0.5), Rad(1.2), Rad(0.0)));
        let ba = Matrix4::from(Euler::new(Rad(1.2), Rad(0.5), Rad(0.0)));
        assert!(!approx_eq(&ab, &ba, 1e-3));
    }

    #[test]
    fn to_gl_transposes_once() {
        let m = Matrix4::from_translation(Vector3::new(7.0, 8.0, 9.0));
        let gl = m.to_gl();
        // the translation moves from the last column to the last "row"
        assert_eq!(gl[3][0], 7.0);
        assert_eq!(gl[3][1], 8.0);
        assert_eq!(gl[3][2], 9.0);
        assert_eq!(gl[0][3], 0.0);
        assert!(approx_eq(&m.transposed().transposed(), &m, 0.0));
    }

    #[test]
    fn display_prints_rows() {
        let text = Matrix4::identity().to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().trim().starts_with("1.0000"));
    }
}
