//! Vector, matrix and angle types for the transform pipeline.
//!
//! Matrices are stored in row-major order and composed right-to-left;
//! [`Matrix4::to_gl`] performs the one transpose to column-major at the
//! graphics-API boundary.

mod deg;
mod euler;
mod matrix4;
mod rad;
mod vector3;

pub use self::{deg::Deg, euler::Euler, matrix4::Matrix4, rad::Rad, vector3::Vector3};

#[cfg(test)]
pub(crate) use self::matrix4::approx_eq;

/// Build a symmetric-frustum perspective projection matrix.
///
/// The aspect correction keeps the image undistorted on non-square viewports:
/// for `aspect >= 1` the X scale is divided by `aspect`, otherwise the Y
/// scale is multiplied by it.
pub fn perspective(fovy: Rad, aspect: f32, near: f32, far: f32) -> Matrix4 {
    assert!(
        fovy > Rad::zero(),
        "The vertical field of view cannot be below zero, found: {:?}",
        fovy
    );
    assert!(
        aspect > 0.0,
        "The aspect ratio cannot be below zero, found: {:?}",
        aspect
    );
    assert!(
        far > near,
        "The far plane cannot be closer than the near plane, found: far: {:?}, near: {:?}",
        far,
        near
    );

    let f = 1.0 / (fovy / 2.0).tan();
    let z = (far + near) / (near - far);
    let t_z = (2.0 * far * near) / (near - far);

    #[rustfmt::skip]
    let mut mat = Matrix4::new(
        f,   0.0, 0.0,  0.0,
        0.0, f,   0.0,  0.0,
        0.0, 0.0, z,    t_z,
        0.0, 0.0, -1.0, 0.0,
    );

    if aspect >= 1.0 {
        mat.0[0][0] = f / aspect;
    } else {
        mat.0[1][1] = f * aspect;
    }
    mat
}

/// Build an orthographic projection matrix from the clipping box.
///
/// Applies the same aspect-correction policy as [`perspective`].
pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    aspect: f32,
) -> Matrix4 {
    let x = 2.0 / (right - left);
    let y = 2.0 / (top - bottom);
    let z = 2.0 / (near - far);
    let ratio_x = (right + left) / (left - right);
    let ratio_y = (top + bottom) / (bottom - top);
    let ratio_z = (far + near) / (near - far);

    #[rustfmt::skip]
    let mut mat = Matrix4::new(
        x,   0.0, 0.0, ratio_x,
        0.0, y,   0.0, ratio_y,
        0.0, 0.0, z,   ratio_z,
        0.0, 0.0, 0.0, 1.0,
    );

    if aspect >= 1.0 {
        mat.0[0][0] = x / aspect;
    } else {
        mat.0[1][1] = y * aspect;
    }
    mat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_depth_terms() {
        // fovy 80 degrees, near 0.001, far 100, square viewport
        let mat = perspective(Deg(80.0).into(), 1.0, 0.001, 100.0);
        assert!((mat.0[2][2] - (100.0 + 0.001) / (0.001 - 100.0)).abs() < 1e-6);
        assert!((mat.0[2][2] + 1.00002).abs() < 1e-4);
        assert!((mat.0[3][2] + 1.0).abs() < 1e-6);
        assert!(mat.0[3][3].abs() < 1e-6);
    }

    #[test]
    fn perspective_aspect_correction_wide() {
        let square = perspective(Deg(80.0).into(), 1.0, 0.1, 10.0);
        let wide = perspective(Deg(80.0).into(), 2.0, 0.1, 10.0);
        assert!((wide.0[0][0] - square.0[0][0] / 2.0).abs() < 1e-6);
        // only the X scale moved
        assert!((wide.0[1][1] - square.0[1][1]).abs() < 1e-6);
    }

    #[test]
    fn perspective_aspect_correction_tall() {
        let square = perspective(Deg(80.0).into(), 1.0, 0.1, 10.0);
        let tall = perspective(Deg(80.0).into(), 0.5, 0.1, 10.0);
        assert!((tall.0[1][1] - square.0[1][1] * 0.5).abs() < 1e-6);
        // the uncorrected X scale stays at f
        assert!((tall.0[0][0] - square.0[1][1]).abs() < 1e-6);
    }

    #[test]
    fn orthographic_aspect_correction() {
        let square = orthographic(-1.0, 1.0, -1.0, 1.0, 0.001, 100.0, 1.0);
        let wide = orthographic(-1.0, 1.0, -1.0, 1.0, 0.001, 100.0, 2.0);
        let tall = orthographic(-1.0, 1.0, -1.0, 1.0, 0.001, 100.0, 0.5);

        assert!((wide.0[0][0] - square.0[0][0] / 2.0).abs() < 1e-6);
        assert!((wide.0[1][1] - square.0[1][1]).abs() < 1e-6);
        assert!((tall.0[1][1] - square.0[1][1] * 0.5).abs() < 1e-6);
        assert!((tall.0[0][0] - square.0[0][0]).abs() < 1e-6);
    }

    #[test]
    fn orthographic_unit_box() {
        let mat = orthographic(-1.0, 1.0, -1.0, 1.0, 0.001, 100.0, 1.0);
        assert!((mat.0[0][0] - 1.0).abs() < 1e-6);
        assert!((mat.0[1][1] - 1.0).abs() < 1e-6);
        assert!((mat.0[2][2] - 2.0 / (0.001 - 100.0)).abs() < 1e-6);
        assert!((mat.0[3][3] - 1.0).abs() < 1e-6);
    }
}
