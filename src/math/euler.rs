use super::Rad;

/// An orientation as three sequential axis rotations, applied in the fixed
/// order X, then Y, then Z (see `Matrix4::from`).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Euler {
    /// Rotation around the X axis (pitch).
    pub x: Rad,
    /// Rotation around the Y axis (yaw).
    pub y: Rad,
    /// Rotation around the Z axis (roll).
    pub z: Rad,
}

impl Euler {
    /// Create an Euler triple from its component angles.
    pub fn new(x: Rad, y: Rad, z: Rad) -> Self {
        Self { x, y, z }
    }

    /// The identity orientation.
    pub fn zero() -> Self {
        Self::new(Rad(0.0), Rad(0.0), Rad(0.0))
    }
}
