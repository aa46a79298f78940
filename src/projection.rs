use crate::math::{self, Deg, Matrix4};

/// Which projection variant is active. The choice is sticky: it only changes
/// through an explicit switch, never as a side effect of a resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Box-to-NDC scaling from the configured bounds.
    Orthographic,
    /// Symmetric frustum from the vertical field of view.
    Perspective,
}

/// The clip-volume settings feeding the projection matrix.
///
/// The matrix is a derived value: rebuild it (via [`Projection::matrix`])
/// whenever a field changes, including the aspect ratio on window resize.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Vertical field of view, used by the perspective variant.
    pub fovy: Deg,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Left bound of the orthographic box.
    pub left: f32,
    /// Right bound of the orthographic box.
    pub right: f32,
    /// Top bound of the orthographic box.
    pub top: f32,
    /// Bottom bound of the orthographic box.
    pub bottom: f32,
    /// The active variant.
    pub kind: ProjectionKind,
}

impl Projection {
    /// The viewer defaults: a [-1, 1] orthographic box, near 0.001,
    /// far 100, fovy 80 degrees, perspective.
    pub fn new(aspect: f32) -> Self {
        Self {
            near: 0.001,
            far: 100.0,
            fovy: Deg(80.0),
            aspect,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            kind: ProjectionKind::Perspective,
        }
    }

    /// Build the projection matrix for the active variant.
    pub fn matrix(&self) -> Matrix4 {
        match self.kind {
            ProjectionKind::Orthographic => math::orthographic(
                self.left,
                self.right,
                self.bottom,
                self.top,
                self.near,
                self.far,
                self.aspect,
            ),
            ProjectionKind::Perspective => {
                math::perspective(self.fovy.into(), self.aspect, self.near, self.far)
            }
        }
    }
}
