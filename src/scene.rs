use crate::{
    camera::Camera,
    math::Matrix4,
    model::ModelData,
    projection::{Projection, ProjectionKind},
    render::LightState,
};

/// How meshes are colored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    /// Unlit vertex/material colors, plus the ground plane.
    Flat,
    /// Blinn-Phong lighting, drawn per-vertex on the left half of the
    /// viewport and per-pixel on the right.
    Phong,
}

impl ShadingMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Phong,
            ShadingMode::Phong => ShadingMode::Flat,
        }
    }
}

/// Everything the renderer reads and the input handlers mutate, gathered in
/// one place instead of process-wide globals.
///
/// The view and projection matrices are caches over [`Camera`] and
/// [`Projection`]: every mutation path re-derives them, so a stale matrix is
/// never observable.
pub struct Scene {
    /// The viewpoint.
    pub camera: Camera,
    /// The clip-volume settings.
    pub projection: Projection,
    /// The light sources and shininess.
    pub lights: LightState,
    /// The active shading mode.
    pub shading: ShadingMode,
    /// Draw triangle edges instead of faces (flat mode only).
    pub wireframe: bool,
    view: Matrix4,
    proj: Matrix4,
    current_model: Option<u64>,
}

impl Scene {
    pub(crate) fn new(aspect: f32) -> Self {
        let camera = Camera::default();
        let projection = Projection::new(aspect);
        let view = camera.view_matrix();
        let proj = projection.matrix();
        Self {
            camera,
            projection,
            lights: LightState::new(),
            shading: ShadingMode::Flat,
            wireframe: false,
            view,
            proj,
            current_model: None,
        }
    }

    /// The cached world-to-view matrix.
    pub fn view_matrix(&self) -> Matrix4 {
        self.view
    }

    /// The cached projection matrix.
    pub fn projection_matrix(&self) -> Matrix4 {
        self.proj
    }

    /// Re-derive the view matrix after mutating [`Scene::camera`].
    pub fn rebuild_view(&mut self) {
        self.view = self.camera.view_matrix();
    }

    /// Re-derive the projection matrix after mutating [`Scene::projection`].
    pub fn rebuild_projection(&mut self) {
        self.proj = self.projection.matrix();
    }

    /// Switch to the orthographic projection and rebuild.
    pub fn set_orthographic(&mut self) {
        self.projection.kind = ProjectionKind::Orthographic;
        self.rebuild_projection();
    }

    /// Switch to the perspective projection and rebuild.
    pub fn set_perspective(&mut self) {
        self.projection.kind = ProjectionKind::Perspective;
        self.rebuild_projection();
    }

    /// Update the aspect ratio (on window resize) and rebuild the active
    /// projection. The projection kind is untouched.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.aspect = aspect;
        self.rebuild_projection();
    }

    /// Mark the model that input mutates and the renderer draws.
    pub(crate) fn set_current_model(&mut self, id: Option<u64>) {
        self.current_model = id;
    }

    pub(crate) fn current_model(&self) -> Option<u64> {
        self.current_model
    }

    /// Render the view/projection and the current model's translation,
    /// rotation and scaling matrices for the console dump.
    pub fn matrix_report(&self, model: &ModelData) -> String {
        format!(
            "Matrix Value:\n\
             Viewing Matrix:\n{}\n\
             Projection Matrix:\n{}\n\
             Translation Matrix:\n{}\n\
             Rotation Matrix:\n{}\n\
             Scaling Matrix:\n{}",
            self.view,
            self.proj,
            Matrix4::from_translation(model.position),
            Matrix4::from(model.rotation),
            Matrix4::from_nonuniform_scale(model.scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, Vector3};

    #[test]
    fn caches_start_in_sync() {
        let scene = Scene::new(1.0);
        assert!(approx_eq(
            &scene.view_matrix(),
            &scene.camera.view_matrix(),
            0.0
        ));
        assert!(approx_eq(
            &scene.projection_matrix(),
            &scene.projection.matrix(),
            0.0
        ));
    }

    #[test]
    fn rebuild_view_tracks_camera() {
        let mut scene = Scene::new(1.0);
        let before = scene.view_matrix();
        scene.camera.position = Vector3::new(0.0, 0.0, 5.0);
        scene.rebuild_view();
        let after = scene.view_matrix();
        assert!(!approx_eq(&before, &after, 1e-6));
        assert!((after.0[2][3] + 5.0).abs() < 1e-5);
    }

    #[test]
    fn projection_switches_rebuild() {
        let mut scene = Scene::new(1.0);
        assert_eq!(scene.projection.kind, ProjectionKind::Perspective);
        scene.set_orthographic();
        assert_eq!(scene.projection.kind, ProjectionKind::Orthographic);
        assert_eq!(scene.projection_matrix().0[3][3], 1.0);
        scene.set_perspective();
        assert_eq!(scene.projection_matrix().0[3][2], -1.0);
    }

    #[test]
    fn resize_keeps_kind_sticky() {
        let mut scene = Scene::new(1.0);
        scene.set_orthographic();
        scene.set_aspect(2.0);
        assert_eq!(scene.projection.kind, ProjectionKind::Orthographic);
        let mat = scene.projection_matrix();
        assert!((mat.0[0][0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn no_model_is_current_until_selected() {
        let mut scene = Scene::new(1.0);
        assert_eq!(scene.current_model(), None);
        scene.set_current_model(Some(7));
        assert_eq!(scene.current_model(), Some(7));
    }

    #[test]
    fn matrix_report_lists_all_five() {
        let scene = Scene::new(1.0);
        let report = scene.matrix_report(&ModelData::default());
        for heading in [
            "Viewing Matrix:",
            "Projection Matrix:",
            "Translation Matrix:",
            "Rotation Matrix:",
            "Scaling Matrix:",
        ]
        .iter()
        {
            assert!(report.contains(heading), "missing {}", heading);
        }
    }
}
