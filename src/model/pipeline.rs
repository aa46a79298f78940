use super::{loader, ModelRef};
use crate::{
    math::Matrix4,
    render::{Material, Vertex},
    scene::{Scene, ShadingMode},
};
use std::sync::Arc;
use vulkano::{
    buffer::{BufferUsage, CpuAccessibleBuffer, CpuBufferPool},
    command_buffer::{AutoCommandBufferBuilder, DynamicState},
    descriptor::descriptor_set::{PersistentDescriptorSet, StdDescriptorPool},
    device::Device,
    framebuffer::{RenderPassAbstract, Subpass},
    pipeline::{viewport::Viewport, GraphicsPipeline, GraphicsPipelineAbstract},
};

/// The pipelines that draw models: flat (filled and wireframe variants) and
/// Blinn-Phong. Which one runs is decided per frame from the scene state.
pub(crate) struct ModelPipeline {
    flat: Arc<dyn GraphicsPipelineAbstract + Send + Sync>,
    flat_wireframe: Arc<dyn GraphicsPipelineAbstract + Send + Sync>,
    phong: Arc<dyn GraphicsPipelineAbstract + Send + Sync>,
    flat_uniforms: CpuBufferPool<flat_vs::ty::Data>,
    phong_uniforms: CpuBufferPool<phong_vs::ty::Data>,
    plane_vertices: Arc<CpuAccessibleBuffer<[Vertex]>>,
}

impl ModelPipeline {
    pub fn create(
        device: Arc<Device>,
        render_pass: Arc<dyn RenderPassAbstract + Send + Sync>,
    ) -> Self {
        let flat_vs =
            flat_vs::Shader::load(device.clone()).expect("failed to create shader module");
        let flat_fs =
            flat_fs::Shader::load(device.clone()).expect("failed to create shader module");
        let phong_vs =
            phong_vs::Shader::load(device.clone()).expect("failed to create shader module");
        let phong_fs =
            phong_fs::Shader::load(device.clone()).expect("failed to create shader module");

        let flat = Arc::new(
            GraphicsPipeline::start()
                .vertex_input_single_buffer::<Vertex>()
                .vertex_shader(flat_vs.main_entry_point(), ())
                .viewports_dynamic_scissors_irrelevant(1)
                .fragment_shader(flat_fs.main_entry_point(), ())
                .blend_alpha_blending()
                .depth_stencil_simple_depth()
                .render_pass(Subpass::from(render_pass.clone(), 0).unwrap())
                .build(device.clone())
                .unwrap(),
        );
        let flat_wireframe = Arc::new(
            GraphicsPipeline::start()
                .vertex_input_single_buffer::<Vertex>()
                .vertex_shader(flat_vs.main_entry_point(), ())
                .viewports_dynamic_scissors_irrelevant(1)
                .fragment_shader(flat_fs.main_entry_point(), ())
                .polygon_mode_line()
                .blend_alpha_blending()
                .depth_stencil_simple_depth()
                .render_pass(Subpass::from(render_pass.clone(), 0).unwrap())
                .build(device.clone())
                .unwrap(),
        );
        let phong = Arc::new(
            GraphicsPipeline::start()
                .vertex_input_single_buffer::<Vertex>()
                .vertex_shader(phong_vs.main_entry_point(), ())
                .viewports_dynamic_scissors_irrelevant(1)
                .fragment_shader(phong_fs.main_entry_point(), ())
                .blend_alpha_blending()
                .depth_stencil_simple_depth()
                .render_pass(Subpass::from(render_pass, 0).unwrap())
                .build(device.clone())
                .unwrap(),
        );

        let plane_vertices = CpuAccessibleBuffer::from_iter(
            device.clone(),
            BufferUsage::all(),
            false,
            loader::PLANE.iter().copied(),
        )
        .unwrap();

        let flat_uniforms = CpuBufferPool::<flat_vs::ty::Data>::uniform_buffer(device.clone());
        let phong_uniforms = CpuBufferPool::<phong_vs::ty::Data>::uniform_buffer(device);

        Self {
            flat,
            flat_wireframe,
            phong,
            flat_uniforms,
            phong_uniforms,
            plane_vertices,
        }
    }

    pub fn render(
        &mut self,
        command_buffer_builder: &mut AutoCommandBufferBuilder,
        scene: &Scene,
        model: Option<&ModelRef>,
        dimensions: [f32; 2],
        dynamic_state: &DynamicState,
        descriptor_pool: &mut Arc<StdDescriptorPool>,
    ) {
        match scene.shading {
            ShadingMode::Flat => {
                self.render_flat(
                    command_buffer_builder,
                    scene,
                    model,
                    dynamic_state,
                    descriptor_pool,
                );
            }
            ShadingMode::Phong => {
                self.render_phong(
                    command_buffer_builder,
                    scene,
                    model,
                    dimensions,
                    descriptor_pool,
                );
            }
        }
    }

    fn render_flat(
        &mut self,
        command_buffer_builder: &mut AutoCommandBufferBuilder,
        scene: &Scene,
        model: Option<&ModelRef>,
        dynamic_state: &DynamicState,
        descriptor_pool: &mut Arc<StdDescriptorPool>,
    ) {
        let proj_view = scene.projection_matrix() * scene.view_matrix();
        let pipeline = if scene.wireframe {
            self.flat_wireframe.clone()
        } else {
            self.flat.clone()
        };

        if let Some(model) = model {
            let mvp = proj_view * model.data.read().matrix();
            for group in &model.model.groups {
                let material = group.material.unwrap_or_default();
                let data = flat_vs::ty::Data {
                    mvp: mvp.to_gl(),
                    diffuse_r: material.diffuse[0],
                    diffuse_g: material.diffuse[1],
                    diffuse_b: material.diffuse[2],
                };
                let uniform_buffer = self.flat_uniforms.next(data).unwrap();
                let layout = pipeline.descriptor_set_layout(0).unwrap();
                let set = Arc::new(
                    PersistentDescriptorSet::start(layout.clone())
                        .add_buffer(uniform_buffer)
                        .unwrap()
                        .build_with_pool(descriptor_pool)
                        .unwrap(),
                );
                command_buffer_builder
                    .draw_indexed(
                        pipeline.clone(),
                        dynamic_state,
                        vec![model.model.vertex_buffer.clone()],
                        group.index.clone(),
                        set,
                        (),
                    )
                    .unwrap();
            }
        }

        // the ground plane sits fixed in the world, so its MVP skips the
        // model transform; it also ignores the wireframe toggle
        let data = flat_vs::ty::Data {
            mvp: proj_view.to_gl(),
            diffuse_r: 1.0,
            diffuse_g: 1.0,
            diffuse_b: 1.0,
        };
        let uniform_buffer = self.flat_uniforms.next(data).unwrap();
        let layout = self.flat.descriptor_set_layout(0).unwrap();
        let set = Arc::new(
            PersistentDescriptorSet::start(layout.clone())
                .add_buffer(uniform_buffer)
                .unwrap()
                .build_with_pool(descriptor_pool)
                .unwrap(),
        );
        command_buffer_builder
            .draw(
                self.flat.clone(),
                dynamic_state,
                vec![self.plane_vertices.clone()],
                set,
                (),
            )
            .unwrap();
    }

    fn render_phong(
        &mut self,
        command_buffer_builder: &mut AutoCommandBufferBuilder,
        scene: &Scene,
        model: Option<&ModelRef>,
        dimensions: [f32; 2],
        descriptor_pool: &mut Arc<StdDescriptorPool>,
    ) {
        let model = match model {
            Some(model) => model,
            None => return,
        };
        let model_matrix = model.data.read().matrix();
        let mvp = scene.projection_matrix() * scene.view_matrix() * model_matrix;

        for group in &model.model.groups {
            let material = group.material.unwrap_or_default();
            // left half: lighting evaluated per vertex; right half: per pixel
            for &(per_pixel, right_half) in &[(0, false), (1, true)] {
                let data = phong_uniform(scene, mvp, model_matrix, &material, per_pixel);
                let uniform_buffer = self.phong_uniforms.next(data).unwrap();
                let layout = self.phong.descriptor_set_layout(0).unwrap();
                let set = Arc::new(
                    PersistentDescriptorSet::start(layout.clone())
                        .add_buffer(uniform_buffer)
                        .unwrap()
                        .build_with_pool(descriptor_pool)
                        .unwrap(),
                );
                let dynamic_state = half_viewport(dimensions, right_half);
                command_buffer_builder
                    .draw_indexed(
                        self.phong.clone(),
                        &dynamic_state,
                        vec![model.model.vertex_buffer.clone()],
                        group.index.clone(),
                        set,
                        (),
                    )
                    .unwrap();
            }
        }
    }
}

/// A dynamic state covering one horizontal half of the viewport, Y-flipped
/// like the full-frame viewport in the render pipeline.
fn half_viewport(dimensions: [f32; 2], right_half: bool) -> DynamicState {
    let half = dimensions[0] / 2.0;
    let origin_x = if right_half { half } else { 0.0 };
    DynamicState {
        viewports: Some(vec![Viewport {
            origin: [origin_x, dimensions[1]],
            dimensions: [half, -dimensions[1]],
            depth_range: 0.0..1.0,
        }]),
        ..DynamicState::none()
    }
}

fn phong_uniform(
    scene: &Scene,
    mvp: Matrix4,
    model: Matrix4,
    material: &Material,
    per_pixel: i32,
) -> phong_vs::ty::Data {
    let camera = scene.camera.position;
    let light = scene.lights.active_source();
    let spot = scene.lights.spot;

    phong_vs::ty::Data {
        mvp: mvp.to_gl(),
        model: model.to_gl(),

        camera_x: camera.x,
        camera_y: camera.y,
        camera_z: camera.z,

        light_x: light.position.x,
        light_y: light.position.y,
        light_z: light.position.z,
        light_ambient_r: light.ambient.x,
        light_ambient_g: light.ambient.y,
        light_ambient_b: light.ambient.z,
        light_diffuse_r: light.diffuse.x,
        light_diffuse_g: light.diffuse.y,
        light_diffuse_b: light.diffuse.z,
        light_specular_r: light.specular.x,
        light_specular_g: light.specular.y,
        light_specular_b: light.specular.z,
        attenuation_constant: light.constant_attenuation,
        attenuation_linear: light.linear_attenuation,
        attenuation_quadratic: light.quadratic_attenuation,

        spot_direction_x: spot.direction.x,
        spot_direction_y: spot.direction.y,
        spot_direction_z: spot.direction.z,
        spot_exponent: spot.exponent,
        spot_cutoff: spot.cutoff,

        material_ambient_r: material.ambient[0],
        material_ambient_g: material.ambient[1],
        material_ambient_b: material.ambient[2],
        material_diffuse_r: material.diffuse[0],
        material_diffuse_g: material.diffuse[1],
        material_diffuse_b: material.diffuse[2],
        material_specular_r: material.specular[0],
        material_specular_g: material.specular[1],
        material_specular_b: material.specular[2],
        shininess: scene.lights.shininess,

        light_mode: scene.lights.active as i32,
        per_pixel,
    }
}

pub mod flat_vs {
    vulkano_shaders::shader! {
        ty: "vertex",
        src: "#version 450

layout(location = 0) in vec3 position_in;
layout(location = 1) in vec3 color_in;
layout(location = 2) in vec3 normal_in;

layout(location = 0) out vec3 fragment_color;

layout(set = 0, binding = 0) uniform Data {
    mat4 mvp;
    float diffuse_r;
    float diffuse_g;
    float diffuse_b;
} uniforms;

void main() {
    gl_Position = uniforms.mvp * vec4(position_in, 1.0);
    fragment_color = color_in * vec3(uniforms.diffuse_r, uniforms.diffuse_g, uniforms.diffuse_b);
}
"
    }
}

pub mod flat_fs {
    vulkano_shaders::shader! {
        ty: "fragment",
        src: "#version 450

layout(location = 0) in vec3 fragment_color;

layout(location = 0) out vec4 f_color;

void main() {
    f_color = vec4(fragment_color, 1.0);
}
"
    }
}

pub mod phong_vs {
    vulkano_shaders::shader! {
        ty: "vertex",
        src: "#version 450

layout(location = 0) in vec3 position_in;
layout(location = 1) in vec3 color_in;
layout(location = 2) in vec3 normal_in;

layout(location = 0) out vec3 fragment_normal;
layout(location = 1) out vec3 fragment_world;
layout(location = 2) out vec3 fragment_lit;

layout(set = 0, binding = 0) uniform Data {
    mat4 mvp;
    mat4 model;

    float camera_x;
    float camera_y;
    float camera_z;

    float light_x;
    float light_y;
    float light_z;
    float light_ambient_r;
    float light_ambient_g;
    float light_ambient_b;
    float light_diffuse_r;
    float light_diffuse_g;
    float light_diffuse_b;
    float light_specular_r;
    float light_specular_g;
    float light_specular_b;
    float attenuation_constant;
    float attenuation_linear;
    float attenuation_quadratic;

    float spot_direction_x;
    float spot_direction_y;
    float spot_direction_z;
    float spot_exponent;
    float spot_cutoff;

    float material_ambient_r;
    float material_ambient_g;
    float material_ambient_b;
    float material_diffuse_r;
    float material_diffuse_g;
    float material_diffuse_b;
    float material_specular_r;
    float material_specular_g;
    float material_specular_b;
    float shininess;

    int light_mode;
    int per_pixel;
} uniforms;

vec3 phong(vec3 normal, vec3 world_pos) {
    vec3 n = normalize(normal);
    vec3 view_dir = normalize(vec3(uniforms.camera_x, uniforms.camera_y, uniforms.camera_z) - world_pos);
    vec3 light_pos = vec3(uniforms.light_x, uniforms.light_y, uniforms.light_z);

    vec3 light_dir;
    float attenuation = 1.0;
    if (uniforms.light_mode == 0) {
        light_dir = normalize(light_pos);
    } else {
        light_dir = normalize(light_pos - world_pos);
        float d = length(light_pos - world_pos);
        attenuation = 1.0 / (uniforms.attenuation_constant
            + uniforms.attenuation_linear * d
            + uniforms.attenuation_quadratic * d * d);
        if (uniforms.light_mode == 2) {
            vec3 spot_dir = normalize(vec3(uniforms.spot_direction_x, uniforms.spot_direction_y, uniforms.spot_direction_z));
            float cos_v = dot(normalize(world_pos - light_pos), spot_dir);
            if (cos_v < cos(radians(uniforms.spot_cutoff))) {
                attenuation = 0.0;
            } else {
                attenuation *= pow(max(cos_v, 0.0), uniforms.spot_exponent);
            }
        }
    }

    vec3 ambient = vec3(uniforms.light_ambient_r, uniforms.light_ambient_g, uniforms.light_ambient_b)
        * vec3(uniforms.material_ambient_r, uniforms.material_ambient_g, uniforms.material_ambient_b);
    float diff = max(dot(n, light_dir), 0.0);
    vec3 diffuse = vec3(uniforms.light_diffuse_r, uniforms.light_diffuse_g, uniforms.light_diffuse_b)
        * diff
        * vec3(uniforms.material_diffuse_r, uniforms.material_diffuse_g, uniforms.material_diffuse_b);
    vec3 halfway = normalize(light_dir + view_dir);
    float spec = pow(max(dot(n, halfway), 0.0), uniforms.shininess);
    vec3 specular = vec3(uniforms.light_specular_r, uniforms.light_specular_g, uniforms.light_specular_b)
        * spec
        * vec3(uniforms.material_specular_r, uniforms.material_specular_g, uniforms.material_specular_b);

    return ambient + attenuation * (diffuse + specular);
}

void main() {
    vec4 world = uniforms.model * vec4(position_in, 1.0);
    gl_Position = uniforms.mvp * vec4(position_in, 1.0);
    fragment_world = world.xyz;
    fragment_normal = transpose(inverse(mat3(uniforms.model))) * normal_in;
    if (uniforms.per_pixel == 0) {
        fragment_lit = phong(fragment_normal, fragment_world);
    } else {
        fragment_lit = vec3(0.0);
    }
}
"
    }
}

pub mod phong_fs {
    vulkano_shaders::shader! {
        ty: "fragment",
        src: "#version 450

layout(location = 0) in vec3 fragment_normal;
layout(location = 1) in vec3 fragment_world;
layout(location = 2) in vec3 fragment_lit;

layout(location = 0) out vec4 f_color;

layout(set = 0, binding = 0) uniform Data {
    mat4 mvp;
    mat4 model;

    float camera_x;
    float camera_y;
    float camera_z;

    float light_x;
    float light_y;
    float light_z;
    float light_ambient_r;
    float light_ambient_g;
    float light_ambient_b;
    float light_diffuse_r;
    float light_diffuse_g;
    float light_diffuse_b;
    float light_specular_r;
    float light_specular_g;
    float light_specular_b;
    float attenuation_constant;
    float attenuation_linear;
    float attenuation_quadratic;

    float spot_direction_x;
    float spot_direction_y;
    float spot_direction_z;
    float spot_exponent;
    float spot_cutoff;

    float material_ambient_r;
    float material_ambient_g;
    float material_ambient_b;
    float material_diffuse_r;
    float material_diffuse_g;
    float material_diffuse_b;
    float material_specular_r;
    float material_specular_g;
    float material_specular_b;
    float shininess;

    int light_mode;
    int per_pixel;
} uniforms;

vec3 phong(vec3 normal, vec3 world_pos) {
    vec3 n = normalize(normal);
    vec3 view_dir = normalize(vec3(uniforms.camera_x, uniforms.camera_y, uniforms.camera_z) - world_pos);
    vec3 light_pos = vec3(uniforms.light_x, uniforms.light_y, uniforms.light_z);

    vec3 light_dir;
    float attenuation = 1.0;
    if (uniforms.light_mode == 0) {
        light_dir = normalize(light_pos);
    } else {
        light_dir = normalize(light_pos - world_pos);
        float d = length(light_pos - world_pos);
        attenuation = 1.0 / (uniforms.attenuation_constant
            + uniforms.attenuation_linear * d
            + uniforms.attenuation_quadratic * d * d);
        if (uniforms.light_mode == 2) {
            vec3 spot_dir = normalize(vec3(uniforms.spot_direction_x, uniforms.spot_direction_y, uniforms.spot_direction_z));
            float cos_v = dot(normalize(world_pos - light_pos), spot_dir);
            if (cos_v < cos(radians(uniforms.spot_cutoff))) {
                attenuation = 0.0;
            } else {
                attenuation *= pow(max(cos_v, 0.0), uniforms.spot_exponent);
            }
        }
    }

    vec3 ambient = vec3(uniforms.light_ambient_r, uniforms.light_ambient_g, uniforms.light_ambient_b)
        * vec3(uniforms.material_ambient_r, uniforms.material_ambient_g, uniforms.material_ambient_b);
    float diff = max(dot(n, light_dir), 0.0);
    vec3 diffuse = vec3(uniforms.light_diffuse_r, uniforms.light_diffuse_g, uniforms.light_diffuse_b)
        * diff
        * vec3(uniforms.material_diffuse_r, uniforms.material_diffuse_g, uniforms.material_diffuse_b);
    vec3 halfway = normalize(light_dir + view_dir);
    float spec = pow(max(dot(n, halfway), 0.0), uniforms.shininess);
    vec3 specular = vec3(uniforms.light_specular_r, uniforms.light_specular_g, uniforms.light_specular_b)
        * spec
        * vec3(uniforms.material_specular_r, uniforms.material_specular_g, uniforms.material_specular_b);

    return ambient + attenuation * (diffuse + specular);
}

void main() {
    if (uniforms.per_pixel != 0) {
        f_color = vec4(phong(fragment_normal, fragment_world), 1.0);
    } else {
        f_color = vec4(fragment_lit, 1.0);
    }
}
"
    }
}
