// SPDX-License-Identifier: MPL-2.0
//! GPU rendering of the current model using a custom wgpu shader.
//!
//! The pipeline keeps one vertex/index buffer pair alive and re-uploads it
//! only when the committed load generation changes, so orbiting the camera
//! never touches mesh memory. Every surface is drawn with the shared
//! normal-visualization material: the view-space normal mapped to RGB,
//! modulated by the scene's fixed ambient + directional light pair.

use crate::assets::{CpuMesh, Vertex};
use iced::widget::shader::{self, Viewport};
use iced::{mouse, Rectangle};
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// The scene's fixed light pair. The directional light sits where the
/// original scene placed it and both intensities match its constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: f32,
    pub directional_intensity: f32,
    pub direction: glam::Vec3,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: 0.5,
            directional_intensity: 1.0,
            direction: glam::Vec3::new(2.0, 2.0, 5.0).normalize(),
        }
    }
}

/// Uniform block shared by the vertex and fragment stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    light_dir: [f32; 4],
    // x: ambient intensity, y: directional intensity
    light_params: [f32; 4],
}

impl Uniforms {
    fn new(view: glam::Mat4, proj: glam::Mat4, lights: &Lights) -> Self {
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            light_dir: [
                lights.direction.x,
                lights.direction.y,
                lights.direction.z,
                0.0,
            ],
            light_params: [lights.ambient, lights.directional_intensity, 0.0, 0.0],
        }
    }
}

/// Shader program rendering one model with the current camera matrices.
#[derive(Debug, Clone)]
pub struct ModelScene {
    pub mesh: Arc<CpuMesh>,
    /// Load generation of `mesh`; bumping it triggers a GPU re-upload.
    pub generation: u64,
    pub view: glam::Mat4,
    pub projection: glam::Mat4,
    pub lights: Lights,
}

impl<Message> shader::Program<Message> for ModelScene {
    type State = ();
    type Primitive = ModelPrimitive;

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        _bounds: Rectangle,
    ) -> Self::Primitive {
        ModelPrimitive {
            mesh: self.mesh.clone(),
            generation: self.generation,
            uniforms: Uniforms::new(self.view, self.projection, &self.lights),
        }
    }
}

/// Per-frame rendering primitive for the model scene.
#[derive(Debug, Clone)]
pub struct ModelPrimitive {
    mesh: Arc<CpuMesh>,
    generation: u64,
    uniforms: Uniforms,
}

impl shader::Primitive for ModelPrimitive {
    type Pipeline = ModelPipeline;

    fn prepare(
        &self,
        pipeline: &mut Self::Pipeline,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bounds: &Rectangle,
        viewport: &Viewport,
    ) {
        pipeline.store_physical_bounds(bounds, viewport);
        pipeline.ensure_depth_texture(device, viewport);
        pipeline.upload_mesh(device, self.generation, &self.mesh);
        queue.write_buffer(
            &pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );
    }

    fn render(
        &self,
        pipeline: &Self::Pipeline,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        pipeline.render(encoder, target, clip_bounds);
    }
}

/// The wgpu pipeline for model rendering.
pub struct ModelPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    uploaded_generation: Option<u64>,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
    // Full widget bounds in physical pixels, stored in prepare() because
    // render() only receives the visible clip_bounds.
    widget_physical_bounds: Rectangle<f32>,
}

impl shader::Pipeline for ModelPipeline {
    fn new(device: &wgpu::Device, _queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Model Shader"),
            source: wgpu::ShaderSource::Wgsl(MODEL_SHADER.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Model Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
            uploaded_generation: None,
            depth_texture: None,
            depth_size: (0, 0),
            widget_physical_bounds: Rectangle::default(),
        }
    }
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

impl ModelPipeline {
    /// Converts logical widget bounds to physical pixels for render().
    fn store_physical_bounds(&mut self, bounds: &Rectangle, viewport: &Viewport) {
        let scale = viewport.scale_factor();
        self.widget_physical_bounds = Rectangle {
            x: bounds.x * scale,
            y: bounds.y * scale,
            width: bounds.width * scale,
            height: bounds.height * scale,
        };
    }

    /// The depth attachment must match the frame's color attachment size,
    /// so it is recreated whenever the window is resized.
    fn ensure_depth_texture(&mut self, device: &wgpu::Device, viewport: &Viewport) {
        let size = viewport.physical_size();
        let new_size = (size.width, size.height);
        if self.depth_texture.is_some() && self.depth_size == new_size {
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Model Depth Texture"),
            size: wgpu::Extent3d {
                width: new_size.0.max(1),
                height: new_size.1.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth_texture = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.depth_size = new_size;
    }

    /// Uploads the mesh when the load generation changes. Replacing the
    /// buffers drops the previous model's GPU memory.
    fn upload_mesh(&mut self, device: &wgpu::Device, generation: u64, mesh: &CpuMesh) {
        if self.uploaded_generation == Some(generation) {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Model Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Model Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        self.index_count = mesh.indices.len() as u32;
        self.uploaded_generation = Some(generation);
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        let (Some(vertex_buffer), Some(index_buffer), Some(depth_view)) = (
            self.vertex_buffer.as_ref(),
            self.index_buffer.as_ref(),
            self.depth_texture.as_ref(),
        ) else {
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Model Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        // The projection was built for the widget's aspect ratio, so the
        // viewport covers the full widget and the scissor rect clips to the
        // visible portion.
        let wb = &self.widget_physical_bounds;
        render_pass.set_viewport(wb.x, wb.y, wb.width, wb.height, 0.0, 1.0);
        render_pass.set_scissor_rect(
            clip_bounds.x,
            clip_bounds.y,
            clip_bounds.width,
            clip_bounds.height,
        );

        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// WGSL shader implementing the normal-visualization material.
const MODEL_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    light_dir: vec4<f32>,
    light_params: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) view_normal: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = uniforms.view_proj * vec4<f32>(input.position, 1.0);
    output.view_normal = (uniforms.view * vec4<f32>(input.normal, 0.0)).xyz;
    output.world_normal = input.normal;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    // View-space normal mapped into RGB, the normal-visualization material.
    let n = normalize(input.view_normal);
    let base = n * 0.5 + vec3<f32>(0.5, 0.5, 0.5);

    // Fixed ambient + directional light pair.
    let diffuse = max(dot(normalize(input.world_normal), uniforms.light_dir.xyz), 0.0);
    let intensity = min(
        uniforms.light_params.x + uniforms.light_params.y * diffuse,
        1.0,
    );

    return vec4<f32>(base * intensity, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lights_match_scene_constants() {
        let lights = Lights::default();
        assert_eq!(lights.ambient, 0.5);
        assert_eq!(lights.directional_intensity, 1.0);
        assert!((lights.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn uniforms_pack_light_parameters() {
        let lights = Lights::default();
        let uniforms = Uniforms::new(glam::Mat4::IDENTITY, glam::Mat4::IDENTITY, &lights);
        assert_eq!(uniforms.light_params[0], 0.5);
        assert_eq!(uniforms.light_params[1], 1.0);
        assert_eq!(uniforms.view_proj, glam::Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn uniform_block_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }
}
