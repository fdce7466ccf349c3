//! Accelerated (GPU) backend
//!
//! Rebuilds an instanced point layer from the full point array every frame:
//! positions are projected on the CPU with the shared mapping, uploaded as an
//! instance buffer, and expanded to screen-space quads in the vertex shader.
//! A fixed radius scale and a minimum on-screen radius mirror the usual
//! scatterplot-layer controls.

use wgpu::util::DeviceExt;

use whorl_points::{PolarPoint, Viewport};

use crate::backend::{
    acquire_frame, wgpu_clear_color, BackendSettings, RenderBackend, RenderError,
};
use crate::context::RenderContext;
use crate::mode::ViewMode;

/// Base point radius in pixels before the radius scale is applied.
const BASE_RADIUS: f32 = 1.0;
/// Two triangles per point quad.
const VERTICES_PER_INSTANCE: u32 = 6;

/// Per-point instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    /// Position in pixels relative to the viewport center
    pub position: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
struct PointUniforms {
    /// Viewport size in pixels
    viewport: [f32; 2],
    /// Disc center in pixels
    center: [f32; 2],
    /// Fill color, RGBA in [0, 1]
    color: [f32; 4],
    /// On-screen point radius in pixels, already scaled and clamped
    radius: f32,
    _padding: [f32; 3],
}

/// Project the point set into per-instance GPU data.
pub fn build_instances(points: &[PolarPoint], viewport: &Viewport) -> Vec<PointInstance> {
    points
        .iter()
        .map(|point| PointInstance {
            position: point.to_cartesian(viewport.size),
        })
        .collect()
}

/// Effective on-screen radius: scaled base radius, clamped from below.
pub fn effective_radius(settings: &BackendSettings) -> f32 {
    (BASE_RADIUS * settings.radius_scale).max(settings.radius_min_pixels)
}

pub struct AcceleratedBackend {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: Option<wgpu::Buffer>,
    instance_capacity: usize,
    settings: BackendSettings,
}

impl AcceleratedBackend {
    pub fn new(ctx: &RenderContext, settings: BackendSettings) -> Self {
        let device = &ctx.device;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Bind Group Layout"),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_source = include_str!("../shaders/points.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::instance_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
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
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Point Uniform Buffer"),
            contents: bytemuck::bytes_of(&PointUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Point Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instance_buffer: None,
            instance_capacity: 0,
            settings,
        }
    }

    /// Instance buffer layout for [`PointInstance`]
    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // position: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
            ],
        }
    }

    /// Upload this frame's instances, growing the buffer when needed.
    fn upload_instances(&mut self, ctx: &RenderContext, instances: &[PointInstance]) {
        if self.instance_buffer.is_none() || self.instance_capacity < instances.len() {
            self.instance_buffer = Some(ctx.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Point Instance Buffer"),
                    contents: bytemuck::cast_slice(instances),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                },
            ));
            self.instance_capacity = instances.len();
        } else if let Some(buffer) = &self.instance_buffer {
            ctx.queue
                .write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        }
    }
}

impl RenderBackend for AcceleratedBackend {
    fn mode(&self) -> ViewMode {
        ViewMode::Accelerated
    }

    fn draw(
        &mut self,
        ctx: &RenderContext,
        points: &[PolarPoint],
        viewport: &Viewport,
    ) -> Result<(), RenderError> {
        if points.is_empty() {
            return Ok(());
        }

        // Rebuild the layer from the full point array, every frame.
        let instances = build_instances(points, viewport);
        self.upload_instances(ctx, &instances);

        let color = self.settings.accelerated_color;
        let uniforms = PointUniforms {
            viewport: [viewport.width as f32, viewport.height as f32],
            center: viewport.center(),
            color: [
                color[0] as f32 / 255.0,
                color[1] as f32 / 255.0,
                color[2] as f32 / 255.0,
                color[3] as f32 / 255.0,
            ],
            radius: effective_radius(&self.settings),
            _padding: [0.0; 3],
        };
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let output = acquire_frame(ctx)?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Point Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu_clear_color(self.settings.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            if let Some(buffer) = &self.instance_buffer {
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..VERTICES_PER_INSTANCE, 0..instances.len() as u32);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_use_shared_mapping() {
        let viewport = Viewport::from_window(200, 200);
        let points = vec![PolarPoint::new(0.5, 0.0), PolarPoint::new(1.0, 90.0)];

        let instances = build_instances(&points, &viewport);

        assert_eq!(instances.len(), 2);
        assert!((instances[0].position[0] - 50.0).abs() < 1e-4);
        assert!(instances[0].position[1].abs() < 1e-4);
        assert!(instances[1].position[0].abs() < 1e-3);
        assert!((instances[1].position[1] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_point_set_builds_no_instances() {
        let viewport = Viewport::from_window(200, 200);
        assert!(build_instances(&[], &viewport).is_empty());
    }

    #[test]
    fn test_effective_radius_scales_then_clamps() {
        let mut settings = BackendSettings::default();
        assert_eq!(effective_radius(&settings), 2.0);

        settings.radius_scale = 0.1;
        settings.radius_min_pixels = 0.25;
        assert_eq!(effective_radius(&settings), 0.25);
    }

    #[test]
    fn test_uniforms_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<PointUniforms>() % 16, 0);
    }

    #[test]
    fn test_instance_stride_matches_layout() {
        let layout = AcceleratedBackend::instance_buffer_layout();
        assert_eq!(
            layout.array_stride,
            std::mem::size_of::<PointInstance>() as u64
        );
    }
}
