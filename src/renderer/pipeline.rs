//! WebGPU render pipeline setup
//!
//! Vertices stay in world units. A small view uniform carries the world
//! rectangle, and the vertex shader maps it onto the viewport, so a resize
//! only rewrites 16 bytes. The vertex buffer is reused between frames and
//! grows by doubling when a frame needs more room.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::vertex::Vertex;
use crate::sim::WorldBounds;

/// Backdrop purple behind the world rectangle
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.55,
    g: 0.23,
    b: 0.9,
    a: 1.0,
};

/// Vertices the first buffer can hold before it has to grow
const INITIAL_VERTEX_CAPACITY: u64 = 4096;

/// World rectangle as the vertex shader sees it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    pub center: [f32; 2],
    pub inv_half_size: [f32; 2],
}

impl ViewUniform {
    pub fn from_world(world: &WorldBounds) -> Self {
        let hx = world.half_size.x.max(f32::EPSILON);
        let hy = world.half_size.y.max(f32::EPSILON);
        Self {
            center: world.center.to_array(),
            inv_half_size: [1.0 / hx, 1.0 / hy],
        }
    }

    /// CPU mirror of `vs_main`
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.center[0]) * self.inv_half_size[0],
            (y - self.center[1]) * self.inv_half_size[1],
        )
    }
}

/// Buffer size (in vertices) able to hold `needed`, doubling from `current`
pub fn grown_capacity(current: u64, needed: u64) -> u64 {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    view_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    /// Vertices `vertex_buffer` can hold
    vertex_capacity: u64,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// World rectangle mapped onto the full viewport
    pub world: WorldBounds,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("star-shooter-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let config = surface_config(&surface, adapter, width, height);
        surface.configure(&device, &config);

        let world = WorldBounds::from_viewport(width, height);
        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("view_uniform"),
            contents: bytemuck::bytes_of(&ViewUniform::from_world(&world)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let view_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("view_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("view_bind_group"),
            layout: &view_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        let pipeline = create_pipeline(&device, &view_layout, config.format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        log::info!(
            "Render pipeline ready ({width}x{height}, {:?})",
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            view_buffer,
            view_bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            world,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.size = (new_width, new_height);
        self.config.width = new_width;
        self.config.height = new_height;
        self.surface.configure(&self.device, &self.config);

        self.world = WorldBounds::from_viewport(new_width, new_height);
        self.queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::bytes_of(&ViewUniform::from_world(&self.world)),
        );
    }

    /// Upload world-space triangles and draw them over the clear colour
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let needed = vertices.len() as u64;
        if needed > self.vertex_capacity {
            self.vertex_capacity = grown_capacity(self.vertex_capacity, needed);
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !vertices.is_empty() {
                let bytes = needed * std::mem::size_of::<Vertex>() as u64;
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.view_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..needed as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn surface_config(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> wgpu::SurfaceConfiguration {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or(caps.formats.first())
        .copied()
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    view_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shape_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shape_pipeline_layout"),
        bind_group_layouts: &[view_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shape_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are emitted with mixed winding
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("shape_vertices"),
        size: capacity * std::mem::size_of::<Vertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
