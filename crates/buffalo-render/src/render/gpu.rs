//! wgpu surface bound to a winit window.
//!
//! Draw commands are tessellated into a single triangle list (two triangles
//! per rectangle, a fan of [`CIRCLE_SEGMENTS`] triangles per disc) and drawn
//! with one pipeline. A uniform [`PixelProjection`] maps the board's pixel
//! space onto clip space, so the board fills the window even if the platform
//! hands back a differently sized surface.
//!
//! This module is feature-gated behind `window`.

use std::f32::consts::TAU;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use super::scene::{Color, DrawCommand, Shape, BACKGROUND};
use super::surface::{RenderError, Surface, SurfaceSize};
use crate::display::DisplayError;

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// A single vertex with 2D pixel position and RGBA color, sent to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 2],
    color: [f32; 4],
}

impl Vertex {
    /// Vertex buffer layout for the shader.
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// PixelProjection
// ---------------------------------------------------------------------------

/// Orthographic projection from pixel space to clip space.
///
/// Pixel space has its origin at the top-left corner with y growing
/// downwards; clip space has y growing upwards, so the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelProjection {
    pub width: f32,
    pub height: f32,
}

impl PixelProjection {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            width: size.width.max(1) as f32,
            height: size.height.max(1) as f32,
        }
    }

    /// Column-major 4x4 matrix mapping `[0, width] x [0, height]` to
    /// `[-1, 1] x [1, -1]`.
    pub fn orthographic_matrix(&self) -> [f32; 16] {
        let sx = 2.0 / self.width;
        let sy = -2.0 / self.height;
        [
            sx, 0.0, 0.0, 0.0, // column 0
            0.0, sy, 0.0, 0.0, // column 1
            0.0, 0.0, 1.0, 0.0, // column 2
            -1.0, 1.0, 0.0, 1.0, // column 3
        ]
    }
}

// ---------------------------------------------------------------------------
// Tessellation
// ---------------------------------------------------------------------------

/// Triangles per disc.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Initial vertex buffer capacity. Grows on demand.
const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;

/// Convert an 8-bit sRGB color to the float color the shader writes.
///
/// sRGB render targets expect linear values and re-encode on store, so the
/// channels are linearized first. Alpha is always linear.
fn vertex_color(color: Color, srgb_target: bool) -> [f32; 4] {
    let channel = |c: u8| {
        let v = f32::from(c) / 255.0;
        if !srgb_target {
            v
        } else if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    [
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        f32::from(color[3]) / 255.0,
    ]
}

/// Expand draw commands into a triangle list, preserving draw order.
pub(crate) fn tessellate(commands: &[DrawCommand], srgb_target: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for cmd in commands {
        let color = vertex_color(cmd.color, srgb_target);
        let v = |x: f32, y: f32| Vertex {
            position: [x, y],
            color,
        };
        match cmd.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => {
                let (x1, y1) = (x + width, y + height);
                vertices.extend_from_slice(&[
                    v(x, y),
                    v(x1, y),
                    v(x1, y1),
                    v(x, y),
                    v(x1, y1),
                    v(x, y1),
                ]);
            }
            Shape::Circle { cx, cy, radius } => {
                for i in 0..CIRCLE_SEGMENTS {
                    let a0 = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                    let a1 = TAU * (i + 1) as f32 / CIRCLE_SEGMENTS as f32;
                    vertices.extend_from_slice(&[
                        v(cx, cy),
                        v(cx + radius * a0.cos(), cy + radius * a0.sin()),
                        v(cx + radius * a1.cos(), cy + radius * a1.sin()),
                    ]);
                }
            }
        }
    }
    vertices
}

// ---------------------------------------------------------------------------
// GpuSurface
// ---------------------------------------------------------------------------

/// wgpu surface presenting frames to a window.
///
/// Created by the `window` display driver once the window exists. The
/// surface keeps the window alive through its `Arc`.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    projection_bind_group: wgpu::BindGroup,
    window: Arc<winit::window::Window>,
    /// Board size in pixels, fixed at creation.
    board_size: SurfaceSize,
}

impl GpuSurface {
    /// Initialize wgpu for `window`: surface, device, queue, pipeline.
    ///
    /// `board_size` is the pixel extent of the scene. The swapchain follows
    /// the window's actual inner size and the projection stretches the board
    /// over it.
    ///
    /// This is an async function because wgpu adapter/device selection is
    /// asynchronous. Call with `.await` or use `pollster::block_on`.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Renderer`] if the surface cannot be created or
    /// no suitable adapter or device is available.
    pub async fn new(
        window: Arc<winit::window::Window>,
        board_size: SurfaceSize,
    ) -> Result<Self, DisplayError> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| DisplayError::Renderer(format!("surface creation failed: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| DisplayError::Renderer("no suitable GPU adapter found".to_owned()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("buffalo_board_renderer"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| DisplayError::Renderer(format!("device request failed: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| DisplayError::Renderer("surface reports no formats".to_owned()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("board_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let projection = PixelProjection::new(board_size);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_uniform"),
            contents: bytemuck::cast_slice(&projection.orthographic_matrix()),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let projection_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("projection_bind_group_layout"),
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

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bind_group"),
            layout: &projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("board_pipeline_layout"),
            bind_group_layouts: &[&projection_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("board_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        tracing::debug!(
            width,
            height,
            format = ?surface_format,
            backend = ?adapter.get_info().backend,
            "GPU surface configured"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            projection_bind_group,
            window,
            board_size,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vertex_buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Render and present one frame.
    ///
    /// # Errors
    ///
    /// Returns a [`wgpu::SurfaceError`] if the surface cannot provide an
    /// output texture (e.g., window minimized, surface lost).
    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), wgpu::SurfaceError> {
        let window_size = self.window.inner_size();
        if window_size.width != self.config.width || window_size.height != self.config.height {
            self.resize(window_size);
        }

        let vertices = tessellate(commands, self.config.format.is_srgb());
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.device, self.vertex_capacity);
            tracing::debug!(capacity = self.vertex_capacity, "vertex buffer grown");
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("board_encoder"),
            });

        {
            let [r, g, b, a] = vertex_color(BACKGROUND, self.config.format.is_srgb());
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("board_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: f64::from(a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.projection_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            let vertex_count = vertices.len() as u32;
            if vertex_count > 0 {
                render_pass.draw(0..vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the swapchain for a new window size. Zero-sized windows
    /// (minimized) are ignored.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Get a reference to the window.
    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }
}

impl Surface for GpuSurface {
    fn size(&self) -> SurfaceSize {
        self.board_size
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), RenderError> {
        match self.draw(commands) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated -- reconfiguring, frame skipped");
                let size = self.window.inner_size();
                self.resize(size);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(e) => {
                tracing::warn!(error = %e, "surface error during render -- frame skipped");
                Ok(())
            }
        }
    }
}
