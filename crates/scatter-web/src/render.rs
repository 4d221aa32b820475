pub mod helpers;

use crate::labels::LabelBitmap;
use helpers::PipelineDesc;
use scatter_core::{
    LabelInstance, LineVertex, SceneUniforms, SphereInstance, LABELS_WGSL, LINES_WGSL,
    MARKERS_WGSL,
};
use web_sys as web;
use wgpu;
use wgpu::util::DeviceExt;

// Two triangles spanning [-0.5, 0.5]^2, shared by markers and labels.
const QUAD: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const SPHERE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];
const LABEL_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32x2];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRS,
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,

    sphere_pipeline: wgpu::RenderPipeline,
    sphere_vb: wgpu::Buffer,

    line_pipeline: wgpu::RenderPipeline,
    line_vb: wgpu::Buffer,
    line_count: u32,

    label_pipeline: wgpu::RenderPipeline,
    label_bgl: wgpu::BindGroupLayout,
    label_sampler: wgpu::Sampler,
    // one per label texture: marker labels first, then axis labels
    label_bind_groups: Vec<wgpu::BindGroup>,
    label_vb: wgpu::Buffer,

    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, axes: &[LineVertex]) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = helpers::create_depth_texture(&device, width, height);

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let label_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("label_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let label_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("label_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let label_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_labels"),
            bind_group_layouts: &[&scene_bgl, &label_bgl],
            push_constant_ranges: &[],
        });

        let markers_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers.wgsl"),
            source: wgpu::ShaderSource::Wgsl(MARKERS_WGSL.into()),
        });
        let labels_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("labels.wgsl"),
            source: wgpu::ShaderSource::Wgsl(LABELS_WGSL.into()),
        });
        let lines_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines.wgsl"),
            source: wgpu::ShaderSource::Wgsl(LINES_WGSL.into()),
        });

        let sphere_pipeline = helpers::make_pipeline(
            &device,
            PipelineDesc {
                label: "sphere_pipeline",
                layout: &scene_layout,
                shader: &markers_shader,
                buffers: &[
                    quad_layout(),
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SphereInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &SPHERE_ATTRS,
                    },
                ],
                color_format: format,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                blend: None,
            },
        );
        let line_pipeline = helpers::make_pipeline(
            &device,
            PipelineDesc {
                label: "line_pipeline",
                layout: &scene_layout,
                shader: &lines_shader,
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &LINE_ATTRS,
                }],
                color_format: format,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                blend: None,
            },
        );
        // Labels always draw on top of the scene.
        let label_pipeline = helpers::make_pipeline(
            &device,
            PipelineDesc {
                label: "label_pipeline",
                layout: &label_layout,
                shader: &labels_shader,
                buffers: &[
                    quad_layout(),
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<LabelInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &LABEL_ATTRS,
                    },
                ],
                color_format: format,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let line_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line_vb"),
            contents: bytemuck::cast_slice(axes),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let empty_vb = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: 256,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let sphere_vb = empty_vb("sphere_vb");
        let label_vb = empty_vb("label_vb");

        log::info!("WebGPU ready: {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            scene_buffer,
            scene_bind_group,
            quad_vb,
            sphere_pipeline,
            sphere_vb,
            line_pipeline,
            line_vb,
            line_count: axes.len() as u32,
            label_pipeline,
            label_bgl,
            label_sampler,
            label_bind_groups: Vec::new(),
            label_vb,
            clear_color: wgpu::Color {
                r: 0.067,
                g: 0.067,
                b: 0.067,
                a: 1.0,
            },
        })
    }

    /// Upload label bitmaps in draw order. Replaces any earlier set.
    pub fn set_label_textures(&mut self, bitmaps: &[LabelBitmap]) {
        self.label_bind_groups = bitmaps
            .iter()
            .map(|bitmap| {
                let view = helpers::upload_label_texture(&self.device, &self.queue, bitmap);
                self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("label_bg"),
                    layout: &self.label_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.label_sampler),
                        },
                    ],
                })
            })
            .collect();
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) = helpers::create_depth_texture(&self.device, width, height);
        self.depth_view = depth_view;
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        uniforms: &SceneUniforms,
        spheres: &[SphereInstance],
        labels: &[LabelInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(uniforms));
        let sphere_bytes: &[u8] = bytemuck::cast_slice(spheres);
        helpers::ensure_vertex_capacity(&self.device, &mut self.sphere_vb, "sphere_vb", sphere_bytes.len() as u64);
        if !sphere_bytes.is_empty() {
            self.queue.write_buffer(&self.sphere_vb, 0, sphere_bytes);
        }
        let label_count = labels.len().min(self.label_bind_groups.len());
        let label_bytes: &[u8] = bytemuck::cast_slice(&labels[..label_count]);
        helpers::ensure_vertex_capacity(&self.device, &mut self.label_vb, "label_vb", label_bytes.len() as u64);
        if !label_bytes.is_empty() {
            self.queue.write_buffer(&self.label_vb, 0, label_bytes);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_vb.slice(..));
            rpass.draw(0..self.line_count, 0..1);

            if !spheres.is_empty() {
                rpass.set_pipeline(&self.sphere_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.sphere_vb.slice(..));
                rpass.draw(0..QUAD.len() as u32, 0..spheres.len() as u32);
            }

            if label_count > 0 {
                rpass.set_pipeline(&self.label_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.label_vb.slice(..));
                for (i, bg) in self.label_bind_groups.iter().take(label_count).enumerate() {
                    let i = i as u32;
                    rpass.set_bind_group(1, bg, &[]);
                    rpass.draw(0..QUAD.len() as u32, i..i + 1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
