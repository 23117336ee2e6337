//! Textured sprite pipeline
//!
//! Every sprite is the same unit quad spanning [-0.5, 0.5] in model space.
//! Each draw supplies a model matrix and an atlas cell fraction as instance
//! data; the orthographic projection is written once at construction.
//! Consecutive draws that share a texture are issued as one instanced call.

use std::ops::Range;
use std::path::Path;

use glam::{Mat4, Vec2};
use tracing::info;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, Sampler,
    TextureFormat, util::DeviceExt,
};

use crate::error::{GameError, Result};
use crate::sim::{DrawCall, DrawList, LoadedTexture, TextureHandle, TextureSource};

/// WGSL shader code for sprite rendering
const SPRITE_SHADER: &str = r#"
struct Globals {
    projection: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
}

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) atlas_cell: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );

    var out: VertexOutput;
    out.clip_position = globals.projection * model * vec4<f32>(vertex.position, 0.0, 1.0);
    // Image rows run top to bottom while world y points up
    out.uv = vec2<f32>(vertex.uv.x, 1.0 - vertex.uv.y) * instance.atlas_cell;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sprite_texture, sprite_sampler, in.uv);
}
"#;

/// Quad corner
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Unit quad as a triangle strip
const QUAD: [Vertex; 4] = [
    Vertex {
        position: [-0.5, -0.5],
        uv: [0.0, 0.0],
    },
    Vertex {
        position: [-0.5, 0.5],
        uv: [0.0, 1.0],
    },
    Vertex {
        position: [0.5, -0.5],
        uv: [1.0, 0.0],
    },
    Vertex {
        position: [0.5, 0.5],
        uv: [1.0, 1.0],
    },
];

/// Per-draw data
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    model: [[f32; 4]; 4],
    atlas_cell: [f32; 2],
}

impl Instance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x2,
    ];

    fn new(model: Mat4, atlas_cell: Vec2) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            atlas_cell: atlas_cell.to_array(),
        }
    }

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uniform buffer for the projection
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    projection: [[f32; 4]; 4],
}

/// A texture uploaded to the GPU
struct SpriteTexture {
    bind_group: BindGroup,
    _texture: wgpu::Texture,
}

/// Consecutive instances sharing one texture
#[derive(Debug, Clone)]
struct Batch {
    texture: TextureHandle,
    instances: Range<u32>,
}

/// Groups consecutive draws that share a texture, keeping submission order
fn batch_runs(calls: &[DrawCall]) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    for (index, call) in calls.iter().enumerate() {
        let index = index as u32;
        match batches.last_mut() {
            Some(batch) if batch.texture == call.texture => batch.instances.end = index + 1,
            _ => batches.push(Batch {
                texture: call.texture,
                instances: index..index + 1,
            }),
        }
    }
    batches
}

/// Smallest instance count a buffer is created with
const MIN_INSTANCE_CAPACITY: usize = 16;

/// Capacity that holds `needed` instances, or `None` if `current` already does
///
/// Rounds up to the next power of two.
fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| needed.next_power_of_two().max(MIN_INSTANCE_CAPACITY))
}

/// Draws textured quads
pub struct SpritePipeline {
    pipeline: RenderPipeline,
    globals_bind_group: BindGroup,
    texture_layout: BindGroupLayout,
    sampler: Sampler,
    quad: Buffer,
    instance_buffer: Option<Buffer>,
    instance_capacity: usize,
    instances: Vec<Instance>,
    textures: Vec<SpriteTexture>,
    batches: Vec<Batch>,
}

impl SpritePipeline {
    /// Builds the pipeline with a projection covering `[0, width] x [0, height]`
    ///
    /// Shader problems surface as wgpu validation errors; callers wrap this
    /// in an error scope.
    pub fn new(device: &Device, format: TextureFormat, playfield: Vec2) -> Self {
        let projection = Mat4::orthographic_rh(0.0, playfield.x, 0.0, playfield.y, -1.0, 1.0);
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Globals Buffer"),
            contents: bytemuck::cast_slice(&[Globals {
                projection: projection.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Globals Layout"),
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

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Layout"),
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), Instance::desc()],
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
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Painter's order, no depth test
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Buffer"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            globals_bind_group,
            texture_layout,
            sampler,
            quad,
            instance_buffer: None,
            instance_capacity: 0,
            instances: Vec::new(),
            textures: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Decodes an image file and uploads it as an sRGB texture
    pub fn upload(&mut self, device: &Device, queue: &Queue, path: &Path) -> Result<LoadedTexture> {
        let image = image::open(path)
            .map_err(|source| GameError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let label = path.display().to_string();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(SpriteTexture {
            bind_group,
            _texture: texture,
        });

        info!(
            path = %path.display(),
            width,
            height,
            handle = handle.0,
            "Texture loaded"
        );

        Ok(LoadedTexture {
            handle,
            width,
            height,
        })
    }

    /// Uploads this frame's instances and groups them by texture
    ///
    /// The instance buffer is kept between frames and only replaced when
    /// the draw list outgrows it.
    pub fn prepare(&mut self, device: &Device, queue: &Queue, draws: &DrawList) {
        self.batches.clear();
        self.instances.clear();
        if draws.is_empty() {
            return;
        }

        self.instances.extend(
            draws
                .calls()
                .iter()
                .map(|call| Instance::new(call.model, call.atlas_cell)),
        );
        self.batches = batch_runs(draws.calls());

        if let Some(capacity) = grown_capacity(self.instance_capacity, self.instances.len()) {
            info!(capacity, "Growing sprite instance buffer");
            self.instance_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Sprite Instance Buffer"),
                size: (capacity * std::mem::size_of::<Instance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.instance_capacity = capacity;
        }

        if let Some(buffer) = &self.instance_buffer {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    /// Records the prepared draws into `rpass`
    pub fn render(&self, rpass: &mut RenderPass<'_>) {
        let Some(instances) = &self.instance_buffer else {
            return;
        };
        if self.batches.is_empty() {
            return;
        }
        let used = (self.instances.len() * std::mem::size_of::<Instance>()) as u64;

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..used));

        for batch in &self.batches {
            if let Some(texture) = self.textures.get(batch.texture.0 as usize) {
                rpass.set_bind_group(1, &texture.bind_group, &[]);
                rpass.draw(0..QUAD.len() as u32, batch.instances.clone());
            }
        }
    }

    /// Number of textures uploaded so far
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

/// Borrows the device, queue and pipeline for loading textures at startup
pub struct TextureLoader<'a> {
    pub(super) device: &'a Device,
    pub(super) queue: &'a Queue,
    pub(super) sprites: &'a mut SpritePipeline,
}

impl TextureSource for TextureLoader<'_> {
    fn load(&mut self, path: &Path) -> Result<LoadedTexture> {
        self.sprites.upload(self.device, self.queue, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(texture: u32) -> DrawCall {
        DrawCall {
            texture: TextureHandle(texture),
            model: Mat4::IDENTITY,
            atlas_cell: Vec2::ONE,
        }
    }

    #[test]
    fn test_runs_of_one_texture_share_a_batch() {
        // background, five meteors, spaceship
        let calls = [0, 2, 2, 2, 2, 2, 1].map(call);
        let batches = batch_runs(&calls);

        let summary: Vec<_> = batches
            .iter()
            .map(|b| (b.texture.0, b.instances.clone()))
            .collect();
        assert_eq!(summary, vec![(0, 0..1), (2, 1..6), (1, 6..7)]);
    }

    #[test]
    fn test_repeated_texture_after_another_is_a_new_batch() {
        let calls = [0, 1, 0].map(call);
        assert_eq!(batch_runs(&calls).len(), 3);
        assert!(batch_runs(&[]).is_empty());
    }

    #[test]
    fn test_instance_buffer_grows_only_when_outgrown() {
        assert_eq!(grown_capacity(0, 7), Some(MIN_INSTANCE_CAPACITY));
        assert_eq!(grown_capacity(16, 7), None);
        assert_eq!(grown_capacity(16, 16), None);
        assert_eq!(grown_capacity(16, 17), Some(32));
        assert_eq!(grown_capacity(32, 0), None);
    }

    #[test]
    fn test_instance_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<Instance>(), 72);
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        assert_eq!(Instance::ATTRIBS[4].offset, 64);
    }
}
