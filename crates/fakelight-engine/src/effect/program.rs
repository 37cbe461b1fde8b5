use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use fakelight_core::error::LoadError;
use wgpu::util::DeviceExt;
use fakelight_core::host::EffectProgram;

use crate::render::{fullscreen_pipeline, GpuTexture, PipelineKey};

use super::{reflect, EffectLayout, EffectParam, StagedParams, INPUT_TEXTURE};

/// A WGSL effect compiled for the device, with its staged parameter values.
pub struct WgslEffect {
    label: String,
    layout: EffectLayout,
    staged: StagedParams<GpuTexture>,

    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl WgslEffect {
    pub fn from_file(device: &wgpu::Device, path: &Path) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_source(device, path, &source)
    }

    /// Compiles `source`; `path` only labels errors and GPU objects.
    pub fn from_source(device: &wgpu::Device, path: &Path, source: &str) -> Result<Self, LoadError> {
        let layout = reflect(path, source)?;
        let label = format!("fakelight effect {}", path.display());

        if layout.texture_slot(INPUT_TEXTURE).is_none() {
            log::warn!("effect {} has no `{INPUT_TEXTURE}` texture; the filter input is unused", path.display());
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let mut entries = Vec::new();
        if let Some(uniform) = layout.uniform {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: uniform.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });
        }
        for texture in &layout.textures {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: texture.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
        }
        for binding in &layout.samplers {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: *binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&label),
            entries: &entries,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        log::debug!(
            "loaded effect {} ({} params, {} textures)",
            path.display(),
            layout.params.len(),
            layout.textures.len()
        );

        Ok(Self {
            label,
            staged: StagedParams::new(&layout),
            layout,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
        })
    }

    pub fn layout(&self) -> &EffectLayout {
        &self.layout
    }

    pub fn staged(&self) -> &StagedParams<GpuTexture> {
        &self.staged
    }

    /// Binds the filter input to the `image` texture, if the effect has one.
    pub(crate) fn set_input(&mut self, texture: &GpuTexture) {
        if let Some(slot) = self.layout.texture_slot(INPUT_TEXTURE) {
            self.staged.set_texture_slot(slot, texture);
        }
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let pipeline = fullscreen_pipeline(device, &self.label, &self.pipeline_layout, &self.shader, key);
        self.pipelines.insert(key, pipeline);
    }

    /// Records one run of the effect over `viewport` of `target`.
    ///
    /// Texture slots never set are bound to `fallback`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        target: &GpuTexture,
        viewport: (u32, u32),
        key: PipelineKey,
        fallback: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) {
        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.ensure_pipeline(device, key);

        let Some(pipeline) = self.pipelines.get(&key) else { return };

        // Queued buffer writes all land before the encoder runs; one buffer per draw.
        let uniform_buffer = self.layout.uniform.map(|uniform| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&self.label),
                contents: self.staged.uniform_bytes(),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            (uniform.binding, buffer)
        });

        let mut entries = Vec::new();
        if let Some((binding, buffer)) = uniform_buffer.as_ref() {
            entries.push(wgpu::BindGroupEntry {
                binding: *binding,
                resource: buffer.as_entire_binding(),
            });
        }
        for (slot, texture) in self.layout.textures.iter().enumerate() {
            let view = self.staged.texture(slot).unwrap_or(fallback).view();
            entries.push(wgpu::BindGroupEntry {
                binding: texture.binding,
                resource: wgpu::BindingResource::TextureView(view),
            });
        }
        for binding in &self.layout.samplers {
            entries.push(wgpu::BindGroupEntry {
                binding: *binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            });
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&self.label),
            layout: &self.bind_group_layout,
            entries: &entries,
        });

        let (target_w, target_h) = target.size();
        let width = viewport.0.min(target_w);
        let height = viewport.1.min(target_h);
        if width == 0 || height == 0 {
            return;
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&self.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

impl EffectProgram for WgslEffect {
    type Param = EffectParam;
    type Texture = GpuTexture;

    fn param_by_name(&self, name: &str) -> Option<EffectParam> {
        self.layout.param(name)
    }

    fn set_float(&mut self, param: EffectParam, value: f32) {
        self.staged.set_float(param, value);
    }

    fn set_int(&mut self, param: EffectParam, value: i32) {
        self.staged.set_int(param, value);
    }

    fn set_texture(&mut self, param: EffectParam, texture: &GpuTexture) {
        self.staged.set_texture(param, texture);
    }
}
