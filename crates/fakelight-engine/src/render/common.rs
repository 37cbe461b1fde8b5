//! Shared GPU types and helpers for full-screen passes.

use std::rc::Rc;

use fakelight_core::host::ColorFormat;

use crate::blend::BlendMode;

// ── textures ──────────────────────────────────────────────────────────────

/// Sampleable view onto a color texture. Cloning shares the view.
#[derive(Debug, Clone)]
pub struct GpuTexture {
    view: Rc<wgpu::TextureView>,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl GpuTexture {
    pub(crate) fn new(texture: &wgpu::Texture) -> Self {
        Self {
            view: Rc::new(texture.create_view(&wgpu::TextureViewDescriptor::default())),
            format: texture.format(),
            width: texture.width(),
            height: texture.height(),
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether both handles refer to the same view.
    pub fn same_view(&self, other: &GpuTexture) -> bool {
        Rc::ptr_eq(&self.view, &other.view)
    }
}

pub(crate) fn wgpu_format(format: ColorFormat) -> wgpu::TextureFormat {
    match format {
        ColorFormat::Rgba => wgpu::TextureFormat::Rgba8Unorm,
        ColorFormat::Bgra => wgpu::TextureFormat::Bgra8Unorm,
        ColorFormat::Rgba16F => wgpu::TextureFormat::Rgba16Float,
    }
}

/// Color texture usable as render target, sampling source and copy source.
pub(crate) fn create_color_texture(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC
            | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

pub(crate) fn create_linear_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("fakelight linear sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

// ── pipelines ─────────────────────────────────────────────────────────────

/// Cache key for full-screen pipelines.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PipelineKey {
    pub blend: BlendMode,
    pub format: wgpu::TextureFormat,
}

/// Pipeline drawing a full-screen triangle with `vs_main`/`fs_main`.
pub(crate) fn fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: Some(key.blend.to_wgpu()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
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
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_formats_map_to_8bit_and_float_targets() {
        assert_eq!(wgpu_format(ColorFormat::Rgba), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(wgpu_format(ColorFormat::Bgra), wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(wgpu_format(ColorFormat::Rgba16F), wgpu::TextureFormat::Rgba16Float);
    }
}
