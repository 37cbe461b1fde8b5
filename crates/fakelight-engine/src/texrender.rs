use fakelight_core::host::ColorFormat;

use crate::render::{create_color_texture, wgpu_format, GpuTexture};

/// Reusable offscreen color target.
///
/// The GPU texture is kept across frames and only reallocated when the
/// requested size changes.
pub struct GpuTexRender {
    format: wgpu::TextureFormat,
    texture: Option<wgpu::Texture>,
    view: Option<GpuTexture>,
    rendered: bool,
    allocations: usize,
}

impl GpuTexRender {
    pub(crate) fn new(format: ColorFormat) -> Self {
        Self {
            format: wgpu_format(format),
            texture: None,
            view: None,
            rendered: false,
            allocations: 0,
        }
    }

    pub(crate) fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub(crate) fn raw(&self) -> Option<&wgpu::Texture> {
        self.texture.as_ref()
    }

    pub(crate) fn reset(&mut self) {
        self.rendered = false;
    }

    /// Returns the view to draw into, (re)allocating at `width`x`height`.
    pub(crate) fn prepare(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Option<GpuTexture> {
        if width == 0 || height == 0 {
            return None;
        }
        let fits = self
            .texture
            .as_ref()
            .is_some_and(|t| t.width() == width && t.height() == height);
        if !fits {
            let texture = create_color_texture(device, "fakelight texrender", self.format, width, height);
            self.view = Some(GpuTexture::new(&texture));
            self.texture = Some(texture);
            self.allocations += 1;
            log::trace!("texrender allocated at {width}x{height}");
        }
        self.rendered = false;
        self.view.clone()
    }

    pub(crate) fn finish(&mut self) {
        self.rendered = self.view.is_some();
    }

    /// The last finished image, if any since the last reset.
    pub fn texture(&self) -> Option<GpuTexture> {
        if self.rendered { self.view.clone() } else { None }
    }

    /// Number of GPU textures created so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}
