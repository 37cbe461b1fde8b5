//! The studio host: a headless scene graph and graphics context on wgpu.
//!
//! Draws are recorded into one command encoder per frame and submitted by
//! [`StudioHost::end_frame`]. Render targets form a stack; the output frame
//! sits at the bottom.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use fakelight_core::error::LoadError;
use fakelight_core::host::{
    BlendFactor, ColorFormat, FilterPass, FilterRenderMode, Graphics, SceneGraph, ZStencilFormat,
};

use crate::blend::{BlendMode, BlendStack};
use crate::device::{Gpu, GpuInit};
use crate::effect::WgslEffect;
use crate::readback::{read_texture, FramePixels};
use crate::render::{
    create_color_texture, create_linear_sampler, wgpu_format, Blitter, GpuTexture, PipelineKey,
};
use crate::source::{SceneSource, SourceKind, SourceRef};
use crate::texrender::GpuTexRender;

const OUTPUT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub struct StudioHost {
    gpu: Gpu,
    blit: Blitter,
    sampler: wgpu::Sampler,
    /// 1x1 transparent image bound to effect textures nobody set.
    fallback: GpuTexture,

    sources: Vec<SourceRef>,
    blend: BlendStack,
    targets: Vec<GpuTexture>,
    encoder: Option<wgpu::CommandEncoder>,

    output: GpuTexRender,
    filter_input: GpuTexRender,
    pending_input: Option<GpuTexture>,

    frames: u64,
    skipped_filters: u64,
}

fn frame_encoder<'a>(
    encoder: &'a mut Option<wgpu::CommandEncoder>,
    device: &wgpu::Device,
) -> &'a mut wgpu::CommandEncoder {
    encoder.get_or_insert_with(|| {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("fakelight frame encoder"),
        })
    })
}

impl StudioHost {
    pub fn new(init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new_blocking(init)?;
        let device = gpu.device();

        let blit = Blitter::new(device);
        let sampler = create_linear_sampler(device);
        let fallback = upload_rgba(&gpu, "fakelight fallback texture", 1, 1, &[0; 4]);

        Ok(Self {
            blit,
            sampler,
            fallback,
            sources: Vec::new(),
            blend: BlendStack::new(),
            targets: Vec::new(),
            encoder: None,
            output: GpuTexRender::new(ColorFormat::Rgba),
            filter_input: GpuTexRender::new(ColorFormat::Rgba),
            pending_input: None,
            frames: 0,
            skipped_filters: 0,
            gpu,
        })
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    // ── scene ─────────────────────────────────────────────────────────────

    /// Adds an element showing `rgba` (tightly packed RGBA8, straight alpha).
    pub fn add_image_source(
        &mut self,
        name: &str,
        kind: SourceKind,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<SourceRef> {
        ensure!(width > 0 && height > 0, "source `{name}` has a zero size");
        ensure!(
            rgba.len() == width as usize * height as usize * 4,
            "source `{name}`: expected {} bytes of RGBA, got {}",
            width as usize * height as usize * 4,
            rgba.len()
        );
        self.insert_source(name, kind, width, height, |gpu| {
            upload_rgba(gpu, name, width, height, rgba)
        })
    }

    /// Adds an element filled with one color.
    pub fn add_color_source(
        &mut self,
        name: &str,
        kind: SourceKind,
        width: u32,
        height: u32,
        rgba: [u8; 4],
    ) -> Result<SourceRef> {
        ensure!(width > 0 && height > 0, "source `{name}` has a zero size");
        self.insert_source(name, kind, width, height, |gpu| upload_rgba(gpu, name, 1, 1, &rgba))
    }

    fn insert_source(
        &mut self,
        name: &str,
        kind: SourceKind,
        width: u32,
        height: u32,
        image: impl FnOnce(&Gpu) -> GpuTexture,
    ) -> Result<SourceRef> {
        ensure!(self.source(name).is_none(), "a source named `{name}` already exists");
        let source = SourceRef::new(SceneSource::new(name, kind, width, height, image(&self.gpu)));
        self.sources.push(source.clone());
        log::debug!("added {kind:?} `{name}` ({width}x{height})");
        Ok(source)
    }

    /// Removes an element from the scene. Outstanding handles stay valid.
    pub fn remove_source(&mut self, name: &str) -> Option<SourceRef> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    pub fn source(&self, name: &str) -> Option<SourceRef> {
        self.sources.iter().find(|s| s.name() == name).cloned()
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Starts a frame: binds the output at `width`x`height` and clears it to
    /// opaque black.
    pub fn begin_frame(&mut self, width: u32, height: u32) -> Result<()> {
        ensure!(width > 0 && height > 0, "output size must be non-zero");
        if !self.targets.is_empty() {
            log::warn!("begin_frame with {} render targets still bound", self.targets.len());
            self.targets.clear();
        }
        let view = self
            .output
            .prepare(self.gpu.device(), width, height)
            .context("failed to allocate the output frame")?;
        self.targets.push(view);
        self.clear(OUTPUT_CLEAR_COLOR);
        Ok(())
    }

    /// Finishes the frame and submits its commands.
    pub fn end_frame(&mut self) {
        if self.targets.len() != 1 {
            log::warn!("unbalanced render targets at end of frame ({} bound)", self.targets.len());
        }
        if self.blend.depth() != 0 {
            log::warn!("{} blend states still pushed at end of frame", self.blend.depth());
        }
        self.targets.clear();
        self.pending_input = None;
        self.output.finish();

        if let Some(encoder) = self.encoder.take() {
            self.gpu.queue().submit(std::iter::once(encoder.finish()));
        }
        self.frames += 1;
    }

    /// Copies the last finished frame back to the CPU.
    pub fn read_output(&self) -> Result<FramePixels> {
        let texture = self.output.raw().context("no frame has been rendered")?;
        read_texture(self.gpu.device(), self.gpu.queue(), texture)
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Frames in which a filter passed its target through untouched.
    pub fn skipped_filters(&self) -> u64 {
        self.skipped_filters
    }

    pub fn render_target_depth(&self) -> usize {
        self.targets.len()
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend.current()
    }

    pub fn blend_depth(&self) -> usize {
        self.blend.depth()
    }

    // ── drawing ───────────────────────────────────────────────────────────

    fn draw_source(&mut self, source: &SourceRef, blend: BlendMode) {
        let Some(dest) = self.targets.last().cloned() else {
            log::debug!("draw of `{}` without a render target; ignored", source.name());
            return;
        };
        let key = PipelineKey {
            blend,
            format: dest.format(),
        };
        let device = self.gpu.device();
        let encoder = frame_encoder(&mut self.encoder, device);
        self.blit
            .draw(device, encoder, &dest, source.image(), &self.sampler, key);
    }
}

fn upload_rgba(gpu: &Gpu, label: &str, width: u32, height: u32, rgba: &[u8]) -> GpuTexture {
    let texture = create_color_texture(
        gpu.device(),
        label,
        wgpu::TextureFormat::Rgba8Unorm,
        width,
        height,
    );
    gpu.queue().write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    GpuTexture::new(&texture)
}

impl Graphics for StudioHost {
    type Texture = GpuTexture;
    type TexRender = GpuTexRender;
    type Effect = WgslEffect;

    fn texrender_create(&mut self, format: ColorFormat, zstencil: ZStencilFormat) -> GpuTexRender {
        if zstencil != ZStencilFormat::None {
            log::warn!("depth/stencil attachments are not supported; {zstencil:?} ignored");
        }
        GpuTexRender::new(format)
    }

    fn texrender_reset(&mut self, texrender: &mut GpuTexRender) {
        texrender.reset();
    }

    fn texrender_begin(&mut self, texrender: &mut GpuTexRender, width: u32, height: u32) -> bool {
        let Some(view) = texrender.prepare(self.gpu.device(), width, height) else {
            return false;
        };
        self.targets.push(view);
        true
    }

    fn texrender_end(&mut self, texrender: &mut GpuTexRender) {
        if self.targets.pop().is_none() {
            log::warn!("texrender_end without a bound target");
        }
        texrender.finish();
    }

    fn texrender_texture(&self, texrender: &GpuTexRender) -> Option<GpuTexture> {
        texrender.texture()
    }

    fn clear(&mut self, color: [f32; 4]) {
        let Some(dest) = self.targets.last().cloned() else {
            log::debug!("clear without a render target; ignored");
            return;
        };
        let [r, g, b, a] = color.map(f64::from);
        let encoder = frame_encoder(&mut self.encoder, self.gpu.device());
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fakelight clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dest.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn effect_from_file(&mut self, path: &Path) -> Result<WgslEffect, LoadError> {
        WgslEffect::from_file(self.gpu.device(), path)
    }

    fn blend_state_push(&mut self) {
        self.blend.push();
    }

    fn blend_state_pop(&mut self) {
        self.blend.pop();
    }

    fn blend_function(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend.set(src, dst);
    }
}

impl SceneGraph for StudioHost {
    type Source = SourceRef;

    fn source_by_name(&mut self, name: &str) -> Option<SourceRef> {
        self.source(name)
    }

    fn source_name(&self, source: &SourceRef) -> String {
        source.name().to_owned()
    }

    fn base_size(&self, source: &SourceRef) -> (u32, u32) {
        source.size()
    }

    fn video_render(&mut self, source: &SourceRef) {
        let blend = self.blend.current();
        self.draw_source(source, blend);
    }

    fn enum_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter(|s| s.kind() == SourceKind::Input)
            .map(|s| s.name().to_owned())
            .collect()
    }

    fn enum_scenes(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter(|s| s.kind() == SourceKind::Scene)
            .map(|s| s.name().to_owned())
            .collect()
    }
}

impl FilterPass for StudioHost {
    fn process_filter_begin(
        &mut self,
        target: &SourceRef,
        format: ColorFormat,
        mode: FilterRenderMode,
    ) -> bool {
        if self.targets.is_empty() {
            log::warn!("filter on `{}` began outside a frame", target.name());
            return false;
        }
        if self.filter_input.format() != wgpu_format(format) {
            self.filter_input = GpuTexRender::new(format);
        }
        log::trace!("filter input for `{}` ({format:?}, {mode:?})", target.name());

        // The input is always rendered to an intermediate; direct rendering is
        // an optimization this host does not take.
        let (width, height) = target.size();
        let Some(view) = self.filter_input.prepare(self.gpu.device(), width, height) else {
            return false;
        };
        self.targets.push(view);
        self.clear([0.0; 4]);
        self.draw_source(target, BlendMode::default());
        self.targets.pop();
        self.filter_input.finish();

        self.pending_input = self.filter_input.texture();
        self.pending_input.is_some()
    }

    fn process_filter_end(
        &mut self,
        target: &SourceRef,
        effect: &mut WgslEffect,
        width: u32,
        height: u32,
    ) {
        let Some(input) = self.pending_input.take() else {
            log::warn!("filter end on `{}` without a prepared input", target.name());
            return;
        };
        let Some(dest) = self.targets.last().cloned() else {
            return;
        };
        let viewport = if width == 0 || height == 0 {
            target.size()
        } else {
            (width, height)
        };

        effect.set_input(&input);
        let key = PipelineKey {
            blend: self.blend.current(),
            format: dest.format(),
        };
        let device = self.gpu.device();
        let encoder = frame_encoder(&mut self.encoder, device);
        effect.draw(device, encoder, &dest, viewport, key, &self.fallback, &self.sampler);
    }

    fn skip_video_filter(&mut self, target: &SourceRef) {
        self.skipped_filters += 1;
        let blend = self.blend.current();
        self.draw_source(target, blend);
    }
}
