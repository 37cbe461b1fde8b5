use crate::host::{ColorFormat, Graphics, SceneGraph, ZStencilFormat};

use super::LightSource;

/// Light buffer format: 8 bits per channel RGBA.
pub const LIGHT_FORMAT: ColorFormat = ColorFormat::Rgba;

/// The light buffer starts every frame transparent, so an unresolved light
/// source yields a blank texture rather than whatever the buffer last held.
pub const LIGHT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Offscreen buffer the light source is rendered into.
///
/// The buffer is allocated on the first frame and reused afterwards: each
/// frame resets it and begins it at the current target size.
pub struct LightTarget<H: Graphics> {
    texrender: Option<H::TexRender>,
    allocations: usize,
}

impl<H: Graphics> Default for LightTarget<H> {
    fn default() -> Self {
        Self {
            texrender: None,
            allocations: 0,
        }
    }
}

impl<H: Graphics + SceneGraph> LightTarget<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of offscreen buffers this target has allocated (0 or 1).
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn is_allocated(&self) -> bool {
        self.texrender.is_some()
    }

    /// Renders `light` at `width`x`height` and returns the resulting texture.
    ///
    /// `None` means no output this frame (zero-sized target, failed begin);
    /// the caller must not composite. The texture stays valid until the next
    /// call resets the buffer.
    pub fn render(
        &mut self,
        host: &mut H,
        light: &mut LightSource<H::Source>,
        width: u32,
        height: u32,
    ) -> Option<H::Texture> {
        if let Some(texrender) = self.texrender.as_mut() {
            host.texrender_reset(texrender);
        } else {
            log::info!("creating light texture");
            self.texrender = Some(host.texrender_create(LIGHT_FORMAT, ZStencilFormat::None));
            self.allocations += 1;
        }
        let texrender = self.texrender.as_mut()?;

        if !host.texrender_begin(texrender, width, height) {
            log::debug!("light target unavailable at {width}x{height}, skipping frame");
            return None;
        }

        host.clear(LIGHT_CLEAR_COLOR);
        if let Some(source) = light.ensure_resolved(host) {
            host.video_render(source);
        }
        host.texrender_end(texrender);

        host.texrender_texture(texrender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{Call, MockHost, MockTexture};

    #[test]
    fn allocates_once_across_frames() {
        let mut host = MockHost::new();
        host.add_source("LightA", 320, 180);
        let mut light = LightSource::new();
        light.resolve(&mut host, "LightA");
        let mut target = LightTarget::<MockHost>::new();

        for _ in 0..500 {
            assert!(target.render(&mut host, &mut light, 1920, 1080).is_some());
        }

        assert_eq!(target.allocations(), 1);
        assert_eq!(host.texrenders_created, 1);
        assert_eq!(host.texrenders_live.get(), 1);
        assert_eq!(host.count(|c| matches!(c, Call::TexRenderReset(_))), 499);
    }

    #[test]
    fn resize_reuses_the_buffer() {
        let mut host = MockHost::new();
        let mut light = LightSource::new();
        let mut target = LightTarget::<MockHost>::new();

        target.render(&mut host, &mut light, 1280, 720);
        target.render(&mut host, &mut light, 1920, 1080);

        assert_eq!(host.texrenders_created, 1);
        assert!(host.calls().contains(&Call::TexRenderBegin { id: 0, width: 1920, height: 1080 }));
    }

    #[test]
    fn buffer_is_rgba_without_depth() {
        let mut host = MockHost::new();
        let mut light = LightSource::new();
        let mut target = LightTarget::<MockHost>::new();
        target.render(&mut host, &mut light, 8, 8);

        assert_eq!(
            host.calls()[0],
            Call::TexRenderCreate { id: 0, format: ColorFormat::Rgba, zstencil: ZStencilFormat::None }
        );
    }

    #[test]
    fn zero_size_yields_nothing() {
        let mut host = MockHost::new();
        host.add_source("LightA", 320, 180);
        let mut light = LightSource::new();
        light.resolve(&mut host, "LightA");
        let mut target = LightTarget::<MockHost>::new();

        assert!(target.render(&mut host, &mut light, 0, 1080).is_none());
        assert_eq!(host.count(|c| matches!(c, Call::VideoRender(_))), 0);
        assert_eq!(host.count(|c| matches!(c, Call::TexRenderEnd(_))), 0);
    }

    #[test]
    fn failed_frame_does_not_return_previous_image() {
        let mut host = MockHost::new();
        let mut light = LightSource::new();
        let mut target = LightTarget::<MockHost>::new();

        assert!(target.render(&mut host, &mut light, 64, 64).is_some());
        assert!(target.render(&mut host, &mut light, 0, 0).is_none());
        assert_eq!(target.render(&mut host, &mut light, 64, 64), Some(MockTexture { texrender: 0, frame: 2 }));
    }

    #[test]
    fn unresolved_source_renders_blank() {
        let mut host = MockHost::new();
        let mut light = LightSource::new();
        light.resolve(&mut host, "LightA");
        let mut target = LightTarget::<MockHost>::new();
        host.clear_calls();

        let texture = target.render(&mut host, &mut light, 64, 64);

        assert!(texture.is_some());
        assert_eq!(
            host.calls(),
            vec![
                Call::TexRenderCreate { id: 0, format: ColorFormat::Rgba, zstencil: ZStencilFormat::None },
                Call::TexRenderBegin { id: 0, width: 64, height: 64 },
                Call::Clear(LIGHT_CLEAR_COLOR),
                Call::LookupSource("LightA".into()),
                Call::TexRenderEnd(0),
            ]
        );
    }

    #[test]
    fn resolved_source_is_drawn_after_clear() {
        let mut host = MockHost::new();
        host.add_source("LightA", 64, 64);
        let mut light = LightSource::new();
        light.resolve(&mut host, "LightA");
        let mut target = LightTarget::<MockHost>::new();
        host.clear_calls();

        target.render(&mut host, &mut light, 64, 64);

        let calls = host.calls();
        let clear = calls.iter().position(|c| matches!(c, Call::Clear(_)));
        let draw = calls.iter().position(|c| *c == Call::VideoRender("LightA".into()));
        assert!(clear.is_some() && draw.is_some());
        assert!(clear < draw);
    }
}
