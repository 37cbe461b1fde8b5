use std::path::Path;

use crate::filter::LightingParams;
use crate::host::{BlendFactor, ColorFormat, FilterRenderMode, Host};

use super::{BlendScope, LightSource, LightTarget, LightingEffect};

/// Blend function installed while the effect runs: the light adds onto the
/// frame, which is attenuated by the effect output's inverse alpha.
pub const COMPOSITE_BLEND: (BlendFactor, BlendFactor) = (BlendFactor::One, BlendFactor::InvSrcAlpha);

/// What a call to [`CompositePass::composite`] did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompositeOutcome {
    /// The effect ran over the target.
    Composited,
    /// The effect never loaded; the host was told to skip this filter.
    PassThrough,
    /// The light buffer produced nothing this frame.
    NoLightTexture,
    /// The host could not prepare the filter input this frame.
    FilterBeginFailed,
}

/// Owns the lighting effect and the light buffer, and runs the composite.
pub struct CompositePass<H: Host> {
    effect: Option<LightingEffect<H>>,
    light_target: LightTarget<H>,
}

impl<H: Host> CompositePass<H> {
    pub fn new(effect: Option<LightingEffect<H>>) -> Self {
        Self {
            effect,
            light_target: LightTarget::new(),
        }
    }

    /// Loads the effect at `path`. A failed load is logged once here and the
    /// pass stays in pass-through mode for good.
    pub fn load(host: &mut H, path: &Path) -> Self {
        let effect = match LightingEffect::load(host, path) {
            Ok(effect) => Some(effect),
            Err(err) => {
                log::warn!("[fake-lighting] shader not loaded: {err}");
                None
            }
        };
        Self::new(effect)
    }

    pub fn is_pass_through(&self) -> bool {
        self.effect.is_none()
    }

    pub fn effect(&self) -> Option<&LightingEffect<H>> {
        self.effect.as_ref()
    }

    pub fn light_target(&self) -> &LightTarget<H> {
        &self.light_target
    }

    /// Renders one frame of the filter onto `target`.
    ///
    /// The host blend state is only touched between a successful filter begin
    /// and the end of this call, and is restored on every path out of it.
    pub fn composite(
        &mut self,
        host: &mut H,
        target: &H::Source,
        light: &mut LightSource<H::Source>,
        params: &LightingParams,
    ) -> CompositeOutcome {
        let Some(effect) = self.effect.as_mut() else {
            host.skip_video_filter(target);
            return CompositeOutcome::PassThrough;
        };

        let (width, height) = host.base_size(target);
        let Some(light_texture) = self.light_target.render(host, light, width, height) else {
            return CompositeOutcome::NoLightTexture;
        };

        if !host.process_filter_begin(
            target,
            ColorFormat::Rgba,
            FilterRenderMode::AllowDirectRendering,
        ) {
            log::error!("[fake-lighting] filter render failed to begin");
            return CompositeOutcome::FilterBeginFailed;
        }

        let (src, dst) = COMPOSITE_BLEND;
        let mut gfx = BlendScope::with_function(host, src, dst);
        effect.upload(params, &light_texture);
        gfx.process_filter_end(target, effect.effect_mut(), 0, 0);

        CompositeOutcome::Composited
    }
}
