use std::path::Path;

use crate::error::LoadError;

use super::{BlendFactor, ColorFormat, FilterRenderMode, ZStencilFormat};

/// A loaded shader program with named input bindings.
///
/// Parameter values are staged on the program and consumed by the next
/// [`FilterPass::process_filter_end`] that runs it.
pub trait EffectProgram {
    /// Binding handle. Only meaningful for the program that produced it.
    type Param: Copy;
    type Texture;

    fn param_by_name(&self, name: &str) -> Option<Self::Param>;
    fn set_float(&mut self, param: Self::Param, value: f32);
    fn set_int(&mut self, param: Self::Param, value: i32);
    fn set_texture(&mut self, param: Self::Param, texture: &Self::Texture);
}

/// Graphics context of the host.
///
/// All calls are synchronous and run on the render thread; none of them block.
pub trait Graphics {
    /// Sampleable texture. Cloning shares the underlying image.
    type Texture: Clone;

    /// Reusable offscreen color buffer.
    type TexRender;

    type Effect: EffectProgram<Texture = Self::Texture>;

    fn texrender_create(&mut self, format: ColorFormat, zstencil: ZStencilFormat)
        -> Self::TexRender;

    /// Logically frees the previous image without releasing the buffer.
    fn texrender_reset(&mut self, texrender: &mut Self::TexRender);

    /// Makes `texrender` the current render target at `width`x`height`.
    ///
    /// Returns `false` when the target cannot be bound (zero size, allocation
    /// failure); nothing was pushed in that case.
    fn texrender_begin(&mut self, texrender: &mut Self::TexRender, width: u32, height: u32)
        -> bool;

    fn texrender_end(&mut self, texrender: &mut Self::TexRender);

    /// Image produced by the last begin/end pair, if any since the last reset.
    fn texrender_texture(&self, texrender: &Self::TexRender) -> Option<Self::Texture>;

    /// Clears the current render target.
    fn clear(&mut self, color: [f32; 4]);

    fn effect_from_file(&mut self, path: &Path) -> Result<Self::Effect, LoadError>;

    fn blend_state_push(&mut self);
    fn blend_state_pop(&mut self);
    fn blend_function(&mut self, src: BlendFactor, dst: BlendFactor);
}

/// Scene graph of the host.
pub trait SceneGraph {
    /// Strong element handle; dropping it releases the reference.
    type Source: Clone;

    fn source_by_name(&mut self, name: &str) -> Option<Self::Source>;
    fn source_name(&self, source: &Self::Source) -> String;

    /// Unscaled size of the element, queried fresh each frame.
    fn base_size(&self, source: &Self::Source) -> (u32, u32);

    /// Draws `source` into the current render target.
    fn video_render(&mut self, source: &Self::Source);

    fn enum_sources(&self) -> Vec<String>;
    fn enum_scenes(&self) -> Vec<String>;
}

/// Host side of a filter composite.
pub trait FilterPass: Graphics + SceneGraph {
    /// Renders the filter's input (the target without this filter) and
    /// prepares the composite. `false` means nothing was prepared.
    fn process_filter_begin(
        &mut self,
        target: &Self::Source,
        format: ColorFormat,
        mode: FilterRenderMode,
    ) -> bool;

    /// Runs `effect` across the prepared input into the current target.
    ///
    /// A `width`/`height` of 0 uses the target's base size. No offset or
    /// rotation is applied.
    fn process_filter_end(
        &mut self,
        target: &Self::Source,
        effect: &mut Self::Effect,
        width: u32,
        height: u32,
    );

    /// Passes the target through this filter untouched for the current frame.
    fn skip_video_filter(&mut self, target: &Self::Source);
}

/// Everything a video filter needs from its host.
pub trait Host: FilterPass {}

impl<T: FilterPass> Host for T {}
