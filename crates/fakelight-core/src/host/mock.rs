//! Recording host for unit tests.
//!
//! Logs every host call in order, tracks texrender allocations and the blend
//! stack, and can inject the failures the filter must survive.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use crate::error::LoadError;

use super::{
    BlendFactor, ColorFormat, EffectProgram, FilterPass, FilterRenderMode, Graphics, SceneGraph,
    ZStencilFormat,
};

pub(crate) type Blend = (BlendFactor, BlendFactor);

pub(crate) const DEFAULT_BLEND: Blend = (BlendFactor::SrcAlpha, BlendFactor::InvSrcAlpha);

pub(crate) const CONTRACT_PARAMS: [&str; 6] = [
    "intensity",
    "saturation",
    "light_source",
    "contrast",
    "partitions",
    "sub_divisions",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    TexRenderCreate { id: usize, format: ColorFormat, zstencil: ZStencilFormat },
    TexRenderReset(usize),
    TexRenderBegin { id: usize, width: u32, height: u32 },
    TexRenderEnd(usize),
    Clear([f32; 4]),
    LookupSource(String),
    VideoRender(String),
    BlendPush,
    BlendFunction(BlendFactor, BlendFactor),
    BlendPop,
    SetFloat(&'static str, f32),
    SetInt(&'static str, i32),
    SetTexture(&'static str, MockTexture),
    FilterBegin { target: String, format: ColorFormat, mode: FilterRenderMode },
    FilterEnd { target: String, width: u32, height: u32, blend: Blend },
    SkipFilter(String),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

/// Texture produced by a texrender; `frame` identifies the end() that made it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockTexture {
    pub texrender: usize,
    pub frame: u64,
}

pub(crate) struct MockTexRender {
    id: usize,
    frame: Option<u64>,
    live: Rc<Cell<usize>>,
}

impl Drop for MockTexRender {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub(crate) struct MockEffect {
    names: Vec<&'static str>,
    log: CallLog,
}

impl EffectProgram for MockEffect {
    type Param = usize;
    type Texture = MockTexture;

    fn param_by_name(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    fn set_float(&mut self, param: usize, value: f32) {
        self.log.borrow_mut().push(Call::SetFloat(self.names[param], value));
    }

    fn set_int(&mut self, param: usize, value: i32) {
        self.log.borrow_mut().push(Call::SetInt(self.names[param], value));
    }

    fn set_texture(&mut self, param: usize, texture: &MockTexture) {
        self.log
            .borrow_mut()
            .push(Call::SetTexture(self.names[param], texture.clone()));
    }
}

#[derive(Debug)]
pub(crate) struct MockElement {
    pub name: String,
    pub width: Cell<u32>,
    pub height: Cell<u32>,
}

pub(crate) type MockSource = Rc<MockElement>;

pub(crate) struct MockHost {
    log: CallLog,
    sources: Vec<MockSource>,
    scenes: Vec<MockSource>,

    pub effect_params: Vec<&'static str>,
    pub fail_effect_load: bool,
    pub fail_filter_begin: bool,
    pub panic_in_filter_end: bool,

    pub texrenders_created: usize,
    pub texrenders_live: Rc<Cell<usize>>,
    frames_rendered: u64,

    blend: Blend,
    pub blend_stack: Vec<Blend>,
    pub blend_pushes: usize,
    pub blend_pops: usize,
    pub unbalanced_pops: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            sources: Vec::new(),
            scenes: Vec::new(),
            effect_params: CONTRACT_PARAMS.to_vec(),
            fail_effect_load: false,
            fail_filter_begin: false,
            panic_in_filter_end: false,
            texrenders_created: 0,
            texrenders_live: Rc::new(Cell::new(0)),
            frames_rendered: 0,
            blend: DEFAULT_BLEND,
            blend_stack: Vec::new(),
            blend_pushes: 0,
            blend_pops: 0,
            unbalanced_pops: 0,
        }
    }

    fn element(name: &str, width: u32, height: u32) -> MockSource {
        Rc::new(MockElement {
            name: name.to_owned(),
            width: Cell::new(width),
            height: Cell::new(height),
        })
    }

    pub fn add_source(&mut self, name: &str, width: u32, height: u32) -> MockSource {
        let source = Self::element(name, width, height);
        self.sources.push(source.clone());
        source
    }

    pub fn add_scene(&mut self, name: &str, width: u32, height: u32) -> MockSource {
        let scene = Self::element(name, width, height);
        self.scenes.push(scene.clone());
        scene
    }

    pub fn remove_source(&mut self, name: &str) {
        self.sources.retain(|s| s.name != name);
    }

    pub fn blend(&self) -> Blend {
        self.blend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl Graphics for MockHost {
    type Texture = MockTexture;
    type TexRender = MockTexRender;
    type Effect = MockEffect;

    fn texrender_create(&mut self, format: ColorFormat, zstencil: ZStencilFormat) -> MockTexRender {
        let id = self.texrenders_created;
        self.texrenders_created += 1;
        self.texrenders_live.set(self.texrenders_live.get() + 1);
        self.record(Call::TexRenderCreate { id, format, zstencil });
        MockTexRender {
            id,
            frame: None,
            live: self.texrenders_live.clone(),
        }
    }

    fn texrender_reset(&mut self, texrender: &mut MockTexRender) {
        texrender.frame = None;
        self.record(Call::TexRenderReset(texrender.id));
    }

    fn texrender_begin(&mut self, texrender: &mut MockTexRender, width: u32, height: u32) -> bool {
        self.record(Call::TexRenderBegin { id: texrender.id, width, height });
        width > 0 && height > 0
    }

    fn texrender_end(&mut self, texrender: &mut MockTexRender) {
        self.frames_rendered += 1;
        texrender.frame = Some(self.frames_rendered);
        self.record(Call::TexRenderEnd(texrender.id));
    }

    fn texrender_texture(&self, texrender: &MockTexRender) -> Option<MockTexture> {
        texrender.frame.map(|frame| MockTexture {
            texrender: texrender.id,
            frame,
        })
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.record(Call::Clear(color));
    }

    fn effect_from_file(&mut self, path: &Path) -> Result<MockEffect, LoadError> {
        if self.fail_effect_load {
            return Err(LoadError::NotFound { path: path.to_path_buf() });
        }
        Ok(MockEffect {
            names: self.effect_params.clone(),
            log: self.log.clone(),
        })
    }

    fn blend_state_push(&mut self) {
        self.blend_stack.push(self.blend);
        self.blend_pushes += 1;
        self.record(Call::BlendPush);
    }

    fn blend_state_pop(&mut self) {
        match self.blend_stack.pop() {
            Some(blend) => self.blend = blend,
            None => self.unbalanced_pops += 1,
        }
        self.blend_pops += 1;
        self.record(Call::BlendPop);
    }

    fn blend_function(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend = (src, dst);
        self.record(Call::BlendFunction(src, dst));
    }
}

impl SceneGraph for MockHost {
    type Source = MockSource;

    fn source_by_name(&mut self, name: &str) -> Option<MockSource> {
        self.record(Call::LookupSource(name.to_owned()));
        self.sources
            .iter()
            .chain(self.scenes.iter())
            .find(|s| s.name == name)
            .cloned()
    }

    fn source_name(&self, source: &MockSource) -> String {
        source.name.clone()
    }

    fn base_size(&self, source: &MockSource) -> (u32, u32) {
        (source.width.get(), source.height.get())
    }

    fn video_render(&mut self, source: &MockSource) {
        self.record(Call::VideoRender(source.name.clone()));
    }

    fn enum_sources(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    fn enum_scenes(&self) -> Vec<String> {
        self.scenes.iter().map(|s| s.name.clone()).collect()
    }
}

impl FilterPass for MockHost {
    fn process_filter_begin(
        &mut self,
        target: &MockSource,
        format: ColorFormat,
        mode: FilterRenderMode,
    ) -> bool {
        self.record(Call::FilterBegin {
            target: target.name.clone(),
            format,
            mode,
        });
        !self.fail_filter_begin
    }

    fn process_filter_end(
        &mut self,
        target: &MockSource,
        _effect: &mut MockEffect,
        width: u32,
        height: u32,
    ) {
        self.record(Call::FilterEnd {
            target: target.name.clone(),
            width,
            height,
            blend: self.blend,
        });
        if self.panic_in_filter_end {
            panic!("device lost during filter end");
        }
    }

    fn skip_video_filter(&mut self, target: &MockSource) {
        self.record(Call::SkipFilter(target.name.clone()));
    }
}
