use fakelight_core::host::BlendFactor;

/// Source/destination blend factors, applied identically to color and alpha.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendMode {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl Default for BlendMode {
    /// Straight-alpha "over".
    fn default() -> Self {
        Self {
            src: BlendFactor::SrcAlpha,
            dst: BlendFactor::InvSrcAlpha,
        }
    }
}

impl BlendMode {
    pub fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        Self { src, dst }
    }

    pub fn to_wgpu(self) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor: factor(self.src),
            dst_factor: factor(self.dst),
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }
}

fn factor(f: BlendFactor) -> wgpu::BlendFactor {
    match f {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcColor => wgpu::BlendFactor::Src,
        BlendFactor::InvSrcColor => wgpu::BlendFactor::OneMinusSrc,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::InvSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstColor => wgpu::BlendFactor::Dst,
        BlendFactor::InvDstColor => wgpu::BlendFactor::OneMinusDst,
        BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        BlendFactor::InvDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        BlendFactor::SrcAlphaSat => wgpu::BlendFactor::SrcAlphaSaturated,
    }
}

/// Current blend function plus the saved states beneath it.
#[derive(Debug, Default)]
pub struct BlendStack {
    current: BlendMode,
    saved: Vec<BlendMode>,
}

impl BlendStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> BlendMode {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the last pushed state. An unmatched pop is logged and ignored.
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(mode) => self.current = mode,
            None => log::warn!("blend state pop without a matching push"),
        }
    }

    pub fn set(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.current = BlendMode::new(src, dst);
    }
}
