/// Color buffer formats a host can allocate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorFormat {
    /// 8 bits per channel, straight RGBA.
    Rgba,
    /// 8 bits per channel, BGRA ordering.
    Bgra,
    /// 16-bit float per channel.
    Rgba16F,
}

/// Depth/stencil attachment formats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ZStencilFormat {
    None,
    Z24S8,
}

/// Whether the host may skip its intermediate texture and draw the filter
/// straight into the parent target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FilterRenderMode {
    AllowDirectRendering,
    NoDirectRendering,
}

/// Blend factors, applied identically to color and alpha.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DstColor,
    InvDstColor,
    DstAlpha,
    InvDstAlpha,
    SrcAlphaSat,
}
