//! GPU drawing used by the host.
//!
//! Convention:
//! - Every draw is a full-screen triangle generated from `vertex_index`; no
//!   vertex buffers.
//! - UVs have a top-left origin.
//! - Pipelines are created lazily and cached per (blend, target format).

mod blit;
mod common;

pub(crate) use blit::Blitter;
pub use common::GpuTexture;

pub(crate) use common::{
    create_color_texture, create_linear_sampler, fullscreen_pipeline, wgpu_format, PipelineKey,
};
