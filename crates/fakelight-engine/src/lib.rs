//! Fakelight engine crate.
//!
//! A headless wgpu implementation of the `fakelight_core` host traits: the
//! device, offscreen targets, WGSL effect programs, scene sources and the
//! filter composite.

pub mod device;
pub mod effect;
pub mod render;

mod blend;
mod host;
mod readback;
mod source;
mod texrender;

pub use blend::{BlendMode, BlendStack};
pub use host::StudioHost;
pub use readback::FramePixels;
pub use source::{SceneSource, SourceKind, SourceRef};
pub use texrender::GpuTexRender;
