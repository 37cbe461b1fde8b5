//! Host capability interface.
//!
//! The compositing host owns the scene graph, the graphics context and the
//! filter chain. The core reaches all of them through these traits:
//! - [`Graphics`]: offscreen targets, effect programs, blend state
//! - [`SceneGraph`]: element lookup, sizing and rendering
//! - [`FilterPass`]: the host side of a filter's begin/end composite
//!
//! Every handle is an associated type chosen by the implementation, and owned
//! handles release their resource on drop.

mod format;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use format::{BlendFactor, ColorFormat, FilterRenderMode, ZStencilFormat};
pub use traits::{EffectProgram, FilterPass, Graphics, Host, SceneGraph};
