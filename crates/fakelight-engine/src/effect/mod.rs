//! WGSL effect programs.
//!
//! An effect file is a WGSL module with `vs_main`/`fs_main` entry points and
//! all of its resources in bind group 0:
//! - at most one `var<uniform>` struct; its scalar members are the float/int
//!   parameters, addressed by member name
//! - `texture_2d<f32>` globals, addressed by variable name
//! - filtering samplers
//!
//! The texture named [`INPUT_TEXTURE`] receives the filter input.

mod program;
mod reflect;
mod staging;

pub use program::WgslEffect;
pub use reflect::{reflect, EffectLayout, EffectParam, ScalarKind, TextureSlot, UniformBlock};
pub use staging::StagedParams;

/// Texture parameter bound to the filter's input image.
pub const INPUT_TEXTURE: &str = "image";

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";
