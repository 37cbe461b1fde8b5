//! Per-frame render pipeline.
//!
//! Control flow per frame:
//! - [`CompositePass`] queries the target size
//! - [`LightTarget`] renders the light source into its offscreen buffer
//! - the lighting effect receives the light texture and the scalar parameters
//! - the effect runs over the target inside a [`BlendScope`]

mod blend;
mod composite;
mod effect;
mod light_source;
mod light_target;

pub use blend::BlendScope;
pub use composite::{CompositeOutcome, CompositePass, COMPOSITE_BLEND};
pub use effect::{param_names, LightingEffect, ParamBindings};
pub use light_source::LightSource;
pub use light_target::{LightTarget, LIGHT_CLEAR_COLOR, LIGHT_FORMAT};
