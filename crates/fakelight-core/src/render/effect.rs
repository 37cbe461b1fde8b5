use std::path::Path;

use crate::error::LoadError;
use crate::filter::LightingParams;
use crate::host::{EffectProgram, Graphics};

/// Parameter names the lighting effect must expose.
pub mod param_names {
    pub const INTENSITY: &str = "intensity";
    pub const SATURATION: &str = "saturation";
    pub const LIGHT_SOURCE: &str = "light_source";
    pub const CONTRAST: &str = "contrast";
    pub const PARTITIONS: &str = "partitions";
    pub const SUB_DIVISIONS: &str = "sub_divisions";

    pub const ALL: [&str; 6] = [
        INTENSITY,
        SATURATION,
        LIGHT_SOURCE,
        CONTRAST,
        PARTITIONS,
        SUB_DIVISIONS,
    ];
}

/// Binding handles into the lighting effect, looked up once at load.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParamBindings<P> {
    pub intensity: Option<P>,
    pub saturation: Option<P>,
    pub light_source: Option<P>,
    pub contrast: Option<P>,
    pub partitions: Option<P>,
    pub sub_divisions: Option<P>,
}

impl<P: Copy> ParamBindings<P> {
    pub fn lookup<E>(effect: &E) -> Self
    where
        E: EffectProgram<Param = P> + ?Sized,
    {
        Self {
            intensity: effect.param_by_name(param_names::INTENSITY),
            saturation: effect.param_by_name(param_names::SATURATION),
            light_source: effect.param_by_name(param_names::LIGHT_SOURCE),
            contrast: effect.param_by_name(param_names::CONTRAST),
            partitions: effect.param_by_name(param_names::PARTITIONS),
            sub_divisions: effect.param_by_name(param_names::SUB_DIVISIONS),
        }
    }

    /// Contract names the effect does not expose.
    pub fn missing(&self) -> Vec<&'static str> {
        let bound = [
            self.intensity.is_some(),
            self.saturation.is_some(),
            self.light_source.is_some(),
            self.contrast.is_some(),
            self.partitions.is_some(),
            self.sub_divisions.is_some(),
        ];
        param_names::ALL
            .iter()
            .zip(bound)
            .filter_map(|(name, bound)| (!bound).then_some(*name))
            .collect()
    }
}

type ParamOf<H> = <<H as Graphics>::Effect as EffectProgram>::Param;

/// The loaded lighting effect and its parameter bindings.
///
/// Neither changes after load.
pub struct LightingEffect<H: Graphics> {
    effect: H::Effect,
    bindings: ParamBindings<ParamOf<H>>,
}

impl<H: Graphics> LightingEffect<H> {
    pub fn load(host: &mut H, path: &Path) -> Result<Self, LoadError> {
        let effect = host.effect_from_file(path)?;
        let bindings = ParamBindings::lookup(&effect);

        let missing = bindings.missing();
        if !missing.is_empty() {
            log::warn!(
                "effect {} does not expose: {}",
                path.display(),
                missing.join(", ")
            );
        }

        Ok(Self { effect, bindings })
    }

    pub fn bindings(&self) -> &ParamBindings<ParamOf<H>> {
        &self.bindings
    }

    pub fn effect_mut(&mut self) -> &mut H::Effect {
        &mut self.effect
    }

    /// Stages the five scalars and the light texture on the effect.
    ///
    /// Unbound parameters are skipped.
    pub fn upload(&mut self, params: &LightingParams, light: &H::Texture) {
        let b = self.bindings;
        let effect = &mut self.effect;

        if let Some(p) = b.intensity {
            effect.set_float(p, params.intensity);
        }
        if let Some(p) = b.saturation {
            effect.set_float(p, params.saturation);
        }
        if let Some(p) = b.light_source {
            effect.set_texture(p, light);
        }
        if let Some(p) = b.contrast {
            effect.set_float(p, params.contrast);
        }
        if let Some(p) = b.partitions {
            effect.set_int(p, params.partitions);
        }
        if let Some(p) = b.sub_divisions {
            effect.set_int(p, params.sub_divisions);
        }
    }
}
