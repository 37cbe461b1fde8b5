use serde::{Deserialize, Serialize};

use crate::filter::{
    LightingParams, CONTRAST, INTENSITY, PARTITIONS, SATURATION, SOURCE_KEY, SUB_DIVISIONS,
};

use super::SettingsData;

/// Persisted configuration of one fake lighting instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Name of the light-source element; empty for none.
    pub source: String,
    pub saturation: f32,
    pub intensity: f32,
    pub contrast: f32,
    pub partitions: i32,
    pub sub_divisions: i32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        let params = LightingParams::default();
        Self {
            source: String::new(),
            saturation: params.saturation,
            intensity: params.intensity,
            contrast: params.contrast,
            partitions: params.partitions,
            sub_divisions: params.sub_divisions,
        }
    }
}

impl FilterSettings {
    pub fn read(data: &SettingsData) -> Self {
        let params = LightingParams::read(data);
        Self {
            source: data.get_string(SOURCE_KEY).to_owned(),
            saturation: params.saturation,
            intensity: params.intensity,
            contrast: params.contrast,
            partitions: params.partitions,
            sub_divisions: params.sub_divisions,
        }
    }

    pub fn write_to(&self, data: &mut SettingsData) {
        data.set_string(SOURCE_KEY, &self.source);
        data.set_double(SATURATION.key, f64::from(self.saturation));
        data.set_double(INTENSITY.key, f64::from(self.intensity));
        data.set_double(CONTRAST.key, f64::from(self.contrast));
        data.set_int(PARTITIONS.key, i64::from(self.partitions));
        data.set_int(SUB_DIVISIONS.key, i64::from(self.sub_divisions));
    }

    pub fn params(&self) -> LightingParams {
        LightingParams {
            saturation: self.saturation,
            intensity: self.intensity,
            contrast: self.contrast,
            partitions: self.partitions,
            sub_divisions: self.sub_divisions,
        }
    }
}
