use crate::settings::SettingsData;

/// Settings key of the light-source name.
pub const SOURCE_KEY: &str = "source";

/// A float setting with its default and slider range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatSetting {
    pub key: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// An integer setting with its default and slider range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IntSetting {
    pub key: &'static str,
    pub label: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

pub const SATURATION: FloatSetting = FloatSetting {
    key: "saturation",
    label: "Saturation",
    default: 1.0,
    min: 0.0,
    max: 5.0,
    step: 0.01,
};

pub const INTENSITY: FloatSetting = FloatSetting {
    key: "intensity",
    label: "Intensity",
    default: 1.0,
    min: 0.0,
    max: 5.0,
    step: 0.01,
};

pub const CONTRAST: FloatSetting = FloatSetting {
    key: "contrast",
    label: "Contrast",
    default: 1.0,
    min: 0.0,
    max: 5.0,
    step: 0.01,
};

pub const PARTITIONS: IntSetting = IntSetting {
    key: "partitions",
    label: "Grid Size",
    default: 8,
    min: 1,
    max: 64,
    step: 1,
};

pub const SUB_DIVISIONS: IntSetting = IntSetting {
    key: "sub_divisions",
    label: "Smoothness",
    default: 2,
    min: 1,
    max: 16,
    step: 1,
};

/// Scalar inputs of the lighting effect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightingParams {
    pub saturation: f32,
    pub intensity: f32,
    pub contrast: f32,
    pub partitions: i32,
    pub sub_divisions: i32,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            saturation: SATURATION.default as f32,
            intensity: INTENSITY.default as f32,
            contrast: CONTRAST.default as f32,
            partitions: PARTITIONS.default as i32,
            sub_divisions: SUB_DIVISIONS.default as i32,
        }
    }
}

impl LightingParams {
    /// Reads the five scalars verbatim; range enforcement is the UI's job.
    pub fn read(settings: &SettingsData) -> Self {
        Self {
            saturation: settings.get_double(SATURATION.key) as f32,
            intensity: settings.get_double(INTENSITY.key) as f32,
            contrast: settings.get_double(CONTRAST.key) as f32,
            partitions: settings.get_int(PARTITIONS.key) as i32,
            sub_divisions: settings.get_int(SUB_DIVISIONS.key) as i32,
        }
    }

    /// Fills the default table of `settings`.
    pub fn write_defaults(settings: &mut SettingsData) {
        for float in [SATURATION, INTENSITY, CONTRAST] {
            settings.set_default_double(float.key, float.default);
        }
        for int in [PARTITIONS, SUB_DIVISIONS] {
            settings.set_default_int(int.key, int.default);
        }
    }
}
