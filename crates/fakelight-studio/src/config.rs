//! Studio configuration, loaded from `studio.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fakelight_core::module::ModuleConfig;
use fakelight_core::settings::FilterSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG: &str = "studio.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub output: OutputConfig,
    pub logging: LogConfig,
    pub module: ModuleSection,
    /// Element the filter is attached to.
    pub target: SourceConfig,
    /// Elements available as light sources.
    pub lights: Vec<SourceConfig>,
    /// Initial filter settings.
    pub filter: FilterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    /// Frames to render; the last one is saved.
    pub frames: u32,
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frames: 3,
            path: PathBuf::from("fake_lighting.png"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string; `RUST_LOG` is used when unset.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSection {
    pub data_dir: PathBuf,
    pub effect_file: String,
    pub locale: String,
}

impl Default for ModuleSection {
    fn default() -> Self {
        let defaults = ModuleConfig::default();
        Self {
            data_dir: defaults.data_dir,
            effect_file: defaults.effect_file,
            locale: defaults.locale,
        }
    }
}

impl ModuleSection {
    pub fn to_module_config(&self) -> ModuleConfig {
        ModuleConfig {
            data_dir: self.data_dir.clone(),
            effect_file: self.effect_file.clone(),
            locale: self.locale.clone(),
        }
    }
}

/// A scene element: a PNG image, or a solid color when `image` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub name: String,
    pub image: Option<PathBuf>,
    /// Straight RGBA8.
    pub color: [u8; 4],
    /// Size of a color element; defaults to the output size.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// List the element as a scene rather than a source.
    pub scene: bool,
    /// First frame at which the element exists.
    pub appear_at_frame: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: "Camera".to_owned(),
            image: None,
            color: [90, 90, 90, 255],
            width: None,
            height: None,
            scene: false,
            appear_at_frame: 0,
        }
    }
}

impl StudioConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads `path`, or the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Environment variables take precedence over the file.
    pub fn merge_with_env(&mut self) {
        if let Ok(path) = std::env::var("FAKELIGHT_OUTPUT") {
            self.output.path = PathBuf::from(path);
        }
        if let Ok(val) = std::env::var("FAKELIGHT_FRAMES") {
            if let Ok(frames) = val.parse::<u32>() {
                self.output.frames = frames;
            }
        }
        if let Ok(dir) = std::env::var("FAKELIGHT_DATA_DIR") {
            self.module.data_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: StudioConfig = toml::from_str("").unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.module.effect_file, "fake_lighting.wgsl");
        assert_eq!(config.filter.partitions, 8);
    }

    #[test]
    fn parses_a_full_scene() {
        let config: StudioConfig = toml::from_str(
            r#"
[output]
width = 640
height = 360
frames = 5

[target]
name = "Webcam"
color = [120, 100, 90, 255]

[[lights]]
name = "Game"
image = "game.png"

[[lights]]
name = "Late Light"
color = [255, 160, 40, 255]
appear_at_frame = 2
scene = true

[filter]
source = "Late Light"
intensity = 2.5
partitions = 12
"#,
        )
        .unwrap();

        assert_eq!((config.output.width, config.output.height, config.output.frames), (640, 360, 5));
        assert_eq!(config.output.path, PathBuf::from("fake_lighting.png"));
        assert_eq!(config.target.name, "Webcam");
        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.lights[0].image, Some(PathBuf::from("game.png")));
        assert_eq!(config.lights[1].appear_at_frame, 2);
        assert!(config.lights[1].scene);
        assert_eq!(config.filter.source, "Late Light");
        assert_eq!(config.filter.intensity, 2.5);
        assert_eq!(config.filter.partitions, 12);
        assert_eq!(config.filter.saturation, 1.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = StudioConfig::load(Path::new("no/such/studio.toml")).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = std::env::temp_dir().join("fakelight-studio-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[output]\nwidth = \"wide\"\n").unwrap();

        let err = StudioConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }

    #[test]
    fn module_section_maps_to_module_config() {
        let section = ModuleSection {
            data_dir: PathBuf::from("/opt/fakelight"),
            ..Default::default()
        };
        let module = section.to_module_config();
        assert_eq!(module.module_file(&module.effect_file), PathBuf::from("/opt/fakelight/fake_lighting.wgsl"));
    }
}
