//! Module lifecycle.
//!
//! Loading the module builds its locale and registers the fake lighting
//! filter with a fresh [`FilterRegistry`]. Dropping it unloads.

use std::path::PathBuf;
use std::rc::Rc;

use crate::filter::{FakeLightingFactory, FilterRegistry};
use crate::host::Host;
use crate::locale::Locale;

pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the module finds its data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    /// Directory holding the effect file and `locale/`.
    pub data_dir: PathBuf,

    /// Effect file name, relative to `data_dir`.
    pub effect_file: String,

    /// Locale to load, e.g. "en-US".
    pub locale: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            effect_file: "fake_lighting.wgsl".to_owned(),
            locale: "en-US".to_owned(),
        }
    }
}

impl ModuleConfig {
    /// Path of a file shipped in the module's data directory.
    pub fn module_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

/// A loaded module and the filters it registered.
pub struct Module<H: Host> {
    config: ModuleConfig,
    locale: Rc<Locale>,
    registry: FilterRegistry<H>,
}

impl<H: Host + 'static> Module<H> {
    pub fn load(config: ModuleConfig) -> Self {
        let locale = Rc::new(Locale::load(&config.data_dir, &config.locale));

        let mut registry = FilterRegistry::new();
        let factory = FakeLightingFactory::new(
            config.module_file(&config.effect_file),
            Rc::clone(&locale),
        );
        if let Err(err) = registry.register(Box::new(factory)) {
            log::error!("failed to register fake lighting: {err}");
        }

        log::info!("Fake Lighting loaded successfully (version {PLUGIN_VERSION})");

        Self {
            config,
            locale,
            registry,
        }
    }
}

impl<H: Host> Module<H> {
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn registry(&self) -> &FilterRegistry<H> {
        &self.registry
    }

    pub fn unload(self) {
        drop(self);
    }
}

impl<H: Host> Drop for Module<H> {
    fn drop(&mut self) {
        log::info!("plugin unloaded");
    }
}
