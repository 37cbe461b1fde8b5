use crate::error::RegistryError;
use crate::host::Host;
use crate::settings::SettingsData;

use super::{FilterFactory, VideoFilter};

/// Filter kinds registered by a module, looked up by id.
pub struct FilterRegistry<H: Host> {
    factories: Vec<Box<dyn FilterFactory<H>>>,
}

impl<H: Host> Default for FilterRegistry<H> {
    fn default() -> Self {
        Self {
            factories: Vec::new(),
        }
    }
}

impl<H: Host> FilterRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, factory: Box<dyn FilterFactory<H>>) -> Result<(), RegistryError> {
        let id = factory.info().id;
        if self.get(id).is_some() {
            return Err(RegistryError::Duplicate(id.to_owned()));
        }
        log::debug!("registered filter '{id}'");
        self.factories.push(factory);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn FilterFactory<H>> {
        self.factories
            .iter()
            .find(|f| f.info().id == id)
            .map(|f| f.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.info().id).collect()
    }

    /// Attaches a new instance of `id` to `target`.
    ///
    /// The factory defaults are written into `settings` first, the way a host
    /// prepares a fresh settings object before creating the instance.
    pub fn create(
        &self,
        id: &str,
        settings: &mut SettingsData,
        target: H::Source,
        host: &mut H,
    ) -> Result<Box<dyn VideoFilter<H>>, RegistryError> {
        let factory = self
            .get(id)
            .ok_or_else(|| RegistryError::UnknownFilter(id.to_owned()))?;
        factory.defaults(settings);
        Ok(factory.create(settings, target, host))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;
    use crate::filter::{FakeLightingFactory, FILTER_ID, SOURCE_KEY};
    use crate::host::mock::{Call, MockHost};
    use crate::locale::Locale;

    fn registry() -> FilterRegistry<MockHost> {
        let mut registry = FilterRegistry::new();
        registry
            .register(Box::new(FakeLightingFactory::new(
                PathBuf::from("fake_lighting.wgsl"),
                Rc::new(Locale::default()),
            )))
            .unwrap();
        registry
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry();
        let again = registry.register(Box::new(FakeLightingFactory::new(
            PathBuf::from("other.wgsl"),
            Rc::new(Locale::default()),
        )));
        assert_eq!(again, Err(RegistryError::Duplicate(FILTER_ID.into())));
        assert_eq!(registry.ids(), vec![FILTER_ID]);
    }

    #[test]
    fn create_applies_defaults() {
        let registry = registry();
        let mut host = MockHost::new();
        let target = host.add_source("Camera", 640, 480);
        let mut settings = SettingsData::new();
        settings.set_string(SOURCE_KEY, "");

        let mut filter = registry
            .create(FILTER_ID, &mut settings, target, &mut host)
            .unwrap();

        assert_eq!(settings.get_int("partitions"), 8);
        assert!(!settings.has_user_value("partitions"));

        host.clear_calls();
        filter.video_render(&mut host);
        assert!(host.calls().contains(&Call::SetInt("partitions", 8)));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = registry();
        let mut host = MockHost::new();
        let target = host.add_source("Camera", 640, 480);
        let err = registry
            .create("color_key", &mut SettingsData::new(), target, &mut host)
            .err();
        assert_eq!(err, Some(RegistryError::UnknownFilter("color_key".into())));
    }
}
