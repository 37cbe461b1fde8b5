use crate::host::SceneGraph;

/// Light-source element referenced by name.
///
/// The handle may be unset: the name can be empty, or the element may not
/// exist yet because the filter was created before the scene was populated.
/// An unset handle is a normal state and is retried by name each frame.
#[derive(Debug, Clone)]
pub struct LightSource<S> {
    name: String,
    handle: Option<S>,
    warned: bool,
}

impl<S> Default for LightSource<S> {
    fn default() -> Self {
        Self {
            name: String::new(),
            handle: None,
            warned: false,
        }
    }
}

impl<S: Clone> LightSource<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> Option<&S> {
        self.handle.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.handle.is_some()
    }

    /// Records `name` and looks it up. An empty or unknown name leaves the
    /// handle unset; the previous handle is released either way.
    pub fn resolve<H>(&mut self, host: &mut H, name: &str)
    where
        H: SceneGraph<Source = S> + ?Sized,
    {
        self.name.clear();
        self.name.push_str(name);
        self.handle = if name.is_empty() {
            None
        } else {
            host.source_by_name(name)
        };
        self.warned = false;
    }

    /// Retries the lookup when the handle is unset and a name is recorded.
    pub fn ensure_resolved<H>(&mut self, host: &mut H) -> Option<&S>
    where
        H: SceneGraph<Source = S> + ?Sized,
    {
        if self.handle.is_none() && !self.name.is_empty() {
            if self.warned {
                log::debug!("light source '{}' still missing, retrying", self.name);
            } else {
                log::warn!("light source '{}' not loaded, retrying by name", self.name);
                self.warned = true;
            }

            self.handle = host.source_by_name(&self.name);
            if self.handle.is_some() {
                log::info!("light source '{}' resolved", self.name);
                self.warned = false;
            }
        }
        self.handle.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::host::mock::{Call, MockHost, MockSource};

    #[test]
    fn empty_name_is_not_looked_up() {
        let mut host = MockHost::new();
        let mut light = LightSource::<MockSource>::new();

        light.resolve(&mut host, "");
        assert!(light.ensure_resolved(&mut host).is_none());
        assert_eq!(host.count(|c| matches!(c, Call::LookupSource(_))), 0);
    }

    #[test]
    fn late_element_is_picked_up() {
        let mut host = MockHost::new();
        let mut light = LightSource::new();

        light.resolve(&mut host, "LightA");
        assert!(!light.is_resolved());
        assert!(light.ensure_resolved(&mut host).is_none());

        host.add_source("LightA", 64, 64);
        let resolved = light.ensure_resolved(&mut host).map(|s| s.name.clone());
        assert_eq!(resolved.as_deref(), Some("LightA"));
        assert_eq!(light.name(), "LightA");
    }

    #[test]
    fn resolved_handle_is_not_looked_up_again() {
        let mut host = MockHost::new();
        host.add_source("LightA", 64, 64);
        let mut light = LightSource::new();
        light.resolve(&mut host, "LightA");
        host.clear_calls();

        for _ in 0..3 {
            assert!(light.ensure_resolved(&mut host).is_some());
        }
        assert!(host.calls().is_empty());
    }

    #[test]
    fn re_resolve_releases_previous_handle() {
        let mut host = MockHost::new();
        let a = host.add_source("LightA", 64, 64);
        host.add_source("LightB", 64, 64);
        let mut light = LightSource::new();

        light.resolve(&mut host, "LightA");
        assert_eq!(Rc::strong_count(&a), 3);

        light.resolve(&mut host, "LightB");
        assert_eq!(Rc::strong_count(&a), 2);
        assert_eq!(light.handle().map(|s| s.name.as_str()), Some("LightB"));
    }
}
