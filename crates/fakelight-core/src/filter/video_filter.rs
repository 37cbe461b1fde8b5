use crate::host::Host;
use crate::properties::Properties;
use crate::settings::SettingsData;

/// Kind of element a registration describes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SourceType {
    Input,
    Filter,
    Transition,
    Scene,
}

/// Output capabilities of a registered element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct OutputFlags(u32);

impl OutputFlags {
    pub const VIDEO: Self = Self(1);
    pub const AUDIO: Self = Self(1 << 1);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Static description of a filter registration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FilterInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: SourceType,
    pub output_flags: OutputFlags,
}

/// A filter instance attached to one element.
///
/// Destroying the instance is dropping it.
pub trait VideoFilter<H: Host> {
    /// Applies a new settings snapshot.
    fn update(&mut self, settings: &SettingsData, host: &mut H);

    /// Renders one frame. Called on the render thread.
    fn video_render(&mut self, host: &mut H);

    /// UI schema for this instance.
    fn properties(&self, host: &H) -> Properties;
}

/// Creates filter instances; one per registered filter kind.
pub trait FilterFactory<H: Host> {
    fn info(&self) -> FilterInfo;

    /// Fills the default table of `settings`.
    fn defaults(&self, settings: &mut SettingsData);

    fn create(
        &self,
        settings: &SettingsData,
        target: H::Source,
        host: &mut H,
    ) -> Box<dyn VideoFilter<H>>;
}
