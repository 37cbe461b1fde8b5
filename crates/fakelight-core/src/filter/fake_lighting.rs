use std::path::PathBuf;
use std::rc::Rc;

use crate::host::Host;
use crate::locale::Locale;
use crate::properties::{ComboFormat, ComboType, FloatSlider, IntSlider, ListProperty, Properties};
use crate::render::{CompositeOutcome, CompositePass, LightSource};
use crate::settings::{FilterSettings, SettingsData};

use super::params::{CONTRAST, INTENSITY, PARTITIONS, SATURATION, SOURCE_KEY, SUB_DIVISIONS};
use super::{
    FilterFactory, FilterInfo, FloatSetting, IntSetting, LightingParams, OutputFlags, SourceType,
    VideoFilter,
};

pub const FILTER_ID: &str = "fake_lighting";
pub const FILTER_NAME: &str = "Mixed Reality Fake Lighting";

/// The fake lighting filter attached to one target element.
pub struct FakeLighting<H: Host> {
    /// Element being filtered; held for the lifetime of the attachment.
    target: H::Source,
    light: LightSource<H::Source>,
    params: LightingParams,
    pass: CompositePass<H>,
    locale: Rc<Locale>,
}

impl<H: Host> FakeLighting<H> {
    /// Loads the effect at `effect_path` and applies the initial settings.
    pub fn create(
        settings: &SettingsData,
        target: H::Source,
        host: &mut H,
        effect_path: &std::path::Path,
        locale: Rc<Locale>,
    ) -> Self {
        log::info!("creating fake lighting on '{}'", host.source_name(&target));

        let pass = CompositePass::load(host, effect_path);
        let mut filter = Self {
            target,
            light: LightSource::new(),
            params: LightingParams::default(),
            pass,
            locale,
        };
        filter.apply(settings, host);
        filter
    }

    fn apply(&mut self, settings: &SettingsData, host: &mut H) {
        let snapshot = FilterSettings::read(settings);
        self.light.resolve(host, &snapshot.source);
        self.params = snapshot.params();
        log::debug!("light source set to '{}'", snapshot.source);
    }

    pub fn target(&self) -> &H::Source {
        &self.target
    }

    pub fn params(&self) -> &LightingParams {
        &self.params
    }

    pub fn light_source(&self) -> &LightSource<H::Source> {
        &self.light
    }

    pub fn composite_pass(&self) -> &CompositePass<H> {
        &self.pass
    }

    /// Renders one frame and reports what happened.
    pub fn render_frame(&mut self, host: &mut H) -> CompositeOutcome {
        self.pass
            .composite(host, &self.target, &mut self.light, &self.params)
    }

    fn float_slider(&self, setting: FloatSetting) -> FloatSlider {
        FloatSlider {
            name: setting.key.to_owned(),
            description: self.locale.text(setting.label).to_owned(),
            min: setting.min,
            max: setting.max,
            step: setting.step,
        }
    }

    fn int_slider(&self, setting: IntSetting) -> IntSlider {
        IntSlider {
            name: setting.key.to_owned(),
            description: self.locale.text(setting.label).to_owned(),
            min: setting.min,
            max: setting.max,
            step: setting.step,
        }
    }
}

impl<H: Host> VideoFilter<H> for FakeLighting<H> {
    fn update(&mut self, settings: &SettingsData, host: &mut H) {
        self.apply(settings, host);
    }

    fn video_render(&mut self, host: &mut H) {
        self.render_frame(host);
    }

    fn properties(&self, host: &H) -> Properties {
        let mut sources = ListProperty::new(
            SOURCE_KEY,
            self.locale.text("Source"),
            ComboType::Editable,
            ComboFormat::String,
        );
        for name in host.enum_sources().into_iter().chain(host.enum_scenes()) {
            sources.insert_sorted(&name);
        }
        sources.insert_string(0, "", "");

        let mut props = Properties::new();
        props.add(sources);
        props.add(self.int_slider(PARTITIONS));
        props.add(self.int_slider(SUB_DIVISIONS));
        props.add(self.float_slider(SATURATION));
        props.add(self.float_slider(INTENSITY));
        props.add(self.float_slider(CONTRAST));
        props
    }
}

/// Registration of [`FakeLighting`].
pub struct FakeLightingFactory {
    effect_path: PathBuf,
    locale: Rc<Locale>,
}

impl FakeLightingFactory {
    pub fn new(effect_path: PathBuf, locale: Rc<Locale>) -> Self {
        Self {
            effect_path,
            locale,
        }
    }
}

impl<H: Host + 'static> FilterFactory<H> for FakeLightingFactory {
    fn info(&self) -> FilterInfo {
        FilterInfo {
            id: FILTER_ID,
            name: FILTER_NAME,
            kind: SourceType::Filter,
            output_flags: OutputFlags::VIDEO,
        }
    }

    fn defaults(&self, settings: &mut SettingsData) {
        log::debug!("setting fake lighting defaults");
        LightingParams::write_defaults(settings);
    }

    fn create(
        &self,
        settings: &SettingsData,
        target: H::Source,
        host: &mut H,
    ) -> Box<dyn VideoFilter<H>> {
        Box::new(FakeLighting::create(
            settings,
            target,
            host,
            &self.effect_path,
            self.locale.clone(),
        ))
    }
}
