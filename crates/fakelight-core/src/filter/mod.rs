//! Filter registration contract and the fake lighting filter.

mod fake_lighting;
mod params;
mod registry;
mod video_filter;

pub use fake_lighting::{FakeLighting, FakeLightingFactory, FILTER_ID, FILTER_NAME};
pub use params::{
    FloatSetting, IntSetting, LightingParams, CONTRAST, INTENSITY, PARTITIONS, SATURATION,
    SOURCE_KEY, SUB_DIVISIONS,
};
pub use registry::FilterRegistry;
pub use video_filter::{FilterFactory, FilterInfo, OutputFlags, SourceType, VideoFilter};
