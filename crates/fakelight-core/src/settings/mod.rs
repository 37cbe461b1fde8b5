//! Settings snapshots delivered by the host.
//!
//! [`SettingsData`] mirrors the host's key/value settings object (user values
//! over a defaults table). [`FilterSettings`] is the typed, persisted shape of
//! the fake lighting settings.

mod data;
mod filter_settings;

pub use data::SettingsData;
pub use filter_settings::FilterSettings;
