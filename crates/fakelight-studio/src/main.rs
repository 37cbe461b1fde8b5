//! Renders the fake lighting filter over a configured scene and saves the
//! final frame as a PNG.
//!
//! Usage: `fakelight-studio [studio.toml]`

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fakelight_core::filter::FILTER_ID;
use fakelight_core::logging::{init_logging, LoggingConfig};
use fakelight_core::module::Module;
use fakelight_core::settings::SettingsData;
use fakelight_engine::device::GpuInit;
use fakelight_engine::{FramePixels, SourceKind, SourceRef, StudioHost};

use config::{SourceConfig, StudioConfig, DEFAULT_CONFIG};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    let mut config = StudioConfig::load(&path)?;
    config.merge_with_env();

    init_logging(LoggingConfig {
        env_filter: config.logging.filter.clone(),
        ..Default::default()
    });
    if !path.exists() {
        log::info!("{} not found; using the built-in scene", path.display());
    }

    run(&config)
}

fn run(config: &StudioConfig) -> Result<()> {
    let mut host = StudioHost::new(GpuInit::default())?;
    let module: Module<StudioHost> = Module::load(config.module.to_module_config());

    let output = (config.output.width, config.output.height);
    let target = add_source(&mut host, &config.target, output)?;

    let mut pending: Vec<&SourceConfig> = config.lights.iter().collect();
    add_due_sources(&mut host, &mut pending, 0, output)?;

    let mut settings = SettingsData::new();
    config.filter.write_to(&mut settings);
    let mut filter = module
        .registry()
        .create(FILTER_ID, &mut settings, target, &mut host)?;

    for frame in 0..config.output.frames {
        // Late elements reproduce a scene that is still loading when the
        // filter starts.
        add_due_sources(&mut host, &mut pending, frame, output)?;

        host.begin_frame(output.0, output.1)?;
        filter.video_render(&mut host);
        host.end_frame();
    }

    if host.frames_rendered() == 0 {
        log::warn!("no frames rendered; nothing to save");
        return Ok(());
    }

    let pixels = host.read_output()?;
    save_png(&config.output.path, &pixels)?;
    log::info!(
        "wrote {} ({}x{}, {} frames, {} passed through)",
        config.output.path.display(),
        pixels.width,
        pixels.height,
        host.frames_rendered(),
        host.skipped_filters()
    );

    drop(filter);
    module.unload();
    Ok(())
}

fn add_due_sources(
    host: &mut StudioHost,
    pending: &mut Vec<&SourceConfig>,
    frame: u32,
    output: (u32, u32),
) -> Result<()> {
    let (due, later): (Vec<_>, Vec<_>) = pending
        .iter()
        .copied()
        .partition(|s| s.appear_at_frame <= frame);
    for source in due {
        add_source(host, source, output)?;
    }
    *pending = later;
    Ok(())
}

fn add_source(host: &mut StudioHost, source: &SourceConfig, output: (u32, u32)) -> Result<SourceRef> {
    let kind = if source.scene { SourceKind::Scene } else { SourceKind::Input };
    match &source.image {
        Some(path) => {
            let img = image::open(path)
                .with_context(|| format!("failed to load image {}", path.display()))?
                .to_rgba8();
            let (width, height) = img.dimensions();
            host.add_image_source(&source.name, kind, width, height, img.as_raw())
        }
        None => host.add_color_source(
            &source.name,
            kind,
            source.width.unwrap_or(output.0),
            source.height.unwrap_or(output.1),
            source.color,
        ),
    }
}

fn save_png(path: &Path, pixels: &FramePixels) -> Result<()> {
    let img = image::RgbaImage::from_raw(pixels.width, pixels.height, pixels.rgba.clone())
        .context("frame buffer does not match its size")?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
