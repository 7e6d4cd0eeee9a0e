//! Windowless rendering to PNG files.

use std::path::Path;
use std::time::Instant;

use glam::Vec2;

use crate::animation::Animation;
use crate::backdrop::build_backdrop;
use crate::error::Result;
use crate::params::{RecordingConfig, Settings};
use crate::surface::RasterSurface;

/// Animation with a raster target sized from `settings`
///
/// Headless frames are never throttled: each one advances the noise clock by
/// exactly one time step. The image is `pixel_ratio` times the logical size;
/// the field and the pointer stay in logical pixels.
fn headless_animation(settings: &Settings, pointer: Option<Vec2>) -> (Animation, RasterSurface) {
    let (width, height) = settings.render.device_size();
    let surface = RasterSurface::new(width as u32, height as u32, settings.render.pixel_ratio);

    let logical = surface.logical_size();
    let backdrop = build_backdrop(settings, logical.x, logical.y);
    let mut animation = Animation::new(backdrop, None);
    if let (Some(position), Some(state)) = (pointer, animation.pointer_mut()) {
        state.move_to(position);
    }

    (animation, surface)
}

/// Advance `frames` frames and save the last one
pub fn snapshot(
    settings: &Settings,
    path: &Path,
    frames: usize,
    pointer: Option<Vec2>,
) -> Result<()> {
    let (mut animation, mut surface) = headless_animation(settings, pointer);

    let start = Instant::now();
    for _ in 0..frames.max(1) {
        animation.tick(Instant::now(), &mut surface);
    }
    surface.save(path)?;

    log::info!(
        "wrote {} after {} frames in {:.1}ms",
        path.display(),
        animation.frames(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Write every frame of a recording to `config.frames_dir()`
pub fn record(settings: &Settings, config: &RecordingConfig, pointer: Option<Vec2>) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all(config.frames_dir())?;

    let (mut animation, mut surface) = headless_animation(settings, pointer);
    let total = config.total_frames();
    log::info!(
        "recording {} frames ({}s at {} fps) to {}",
        total,
        config.duration_secs,
        config.fps,
        config.frames_dir().display()
    );

    for n in 0..total {
        animation.tick(Instant::now(), &mut surface);
        surface.save(config.frame_path(n))?;
        if (n + 1) % config.fps.max(1) as usize == 0 {
            log::debug!("recorded {}/{} frames", n + 1, total);
        }
    }

    log::info!("recording complete");
    Ok(())
}
