//! Interchangeable background styles behind one per-frame contract.

mod contour_map;
mod dot_grid;

pub use contour_map::ContourBackdrop;
pub use dot_grid::DotGridBackdrop;

use crate::field::PointerState;
use crate::noise::build_noise;
use crate::params::{BackdropStyle, Settings};
use crate::surface::StrokeSurface;

/// A background that can draw itself once per frame
pub trait Backdrop {
    /// Surface changed size (logical pixels)
    fn resize(&mut self, width: f32, height: f32);

    /// Draw one complete frame, background fill included
    fn render_frame(&mut self, pointer: &PointerState, surface: &mut dyn StrokeSurface);
}

/// Build the style selected in `settings` for a `width` x `height` surface
pub fn build_backdrop(settings: &Settings, width: f32, height: f32) -> Box<dyn Backdrop> {
    match settings.style {
        BackdropStyle::Contour => {
            let noise = build_noise(settings.noise, settings.seed);
            Box::new(ContourBackdrop::new(
                noise,
                settings.field.clone(),
                settings.levels.clone(),
                settings.line,
                settings.render.background,
                width,
                height,
            ))
        }
        BackdropStyle::Dots => Box::new(DotGridBackdrop::new(
            settings.dots.clone(),
            settings.render.background,
            width,
            height,
        )),
    }
}
