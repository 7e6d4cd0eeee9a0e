//! Animated contour map over a noise field.

use super::Backdrop;
use crate::contour::{render_levels, Segment};
use crate::field::{PointerState, ScalarField};
use crate::noise::NoiseSource;
use crate::params::{Color, FieldParams, LevelSet, LineStyle};
use crate::surface::StrokeSurface;

/// Noise field and contour renderer with its own clock
pub struct ContourBackdrop {
    noise: Box<dyn NoiseSource>,
    params: FieldParams,
    levels: LevelSet,
    line: LineStyle,
    background: Color,
    field: ScalarField,
    /// Third noise coordinate, advanced once per rendered frame
    time: f64,
    scratch: Vec<Segment>,
}

impl ContourBackdrop {
    pub fn new(
        noise: Box<dyn NoiseSource>,
        params: FieldParams,
        levels: LevelSet,
        line: LineStyle,
        background: Color,
        width: f32,
        height: f32,
    ) -> Self {
        let field = ScalarField::for_surface(width, height, params.cell_size);
        log::debug!("contour grid {}x{}", field.cols(), field.rows());
        Self {
            noise,
            params,
            levels,
            line,
            background,
            field,
            time: 0.0,
            scratch: Vec::new(),
        }
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

impl Backdrop for ContourBackdrop {
    fn resize(&mut self, width: f32, height: f32) {
        if self.field.resize(width, height) {
            log::debug!(
                "contour grid resized to {}x{} for {}x{}",
                self.field.cols(),
                self.field.rows(),
                width,
                height
            );
        }
    }

    fn render_frame(&mut self, pointer: &PointerState, surface: &mut dyn StrokeSurface) {
        surface.fill(self.background);

        self.time += self.params.time_step;
        self.field
            .advance(self.noise.as_ref(), &self.params, self.time, pointer);

        render_levels(&self.field, &self.levels, &self.line, surface, &mut self.scratch);
    }
}
