//! Static dot-grid placeholder.

use glam::Vec2;

use super::Backdrop;
use crate::contour::Segment;
use crate::field::PointerState;
use crate::params::{Color, DotGridParams, LineStyle};
use crate::surface::StrokeSurface;

/// Evenly spaced dots; no animation and no pointer response
pub struct DotGridBackdrop {
    params: DotGridParams,
    background: Color,
    /// Zero-length segments, one per dot
    dots: Vec<Segment>,
}

impl DotGridBackdrop {
    pub fn new(params: DotGridParams, background: Color, width: f32, height: f32) -> Self {
        let mut backdrop = Self {
            params,
            background,
            dots: Vec::new(),
        };
        backdrop.resize(width, height);
        backdrop
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }
}

impl Backdrop for DotGridBackdrop {
    fn resize(&mut self, width: f32, height: f32) {
        let spacing = self.params.spacing;
        // First dot half a spacing in, like a tiled radial gradient
        let cols = (width.max(0.0) / spacing).ceil() as usize;
        let rows = (height.max(0.0) / spacing).ceil() as usize;

        self.dots.clear();
        for y in 0..rows {
            for x in 0..cols {
                let center = Vec2::new((x as f32 + 0.5) * spacing, (y as f32 + 0.5) * spacing);
                self.dots.push(Segment::new(center, center));
            }
        }
    }

    fn render_frame(&mut self, _pointer: &PointerState, surface: &mut dyn StrokeSurface) {
        surface.fill(self.background);
        let style = LineStyle {
            color: self.params.color,
            opacity: self.params.opacity,
            width: self.params.radius * 2.0,
        };
        surface.stroke_path(&self.dots, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    #[test]
    fn test_dot_count_tracks_size() {
        let params = DotGridParams {
            spacing: 20.0,
            ..Default::default()
        };
        let mut backdrop = DotGridBackdrop::new(params, Color::rgb(255, 255, 255), 100.0, 50.0);
        assert_eq!(backdrop.dot_count(), 5 * 3);

        backdrop.resize(200.0, 200.0);
        assert_eq!(backdrop.dot_count(), 10 * 10);
    }

    #[test]
    fn test_renders_dots_between_gaps() {
        let params = DotGridParams {
            spacing: 10.0,
            radius: 1.0,
            color: Color::rgb(0, 0, 0),
            opacity: 1.0,
        };
        let mut backdrop = DotGridBackdrop::new(params, Color::rgb(255, 255, 255), 20.0, 20.0);
        let mut surface = RasterSurface::new(20, 20, 1.0);
        backdrop.render_frame(&PointerState::new(), &mut surface);

        // Dot centered at (5, 5); gap at the cell corner
        assert!(surface.image().get_pixel(4, 4)[0] < 128);
        assert_eq!(surface.image().get_pixel(0, 0)[0], 255);
    }
}
