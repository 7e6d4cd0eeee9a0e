//! Drawing targets for contour strokes.
//!
//! A frame is one [`StrokeSurface::fill`] followed by any number of
//! [`StrokeSurface::stroke_path`] calls. Coordinates are logical pixels with
//! the origin at the top-left corner.

mod batch;
mod raster;

pub use batch::{FrameBatch, LineVertex, MAX_PATHS_PER_PASS};
pub use raster::RasterSurface;

use crate::contour::Segment;
use crate::params::{Color, LineStyle};

/// Abstract 2D stroke surface
pub trait StrokeSurface {
    /// Cover the whole surface with an opaque color
    fn fill(&mut self, color: Color);

    /// Stroke `segments` as a single path
    ///
    /// Overlapping segments of one path are not blended twice.
    fn stroke_path(&mut self, segments: &[Segment], style: &LineStyle);
}
