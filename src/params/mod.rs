//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers of the background live here with:
//! - Units (logical pixels, frames)
//! - Documented ranges and meanings
//! - A `validate()` for anything user-overridable

mod color;
mod contour;
mod field;
mod render;

use clap::ValueEnum;

use crate::error::Result;

// Re-export all types
pub use color::Color;
pub use contour::{LevelSet, LineStyle};
pub use field::FieldParams;
pub use render::{DotGridParams, RecordingConfig, RenderConfig};

/// Which background to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackdropStyle {
    /// Animated noise contour map
    #[default]
    Contour,

    /// Static dot grid
    Dots,
}

/// Which gradient noise drives the contour map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NoiseKind {
    /// Classic 3D simplex noise with a shuffled permutation table
    #[default]
    Simplex,

    /// OpenSimplex from the `noise` crate
    OpenSimplex,
}

/// Everything needed to build and drive one background instance
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub style: BackdropStyle,
    pub noise: NoiseKind,

    /// Fixed seed; `None` reseeds on every run
    pub seed: Option<u64>,

    pub field: FieldParams,
    pub levels: LevelSet,
    pub line: LineStyle,
    pub dots: DotGridParams,
    pub render: RenderConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.levels.validate()?;
        self.line.validate()?;
        self.dots.validate()?;
        self.render.validate()
    }
}
