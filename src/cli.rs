//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use crate::error::Result;
use crate::params::{BackdropStyle, Color, NoiseKind, RecordingConfig, Settings};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "contourfield")]
#[command(about = "Animated noise contour background", long_about = None)]
pub struct Args {
    /// Window width (logical pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Background style
    #[arg(long, value_enum, default_value_t = BackdropStyle::Contour)]
    pub style: BackdropStyle,

    /// Noise implementation driving the contour map
    #[arg(long, value_enum, default_value_t = NoiseKind::Simplex)]
    pub noise: NoiseKind,

    /// Fixed noise seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Grid spacing (px)
    #[arg(long, value_name = "PX", default_value_t = 10.0)]
    pub cell_size: f32,

    /// Spatial frequency of the noise
    #[arg(long, default_value_t = 0.0015)]
    pub noise_scale: f64,

    /// Noise time advance per frame
    #[arg(long, default_value_t = 0.002)]
    pub time_step: f64,

    /// Number of contour levels
    #[arg(long, default_value_t = 10)]
    pub levels: usize,

    /// Lowest contour threshold
    #[arg(long, default_value_t = -0.7, allow_hyphen_values = true)]
    pub level_min: f32,

    /// Highest contour threshold
    #[arg(long, default_value_t = 0.7, allow_hyphen_values = true)]
    pub level_max: f32,

    /// Pointer influence radius (px)
    #[arg(long, value_name = "PX", default_value_t = 200.0)]
    pub repel_radius: f32,

    /// Field depression at the pointer
    #[arg(long, default_value_t = 0.8, allow_hyphen_values = true)]
    pub repel_strength: f32,

    /// Contour line color (#rrggbb)
    #[arg(long, default_value = "#e5e7eb", value_parser = parse_color)]
    pub line_color: Color,

    /// Contour line opacity (0-1)
    #[arg(long, default_value_t = 1.0)]
    pub line_opacity: f32,

    /// Contour line width (px)
    #[arg(long, value_name = "PX", default_value_t = 1.0)]
    pub line_width: f32,

    /// Background color (#rrggbb)
    #[arg(long, default_value = "#fcfcfa", value_parser = parse_color)]
    pub bg_color: Color,

    /// Device pixels per logical pixel for --snapshot and --record
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Cap the frame rate (frames are skipped, not slowed)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Render headlessly and save the last frame as PNG
    #[arg(long, value_name = "PATH", conflicts_with = "record")]
    pub snapshot: Option<PathBuf>,

    /// Frames to advance before the snapshot is taken
    #[arg(long, default_value_t = 1, requires = "snapshot")]
    pub frames: usize,

    /// Pointer position for headless output
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub pointer: Option<Vec<f32>>,

    /// Record frames headlessly to recording/frames (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

fn parse_color(s: &str) -> std::result::Result<Color, String> {
    Color::from_hex(s).map_err(|e| e.to_string())
}

impl Args {
    /// Validated settings from the command line
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings {
            style: self.style,
            noise: self.noise,
            seed: self.seed,
            ..Default::default()
        };

        settings.field.cell_size = self.cell_size;
        settings.field.noise_scale = self.noise_scale;
        settings.field.time_step = self.time_step;
        settings.field.repel_radius = self.repel_radius;
        settings.field.repel_strength = self.repel_strength;

        settings.levels.count = self.levels;
        settings.levels.start = self.level_min;
        settings.levels.end = self.level_max;

        settings.line.color = self.line_color;
        settings.line.opacity = self.line_opacity;
        settings.line.width = self.line_width;

        settings.render.window_width = self.width;
        settings.render.window_height = self.height;
        settings.render.background = self.bg_color;
        settings.render.target_fps = self.fps;
        settings.render.pixel_ratio = self.scale;

        settings.validate()?;
        Ok(settings)
    }

    /// Pointer for headless rendering, if given
    pub fn pointer_position(&self) -> Option<Vec2> {
        match self.pointer.as_deref() {
            Some([x, y]) => Some(Vec2::new(*x, *y)),
            _ => None,
        }
    }

    /// Validated recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);
        config.validate()?;
        Ok(Some(config))
    }
}
