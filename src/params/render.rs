//! Rendering, dot grid and recording configuration.

use std::path::PathBuf;

use super::color::Color;
use crate::error::{invalid, Result};

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Surface fill before any stroke
    pub background: Color,

    /// Frame rate cap; `None` = every display refresh
    pub target_fps: Option<u32>,

    /// Device pixels per logical pixel for headless output
    pub pixel_ratio: f32,
}

/// Largest surface edge accepted (device pixels)
pub const MAX_SURFACE_DIMENSION: u32 = 16384;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            background: Color::rgb(0xfc, 0xfc, 0xfa),
            target_fps: None,
            pixel_ratio: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.target_fps == Some(0) {
            return Err(invalid("target fps must be > 0"));
        }
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            return Err(invalid(format!(
                "pixel ratio must be > 0, got {}",
                self.pixel_ratio
            )));
        }
        let (width, height) = self.device_size();
        if width > MAX_SURFACE_DIMENSION as f32 || height > MAX_SURFACE_DIMENSION as f32 {
            return Err(invalid(format!(
                "surface {}x{} at ratio {} exceeds {}px",
                self.window_width, self.window_height, self.pixel_ratio, MAX_SURFACE_DIMENSION
            )));
        }
        Ok(())
    }

    /// Headless image size in device pixels
    pub fn device_size(&self) -> (f32, f32) {
        (
            (self.window_width as f32 * self.pixel_ratio).round(),
            (self.window_height as f32 * self.pixel_ratio).round(),
        )
    }
}

/// Static dot-grid placeholder style
#[derive(Debug, Clone)]
pub struct DotGridParams {
    /// Distance between dot centers (px)
    pub spacing: f32,

    /// Dot radius (px)
    pub radius: f32,

    pub color: Color,

    pub opacity: f32,
}

impl Default for DotGridParams {
    fn default() -> Self {
        Self {
            spacing: 24.0,
            radius: 1.0,
            color: Color::rgb(0xd1, 0xd5, 0xdb),
            opacity: 1.0,
        }
    }
}

impl DotGridParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(invalid(format!(
                "dot spacing must be > 0, got {}",
                self.spacing
            )));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("dot radius must be > 0, got {}", self.radius)));
        }
        Ok(())
    }
}

/// Headless recording configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(invalid(format!(
                "recording duration must be > 0 seconds, got {}",
                self.duration_secs
            )));
        }
        if self.fps == 0 {
            return Err(invalid("recording fps must be > 0"));
        }
        Ok(())
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil().max(0.0) as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of frame `n`
    pub fn frame_path(&self, n: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", n))
    }
}
