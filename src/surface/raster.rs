//! CPU rasterizer for headless frames.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::StrokeSurface;
use crate::contour::Segment;
use crate::error::Result;
use crate::params::{Color, LineStyle};

/// Anti-aliased round-capped strokes into an RGBA image
///
/// Blending happens in sRGB space, like a 2D canvas. Each path is first
/// accumulated into a coverage mask (max per pixel) and composited once.
pub struct RasterSurface {
    image: RgbaImage,
    /// Device pixels per logical pixel
    scale: f32,
    coverage: Vec<f32>,
}

/// Inclusive pixel bounds touched by the current path
#[derive(Clone, Copy)]
struct Bounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl RasterSurface {
    /// `width` x `height` device pixels
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            scale,
            coverage: vec![0.0; width as usize * height as usize],
        }
    }

    /// Logical surface size
    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(
            self.image.width() as f32 / self.scale,
            self.image.height() as f32 / self.scale,
        )
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Rasterize one capsule into the coverage mask
    fn cover_segment(&mut self, segment: &Segment, half_width: f32) -> Option<Bounds> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return None;
        }

        let a = segment.start * self.scale;
        let b = segment.end * self.scale;
        let reach = half_width + 1.0;

        let min = a.min(b) - Vec2::splat(reach);
        let max = a.max(b) + Vec2::splat(reach);
        if max.x < 0.0 || max.y < 0.0 || min.x >= w as f32 || min.y >= h as f32 {
            return None;
        }

        let bounds = Bounds {
            x0: min.x.max(0.0) as u32,
            y0: min.y.max(0.0) as u32,
            x1: (max.x as u32).min(w - 1),
            y1: (max.y as u32).min(h - 1),
        };

        let ab = b - a;
        let len2 = ab.length_squared();
        for py in bounds.y0..=bounds.y1 {
            for px in bounds.x0..=bounds.x1 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let t = if len2 > 0.0 {
                    ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(a + ab * t);
                let cov = (half_width + 0.5 - d).clamp(0.0, 1.0);
                if cov > 0.0 {
                    let idx = py as usize * w as usize + px as usize;
                    self.coverage[idx] = self.coverage[idx].max(cov);
                }
            }
        }
        Some(bounds)
    }
}

impl StrokeSurface for RasterSurface {
    fn fill(&mut self, color: Color) {
        let px = Rgba([color.r, color.g, color.b, 255]);
        for pixel in self.image.pixels_mut() {
            *pixel = px;
        }
    }

    fn stroke_path(&mut self, segments: &[Segment], style: &LineStyle) {
        let half_width = style.width * self.scale / 2.0;

        let mut dirty: Option<Bounds> = None;
        for segment in segments {
            if let Some(b) = self.cover_segment(segment, half_width) {
                dirty = Some(match dirty {
                    None => b,
                    Some(d) => Bounds {
                        x0: d.x0.min(b.x0),
                        y0: d.y0.min(b.y0),
                        x1: d.x1.max(b.x1),
                        y1: d.y1.max(b.y1),
                    },
                });
            }
        }
        let Some(dirty) = dirty else {
            return;
        };

        let src = style.color.to_srgb_f32();
        let w = self.image.width();
        for y in dirty.y0..=dirty.y1 {
            for x in dirty.x0..=dirty.x1 {
                let idx = y as usize * w as usize + x as usize;
                let cov = std::mem::take(&mut self.coverage[idx]);
                if cov <= 0.0 {
                    continue;
                }
                let alpha = cov * style.opacity;
                let dst = self.image.get_pixel_mut(x, y);
                for c in 0..3 {
                    let blended = src[c] * alpha + dst[c] as f32 / 255.0 * (1.0 - alpha);
                    dst[c] = (blended * 255.0).round().clamp(0.0, 255.0) as u8;
                }
                dst[3] = 255;
            }
        }
    }
}
