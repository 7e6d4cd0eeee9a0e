//! Contour level set and stroke style.

use super::color::Color;
use crate::error::{invalid, Result};

/// Evenly spaced elevation thresholds, drawn in increasing order
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    /// Number of contour sweeps per frame
    pub count: usize,

    /// Lowest threshold (inclusive)
    pub start: f32,

    /// Highest threshold (inclusive)
    pub end: f32,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self {
            count: 10,
            start: -0.7,
            end: 0.7,
        }
    }
}

impl LevelSet {
    pub fn new(count: usize, start: f32, end: f32) -> Self {
        Self { count, start, end }
    }

    /// Threshold for level `l` (0-based)
    ///
    /// A single level sits at the middle of the range.
    pub fn threshold(&self, l: usize) -> f32 {
        if self.count <= 1 {
            return (self.start + self.end) / 2.0;
        }
        let range = self.end - self.start;
        self.start + (l as f32 / (self.count - 1) as f32) * range
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count).map(move |l| self.threshold(l))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(invalid("level range must be finite"));
        }
        if self.start > self.end {
            return Err(invalid(format!(
                "level range is inverted: {} > {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// How a path of segments is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,

    /// 0 = invisible, 1 = opaque
    pub opacity: f32,

    /// Stroke width (logical px), round caps
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0xe5, 0xe7, 0xeb),
            opacity: 1.0,
            width: 1.0,
        }
    }
}

impl LineStyle {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(invalid(format!(
                "line opacity must be in 0..=1, got {}",
                self.opacity
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(invalid(format!("line width must be > 0, got {}", self.width)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_span_range() {
        let levels: Vec<f32> = LevelSet::default().thresholds().collect();
        assert_eq!(levels.len(), 10);
        assert!((levels[0] + 0.7).abs() < 1e-6);
        assert!((levels[9] - 0.7).abs() < 1e-6);

        // Evenly spaced, increasing
        let step = levels[1] - levels[0];
        for pair in levels.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_counts() {
        assert_eq!(LevelSet::new(0, -1.0, 1.0).thresholds().count(), 0);

        let single: Vec<f32> = LevelSet::new(1, -0.4, 0.8).thresholds().collect();
        assert_eq!(single.len(), 1);
        assert!((single[0] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(LevelSet::new(5, 1.0, -1.0).validate().is_err());
    }

    #[test]
    fn test_line_style_bounds() {
        assert!(LineStyle::default().validate().is_ok());
        let faded = LineStyle {
            opacity: 1.5,
            ..Default::default()
        };
        assert!(faded.validate().is_err());
    }
}
