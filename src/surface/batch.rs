//! Tessellates strokes into triangles for the GPU pipeline.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::StrokeSurface;
use crate::contour::Segment;
use crate::params::{Color, LineStyle};

/// Vertex data for stroke quads
///
/// `local` is the vertex position in stroke space (pixels along the segment
/// from its start, pixels across it); `extent` is the segment length and the
/// half width. The fragment shader discards everything outside the capsule
/// they describe, which rounds the caps.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub local: [f32; 2],
    pub extent: [f32; 2],
}

/// Vertices emitted per segment (two triangles)
pub const VERTICES_PER_SEGMENT: usize = 6;

/// Distinct stencil references available per render pass (8-bit, 0 = clear)
pub const MAX_PATHS_PER_PASS: usize = 255;

/// One frame's worth of geometry, uploaded by the render system
///
/// Every segment becomes a quad extended by half the stroke width past both
/// ends, so consecutive segments of a contour meet without gaps. Each
/// `stroke_path` call is recorded as its own vertex range so the renderer can
/// stencil the path and cover each pixel once.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    /// Logical surface size
    size: Vec2,
    /// Linear RGBA, used as the render pass clear color
    clear: [f64; 4],
    vertices: Vec<LineVertex>,
    paths: Vec<Range<u32>>,
}

impl FrameBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width.max(1.0), height.max(1.0)),
            clear: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Drop last frame's geometry, keeping the allocation
    pub fn begin(&mut self) {
        self.vertices.clear();
        self.paths.clear();
    }

    pub fn clear_color(&self) -> [f64; 4] {
        self.clear
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Vertex range of every non-empty path, in drawing order
    pub fn paths(&self) -> &[Range<u32>] {
        &self.paths
    }

    /// Paths grouped so each group fits the stencil reference range
    ///
    /// Path `i` of a group is drawn with stencil reference `i + 1`, and the
    /// stencil is cleared between groups.
    pub fn passes(&self) -> std::slice::Chunks<'_, Range<u32>> {
        self.paths.chunks(MAX_PATHS_PER_PASS)
    }

    /// Logical pixels to normalized device coordinates (y up)
    fn to_ndc(&self, p: Vec2) -> [f32; 2] {
        [p.x / self.size.x * 2.0 - 1.0, 1.0 - p.y / self.size.y * 2.0]
    }

    fn push_quad(&mut self, segment: &Segment, half_width: f32, color: [f32; 4]) {
        let delta = segment.end - segment.start;
        let length = delta.length();
        let dir = delta.try_normalize().unwrap_or(Vec2::X);
        let normal = dir.perp() * half_width;
        let start = segment.start - dir * half_width;
        let end = segment.end + dir * half_width;

        let corners = [
            (start + normal, [-half_width, half_width]),
            (start - normal, [-half_width, -half_width]),
            (end + normal, [length + half_width, half_width]),
            (end - normal, [length + half_width, -half_width]),
        ];
        let extent = [length, half_width];

        for i in [0, 1, 2, 2, 1, 3] {
            let (p, local) = corners[i];
            self.vertices.push(LineVertex {
                position: self.to_ndc(p),
                color,
                local,
                extent,
            });
        }
    }
}

impl StrokeSurface for FrameBatch {
    fn fill(&mut self, color: Color) {
        let [r, g, b] = color.to_linear_f32();
        self.clear = [r as f64, g as f64, b as f64, 1.0];
    }

    fn stroke_path(&mut self, segments: &[Segment], style: &LineStyle) {
        if segments.is_empty() {
            return;
        }
        let [r, g, b] = style.color.to_linear_f32();
        let color = [r, g, b, style.opacity];
        let half_width = style.width / 2.0;

        let first = self.vertices.len() as u32;
        self.vertices.reserve(segments.len() * VERTICES_PER_SEGMENT);
        for segment in segments {
            self.push_quad(segment, half_width, color);
        }
        self.paths.push(first..self.vertices.len() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(width: f32) -> LineStyle {
        LineStyle {
            width,
            ..Default::default()
        }
    }

    #[test]
    fn test_six_vertices_per_segment() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        let segments = [
            Segment::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)),
            Segment::new(Vec2::new(20.0, 10.0), Vec2::new(20.0, 30.0)),
        ];
        batch.stroke_path(&segments, &style(1.0));
        assert_eq!(batch.vertices().len(), 2 * VERTICES_PER_SEGMENT);

        batch.begin();
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn test_quad_corners_in_ndc() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        // Horizontal 2px-wide stroke through the center
        let segment = Segment::new(Vec2::new(25.0, 50.0), Vec2::new(75.0, 50.0));
        batch.stroke_path(&[segment], &style(2.0));

        let xs: Vec<f32> = batch.vertices().iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = batch.vertices().iter().map(|v| v.position[1]).collect();
        let min_x = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max_x = xs.iter().cloned().fold(f32::MIN, f32::max);
        let max_y = ys.iter().cloned().fold(f32::MIN, f32::max);

        // Extended by 1px (0.02 NDC) past each end
        assert!((min_x + 0.52).abs() < 1e-5);
        assert!((max_x - 0.52).abs() < 1e-5);
        // 1px either side of the center line
        assert!((max_y - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_zero_length_segment_is_a_dot() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        let p = Vec2::new(50.0, 50.0);
        batch.stroke_path(&[Segment::new(p, p)], &style(4.0));

        assert_eq!(batch.vertices().len(), VERTICES_PER_SEGMENT);
        for v in batch.vertices() {
            assert!(v.position[0].abs() <= 0.04 + 1e-6);
            assert!(v.position[1].abs() <= 0.04 + 1e-6);
        }
    }

    #[test]
    fn test_each_path_gets_its_own_range() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        let a = Segment::new(Vec2::new(10.0, 50.0), Vec2::new(50.0, 50.0));
        let b = Segment::new(Vec2::new(50.0, 50.0), Vec2::new(90.0, 50.0));
        batch.stroke_path(&[a, b], &style(2.0));
        batch.stroke_path(&[], &style(2.0));
        batch.stroke_path(&[a], &style(2.0));

        // Both joint-sharing segments belong to one stenciled path
        assert_eq!(batch.paths(), &[0..12, 12..18]);
        assert_eq!(batch.passes().count(), 1);

        batch.begin();
        assert!(batch.paths().is_empty());
        assert_eq!(batch.passes().count(), 0);
    }

    #[test]
    fn test_passes_split_at_stencil_range() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        let segment = Segment::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        for _ in 0..MAX_PATHS_PER_PASS + 10 {
            batch.stroke_path(&[segment], &style(1.0));
        }

        let sizes: Vec<usize> = batch.passes().map(|pass| pass.len()).collect();
        assert_eq!(sizes, vec![MAX_PATHS_PER_PASS, 10]);
    }

    #[test]
    fn test_stroke_space_describes_round_caps() {
        let mut batch = FrameBatch::new(100.0, 100.0);
        let segment = Segment::new(Vec2::new(20.0, 50.0), Vec2::new(50.0, 50.0));
        batch.stroke_path(&[segment], &style(4.0));

        for v in batch.vertices() {
            assert_eq!(v.extent, [30.0, 2.0]);
            // Quad corners sit a half width beyond the capsule's end points
            assert!(v.local[0] == -2.0 || v.local[0] == 32.0);
            assert_eq!(v.local[1].abs(), 2.0);
        }
    }

    #[test]
    fn test_fill_sets_clear_color() {
        let mut batch = FrameBatch::new(10.0, 10.0);
        batch.fill(Color::rgb(255, 0, 0));
        let [r, g, b, a] = batch.clear_color();
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!((g, b, a), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_opacity_carried_in_alpha() {
        let mut batch = FrameBatch::new(10.0, 10.0);
        let faded = LineStyle {
            opacity: 0.25,
            ..Default::default()
        };
        batch.stroke_path(&[Segment::new(Vec2::ZERO, Vec2::new(5.0, 5.0))], &faded);
        assert!(batch.vertices().iter().all(|v| v.color[3] == 0.25));
    }
}
