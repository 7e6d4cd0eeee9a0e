//! Iso-line extraction with marching squares.
//!
//! Each 2x2 window of the field is classified by which corners sit at or
//! above the threshold:
//!
//! ```text
//!   A ---top--- B        bit 3 = A (top-left)
//!   |           |        bit 2 = B (top-right)
//!  left       right      bit 1 = C (bottom-right)
//!   |           |        bit 0 = D (bottom-left)
//!   D --bottom- C
//! ```
//!
//! The resulting 4-bit code indexes a fixed table of edge pairs. Saddles
//! (5 and 10) always produce two disjoint segments.

use glam::Vec2;

use crate::field::ScalarField;
use crate::params::{LevelSet, LineStyle};
use crate::surface::StrokeSurface;

/// Edges closer than this to flat cross at their midpoint
const FLAT_EDGE_EPSILON: f32 = 1e-5;

/// Straight piece of an iso-line, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[cfg(test)]
    pub(crate) fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

use Edge::{Bottom, Left, Right, Top};

/// Segments per case code, as (from, to) edge pairs
const CASES: [&[(Edge, Edge)]; 16] = [
    &[],
    &[(Left, Bottom)],
    &[(Bottom, Right)],
    &[(Left, Right)],
    &[(Top, Right)],
    &[(Left, Top), (Bottom, Right)],
    &[(Top, Bottom)],
    &[(Left, Top)],
    &[(Left, Top)],
    &[(Top, Bottom)],
    &[(Left, Bottom), (Top, Right)],
    &[(Top, Right)],
    &[(Left, Right)],
    &[(Bottom, Right)],
    &[(Left, Bottom)],
    &[],
];

/// Number of segments the table emits for `code`
#[cfg(test)]
fn segments_for_case(code: u8) -> usize {
    CASES[(code & 0x0f) as usize].len()
}

/// 4-bit classification of a cell against `threshold`
#[inline]
pub fn case_code(a: f32, b: f32, c: f32, d: f32, threshold: f32) -> u8 {
    let mut code = 0;
    if a >= threshold {
        code |= 8;
    }
    if b >= threshold {
        code |= 4;
    }
    if c >= threshold {
        code |= 2;
    }
    if d >= threshold {
        code |= 1;
    }
    code
}

/// Where `threshold` falls between `v1` and `v2`, as a fraction of the edge
///
/// Flat edges default to the midpoint.
#[inline]
pub fn edge_fraction(v1: f32, v2: f32, threshold: f32) -> f32 {
    if (v2 - v1).abs() < FLAT_EDGE_EPSILON {
        return 0.5;
    }
    (threshold - v1) / (v2 - v1)
}

/// One grid cell: top-left node index and the four corner values
struct Cell {
    x: f32,
    y: f32,
    size: f32,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

impl Cell {
    fn crossing(&self, edge: Edge, t: f32) -> Vec2 {
        let (x0, y0, s) = (self.x * self.size, self.y * self.size, self.size);
        match edge {
            Top => Vec2::new(x0 + edge_fraction(self.a, self.b, t) * s, y0),
            Right => Vec2::new(x0 + s, y0 + edge_fraction(self.b, self.c, t) * s),
            Bottom => Vec2::new(x0 + edge_fraction(self.d, self.c, t) * s, y0 + s),
            Left => Vec2::new(x0, y0 + edge_fraction(self.a, self.d, t) * s),
        }
    }
}

/// Append the iso-line of `threshold` through `field` to `out`
pub fn extract_contour(field: &ScalarField, threshold: f32, out: &mut Vec<Segment>) {
    let (cols, rows) = (field.cols(), field.rows());
    if cols < 2 || rows < 2 {
        return;
    }

    let grid = field.values();
    for y in 0..rows - 1 {
        for x in 0..cols - 1 {
            let i = y * cols + x;
            let cell = Cell {
                x: x as f32,
                y: y as f32,
                size: field.cell_size(),
                a: grid[i],
                b: grid[i + 1],
                c: grid[i + cols + 1],
                d: grid[i + cols],
            };

            let code = case_code(cell.a, cell.b, cell.c, cell.d, threshold);
            for &(from, to) in CASES[code as usize] {
                out.push(Segment::new(
                    cell.crossing(from, threshold),
                    cell.crossing(to, threshold),
                ));
            }
        }
    }
}

/// Stroke every level of `levels`, lowest first, one path per level
///
/// `scratch` is reused between levels and frames.
pub fn render_levels(
    field: &ScalarField,
    levels: &LevelSet,
    style: &LineStyle,
    surface: &mut dyn StrokeSurface,
    scratch: &mut Vec<Segment>,
) {
    for threshold in levels.thresholds() {
        scratch.clear();
        extract_contour(field, threshold, scratch);
        log::trace!("level {:.3}: {} segments", threshold, scratch.len());
        surface.stroke_path(scratch, style);
    }
}
