//! Scalar elevation field sampled from noise with cursor repulsion.

mod pointer;

pub use pointer::{PointerState, FAR_AWAY};

use crate::noise::NoiseSource;
use crate::params::FieldParams;

/// Pointer distances at or below this are left untouched
pub const MIN_REPEL_DISTANCE: f32 = 0.1;

/// Distance (px) over which the repulsion decays by a factor of e
const REPEL_DECAY_PX: f64 = 100.0;

/// Row-major grid of elevations, one node every `cell_size` pixels
///
/// The buffer is reused across frames and fully overwritten by
/// [`ScalarField::advance`].
#[derive(Debug, Clone)]
pub struct ScalarField {
    cols: usize,
    rows: usize,
    cell_size: f32,
    values: Vec<f32>,
}

impl ScalarField {
    /// Grid covering a `width` x `height` surface, including the far edges
    pub fn for_surface(width: f32, height: f32, cell_size: f32) -> Self {
        let (cols, rows) = Self::dimensions_for(width, height, cell_size);
        Self {
            cols,
            rows,
            cell_size,
            values: vec![0.0; cols * rows],
        }
    }

    /// Build directly from values (row-major, `cols * rows` long)
    #[cfg(test)]
    pub(crate) fn from_values(cols: usize, rows: usize, cell_size: f32, values: Vec<f32>) -> Self {
        assert_eq!(values.len(), cols * rows, "field size mismatch");
        Self {
            cols,
            rows,
            cell_size,
            values,
        }
    }

    /// `(ceil(width / cell) + 1, ceil(height / cell) + 1)`
    pub fn dimensions_for(width: f32, height: f32, cell_size: f32) -> (usize, usize) {
        let cols = (width.max(0.0) / cell_size).ceil() as usize + 1;
        let rows = (height.max(0.0) / cell_size).ceil() as usize + 1;
        (cols, rows)
    }

    /// Match a new surface size; returns whether the dimensions changed
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let (cols, rows) = Self::dimensions_for(width, height, self.cell_size);
        if (cols, rows) == (self.cols, self.rows) {
            return false;
        }
        self.cols = cols;
        self.rows = rows;
        self.values.clear();
        self.values.resize(cols * rows, 0.0);
        true
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.cols + x]
    }

    /// Resample every node at time `time`, pushed down near the pointer
    pub fn advance(
        &mut self,
        noise: &dyn NoiseSource,
        params: &FieldParams,
        time: f64,
        pointer: &PointerState,
    ) {
        let mouse = pointer.position();
        let repel = pointer.is_active();
        let cell = self.cell_size;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let sx = x as f32 * cell;
                let sy = y as f32 * cell;

                let mut n = noise.sample(
                    sx as f64 * params.noise_scale,
                    sy as f64 * params.noise_scale,
                    time,
                );

                if repel {
                    let dx = sx - mouse.x;
                    let dy = sy - mouse.y;
                    let distance = (dx * dx + dy * dy).sqrt();
                    n -= repulsion(distance, params.repel_radius, params.repel_strength);
                }

                self.values[y * self.cols + x] = n as f32;
            }
        }
    }
}

/// Field depression at `distance` from the pointer
///
/// Linear falloff to zero at `radius`, further attenuated by
/// `exp(-distance / 100)`. Zero outside the radius and within
/// [`MIN_REPEL_DISTANCE`] of the pointer.
pub fn repulsion(distance: f32, radius: f32, strength: f32) -> f64 {
    if !(distance < radius && distance > MIN_REPEL_DISTANCE) {
        return 0.0;
    }
    let d = distance as f64;
    let force = (1.0 - d / radius as f64) * strength as f64;
    force * (-d / REPEL_DECAY_PX).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SimplexNoise;
    use glam::Vec2;

    /// Constant field, so only the repulsion shows up
    struct Flat(f64);

    impl NoiseSource for Flat {
        fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_dimensions_follow_surface() {
        let mut field = ScalarField::for_surface(800.0, 600.0, 10.0);
        assert_eq!((field.cols(), field.rows()), (81, 61));
        assert_eq!(field.values().len(), 81 * 61);

        assert!(field.resize(1600.0, 1200.0));
        assert_eq!((field.cols(), field.rows()), (161, 121));
        assert_eq!(field.values().len(), 161 * 121);

        // Same size again is a no-op
        assert!(!field.resize(1600.0, 1200.0));
    }

    #[test]
    fn test_partial_cells_round_up() {
        assert_eq!(ScalarField::dimensions_for(801.0, 1.0, 10.0), (82, 2));
        assert_eq!(ScalarField::dimensions_for(0.0, 0.0, 10.0), (1, 1));
    }

    #[test]
    fn test_repulsion_zero_at_radius() {
        assert_eq!(repulsion(200.0, 200.0, 0.8), 0.0);
        assert_eq!(repulsion(350.0, 200.0, 0.8), 0.0);
    }

    #[test]
    fn test_repulsion_bounded_near_pointer() {
        let near = repulsion(0.2, 200.0, 0.8);
        assert!(near <= 0.8);
        assert!((near - 0.8).abs() < 0.01);

        // Guarded at the pointer itself
        assert_eq!(repulsion(0.0, 200.0, 0.8), 0.0);
        assert_eq!(repulsion(MIN_REPEL_DISTANCE, 200.0, 0.8), 0.0);
    }

    #[test]
    fn test_repulsion_decreases_with_distance() {
        let mut prev = repulsion(1.0, 200.0, 0.8);
        for d in (2..200).map(|d| d as f32) {
            let cur = repulsion(d, 200.0, 0.8);
            assert!(cur < prev);
            prev = cur;
        }
    }

    #[test]
    fn test_advance_applies_repulsion_around_pointer() {
        let mut field = ScalarField::for_surface(400.0, 400.0, 10.0);
        let params = FieldParams::default();
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(100.0, 100.0));

        field.advance(&Flat(0.5), &params, 0.0, &pointer);

        // Node at the pointer is guarded
        assert_eq!(field.get(10, 10), 0.5);
        // 50px away: pushed down
        let expected = 0.5 - repulsion(50.0, 200.0, 0.8);
        assert!((field.get(15, 10) as f64 - expected).abs() < 1e-6);
        assert!(field.get(15, 10) < 0.5);
        // Outside the radius: untouched
        assert_eq!(field.get(39, 39), 0.5);
    }

    #[test]
    fn test_absent_pointer_never_repels() {
        // Radius wide enough to reach the grid from the far-away sentinel
        let params = FieldParams {
            repel_radius: 5000.0,
            repel_strength: 10.0,
            ..Default::default()
        };
        let mut field = ScalarField::for_surface(200.0, 200.0, 10.0);
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(50.0, 50.0));
        pointer.leave();

        field.advance(&Flat(0.25), &params, 0.0, &pointer);
        assert!(field.values().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_advance_without_pointer_matches_noise() {
        let noise = SimplexNoise::from_seed(21);
        let params = FieldParams::default();
        let mut field = ScalarField::for_surface(200.0, 100.0, 10.0);
        field.advance(&noise, &params, 0.25, &PointerState::new());

        let expected = noise.sample(70.0 * params.noise_scale, 30.0 * params.noise_scale, 0.25);
        assert_eq!(field.get(7, 3), expected as f32);
    }

    #[test]
    fn test_advance_changes_with_time() {
        let noise = SimplexNoise::from_seed(4);
        let params = FieldParams::default();
        let mut field = ScalarField::for_surface(300.0, 300.0, 10.0);

        field.advance(&noise, &params, 0.0, &PointerState::new());
        let before = field.values().to_vec();
        field.advance(&noise, &params, 0.5, &PointerState::new());
        assert_ne!(before, field.values());
    }
}
