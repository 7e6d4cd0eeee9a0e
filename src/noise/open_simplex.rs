//! OpenSimplex backend from the `noise` crate.

use noise::{NoiseFn, OpenSimplex};

use super::NoiseSource;

/// Seeded OpenSimplex noise
pub struct OpenSimplexNoise {
    simplex: OpenSimplex,
}

impl OpenSimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }
}

impl NoiseSource for OpenSimplexNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z])
    }
}
