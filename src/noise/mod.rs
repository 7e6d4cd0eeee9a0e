//! Gradient noise sources for the contour field.

mod open_simplex;
mod simplex;

pub use open_simplex::OpenSimplexNoise;
pub use simplex::{PermutationTable, SimplexNoise, GRAD3};

use crate::params::NoiseKind;

/// A continuous 3D noise function returning roughly [-1, 1]
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Build the noise source selected on the command line
///
/// Without a seed the simplex table is shuffled from the thread RNG, so every
/// run looks different.
pub fn build_noise(kind: NoiseKind, seed: Option<u64>) -> Box<dyn NoiseSource> {
    match kind {
        NoiseKind::Simplex => match seed {
            Some(seed) => Box::new(SimplexNoise::from_seed(seed)),
            None => Box::new(SimplexNoise::new()),
        },
        NoiseKind::OpenSimplex => {
            let seed = seed.unwrap_or_else(rand::random);
            // noise crate seeds are u32
            Box::new(OpenSimplexNoise::new(seed as u32))
        }
    }
}
