//! 3D simplex noise over a shuffled permutation table.
//!
//! The unit cube around a sample is split into six tetrahedra. The skewed
//! offsets pick one of them, and each of its four corners contributes a
//! radially attenuated gradient ramp. The attenuation reaches zero at a
//! squared distance of 0.6, so the field stays continuous across simplex
//! boundaries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::NoiseSource;

/// Skewing factor for 3D simplex: `1/3`
const F3: f64 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `1/6`
const G3: f64 = 1.0 / 6.0;
/// Squared radius of a corner's influence
const FALLOFF_R2: f64 = 0.6;
/// Brings the corner sum to roughly [-1, 1]
const OUTPUT_SCALE: f64 = 32.0;

/// Gradients at the cube edge midpoints
pub const GRAD3: [[i8; 3]; 12] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

/// 256 shuffled lattice hashes, mirrored to 512 entries so nested lookups
/// never need a modulo.
#[derive(Debug, Clone)]
pub struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    /// Fisher-Yates shuffle of the identity sequence 0..=255
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p = [0u8; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }
        for i in (1..256).rev() {
            let r = rng.gen_range(0..=i);
            p.swap(i, r);
        }

        let mut perm = [0u8; 512];
        for (i, val) in perm.iter_mut().enumerate() {
            *val = p[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn get(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// The first 256 entries (one full period)
    pub fn period(&self) -> &[u8] {
        &self.perm[..256]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

/// Classic 3D simplex noise; one instance per running background
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: PermutationTable,
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl SimplexNoise {
    /// Shuffle from the thread RNG
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Reproducible table for a given seed
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            perm: PermutationTable::shuffled(rng),
        }
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    /// Gradient index for lattice point (ii + a, jj + b, kk + c)
    #[inline]
    fn gradient_index(&self, i: usize, j: usize, k: usize) -> usize {
        let p = &self.perm;
        p.get(i + p.get(j + p.get(k))) % 12
    }

    /// Sample the noise field
    #[allow(clippy::many_single_char_names)]
    pub fn sample(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        // Skew into simplex space to find the containing unit cube
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();

        // Unskew the cube origin back to input space
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        let ([i1, j1, k1], [i2, j2, k2]) = simplex_corners(x0, y0, z0);

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        // Wrap the lattice coordinates into the table period
        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;

        let gi0 = self.gradient_index(ii, jj, kk);
        let gi1 = self.gradient_index(ii + i1, jj + j1, kk + k1);
        let gi2 = self.gradient_index(ii + i2, jj + j2, kk + k2);
        let gi3 = self.gradient_index(ii + 1, jj + 1, kk + 1);

        let n0 = corner_contribution(gi0, x0, y0, z0);
        let n1 = corner_contribution(gi1, x1, y1, z1);
        let n2 = corner_contribution(gi2, x2, y2, z2);
        let n3 = corner_contribution(gi3, x3, y3, z3);

        OUTPUT_SCALE * (n0 + n1 + n2 + n3)
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        SimplexNoise::sample(self, x, y, z)
    }
}

/// Lattice offsets of the second and third simplex corners
///
/// Six orderings of (x0, y0, z0), one per tetrahedron of the unit cube. The
/// first corner is always the cube origin and the fourth the opposite corner.
pub(crate) fn simplex_corners(x0: f64, y0: f64, z0: f64) -> ([usize; 3], [usize; 3]) {
    if x0 >= y0 {
        if y0 >= z0 {
            ([1, 0, 0], [1, 1, 0])
        } else if x0 >= z0 {
            ([1, 0, 0], [1, 0, 1])
        } else {
            ([0, 0, 1], [1, 0, 1])
        }
    } else if y0 < z0 {
        ([0, 0, 1], [0, 1, 1])
    } else if x0 < z0 {
        ([0, 1, 0], [0, 1, 1])
    } else {
        ([0, 1, 0], [1, 1, 0])
    }
}

#[inline]
fn corner_contribution(gi: usize, x: f64, y: f64, z: f64) -> f64 {
    let t = FALLOFF_R2 - x * x - y * y - z * z;
    if t < 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    let g = GRAD3[gi];
    t2 * t2 * (g[0] as f64 * x + g[1] as f64 * y + g[2] as f64 * z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_is_a_bijection() {
        let noise = SimplexNoise::from_seed(7);
        let mut seen = [false; 256];
        for &v in noise.permutation().period() {
            assert!(!seen[v as usize], "value {} appears twice", v);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));

        // Second half mirrors the first
        let table = noise.permutation().as_slice();
        assert_eq!(&table[..256], &table[256..]);
    }

    #[test]
    fn test_deterministic_within_instance() {
        let noise = SimplexNoise::new();
        for i in 0..50 {
            let p = i as f64 * 0.731;
            let a = noise.sample(p, -p * 0.5, p * 0.25);
            let b = noise.sample(p, -p * 0.5, p * 0.25);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = SimplexNoise::from_seed(99);
        let b = SimplexNoise::from_seed(99);
        assert_eq!(a.permutation().as_slice(), b.permutation().as_slice());
        assert_eq!(a.sample(1.5, 2.5, 3.5).to_bits(), b.sample(1.5, 2.5, 3.5).to_bits());
    }

    #[test]
    fn test_output_range() {
        let noise = SimplexNoise::from_seed(1);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100_000 {
            let x = rng.gen_range(-100.0..100.0);
            let y = rng.gen_range(-100.0..100.0);
            let z = rng.gen_range(-100.0..100.0);
            let n = noise.sample(x, y, z);
            assert!(n.is_finite());
            assert!((-1.1..=1.1).contains(&n), "sample {} out of range", n);
        }
    }

    #[test]
    fn test_continuous_across_simplex_boundaries() {
        let noise = SimplexNoise::from_seed(3);
        let eps = 1e-4;
        // Diagonal walks cross many tetrahedra and cube boundaries
        for &(dx, dy, dz) in &[(1.0, 0.0, 0.0), (0.6, 0.8, 0.0), (0.3, 0.5, 0.81)] {
            let mut prev = noise.sample(-2.0, -1.0, 0.5);
            let steps = (6.0 / eps) as usize;
            for s in 1..=steps {
                let d = s as f64 * eps;
                let cur = noise.sample(-2.0 + dx * d, -1.0 + dy * d, 0.5 + dz * d);
                assert!(
                    (cur - prev).abs() < 50.0 * eps,
                    "jump of {} at step {}",
                    (cur - prev).abs(),
                    s
                );
                prev = cur;
            }
        }
    }

    #[test]
    fn test_lattice_origin_is_zero() {
        // The origin corner has a zero offset and the other three lie
        // outside the falloff radius
        let noise = SimplexNoise::from_seed(5);
        assert_eq!(noise.sample(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_corner_table_covers_six_orderings() {
        let cases = [
            ((0.9, 0.5, 0.1), ([1, 0, 0], [1, 1, 0])),
            ((0.9, 0.1, 0.5), ([1, 0, 0], [1, 0, 1])),
            ((0.5, 0.1, 0.9), ([0, 0, 1], [1, 0, 1])),
            ((0.1, 0.5, 0.9), ([0, 0, 1], [0, 1, 1])),
            ((0.1, 0.9, 0.5), ([0, 1, 0], [0, 1, 1])),
            ((0.5, 0.9, 0.1), ([0, 1, 0], [1, 1, 0])),
        ];
        for ((x, y, z), expected) in cases {
            assert_eq!(simplex_corners(x, y, z), expected, "at ({x}, {y}, {z})");
        }
    }

    #[test]
    fn test_negative_coordinates_wrap() {
        let noise = SimplexNoise::from_seed(11);
        let n = noise.sample(-1234.567, -89.01, -0.5);
        assert!(n.is_finite());
    }
}
