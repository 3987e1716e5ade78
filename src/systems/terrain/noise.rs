use noise::{NoiseFn, Perlin};
use std::fmt;

/// Seeded 2D gradient noise. Continuous, deterministic per seed, output in [-1, 1].
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y]).clamp(-1.0, 1.0)
    }

    // Ridged multi-octave sum: each octave contributes (1 - |n|) so zero crossings become crests
    pub fn ridged(
        &self,
        x: f64,
        y: f64,
        base_frequency: f64,
        octaves: usize,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = base_frequency;

        for _ in 0..octaves {
            let n = self.sample(x * frequency, y * frequency);
            total += (1.0 - n.abs()) * amplitude;

            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total
    }
}
