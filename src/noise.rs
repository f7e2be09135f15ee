//! Small noise-combinator layer on top of the `noise` crate, used by
//! [`crate::terrain`] to build a fractal height field without pulling in a
//! full terrain-generation framework.

use noise::{NoiseFn, Perlin};

/// A 2D noise source. Exists so terrain generation can compose combinators
/// (amplitude, bias, octave sums) without naming `noise::Perlin` directly at
/// every call site.
pub trait Noise2 {
    fn get(&self, x: f64, y: f64) -> f64;
}

pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Noise2 for PerlinNoise {
    fn get(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }
}

pub trait Noise2Ext: Noise2 + Sized {
    fn with_amplitude(self, amplitude: f64) -> WithAmplitude<Self> {
        WithAmplitude {
            inner: self,
            amplitude,
        }
    }

    fn with_frequency(self, frequency: f64) -> WithFrequency<Self> {
        WithFrequency {
            inner: self,
            frequency,
        }
    }

    fn with_bias(self, bias: f64) -> WithBias<Self> {
        WithBias { inner: self, bias }
    }
}

impl<T: Noise2> Noise2Ext for T {}

pub struct WithAmplitude<N> {
    inner: N,
    amplitude: f64,
}

impl<N: Noise2> Noise2 for WithAmplitude<N> {
    fn get(&self, x: f64, y: f64) -> f64 {
        self.inner.get(x, y) * self.amplitude
    }
}

pub struct WithFrequency<N> {
    inner: N,
    frequency: f64,
}

impl<N: Noise2> Noise2 for WithFrequency<N> {
    fn get(&self, x: f64, y: f64) -> f64 {
        self.inner.get(x * self.frequency, y * self.frequency)
    }
}

pub struct WithBias<N> {
    inner: N,
    bias: f64,
}

impl<N: Noise2> Noise2 for WithBias<N> {
    fn get(&self, x: f64, y: f64) -> f64 {
        self.inner.get(x, y) + self.bias
    }
}

/// Sum of several octaves of the same Perlin source at doubling frequency
/// and halving amplitude (a standard fractal/fBm construction).
pub struct FractalNoise {
    octaves: Vec<WithFrequency<WithAmplitude<PerlinNoise>>>,
}

impl FractalNoise {
    pub fn new(seed: u32, octaves: u32, persistence: f64, base_frequency: f64) -> Self {
        let mut amplitude = 1.0;
        let mut frequency = base_frequency;
        let mut layers = Vec::with_capacity(octaves as usize);

        for octave in 0..octaves {
            layers.push(
                PerlinNoise::new(seed.wrapping_add(octave))
                    .with_amplitude(amplitude)
                    .with_frequency(frequency),
            );
            amplitude *= persistence;
            frequency *= 2.0;
        }

        Self { octaves: layers }
    }
}

impl Noise2 for FractalNoise {
    fn get(&self, x: f64, y: f64) -> f64 {
        self.octaves.iter().map(|layer| layer.get(x, y)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractal_noise_is_deterministic_for_a_given_seed() {
        let a = FractalNoise::new(42, 4, 0.5, 0.01);
        let b = FractalNoise::new(42, 4, 0.5, 0.01);
        assert_eq!(a.get(12.3, -4.5), b.get(12.3, -4.5));
    }

    #[test]
    fn bias_shifts_output() {
        let noise = PerlinNoise::new(1).with_bias(10.0);
        let base = PerlinNoise::new(1);
        assert!((noise.get(1.0, 1.0) - base.get(1.0, 1.0) - 10.0).abs() < 1e-9);
    }
}
