//! Seedable pseudo-random number generator (xorshift64).
//! Used for rack shuffling and for nudging degenerate contacts apart.

use glam::Vec2;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic for a given seed within one build.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Random offset with each component in [-magnitude/2, magnitude/2).
    /// Never returns an exact zero vector.
    pub fn jitter(&mut self, magnitude: f32) -> Vec2 {
        let offset = Vec2::new(self.next_f32() - 0.5, self.next_f32() - 0.5) * magnitude;
        if offset == Vec2::ZERO {
            Vec2::new(magnitude * 0.5, 0.0)
        } else {
            offset
        }
    }
}
