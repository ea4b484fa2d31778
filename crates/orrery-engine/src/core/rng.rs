//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Seedable pseudo-random number generator (xorshift64).
///
/// Every random decision in the scene (comet spawn points, thruster plume
/// jitter, satellite phases, star placement) draws from one of these, so a
/// fixed seed replays the exact same scene.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // One splitmix64 round so neighbouring small seeds start far apart
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Rng {
            state: if z == 0 { 0x2545_F491_4F6C_DD1D } else { z },
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

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits so the result can never round up to 1.0
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform double in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform float in [-span/2, span/2).
    pub fn symmetric(&mut self, span: f32) -> f32 {
        (self.next_f32() - 0.5) * span
    }

    /// Bernoulli trial. `p >= 1` always succeeds, `p <= 0` never does.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Poisson-distributed count with mean `lambda`, truncated at `cap`.
    /// Knuth's product method; the cap also bounds the loop.
    pub fn poisson(&mut self, lambda: f64, cap: u32) -> u32 {
        if !(lambda > 0.0) {
            return 0;
        }
        let limit = (-lambda).exp();
        let mut product = 1.0;
        let mut k = 0;
        while k < cap {
            product *= self.next_f64();
            if product <= limit {
                break;
            }
            k += 1;
        }
        k
    }
}
