//! Date-seeded pseudo-random generation.
//!
//! The generator is the sine transform `frac(sin(seed++) * 10000)`. It is
//! deterministic for a given seed but not statistically strong.

/// Hash a string to a non-negative seed.
///
/// Polynomial `hash * 31 + unit` over UTF-16 code units with 32-bit signed
/// wrap-around, then the absolute value (widened, so `i32::MIN` stays
/// positive).
pub fn string_seed(s: &str) -> u64 {
    let hash = s
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    i64::from(hash).unsigned_abs()
}

/// Sine-based seeded generator producing values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SineRng {
    seed: f64,
}

impl SineRng {
    /// Create a generator starting at `seed`.
    pub fn new(seed: u64) -> Self {
        // Seeds come from `string_seed` and fit in 32 bits, so the conversion is exact.
        Self { seed: seed as f64 }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        let frac = x - x.floor();
        // Guard the rounding edge where a tiny negative x yields exactly 1.0.
        if frac >= 1.0 { 0.0 } else { frac }
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniform integer in `1..=max`.
    pub fn one_to(&mut self, max: u32) -> u32 {
        let i = (self.next_f64() * f64::from(max)).floor() as u32;
        i.min(max.saturating_sub(1)) + 1
    }
}

/// Fisher-Yates shuffle driven by `rng`, walking from the back.
pub fn shuffle<T>(items: &mut [T], rng: &mut SineRng) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}
