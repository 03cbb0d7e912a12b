//! RNG module - deterministic food placement
//!
//! A small LCG is enough for picking a free cell uniformly and keeps games
//! reproducible from a seed (useful for tests and benches).

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high bits of the LCG output, which are far better distributed
    /// than the low bits. Panics if `max == 0`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick one element uniformly, or `None` if `items` is empty.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i).copied()
    }

    /// Current internal state (for reseeding a follow-up game)
    pub fn state(&self) -> u32 {
        self.state
    }
}
