//! Deterministic pseudo-random stream for route synthesis.
//!
//! Generated routes must be reproducible: the same request has to yield the
//! same track on every machine, so the generator below is a 32-bit mixer of
//! the mulberry32 family seeded from a text hash. All arithmetic uses
//! explicit wrapping operations; the stream is bit-for-bit stable across
//! platforms and depends only on the seed text.

/// Increment added to the state before each draw.
const STATE_INCREMENT: u32 = 0x6D2B_79F5;

/// Seeded pseudo-random generator yielding `f64` values in `[0, 1)`.
///
/// One instance lives for exactly one synthesis call and is consumed
/// monotonically. Reusing a generator across requests would correlate
/// unrelated routes.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Seeds the generator from arbitrary text.
    ///
    /// The seed is the classic `acc * 31 + code` hash over the text's
    /// UTF-16 code units, wrapped to 32-bit signed semantics at every step.
    pub fn from_seed_text(seed: &str) -> Self {
        let mut acc: i32 = 0;
        for unit in seed.encode_utf16() {
            acc = acc.wrapping_mul(31).wrapping_add(i32::from(unit));
        }
        Self::from_state(acc as u32)
    }

    fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Returns the next value in `[0, 1)`.
    ///
    /// Advances the state by a fixed increment, then applies two
    /// multiply-xor rounds with state-derived odd multipliers and scales
    /// the result by 2^-32. Shifts are logical, multiplications wrap.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^= t >> 14;
        f64::from(t) / 4_294_967_296.0
    }
}
