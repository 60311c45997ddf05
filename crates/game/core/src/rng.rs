//! Deterministic random rolls for combat resolution.
//!
//! Every hit check draws exactly one uniform value in `[0, 1)`. Values are
//! derived from the session seed and a monotonically increasing roll nonce so
//! a skirmish replays identically from the same seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)` derived from a seed.
    fn unit_interval(&self, seed: u64) -> f32 {
        // 24 bits keep the result exactly representable and strictly below 1.
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 32-bit output from 64-bit state. Stateless;
/// each call is a pure function of the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute deterministic seed from session components.
///
/// `context` separates independent rolls made for the same unit and nonce.
pub fn compute_seed(game_seed: u64, nonce: u64, unit: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (unit as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Source of hit rolls consumed by [`execute_attack`](crate::combat::execute_attack).
pub trait RollSource {
    /// Draw one uniform value in `[0, 1)` on behalf of `unit`.
    fn roll(&mut self, unit: u32) -> f32;
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn roll(&mut self, unit: u32) -> f32 {
        (**self).roll(unit)
    }
}

/// Seeded roll stream owned by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeededRolls {
    game_seed: u64,
    nonce: u64,
}

impl SeededRolls {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
        }
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of rolls drawn so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl RollSource for SeededRolls {
    fn roll(&mut self, unit: u32) -> f32 {
        let seed = compute_seed(self.game_seed, self.nonce, unit, 0);
        self.nonce += 1;
        PcgRng.unit_interval(seed)
    }
}

/// Roll source returning a fixed sequence, cycling when exhausted.
///
/// Handy for scripted scenarios and tests that need a guaranteed hit or miss.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRolls {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedRolls {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every roll hits unless the chance is zero.
    pub fn always_hit() -> Self {
        Self::new(vec![0.0])
    }

    /// Every roll misses any clamped chance.
    pub fn always_miss() -> Self {
        Self::new(vec![0.999])
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self, _unit: u32) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
