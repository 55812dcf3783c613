//! Seed-derived cell corruption and row-order perturbation.

use crate::error::FuzzError;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Default number of produced rows buffered per shuffle decision.
pub const DEFAULT_WINDOW: usize = 16;

/// Out-of-domain substitutes for corrupted cells.
const FUZZ_TOKENS: [&str; 4] = ["N/A", "null", "-1", "???"];

/// Probabilities are resolved at basis-point granularity.
const BASIS_POINTS: u64 = 10_000;

/// Multiplier for the splitmix-style scramble of cell seeds.
const SCRAMBLE_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Knobs for the two fuzz transformations.
#[derive(Debug, Clone, Copy)]
pub struct FuzzConfig {
    /// Probability that a generated cell is replaced with a corrupted value.
    pub value_probability: f64,
    /// Probability that a buffered window of rows is emitted in permuted order.
    pub shuffle_probability: f64,
    /// Number of produced rows buffered per shuffle decision.
    pub window: usize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            value_probability: 0.0,
            shuffle_probability: 0.0,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Applies data-quality perturbations to generated output.
///
/// Every decision is derived from seeds the generator already drew for the
/// affected cells, so the engine consumes nothing from the seed stream and a
/// rerun with the same top-level seed reproduces the same perturbations.
#[derive(Debug, Clone)]
pub struct FuzzEngine {
    value_threshold: u64,
    shuffle_threshold: u64,
    window: usize,
}

impl FuzzEngine {
    /// Create an engine, validating that both probabilities are within `[0, 1]`.
    pub fn new(config: FuzzConfig) -> Result<Self, FuzzError> {
        for p in [config.value_probability, config.shuffle_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(FuzzError::InvalidProbability(p));
            }
        }
        Ok(Self {
            value_threshold: to_basis_points(config.value_probability),
            shuffle_threshold: to_basis_points(config.shuffle_probability),
            window: config.window.max(1),
        })
    }

    /// Number of rows buffered per shuffle decision, at least 1.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Whether row-order perturbation can trigger at all.
    pub fn reorders_rows(&self) -> bool {
        self.shuffle_threshold > 0
    }

    /// Corrupt `value` with the configured probability, keyed by the seed that
    /// was drawn for the cell.
    ///
    /// Returns `None` when the cell rolls clean. The corrupted value is one of
    /// three kinds: the leading half of the original characters, the original
    /// reversed, or an out-of-domain token.
    pub fn corrupt_cell(&self, value: &str, seed: u64) -> Option<String> {
        let roll = scramble(seed);
        if roll % BASIS_POINTS >= self.value_threshold {
            return None;
        }
        let corrupted = match (roll / BASIS_POINTS) % 3 {
            0 => truncate_half(value),
            1 => value.chars().rev().collect(),
            _ => {
                let slot = (roll / (BASIS_POINTS * 3)) % FUZZ_TOKENS.len() as u64;
                FUZZ_TOKENS[slot as usize].to_string()
            }
        };
        Some(corrupted)
    }

    /// Permute `rows` in place with the configured probability.
    ///
    /// `key` should come from [`window_key`] over the seeds drawn for the
    /// buffered rows; the same key always yields the same decision and the
    /// same permutation. Returns whether the window was shuffled.
    pub fn shuffle_window<T>(&self, rows: &mut [T], key: u64) -> bool {
        if rows.len() < 2 {
            return false;
        }
        let roll = scramble(key);
        if roll % BASIS_POINTS >= self.shuffle_threshold {
            return false;
        }
        let mut rng = Xoshiro256StarStar::seed_from_u64(roll);
        rows.shuffle(&mut rng);
        true
    }
}

/// Fold the seeds drawn for a window of rows into one shuffle key.
pub fn window_key(seeds: impl IntoIterator<Item = u64>) -> u64 {
    seeds
        .into_iter()
        .fold(SCRAMBLE_MULTIPLIER, |acc, seed| scramble(acc ^ seed))
}

fn to_basis_points(p: f64) -> u64 {
    (p * BASIS_POINTS as f64).round() as u64
}

/// splitmix-style finalizer, spreads consecutive seeds across the u64 space.
fn scramble(x: u64) -> u64 {
    let mut z = x.wrapping_mul(SCRAMBLE_MULTIPLIER);
    z ^= z >> 30;
    z = z.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Keep the leading half of the characters, rounding down.
fn truncate_half(value: &str) -> String {
    let keep = value.chars().count() / 2;
    value.chars().take(keep).collect()
}
