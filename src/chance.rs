//! Dice-sum distributions for chance nodes.
//!
//! When the roller has selected n dice (n in 1..=3), the chance event draws
//! the sum of n standard d6 from a fixed categorical distribution:
//!
//! - 1 die: 1..=6, uniform
//! - 2 dice: 2..=12, triangular over 36 outcomes
//! - 3 dice: 3..=18 over 216 outcomes
//!
//! The tables are precomputed at first use by convolving the single-die
//! distribution; probabilities per table sum to 1 within 1e-9.

use once_cell::sync::Lazy;

use crate::core::GameRng;

/// Sides of each die.
const DIE_FACES: usize = 6;

/// Largest number of distinct outcomes in any distribution (3 dice: 3..=18).
pub const MAX_OUTCOMES: usize = 16;

static DISTRIBUTIONS: Lazy<[Vec<(u8, f64)>; 3]> = Lazy::new(|| {
    [sum_distribution(1), sum_distribution(2), sum_distribution(3)]
});

fn sum_distribution(num_dice: usize) -> Vec<(u8, f64)> {
    // counts[s] = number of ways to roll sum s with num_dice dice
    let mut counts = vec![0u64; num_dice * DIE_FACES + 1];
    counts[0] = 1;

    for _ in 0..num_dice {
        let mut next = vec![0u64; counts.len()];
        for (sum, &ways) in counts.iter().enumerate() {
            if ways == 0 {
                continue;
            }
            for face in 1..=DIE_FACES {
                if sum + face < next.len() {
                    next[sum + face] += ways;
                }
            }
        }
        counts = next;
    }

    let total: u64 = counts.iter().sum();
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &ways)| ways > 0)
        .map(|(sum, &ways)| (sum as u8, ways as f64 / total as f64))
        .collect()
}

/// The `(value, probability)` outcomes for `num_dice` selected dice.
///
/// Panics unless `num_dice` is 1, 2, or 3.
#[must_use]
pub fn outcomes(num_dice: u32) -> &'static [(u8, f64)] {
    assert!(
        (1..=3).contains(&num_dice),
        "chance distribution requires 1-3 dice, got {num_dice}"
    );
    &DISTRIBUTIONS[num_dice as usize - 1]
}

/// Draw a sum from the `num_dice` distribution using the given RNG.
#[must_use]
pub fn sample(rng: &mut GameRng, num_dice: u32) -> u8 {
    let dist = outcomes(num_dice);
    let weights: Vec<f64> = dist.iter().map(|&(_, p)| p).collect();
    let index = rng
        .choose_weighted(&weights)
        .expect("distribution has positive weights");
    dist[index].0
}
