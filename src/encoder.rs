//! Observation encoding for learning agents.
//!
//! `QwintoEncoder` packs a state into a flat tensor whose layout is fixed
//! for interoperability with pre-existing trained models. Field order:
//!
//! 1. one-hot phase (3)
//! 2. one-hot rolls-used over `0..budget` (budget slots; none set once the
//!    budget is exhausted)
//! 3. selected-dice flags, Orange / Yellow / Purple (3)
//! 4. one-hot dice outcome over 1..=18 (18)
//! 5. one-hot current roller (N)
//! 6. per player: 27 raw cell values plus the miss accumulator (28N)
//!
//! Qwinto is perfect-information, so every perspective sees the same
//! tensor; the perspective argument is still validated.

use serde::{Deserialize, Serialize};

use crate::core::{Die, Phase, PlayerId};
use crate::game::{QwintoConfig, QwintoState};
use crate::sheet::NUM_CELLS;

/// Encoded game state as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data.
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    #[must_use]
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }
}

/// Encodes game states into tensors from a player's perspective.
pub trait StateEncoder: Send + Sync {
    /// Encode the state from `perspective`'s point of view.
    fn encode(&self, state: &QwintoState, perspective: PlayerId) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Size of the flat player action space.
    fn action_space_size(&self) -> usize;
}

/// The fixed-layout Qwinto observation encoder.
#[derive(Clone, Debug)]
pub struct QwintoEncoder {
    config: QwintoConfig,
}

impl QwintoEncoder {
    /// Create an encoder for games with the given configuration.
    #[must_use]
    pub fn new(config: QwintoConfig) -> Self {
        config.validate();
        Self { config }
    }
}

impl StateEncoder for QwintoEncoder {
    fn encode(&self, state: &QwintoState, perspective: PlayerId) -> EncodedState {
        assert_eq!(
            state.config(),
            &self.config,
            "encoder configured for a different game"
        );
        assert!(
            perspective.index() < self.config.player_count,
            "no such player: {perspective}"
        );

        let size = self.config.observation_tensor_size();
        let mut tensor = Vec::with_capacity(size);

        let one_hot = |hit: bool| if hit { 1.0f32 } else { 0.0 };

        // Phase
        tensor.push(one_hot(state.phase() == Phase::SelectDice));
        tensor.push(one_hot(state.phase() == Phase::RollDice));
        tensor.push(one_hot(state.phase() == Phase::SubmitPoints));

        // Rolls used
        for i in 0..self.config.reroll_budget {
            tensor.push(one_hot(i == state.rolls_used()));
        }

        // Selected dice, Orange / Yellow / Purple order
        tensor.push(one_hot(state.selection().contains(Die::Orange)));
        tensor.push(one_hot(state.selection().contains(Die::Yellow)));
        tensor.push(one_hot(state.selection().contains(Die::Purple)));

        // Dice outcome
        for value in 1..=18u8 {
            tensor.push(one_hot(value == state.outcome()));
        }

        // Current roller
        for player in PlayerId::all(self.config.player_count) {
            tensor.push(one_hot(player == state.roller()));
        }

        // Scoresheets
        for player in PlayerId::all(self.config.player_count) {
            let sheet = state.sheet(player);
            for cell in 0..NUM_CELLS as u8 {
                tensor.push(f32::from(sheet.cell(cell)));
            }
            tensor.push(sheet.miss_total() as f32);
        }

        debug_assert_eq!(tensor.len(), size);
        EncodedState::new(tensor, vec![size])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![self.config.observation_tensor_size()]
    }

    fn action_space_size(&self) -> usize {
        NUM_CELLS + 2
    }
}
