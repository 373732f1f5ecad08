//! Game construction: parameters, validation, and game-level metadata.
//!
//! `QwintoConfig` fixes the rules knobs for the life of a game instance;
//! `QwintoGame` is the factory host engines register and create states from.

use serde::{Deserialize, Serialize};

use crate::chance;
use crate::game::state::QwintoState;
use crate::sheet::NUM_CELLS;

/// Maximum raw score a single sheet can reach: three full rows ending at 18
/// plus the five triple-group bonuses at their designated cells' ceilings
/// (12, 11, 14, 16, 18).
pub const MAX_RAW_SCORE: i32 = 3 * 18 + 12 + 11 + 14 + 16 + 18;

/// How terminal returns are reported to the orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnsMode {
    /// Raw total points per player.
    #[default]
    TotalPoints,
    /// Total points minus the across-player average.
    PointDifference,
    /// +1 split among tied maximum scorers, -1 split among tied minimum
    /// scorers.
    WinLoss,
}

/// Fixed rule parameters, validated at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QwintoConfig {
    /// Number of players (1..=10).
    pub player_count: usize,

    /// Game ends once any miss accumulator reaches this (negative) value.
    pub termination_threshold: i32,

    /// Added to the roller's miss accumulator on a miss (negative).
    pub miss_penalty: i32,

    /// Total rolls allowed per round, first roll included.
    pub reroll_budget: u8,

    /// Terminal returns reporting mode.
    pub returns_mode: ReturnsMode,
}

impl Default for QwintoConfig {
    fn default() -> Self {
        Self {
            player_count: 1,
            termination_threshold: -20,
            miss_penalty: -5,
            reroll_budget: 3,
            returns_mode: ReturnsMode::TotalPoints,
        }
    }
}

impl QwintoConfig {
    /// Validate all parameters. Invalid configuration is a programming
    /// error and fails loudly.
    pub fn validate(&self) {
        assert!(
            (1..=10).contains(&self.player_count),
            "player count must be 1-10, got {}",
            self.player_count
        );
        assert!(
            self.termination_threshold < 0,
            "termination threshold must be negative, got {}",
            self.termination_threshold
        );
        assert!(
            self.miss_penalty < 0,
            "miss penalty must be negative, got {}",
            self.miss_penalty
        );
        assert!(self.reroll_budget >= 1, "re-roll budget must be at least 1");
    }

    /// Length of the observation tensor: one-hot phase (3), one-hot
    /// re-rolls used (budget), dice flags (3), one-hot outcome (18),
    /// one-hot roller (N), then each player's 27 cells + miss (28N).
    #[must_use]
    pub fn observation_tensor_size(&self) -> usize {
        3 + self.reroll_budget as usize
            + 3
            + 18
            + self.player_count
            + self.player_count * (NUM_CELLS + 1)
    }
}

/// Game factory: owns the validated configuration and produces initial
/// states plus the metadata host engines query at registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QwintoGame {
    config: QwintoConfig,
}

impl QwintoGame {
    /// Create a game from a configuration. Panics on invalid parameters.
    #[must_use]
    pub fn new(config: QwintoConfig) -> Self {
        config.validate();
        Self { config }
    }

    /// Start building a game with default parameters.
    #[must_use]
    pub fn builder() -> QwintoGameBuilder {
        QwintoGameBuilder::default()
    }

    /// The game configuration.
    #[must_use]
    pub fn config(&self) -> &QwintoConfig {
        &self.config
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Create the initial state: empty sheets, player 0 rolling,
    /// `SelectDice` phase.
    #[must_use]
    pub fn new_initial_state(&self) -> QwintoState {
        QwintoState::new(self.config)
    }

    /// Size of the flat player action space: cells 0..=26, miss 27,
    /// skip 28.
    #[must_use]
    pub fn num_distinct_actions(&self) -> usize {
        NUM_CELLS + 2
    }

    /// Largest number of distinct outcomes at any chance node.
    #[must_use]
    pub fn max_chance_outcomes(&self) -> usize {
        chance::MAX_OUTCOMES
    }

    /// Observation tensor shape (flat).
    #[must_use]
    pub fn observation_tensor_shape(&self) -> Vec<usize> {
        vec![self.config.observation_tensor_size()]
    }

    /// Upper bound on decision nodes in one playthrough. A round holds a
    /// select, at most `reroll_budget` roll decisions, and one joint submit;
    /// every round its roller fills a cell or burns a miss, so no player
    /// rolls more than cells + misses-to-terminate times.
    #[must_use]
    pub fn max_game_length(&self) -> usize {
        let misses_to_terminate = self
            .config
            .termination_threshold
            .unsigned_abs()
            .div_ceil(self.config.miss_penalty.unsigned_abs()) as usize;
        let decisions_per_round = 2 + self.config.reroll_budget as usize;
        decisions_per_round * self.config.player_count * (NUM_CELLS + misses_to_terminate)
    }

    /// Lowest reportable return for any player.
    #[must_use]
    pub fn min_utility(&self) -> f64 {
        match self.config.returns_mode {
            ReturnsMode::TotalPoints => f64::from(self.config.termination_threshold),
            ReturnsMode::PointDifference => {
                f64::from(self.config.termination_threshold - MAX_RAW_SCORE)
            }
            ReturnsMode::WinLoss => -1.0,
        }
    }

    /// Highest reportable return for any player.
    #[must_use]
    pub fn max_utility(&self) -> f64 {
        match self.config.returns_mode {
            ReturnsMode::TotalPoints => f64::from(MAX_RAW_SCORE),
            ReturnsMode::PointDifference => {
                f64::from(MAX_RAW_SCORE - self.config.termination_threshold)
            }
            ReturnsMode::WinLoss => 1.0,
        }
    }
}

/// Builder for `QwintoGame`.
#[derive(Clone, Debug)]
pub struct QwintoGameBuilder {
    config: QwintoConfig,
}

impl Default for QwintoGameBuilder {
    fn default() -> Self {
        Self {
            config: QwintoConfig::default(),
        }
    }
}

impl QwintoGameBuilder {
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    pub fn termination_threshold(mut self, threshold: i32) -> Self {
        self.config.termination_threshold = threshold;
        self
    }

    pub fn miss_penalty(mut self, penalty: i32) -> Self {
        self.config.miss_penalty = penalty;
        self
    }

    pub fn reroll_budget(mut self, budget: u8) -> Self {
        self.config.reroll_budget = budget;
        self
    }

    pub fn returns_mode(mut self, mode: ReturnsMode) -> Self {
        self.config.returns_mode = mode;
        self
    }

    /// Validate and build the game.
    #[must_use]
    pub fn build(self) -> QwintoGame {
        QwintoGame::new(self.config)
    }
}
