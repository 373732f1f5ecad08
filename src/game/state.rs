//! The round state machine: phases, legal moves, action application,
//! termination, and returns.
//!
//! A round cycles `SelectDice` -> `RollDice` -> `SubmitPoints`. The roller
//! picks dice, a chance node draws their sum, the roller may re-roll within
//! the budget, then every player simultaneously places the sum or declines.
//! Afterwards the roller advances round-robin and the round state resets.
//!
//! All violations of the calling contract (wrong-phase application, actions
//! outside the legal set, wrong joint arity, roller skip / non-roller miss)
//! panic immediately: the engine assumes a well-behaved orchestrator and
//! surfaces logic bugs instead of recovering.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::chance;
use crate::core::{
    ActionId, ActionRecord, Actor, DiceSelection, GameRng, Phase, PlayerId, PlayerMap, RollAction,
    SubmitAction, Turn,
};
use crate::game::config::{QwintoConfig, ReturnsMode};
use crate::sheet::Scoresheet;

/// Complete game state. `Clone` yields a fully independent deep copy, so
/// tree-search orchestrators can branch and explore clones concurrently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QwintoState {
    config: QwintoConfig,

    phase: Phase,
    turn: Turn,

    /// Whose round it is to select and roll dice.
    roller: PlayerId,

    /// Dice chosen this round; empty until `SelectDice` resolves.
    selection: DiceSelection,

    /// Current combined dice sum; 0 until the first chance resolution.
    outcome: u8,

    /// Rolls consumed this round, first roll included.
    rolls_used: u8,

    /// Round number (starts at 1, advances when the roller rotates).
    round: u32,

    /// Action sequence within the round.
    sequence: u32,

    sheets: PlayerMap<Scoresheet>,

    /// Applied actions, for replay and orchestrator consistency.
    history: Vector<ActionRecord>,
}

impl QwintoState {
    /// Initial state: empty sheets, player 0 rolling, `SelectDice` phase.
    #[must_use]
    pub fn new(config: QwintoConfig) -> Self {
        config.validate();
        Self {
            config,
            phase: Phase::SelectDice,
            turn: Turn::Player(PlayerId::new(0)),
            roller: PlayerId::new(0),
            selection: DiceSelection::NONE,
            outcome: 0,
            rolls_used: 0,
            round: 1,
            sequence: 0,
            sheets: PlayerMap::with_default(config.player_count),
            history: Vector::new(),
        }
    }

    // === Accessors ===

    /// The fixed game configuration.
    #[must_use]
    pub fn config(&self) -> &QwintoConfig {
        &self.config
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Current phase of the round cycle.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Who decides at the current node; `Terminal` once the game is over.
    #[must_use]
    pub fn whose_turn(&self) -> Turn {
        if self.is_terminal() {
            Turn::Terminal
        } else {
            self.turn
        }
    }

    /// The player rolling this round.
    #[must_use]
    pub fn roller(&self) -> PlayerId {
        self.roller
    }

    /// Dice selected this round.
    #[must_use]
    pub fn selection(&self) -> DiceSelection {
        self.selection
    }

    /// The active dice sum (0 before the first chance resolution).
    #[must_use]
    pub fn outcome(&self) -> u8 {
        self.outcome
    }

    /// Rolls consumed this round.
    #[must_use]
    pub fn rolls_used(&self) -> u8 {
        self.rolls_used
    }

    /// Round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// A player's scoresheet.
    #[must_use]
    pub fn sheet(&self, player: PlayerId) -> &Scoresheet {
        &self.sheets[player]
    }

    /// Applied-action history.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Termination & returns ===

    /// Whether any player's miss accumulator has reached the termination
    /// threshold. Monotone: once true, sheets no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.sheets
            .values()
            .any(|sheet| sheet.miss_total() <= self.config.termination_threshold)
    }

    /// Raw scores per player (row scores + triple bonuses + miss totals),
    /// regardless of termination.
    #[must_use]
    pub fn raw_scores(&self) -> Vec<i32> {
        self.sheets.values().map(Scoresheet::score).collect()
    }

    /// Per-player returns: the zero vector until terminal, then the raw
    /// scores transformed by the configured `ReturnsMode`.
    #[must_use]
    pub fn returns(&self) -> Vec<f64> {
        if !self.is_terminal() {
            return vec![0.0; self.player_count()];
        }

        let raw = self.raw_scores();
        match self.config.returns_mode {
            ReturnsMode::TotalPoints => raw.iter().map(|&s| f64::from(s)).collect(),
            ReturnsMode::PointDifference => {
                let mean = raw.iter().map(|&s| f64::from(s)).sum::<f64>() / raw.len() as f64;
                raw.iter().map(|&s| f64::from(s) - mean).collect()
            }
            ReturnsMode::WinLoss => {
                let max = *raw.iter().max().expect("at least one player");
                let min = *raw.iter().min().expect("at least one player");
                let winners = raw.iter().filter(|&&s| s == max).count() as f64;
                let losers = raw.iter().filter(|&&s| s == min).count() as f64;

                raw.iter()
                    .map(|&s| {
                        let mut r = 0.0;
                        if s == max {
                            r += 1.0 / winners;
                        }
                        if s == min {
                            r -= 1.0 / losers;
                        }
                        r
                    })
                    .collect()
            }
        }
    }

    // === Legal moves ===

    /// Legal flat actions for `player`, ascending. Empty once terminal.
    ///
    /// In `SelectDice` and `RollDice` only the roller actually decides; in
    /// `SubmitPoints` every player holds a decision, with `Miss` offered
    /// only to the roller and `Skip` only to non-rollers.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<ActionId> {
        assert!(
            player.index() < self.player_count(),
            "no such player: {player}"
        );

        if self.is_terminal() {
            return Vec::new();
        }

        match self.phase {
            Phase::SelectDice => DiceSelection::all_non_empty()
                .map(|s| ActionId::new(s.bits()))
                .collect(),
            Phase::RollDice => {
                let mut moves = Vec::with_capacity(2);
                if self.rolls_used < self.config.reroll_budget {
                    moves.push(ActionId::REROLL);
                }
                moves.push(ActionId::ACCEPT);
                moves
            }
            Phase::SubmitPoints => {
                let mut moves: Vec<ActionId> = self.sheets[player]
                    .legal_cells(self.selection, self.outcome)
                    .iter()
                    .map(|&cell| ActionId::new(cell))
                    .collect();

                if player == self.roller {
                    moves.push(ActionId::MISS);
                } else {
                    moves.push(ActionId::SKIP);
                }
                moves
            }
        }
    }

    /// The chance distribution at the current node as `(value, probability)`
    /// pairs. Only valid while `whose_turn()` is `Chance`.
    #[must_use]
    pub fn chance_outcomes(&self) -> &'static [(u8, f64)] {
        assert!(
            self.whose_turn().is_chance(),
            "chance outcomes queried off a chance node"
        );
        chance::outcomes(self.selection.count())
    }

    /// Legal chance actions (the outcome values), ascending.
    #[must_use]
    pub fn legal_chance_actions(&self) -> Vec<ActionId> {
        self.chance_outcomes()
            .iter()
            .map(|&(value, _)| ActionId::new(value))
            .collect()
    }

    // === Application ===

    /// Apply a single decision: a roller action in `SelectDice`/`RollDice`,
    /// or a drawn outcome at a chance node.
    ///
    /// Panics if the node is simultaneous or terminal, or the action is not
    /// in the current legal set.
    pub fn apply_action(&mut self, action: ActionId) {
        match self.whose_turn() {
            Turn::Chance => self.apply_chance(action),
            Turn::Player(player) => self.apply_player(player, action),
            Turn::Simultaneous => {
                panic!("simultaneous node requires apply_joint, got single action {action}")
            }
            Turn::Terminal => panic!("cannot apply action {action} to a terminal state"),
        }
    }

    fn apply_chance(&mut self, action: ActionId) {
        debug_assert_eq!(self.phase, Phase::RollDice);

        let num_dice = self.selection.count();
        let value = action.raw();
        assert!(
            value >= num_dice as u8 && value <= (num_dice * 6) as u8,
            "outcome {value} impossible for {num_dice} dice"
        );

        self.outcome = value;
        self.turn = Turn::Player(self.roller);
        self.record(Actor::Chance, action);
    }

    fn apply_player(&mut self, player: PlayerId, action: ActionId) {
        debug_assert_eq!(player, self.roller);

        match self.phase {
            Phase::SelectDice => {
                let selection = DiceSelection::from_bits(action.raw());
                assert!(!selection.is_empty(), "must select at least one die");

                self.selection = selection;
                self.rolls_used = 1;
                self.phase = Phase::RollDice;
                self.turn = Turn::Chance;
            }
            Phase::RollDice => match RollAction::from_id(action) {
                RollAction::Reroll => {
                    assert!(
                        self.rolls_used < self.config.reroll_budget,
                        "re-roll budget exhausted ({} of {})",
                        self.rolls_used,
                        self.config.reroll_budget
                    );
                    self.rolls_used += 1;
                    self.turn = Turn::Chance;
                }
                RollAction::Accept => {
                    self.phase = Phase::SubmitPoints;
                    self.turn = Turn::Simultaneous;
                }
            },
            Phase::SubmitPoints => {
                panic!("player {player} cannot act alone in the Submit phase")
            }
        }
        self.record(Actor::Player(player), action);
    }

    /// Apply one action per player at the simultaneous node, as a single
    /// batch. The whole batch is validated against each player's legal set
    /// before any sheet is touched, so partial application is never
    /// observable. Afterwards the phase returns to `SelectDice` and the
    /// roller advances round-robin.
    pub fn apply_joint(&mut self, actions: &[ActionId]) {
        assert!(
            self.whose_turn().is_simultaneous(),
            "apply_joint called off the simultaneous node"
        );
        assert_eq!(
            actions.len(),
            self.player_count(),
            "expected one action per player"
        );

        // Validate the full batch first.
        for (index, &action) in actions.iter().enumerate() {
            let player = PlayerId::new(index as u8);
            assert!(
                self.legal_actions(player).contains(&action),
                "action {action} not legal for {player} in Submit phase"
            );
        }

        for (index, &action) in actions.iter().enumerate() {
            let player = PlayerId::new(index as u8);
            match SubmitAction::from_id(action) {
                SubmitAction::Skip => {}
                SubmitAction::Miss => {
                    self.sheets[player].apply_miss(self.config.miss_penalty);
                }
                SubmitAction::Cell(cell) => {
                    self.sheets[player].record(cell, self.outcome);
                }
            }
            self.record(Actor::Player(player), action);
        }

        self.advance_round();
    }

    /// Resolve the current chance node by sampling from its distribution
    /// with the given RNG. Returns the drawn value.
    ///
    /// Convenience for simulation orchestrators; equivalent to applying the
    /// returned value via `apply_action`.
    pub fn apply_sampled_chance(&mut self, rng: &mut GameRng) -> u8 {
        assert!(
            self.whose_turn().is_chance(),
            "sampling requested off a chance node"
        );
        let value = chance::sample(rng, self.selection.count());
        self.apply_chance(ActionId::new(value));
        value
    }

    fn advance_round(&mut self) {
        self.phase = Phase::SelectDice;
        self.selection = DiceSelection::NONE;
        self.outcome = 0;
        self.rolls_used = 0;
        self.roller = self.roller.next(self.player_count());
        self.turn = Turn::Player(self.roller);
        self.round += 1;
        self.sequence = 0;
    }

    fn record(&mut self, actor: Actor, action: ActionId) {
        let record = ActionRecord::new(actor, action, self.round, self.sequence);
        self.sequence += 1;
        self.history.push_back(record);
    }
}
