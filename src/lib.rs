//! # qwinto-engine
//!
//! A rules engine for the Qwinto dice-and-scoresheet game, built to be
//! driven by an external game-tree / RL orchestration framework.
//!
//! Each round a designated roller selects a subset of the three colored
//! dice, may re-roll a bounded number of times, and then every player
//! simultaneously records the resulting sum on their own scoresheet or
//! declines and pays a penalty. The engine exposes the full decision
//! process: whose turn it is, the legal moves, chance distributions, the
//! effect of every decision, termination, and final scores.
//!
//! ## Design Principles
//!
//! 1. **Enumerable Decisions**: every node is a single-player decision, an
//!    explicit chance draw, or one synchronized simultaneous batch. No
//!    hidden randomness: chance nodes are resolved by applying an outcome.
//!
//! 2. **Fail Loudly**: contract violations (wrong-phase calls, illegal
//!    actions, wrong joint arity) panic immediately. The engine assumes a
//!    well-behaved orchestrator and surfaces logic bugs over recovery.
//!
//! 3. **Cheap Independent Clones**: states deep-copy for branch-and-explore
//!    tree search; no locking, single writer per instance.
//!
//! ## Modules
//!
//! - `core`: player ids, turn markers, action encoding, deterministic RNG
//! - `sheet`: scoresheets, the fixed column-group table, placement rules
//! - `chance`: dice-sum distributions for 1-3 dice
//! - `game`: configuration, the round state machine, rendering
//! - `encoder`: fixed-layout observation tensors for learning agents

pub mod chance;
pub mod core;
pub mod encoder;
pub mod game;
pub mod sheet;

// Re-export commonly used types
pub use crate::core::{
    ActionId, ActionRecord, Actor, DiceSelection, Die, GameRng, GameRngState, Phase, PlayerId,
    PlayerMap, RollAction, SubmitAction, Turn,
};

pub use crate::sheet::{ColumnGroup, Scoresheet, CELLS_PER_ROW, NUM_CELLS, NUM_ROWS};

pub use crate::game::{
    action_to_string, QwintoConfig, QwintoGame, QwintoGameBuilder, QwintoState, ReturnsMode,
    MAX_RAW_SCORE,
};

pub use crate::encoder::{EncodedState, QwintoEncoder, StateEncoder};
