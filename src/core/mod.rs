//! Core engine types: players, turn markers, actions, RNG.
//!
//! These are the building blocks the round state machine is assembled from.
//! Everything here is independent of the scoresheet and phase logic.

pub mod action;
pub mod player;
pub mod rng;
pub mod turn;

pub use action::{ActionId, ActionRecord, Actor, RollAction, SubmitAction};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use turn::{DiceSelection, Die, Phase, Turn};
