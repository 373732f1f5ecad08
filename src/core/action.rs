//! Flat action encoding plus typed per-phase views.
//!
//! Orchestrators see actions as small integers (`ActionId`), matching the
//! wire encoding trained models were built against:
//!
//! - `SelectDice`: dice-subset bitmask, 1..=7
//! - `RollDice`: 0 = re-roll, 1 = accept
//! - `SubmitPoints`: cell index 0..=26, 27 = miss, 28 = skip
//! - chance nodes: the drawn dice sum, 1..=18
//!
//! Inside the engine, `RollAction` and `SubmitAction` give exhaustive-match
//! safety; conversions to and from `ActionId` are lossless.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Flat integer action identifier, interpreted per phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u8);

impl ActionId {
    /// `RollDice`: request another roll of the selected dice.
    pub const REROLL: ActionId = ActionId(0);
    /// `RollDice`: accept the current sum.
    pub const ACCEPT: ActionId = ActionId(1);
    /// `SubmitPoints`: roller declines to place and takes the penalty.
    pub const MISS: ActionId = ActionId(27);
    /// `SubmitPoints`: non-roller abstains.
    pub const SKIP: ActionId = ActionId(28);

    /// Create an action id from a raw value.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The roller's decision in the `RollDice` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollAction {
    /// Spend one re-roll and draw again.
    Reroll,
    /// Keep the current sum and move to placement.
    Accept,
}

impl RollAction {
    /// Decode from the flat encoding. Panics on ids other than 0 or 1.
    #[must_use]
    pub fn from_id(id: ActionId) -> Self {
        match id {
            ActionId::REROLL => RollAction::Reroll,
            ActionId::ACCEPT => RollAction::Accept,
            other => panic!("invalid RollDice action id: {other}"),
        }
    }

    /// Flat encoding of this action.
    #[must_use]
    pub const fn id(self) -> ActionId {
        match self {
            RollAction::Reroll => ActionId::REROLL,
            RollAction::Accept => ActionId::ACCEPT,
        }
    }
}

/// A player's decision in the `SubmitPoints` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmitAction {
    /// Record the current sum into scoresheet cell 0..=26.
    Cell(u8),
    /// Roller only: take the miss penalty instead of placing.
    Miss,
    /// Non-rollers only: abstain this round.
    Skip,
}

impl SubmitAction {
    /// Decode from the flat encoding. Panics on ids above 28.
    #[must_use]
    pub fn from_id(id: ActionId) -> Self {
        match id {
            ActionId::MISS => SubmitAction::Miss,
            ActionId::SKIP => SubmitAction::Skip,
            ActionId(cell) if cell < 27 => SubmitAction::Cell(cell),
            other => panic!("invalid SubmitPoints action id: {other}"),
        }
    }

    /// Flat encoding of this action.
    #[must_use]
    pub const fn id(self) -> ActionId {
        match self {
            SubmitAction::Cell(c) => ActionId(c),
            SubmitAction::Miss => ActionId::MISS,
            SubmitAction::Skip => ActionId::SKIP,
        }
    }
}

/// Who produced an action: a player decision or a chance draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player(PlayerId),
    Chance,
}

/// A recorded action with metadata, kept in the state's history for
/// replay and orchestrator consistency checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted.
    pub actor: Actor,

    /// The flat action id, interpreted in the phase it was applied.
    pub action: ActionId,

    /// Round number when the action was taken (starts at 1).
    pub round: u32,

    /// Sequence number within the round (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(actor: Actor, action: ActionId, round: u32, sequence: u32) -> Self {
        Self {
            actor,
            action,
            round,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_action_round_trip() {
        assert_eq!(RollAction::from_id(ActionId::REROLL), RollAction::Reroll);
        assert_eq!(RollAction::from_id(ActionId::ACCEPT), RollAction::Accept);
        assert_eq!(RollAction::Reroll.id(), ActionId(0));
        assert_eq!(RollAction::Accept.id(), ActionId(1));
    }

    #[test]
    #[should_panic(expected = "invalid RollDice action id")]
    fn test_roll_action_rejects_cell_ids() {
        let _ = RollAction::from_id(ActionId(5));
    }

    #[test]
    fn test_submit_action_round_trip() {
        for cell in 0u8..27 {
            assert_eq!(SubmitAction::from_id(ActionId(cell)), SubmitAction::Cell(cell));
            assert_eq!(SubmitAction::Cell(cell).id(), ActionId(cell));
        }
        assert_eq!(SubmitAction::from_id(ActionId::MISS), SubmitAction::Miss);
        assert_eq!(SubmitAction::from_id(ActionId::SKIP), SubmitAction::Skip);
        assert_eq!(SubmitAction::Miss.id().raw(), 27);
        assert_eq!(SubmitAction::Skip.id().raw(), 28);
    }

    #[test]
    #[should_panic(expected = "invalid SubmitPoints action id")]
    fn test_submit_action_rejects_out_of_range() {
        let _ = SubmitAction::from_id(ActionId(29));
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(Actor::Player(PlayerId::new(0)), ActionId(3), 2, 1);

        assert_eq!(record.actor, Actor::Player(PlayerId::new(0)));
        assert_eq!(record.action, ActionId(3));
        assert_eq!(record.round, 2);
        assert_eq!(record.sequence, 1);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Actor::Chance, ActionId(11), 4, 2);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
