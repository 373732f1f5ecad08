//! Turn markers, phases, and dice selection.
//!
//! These are the closed tagged variants the orchestrator dispatches on:
//! `Turn` says who decides next, `Phase` says where the round cycle stands,
//! and `DiceSelection` is the bitmask of colored dice chosen by the roller.
//!
//! Bit values of `Die` are fixed: they double as the `SelectDice` action
//! encoding (1..=7) and must not change without breaking interop with
//! orchestrators and trained models.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// One of the three colored dice.
///
/// The discriminants are bitmask values used directly in action encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Die {
    Orange = 1,
    Purple = 2,
    Yellow = 4,
}

impl Die {
    /// All dice in scoresheet row order: Orange (row 0), Yellow (row 1),
    /// Purple (row 2).
    pub const ROW_ORDER: [Die; 3] = [Die::Orange, Die::Yellow, Die::Purple];

    /// The die whose color matches scoresheet row `row` (0..3).
    #[must_use]
    pub fn for_row(row: usize) -> Die {
        Self::ROW_ORDER[row]
    }

    /// Bitmask value of this die.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Die::Orange => write!(f, "Orange"),
            Die::Purple => write!(f, "Purple"),
            Die::Yellow => write!(f, "Yellow"),
        }
    }
}

/// A subset of the three colored dice, stored as a bitmask.
///
/// The empty selection (`0`) only occurs before the first `SelectDice`
/// decision of a round; every selectable subset is non-empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSelection(u8);

impl DiceSelection {
    /// The empty selection (no dice chosen yet).
    pub const NONE: DiceSelection = DiceSelection(0);

    /// Build a selection from a raw bitmask.
    ///
    /// Panics on bits outside 0..=7; this is the action-encoding contract.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        assert!(bits <= 7, "dice selection bits out of range: {bits}");
        Self(bits)
    }

    /// Build a selection from individual dice.
    #[must_use]
    pub fn of(dice: &[Die]) -> Self {
        Self(dice.iter().fold(0, |acc, d| acc | d.bit()))
    }

    /// Raw bitmask (doubles as the `SelectDice` action id).
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether this selection contains the given die.
    #[must_use]
    pub const fn contains(self, die: Die) -> bool {
        self.0 & die.bit() != 0
    }

    /// Number of dice selected (1..=3 for legal selections).
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no dice are selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether scoresheet row `row` is eligible for placement under this
    /// selection (its color is among the selected dice).
    #[must_use]
    pub fn allows_row(self, row: usize) -> bool {
        self.contains(Die::for_row(row))
    }

    /// The 7 non-empty subsets, in ascending bitmask order.
    pub fn all_non_empty() -> impl Iterator<Item = DiceSelection> {
        (1u8..=7).map(DiceSelection)
    }

    /// Iterate over the selected dice in row order.
    pub fn iter(self) -> impl Iterator<Item = Die> {
        Die::ROW_ORDER.into_iter().filter(move |d| self.contains(*d))
    }
}

impl std::fmt::Display for DiceSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for die in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{die}")?;
            first = false;
        }
        Ok(())
    }
}

/// The three phases of a round, cycled once per roller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Roller picks a non-empty subset of the dice.
    SelectDice,
    /// Roller either accepts the rolled sum or spends a re-roll.
    RollDice,
    /// All players simultaneously place the sum or decline.
    SubmitPoints,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::SelectDice => write!(f, "Select"),
            Phase::RollDice => write!(f, "Roll"),
            Phase::SubmitPoints => write!(f, "Submit"),
        }
    }
}

/// Who decides at the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// A single player decides (the roller, in `SelectDice`/`RollDice`).
    Player(PlayerId),
    /// A dice sum is drawn from the active distribution.
    Chance,
    /// Every player decides at once (`SubmitPoints`).
    Simultaneous,
    /// The game is over; no decisions remain.
    Terminal,
}

impl Turn {
    /// Whether this is a chance node.
    #[must_use]
    pub const fn is_chance(self) -> bool {
        matches!(self, Turn::Chance)
    }

    /// Whether this is the simultaneous-decision node.
    #[must_use]
    pub const fn is_simultaneous(self) -> bool {
        matches!(self, Turn::Simultaneous)
    }

    /// The deciding player, if this is a single-player node.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Turn::Player(p) => Some(p),
            _ => None,
        }
    }
}
