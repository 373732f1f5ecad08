//! Human-readable rendering of states, turns, and actions.
//!
//! The grid mirrors the printed Qwinto sheet: rows are staggered and each
//! row carries one gap (after Orange column 2, Yellow column 4, Purple
//! column 3) where the physical sheet has no cell boundary.

use std::fmt;

use crate::core::{ActionId, Phase, Turn};
use crate::game::state::QwintoState;
use crate::sheet::Scoresheet;

impl fmt::Display for QwintoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current player: {}", self.roller().0)?;
        writeln!(f, "Phase: {}", self.phase())?;
        writeln!(f, "Dice: {}", self.selection())?;
        writeln!(f, "Roll: {}", self.outcome())?;

        for player in 0..self.config().player_count as u8 {
            let sheet = self.sheet(crate::core::PlayerId::new(player));
            write_sheet(f, sheet)?;
        }

        Ok(())
    }
}

fn write_sheet(f: &mut fmt::Formatter<'_>, sheet: &Scoresheet) -> fmt::Result {
    let c = |i: u8| sheet.cell(i);

    writeln!(
        f,
        "      |{:2}|{:2}|{:2}|  |{:2}|{:2}|{:2}|{:2}|{:2}|{:2}|",
        c(0), c(1), c(2), c(3), c(4), c(5), c(6), c(7), c(8)
    )?;
    writeln!(
        f,
        "    {:2}|{:2}|{:2}|{:2}|{:2}|  |{:2}|{:2}|{:2}|{:2}|",
        c(9), c(10), c(11), c(12), c(13), c(14), c(15), c(16), c(17)
    )?;
    writeln!(
        f,
        "|{:2}|{:2}|{:2}|{:2}|  |{:2}|{:2}|{:2}|{:2}|{:2}|",
        c(18), c(19), c(20), c(21), c(22), c(23), c(24), c(25), c(26)
    )?;
    writeln!(f, "Miss: {}", sheet.miss_total())
}

/// Render an action for logs and debug UIs, in the context of who acted
/// and the phase it was applied in.
#[must_use]
pub fn action_to_string(turn: Turn, phase: Phase, action: ActionId) -> String {
    match turn {
        Turn::Chance => {
            assert!(
                (1..=18).contains(&action.raw()),
                "chance action out of range: {action}"
            );
            format!("Dice outcome {action}")
        }
        Turn::Player(player) => match phase {
            Phase::SelectDice => format!("[P{}] Dice: {}", player.0, action),
            Phase::RollDice => format!("[P{}] Take outcome: {}", player.0, action),
            Phase::SubmitPoints => format!("[P{}] Field: {}", player.0, action),
        },
        Turn::Simultaneous | Turn::Terminal => {
            panic!("no single-action rendering for {turn:?} nodes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceSelection, Die, PlayerId};
    use crate::game::config::QwintoGame;

    #[test]
    fn test_state_display_header() {
        let state = QwintoGame::builder().player_count(2).build().new_initial_state();
        let text = format!("{state}");

        assert!(text.starts_with("Current player: 0\n"));
        assert!(text.contains("Phase: Select\n"));
        assert!(text.contains("Roll: 0\n"));
        // One grid + miss line per player.
        assert_eq!(text.matches("Miss: 0").count(), 2);
    }

    #[test]
    fn test_state_display_shows_recorded_values() {
        let mut state = QwintoGame::builder().build().new_initial_state();
        state.apply_action(ActionId::new(DiceSelection::of(&[Die::Orange]).bits()));
        state.apply_action(ActionId::new(4));
        state.apply_action(ActionId::ACCEPT);
        state.apply_joint(&[ActionId::new(0)]);

        let text = format!("{state}");
        assert!(text.contains("| 4|"));
    }

    #[test]
    fn test_action_strings() {
        let p = Turn::Player(PlayerId::new(1));
        assert_eq!(
            action_to_string(p, Phase::SelectDice, ActionId::new(5)),
            "[P1] Dice: 5"
        );
        assert_eq!(
            action_to_string(p, Phase::RollDice, ActionId::ACCEPT),
            "[P1] Take outcome: 1"
        );
        assert_eq!(
            action_to_string(p, Phase::SubmitPoints, ActionId::new(20)),
            "[P1] Field: 20"
        );
        assert_eq!(
            action_to_string(Turn::Chance, Phase::RollDice, ActionId::new(11)),
            "Dice outcome 11"
        );
    }

    #[test]
    #[should_panic(expected = "chance action out of range")]
    fn test_chance_action_string_validates_range() {
        let _ = action_to_string(Turn::Chance, Phase::RollDice, ActionId::new(0));
    }
}
