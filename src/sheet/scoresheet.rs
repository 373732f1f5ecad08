//! A player's scoresheet: 3 rows of 9 cells plus the miss accumulator.
//!
//! Cells hold 0 (empty) or a recorded value in 1..=18 and are write-once.
//! Two structural constraints govern placement:
//!
//! - **Row monotonicity**: filled cells in a row strictly increase left to
//!   right; empty cells impose no constraint.
//! - **Group uniqueness**: no value appears twice within a column group
//!   (see [`super::groups`]).
//!
//! The miss accumulator starts at 0 and only ever decreases.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::groups::{self, CELLS_PER_ROW, NUM_CELLS, NUM_ROWS};
use crate::core::DiceSelection;

/// Candidate placement cells for one player, inline-allocated.
pub type CellList = SmallVec<[u8; NUM_CELLS]>;

/// One player's persistent record of filled cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoresheet {
    /// Cell values, row-major (Orange 0..=8, Yellow 9..=17, Purple 18..=26).
    /// 0 = empty.
    cells: [u8; NUM_CELLS],

    /// Running miss penalty total; 0 or negative.
    miss: i32,
}

impl Default for Scoresheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoresheet {
    /// Create an empty scoresheet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [0; NUM_CELLS],
            miss: 0,
        }
    }

    /// Value of a cell (0 = empty).
    #[must_use]
    pub fn cell(&self, cell: u8) -> u8 {
        self.cells[cell as usize]
    }

    /// Whether a cell is still empty.
    #[must_use]
    pub fn is_cell_empty(&self, cell: u8) -> bool {
        self.cell(cell) == 0
    }

    /// The 9 cells of row `row` (0 = Orange, 1 = Yellow, 2 = Purple).
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * CELLS_PER_ROW..(row + 1) * CELLS_PER_ROW]
    }

    /// Number of filled cells in a row.
    #[must_use]
    pub fn filled_in_row(&self, row: usize) -> usize {
        self.row(row).iter().filter(|&&v| v > 0).count()
    }

    /// Whether all 9 cells of a row are filled.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.filled_in_row(row) == CELLS_PER_ROW
    }

    /// Current miss accumulator (0 or negative).
    #[must_use]
    pub fn miss_total(&self) -> i32 {
        self.miss
    }

    /// Whether writing `value` into `cell` satisfies all placement
    /// constraints: empty cell, row monotonicity, group uniqueness.
    #[must_use]
    pub fn can_place(&self, cell: u8, value: u8) -> bool {
        if !self.is_cell_empty(cell) {
            return false;
        }

        let row = self.row(groups::row_of(cell));
        let col = groups::col_of(cell);

        // Empty cells are 0, so the left-side comparison skips them for free.
        if !row[..col].iter().all(|&v| v < value) {
            return false;
        }
        if !row[col + 1..].iter().all(|&v| v == 0 || v > value) {
            return false;
        }

        groups::group_of(cell)
            .members
            .iter()
            .all(|&member| self.cell(member) != value)
    }

    /// All cells where `value` may legally be placed given the selected
    /// dice (only rows whose color is selected are eligible). Ascending.
    #[must_use]
    pub fn legal_cells(&self, selection: DiceSelection, value: u8) -> CellList {
        let mut cells = CellList::new();

        for row in 0..NUM_ROWS {
            if !selection.allows_row(row) {
                continue;
            }
            for col in 0..CELLS_PER_ROW {
                let cell = (row * CELLS_PER_ROW + col) as u8;
                if self.can_place(cell, value) {
                    cells.push(cell);
                }
            }
        }

        cells
    }

    /// Record `value` into `cell`. Write-once: the cell must be empty and
    /// the value in 1..=18.
    pub fn record(&mut self, cell: u8, value: u8) {
        assert!(
            (1..=18).contains(&value),
            "recorded value out of range: {value}"
        );
        assert!(
            self.is_cell_empty(cell),
            "cell {cell} already holds {}",
            self.cell(cell)
        );
        self.cells[cell as usize] = value;
    }

    /// Apply the miss penalty (a negative constant) to the accumulator.
    pub fn apply_miss(&mut self, penalty: i32) {
        assert!(penalty < 0, "miss penalty must be negative: {penalty}");
        self.miss += penalty;
    }

    /// Final score contribution of this sheet: per-row scores, triple-group
    /// bonuses, and the miss accumulator.
    ///
    /// A full row scores its rightmost value; a partial row scores its
    /// filled-cell count. A fully filled triple group scores its designated
    /// cell's value on top.
    #[must_use]
    pub fn score(&self) -> i32 {
        let mut total = 0i32;

        for row in 0..NUM_ROWS {
            if self.is_row_full(row) {
                total += i32::from(self.row(row)[CELLS_PER_ROW - 1]);
            } else {
                total += self.filled_in_row(row) as i32;
            }
        }

        for group in groups::triple_groups() {
            if group.members.iter().all(|&m| !self.is_cell_empty(m)) {
                let bonus_cell = group.bonus_cell.unwrap();
                total += i32::from(self.cell(bonus_cell));
            }
        }

        total + self.miss
    }
}
