//! Scoresheet data model: cells, column groups, placement rules, scoring.

pub mod groups;
pub mod scoresheet;

pub use groups::{ColumnGroup, CELLS_PER_ROW, NUM_CELLS, NUM_ROWS};
pub use scoresheet::{CellList, Scoresheet};
