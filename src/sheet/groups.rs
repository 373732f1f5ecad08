//! The fixed column-group table of the Qwinto scoresheet.
//!
//! The 27 cells (numbered 0..=26 row-major: Orange 0..=8, Yellow 9..=17,
//! Purple 18..=26) are partitioned into disjoint groups sharing a
//! no-duplicate-value constraint. The table is a printed-scoresheet
//! artifact: it is hardcoded here, not derived, and the five triple groups
//! additionally carry a designated bonus cell whose value scores when the
//! whole group is filled. Deviating from either table silently changes
//! game payoffs.
//!
//! Both lookup directions (cell to group, group to members) are built once
//! at first use.

use once_cell::sync::Lazy;

/// Number of cells per scoresheet row.
pub const CELLS_PER_ROW: usize = 9;

/// Number of scoresheet rows.
pub const NUM_ROWS: usize = 3;

/// Total number of value cells on a scoresheet.
pub const NUM_CELLS: usize = NUM_ROWS * CELLS_PER_ROW;

/// A column group: 1-3 cells sharing the uniqueness constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnGroup {
    /// Stable group id (index into `groups()`).
    pub id: u8,

    /// Member cell indices, ascending.
    pub members: &'static [u8],

    /// For triple groups: the cell whose value scores as bonus when all
    /// members are filled. The designated member follows no evident
    /// symmetric rule; it is fixed by the printed sheet.
    pub bonus_cell: Option<u8>,
}

impl ColumnGroup {
    /// Whether `cell` belongs to this group.
    #[must_use]
    pub fn contains(&self, cell: u8) -> bool {
        self.members.contains(&cell)
    }
}

const GROUP_TABLE: &[(&[u8], Option<u8>)] = &[
    // Unconstrained singletons
    (&[8], None),
    (&[18], None),
    // Pairs
    (&[2, 12], None),
    (&[3, 23], None),
    (&[7, 17], None),
    (&[9, 19], None),
    (&[13, 22], None),
    // Triples, each with its designated bonus cell
    (&[0, 10, 20], Some(20)),
    (&[1, 11, 21], Some(1)),
    (&[4, 14, 24], Some(4)),
    (&[5, 15, 25], Some(15)),
    (&[6, 16, 26], Some(26)),
];

static GROUPS: Lazy<Vec<ColumnGroup>> = Lazy::new(|| {
    GROUP_TABLE
        .iter()
        .enumerate()
        .map(|(id, &(members, bonus_cell))| ColumnGroup {
            id: id as u8,
            members,
            bonus_cell,
        })
        .collect()
});

static CELL_TO_GROUP: Lazy<[u8; NUM_CELLS]> = Lazy::new(|| {
    let mut map = [u8::MAX; NUM_CELLS];
    for group in GROUPS.iter() {
        for &cell in group.members {
            assert_eq!(map[cell as usize], u8::MAX, "cell {cell} in two groups");
            map[cell as usize] = group.id;
        }
    }
    assert!(map.iter().all(|&g| g != u8::MAX), "group table must cover all cells");
    map
});

/// All column groups.
#[must_use]
pub fn groups() -> &'static [ColumnGroup] {
    &GROUPS
}

/// The group containing `cell` (0..=26).
#[must_use]
pub fn group_of(cell: u8) -> &'static ColumnGroup {
    &GROUPS[CELL_TO_GROUP[cell as usize] as usize]
}

/// The five triple groups that award a bonus.
pub fn triple_groups() -> impl Iterator<Item = &'static ColumnGroup> {
    GROUPS.iter().filter(|g| g.bonus_cell.is_some())
}

/// Row index (0..3) of a cell.
#[must_use]
pub const fn row_of(cell: u8) -> usize {
    cell as usize / CELLS_PER_ROW
}

/// Column offset (0..9) of a cell within its row.
#[must_use]
pub const fn col_of(cell: u8) -> usize {
    cell as usize % CELLS_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_partition_all_cells() {
        let mut seen = [false; NUM_CELLS];
        for group in groups() {
            for &cell in group.members {
                assert!(!seen[cell as usize], "cell {cell} appears twice");
                seen[cell as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_singleton_groups() {
        assert_eq!(group_of(8).members, &[8]);
        assert_eq!(group_of(18).members, &[18]);
        assert_eq!(group_of(8).bonus_cell, None);
    }

    #[test]
    fn test_pair_groups() {
        assert_eq!(group_of(13).members, &[13, 22]);
        assert_eq!(group_of(22).members, &[13, 22]);
        assert_eq!(group_of(9).members, &[9, 19]);
        assert_eq!(group_of(2).members, &[2, 12]);
        assert_eq!(group_of(7).members, &[7, 17]);
        assert_eq!(group_of(3).members, &[3, 23]);
    }

    #[test]
    fn test_triple_groups_and_bonus_cells() {
        let triples: Vec<_> = triple_groups().collect();
        assert_eq!(triples.len(), 5);

        assert_eq!(group_of(10).members, &[0, 10, 20]);
        assert_eq!(group_of(10).bonus_cell, Some(20));
        assert_eq!(group_of(21).bonus_cell, Some(1));
        assert_eq!(group_of(14).bonus_cell, Some(4));
        assert_eq!(group_of(25).bonus_cell, Some(15));
        assert_eq!(group_of(16).bonus_cell, Some(26));
    }

    #[test]
    fn test_row_and_col() {
        assert_eq!(row_of(0), 0);
        assert_eq!(row_of(8), 0);
        assert_eq!(row_of(9), 1);
        assert_eq!(row_of(26), 2);
        assert_eq!(col_of(9), 0);
        assert_eq!(col_of(26), 8);
    }
}
