//! Property-based tests comparing the incremental grid against a flood-fill
//! oracle that recomputes fullness from scratch.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::test_utils::suite_proptest_config;

use super::{Percolation, row_major_index};

/// Breadth-first search from every open top-row site.
fn flood_fill(size: usize, open: &[bool]) -> Vec<bool> {
    let mut full = vec![false; size * size];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    for col in 1..=size {
        let index = row_major_index(1, col, size);
        if open[index] {
            full[index] = true;
            queue.push_back((1, col));
        }
    }

    while let Some((row, col)) = queue.pop_front() {
        let neighbours = [
            (row.wrapping_sub(1), col),
            (row + 1, col),
            (row, col.wrapping_sub(1)),
            (row, col + 1),
        ];
        for (r, c) in neighbours {
            if !(1..=size).contains(&r) || !(1..=size).contains(&c) {
                continue;
            }
            let index = row_major_index(r, c, size);
            if open[index] && !full[index] {
                full[index] = true;
                queue.push_back((r, c));
            }
        }
    }
    full
}

fn open_sequence_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1_usize..=8).prop_flat_map(|size| {
        let site = (1..=size, 1..=size);
        (Just(size), prop::collection::vec(site, 0..=(size * size * 2)))
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn matches_flood_fill_after_every_open((size, sites) in open_sequence_strategy()) {
        let mut grid = Percolation::new(size).expect("size is positive");
        let mut open = vec![false; size * size];

        for (row, col) in sites {
            grid.open(row, col).expect("site is on the grid");
            open[row_major_index(row, col, size)] = true;

            let expected = flood_fill(size, &open);
            for r in 1..=size {
                for c in 1..=size {
                    let index = row_major_index(r, c, size);
                    prop_assert_eq!(grid.is_open(r, c).expect("on grid"), open[index]);
                    prop_assert_eq!(grid.is_full(r, c).expect("on grid"), expected[index]);
                }
            }
            let bottom_full = (1..=size)
                .any(|c| expected[row_major_index(size, c, size)]);
            prop_assert_eq!(grid.percolates(), bottom_full);
            prop_assert_eq!(grid.open_sites(), open.iter().filter(|o| **o).count());
        }
    }

    #[test]
    fn open_state_is_monotonic((size, sites) in open_sequence_strategy()) {
        let mut grid = Percolation::new(size).expect("size is positive");
        let mut opened: Vec<(usize, usize)> = Vec::new();
        let mut percolated = false;

        for (row, col) in sites {
            grid.open(row, col).expect("site is on the grid");
            opened.push((row, col));
            for &(r, c) in &opened {
                prop_assert!(grid.is_open(r, c).expect("on grid"));
            }
            // Once percolating, always percolating.
            prop_assert!(!percolated || grid.percolates());
            percolated = grid.percolates();
        }
    }

    #[test]
    fn full_sites_are_open((size, sites) in open_sequence_strategy()) {
        let mut grid = Percolation::new(size).expect("size is positive");
        for (row, col) in sites {
            grid.open(row, col).expect("site is on the grid");
        }
        for r in 1..=size {
            for c in 1..=size {
                if grid.is_full(r, c).expect("on grid") {
                    prop_assert!(grid.is_open(r, c).expect("on grid"));
                }
            }
        }
    }
}
