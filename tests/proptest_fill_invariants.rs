use pixel_paint::fill::{fill_layer, fill_region, flood_fill};
use pixel_paint::{Color, Grid, History};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

const PALETTE: [Color; 4] = [Color::Transparent, Color::RED, Color::BLUE, Color::WHITE];

fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(PALETTE.to_vec())
}

/// A small grid of few colors, so regions of every shape show up
fn grid() -> impl Strategy<Value = Grid> {
    (1usize..=8, 1usize..=8).prop_flat_map(|(width, height)| {
        prop::collection::vec(color(), width * height)
            .prop_map(move |cells| Grid::from_cells(width, height, cells).unwrap())
    })
}

fn grid_and_seed() -> impl Strategy<Value = (Grid, usize)> {
    grid().prop_flat_map(|grid| {
        let len = grid.len();
        (Just(grid), 0..len)
    })
}

/// Reference connectivity: grow the region until no same-colored neighbor is left out
fn reference_region(grid: &Grid, seed: usize) -> BTreeSet<usize> {
    let target = grid.cells()[seed];
    let mut region = BTreeSet::from([seed]);
    loop {
        let grown: Vec<usize> = region
            .iter()
            .flat_map(|&i| grid.neighbors4(i).collect::<Vec<_>>())
            .filter(|&n| grid.cells()[n] == target && !region.contains(&n))
            .collect();
        if grown.is_empty() {
            return region;
        }
        region.extend(grown);
    }
}

// ============================================================================
// Flood fill
// ============================================================================

proptest! {
    #[test]
    fn changed_cells_are_the_connected_region((grid, seed) in grid_and_seed(), new_color in color()) {
        let filled = flood_fill(&grid, seed, new_color).unwrap();
        let region = reference_region(&grid, seed);

        if grid.cells()[seed] == new_color {
            prop_assert_eq!(&filled, &grid);
        } else {
            for i in 0..grid.len() {
                if region.contains(&i) {
                    prop_assert_eq!(filled.cells()[i], new_color);
                } else {
                    prop_assert_eq!(filled.cells()[i], grid.cells()[i]);
                }
            }
        }
    }

    #[test]
    fn region_lists_each_cell_once((grid, seed) in grid_and_seed()) {
        let region = fill_region(&grid, seed).unwrap();
        let unique: BTreeSet<usize> = region.iter().copied().collect();
        prop_assert_eq!(unique.len(), region.len());
        prop_assert_eq!(unique, reference_region(&grid, seed));
    }

    #[test]
    fn fill_is_idempotent((grid, seed) in grid_and_seed(), new_color in color()) {
        let once = flood_fill(&grid, seed, new_color).unwrap();
        let twice = flood_fill(&once, seed, new_color).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn any_seed_in_a_region_fills_the_same_cells((grid, seed) in grid_and_seed(), new_color in color()) {
        let region = fill_region(&grid, seed).unwrap();
        let expected = flood_fill(&grid, seed, new_color).unwrap();
        for &other in &region {
            prop_assert_eq!(&flood_fill(&grid, other, new_color).unwrap(), &expected);
        }
    }

    #[test]
    fn layer_fill_never_starts_from_transparent((grid, seed) in grid_and_seed(), new_color in color()) {
        let filled = fill_layer(&grid, seed, new_color).unwrap();
        if grid.cells()[seed].is_transparent() {
            prop_assert_eq!(filled, grid);
        } else {
            prop_assert_eq!(filled, flood_fill(&grid, seed, new_color).unwrap());
        }
    }
}

// ============================================================================
// History
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    Commit(u32),
    Undo,
    Redo,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<u32>().prop_map(Step::Commit),
        Just(Step::Undo),
        Just(Step::Redo),
    ]
}

proptest! {
    #[test]
    fn history_behaves_like_a_truncated_list(steps in prop::collection::vec(step(), 0..40)) {
        let mut history = History::new(0u32);
        let mut model = vec![0u32];
        let mut cursor = 0usize;

        for step in steps {
            match step {
                Step::Commit(state) => {
                    history.commit(state);
                    model.truncate(cursor + 1);
                    model.push(state);
                    cursor = model.len() - 1;
                }
                Step::Undo => {
                    let undone = history.undo().copied();
                    if cursor > 0 {
                        cursor -= 1;
                        prop_assert_eq!(undone, Some(model[cursor]));
                    } else {
                        prop_assert_eq!(undone, None);
                    }
                }
                Step::Redo => {
                    let redone = history.redo().copied();
                    if cursor + 1 < model.len() {
                        cursor += 1;
                        prop_assert_eq!(redone, Some(model[cursor]));
                    } else {
                        prop_assert_eq!(redone, None);
                    }
                }
            }
            prop_assert_eq!(history.len(), model.len());
            prop_assert_eq!(*history.current(), model[cursor]);
        }
    }
}
