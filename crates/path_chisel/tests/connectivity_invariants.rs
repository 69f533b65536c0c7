//! Property tests for the connectivity guarantees of articulation search, chiseling and
//! carving.

use path_chisel::prelude::{
    all_mutually_reachable, carve_minimal, carve_to_size, component_count, find_articulation_points,
    is_connected, random_path, reachable_from, Cell, Grid, GridSize, PathConfig,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A random connected region: a random mask trimmed to the component of its first cell.
fn region_strategy() -> impl Strategy<Value = Grid<bool>> {
    (2u32..8, 2u32..8)
        .prop_flat_map(|(w, h)| {
            let len = (w * h) as usize;
            (Just(GridSize::new(w, h)), prop::collection::vec(prop::bool::weighted(0.7), len))
        })
        .prop_filter_map("mask has no walkable cell", |(size, bits)| {
            let mask = Grid::from_vec(size, bits).ok()?;
            let start = mask.cells().next()?;
            Some(reachable_from(&mask, start))
        })
}

fn without(region: &Grid<bool>, cell: Cell) -> Grid<bool> {
    let mut out = region.clone();
    out[cell] = false;
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn cut_vertices_match_brute_force(region in region_strategy()) {
        let cuts = find_articulation_points(&region, None).unwrap();
        for cell in region.size().cells() {
            let expected = region[cell] && component_count(&without(&region, cell)) > 1;
            prop_assert_eq!(cuts[cell], expected, "cell {}", cell);
        }
    }

    #[test]
    fn relevant_cuts_match_brute_force(region in region_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4)) {
        let members: Vec<Cell> = region.cells().collect();
        let required: Vec<Cell> = picks.iter().map(|i| members[i.index(members.len())]).collect();
        let relevant = Grid::from_cells(region.size(), required.iter().copied()).unwrap();

        let cuts = find_articulation_points(&region, Some(&relevant)).unwrap();
        for cell in region.size().cells() {
            let expected = if !region[cell] {
                false
            } else if relevant[cell] {
                true
            } else {
                !all_mutually_reachable(&without(&region, cell), &required)
            };
            prop_assert_eq!(cuts[cell], expected, "cell {}", cell);
        }
    }

    #[test]
    fn chiseled_paths_are_connected(
        (w, h) in (1u32..9, 1u32..9),
        coords in any::<(prop::sample::Index, prop::sample::Index)>(),
        wiggliness in prop_oneof![Just(1.0), 0.1f64..5.0],
        seed in any::<u64>(),
    ) {
        let size = GridSize::new(w, h);
        let from = size.cell_at(coords.0.index(size.cell_count()));
        let to = size.cell_at(coords.1.index(size.cell_count()));
        let config = PathConfig::new(size, from, to).with_wiggliness(wiggliness);
        let mut rng = StdRng::seed_from_u64(seed);

        let path = random_path(&config, &mut rng).unwrap().expect("open grid always has a path");
        prop_assert!(path.contains(from));
        prop_assert!(path.contains(to));
        prop_assert!(is_connected(&path.to_grid()));
    }

    #[test]
    fn minimal_carve_is_minimal(
        region in region_strategy(),
        picks in any::<(prop::sample::Index, prop::sample::Index)>(),
        seed in any::<u64>(),
    ) {
        let members: Vec<Cell> = region.cells().collect();
        let required = [members[picks.0.index(members.len())], members[picks.1.index(members.len())]];
        let mut rng = StdRng::seed_from_u64(seed);

        let carved = carve_minimal(&region, &required, &mut rng).unwrap();
        prop_assert!(is_connected(&carved));
        prop_assert!(carved.cells().all(|c| region[c]));
        for cell in carved.cells() {
            if required.contains(&cell) {
                continue;
            }
            prop_assert!(!all_mutually_reachable(&without(&carved, cell), &required));
        }
    }

    #[test]
    fn sized_carve_hits_target(
        region in region_strategy(),
        fraction in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let target = (region.count() as f64 * fraction) as usize;
        let mut rng = StdRng::seed_from_u64(seed);

        let carved = carve_to_size(&region, target, &mut rng).unwrap();
        prop_assert!(is_connected(&carved));
        prop_assert!(carved.cells().all(|c| region[c]));
        // A connected region always has a removable cell, so the target is met exactly.
        prop_assert_eq!(carved.count(), target);
    }
}
