//! Property tests comparing `CellSet` against a `HashSet` reference model.

use std::collections::HashSet;

use path_chisel::prelude::{Cell, CellSet, GridSize};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
enum Op {
    Add(Cell),
    Remove(Cell),
}

fn op_strategy(width: u32, height: u32) -> impl Strategy<Value = Op> {
    (any::<bool>(), 0..width, 0..height).prop_map(|(add, x, y)| {
        if add {
            Op::Add(Cell::new(x, y))
        } else {
            Op::Remove(Cell::new(x, y))
        }
    })
}

proptest! {
    #[test]
    fn interleaved_ops_match_reference(ops in prop::collection::vec(op_strategy(6, 5), 0..200)) {
        let size = GridSize::new(6, 5);
        let mut set = CellSet::new(size);
        let mut model: HashSet<Cell> = HashSet::new();

        for op in ops {
            match op {
                Op::Add(c) => prop_assert_eq!(set.add(c), model.insert(c)),
                Op::Remove(c) => prop_assert_eq!(set.remove(c), model.remove(&c)),
            }
            prop_assert_eq!(set.len(), model.len());
        }

        let listed: Vec<Cell> = set.iter().copied().collect();
        let unique: HashSet<Cell> = listed.iter().copied().collect();
        prop_assert_eq!(unique.len(), listed.len(), "duplicate members: {:?}", listed);
        prop_assert_eq!(&unique, &model);
        for cell in size.cells() {
            prop_assert_eq!(set.contains(cell), model.contains(&cell));
        }
        prop_assert_eq!(set.to_grid().count(), model.len());
    }

    #[test]
    fn random_pick_is_always_a_member(
        ops in prop::collection::vec(op_strategy(4, 4), 1..80),
        seed in any::<u64>(),
    ) {
        let mut set = CellSet::new(GridSize::new(4, 4));
        for op in ops {
            match op {
                Op::Add(c) => { set.add(c); }
                Op::Remove(c) => { set.remove(c); }
            }
        }
        let mut rng = StdRng::seed_from_u64(seed);
        match set.random_cell(&mut rng) {
            Some(c) => prop_assert!(set.contains(c)),
            None => prop_assert!(set.is_empty()),
        }
    }
}
