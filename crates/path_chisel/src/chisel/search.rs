//! Randomized shortest-path search on unit-weight grids.
//!
//! Breadth-first layers from the start record every cell's distance until the target is
//! labelled. The path is then rebuilt backwards from the target, each step choosing uniformly
//! among neighbours exactly one step closer to the start, so every shortest path can come out.
use std::collections::VecDeque;

use rand::RngCore;

use crate::cell_set::CellSet;
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, GridSize};
use crate::sampling::rand_index;

const UNREACHED: u32 = u32::MAX;

/// Picks one of the shortest paths from `from` to `to` through walkable cells.
///
/// Returns `Ok(None)` when no path exists. Both endpoints must be in bounds and walkable.
pub fn random_shortest_path<R: RngCore + ?Sized>(
    walkable: &Grid<bool>,
    from: Cell,
    to: Cell,
    rng: &mut R,
) -> Result<Option<CellSet>> {
    let size = walkable.size();
    for cell in [from, to] {
        size.check(cell)?;
        if !walkable[cell] {
            return Err(Error::NotWalkable { cell });
        }
    }
    Ok(shortest_path(size, from, to, |c| walkable[c], rng))
}

/// Shortest-path search over the cells accepted by `passable`.
///
/// Endpoints are assumed in bounds and passable.
pub(crate) fn shortest_path<R, P>(
    size: GridSize,
    from: Cell,
    to: Cell,
    passable: P,
    rng: &mut R,
) -> Option<CellSet>
where
    R: RngCore + ?Sized,
    P: Fn(Cell) -> bool,
{
    let mut distance: Grid<u32> = Grid::filled(size, UNREACHED);
    distance[from] = 0;

    let mut queue = VecDeque::from([from]);
    'search: while let Some(cell) = queue.pop_front() {
        let next = distance[cell] + 1;
        for n in size.neighbors(cell) {
            if distance[n] != UNREACHED || !passable(n) {
                continue;
            }
            distance[n] = next;
            if n == to {
                break 'search;
            }
            queue.push_back(n);
        }
    }

    if distance[to] == UNREACHED {
        return None;
    }

    let mut path = CellSet::new(size);
    let mut cell = to;
    path.add(cell);
    let mut candidates: Vec<Cell> = Vec::with_capacity(4);
    while distance[cell] > 0 {
        let closer = distance[cell] - 1;
        candidates.clear();
        candidates.extend(
            size.neighbors(cell)
                .filter(|n| distance[*n] == closer && passable(*n)),
        );
        debug_assert!(!candidates.is_empty(), "broken distance labelling at {cell}");
        let Some(&step) = candidates.get(rand_index(rng, candidates.len().max(1))) else {
            return None;
        };
        cell = step;
        path.add(cell);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn mask(rows: &[&str]) -> Grid<bool> {
        let size = GridSize::new(rows[0].len() as u32, rows.len() as u32);
        Grid::from_fn(size, |c| rows[c.y as usize].as_bytes()[c.x as usize] == b'#')
    }

    fn assert_simple_path(path: &CellSet, from: Cell, to: Cell) {
        assert!(path.contains(from));
        assert!(path.contains(to));
        assert!(crate::connectivity::is_connected(&path.to_grid()));
    }

    #[test]
    fn open_grid_path_has_manhattan_length() {
        let walkable = Grid::filled(GridSize::new(6, 5), true);
        let mut rng = StdRng::seed_from_u64(1);
        let (from, to) = (Cell::new(0, 0), Cell::new(5, 4));
        let path = random_shortest_path(&walkable, from, to, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), from.manhattan(to) as usize + 1);
        assert_simple_path(&path, from, to);
    }

    #[test]
    fn path_routes_around_walls() {
        let walkable = mask(&[
            "####", //
            "...#", //
            "####", //
        ]);
        let mut rng = StdRng::seed_from_u64(2);
        let (from, to) = (Cell::new(0, 0), Cell::new(0, 2));
        let path = random_shortest_path(&walkable, from, to, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 9);
        assert!(path.contains(Cell::new(3, 1)));
        assert_simple_path(&path, from, to);
    }

    #[test]
    fn blocked_off_target_yields_none() {
        let walkable = mask(&["##.#", "##.#", "##.#"]);
        let mut rng = StdRng::seed_from_u64(3);
        let path = random_shortest_path(&walkable, Cell::new(0, 0), Cell::new(3, 2), &mut rng);
        assert!(path.unwrap().is_none());
    }

    #[test]
    fn identical_endpoints_give_single_cell() {
        let walkable = Grid::filled(GridSize::new(3, 3), true);
        let mut rng = StdRng::seed_from_u64(4);
        let c = Cell::new(1, 1);
        let path = random_shortest_path(&walkable, c, c, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(path.as_slice(), &[c]);
    }

    #[test]
    fn invalid_endpoints_are_rejected() {
        let walkable = mask(&["#.", "##"]);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            random_shortest_path(&walkable, Cell::new(0, 0), Cell::new(1, 0), &mut rng),
            Err(Error::NotWalkable { .. })
        ));
        assert!(matches!(
            random_shortest_path(&walkable, Cell::new(0, 0), Cell::new(2, 0), &mut rng),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn different_seeds_explore_different_shortest_paths() {
        let walkable = Grid::filled(GridSize::new(5, 5), true);
        let (from, to) = (Cell::new(0, 0), Cell::new(4, 4));
        let mut seen = HashSet::new();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let path = random_shortest_path(&walkable, from, to, &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(path.len(), 9);
            let mut cells: Vec<_> = path.iter().copied().collect();
            cells.sort();
            seen.insert(cells);
        }
        assert!(seen.len() > 1);
    }
}
