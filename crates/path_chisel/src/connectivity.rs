//! Flood-fill connectivity queries over boolean grids.
use std::collections::VecDeque;

use crate::grid::{Cell, Grid};

/// Cells of `mask` reachable from `start` through 4-adjacent `true` cells.
///
/// The result is all `false` if `start` is out of bounds or not set in `mask`.
pub fn reachable_from(mask: &Grid<bool>, start: Cell) -> Grid<bool> {
    let size = mask.size();
    let mut seen = Grid::filled(size, false);
    if !mask.is_set(start) {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(cell) = queue.pop_front() {
        for n in size.neighbors(cell) {
            if mask[n] && !seen[n] {
                seen[n] = true;
                queue.push_back(n);
            }
        }
    }
    seen
}

/// Whether all `true` cells of `mask` form a single 4-connected component.
///
/// An empty mask counts as connected.
pub fn is_connected(mask: &Grid<bool>) -> bool {
    let Some(start) = mask.cells().next() else {
        return true;
    };
    reachable_from(mask, start).count() == mask.count()
}

/// Whether every cell in `cells` lies in the same component of `mask`.
pub fn all_mutually_reachable(mask: &Grid<bool>, cells: &[Cell]) -> bool {
    let Some(&first) = cells.first() else {
        return true;
    };
    let reach = reachable_from(mask, first);
    cells.iter().all(|c| reach.is_set(*c))
}

/// Number of 4-connected components formed by the `true` cells of `mask`.
pub fn component_count(mask: &Grid<bool>) -> usize {
    let mut remaining = mask.clone();
    let mut count = 0;
    loop {
        let Some(start) = remaining.cells().next() else {
            break;
        };
        let component = reachable_from(&remaining, start);
        for cell in component.cells() {
            remaining[cell] = false;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;

    fn mask(rows: &[&str]) -> Grid<bool> {
        let size = GridSize::new(rows[0].len() as u32, rows.len() as u32);
        Grid::from_fn(size, |c| rows[c.y as usize].as_bytes()[c.x as usize] == b'#')
    }

    #[test]
    fn flood_fill_stays_in_component() {
        let m = mask(&["##.#", "#..#", "####"]);
        let reach = reachable_from(&m, Cell::new(0, 0));
        assert_eq!(reach.count(), m.count());
        assert!(is_connected(&m));

        let split = mask(&["##.#", "#..#", "##.#"]);
        assert!(!is_connected(&split));
        assert_eq!(component_count(&split), 2);
        assert!(all_mutually_reachable(
            &split,
            &[Cell::new(0, 0), Cell::new(1, 2)]
        ));
        assert!(!all_mutually_reachable(
            &split,
            &[Cell::new(0, 0), Cell::new(3, 0)]
        ));
    }

    #[test]
    fn unset_start_reaches_nothing() {
        let m = mask(&["#.", ".#"]);
        assert_eq!(reachable_from(&m, Cell::new(1, 0)).count(), 0);
        assert_eq!(reachable_from(&m, Cell::new(5, 5)).count(), 0);
        // Diagonal cells are not adjacent.
        assert_eq!(component_count(&m), 2);
    }

    #[test]
    fn empty_mask_is_connected() {
        let m = Grid::filled(GridSize::new(3, 3), false);
        assert!(is_connected(&m));
        assert_eq!(component_count(&m), 0);
    }
}
