//! Articulation point (cut vertex) detection on boolean grids.
//!
//! A walkable cell is an articulation point when marking it unwalkable splits the remaining
//! walkable cells into more components. With a relevance mask, the question becomes narrower:
//! would removing the cell separate two *relevant* cells from each other? Relevant cells are
//! always reported, since they may never be removed.
//!
//! The search is a single depth-first pass tracking discovery order and low-link values
//! (Hopcroft-Tarjan). Frames live on an explicit stack, so depth is bounded by the heap and
//! not by the thread stack even on large, snake-like regions.
use crate::error::Result;
use crate::grid::{Cell, Grid, NEIGHBOR_COUNT};

/// One pending cell of the depth-first search.
struct Frame {
    cell: Cell,
    /// Next neighbour direction to examine.
    cursor: usize,
    /// Number of DFS children discovered from this cell.
    children: u32,
    /// Whether this cell's subtree holds a relevant cell.
    relevant_subtree: bool,
}

/// Finds the articulation points of the walkable cells.
///
/// Only the component containing the start cell is explored. The start is the first walkable
/// cell in storage order or, with `relevant`, the first walkable relevant cell. Cells in other
/// components are reported as `false`, so callers must pass connected input (or, with a
/// relevance mask, input whose relevant cells share a component).
///
/// Returns `Err(Error::SizeMismatch)` if `relevant` differs in size from `walkable`.
pub fn find_articulation_points(
    walkable: &Grid<bool>,
    relevant: Option<&Grid<bool>>,
) -> Result<Grid<bool>> {
    if let Some(mask) = relevant {
        walkable.ensure_same_size(mask)?;
    }

    let size = walkable.size();
    let mut is_cut = Grid::filled(size, false);
    let is_relevant = |c: Cell| relevant.is_some_and(|mask| mask[c]);

    let root = walkable
        .iter()
        .find(|(c, w)| **w && relevant.is_none_or(|mask| mask[*c]))
        .map(|(c, _)| c);
    let Some(root) = root else {
        // No walkable (relevant) cell.
        return Ok(is_cut);
    };

    // 0 marks an unvisited cell.
    let mut order: Grid<u32> = Grid::filled(size, 0);
    let mut low: Grid<u32> = Grid::filled(size, 0);
    let mut next_order = 1;

    let mut stack: Vec<Frame> = Vec::new();
    order[root] = next_order;
    low[root] = next_order;
    next_order += 1;
    if is_relevant(root) {
        is_cut[root] = true;
    }
    stack.push(Frame {
        cell: root,
        cursor: 0,
        children: 0,
        relevant_subtree: is_relevant(root),
    });

    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let u = frame.cell;

        if frame.cursor < NEIGHBOR_COUNT {
            let direction = frame.cursor;
            frame.cursor += 1;
            let Some(v) = size.neighbor(u, direction) else {
                continue;
            };
            if !walkable[v] {
                continue;
            }
            if order[v] == 0 {
                frame.children += 1;
                order[v] = next_order;
                low[v] = next_order;
                next_order += 1;
                let relevant_v = is_relevant(v);
                if relevant_v {
                    is_cut[v] = true;
                }
                stack.push(Frame {
                    cell: v,
                    cursor: 0,
                    children: 0,
                    relevant_subtree: relevant_v,
                });
            } else {
                low[u] = low[u].min(order[v]);
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => {
                let p = parent.cell;
                if done.relevant_subtree {
                    parent.relevant_subtree = true;
                }
                if low[done.cell] >= order[p] && (relevant.is_none() || done.relevant_subtree) {
                    is_cut[p] = true;
                }
                low[p] = low[p].min(low[done.cell]);
            }
            None => {
                // Root: a cut vertex iff it splits into several DFS subtrees, unless relevance
                // pins it.
                is_cut[done.cell] = done.children > 1 || relevant.is_some();
            }
        }
    }

    Ok(is_cut)
}
