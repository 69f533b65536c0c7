//! Sparse cell-membership index with O(1) mutation and uniform random pick.
use rand::RngCore;

use crate::grid::{Cell, Grid, GridSize};
use crate::sampling::rand_index;

/// Set of cells on a fixed-size grid.
///
/// Members are kept densely packed in a `Vec`, with a per-cell slot table mapping each
/// member back to its position. Removal swaps the last member into the freed slot, so
/// `add`, `remove`, `contains` and [`CellSet::random_cell`] are all O(1).
///
/// Adding or removing a cell outside of the declared size is a programming error and
/// panics.
#[derive(Clone, Debug)]
pub struct CellSet {
    cells: Vec<Cell>,
    slots: Grid<Option<usize>>,
}

impl CellSet {
    pub fn new(size: GridSize) -> Self {
        Self {
            cells: Vec::new(),
            slots: Grid::filled(size, None),
        }
    }

    /// Creates a set containing every cell of `size`.
    pub fn full(size: GridSize) -> Self {
        Self::with_cells(size, size.cells())
    }

    pub fn with_cells(size: GridSize, cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut set = Self::new(size);
        for cell in cells {
            set.add(cell);
        }
        set
    }

    /// Creates a set from the `true` cells of `grid`.
    pub fn from_grid(grid: &Grid<bool>) -> Self {
        Self::with_cells(grid.size(), grid.cells())
    }

    pub fn size(&self) -> GridSize {
        self.slots.size()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        matches!(self.slots.get(cell), Some(Some(_)))
    }

    /// Inserts `cell`. Returns `false` if it was already present.
    pub fn add(&mut self, cell: Cell) -> bool {
        let slot = &mut self.slots[cell];
        if slot.is_some() {
            return false;
        }
        *slot = Some(self.cells.len());
        self.cells.push(cell);
        true
    }

    /// Removes `cell`. Returns `false` if it was not present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let Some(index) = self.slots[cell].take() else {
            return false;
        };
        self.cells.swap_remove(index);
        if let Some(&moved) = self.cells.get(index) {
            self.slots[moved] = Some(index);
        }
        true
    }

    pub fn clear(&mut self) {
        for cell in self.cells.drain(..) {
            self.slots[cell] = None;
        }
    }

    /// Picks a member uniformly at random, or `None` if the set is empty.
    pub fn random_cell<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rand_index(rng, self.cells.len())])
    }

    /// Members in insertion order, perturbed by removals.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Dense boolean snapshot of membership.
    pub fn to_grid(&self) -> Grid<bool> {
        self.slots.map(|_, slot| slot.is_some())
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.len() == other.len()
            && self.cells.iter().all(|c| other.contains(*c))
    }
}

impl Eq for CellSet {}
