//! Rectangular grid primitives shared by every generator.
//!
//! This module defines [`Cell`], [`GridSize`] and the dense [`Grid`] container. Per-cell
//! storage is a single `Vec` addressed by `x * height + y`, so column-major iteration order
//! is also the linearization order used by weighted sampling.
use std::fmt;
use std::ops::{Index, IndexMut};

use glam::UVec2;
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of 4-neighbour directions.
pub const NEIGHBOR_COUNT: usize = 4;

/// Neighbour offsets in visiting order.
const NEIGHBOR_OFFSETS: [(i64, i64); NEIGHBOR_COUNT] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Integer grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` shares an edge with this cell.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<UVec2> for Cell {
    fn from(v: UVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Cell> for UVec2 {
    fn from(c: Cell) -> Self {
        UVec2::new(c.x, c.y)
    }
}

impl From<Vector2<u32>> for Cell {
    fn from(v: Vector2<u32>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Cell> for Vector2<u32> {
    fn from(c: Cell) -> Self {
        Vector2 { x: c.x, y: c.y }
    }
}

/// Dimensions of a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSize {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Validates that both dimensions are positive.
    pub fn validate(self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid size must be > 0 in both dimensions, got {self}"
            )));
        }
        Ok(())
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Returns `Err(Error::OutOfBounds)` when `cell` lies outside this size.
    pub fn check(self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(Error::out_of_bounds(cell, self))
        }
    }

    /// Storage index of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.x as usize * self.height as usize + cell.y as usize)
    }

    /// Cell stored at `index`. The index must be below [`GridSize::cell_count`].
    #[inline]
    pub fn cell_at(self, index: usize) -> Cell {
        debug_assert!(index < self.cell_count(), "index {index} out of range");
        let h = self.height as usize;
        Cell::new((index / h) as u32, (index % h) as u32)
    }

    /// All cells in storage order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Cell::new(x, y)))
    }

    /// The `direction`-th 4-neighbour of `cell` (`0..4`), or `None` when it falls off
    /// the grid.
    #[inline]
    pub fn neighbor(self, cell: Cell, direction: usize) -> Option<Cell> {
        let (dx, dy) = *NEIGHBOR_OFFSETS.get(direction)?;
        let x = cell.x as i64 + dx;
        let y = cell.y as i64 + dy;
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some(Cell::new(x as u32, y as u32))
        }
    }

    /// In-bounds 4-neighbours of `cell`.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        (0..NEIGHBOR_COUNT).filter_map(move |d| self.neighbor(cell, d))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Dense per-cell storage for a fixed [`GridSize`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr<T>"))]
pub struct Grid<T> {
    size: GridSize,
    data: Vec<T>,
}

/// Unchecked wire form of [`Grid`]; deserialization goes through [`Grid::from_vec`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridRepr<T> {
    size: GridSize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = Error;

    fn try_from(repr: GridRepr<T>) -> Result<Self> {
        Self::from_vec(repr.size, repr.data)
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(size: GridSize, value: T) -> Self {
        Self {
            size,
            data: vec![value; size.cell_count()],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(size: GridSize, mut f: impl FnMut(Cell) -> T) -> Self {
        let data = size.cells().map(&mut f).collect();
        Self { size, data }
    }

    /// Wraps `data` laid out in storage order (`x * height + y`).
    pub fn from_vec(size: GridSize, data: Vec<T>) -> Result<Self> {
        if data.len() != size.cell_count() {
            return Err(Error::InvalidConfig(format!(
                "expected {} values for a {size} grid, got {}",
                size.cell_count(),
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.size.index_of(cell).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.size.index_of(cell).map(move |i| &mut self.data[i])
    }

    /// Overwrites the value at `cell`, returning the previous one.
    pub fn set(&mut self, cell: Cell, value: T) -> Result<T> {
        let i = self
            .size
            .index_of(cell)
            .ok_or_else(|| Error::out_of_bounds(cell, self.size))?;
        Ok(std::mem::replace(&mut self.data[i], value))
    }

    /// Values in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterates `(cell, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (size.cell_at(i), v))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Cell, &T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            data: self.iter().map(|(c, v)| f(c, v)).collect(),
        }
    }

    /// Returns `Err(Error::SizeMismatch)` unless `other` has the same size.
    pub fn ensure_same_size<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.size != other.size {
            return Err(Error::SizeMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        Ok(())
    }
}

impl Grid<bool> {
    /// Boolean grid with exactly `cells` set.
    pub fn from_cells(size: GridSize, cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let mut grid = Self::filled(size, false);
        for cell in cells {
            size.check(cell)?;
            grid[cell] = true;
        }
        Ok(grid)
    }

    /// Number of `true` cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// Cells that are `true`, in storage order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter().filter(|(_, v)| **v).map(|(c, _)| c)
    }

    /// Whether `cell` is in bounds and `true`.
    pub fn is_set(&self, cell: Cell) -> bool {
        self.get(cell).copied().unwrap_or(false)
    }
}

impl<T> Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        match self.size.index_of(cell) {
            Some(i) => &self.data[i],
            None => panic!("cell {cell} is outside of a {} grid", self.size),
        }
    }
}

impl<T> IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        match self.size.index_of(cell) {
            Some(i) => &mut self.data[i],
            None => panic!("cell {cell} is outside of a {} grid", self.size),
        }
    }
}
