//! Path chiseling: grow a winding path between two endpoints by blocking cells at random.
//!
//! Every cell starts [`CellState::Open`] except the endpoints, which are
//! [`CellState::Forced`]. A working shortest path (the *witness*) is kept between the
//! endpoints. Open cells are blocked one at a time; whenever a blocked cell lay on the
//! witness, a new shortest path is searched. If none exists the cell was essential, so it is
//! forced open instead. Once no open cell remains, the witness is exactly the set of forced
//! cells and is returned.
//!
//! The `wiggliness` parameter biases which open cell is blocked next: cells on the witness
//! get weight `wiggliness`, all others weight 1. Values above 1 keep knocking out the current
//! path and push it into long detours; values below 1 leave it alone and yield
//! near-straight paths.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cell_set::CellSet;
use crate::error::{Error, Result};
use crate::events::{ChiselEvent, ChiselEventKind, EventSink};
use crate::grid::{Cell, Grid, GridSize};
use crate::sampling::{pick_weighted_index, rand_index};

pub mod search;

pub use search::random_shortest_path;

/// Wiggliness giving every open cell the same blocking probability.
pub const DEFAULT_WIGGLINESS: f64 = 1.0;

/// Per-cell state while chiseling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Still eligible for blocking.
    Open,
    /// Removed from the map.
    Blocked,
    /// Kept for good: an endpoint, or a cell the endpoints cannot be connected without.
    Forced,
}

/// Configuration for a chisel run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathConfig {
    /// Grid dimensions.
    pub size: GridSize,
    /// Start endpoint.
    pub from: Cell,
    /// Target endpoint.
    pub to: Cell,
    /// Blocking weight of cells on the working path relative to other open cells.
    pub wiggliness: f64,
    /// Cells that may be used at all; `None` means the whole grid.
    pub walkable: Option<Grid<bool>>,
}

impl PathConfig {
    /// Creates a new [`PathConfig`] for a path between `from` and `to`.
    pub fn new(size: GridSize, from: Cell, to: Cell) -> Self {
        Self {
            size,
            from,
            to,
            wiggliness: DEFAULT_WIGGLINESS,
            walkable: None,
        }
    }

    /// Sets the wiggliness.
    pub fn with_wiggliness(mut self, wiggliness: f64) -> Self {
        self.wiggliness = wiggliness;
        self
    }

    /// Restricts the path to the `true` cells of `walkable`.
    pub fn with_walkable(mut self, walkable: Grid<bool>) -> Self {
        self.walkable = Some(walkable);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.size.validate()?;
        self.size.check(self.from)?;
        self.size.check(self.to)?;
        if !self.wiggliness.is_finite() || self.wiggliness <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "wiggliness must be a positive finite number, got {}",
                self.wiggliness
            )));
        }
        if let Some(walkable) = &self.walkable {
            if walkable.size() != self.size {
                return Err(Error::SizeMismatch {
                    expected: self.size,
                    actual: walkable.size(),
                });
            }
            for cell in [self.from, self.to] {
                if !walkable[cell] {
                    return Err(Error::NotWalkable { cell });
                }
            }
        }
        Ok(())
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        self.walkable.as_ref().is_none_or(|w| w[cell])
    }
}

/// Runs path chiseling for a validated [`PathConfig`].
pub struct PathChisel {
    /// Configuration applied to every run.
    pub config: PathConfig,
}

impl PathChisel {
    pub fn try_new(config: PathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates a path, or `None` if the endpoints are not connected through walkable cells.
    pub fn run(&mut self, rng: &mut impl RngCore) -> Option<CellSet> {
        chisel_path(&self.config, rng, &mut ())
    }

    pub fn run_with_events(
        &mut self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Option<CellSet> {
        chisel_path(&self.config, rng, sink)
    }
}

/// Generates a random path between the configured endpoints.
///
/// Returns `Ok(None)` when the endpoints are disconnected before any cell is blocked.
pub fn random_path<R: RngCore>(config: &PathConfig, rng: &mut R) -> Result<Option<CellSet>> {
    config.validate()?;
    Ok(chisel_path(config, rng, &mut ()))
}

pub fn random_path_with_events<R: RngCore>(
    config: &PathConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Option<CellSet>> {
    config.validate()?;
    Ok(chisel_path(config, rng, sink))
}

fn chisel_path<R: RngCore + ?Sized>(
    config: &PathConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Option<CellSet> {
    let size = config.size;
    let (from, to) = (config.from, config.to);

    let mut states = Grid::from_fn(size, |c| {
        if config.is_walkable(c) {
            CellState::Open
        } else {
            CellState::Blocked
        }
    });
    states[from] = CellState::Forced;
    states[to] = CellState::Forced;

    let mut open = CellSet::with_cells(
        size,
        states
            .iter()
            .filter(|(_, s)| **s == CellState::Open)
            .map(|(c, _)| c),
    );

    let Some(mut witness) = search::shortest_path(
        size,
        from,
        to,
        |c| states[c] != CellState::Blocked,
        rng,
    ) else {
        debug!("No path between {} and {} on a {} grid.", from, to, size);
        if sink.wants(ChiselEventKind::NoPath) {
            sink.send(ChiselEvent::NoPath { from, to });
        }
        return None;
    };

    if from == to {
        warn!("Path endpoints coincide at {}; result is a single cell.", from);
        if sink.wants(ChiselEventKind::Warning) {
            sink.send(ChiselEvent::Warning {
                context: "chisel".into(),
                message: format!("endpoints coincide at {from}"),
            });
        }
    }

    debug!(
        "Chiseling {} grid from {} to {} | open: {}, wiggliness: {}.",
        size,
        from,
        to,
        open.len(),
        config.wiggliness
    );
    if sink.wants(ChiselEventKind::PathStarted) {
        sink.send(ChiselEvent::PathStarted {
            size,
            from,
            to,
            wiggliness: config.wiggliness,
            open_cells: open.len(),
            initial_length: witness.len(),
        });
    }

    let mut forced_cells = 0;
    let mut repairs = 0;
    while let Some(cell) = pick_open_cell(&open, &witness, config.wiggliness, rng) {
        states[cell] = CellState::Blocked;
        open.remove(cell);

        let on_path = witness.contains(cell);
        if on_path {
            match search::shortest_path(size, from, to, |c| states[c] != CellState::Blocked, rng)
            {
                Some(path) => {
                    witness = path;
                    repairs += 1;
                    trace!("Blocked {}; path repaired to {} cells.", cell, witness.len());
                    if sink.wants(ChiselEventKind::CellBlocked) {
                        sink.send(ChiselEvent::CellBlocked {
                            cell,
                            on_path: true,
                        });
                    }
                    if sink.wants(ChiselEventKind::PathRepaired) {
                        sink.send(ChiselEvent::PathRepaired {
                            cell,
                            length: witness.len(),
                        });
                    }
                }
                None => {
                    states[cell] = CellState::Forced;
                    forced_cells += 1;
                    trace!("Forced {}.", cell);
                    if sink.wants(ChiselEventKind::CellForced) {
                        sink.send(ChiselEvent::CellForced { cell });
                    }
                }
            }
        } else if sink.wants(ChiselEventKind::CellBlocked) {
            sink.send(ChiselEvent::CellBlocked {
                cell,
                on_path: false,
            });
        }
    }

    debug!(
        "Chiseled path of {} cells | forced: {}, repairs: {}.",
        witness.len(),
        forced_cells,
        repairs
    );
    if sink.wants(ChiselEventKind::PathFinished) {
        sink.send(ChiselEvent::PathFinished {
            length: witness.len(),
            forced_cells,
            repairs,
        });
    }
    Some(witness)
}

/// Chooses the next open cell to block.
///
/// With unit wiggliness every open cell is equally likely. Otherwise a tier is drawn first,
/// open witness cells weighing `wiggliness` each and the remaining open cells 1 each, and a
/// cell is then picked uniformly within the tier.
fn pick_open_cell<R: RngCore + ?Sized>(
    open: &CellSet,
    witness: &CellSet,
    wiggliness: f64,
    rng: &mut R,
) -> Option<Cell> {
    if open.is_empty() {
        return None;
    }
    if wiggliness == DEFAULT_WIGGLINESS {
        return open.random_cell(rng);
    }

    let on_path: Vec<Cell> = witness
        .iter()
        .copied()
        .filter(|c| open.contains(*c))
        .collect();
    let off_path = open.len() - on_path.len();
    // Saturate so a huge finite wiggliness cannot overflow to infinity.
    let tiers = [
        (on_path.len() as f64 * wiggliness).min(f64::MAX),
        off_path as f64,
    ];

    match pick_weighted_index(&tiers, rng) {
        Ok(Some(0)) => Some(on_path[rand_index(rng, on_path.len())]),
        Ok(Some(_)) => {
            let candidates: Vec<Cell> = open
                .iter()
                .copied()
                .filter(|c| !witness.contains(*c))
                .collect();
            Some(candidates[rand_index(rng, candidates.len())])
        }
        // Both tiers are empty only when `open` is, which returned above.
        Ok(None) => open.random_cell(rng),
        Err(err) => {
            debug_assert!(false, "tier weights rejected: {err}");
            open.random_cell(rng)
        }
    }
}
