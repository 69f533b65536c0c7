//! Region carving: shrink a connected region by removing non-articulation cells.
//!
//! Two modes share the same loop. Each round recomputes the articulation points of the
//! current region, gives weight 1 to every member that is not a cut vertex, and removes one
//! of them at random. Removing a non-cut cell never disconnects the region, so connectivity
//! holds after every step.
//!
//! - [`CarveMode::MinimalPath`]: the region first shrinks to the component of the required
//!   cells. Members must then also not be cut vertices relative to the required cells, which
//!   pins the required cells themselves. While some non-required member can be dropped
//!   without separating the required cells, a leaf of the block-cut tree offers one that is
//!   not a plain cut vertex either, so carving ends at a random minimal connected subset
//!   containing all of them.
//! - [`CarveMode::TargetSize`]: plain articulation points; carving stops at the target
//!   member count or when nothing else can be removed.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::articulation::find_articulation_points;
use crate::connectivity::{all_mutually_reachable, is_connected, reachable_from};
use crate::error::{Error, Result};
use crate::events::{ChiselEvent, ChiselEventKind, EventSink};
use crate::grid::{Cell, Grid};
use crate::sampling::pick_weighted_cell;

/// What a carve run shrinks towards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CarveMode {
    /// Smallest connected subset still linking all required cells.
    MinimalPath {
        /// Cells that must stay in the region.
        required: Vec<Cell>,
    },
    /// Connected subset with the given number of cells.
    TargetSize(usize),
}

/// Configuration for a carve run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarveConfig {
    /// Starting region.
    pub walkable: Grid<bool>,
    /// Stopping rule.
    pub mode: CarveMode,
}

impl CarveConfig {
    pub fn new(walkable: Grid<bool>, mode: CarveMode) -> Self {
        Self { walkable, mode }
    }

    /// Carve `walkable` down to a minimal region linking `required`.
    pub fn minimal_path(walkable: Grid<bool>, required: impl IntoIterator<Item = Cell>) -> Self {
        Self::new(
            walkable,
            CarveMode::MinimalPath {
                required: required.into_iter().collect(),
            },
        )
    }

    /// Carve `walkable` down to `target` cells.
    pub fn target_size(walkable: Grid<bool>, target: usize) -> Self {
        Self::new(walkable, CarveMode::TargetSize(target))
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let size = self.walkable.size();
        size.validate()?;
        match &self.mode {
            CarveMode::MinimalPath { required } => {
                if required.is_empty() {
                    return Err(Error::InvalidConfig(
                        "at least one required cell is needed".into(),
                    ));
                }
                for &cell in required {
                    size.check(cell)?;
                    if !self.walkable[cell] {
                        return Err(Error::NotWalkable { cell });
                    }
                }
                if !all_mutually_reachable(&self.walkable, required) {
                    return Err(Error::Disconnected(
                        "required cells do not share a connected component".into(),
                    ));
                }
            }
            CarveMode::TargetSize(_) => {
                if !is_connected(&self.walkable) {
                    return Err(Error::Disconnected(
                        "region has more than one connected component".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Runs region carving for a validated [`CarveConfig`].
pub struct RegionCarver {
    /// Configuration applied to every run.
    pub config: CarveConfig,
}

impl RegionCarver {
    pub fn try_new(config: CarveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run(&mut self, rng: &mut impl RngCore) -> Result<Grid<bool>> {
        carve(&self.config, rng, &mut ())
    }

    pub fn run_with_events(
        &mut self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Grid<bool>> {
        carve(&self.config, rng, sink)
    }
}

/// Returns a random minimal connected subset of `walkable` containing all of `required`.
///
/// Walkable cells outside the component of the required cells are removed as well.
pub fn carve_minimal<R: RngCore>(
    walkable: &Grid<bool>,
    required: &[Cell],
    rng: &mut R,
) -> Result<Grid<bool>> {
    let config = CarveConfig::minimal_path(walkable.clone(), required.iter().copied());
    config.validate()?;
    carve(&config, rng, &mut ())
}

/// Returns a random connected subset of `walkable` with `target` cells.
///
/// If `walkable` already has at most `target` cells it is returned unchanged.
pub fn carve_to_size<R: RngCore>(
    walkable: &Grid<bool>,
    target: usize,
    rng: &mut R,
) -> Result<Grid<bool>> {
    let config = CarveConfig::target_size(walkable.clone(), target);
    config.validate()?;
    carve(&config, rng, &mut ())
}

pub fn carve_with_events<R: RngCore>(
    config: &CarveConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Grid<bool>> {
    config.validate()?;
    carve(config, rng, sink)
}

fn carve<R: RngCore + ?Sized>(
    config: &CarveConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Grid<bool>> {
    let size = config.walkable.size();
    let mut region = config.walkable.clone();

    let (relevant, target) = match &config.mode {
        CarveMode::MinimalPath { required } => {
            // Components without required cells can go at once; the rest stays connected.
            if let Some(&first) = required.first() {
                region = reachable_from(&config.walkable, first);
                let dropped = config.walkable.count() - region.count();
                if dropped > 0 {
                    debug!("Dropped {} cells outside the required component.", dropped);
                }
            }
            (
                Some(Grid::from_cells(size, required.iter().copied())?),
                0,
            )
        }
        CarveMode::TargetSize(target) => (None, *target),
    };
    let mut members = region.count();
    let required = relevant.as_ref().map_or(0, Grid::count);

    debug!(
        "Carving {} grid | members: {}, required: {}, target: {:?}.",
        size,
        members,
        required,
        relevant.is_none().then_some(target)
    );
    if sink.wants(ChiselEventKind::CarveStarted) {
        sink.send(ChiselEvent::CarveStarted {
            size,
            members,
            required,
            target: relevant.is_none().then_some(target),
        });
    }
    if relevant.is_none() && members <= target {
        warn!(
            "Region has {} cells, not above the target of {}; nothing to carve.",
            members, target
        );
        if sink.wants(ChiselEventKind::Warning) {
            sink.send(ChiselEvent::Warning {
                context: "carve".into(),
                message: format!("region of {members} cells is within target {target}"),
            });
        }
    }

    while members > target {
        let cuts = find_articulation_points(&region, None)?;
        let relevant_cuts = match &relevant {
            Some(mask) => Some(find_articulation_points(&region, Some(mask))?),
            None => None,
        };
        let removable = |c: Cell| !cuts[c] && relevant_cuts.as_ref().is_none_or(|r| !r[c]);
        let weights = region.map(|c, inside| if *inside && removable(c) { 1.0 } else { 0.0 });
        let Some(cell) = pick_weighted_cell(&weights, rng)? else {
            break;
        };
        region[cell] = false;
        members -= 1;
        trace!("Carved {}; {} cells remain.", cell, members);
        if sink.wants(ChiselEventKind::CellCarved) {
            sink.send(ChiselEvent::CellCarved {
                cell,
                remaining: members,
            });
        }
    }

    debug!("Carved region down to {} cells.", members);
    if sink.wants(ChiselEventKind::CarveFinished) {
        sink.send(ChiselEvent::CarveFinished { members });
    }
    Ok(region)
}
