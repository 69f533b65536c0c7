#![forbid(unsafe_code)]
//! path_chisel: connectivity-preserving random paths and regions on rectangular grids.
//!
//! Modules:
//! - grid: cells, sizes, and dense per-cell storage
//! - cell_set: sparse membership index with O(1) mutation and uniform pick
//! - sampling: uniform and weighted random selection
//! - connectivity: flood fill and component checks
//! - articulation: cut-vertex detection, optionally relative to a relevance mask
//! - chisel: winding paths between two endpoints
//! - carve: shrinking regions to a minimal linking skeleton or a target size
//! - events: structured progress events and sinks
//!
//! All generators take an explicit `RngCore`; seed it for reproducible output.
pub mod articulation;
pub mod carve;
pub mod cell_set;
pub mod chisel;
pub mod connectivity;
pub mod error;
pub mod events;
pub mod grid;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use path_chisel::prelude::*;`.
pub mod prelude {
    pub use crate::articulation::find_articulation_points;
    pub use crate::carve::{
        carve_minimal, carve_to_size, carve_with_events, CarveConfig, CarveMode, RegionCarver,
    };
    pub use crate::cell_set::CellSet;
    pub use crate::chisel::{
        random_path, random_path_with_events, random_shortest_path, CellState, PathChisel,
        PathConfig, DEFAULT_WIGGLINESS,
    };
    pub use crate::connectivity::{
        all_mutually_reachable, component_count, is_connected, reachable_from,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        ChiselEvent, ChiselEventKind, EventSink, FnSink, MultiSink, VecSink,
    };
    pub use crate::grid::{Cell, Grid, GridSize};
    pub use crate::sampling::{pick_weighted_cell, pick_weighted_index};
}
