#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use path_chisel::prelude::{Grid, GridSize};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const SIDES: [u32; 4] = [16, 32, 64, 128];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Open square with a comb of walls: every fourth column is solid except for one gap,
/// alternating between the top and bottom rows.
pub fn comb(side: u32) -> Grid<bool> {
    Grid::from_fn(GridSize::new(side, side), |c| {
        if c.x % 4 != 2 {
            return true;
        }
        let gap = if (c.x / 4) % 2 == 0 { side - 1 } else { 0 };
        c.y == gap
    })
}
