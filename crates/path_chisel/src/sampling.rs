//! Random selection helpers.
//!
//! All randomness in the crate flows through an explicit [`rand::RngCore`] supplied by the
//! caller, so runs are reproducible with a seeded generator such as `StdRng`.
//!
//! - [rand01]: uniform float in `[0, 1)`.
//! - [rand_index]: uniform index below a length.
//! - [pick_weighted_index]: index drawn proportionally to non-negative weights.
//! - [pick_weighted_cell]: the same over a per-cell weight [Grid].
use rand::RngCore;

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    // 53 random mantissa bits.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub fn rand_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0, "rand_index on empty range");
    ((rand01(rng) * len as f64) as usize).min(len.saturating_sub(1))
}

/// Picks an index with probability proportional to its weight.
///
/// Returns `Ok(None)` when all weights are zero (or `weights` is empty) and
/// `Err(Error::InvalidWeight)` for any negative or non-finite weight.
pub fn pick_weighted_index<R: RngCore + ?Sized>(
    weights: &[f64],
    rng: &mut R,
) -> Result<Option<usize>> {
    let mut total = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { index, weight });
        }
        total += weight;
    }
    if total <= 0.0 {
        return Ok(None);
    }

    let mut roll = rand01(rng) * total;
    for (i, &weight) in weights.iter().enumerate() {
        roll -= weight;
        if roll < 0.0 {
            return Ok(Some(i));
        }
    }

    // Rounding left a sliver of the roll; settle on the last positive weight.
    Ok(weights.iter().rposition(|w| *w > 0.0))
}

/// Picks a cell with probability proportional to its weight in `weights`.
pub fn pick_weighted_cell<R: RngCore + ?Sized>(
    weights: &Grid<f64>,
    rng: &mut R,
) -> Result<Option<Cell>> {
    let size = weights.size();
    Ok(pick_weighted_index(weights.as_slice(), rng)?.map(|i| size.cell_at(i)))
}
