//! First-order Godunov finite-volume update (§4.6).
//!
//! The interior-face loop visits each face exactly once: the low-facing
//! direction of a cell only ever fires at a block's own low boundary, and
//! every interior face is instead folded into the *high*-facing direction of
//! its lower-index cell, which updates both cells in one call. Combined with
//! a strictly sequential `(i, j, k)` traversal (no worker-local thread pool
//! dispatches concurrent iterations of `i`), no two in-flight writes ever
//! target the same cell, which is what the original's `#pragma omp parallel
//! for i` lost: a positive-face flux there wrote `cell(i+1, j, k)` while a
//! concurrently scheduled `i+1` iteration could be writing the same cell.
//! Sequential traversal is the simplest race-free fix; this leaves `(j, k)`
//! free for a future worker-local thread pool without touching the `i` axis.

use core_grid::{Axis, Block, FaceDirection, FluidState, Grid, GridError};
use tracing::trace;

use crate::riemann::{AverageRiemann, RiemannSolver};

/// Owns the Riemann averager used to center every face state and drives the
/// per-step procedure of §4.6: copy, expand, flux, contract, swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct GodunovStep<R: RiemannSolver = AverageRiemann> {
    riemann: R,
}

impl<R: RiemannSolver> GodunovStep<R> {
    pub fn new(riemann: R) -> Self {
        Self { riemann }
    }

    /// Advance every block this worker owns by one step of size `dt`, then
    /// flip the grid's layer bit. Blocks with no local storage are skipped;
    /// their state only changes once ownership moves, which §9 excludes.
    pub fn run(&self, grid: &mut Grid, dt: f64) -> Result<(), GridError> {
        if dt <= 0.0 {
            return Err(GridError::InvariantViolation {
                reason: format!("time step must be positive, got {dt}"),
            });
        }
        grid.step_timer.start();
        let cur = grid.layer();
        for block in grid.blocks_mut() {
            if !block.is_active() {
                continue;
            }
            trace!(block = block.id, "stepping block");
            block.copy_current_to_next(cur);
            block.convert_next_to_expanded(cur ^ 1);
            step_block(&self.riemann, block, cur, dt);
            block.convert_next_to_normal(cur ^ 1);
        }
        grid.swap_layers();
        grid.step_timer.stop();
        Ok(())
    }
}

fn step_block<R: RiemannSolver>(riemann: &R, block: &mut Block, cur: u8, dt: f64) {
    let nxt = cur ^ 1;
    let (ni, nj, nk) = (block.i_size(), block.j_size(), block.k_size());

    for i in 0..ni {
        for j in 0..nj {
            for k in 0..nk {
                apply_axis_flux(
                    riemann,
                    block,
                    cur,
                    nxt,
                    dt,
                    Axis::X,
                    FaceDirection::IMinus,
                    FaceDirection::IPlus,
                    (i, j, k),
                    i == 0,
                    (i + 1 < ni).then_some((i + 1, j, k)),
                );
                apply_axis_flux(
                    riemann,
                    block,
                    cur,
                    nxt,
                    dt,
                    Axis::Y,
                    FaceDirection::JMinus,
                    FaceDirection::JPlus,
                    (i, j, k),
                    j == 0,
                    (j + 1 < nj).then_some((i, j + 1, k)),
                );
                apply_axis_flux(
                    riemann,
                    block,
                    cur,
                    nxt,
                    dt,
                    Axis::Z,
                    FaceDirection::KMinus,
                    FaceDirection::KPlus,
                    (i, j, k),
                    k == 0,
                    (k + 1 < nk).then_some((i, j, k + 1)),
                );
            }
        }
    }
}

/// One cell's flux contribution along a single axis: its low face (handled
/// only at a block boundary, per the comment above) and its high face
/// (boundary or interior).
#[allow(clippy::too_many_arguments)]
fn apply_axis_flux<R: RiemannSolver>(
    riemann: &R,
    block: &mut Block,
    cur: u8,
    nxt: u8,
    dt: f64,
    axis: Axis,
    low_dir: FaceDirection,
    high_dir: FaceDirection,
    pos: (usize, usize, usize),
    at_low_boundary: bool,
    high_neighbor: Option<(usize, usize, usize)>,
) {
    let (i, j, k) = pos;
    let own = *block.cell(i, j, k).state(cur);
    let volume = block.cell(i, j, k).volume;

    if at_low_boundary {
        // This cell plays the high (receiving) side of the mirrored ghost
        // neighbor's face, so it takes the same `+F` the interior rule below
        // gives to a real high-side neighbor.
        let w = block.cell(i, j, k).area(low_dir) * dt / volume;
        let center = riemann.center(&own, &own.mirrored(axis));
        let (dr, dv, de) = scale_flux(&center, axis, w);
        block.cell_mut(i, j, k).state_mut(nxt).apply_flux(axis, dr, dv, de);
    }

    let w = block.cell(i, j, k).area(high_dir) * dt / volume;
    match high_neighbor {
        None => {
            // Low (owning) side of the mirrored ghost neighbor's face: `-F`,
            // matching the interior rule's owning-cell side.
            let center = riemann.center(&own, &own.mirrored(axis));
            let (dr, dv, de) = scale_flux(&center, axis, w);
            block.cell_mut(i, j, k).state_mut(nxt).apply_flux(axis, -dr, -dv, -de);
        }
        Some((ni, nj, nk)) => {
            let neighbor = *block.cell(ni, nj, nk).state(cur);
            let center = riemann.center(&own, &neighbor);
            let (dr, dv, de) = scale_flux(&center, axis, w);
            block.cell_mut(i, j, k).state_mut(nxt).apply_flux(axis, -dr, -dv, -de);
            block.cell_mut(ni, nj, nk).state_mut(nxt).apply_flux(axis, dr, dv, de);
        }
    }
}

/// `(F_rho, F_momentum, F_energy)` for the centered state `center`, scaled by
/// the face weight `w = S * dt / V_c` (§4.6 "Face flux").
fn scale_flux(center: &FluidState, axis: Axis, w: f64) -> (f64, f64, f64) {
    (
        center.mass_flux(axis) * w,
        center.momentum_flux(axis) * w,
        center.energy_flux(axis) * w,
    )
}
