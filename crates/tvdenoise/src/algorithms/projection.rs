//! Projection pass: the second of the two grid sweeps per iteration.
//!
//! ## Purpose
//!
//! This module performs the fixed-point update of the dual field. For every
//! masked voxel it takes the forward-difference gradient of the intermediate
//! field, renormalizes, and writes the updated projection:
//!
//! ```text
//! norm       = 1 + tau * ||grad field(v)||
//! p_next(v)  = (p_prev(v) + tau * grad field(v)) / norm
//! ```
//!
//! The pass returns the largest squared per-voxel displacement of the dual
//! field, which is the solver's convergence signal.
//!
//! ## Design notes
//!
//! * **Pure pass**: Reads the intermediate field and the prior dual snapshot,
//!   writes a separate output field. The engine swaps the two dual buffers
//!   afterwards, so no update ever observes another update from the same
//!   iteration.
//! * **Asymmetric boundary**: A forward gradient term whose neighbor lies
//!   outside the grid is zero, matching the divergence pass.
//! * **Unmasked voxels**: Copied through unchanged to keep the double buffer
//!   consistent; since the dual field starts at zero, unmasked voxels stay
//!   zero for the lifetime of the run.
//! * **Parallelism**: One rayon task per z-plane under the `parallel`
//!   feature, with the per-plane maxima reduced at the end.
//!
//! ## Invariants
//!
//! * The returned displacement is the maximum over masked voxels only.
//! * The pass is deterministic for identical inputs, sequential or parallel.
//!
//! ## Non-goals
//!
//! * This module does not compute the intermediate field (see `divergence`).
//! * This module does not loop; iteration control lives in the engine.

// External dependencies
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::math::boundary::BoundaryMode;
use crate::primitives::buffer::DualField;
use crate::primitives::grid::{is_active, VolumeGrid};

// ============================================================================
// Per-Plane Update
// ============================================================================

/// Update one z-plane of the dual field; returns the plane's largest squared
/// displacement over masked voxels.
#[allow(clippy::too_many_arguments)]
fn projection_plane<T: Float>(
    grid: &VolumeGrid,
    mask: Option<&[bool]>,
    field: &[T],
    prev: &DualField<T>,
    tau: T,
    boundary: BoundaryMode,
    range: T,
    z: usize,
    out_x: &mut [T],
    out_y: &mut [T],
    out_z: &mut [T],
) -> T {
    let base = z * grid.plane();
    let mut distance = T::zero();

    for y in 0..grid.ny {
        for x in 0..grid.nx {
            let idx = base + grid.nx * y + x;
            let local = idx - base;

            if !is_active(mask, idx) {
                out_x[local] = prev.x[idx];
                out_y[local] = prev.y[idx];
                out_z[local] = prev.z[idx];
                continue;
            }

            let grad_x = if x + 1 < grid.nx {
                boundary.diff(field[idx + 1], field[idx], range)
            } else {
                T::zero()
            };
            let grad_y = if y + 1 < grid.ny {
                boundary.diff(field[idx + grid.nx], field[idx], range)
            } else {
                T::zero()
            };
            let grad_z = if z + 1 < grid.nz {
                boundary.diff(field[idx + grid.plane()], field[idx], range)
            } else {
                T::zero()
            };

            let norm = T::one()
                + tau * (grad_x * grad_x + grad_y * grad_y + grad_z * grad_z).sqrt();

            let px = (prev.x[idx] + tau * grad_x) / norm;
            let py = (prev.y[idx] + tau * grad_y) / norm;
            let pz = (prev.z[idx] + tau * grad_z) / norm;

            let dx = px - prev.x[idx];
            let dy = py - prev.y[idx];
            let dz = pz - prev.z[idx];
            let dist = dx * dx + dy * dy + dz * dz;
            if dist > distance {
                distance = dist;
            }

            out_x[local] = px;
            out_y[local] = py;
            out_z[local] = pz;
        }
    }

    distance
}

// ============================================================================
// Pass 2: Projection Update
// ============================================================================

/// Update the whole dual field from the intermediate field and the prior
/// dual snapshot; returns the maximum squared displacement over masked
/// voxels, which is the step's convergence signal.
///
/// `next` is fully overwritten; the engine swaps it with `prev` afterwards.
#[allow(clippy::too_many_arguments)]
pub fn compute_projection_update<T: Float + Send + Sync>(
    grid: &VolumeGrid,
    mask: Option<&[bool]>,
    field: &[T],
    prev: &DualField<T>,
    next: &mut DualField<T>,
    tau: T,
    boundary: BoundaryMode,
    range: T,
) -> T {
    let plane = grid.plane();

    #[cfg(feature = "parallel")]
    {
        next.x
            .par_chunks_mut(plane)
            .zip(next.y.par_chunks_mut(plane))
            .zip(next.z.par_chunks_mut(plane))
            .enumerate()
            .map(|(z, ((out_x, out_y), out_z))| {
                projection_plane(
                    grid, mask, field, prev, tau, boundary, range, z, out_x, out_y, out_z,
                )
            })
            .reduce(T::zero, T::max)
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut distance = T::zero();
        for (z, ((out_x, out_y), out_z)) in next
            .x
            .chunks_mut(plane)
            .zip(next.y.chunks_mut(plane))
            .zip(next.z.chunks_mut(plane))
            .enumerate()
        {
            let plane_dist = projection_plane(
                grid, mask, field, prev, tau, boundary, range, z, out_x, out_y, out_z,
            );
            if plane_dist > distance {
                distance = plane_dist;
            }
        }
        distance
    }
}
