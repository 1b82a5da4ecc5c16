//! Divergence pass: the first of the two grid sweeps per iteration.
//!
//! ## Purpose
//!
//! This module computes the intermediate field of the Chambolle scheme. For
//! every masked voxel it takes the backward-difference divergence of the
//! dual field and subtracts the normalized data-fidelity term:
//!
//! ```text
//! field[v] = div p(v) - (image[v] - min) / (max - min) / lambda
//! ```
//!
//! It also hosts the residual-noise estimate used by the adaptive control
//! loop, which recomputes the same divergence sum.
//!
//! ## Design notes
//!
//! * **Pure pass**: The pass reads an immutable dual-field snapshot and
//!   writes a caller-provided output buffer; it never mutates the dual field,
//!   so the projection pass that follows sees one consistent prior state.
//! * **Asymmetric boundary**: A backward term whose neighbor falls outside
//!   the grid is excluded, not reflected or padded. Low-face voxels simply
//!   contribute zero along that axis.
//! * **Wrapping**: In wrapped mode every spatial difference goes through the
//!   circular distance; the data-fidelity term is never wrapped.
//! * **Parallelism**: With the `parallel` feature the pass runs one rayon
//!   task per z-plane; planes only read shared immutable state, so the sweep
//!   stays deterministic.
//!
//! ## Invariants
//!
//! * Unmasked voxels are never written (their `field` content is unspecified).
//! * The pass is deterministic for identical inputs, sequential or parallel.
//!
//! ## Non-goals
//!
//! * This module does not update the dual field (see `projection`).
//! * This module does not decide convergence (see the engine).

// External dependencies
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::math::boundary::BoundaryMode;
use crate::primitives::buffer::DualField;
use crate::primitives::grid::{is_active, VolumeGrid};

// ============================================================================
// Per-Voxel Divergence
// ============================================================================

/// Backward-difference divergence of the dual field at one voxel.
///
/// Terms whose backward neighbor lies outside the grid along an axis are
/// excluded (the asymmetric boundary policy).
#[inline]
pub fn divergence_at<T: Float>(
    grid: &VolumeGrid,
    dual: &DualField<T>,
    idx: usize,
    x: usize,
    y: usize,
    z: usize,
    boundary: BoundaryMode,
    range: T,
) -> T {
    let mut divp = T::zero();
    if x > 0 {
        divp = divp + boundary.diff(dual.x[idx], dual.x[idx - 1], range);
    }
    if y > 0 {
        divp = divp + boundary.diff(dual.y[idx], dual.y[idx - grid.nx], range);
    }
    if z > 0 {
        divp = divp + boundary.diff(dual.z[idx], dual.z[idx - grid.plane()], range);
    }
    divp
}

// ============================================================================
// Pass 1: Intermediate Field
// ============================================================================

/// Compute the intermediate field for one z-plane.
#[allow(clippy::too_many_arguments)]
fn divergence_plane<T: Float>(
    grid: &VolumeGrid,
    image: &[T],
    mask: Option<&[bool]>,
    dual: &DualField<T>,
    min: T,
    range: T,
    lambda: T,
    boundary: BoundaryMode,
    z: usize,
    plane_out: &mut [T],
) {
    let base = z * grid.plane();
    for y in 0..grid.ny {
        for x in 0..grid.nx {
            let idx = base + grid.nx * y + x;
            if !is_active(mask, idx) {
                continue;
            }
            let divp = divergence_at(grid, dual, idx, x, y, z, boundary, range);
            plane_out[idx - base] = divp - (image[idx] - min) / range / lambda;
        }
    }
}

/// Compute the full intermediate field from an immutable dual-field snapshot.
///
/// Writes masked voxels of `field` only; the pass must fully complete before
/// the projection pass reads any of its output.
#[allow(clippy::too_many_arguments)]
pub fn compute_divergence_field<T: Float + Send + Sync>(
    grid: &VolumeGrid,
    image: &[T],
    mask: Option<&[bool]>,
    dual: &DualField<T>,
    min: T,
    range: T,
    lambda: T,
    boundary: BoundaryMode,
    field: &mut [T],
) {
    let plane = grid.plane();

    #[cfg(feature = "parallel")]
    {
        field
            .par_chunks_mut(plane)
            .enumerate()
            .for_each(|(z, plane_out)| {
                divergence_plane(
                    grid, image, mask, dual, min, range, lambda, boundary, z, plane_out,
                );
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (z, plane_out) in field.chunks_mut(plane).enumerate() {
            divergence_plane(
                grid, image, mask, dual, min, range, lambda, boundary, z, plane_out,
            );
        }
    }
}

// ============================================================================
// Residual Noise Estimate
// ============================================================================

/// Root-mean-square of the dual-field divergence over the masked region,
/// scaled by the regularization weight.
///
/// This estimates the noise magnitude removed by the current regularization
/// strength; the adaptive control loop steers it toward a target standard
/// deviation. Always uses the clamped-boundary divergence (the adaptive
/// variant does not support wrapped boundaries).
pub fn residual_noise<T: Float>(
    grid: &VolumeGrid,
    mask: Option<&[bool]>,
    dual: &DualField<T>,
    active: usize,
    lambda: T,
) -> T {
    if active == 0 {
        return T::zero();
    }

    let mut sum = T::zero();
    for z in 0..grid.nz {
        for y in 0..grid.ny {
            for x in 0..grid.nx {
                let idx = grid.index(x, y, z);
                if !is_active(mask, idx) {
                    continue;
                }
                let divp =
                    divergence_at(grid, dual, idx, x, y, z, BoundaryMode::Clamped, T::one());
                sum = sum + divp * divp;
            }
        }
    }

    (sum / T::from(active).unwrap_or_else(T::one)).sqrt() * lambda
}
