//! Result reconstruction from the converged dual field.
//!
//! ## Purpose
//!
//! This module rebuilds the denoised scalar volume once iteration has
//! stopped:
//!
//! ```text
//! result[v] = (image[v] - min) / (max - min) - lambda * div p(v)
//! ```
//!
//! The divergence is recomputed fresh from the converged dual field with the
//! same boundary rule as the divergence pass, never read from the stale
//! intermediate buffer.
//!
//! ## Design notes
//!
//! * **Unmasked voxels**: Left at zero; only masked voxels are written.
//! * **Wrapped output**: In wrapped mode the divergence terms use the
//!   circular distance, but the combined value is *not* re-wrapped into the
//!   circular range by default. The `rewrap` flag maps the combined value
//!   back into `(-range/2, range/2]` for consumers that expect circular
//!   output.
//!
//! ## Non-goals
//!
//! * This module does not denormalize back to the input intensity scale; the
//!   output lives on the normalized `[0, 1]` scale of the fidelity term.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::divergence::divergence_at;
use crate::math::boundary::BoundaryMode;
use crate::math::circular::circular_diff;
use crate::primitives::buffer::DualField;
use crate::primitives::grid::{is_active, VolumeGrid};

/// Rebuild the denoised volume from the image and the converged dual field.
///
/// Returns a volume of the same shape as the input with unmasked voxels at
/// zero.
#[allow(clippy::too_many_arguments)]
pub fn reconstruct<T: Float>(
    grid: &VolumeGrid,
    image: &[T],
    mask: Option<&[bool]>,
    dual: &DualField<T>,
    min: T,
    range: T,
    lambda: T,
    boundary: BoundaryMode,
    rewrap: bool,
) -> Vec<T> {
    let mut out = vec![T::zero(); grid.len];

    for z in 0..grid.nz {
        for y in 0..grid.ny {
            for x in 0..grid.nx {
                let idx = grid.index(x, y, z);
                if !is_active(mask, idx) {
                    continue;
                }
                let divp = divergence_at(grid, dual, idx, x, y, z, boundary, range);
                let mut value = (image[idx] - min) / range - lambda * divp;
                if rewrap {
                    value = circular_diff(value, range);
                }
                out[idx] = value;
            }
        }
    }

    out
}
