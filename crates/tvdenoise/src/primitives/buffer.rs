//! Memory management and buffer recycling for solver runs.
//!
//! ## Purpose
//!
//! This module provides the reusable workspaces that hold the dual
//! (projection) field and the intermediate divergence field across solver
//! iterations. Allocating these once and recycling them across runs removes
//! all per-iteration allocations.
//!
//! ## Design notes
//!
//! * **Centralized Ownership**: The workspace owns every mutable array a run
//!   needs; the input volume and mask stay borrowed and read-only.
//! * **Double Buffering**: The dual field is held twice (`dual`, `dual_next`)
//!   so the projection pass reads only prior-iteration values and never
//!   observes a same-pass write. The buffers are swapped after each pass.
//! * **Warm Starts**: `prepare` only reallocates and zeroes when the grid
//!   size changes; re-running with an unchanged workspace continues from the
//!   converged dual field.
//!
//! ## Invariants
//!
//! * All three dual components and the intermediate field share one length.
//! * A freshly prepared workspace holds an all-zero dual field.
//! * Capacity is monotonically non-shrinking across `prepare` calls of equal size.
//!
//! ## Non-goals
//!
//! * Thread-local caching (workspaces are explicitly passed, one per run).
//! * Automatic shrinking or memory reclamation.

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
use core::mem::swap;
use num_traits::Float;

// Internal dependencies
use crate::primitives::grid::Axis;

// ============================================================================
// Dual Field
// ============================================================================

/// The dual (projection) variable of the Chambolle scheme: one scalar
/// component per spatial axis at every voxel.
#[derive(Debug, Clone, PartialEq)]
pub struct DualField<T> {
    /// x-axis component.
    pub x: Vec<T>,
    /// y-axis component.
    pub y: Vec<T>,
    /// z-axis component.
    pub z: Vec<T>,
}

impl<T: Float> DualField<T> {
    /// Create a zero-initialized dual field over `len` voxels.
    pub fn zeros(len: usize) -> Self {
        Self {
            x: vec![T::zero(); len],
            y: vec![T::zero(); len],
            z: vec![T::zero(); len],
        }
    }

    /// Number of voxels covered by the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when the field covers no voxels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Component slice along an axis.
    #[inline]
    pub fn component(&self, axis: Axis) -> &[T] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Resize to `len` voxels and zero every component.
    pub fn reset(&mut self, len: usize) {
        for c in [&mut self.x, &mut self.y, &mut self.z] {
            c.clear();
            c.resize(len, T::zero());
        }
    }

    /// Move the three components out of the field.
    pub fn into_components(self) -> [Vec<T>; 3] {
        [self.x, self.y, self.z]
    }
}

// ============================================================================
// Solver Workspace
// ============================================================================

/// Working memory for one solver run: the double-buffered dual field and the
/// intermediate divergence field.
#[derive(Debug, Clone)]
pub struct TvWorkspace<T> {
    /// Current dual field (prior-iteration snapshot during a pass).
    pub dual: DualField<T>,
    /// Write target of the projection pass; swapped with `dual` afterwards.
    pub dual_next: DualField<T>,
    /// Intermediate field, overwritten every iteration.
    pub field: Vec<T>,
}

impl<T: Float> Default for TvWorkspace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TvWorkspace<T> {
    /// Create an empty workspace; buffers are grown on first use.
    pub fn new() -> Self {
        Self {
            dual: DualField::zeros(0),
            dual_next: DualField::zeros(0),
            field: Vec::new(),
        }
    }

    /// Create a workspace pre-sized for `len` voxels.
    pub fn with_capacity(len: usize) -> Self {
        let mut ws = Self::new();
        ws.prepare(len);
        ws
    }

    /// Ensure every buffer covers `len` voxels.
    ///
    /// Changing the size resets the dual field to zero; an unchanged size
    /// leaves it intact, which is what makes warm starts work.
    pub fn prepare(&mut self, len: usize) {
        if self.field.len() != len {
            self.dual.reset(len);
            self.dual_next.reset(len);
            self.field.clear();
            self.field.resize(len, T::zero());
        }
    }

    /// Zero the dual field for a cold start at the current size.
    pub fn reset(&mut self) {
        let len = self.field.len();
        self.dual.reset(len);
        self.dual_next.reset(len);
    }

    /// Promote the projection pass output to the current dual field.
    #[inline]
    pub fn swap_dual(&mut self) {
        swap(&mut self.dual, &mut self.dual_next);
    }
}
