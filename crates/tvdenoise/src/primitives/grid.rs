//! Grid geometry and scan statistics for 3D volumes.
//!
//! ## Purpose
//!
//! This module defines the lattice geometry shared by every grid sweep: the
//! volume dimensions, the linear indexing scheme, and the per-axis strides.
//! It also provides the one-time scan that derives the intensity range and
//! the active-voxel count from a volume and its optional mask.
//!
//! ## Design notes
//!
//! * **Flat storage**: Volumes are flat slices with linear index
//!   `x + nx*y + nx*ny*z`; the grid only describes shape, it owns no data.
//! * **Read-only statistics**: `VolumeStats::scan` has no side effects and is
//!   computed once per solver run.
//! * **Generics**: Statistics are generic over `Float` types.
//!
//! ## Invariants
//!
//! * `len == nx * ny * nz`.
//! * `stride(X) == 1`, `stride(Y) == nx`, `stride(Z) == nx * ny`.
//! * `min <= v <= max` for every voxel value `v` (masked or not).
//! * `active` counts exactly the mask-true voxels; an absent mask counts all.
//!
//! ## Non-goals
//!
//! * This module does not validate slice lengths (handled by the validator).
//! * This module does not allocate or mutate voxel data.

// External dependencies
use num_traits::Float;

// ============================================================================
// Axes
// ============================================================================

/// Spatial axes of the volume lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Fastest-varying axis (stride 1).
    X,
    /// Middle axis (stride nx).
    Y,
    /// Slowest-varying axis (stride nx * ny).
    Z,
}

impl Axis {
    /// All three axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// ============================================================================
// Volume Grid
// ============================================================================

/// Shape and indexing of a dense 3D scalar volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeGrid {
    /// Extent along the x-axis.
    pub nx: usize,
    /// Extent along the y-axis.
    pub ny: usize,
    /// Extent along the z-axis.
    pub nz: usize,
    /// Total number of voxels (`nx * ny * nz`).
    pub len: usize,
}

impl VolumeGrid {
    /// Create a grid from its three extents.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            len: nx * ny * nz,
        }
    }

    /// Linear stride between neighbors along an axis.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => 1,
            Axis::Y => self.nx,
            Axis::Z => self.nx * self.ny,
        }
    }

    /// Linear index of the voxel at `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.nx * y + self.nx * self.ny * z
    }

    /// Number of voxels in one z-plane.
    #[inline]
    pub fn plane(&self) -> usize {
        self.nx * self.ny
    }
}

// ============================================================================
// Scan Statistics
// ============================================================================

/// One-time scan statistics of an input volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeStats<T> {
    /// Smallest voxel value over the whole volume.
    pub min: T,
    /// Largest voxel value over the whole volume.
    pub max: T,
    /// Number of mask-true voxels.
    pub active: usize,
}

impl<T: Float> VolumeStats<T> {
    /// Scan a volume and its optional mask in a single pass.
    ///
    /// The intensity range covers *all* voxels, masked or not; only the
    /// active count depends on the mask.
    pub fn scan(image: &[T], mask: Option<&[bool]>) -> Self {
        let mut min = T::infinity();
        let mut max = T::neg_infinity();
        let mut active = 0usize;

        for (i, &v) in image.iter().enumerate() {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
            if mask.map_or(true, |m| m[i]) {
                active += 1;
            }
        }

        Self { min, max, active }
    }

    /// Width of the intensity range.
    #[inline]
    pub fn range(&self) -> T {
        self.max - self.min
    }

    /// True when every voxel shares the same value and the normalization
    /// `(v - min) / (max - min)` is undefined.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }
}

// ============================================================================
// Mask Access
// ============================================================================

/// Whether the voxel at `idx` participates in the computation.
///
/// An absent mask means every voxel is active.
#[inline]
pub fn is_active(mask: Option<&[bool]>, idx: usize) -> bool {
    mask.map_or(true, |m| m[idx])
}
