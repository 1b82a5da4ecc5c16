//! Boundary mode for finite-difference terms.
//!
//! ## Purpose
//!
//! This module defines how the solver's spatial finite differences treat the
//! value domain: as a plain linear scale (clamped) or as a circle of width
//! equal to the intensity range (wrapped). Both modes share the same lattice
//! boundary policy: terms whose neighbor falls outside the grid are simply
//! excluded, never reflected or padded, because changing that policy changes
//! numerical results at the volume's faces.
//!
//! ## Key concepts
//!
//! * **Clamped**: ordinary subtraction; the default for intensity data.
//! * **Wrapped**: every spatial difference passes through the circular
//!   distance; intended for angular data normalized into the value range.
//!
//! ## Non-goals
//!
//! * This module does not implement the grid passes themselves.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::circular::circular_diff;

// ============================================================================
// Boundary Mode
// ============================================================================

/// Value-domain treatment of spatial finite differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Plain subtraction (linear value domain).
    Clamped,
    /// Circular subtraction over the intensity range (cyclic value domain).
    Wrapped,
}

impl Default for BoundaryMode {
    fn default() -> Self {
        BoundaryMode::Clamped
    }
}

impl BoundaryMode {
    /// Human-readable name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryMode::Clamped => "Clamped",
            BoundaryMode::Wrapped => "Wrapped",
        }
    }

    /// Signed difference `a - b` under this mode.
    ///
    /// `range` is the volume's intensity range; it is only consulted in
    /// wrapped mode.
    #[inline]
    pub fn diff<T: Float>(self, a: T, b: T, range: T) -> T {
        match self {
            BoundaryMode::Clamped => a - b,
            BoundaryMode::Wrapped => circular_diff(a - b, range),
        }
    }
}
