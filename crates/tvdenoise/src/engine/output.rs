//! Output types and result structures for solver runs.
//!
//! ## Purpose
//!
//! This module defines the `TvResult` struct which encapsulates all outputs
//! from one solver run: the denoised volume, convergence metadata, the final
//! regularization weight, and optional white-box outputs.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Optional outputs use `Option`.
//! * **Generics**: Results are generic over `Float` types.
//! * **Ergonomics**: Implements `Display` for a human-readable summary.
//!
//! ## Invariants
//!
//! * `denoised` has the same length as the input volume.
//! * `iterations` is in `[1, max_iterations]`.
//! * `termination == Converged` implies `final_distance <= tolerance`.
//! * `noise_estimate` is populated exactly for adaptive runs.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Termination
// ============================================================================

/// Why the iteration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The maximum squared displacement dropped to the tolerance or below.
    Converged,
    /// The hard iteration cap was reached first.
    IterationLimit,
}

impl Termination {
    /// Human-readable name of the termination cause.
    pub fn name(&self) -> &'static str {
        match self {
            Termination::Converged => "Converged",
            Termination::IterationLimit => "IterationLimit",
        }
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Output of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct TvResult<T> {
    /// Denoised volume on the normalized `[0, 1]` intensity scale; unmasked
    /// voxels are zero.
    pub denoised: Vec<T>,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Why the loop stopped.
    pub termination: Termination,

    /// Maximum squared dual-field displacement of the final iteration.
    pub final_distance: T,

    /// Regularization weight in effect at the end of the run (rescaled by
    /// the adaptive control loop when active).
    pub lambda_used: T,

    /// Last residual-noise estimate (adaptive runs only).
    pub noise_estimate: Option<T>,

    /// Intensity range `(min, max)` of the input volume.
    pub range: (T, T),

    /// Final dual-field components, one per axis (on request).
    pub dual_field: Option<[Vec<T>; 3]>,
}

impl<T: Float> TvResult<T> {
    /// True when the run converged before the iteration cap.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for TvResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Voxels: {}", self.denoised.len())?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Termination: {}", self.termination.name())?;
        writeln!(f, "  Final distance: {}", self.final_distance)?;
        writeln!(f, "  Lambda used: {}", self.lambda_used)?;
        if let Some(noise) = self.noise_estimate {
            writeln!(f, "  Noise estimate: {}", noise)?;
        }
        writeln!(f, "  Range: [{}, {}]", self.range.0, self.range.1)?;
        Ok(())
    }
}
