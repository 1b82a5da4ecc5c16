//! # tvdenoise: Total-Variation Denoising for 3D Volumes
//!
//! An iterative total-variation (TV) denoising and regularization solver for
//! dense 3D scalar volumes, implementing the Chambolle dual-projection
//! fixed-point scheme.
//!
//! ## What is TV denoising?
//!
//! Total variation measures the summed magnitude of spatial differences
//! across a signal. Minimizing it as a regularizer suppresses noise while
//! preserving sharp transitions, which makes it a standard tool for edge-
//! preserving smoothing of volumetric data. The Chambolle algorithm reaches
//! the TV-regularized solution through a fixed point of an auxiliary dual
//! (projection) field, avoiding the non-smooth optimization entirely.
//!
//! ## Quick Start
//!
//! ```rust
//! use tvdenoise::prelude::*;
//!
//! // A 4x4x4 volume, flat storage with linear index x + nx*y + nx*ny*z.
//! let mut volume = vec![0.0_f64; 64];
//! volume[21] = 1.0; // an isolated bright voxel
//!
//! // Build the model
//! let model = TvDenoise::new()
//!     .lambda(0.1)          // regularization weight
//!     .step(0.125)          // sub-gradient step (<= 1/8 for 3D stability)
//!     .tolerance(1e-6)      // squared-displacement stopping threshold
//!     .max_iterations(100)
//!     .build()?;
//!
//! // Run the solver
//! let result = model.denoise(&volume, None, (4, 4, 4))?;
//!
//! assert_eq!(result.denoised.len(), 64);
//! assert!(result.iterations >= 1);
//! # Result::<(), TvError>::Ok(())
//! ```
//!
//! ## Boundary Modes
//!
//! * [`Clamped`](prelude::Clamped): ordinary subtraction; the default for
//!   intensity data. Finite-difference terms whose neighbor falls outside
//!   the grid are excluded, never reflected or padded.
//! * [`Wrapped`](prelude::Wrapped): every spatial difference passes through
//!   a circular distance over the volume's intensity range; intended for
//!   orientation angles and other phase-like data. The data-fidelity term is
//!   never wrapped.
//!
//! ## Adaptive Denoising
//!
//! `.adaptive(target_stdev)` lets the solver retune its regularization
//! weight so the removed residual noise matches a target standard deviation,
//! instead of requiring a hand-tuned lambda:
//!
//! ```rust
//! use tvdenoise::prelude::*;
//!
//! # let volume: Vec<f64> = (0..125).map(|i| (i as f64 * 0.7).sin()).collect();
//! let model = TvDenoise::new()
//!     .lambda(0.05)
//!     .adaptive(0.1)        // target noise stdev on the normalized scale
//!     .max_iterations(50)
//!     .build()?;
//!
//! let result = model.denoise(&volume, None, (5, 5, 5))?;
//! assert!(result.noise_estimate.is_some());
//! # Result::<(), TvError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! `denoise` returns a `Result<TvResult<T>, TvError>`; the `?` operator is
//! idiomatic. All failures (shape mismatches, non-finite inputs, degenerate
//! intensity ranges, a diverging adaptive weight) are surfaced to the
//! caller, never swallowed or retried.
//!
//! ## References
//!
//! - Chambolle, A. (2004). "An Algorithm for Total Variation Minimization
//!   and Applications"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - the grid passes and reconstruction.
mod algorithms;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for TV denoising.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        BoundaryMode::Clamped, BoundaryMode::Wrapped, Termination, TvDenoise, TvError, TvModel,
        TvResult, TvWorkspace,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
