//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer holds the numerical core of the Chambolle scheme: the two grid
//! passes of one fixed-point iteration and the final reconstruction. Each
//! pass is a pure function over immutable snapshots; iteration control and
//! buffer ownership live in the engine.

/// Pass 1: intermediate divergence field and the residual-noise estimate.
pub mod divergence;

/// Pass 2: projection update of the dual field.
pub mod projection;

/// Reconstruction of the denoised volume.
pub mod reconstruction;
