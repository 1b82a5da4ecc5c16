//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer holds the pure mathematical functions used by the grid passes:
//! the circular difference and the boundary-mode dispatch built on it.
//! Everything here is deterministic and side-effect free.

/// Signed circular difference for cyclic value domains.
pub mod circular;

/// Boundary mode for finite-difference terms.
pub mod boundary;
