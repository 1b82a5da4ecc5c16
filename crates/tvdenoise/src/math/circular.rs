//! Circular (wrap-around) difference for cyclic value domains.
//!
//! ## Purpose
//!
//! This module provides the signed circular difference used by the wrapped
//! boundary variant of the solver. Orientation angles and other phase-like
//! data normalized into the volume's intensity range live on a circle; a
//! plain subtraction across the wrap point would report an artificially
//! large jump where the true distance is small.
//!
//! ## Invariants
//!
//! * The result lies in the half-open interval `(-range/2, range/2]`.
//! * Differences already inside that interval pass through unchanged.
//! * `circular_diff(d + k*range, range) == circular_diff(d, range)` for any
//!   integer `k`.
//!
//! ## Non-goals
//!
//! * This module does not decide *which* terms are wrapped; the solver wraps
//!   spatial derivatives only, never the data-fidelity term.

// External dependencies
use num_traits::Float;

/// Signed difference mapped into `(-range/2, range/2]`.
///
/// `range` must be positive; the caller guarantees this (it is the volume's
/// intensity range, which the validator has already checked against zero).
#[inline]
pub fn circular_diff<T: Float>(delta: T, range: T) -> T {
    let half = range / (T::one() + T::one());
    let mut d = delta % range;
    if d > half {
        d = d - range;
    } else if d <= -half {
        d = d + range;
    }
    d
}
